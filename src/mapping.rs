use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct LabelRule {
    #[schemars(description = "Report label the extracted value is printed under, e.g. \"K201\"")]
    pub label: String,

    #[schemars(description = "Name of the person section to search, e.g. \"tar4\"")]
    pub section: String,

    #[serde(default)]
    #[schemars(
        description = "Numeric code to match inside the month's code tables. When absent, the field is read directly from the month entry instead."
    )]
    pub code: Option<i64>,

    #[schemars(description = "Name of the value field to extract, e.g. \"nsum\" or \"nsumv\"")]
    pub field: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(
        description = "Multiplier applied to the extracted value before formatting. A value that does not parse as a number is kept unmultiplied."
    )]
    pub multiplier: Option<f64>,
}

impl LabelRule {
    /// Rule matching a coded line item inside the section's code tables.
    pub fn coded(label: &str, section: &str, code: i64, field: &str) -> Self {
        Self {
            label: label.to_string(),
            section: section.to_string(),
            code: Some(code),
            field: field.to_string(),
            multiplier: None,
        }
    }

    /// Rule reading a scalar field directly from the month entry.
    pub fn direct(label: &str, section: &str, field: &str) -> Self {
        Self {
            label: label.to_string(),
            section: section.to_string(),
            code: None,
            field: field.to_string(),
            multiplier: None,
        }
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = Some(multiplier);
        self
    }
}

/// Label rules evaluated in declaration order for every month of the year.
///
/// The default covers the sections used by agent packages in the wild:
/// income codes in "tar4", "tar5" and the "tar7".."tar9" value sections,
/// plus the flat tax and dividend totals of "tar14".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(transparent)]
pub struct ReportMapping {
    pub rules: Vec<LabelRule>,
}

impl Default for ReportMapping {
    fn default() -> Self {
        Self {
            rules: vec![
                LabelRule::coded("K201", "tar4", 201, "nsum"),
                LabelRule::coded("K503", "tar5", 503, "nsum"),
                LabelRule::coded("K620", "tar7", 620, "nsumv"),
                LabelRule::coded("K630", "tar8", 630, "nsumv"),
                LabelRule::coded("K640", "tar9", 640, "nsumv"),
                LabelRule::direct("PN", "tar14", "nsumt").with_multiplier(1.0),
                LabelRule::direct("DIV", "tar14", "nsumdiv"),
            ],
        }
    }
}

impl ReportMapping {
    /// Loads a mapping from a JSON file holding an array of label rules.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ReportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
        serde_json::from_str(text).map_err(|source| ReportError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Replaces the multiplier of every rule that carries one.
    pub fn override_multiplier(&mut self, multiplier: f64) {
        for rule in &mut self.rules {
            if rule.multiplier.is_some() {
                rule.multiplier = Some(multiplier);
            }
        }
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ReportMapping)
    }

    pub fn schema_as_json() -> serde_json::Result<String> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}
