use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde_json::Value;

use crate::error::{ReportError, Result};
use crate::report::ReportRenderer;
use crate::schema::AgentPackage;

/// Reads a UTF-8 JSON document, tolerating a leading byte-order mark.
pub fn load_document(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path).map_err(|source| ReportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    serde_json::from_str(text).map_err(|source| ReportError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Sibling path the report is written to: same name, "txt" extension.
pub fn output_path(input: &Path) -> PathBuf {
    input.with_extension("txt")
}

/// Converts one package file, writing the report next to the input and
/// returning the written path. Nothing is written when loading fails.
pub fn convert_file(input: &Path, renderer: &ReportRenderer) -> Result<PathBuf> {
    let document = load_document(input)?;
    let package = AgentPackage::from_document(&document);
    debug!(
        "{}: decoded {} person record(s)",
        input.display(),
        package.persons.len()
    );

    let report = renderer.render(&package);
    let output = output_path(input);
    fs::write(&output, &report).map_err(|source| ReportError::Write {
        path: output.clone(),
        source,
    })?;
    info!("wrote {}", output.display());
    Ok(output)
}
