//! # Tax Agent Report
//!
//! A library for converting tax agent JSON packages ("pckagent" documents:
//! filer metadata plus per-person monthly tax line items) into flattened,
//! human-readable text reports grouped by person and by month.
//!
//! ## Core Concepts
//!
//! - **Agent Package**: the root document with filer info and an ordered list of person records
//! - **Sections**: per-person arrays of month entries (e.g. "tar4", "tar14"), kept in document order
//! - **Code Tables**: nested lists of coded line items inside a month entry (e.g. "tar4sum")
//! - **Label Mapping**: the configurable table binding report labels like "K201" to a section,
//!   an optional code and a value field, evaluated in order for every month
//! - **Report**: one text file written next to each input, same name with a "txt" extension
//!
//! ## Example
//!
//! ```rust,ignore
//! use tax_agent_report::*;
//! use std::path::Path;
//!
//! let renderer = ReportRenderer::new(ReportMapping::default());
//! let output = convert_file(Path::new("pck001.json"), &renderer)?;
//! println!("Готово: {}", output.display());
//! ```

pub mod convert;
pub mod error;
pub mod mapping;
pub mod report;
pub mod schema;
pub mod value;

pub use convert::{convert_file, load_document, output_path};
pub use error::{ReportError, Result};
pub use mapping::{LabelRule, ReportMapping};
pub use report::{month_name, ReportRenderer, MONTH_NAMES};
pub use schema::*;
pub use value::*;

/// Renders one parsed document with the default label mapping.
pub fn render_report(document: &serde_json::Value) -> String {
    let package = AgentPackage::from_document(document);
    ReportRenderer::new(ReportMapping::default()).render(&package)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_end_to_end_rendering() {
        let document = json!({
            "pckagent": {
                "pckagentinfo": {
                    "dcreate": "15.02.2024",
                    "ngod": 2023,
                    "vexec": "Смирнова А.П.",
                    "vunp": "100500",
                    "vphn": "+375 17 200-00-00"
                },
                "docagent": [
                    {
                        "docagentinfo": {
                            "vfam": "Петров",
                            "vname": "Пётр",
                            "votch": "Петрович",
                            "cvdoc": "01",
                            "cln": "3210987",
                            "cstranf": "112",
                            "nrate": 13
                        },
                        "ntsumincome": 2400.00,
                        "ntsumcalcincome": "312.00",
                        "tar4": [
                            {"nmonth": 1, "tar4sum": [{"ncode": 201, "nsum": 1200.00}]},
                            {"nmonth": 2, "tar4sum": [{"ncode": 201, "nsum": 1200.00}]}
                        ],
                        "tar14": [
                            {"nmonth": 2, "nsumt": 156.00}
                        ]
                    },
                    {
                        "docagentinfo": {"vfam": "Сидорова", "vname": "Анна"},
                        "tar7": [
                            {"nmonth": 12, "tar7sum": [{"ncode": 620, "nsumv": 55.5}]}
                        ]
                    }
                ]
            }
        });

        let report = render_report(&document);

        assert!(report.starts_with("Дата создания: 15.02.2024\nГод: 2023\n"));
        assert!(report.contains("Петров Пётр Петрович | Док: 01 | ЛН: 3210987 | Страна: 112 | ТС: 13%"));
        assert!(report.contains("ntsumincome: 2400 | ntsumcalcincome: 312"));
        assert!(report.contains("Январь: K201=1200\n"));
        assert!(report.contains("Февраль: K201=1200, PN=156\n"));
        assert!(report.contains("Сидорова Анна | Док: "));
        assert!(report.contains("Декабрь: K620=55.5\n"));
        assert!(report.ends_with("\n"));
    }

    #[test]
    fn test_render_report_on_empty_document() {
        let report = render_report(&json!({}));
        assert_eq!(report.lines().count(), 5);
        assert!(report.ends_with("Телефон: \n"));
    }
}
