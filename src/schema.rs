use serde_json::{Map, Value};

use crate::value;

/// Root of a parsed filing package: filer metadata plus person records.
#[derive(Debug, Clone, Default)]
pub struct AgentPackage {
    pub info: PackageInfo,
    pub persons: Vec<PersonRecord>,
}

impl AgentPackage {
    /// Builds the typed package from a parsed JSON document.
    ///
    /// Decoding never fails: absent or oddly shaped parts decode to empty
    /// defaults, and list entries that are not objects are skipped.
    pub fn from_document(doc: &Value) -> Self {
        let package = doc.get("pckagent").and_then(Value::as_object);
        let info = package
            .and_then(|p| p.get("pckagentinfo"))
            .map(PackageInfo::from_value)
            .unwrap_or_default();
        let persons = package
            .and_then(|p| p.get("docagent"))
            .and_then(Value::as_array)
            .map(|docs| docs.iter().filter_map(PersonRecord::from_value).collect())
            .unwrap_or_default();
        Self { info, persons }
    }
}

/// Filer metadata shown in the report header. Absent fields are empty strings.
#[derive(Debug, Clone, Default)]
pub struct PackageInfo {
    pub created: String,
    pub year: String,
    pub executor: String,
    pub tax_id: String,
    pub phone: String,
}

impl PackageInfo {
    fn from_value(raw: &Value) -> Self {
        let field = |name: &str| value::display_string(raw.get(name));
        Self {
            created: field("dcreate"),
            year: field("ngod"),
            executor: field("vexec"),
            tax_id: field("vunp"),
            phone: field("vphn"),
        }
    }
}

/// One individual's record: identity, aggregate sums and monthly sections.
#[derive(Debug, Clone, Default)]
pub struct PersonRecord {
    pub surname: String,
    pub first_name: String,
    pub patronymic: String,
    pub doc_kind: String,
    pub personal_number: String,
    pub country: String,
    pub rate: String,
    pub sums: AggregateSums,
    pub sections: Vec<Section>,
}

impl PersonRecord {
    fn from_value(raw: &Value) -> Option<Self> {
        let doc = raw.as_object()?;
        let info = doc.get("docagentinfo");
        let identity = |name: &str| value::display_string(info.and_then(|i| i.get(name)));

        let sections = doc
            .iter()
            .filter_map(|(name, field)| {
                field
                    .as_array()
                    .map(|entries| Section::from_entries(name, entries))
            })
            .collect();

        Some(Self {
            surname: identity("vfam").trim().to_string(),
            first_name: identity("vname").trim().to_string(),
            patronymic: identity("votch").trim().to_string(),
            doc_kind: identity("cvdoc"),
            personal_number: identity("cln"),
            country: identity("cstranf"),
            rate: identity("nrate"),
            sums: AggregateSums::from_person(doc),
            sections,
        })
    }

    /// Surname, first name and patronymic joined by single spaces, with
    /// empty parts dropped.
    pub fn full_name(&self) -> String {
        let parts: Vec<&str> = [&self.surname, &self.first_name, &self.patronymic]
            .into_iter()
            .map(String::as_str)
            .filter(|part| !part.is_empty())
            .collect();
        parts.join(" ")
    }

    /// Month entries of the named section, empty if the section is absent.
    pub fn section(&self, name: &str) -> &[MonthEntry] {
        self.sections
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.entries.as_slice())
            .unwrap_or(&[])
    }
}

/// Per-person aggregate sums. Values keep their raw JSON form and are
/// formatted at render time.
#[derive(Debug, Clone, Default)]
pub struct AggregateSums {
    pub income: Option<Value>,
    pub exemption: Option<Value>,
    pub standard_deduction: Option<Value>,
    pub social_deduction: Option<Value>,
    pub property_deduction: Option<Value>,
    pub calculated_income: Option<Value>,
}

impl AggregateSums {
    fn from_person(doc: &Map<String, Value>) -> Self {
        Self {
            income: doc.get("ntsumincome").cloned(),
            exemption: doc.get("ntsumexemp").cloned(),
            standard_deduction: doc.get("nsumstand").cloned(),
            social_deduction: doc.get("ntsumsoc").cloned(),
            property_deduction: doc.get("ntsumprop").cloned(),
            calculated_income: doc.get("ntsumcalcincome").cloned(),
        }
    }

    /// Sums paired with their source field names, in report order.
    pub fn labeled(&self) -> [(&'static str, Option<&Value>); 6] {
        [
            ("ntsumincome", self.income.as_ref()),
            ("ntsumexemp", self.exemption.as_ref()),
            ("nsumstand", self.standard_deduction.as_ref()),
            ("ntsumsoc", self.social_deduction.as_ref()),
            ("ntsumprop", self.property_deduction.as_ref()),
            ("ntsumcalcincome", self.calculated_income.as_ref()),
        ]
    }
}

/// A named sequence of month entries, e.g. "tar4" or "tar14".
#[derive(Debug, Clone)]
pub struct Section {
    pub name: String,
    pub entries: Vec<MonthEntry>,
}

impl Section {
    fn from_entries(name: &str, entries: &[Value]) -> Self {
        Self {
            name: name.to_string(),
            entries: entries.iter().filter_map(MonthEntry::from_value).collect(),
        }
    }
}

/// One month inside a section: nested code tables plus direct scalar fields.
#[derive(Debug, Clone, Default)]
pub struct MonthEntry {
    pub month: u32,
    pub tables: Vec<CodeTable>,
    pub scalars: Map<String, Value>,
}

impl MonthEntry {
    fn from_value(raw: &Value) -> Option<Self> {
        let obj = raw.as_object()?;
        let month = obj
            .get("nmonth")
            .and_then(value::as_f64)
            .map(|m| m as u32)
            .unwrap_or(0);

        let mut tables = Vec::new();
        let mut scalars = Map::new();
        for (name, field) in obj {
            if name == "nmonth" {
                continue;
            }
            if let Some(table) = CodeTable::from_field(name, field) {
                tables.push(table);
            } else if matches!(field, Value::String(_) | Value::Number(_)) {
                scalars.insert(name.clone(), field.clone());
            }
        }

        Some(Self {
            month,
            tables,
            scalars,
        })
    }

    /// Direct scalar field of this month entry.
    pub fn scalar(&self, field: &str) -> Option<&Value> {
        self.scalars.get(field)
    }

    /// Reads the named field from the first item carrying `code` across this
    /// entry's code tables. Tables and items are searched in document order;
    /// the first code match ends the search even if that item lacks the field.
    pub fn code_value(&self, code: f64, field: &str) -> Option<&Value> {
        for table in &self.tables {
            for item in &table.items {
                if item.code == Some(code) {
                    return item.fields.get(field);
                }
            }
        }
        None
    }
}

/// A nested list of coded line items, e.g. "tar4sum".
#[derive(Debug, Clone)]
pub struct CodeTable {
    pub name: String,
    pub items: Vec<CodeItem>,
}

impl CodeTable {
    /// Classifies an entry field as a code table: an array whose first
    /// element is an object carrying "ncode".
    fn from_field(name: &str, field: &Value) -> Option<Self> {
        let list = field.as_array()?;
        let first = list.first()?.as_object()?;
        if !first.contains_key("ncode") {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            items: list.iter().filter_map(CodeItem::from_value).collect(),
        })
    }
}

/// One coded line item. The code is numeric only, so a string "201" never
/// matches code 201.
#[derive(Debug, Clone)]
pub struct CodeItem {
    pub code: Option<f64>,
    pub fields: Map<String, Value>,
}

impl CodeItem {
    fn from_value(raw: &Value) -> Option<Self> {
        let fields = raw.as_object()?.clone();
        let code = fields.get("ncode").and_then(Value::as_f64);
        Some(Self { code, fields })
    }
}
