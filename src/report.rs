use serde_json::Value;

use crate::mapping::{LabelRule, ReportMapping};
use crate::schema::{AgentPackage, MonthEntry, PackageInfo, PersonRecord};
use crate::value;

/// Capitalized Russian month names, independent of the host locale.
pub const MONTH_NAMES: [&str; 12] = [
    "Январь",
    "Февраль",
    "Март",
    "Апрель",
    "Май",
    "Июнь",
    "Июль",
    "Август",
    "Сентябрь",
    "Октябрь",
    "Ноябрь",
    "Декабрь",
];

/// Name for a 1-based month number, with a "Месяц{n}" placeholder outside
/// 1..=12.
pub fn month_name(month: u32) -> String {
    match month {
        1..=12 => MONTH_NAMES[(month - 1) as usize].to_string(),
        other => format!("Месяц{other}"),
    }
}

/// Renders agent packages as text reports, driven by a label mapping.
pub struct ReportRenderer {
    mapping: ReportMapping,
}

impl ReportRenderer {
    pub fn new(mapping: ReportMapping) -> Self {
        Self { mapping }
    }

    /// Produces the full report: the header block followed by one block per
    /// person, each ending in a single blank separator line.
    pub fn render(&self, package: &AgentPackage) -> String {
        let mut lines = header_lines(&package.info);
        for person in &package.persons {
            self.person_lines(person, &mut lines);
        }
        lines.join("\n")
    }

    fn person_lines(&self, person: &PersonRecord, lines: &mut Vec<String>) {
        lines.push(identity_line(person));
        if let Some(line) = aggregate_line(person) {
            lines.push(line);
        }
        for month in 1..=12 {
            if let Some(line) = self.month_line(person, month) {
                lines.push(line);
            }
        }
        lines.push(String::new());
    }

    /// One month's "label=value" pairs in mapping order, or None when no
    /// label yields a nonzero value.
    fn month_line(&self, person: &PersonRecord, month: u32) -> Option<String> {
        let mut parts = Vec::new();
        for rule in &self.mapping.rules {
            let entry = person
                .section(&rule.section)
                .iter()
                .find(|e| e.month == month);
            let value = apply_multiplier(entry.and_then(|e| lookup(e, rule)).cloned(), rule);
            let formatted = value::format_value(value.as_ref());
            if value::is_nonzero(&formatted) {
                parts.push(format!("{}={}", rule.label, formatted));
            }
        }
        if parts.is_empty() {
            None
        } else {
            Some(format!("{}: {}", month_name(month), parts.join(", ")))
        }
    }
}

fn lookup<'a>(entry: &'a MonthEntry, rule: &LabelRule) -> Option<&'a Value> {
    match rule.code {
        Some(code) => entry.code_value(code as f64, &rule.field),
        None => entry.scalar(&rule.field),
    }
}

/// Multiplies a found value when the rule carries a multiplier. A value that
/// has no numeric reading is kept as found.
fn apply_multiplier(value: Option<Value>, rule: &LabelRule) -> Option<Value> {
    let found = value?;
    let Some(multiplier) = rule.multiplier else {
        return Some(found);
    };
    match value::as_f64(&found) {
        Some(f) => Some(Value::from(f * multiplier)),
        None => Some(found),
    }
}

fn header_lines(info: &PackageInfo) -> Vec<String> {
    vec![
        format!("Дата создания: {}", info.created),
        format!("Год: {}", info.year),
        format!("Исполнитель: {}", info.executor),
        format!("УНП: {}", info.tax_id),
        format!("Телефон: {}", info.phone),
        String::new(),
    ]
}

fn identity_line(person: &PersonRecord) -> String {
    format!(
        "{} | Док: {} | ЛН: {} | Страна: {} | ТС: {}%",
        person.full_name(),
        person.doc_kind,
        person.personal_number,
        person.country,
        person.rate
    )
}

/// Nonzero aggregate sums joined with " | ", or None so the caller can skip
/// the line entirely.
fn aggregate_line(person: &PersonRecord) -> Option<String> {
    let mut parts = Vec::new();
    for (name, value) in person.sums.labeled() {
        let formatted = value::format_value(value);
        if value::is_nonzero(&formatted) {
            parts.push(format!("{name}: {formatted}"));
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" | "))
    }
}
