use serde_json::Value;

/// Renders a scalar as it should appear after a fixed label: strings as-is,
/// numbers via their JSON representation, anything else as an empty string.
pub fn display_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Normalizes a value for report output.
///
/// Integers keep their plain decimal form. Floats and strings that parse as
/// numbers are rendered with at most two decimal places and trailing zeros
/// stripped, so 12.50 becomes "12.5" and 12.00 becomes "12". Non-numeric
/// strings pass through unchanged. Absent values, nulls, empty strings and
/// non-scalar shapes all render as an empty string, which callers use to
/// exclude the field.
pub fn format_value(value: Option<&Value>) -> String {
    let Some(value) = value else {
        return String::new();
    };
    match value {
        Value::Number(n) if n.is_f64() => format_f64(n.as_f64().unwrap_or(0.0)),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.is_empty() => String::new(),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(f) => format_f64(f),
            Err(_) => s.clone(),
        },
        _ => String::new(),
    }
}

fn format_f64(f: f64) -> String {
    format!("{f:.2}")
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Inclusion test for formatted output: empty and zero-valued strings are
/// dropped, strings that do not look numeric at all are kept.
pub fn is_nonzero(formatted: &str) -> bool {
    if formatted.is_empty() {
        return false;
    }
    match formatted.parse::<f64>() {
        Ok(f) => f != 0.0,
        Err(_) => true,
    }
}

/// Lenient numeric view of a scalar: numbers directly, strings via parsing.
pub fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integers_keep_plain_form() {
        assert_eq!(format_value(Some(&json!(100))), "100");
        assert_eq!(format_value(Some(&json!(-7))), "-7");
        assert_eq!(format_value(Some(&json!(0))), "0");
    }

    #[test]
    fn test_floats_trimmed_to_significant_decimals() {
        assert_eq!(format_value(Some(&json!(12.50))), "12.5");
        assert_eq!(format_value(Some(&json!(12.00))), "12");
        assert_eq!(format_value(Some(&json!(0.5))), "0.5");
        assert_eq!(format_value(Some(&json!(1234.56))), "1234.56");
    }

    #[test]
    fn test_numeric_strings_normalized() {
        assert_eq!(format_value(Some(&json!("100.00"))), "100");
        assert_eq!(format_value(Some(&json!("12.50"))), "12.5");
        assert_eq!(format_value(Some(&json!(" 7 "))), "7");
    }

    #[test]
    fn test_non_numeric_strings_pass_through() {
        assert_eq!(format_value(Some(&json!("н/д"))), "н/д");
        assert_eq!(format_value(Some(&json!("12,5"))), "12,5");
    }

    #[test]
    fn test_absent_and_non_scalar_render_empty() {
        assert_eq!(format_value(None), "");
        assert_eq!(format_value(Some(&Value::Null)), "");
        assert_eq!(format_value(Some(&json!(""))), "");
        assert_eq!(format_value(Some(&json!(true))), "");
        assert_eq!(format_value(Some(&json!([1, 2]))), "");
        assert_eq!(format_value(Some(&json!({"a": 1}))), "");
    }

    #[test]
    fn test_formatting_is_idempotent() {
        for s in ["12.5", "12", "0.07", "-3.2"] {
            let once = format_value(Some(&json!(s)));
            let twice = format_value(Some(&json!(once)));
            assert_eq!(once, twice, "formatting {s} twice changed the result");
        }
    }

    #[test]
    fn test_nonzero_check() {
        assert!(!is_nonzero(""));
        assert!(!is_nonzero("0"));
        assert!(!is_nonzero("-0"));
        assert!(is_nonzero("0.01"));
        assert!(is_nonzero("12.5"));
        assert!(is_nonzero("н/д"));
    }

    #[test]
    fn test_zero_variants_format_to_excluded_values() {
        for v in [json!(0), json!(0.0), json!("0"), json!("0.00")] {
            let formatted = format_value(Some(&v));
            assert!(!is_nonzero(&formatted), "{v} should be excluded");
        }
    }

    #[test]
    fn test_lenient_numeric_view() {
        assert_eq!(as_f64(&json!(13)), Some(13.0));
        assert_eq!(as_f64(&json!("13.5")), Some(13.5));
        assert_eq!(as_f64(&json!(" 2 ")), Some(2.0));
        assert_eq!(as_f64(&json!("кот")), None);
        assert_eq!(as_f64(&json!(null)), None);
    }

    #[test]
    fn test_display_string() {
        assert_eq!(display_string(Some(&json!("Иванов"))), "Иванов");
        assert_eq!(display_string(Some(&json!(2024))), "2024");
        assert_eq!(display_string(Some(&json!(null))), "");
        assert_eq!(display_string(None), "");
    }
}
