//! Scalar cell rendering and comparison rules shared by every column.

use std::cmp::Ordering;

use serde_json::Value;

/// Placeholder rendered for missing values.
pub const MISSING_PLACEHOLDER: &str = "-";

/// Render a single cell value for display.
///
/// Null becomes a placeholder, booleans a yes/no word, numbers get their
/// integer digits grouped in thousands, and anything else falls back to
/// string coercion.
pub fn format_cell(value: &Value) -> String {
    match value {
        Value::Null => MISSING_PLACEHOLDER.to_string(),
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        Value::Number(number) => number
            .as_f64()
            .map(group_digits)
            .unwrap_or_else(|| number.to_string()),
        Value::String(text) => text.clone(),
        nested => serde_json::to_string(nested).unwrap_or_default(),
    }
}

/// Compare two cell values: numbers arithmetically, everything else by
/// case-insensitive string coercion. Callers handle missing values; this
/// function only sees present ones.
pub fn compare_cells(a: &Value, b: &Value) -> Ordering {
    if let (Value::Number(left), Value::Number(right)) = (a, b) {
        let left = left.as_f64().unwrap_or(f64::NAN);
        let right = right.as_f64().unwrap_or(f64::NAN);
        return left.partial_cmp(&right).unwrap_or(Ordering::Equal);
    }
    coerce_text(a)
        .to_lowercase()
        .cmp(&coerce_text(b).to_lowercase())
}

/// Lossy string coercion used by search and non-numeric comparison.
/// Null coerces to the empty string so it never matches a search term.
pub fn coerce_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        nested => serde_json::to_string(nested).unwrap_or_default(),
    }
}

fn group_digits(value: f64) -> String {
    let text = if value.fract() == 0.0 && value.abs() < 9e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    };
    let (mantissa, fraction) = match text.split_once('.') {
        Some((whole, frac)) => (whole.to_string(), Some(frac.to_string())),
        None => (text, None),
    };
    let (sign, digits) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa.as_str()),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (offset, ch) in digits.chars().enumerate() {
        if offset > 0 && (digits.len() - offset) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    match fraction {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}
