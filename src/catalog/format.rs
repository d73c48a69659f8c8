//! Display formatting for attribute names and values: underscores become
//! spaces, booleans become Yes/No, words get capitalized.

use serde_json::Value;

/// Uppercase the first letter, leave the rest alone.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Uppercase the first letter of every word, lowercase the rest.
pub fn capitalize_words(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn boolean_label(s: &str) -> Option<&'static str> {
    match s {
        "true" | "True" | "1" => Some("Yes"),
        "false" | "False" | "0" => Some("No"),
        _ => None,
    }
}

/// Format a raw string value: boolean-ish strings become Yes/No,
/// everything else gets underscores replaced and is capitalized.
pub fn format_text(s: &str) -> String {
    if let Some(label) = boolean_label(s) {
        return label.to_string();
    }
    capitalize(&s.replace('_', " "))
}

/// Format an arbitrary attribute value for display.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        Value::String(s) => format_text(s),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Format an attribute/relation field name for display.
pub fn format_field_name(field: &str) -> String {
    capitalize_words(&field.replace('_', " "))
}
