use serde_json::Value;

/// Genesis to genesis, Song of Solomon to songofsolomon.
///
/// Only the space character is removed, so "1 John" becomes "1john" but
/// punctuation is kept as it is.
pub fn book_file_stem(book_name: &str) -> String {
    book_name.to_lowercase().replace(' ', "")
}

pub fn book_file_name(book_name: &str) -> String {
    format!("{}.json", book_file_stem(book_name))
}

/// Name of the JSON type, for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

pub fn format_size(size: u64) -> String {
    if size < 1024 {
        format!("{} B", size)
    } else if size < 1024 * 1024 {
        format!("{:.1} KB", size as f64 / 1024.0)
    } else {
        format!("{:.1} MB", size as f64 / (1024.0 * 1024.0))
    }
}
