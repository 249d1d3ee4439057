use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::helpers::json_type_name;
use crate::logger;
use crate::types::{Result, VersebookError};

/// Top-level field holding the list of verse records.
pub const VERSES_FIELD: &str = "verses";

/// Read and parse the whole input document.
pub fn load_document(path: &Path) -> Result<Value> {
    let bytes = fs::read(path)
        .map_err(|e| VersebookError::io(path, e))?;

    serde_json::from_slice(&bytes)
        .map_err(|source| VersebookError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Take the verse list out of a parsed document. Other top-level fields are ignored.
pub fn take_verse_entries(doc: Value, path: &Path) -> Result<Vec<Value>> {
    let schema_error = |reason: String| VersebookError::Schema {
        path: path.to_path_buf(),
        reason,
    };

    let mut obj = match doc {
        Value::Object(obj) => obj,
        other => {
            return Err(schema_error(format!(
                "expected a top-level object, found {}",
                json_type_name(&other)
            )));
        }
    };

    match obj.remove(VERSES_FIELD) {
        Some(Value::Array(entries)) => Ok(entries),
        Some(other) => Err(schema_error(format!(
            "the '{}' field must be a list, found {}",
            VERSES_FIELD,
            json_type_name(&other)
        ))),
        None => Err(schema_error(format!("missing the '{}' field", VERSES_FIELD))),
    }
}

pub fn load_verse_entries(path: &Path) -> Result<Vec<Value>> {
    let doc = load_document(path)?;
    let entries = take_verse_entries(doc, path)?;
    logger::info(&format!("Loaded {} verse entries from {}", entries.len(), path.display()));
    Ok(entries)
}
