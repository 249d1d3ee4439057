use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};

use crate::helpers::json_type_name;
use crate::logger;
use crate::types::{DuplicatePolicy, DuplicateVerse, Result, SimplifiedVerse, VerseRecord, VersebookError};

/// Verses of one book, bucketed by chapter number. Verse order inside a
/// bucket is input order, chapter order is not defined.
#[derive(Debug, Clone)]
pub struct GroupedBook {
    pub name: String,
    pub chapters: HashMap<u32, Vec<SimplifiedVerse>>,
}

#[derive(Debug, Clone)]
pub struct GroupedVerses {
    /// Books in order of first appearance in the input.
    pub books: Vec<GroupedBook>,
    pub verse_count: usize,
    pub duplicates: Vec<DuplicateVerse>,
}

fn field_error(index: usize, field: &'static str, reason: impl Into<String>) -> VersebookError {
    VersebookError::Field {
        index,
        field,
        reason: reason.into(),
    }
}

fn required<'a>(obj: &'a Map<String, Value>, index: usize, field: &'static str) -> Result<&'a Value> {
    obj.get(field)
        .ok_or_else(|| field_error(index, field, "missing required field"))
}

fn required_string(obj: &Map<String, Value>, index: usize, field: &'static str) -> Result<String> {
    match required(obj, index, field)? {
        Value::String(s) => Ok(s.clone()),
        other => Err(field_error(index, field, format!("expected a string, found {}", json_type_name(other)))),
    }
}

/// Chapter and verse numbers are positive integers. A string holding an
/// integer, e.g. "10", is converted here so nothing downstream sorts it as text.
fn required_number(obj: &Map<String, Value>, index: usize, field: &'static str) -> Result<u32> {
    let value = required(obj, index, field)?;
    let n = match value {
        Value::Number(n) => n.as_u64()
            .ok_or_else(|| field_error(index, field, format!("expected a positive integer, found {}", n)))?,
        Value::String(s) => s.trim().parse::<u64>()
            .map_err(|_| field_error(index, field, format!("expected a positive integer, found \"{}\"", s)))?,
        other => {
            return Err(field_error(index, field, format!("expected an integer, found {}", json_type_name(other))));
        }
    };

    if n == 0 {
        return Err(field_error(index, field, "must be a positive integer, found 0"));
    }

    u32::try_from(n)
        .map_err(|_| field_error(index, field, format!("{} is out of range", n)))
}

/// Validate one entry of the `verses` list. `index` is its zero-based position.
pub fn parse_verse_record(index: usize, entry: &Value) -> Result<VerseRecord> {
    let obj = entry.as_object()
        .ok_or_else(|| field_error(index, "record", format!("expected an object, found {}", json_type_name(entry))))?;

    let book_name = required_string(obj, index, "book_name")?;
    if book_name.trim().is_empty() {
        return Err(field_error(index, "book_name", "must contain a non-space character"));
    }

    let chapter = required_number(obj, index, "chapter")?;
    let verse = required_number(obj, index, "verse")?;
    let text = required_string(obj, index, "text")?;

    Ok(VerseRecord {
        book_name,
        chapter,
        verse,
        text,
    })
}

/// Bucket all entries by book and chapter.
///
/// Every entry is validated before anything is returned, so a malformed
/// record anywhere in the input fails the whole run.
pub fn group_verses(entries: &[Value], policy: DuplicatePolicy) -> Result<GroupedVerses> {
    let mut books: Vec<GroupedBook> = Vec::new();
    let mut book_positions: HashMap<String, usize> = HashMap::new();
    let mut seen: HashSet<(usize, u32, u32)> = HashSet::new();
    let mut duplicates: Vec<DuplicateVerse> = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        let record = parse_verse_record(index, entry)?;

        let pos = match book_positions.get(&record.book_name) {
            Some(&pos) => pos,
            None => {
                books.push(GroupedBook {
                    name: record.book_name.clone(),
                    chapters: HashMap::new(),
                });
                book_positions.insert(record.book_name.clone(), books.len() - 1);
                books.len() - 1
            }
        };

        if !seen.insert((pos, record.chapter, record.verse)) {
            match policy {
                DuplicatePolicy::Reject => {
                    return Err(field_error(index, "verse", format!(
                        "duplicate of {} {}:{}",
                        record.book_name, record.chapter, record.verse
                    )));
                }
                DuplicatePolicy::Keep => {
                    logger::warn(&format!(
                        "Duplicate verse {} {}:{} at position {}, keeping both",
                        record.book_name, record.chapter, record.verse, index
                    ));
                    duplicates.push(DuplicateVerse {
                        index,
                        book_name: record.book_name.clone(),
                        chapter: record.chapter,
                        verse: record.verse,
                    });
                }
            }
        }

        books[pos].chapters
            .entry(record.chapter)
            .or_default()
            .push(record.simplified());
    }

    logger::debug(&format!("Grouped {} verses into {} books", entries.len(), books.len()));

    Ok(GroupedVerses {
        books,
        verse_count: entries.len(),
        duplicates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn verse(book: &str, chapter: u32, verse: u32, text: &str) -> Value {
        json!({ "book_name": book, "chapter": chapter, "verse": verse, "text": text })
    }

    #[test]
    fn test_parse_verse_record_ignores_extra_fields() {
        let entry = json!({
            "book_name": "Genesis", "book": 1, "chapter": 1, "verse": 1,
            "text": "In the beginning [H7225]", "strongs": ["H7225"]
        });
        let record = parse_verse_record(0, &entry).unwrap();
        assert_eq!(record, VerseRecord {
            book_name: "Genesis".to_string(),
            chapter: 1,
            verse: 1,
            text: "In the beginning [H7225]".to_string(),
        });
    }

    #[test]
    fn test_parse_verse_record_numeric_strings() {
        let entry = json!({ "book_name": "Psalms", "chapter": "119", "verse": " 10", "text": "x" });
        let record = parse_verse_record(3, &entry).unwrap();
        assert_eq!(record.chapter, 119);
        assert_eq!(record.verse, 10);
    }

    #[test]
    fn test_parse_verse_record_missing_chapter() {
        let entry = json!({ "book_name": "Genesis", "verse": 1, "text": "x" });
        match parse_verse_record(7, &entry).unwrap_err() {
            VersebookError::Field { index, field, reason } => {
                assert_eq!(index, 7);
                assert_eq!(field, "chapter");
                assert_eq!(reason, "missing required field");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_verse_record_rejects_bad_values() {
        let cases = [
            (json!({ "book_name": "", "chapter": 1, "verse": 1, "text": "x" }), "book_name"),
            (json!({ "book_name": 5, "chapter": 1, "verse": 1, "text": "x" }), "book_name"),
            (json!({ "book_name": "Ruth", "chapter": 0, "verse": 1, "text": "x" }), "chapter"),
            (json!({ "book_name": "Ruth", "chapter": -1, "verse": 1, "text": "x" }), "chapter"),
            (json!({ "book_name": "Ruth", "chapter": 1.5, "verse": 1, "text": "x" }), "chapter"),
            (json!({ "book_name": "Ruth", "chapter": 1, "verse": "two", "text": "x" }), "verse"),
            (json!({ "book_name": "Ruth", "chapter": 1, "verse": 1, "text": null }), "text"),
            (json!("Ruth 1:1"), "record"),
        ];

        for (entry, expected_field) in cases {
            match parse_verse_record(0, &entry) {
                Err(VersebookError::Field { field, .. }) => assert_eq!(field, expected_field, "{}", entry),
                other => panic!("expected field error for {}, got {:?}", entry, other),
            }
        }
    }

    #[test]
    fn test_parse_verse_record_blank_book_name() {
        let entry = json!({ "book_name": "   ", "chapter": 1, "verse": 1, "text": "x" });
        assert_eq!(
            parse_verse_record(4, &entry).unwrap_err().to_string(),
            "Invalid verse record at position 4, field 'book_name': must contain a non-space character"
        );
    }

    #[test]
    fn test_group_verses_by_book_and_chapter() {
        let entries = vec![
            verse("Genesis", 1, 2, "B"),
            verse("Exodus", 1, 1, "E"),
            verse("Genesis", 1, 1, "A"),
            verse("Genesis", 2, 1, "C"),
        ];
        let grouped = group_verses(&entries, DuplicatePolicy::Keep).unwrap();

        assert_eq!(grouped.verse_count, 4);
        assert!(grouped.duplicates.is_empty());

        let names: Vec<&str> = grouped.books.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Genesis", "Exodus"]);

        let genesis = &grouped.books[0];
        assert_eq!(genesis.chapters.len(), 2);
        let ch1: Vec<u32> = genesis.chapters[&1].iter().map(|v| v.verse).collect();
        assert_eq!(ch1, vec![2, 1]);
    }

    #[test]
    fn test_group_verses_keeps_duplicates() {
        let entries = vec![
            verse("Ruth", 1, 1, "first"),
            verse("Ruth", 1, 1, "second"),
        ];
        let grouped = group_verses(&entries, DuplicatePolicy::Keep).unwrap();

        assert_eq!(grouped.duplicates, vec![DuplicateVerse {
            index: 1,
            book_name: "Ruth".to_string(),
            chapter: 1,
            verse: 1,
        }]);
        let texts: Vec<&str> = grouped.books[0].chapters[&1].iter().map(|v| v.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn test_group_verses_rejects_duplicates() {
        let entries = vec![
            verse("Ruth", 1, 1, "first"),
            verse("Ruth", 2, 1, "other"),
            verse("Ruth", 1, 1, "second"),
        ];
        match group_verses(&entries, DuplicatePolicy::Reject).unwrap_err() {
            VersebookError::Field { index, field, .. } => {
                assert_eq!(index, 2);
                assert_eq!(field, "verse");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_group_verses_same_verse_in_different_books_is_not_duplicate() {
        let entries = vec![
            verse("Ruth", 1, 1, "a"),
            verse("Jonah", 1, 1, "b"),
        ];
        let grouped = group_verses(&entries, DuplicatePolicy::Reject).unwrap();
        assert_eq!(grouped.books.len(), 2);
    }

    #[test]
    fn test_group_verses_error_position() {
        let entries = vec![
            verse("Ruth", 1, 1, "a"),
            json!({ "book_name": "Ruth", "verse": 2, "text": "b" }),
        ];
        let err = group_verses(&entries, DuplicatePolicy::Keep).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid verse record at position 1, field 'chapter': missing required field"
        );
    }
}
