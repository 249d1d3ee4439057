use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tempfile::TempDir;

use versebook_backend::SplitConfig;

pub fn verse(book: &str, chapter: u32, verse: u32, text: &str) -> Value {
    json!({ "book_name": book, "chapter": chapter, "verse": verse, "text": text })
}

/// Write `{"verses": [...]}` to input.json in a new temp dir, with output going to `<tmp>/books`.
pub fn split_setup(verses: Vec<Value>) -> (TempDir, SplitConfig) {
    split_setup_raw(&json!({ "verses": verses }).to_string())
}

pub fn split_setup_raw(content: &str) -> (TempDir, SplitConfig) {
    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    let input = tmp.path().join("input.json");
    fs::write(&input, content).expect("Failed to write input");
    let config = SplitConfig::new(input, tmp.path().join("books"));
    (tmp, config)
}

#[allow(dead_code)]
pub fn read_json(path: &Path) -> Value {
    let content = fs::read_to_string(path).expect("Failed to read output");
    serde_json::from_str(&content).expect("Output is not valid JSON")
}

/// File names in `dir`, sorted. Empty if `dir` doesn't exist.
#[allow(dead_code)]
pub fn list_files(dir: &Path) -> Vec<String> {
    if !dir.exists() {
        return Vec::new();
    }
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to read dir")
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

#[allow(dead_code)]
pub fn sample_verses() -> Vec<Value> {
    vec![
        verse("Genesis", 1, 2, "And the earth was without form, and void"),
        verse("Genesis", 1, 1, "In the beginning God created the heaven and the earth."),
        verse("Song of Solomon", 1, 1, "The song of songs, which is Solomon's."),
        verse("Genesis", 10, 1, "Now these are the generations of the sons of Noah"),
        verse("Genesis", 2, 1, "Thus the heavens and the earth were finished"),
        verse("Genesis", 9, 1, "And God blessed Noah and his sons"),
        verse("1 John", 1, 1, "That which was from the beginning"),
        verse("Song of Solomon", 2, 1, "I am the rose of Sharon"),
    ]
}

#[allow(dead_code)]
pub fn books_dir(tmp: &TempDir) -> PathBuf {
    tmp.path().join("books")
}
