use std::collections::BTreeMap;
use std::path::PathBuf;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// One entry of the input `verses` list, validated and with numeric chapter and verse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseRecord {
    pub book_name: String,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
}

impl VerseRecord {
    /// Drop the book and chapter, which are implied by the grouping.
    pub fn simplified(&self) -> SimplifiedVerse {
        SimplifiedVerse {
            verse: self.verse,
            text: self.text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifiedVerse {
    pub verse: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterEntry {
    pub chapter: u32,
    pub verses: Vec<SimplifiedVerse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDocument {
    pub name: String,
    pub chapters: Vec<ChapterEntry>,
}

impl BookDocument {
    pub fn verse_count(&self) -> usize {
        self.chapters.iter().map(|c| c.verses.len()).sum()
    }
}

/// A record whose (book, chapter, verse) was already seen earlier in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateVerse {
    pub index: usize,
    pub book_name: String,
    pub chapter: u32,
    pub verse: u32,
}

/// Entry of `index.json`, keyed by file stem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookIndexEntry {
    pub name: String,
    pub chapter_count: usize,
    pub size: u64,
}

pub type BookIndex = BTreeMap<String, BookIndexEntry>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JsonStyle {
    #[default]
    #[serde(rename = "pretty")]
    Pretty,
    #[serde(rename = "compact")]
    Compact,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Retain every record in input order and log a warning.
    #[default]
    Keep,
    /// Abort with a field error on the first repeated (book, chapter, verse).
    Reject,
}

#[derive(Error, Debug)]
pub enum VersebookError {
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected document structure in {path}: {reason}")]
    Schema {
        path: PathBuf,
        reason: String,
    },

    #[error("Invalid verse record at position {index}, field '{field}': {reason}")]
    Field {
        index: usize,
        field: &'static str,
        reason: String,
    },

    #[error("Books '{first}' and '{second}' both map to the output file {file_name}")]
    FilenameCollision {
        file_name: String,
        first: String,
        second: String,
    },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl VersebookError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        VersebookError::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, VersebookError>;
