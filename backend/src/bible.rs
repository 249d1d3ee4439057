use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::assembler::check_book_order;
use crate::logger;
use crate::types::{BookDocument, JsonStyle, Result, VersebookError};
use crate::writer::{ensure_directory_exists, write_json, INDEX_FILE_NAME};

#[derive(Debug, Clone)]
pub struct AssembleConfig {
    pub books_dir: PathBuf,
    pub output_file: PathBuf,
    pub style: JsonStyle,
}

/// Absolute form of `path` with `.` and `..` resolved. The file itself may not
/// exist yet, in which case its parent directory is resolved instead.
fn resolved_path(path: &Path) -> Option<PathBuf> {
    if let Ok(p) = fs::canonicalize(path) {
        return Some(p);
    }

    let file_name = path.file_name()?;
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    fs::canonicalize(parent).ok().map(|p| p.join(file_name))
}

/// Book files directly under `books_dir` as (stem, path), sorted by file name.
///
/// `index.json`, chapter subfolders and `skip` itself are left out.
pub fn list_book_files(books_dir: &Path, skip: Option<&Path>) -> Result<Vec<(String, PathBuf)>> {
    let skip = skip.and_then(resolved_path);
    let mut files = Vec::new();

    for entry in WalkDir::new(books_dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(books_dir).to_path_buf();
            VersebookError::io(path, io::Error::from(e))
        })?;

        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|e| e.to_str()) != Some("json")
            || entry.file_name() == INDEX_FILE_NAME
        {
            continue;
        }

        if skip.is_some() && fs::canonicalize(path).ok() == skip {
            continue;
        }

        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            files.push((stem.to_string(), path.to_path_buf()));
        }
    }

    Ok(files)
}

/// Read one book file, checking its shape and the chapter and verse order.
pub fn read_book_document(path: &Path) -> Result<BookDocument> {
    let bytes = fs::read(path)
        .map_err(|e| VersebookError::io(path, e))?;

    let value: serde_json::Value = serde_json::from_slice(&bytes)
        .map_err(|source| VersebookError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let book: BookDocument = serde_json::from_value(value)
        .map_err(|e| VersebookError::Schema {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    check_book_order(&book)
        .map_err(|reason| VersebookError::Schema {
            path: path.to_path_buf(),
            reason,
        })?;

    Ok(book)
}

/// Merge the book files of a directory into one document keyed by file stem.
/// Returns the number of books.
pub fn run_assemble(config: &AssembleConfig) -> Result<usize> {
    logger::info("=== run_assemble() ===");

    let files = list_book_files(&config.books_dir, Some(config.output_file.as_path()))?;

    let mut bible: BTreeMap<String, BookDocument> = BTreeMap::new();
    for (stem, path) in files {
        logger::debug(&format!("Reading {}", path.display()));
        let book = read_book_document(&path)?;
        bible.insert(stem, book);
    }

    if let Some(parent) = config.output_file.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory_exists(parent)?;
        }
    }

    write_json(&config.output_file, &bible, config.style)?;

    logger::info(&format!(
        "Assembled {} books into {}",
        bible.len(),
        config.output_file.display()
    ));

    Ok(bible.len())
}
