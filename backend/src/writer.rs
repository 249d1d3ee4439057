use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::helpers::{book_file_name, book_file_stem, format_size};
use crate::logger;
use crate::types::{BookDocument, BookIndex, JsonStyle, Result, VersebookError};

pub const INDEX_FILE_NAME: &str = "index.json";
const INDEX_FILE_STEM: &str = "index";

/// Target of one book file, decided before anything is written.
#[derive(Debug)]
pub struct PlannedBook<'a> {
    pub stem: String,
    pub path: PathBuf,
    pub book: &'a BookDocument,
}

/// Map each book to its output path.
///
/// Fails if two books normalize to the same file name, or if a book would
/// overwrite the index file.
pub fn plan_book_files<'a>(
    output_dir: &Path,
    books: &'a [BookDocument],
    write_index: bool,
) -> Result<Vec<PlannedBook<'a>>> {
    let mut owners: HashMap<String, &str> = HashMap::new();
    let mut planned = Vec::with_capacity(books.len());

    for book in books {
        let stem = book_file_stem(&book.name);

        if write_index && stem == INDEX_FILE_STEM {
            return Err(VersebookError::FilenameCollision {
                file_name: INDEX_FILE_NAME.to_string(),
                first: book.name.clone(),
                second: "book index".to_string(),
            });
        }

        if let Some(first) = owners.get(&stem) {
            return Err(VersebookError::FilenameCollision {
                file_name: book_file_name(&book.name),
                first: first.to_string(),
                second: book.name.clone(),
            });
        }
        owners.insert(stem.clone(), &book.name);

        planned.push(PlannedBook {
            path: output_dir.join(book_file_name(&book.name)),
            stem,
            book,
        });
    }

    Ok(planned)
}

pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.is_dir() {
        fs::create_dir_all(path)
            .map_err(|e| VersebookError::io(path, e))?;
    }
    Ok(())
}

pub fn to_json_string<T: Serialize>(value: &T, style: JsonStyle) -> serde_json::Result<String> {
    match style {
        JsonStyle::Pretty => serde_json::to_string_pretty(value),
        JsonStyle::Compact => serde_json::to_string(value),
    }
}

/// Serialize `value` to `path`, overwriting it. Returns the number of bytes written.
pub fn write_json<T: Serialize>(path: &Path, value: &T, style: JsonStyle) -> Result<u64> {
    let content = to_json_string(value, style)
        .map_err(|e| VersebookError::io(path, io::Error::other(e)))?;

    fs::write(path, content.as_bytes())
        .map_err(|e| VersebookError::io(path, e))?;

    Ok(content.len() as u64)
}

pub fn write_book(path: &Path, book: &BookDocument, style: JsonStyle) -> Result<u64> {
    let size = write_json(path, book, style)?;
    logger::debug(&format!(
        "Wrote {} ({}, {} chapters, {} verses)",
        path.display(),
        format_size(size),
        book.chapters.len(),
        book.verse_count()
    ));
    Ok(size)
}

/// Write each chapter to `<output_dir>/<stem>/<chapter>.json`. Returns the number of files.
pub fn write_chapter_files(output_dir: &Path, stem: &str, book: &BookDocument) -> Result<usize> {
    let chapters_dir = output_dir.join(stem);
    ensure_directory_exists(&chapters_dir)?;

    for chapter in &book.chapters {
        let path = chapters_dir.join(format!("{}.json", chapter.chapter));
        write_json(&path, chapter, JsonStyle::Compact)?;
    }

    Ok(book.chapters.len())
}

pub fn write_index(output_dir: &Path, index: &BookIndex) -> Result<PathBuf> {
    let path = output_dir.join(INDEX_FILE_NAME);
    write_json(&path, index, JsonStyle::Pretty)?;
    Ok(path)
}
