use std::path::PathBuf;
use std::time::Instant;

use serde::Serialize;

use crate::assembler::assemble_books;
use crate::grouper::group_verses;
use crate::loader::load_verse_entries;
use crate::logger;
use crate::types::{BookIndex, BookIndexEntry, DuplicatePolicy, DuplicateVerse, JsonStyle, Result};
use crate::writer::{ensure_directory_exists, plan_book_files, write_book, write_chapter_files, write_index};

#[derive(Debug, Clone)]
pub struct SplitConfig {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub style: JsonStyle,
    /// Also write `<stem>/<chapter>.json` for every chapter.
    pub split_chapters: bool,
    pub write_index: bool,
    pub duplicate_policy: DuplicatePolicy,
}

impl SplitConfig {
    pub fn new(input_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        SplitConfig {
            input_path: input_path.into(),
            output_dir: output_dir.into(),
            style: JsonStyle::Pretty,
            split_chapters: false,
            write_index: true,
            duplicate_policy: DuplicatePolicy::Keep,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SplitReport {
    pub output_dir: PathBuf,
    pub books_written: usize,
    pub verses_read: usize,
    pub chapter_files_written: usize,
    pub duplicates: Vec<DuplicateVerse>,
    pub index_path: Option<PathBuf>,
}

impl SplitReport {
    pub fn summary(&self) -> String {
        format!(
            "Successfully split {} books into {}",
            self.books_written,
            self.output_dir.display()
        )
    }
}

/// Split the input verse list into one JSON document per book.
///
/// The input is fully validated, and all output file names are checked for
/// collisions, before the first file is written. A write error stops the run
/// and leaves the files written so far in place.
pub fn run_split(config: &SplitConfig) -> Result<SplitReport> {
    logger::info("=== run_split() ===");
    let start = Instant::now();

    let entries = load_verse_entries(&config.input_path)?;
    let grouped = group_verses(&entries, config.duplicate_policy)?;
    drop(entries);

    let books = assemble_books(grouped.books);
    let planned = plan_book_files(&config.output_dir, &books, config.write_index)?;

    ensure_directory_exists(&config.output_dir)?;

    let mut index = BookIndex::new();
    let mut chapter_files_written = 0;

    for p in &planned {
        let size = write_book(&p.path, p.book, config.style)?;

        if config.split_chapters {
            chapter_files_written += write_chapter_files(&config.output_dir, &p.stem, p.book)?;
        }

        index.insert(p.stem.clone(), BookIndexEntry {
            name: p.book.name.clone(),
            chapter_count: p.book.chapters.len(),
            size,
        });
    }

    // No books means no output files at all, not even an empty index.
    let index_path = if config.write_index && !books.is_empty() {
        Some(write_index(&config.output_dir, &index)?)
    } else {
        None
    };

    logger::info(&format!(
        "Wrote {} books, {} verses, in {}",
        planned.len(),
        grouped.verse_count,
        logger::format_duration(start.elapsed())
    ));

    Ok(SplitReport {
        output_dir: config.output_dir.clone(),
        books_written: planned.len(),
        verses_read: grouped.verse_count,
        chapter_files_written,
        duplicates: grouped.duplicates,
        index_path,
    })
}
