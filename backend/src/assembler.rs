use crate::grouper::GroupedBook;
use crate::types::{BookDocument, ChapterEntry};

/// Order the chapters of a book and the verses of each chapter by number.
///
/// Sorting is stable, so verses sharing a number stay in input order.
pub fn assemble_book(book: GroupedBook) -> BookDocument {
    let GroupedBook { name, chapters } = book;

    let mut chapters: Vec<ChapterEntry> = chapters
        .into_iter()
        .map(|(chapter, mut verses)| {
            verses.sort_by_key(|v| v.verse);
            ChapterEntry { chapter, verses }
        })
        .collect();

    chapters.sort_by_key(|c| c.chapter);

    BookDocument { name, chapters }
}

pub fn assemble_books(books: Vec<GroupedBook>) -> Vec<BookDocument> {
    books.into_iter().map(assemble_book).collect()
}

/// Check that chapters are strictly ascending and verses are ascending within
/// each chapter. Repeated verse numbers are allowed.
pub fn check_book_order(book: &BookDocument) -> Result<(), String> {
    for pair in book.chapters.windows(2) {
        if pair[0].chapter >= pair[1].chapter {
            return Err(format!(
                "{}: chapter {} is followed by chapter {}",
                book.name, pair[0].chapter, pair[1].chapter
            ));
        }
    }

    for chapter in &book.chapters {
        for pair in chapter.verses.windows(2) {
            if pair[0].verse > pair[1].verse {
                return Err(format!(
                    "{} {}: verse {} is followed by verse {}",
                    book.name, chapter.chapter, pair[0].verse, pair[1].verse
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SimplifiedVerse;
    use std::collections::HashMap;

    fn sv(verse: u32, text: &str) -> SimplifiedVerse {
        SimplifiedVerse { verse, text: text.to_string() }
    }

    #[test]
    fn test_assemble_book_sorts_numerically() {
        let mut chapters = HashMap::new();
        for ch in [10, 2, 9, 1] {
            chapters.insert(ch, vec![sv(10, "ten"), sv(2, "two"), sv(1, "one")]);
        }
        let book = assemble_book(GroupedBook { name: "Psalms".to_string(), chapters });

        let chapter_numbers: Vec<u32> = book.chapters.iter().map(|c| c.chapter).collect();
        assert_eq!(chapter_numbers, vec![1, 2, 9, 10]);

        let verse_numbers: Vec<u32> = book.chapters[3].verses.iter().map(|v| v.verse).collect();
        assert_eq!(verse_numbers, vec![1, 2, 10]);

        assert!(check_book_order(&book).is_ok());
    }

    #[test]
    fn test_assemble_book_stable_for_duplicates() {
        let mut chapters = HashMap::new();
        chapters.insert(1, vec![sv(2, "b"), sv(1, "first"), sv(1, "second")]);
        let book = assemble_book(GroupedBook { name: "Ruth".to_string(), chapters });

        let texts: Vec<&str> = book.chapters[0].verses.iter().map(|v| v.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "b"]);
        assert_eq!(book.verse_count(), 3);
        assert!(check_book_order(&book).is_ok());
    }

    #[test]
    fn test_check_book_order() {
        let book = BookDocument {
            name: "Jude".to_string(),
            chapters: vec![
                ChapterEntry { chapter: 2, verses: vec![sv(1, "a")] },
                ChapterEntry { chapter: 1, verses: vec![sv(1, "b")] },
            ],
        };
        assert_eq!(check_book_order(&book).unwrap_err(), "Jude: chapter 2 is followed by chapter 1");

        let book = BookDocument {
            name: "Jude".to_string(),
            chapters: vec![ChapterEntry { chapter: 1, verses: vec![sv(3, "a"), sv(2, "b")] }],
        };
        assert!(check_book_order(&book).is_err());
    }
}
