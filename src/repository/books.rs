//! In-memory book store

use chrono::Utc;
use rand::Rng;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookFilter, BookInput, BookShort},
};

const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";
const ID_LENGTH: usize = 16;

/// Generate a random URL-safe book identifier
fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// Check the write invariants and hand back the book name.
/// A missing or empty name is checked before the page counts.
fn check_input(input: &BookInput) -> AppResult<&str> {
    let name = input
        .name
        .as_deref()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::Validation("Please provide the book name".to_string()))?;

    if input.read_page > input.page_count {
        return Err(AppError::Validation(
            "readPage must not be greater than pageCount".to_string(),
        ));
    }

    Ok(name)
}

/// Ordered collection of book records, owned exclusively by the store.
#[derive(Debug, Default)]
pub struct BookStore {
    books: Vec<Book>,
}

impl BookStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Add a book and return its generated id
    pub fn create(&mut self, input: BookInput) -> AppResult<String> {
        let name = check_input(&input)?.to_string();

        let id = generate_id();
        let now = Utc::now();

        self.books.push(Book {
            id: id.clone(),
            name,
            year: input.year,
            author: input.author,
            summary: input.summary,
            publisher: input.publisher,
            page_count: input.page_count,
            read_page: input.read_page,
            finished: input.read_page == input.page_count,
            reading: input.reading,
            inserted_at: now,
            updated_at: now,
        });

        Ok(id)
    }

    /// List matching books in insertion order
    pub fn list(&self, filter: &BookFilter) -> Vec<BookShort> {
        self.books
            .iter()
            .filter(|book| filter.matches(book))
            .map(BookShort::from)
            .collect()
    }

    pub fn get_by_id(&self, id: &str) -> AppResult<Book> {
        self.books
            .iter()
            .find(|book| book.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    /// Replace every field but `id` and `inserted_at`.
    ///
    /// The payload is validated before the id is looked up, so a bad
    /// payload for an unknown id reports the validation failure.
    pub fn edit_by_id(&mut self, id: &str, input: BookInput) -> AppResult<()> {
        let name = check_input(&input)?.to_string();

        let book = self
            .books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or_else(|| AppError::NotFound("Id not found".to_string()))?;

        book.name = name;
        book.year = input.year;
        book.author = input.author;
        book.summary = input.summary;
        book.publisher = input.publisher;
        book.page_count = input.page_count;
        book.read_page = input.read_page;
        book.finished = input.read_page == input.page_count;
        book.reading = input.reading;
        book.updated_at = Utc::now();

        Ok(())
    }

    pub fn delete_by_id(&mut self, id: &str) -> AppResult<()> {
        let index = self
            .books
            .iter()
            .position(|book| book.id == id)
            .ok_or_else(|| AppError::NotFound("Id not found".to_string()))?;
        self.books.remove(index);
        Ok(())
    }
}
