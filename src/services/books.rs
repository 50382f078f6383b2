//! Book catalog service

use validator::Validate;

use crate::{
    error::AppResult,
    models::book::{Book, BookFilter, BookInput, BookPayload, BookQuery, BookShort},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Validate the payload, then add the book to the store
    pub async fn create(&self, payload: BookPayload) -> AppResult<String> {
        payload.validate()?;
        let input = BookInput::try_from(payload)?;

        let id = self.repository.books.lock().await.create(input)?;
        tracing::info!("Book created: id={}", id);
        Ok(id)
    }

    pub async fn list(&self, query: &BookQuery) -> Vec<BookShort> {
        let filter = BookFilter::from(query);
        self.repository.books.lock().await.list(&filter)
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Book> {
        self.repository.books.lock().await.get_by_id(id)
    }

    pub async fn update(&self, id: &str, payload: BookPayload) -> AppResult<()> {
        payload.validate()?;
        let input = BookInput::try_from(payload)?;

        self.repository.books.lock().await.edit_by_id(id, input)?;
        tracing::info!("Book updated: id={}", id);
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.repository.books.lock().await.delete_by_id(id)?;
        tracing::info!("Book deleted: id={}", id);
        Ok(())
    }

    /// Number of books held (for readiness reporting)
    pub async fn count(&self) -> usize {
        self.repository.books.lock().await.len()
    }
}
