//! Repository layer holding the in-memory stores

pub mod books;

use std::sync::Arc;
use tokio::sync::Mutex;

pub use books::BookStore;

/// Main repository struct holding the shared stores.
///
/// Every store sits behind a single mutex: readers and writers serialize.
#[derive(Clone, Default)]
pub struct Repository {
    pub books: Arc<Mutex<BookStore>>,
}

impl Repository {
    /// Create a repository with empty stores
    pub fn new() -> Self {
        Self::default()
    }
}
