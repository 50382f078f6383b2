//! Book model and related request/query types.

use std::borrow::Cow;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};

/// Earliest publication year accepted by the payload schema
pub const MIN_YEAR: i32 = 1900;

/// Full book record as held by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Store-generated identifier (16 URL-safe characters)
    pub id: String,
    pub name: String,
    pub year: i32,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    /// Total pages
    pub page_count: u32,
    /// Pages read so far, never above `page_count`
    pub read_page: u32,
    /// Derived: `read_page == page_count` at the time of the last write
    pub finished: bool,
    pub reading: bool,
    pub inserted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Projection returned by list endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookShort {
    pub id: String,
    pub name: String,
    pub publisher: String,
}

impl From<&Book> for BookShort {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            name: book.name.clone(),
            publisher: book.publisher.clone(),
        }
    }
}

/// Writable fields of a book, as accepted by the store.
///
/// `name` stays optional here: the store itself rejects a missing name,
/// whether or not the payload schema ran first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookInput {
    pub name: Option<String>,
    pub year: i32,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    pub page_count: u32,
    pub read_page: u32,
    pub reading: bool,
}

/// Create/update book request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_year"))]
pub struct BookPayload {
    #[validate(
        required(message = "Please provide the book name"),
        length(min = 1, message = "Please provide the book name")
    )]
    pub name: Option<String>,
    #[validate(required(message = "year is required"))]
    pub year: Option<i32>,
    #[validate(
        required(message = "author is required"),
        length(min = 1, message = "author must not be empty")
    )]
    pub author: Option<String>,
    #[validate(
        required(message = "summary is required"),
        length(min = 1, message = "summary must not be empty")
    )]
    pub summary: Option<String>,
    #[validate(
        required(message = "publisher is required"),
        length(min = 1, message = "publisher must not be empty")
    )]
    pub publisher: Option<String>,
    #[validate(required(message = "pageCount is required"))]
    pub page_count: Option<u32>,
    #[validate(required(message = "readPage is required"))]
    pub read_page: Option<u32>,
    #[validate(required(message = "reading is required"))]
    pub reading: Option<bool>,
}

fn validate_year(payload: &BookPayload) -> Result<(), ValidationError> {
    let Some(year) = payload.year else {
        return Ok(());
    };
    let max_year = Utc::now().year();
    if (MIN_YEAR..=max_year).contains(&year) {
        return Ok(());
    }
    let mut err = ValidationError::new("year_range");
    err.message = Some(Cow::from(format!(
        "year must be between {} and {}",
        MIN_YEAR, max_year
    )));
    Err(err)
}

fn missing(field: &str) -> AppError {
    AppError::Validation(format!("{} is required", field))
}

impl TryFrom<BookPayload> for BookInput {
    type Error = AppError;

    fn try_from(payload: BookPayload) -> AppResult<Self> {
        Ok(Self {
            name: payload.name,
            year: payload.year.ok_or_else(|| missing("year"))?,
            author: payload.author.ok_or_else(|| missing("author"))?,
            summary: payload.summary.ok_or_else(|| missing("summary"))?,
            publisher: payload.publisher.ok_or_else(|| missing("publisher"))?,
            page_count: payload.page_count.ok_or_else(|| missing("pageCount"))?,
            read_page: payload.read_page.ok_or_else(|| missing("readPage"))?,
            reading: payload.reading.ok_or_else(|| missing("reading"))?,
        })
    }
}

/// Book list query parameters
///
/// `reading` and `finished` are flags: `1` means true, any other value false.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Case-insensitive substring of the book name
    pub name: Option<String>,
    /// `1` for books currently being read
    pub reading: Option<String>,
    /// `1` for finished books
    pub finished: Option<String>,
}

/// Filter applied by the store when listing books.
///
/// Criteria do not combine: only the last supplied one applies, in the
/// order `name`, `reading`, `finished`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookFilter {
    pub name: Option<String>,
    pub reading: Option<bool>,
    pub finished: Option<bool>,
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        if let Some(finished) = self.finished {
            return book.finished == finished;
        }
        if let Some(reading) = self.reading {
            return book.reading == reading;
        }
        match &self.name {
            Some(name) => book
                .name
                .to_lowercase()
                .contains(&name.trim().to_lowercase()),
            None => true,
        }
    }
}

impl From<&BookQuery> for BookFilter {
    fn from(query: &BookQuery) -> Self {
        Self {
            name: query.name.clone(),
            reading: query.reading.as_deref().map(|v| v == "1"),
            finished: query.finished.as_deref().map(|v| v == "1"),
        }
    }
}
