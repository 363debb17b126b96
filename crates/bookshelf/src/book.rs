//! The catalog record and its lookup service.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use search_query::{FieldSource, SearchField};

use crate::error::{ServiceError, ServiceResult};
use crate::storage::RecordStore;
use crate::types::{BookDetail, BookSummary};

/// A catalog entry. The ISBN doubles as the record identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub isbn: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub author: String,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub published_date: Option<NaiveDate>,
    #[serde(default)]
    pub image: Option<String>,
}

impl Book {
    pub fn new(
        isbn: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            isbn: isbn.into(),
            title: title.into(),
            subtitle: None,
            author: author.into(),
            publisher: None,
            published_date: None,
            image: None,
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = Some(publisher.into());
        self
    }

    pub fn with_published_date(mut self, published_date: NaiveDate) -> Self {
        self.published_date = Some(published_date);
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.isbn
    }

    pub fn to_summary(&self) -> BookSummary {
        BookSummary {
            id: self.isbn.clone(),
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            image: self.image.clone(),
            author: self.author.clone(),
            isbn: self.isbn.clone(),
            published: self.published_date,
        }
    }

    pub fn to_detail(&self) -> BookDetail {
        BookDetail {
            id: self.isbn.clone(),
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            image: self.image.clone(),
            author: self.author.clone(),
            isbn: self.isbn.clone(),
            publisher: self.publisher.clone(),
            published: self.published_date,
        }
    }
}

impl FieldSource for Book {
    fn field(&self, field: SearchField) -> Option<&str> {
        match field {
            SearchField::Isbn => Some(self.isbn.as_str()),
            SearchField::Title => Some(self.title.as_str()),
            SearchField::Subtitle => self.subtitle.as_deref(),
            SearchField::Author => Some(self.author.as_str()),
            SearchField::Publisher => self.publisher.as_deref(),
        }
    }
}

/// Single-record lookups against the catalog.
#[derive(Clone)]
pub struct BookService {
    store: Arc<dyn RecordStore>,
}

impl BookService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn book_detail(&self, id: &str) -> ServiceResult<BookDetail> {
        let book = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Book not found: {id}")))?;
        Ok(book.to_detail())
    }
}
