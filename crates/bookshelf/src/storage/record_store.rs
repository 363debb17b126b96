//! Record store trait and in-memory implementation.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use search_query::FilterExpression;

use crate::book::Book;
use crate::error::{ServiceError, ServiceResult};
use crate::types::{Page, PageRequest};

/// Evaluates compiled filters over the catalog.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns the requested page of books matching `filter`, in store order.
    async fn find(
        &self,
        filter: &FilterExpression,
        page: PageRequest,
    ) -> ServiceResult<Page<Book>>;
    /// Looks a single book up by its identifier.
    async fn find_by_id(&self, id: &str) -> ServiceResult<Option<Book>>;
}

pub type SharedRecordStore = Arc<dyn RecordStore>;

// --- Memory Implementation ---

/// Insertion-ordered catalog held in memory.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    books: RwLock<Vec<Book>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_books(books: Vec<Book>) -> Self {
        let store = Self::new();
        for book in books {
            store.insert(book);
        }
        store
    }

    /// Loads a JSON array of books.
    pub async fn from_json_file(path: &Path) -> ServiceResult<Self> {
        let data = tokio::fs::read_to_string(path).await.map_err(|error| {
            ServiceError::Store(format!("failed to read catalog {}: {error}", path.display()))
        })?;
        let books: Vec<Book> = serde_json::from_str(&data).map_err(|error| {
            ServiceError::Store(format!("failed to parse catalog {}: {error}", path.display()))
        })?;
        Ok(Self::with_books(books))
    }

    /// Inserts a book, replacing any existing entry with the same ISBN in place.
    pub fn insert(&self, book: Book) {
        let mut books = self.books.write();
        match books.iter_mut().find(|existing| existing.isbn == book.isbn) {
            Some(existing) => *existing = book,
            None => books.push(book),
        }
    }

    pub fn len(&self) -> usize {
        self.books.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.read().is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn find(
        &self,
        filter: &FilterExpression,
        page: PageRequest,
    ) -> ServiceResult<Page<Book>> {
        let matches = if filter.is_never() {
            Vec::new()
        } else {
            self.books
                .read()
                .iter()
                .filter(|book| filter.matches(*book))
                .cloned()
                .collect::<Vec<_>>()
        };
        Ok(Page::paginate(matches, page))
    }

    async fn find_by_id(&self, id: &str) -> ServiceResult<Option<Book>> {
        Ok(self.books.read().iter().find(|book| book.id() == id).cloned())
    }
}
