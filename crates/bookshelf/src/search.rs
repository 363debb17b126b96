//! Keyword search over the catalog.
//!
//! Every search runs the same pipeline: validate paging, parse the query,
//! dispatch a popularity recording of the normalized text, compile the
//! filter and ask the record store for one page of matches.

use std::time::Instant;

use search_query::{compile, ParsedQuery, QueryParser};

use crate::book::Book;
use crate::config::BookshelfConfig;
use crate::error::ServiceResult;
use crate::popularity::{PopularityAggregator, RecordHandle};
use crate::storage::SharedRecordStore;
use crate::types::{PageInfo, PageRequest, SearchKeyword, SearchMetadata, SearchResponse};

/// A search response together with its popularity recording.
#[derive(Debug)]
pub struct SearchOutcome {
    pub response: SearchResponse,
    pub recording: RecordHandle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueryMode {
    Literal,
    Operators,
}

#[derive(Clone)]
pub struct SearchService {
    store: SharedRecordStore,
    popularity: PopularityAggregator,
    config: BookshelfConfig,
}

impl SearchService {
    pub fn new(
        store: SharedRecordStore,
        popularity: PopularityAggregator,
        config: BookshelfConfig,
    ) -> Self {
        Self {
            store,
            popularity,
            config,
        }
    }

    /// Searches with the keyword taken literally; `|` and `-` are plain text.
    ///
    /// `size` falls back to the configured default page size.
    pub async fn browse(
        &self,
        keyword: Option<&str>,
        page: u32,
        size: Option<u32>,
    ) -> ServiceResult<SearchResponse> {
        self.execute(keyword, QueryMode::Literal, page, size)
            .await
            .map(|outcome| outcome.response)
    }

    /// Searches with `a|b` (either term) and `a-b` (first without second)
    /// operators.
    pub async fn search(
        &self,
        query: Option<&str>,
        page: u32,
        size: Option<u32>,
    ) -> ServiceResult<SearchResponse> {
        self.execute(query, QueryMode::Operators, page, size)
            .await
            .map(|outcome| outcome.response)
    }

    /// Like [`search`](Self::search), but hands back the recording handle so
    /// the caller can wait for the popularity update.
    pub async fn search_tracked(
        &self,
        query: Option<&str>,
        page: u32,
        size: Option<u32>,
    ) -> ServiceResult<SearchOutcome> {
        self.execute(query, QueryMode::Operators, page, size).await
    }

    /// The configured number of most-searched terms.
    pub async fn top_keywords(&self) -> Vec<SearchKeyword> {
        self.popularity
            .top_keywords(self.config.popularity.top_k)
            .await
    }

    async fn execute(
        &self,
        raw: Option<&str>,
        mode: QueryMode,
        page: u32,
        size: Option<u32>,
    ) -> ServiceResult<SearchOutcome> {
        let started = Instant::now();
        let request = PageRequest::new(
            page,
            size.unwrap_or(self.config.search.default_page_size),
            self.config.search.max_page_size,
        )?;

        let parsed = match mode {
            QueryMode::Literal => QueryParser::parse_literal(raw)?,
            QueryMode::Operators => QueryParser::parse_with_operators(raw)?,
        };
        let recording = self.record(&parsed);

        let filter = compile(&parsed);
        let found = self.store.find(&filter, request).await?;
        let books = found.map(|book: Book| book.to_summary());

        let execution_time = started.elapsed().as_millis() as u64;
        tracing::info!(
            "search '{}' ({}) matched {} books in {}ms",
            parsed.normalized(),
            parsed.strategy(),
            books.total_elements,
            execution_time
        );

        let response = SearchResponse {
            search_query: parsed.normalized().to_string(),
            page_info: PageInfo {
                current_page: request.number(),
                page_size: request.size(),
                total_pages: books.total_pages,
                total_elements: books.total_elements,
            },
            books: books.items,
            search_metadata: SearchMetadata {
                execution_time,
                strategy: parsed.strategy(),
            },
        };
        Ok(SearchOutcome {
            response,
            recording,
        })
    }

    fn record(&self, parsed: &ParsedQuery) -> RecordHandle {
        if !self.config.popularity.enabled {
            return RecordHandle::skipped();
        }
        self.popularity.record(parsed.normalized())
    }
}
