//! Popular-term tracking on top of a [`RankedCounter`].

use std::time::Duration;

use tokio::task::JoinHandle;

use crate::storage::SharedRankedCounter;
use crate::types::SearchKeyword;

/// A ranked term with its accumulated score.
#[derive(Debug, Clone, PartialEq)]
pub struct PopularityEntry {
    pub term: String,
    pub score: f64,
}

impl PopularityEntry {
    pub fn to_keyword(&self) -> SearchKeyword {
        SearchKeyword {
            keyword: self.term.clone(),
            count: self.score.max(0.0).round() as u64,
        }
    }
}

/// Completion signal for a dispatched recording.
///
/// Dropping it leaves the recording running in the background.
#[derive(Debug)]
pub struct RecordHandle {
    task: Option<JoinHandle<()>>,
}

impl RecordHandle {
    pub(crate) fn skipped() -> Self {
        Self { task: None }
    }

    /// Whether a counter write was actually dispatched.
    pub fn is_dispatched(&self) -> bool {
        self.task.is_some()
    }

    /// Waits for the recording to settle. Failures were already logged.
    pub async fn completed(self) {
        if let Some(task) = self.task {
            if let Err(error) = task.await {
                tracing::warn!("popularity recording task aborted: {}", error);
            }
        }
    }
}

/// Counts search terms and reports the most frequent ones.
///
/// Counter failures never reach callers: `record` logs them and `top_k`
/// degrades to an empty ranking.
#[derive(Clone)]
pub struct PopularityAggregator {
    counter: SharedRankedCounter,
    key: String,
    read_timeout: Duration,
}

impl PopularityAggregator {
    pub fn new(
        counter: SharedRankedCounter,
        key: impl Into<String>,
        read_timeout: Duration,
    ) -> Self {
        Self {
            counter,
            key: key.into(),
            read_timeout,
        }
    }

    /// Dispatches a +1 increment for `term` on its own task.
    ///
    /// Blank terms are ignored. Outside a tokio runtime nothing is recorded.
    pub fn record(&self, term: &str) -> RecordHandle {
        let term = term.trim();
        if term.is_empty() {
            return RecordHandle::skipped();
        }
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(error) => {
                tracing::error!("cannot aggregate search term '{}': {}", term, error);
                return RecordHandle::skipped();
            }
        };

        let counter = self.counter.clone();
        let key = self.key.clone();
        let term = term.to_string();
        let task = runtime.spawn(async move {
            match counter.increment_score(&key, &term, 1.0).await {
                Ok(score) => {
                    tracing::debug!("aggregated search term '{}' (score {})", term, score)
                }
                Err(error) => {
                    tracing::error!("failed to aggregate search term '{}': {}", term, error)
                }
            }
        });
        RecordHandle { task: Some(task) }
    }

    /// Up to `k` terms by descending score. Empty when the counter fails or
    /// does not answer within the read timeout.
    pub async fn top_k(&self, k: usize) -> Vec<PopularityEntry> {
        if k == 0 {
            return Vec::new();
        }
        let stop = i64::try_from(k - 1).unwrap_or(i64::MAX);
        let read = self.counter.reverse_range_with_scores(&self.key, 0, stop);

        match tokio::time::timeout(self.read_timeout, read).await {
            Ok(Ok(ranked)) => ranked
                .into_iter()
                .take(k)
                .map(|(term, score)| PopularityEntry { term, score })
                .collect(),
            Ok(Err(error)) => {
                tracing::error!("failed to read popular search terms: {}", error);
                Vec::new()
            }
            Err(_) => {
                tracing::warn!(
                    "reading popular search terms timed out after {}ms",
                    self.read_timeout.as_millis()
                );
                Vec::new()
            }
        }
    }

    /// [`top_k`](Self::top_k) shaped as response keywords with rounded counts.
    pub async fn top_keywords(&self, k: usize) -> Vec<SearchKeyword> {
        self.top_k(k)
            .await
            .iter()
            .map(PopularityEntry::to_keyword)
            .collect()
    }
}
