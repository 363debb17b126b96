//! Ranked counter trait and in-memory implementation.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::ServiceResult;

/// A keyed sorted set of scored members.
///
/// Implementations must make `increment_score` atomic per call so concurrent
/// increments of the same member are never lost.
#[async_trait]
pub trait RankedCounter: Send + Sync {
    /// Adds `delta` to the member's score, creating it at zero first. Returns the new score.
    async fn increment_score(&self, key: &str, member: &str, delta: f64) -> ServiceResult<f64>;
    /// Members ranked from highest score down, between the inclusive rank
    /// bounds `start` and `stop`. Negative bounds count from the lowest rank.
    async fn reverse_range_with_scores(
        &self,
        key: &str,
        start: i64,
        stop: i64,
    ) -> ServiceResult<Vec<(String, f64)>>;
}

pub type SharedRankedCounter = Arc<dyn RankedCounter>;

// --- Memory Implementation ---

/// Ranked counter held in process memory.
///
/// Ties in score are ranked by member in descending byte order.
#[derive(Debug, Default)]
pub struct MemoryRankedCounter {
    sets: Mutex<HashMap<String, HashMap<String, f64>>>,
}

impl MemoryRankedCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self, key: &str, member: &str) -> Option<f64> {
        self.sets
            .lock()
            .get(key)
            .and_then(|members| members.get(member).copied())
    }
}

#[async_trait]
impl RankedCounter for MemoryRankedCounter {
    async fn increment_score(&self, key: &str, member: &str, delta: f64) -> ServiceResult<f64> {
        let mut sets = self.sets.lock();
        let score = sets
            .entry(key.to_string())
            .or_default()
            .entry(member.to_string())
            .or_insert(0.0);
        *score += delta;
        Ok(*score)
    }

    async fn reverse_range_with_scores(
        &self,
        key: &str,
        start: i64,
        stop: i64,
    ) -> ServiceResult<Vec<(String, f64)>> {
        let mut ranked = match self.sets.lock().get(key) {
            Some(members) => members
                .iter()
                .map(|(member, score)| (member.clone(), *score))
                .collect::<Vec<_>>(),
            None => return Ok(Vec::new()),
        };
        ranked.sort_by(|a, b| match b.1.total_cmp(&a.1) {
            Ordering::Equal => b.0.cmp(&a.0),
            other => other,
        });

        let Some((start, stop)) = resolve_rank_bounds(start, stop, ranked.len()) else {
            return Ok(Vec::new());
        };
        Ok(ranked.drain(start..=stop).collect())
    }
}

/// Resolves inclusive, possibly negative rank bounds against `len` members.
fn resolve_rank_bounds(start: i64, stop: i64, len: usize) -> Option<(usize, usize)> {
    if len == 0 {
        return None;
    }
    let len = len as i64;
    let start = if start < 0 { (start + len).max(0) } else { start };
    let stop = if stop < 0 { stop + len } else { stop.min(len - 1) };
    if start > stop || start >= len {
        return None;
    }
    Some((start as usize, stop as usize))
}
