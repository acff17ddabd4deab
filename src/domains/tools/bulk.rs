//! Concurrent fan-out with per-item outcomes.
//!
//! Bulk tools issue one remote call per input item. Calls run concurrently
//! and every item gets its own outcome tagged with its input index, so one
//! failing item never discards the others.

use std::future::Future;

use futures::future::join_all;
use serde::Serialize;
use serde_json::Value;

use super::envelope::{self, ErrorPayload};

/// A successful item.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BulkSuccess<T> {
    pub index: usize,
    pub item: T,
}

/// A failed item.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BulkFailure {
    pub index: usize,
    pub error: String,
}

/// Aggregate outcome of a bulk call. Both lists are in input order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BulkReport<T = Value> {
    pub created: usize,
    pub failed: usize,
    pub results: Vec<BulkSuccess<T>>,
    pub errors: Vec<BulkFailure>,
}

impl<T> BulkReport<T> {
    /// Report from per-item outcomes already in input order.
    pub fn from_outcomes<E>(outcomes: Vec<Result<T, E>>) -> Self
    where
        E: Into<ErrorPayload>,
    {
        let mut results = Vec::new();
        let mut errors = Vec::new();
        for (index, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(item) => results.push(BulkSuccess { index, item }),
                Err(e) => errors.push(BulkFailure {
                    index,
                    error: envelope::error_text(&e.into()),
                }),
            }
        }
        Self {
            created: results.len(),
            failed: errors.len(),
            results,
            errors,
        }
    }
}

/// Run `op` for every item concurrently and collect an index-tagged report.
///
/// Completion order does not matter: outcome `i` always belongs to input `i`.
pub async fn gather_indexed<I, T, E, F, Fut>(items: I, op: F) -> BulkReport<T>
where
    I: IntoIterator,
    F: FnMut(usize, I::Item) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Into<ErrorPayload>,
{
    let mut op = op;
    let calls = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| op(index, item));
    BulkReport::from_outcomes(join_all(calls).await)
}
