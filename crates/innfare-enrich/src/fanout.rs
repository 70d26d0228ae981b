//! Bounded fan-out over independent items.

use std::any::Any;
use std::fmt::Display;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::{stream, FutureExt, StreamExt};

/// Result of running the per-item operation on one item.
#[derive(Debug)]
pub enum ItemOutcome<R> {
    Completed(R),
    /// The operation returned an error.
    Failed { index: usize, reason: String },
    /// The operation panicked; `reason` is the panic message.
    Panicked { index: usize, reason: String },
}

impl<R> ItemOutcome<R> {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, ItemOutcome::Completed(_))
    }

    /// The completed value, discarding the failure reason.
    pub fn completed(self) -> Option<R> {
        match self {
            ItemOutcome::Completed(value) => Some(value),
            ItemOutcome::Failed { .. } | ItemOutcome::Panicked { .. } => None,
        }
    }
}

/// Runs `op` once per item with at most `limit` operations in flight.
///
/// Items start in input order and the returned outcomes are in input order,
/// regardless of completion order. An `Err` from one item is captured as
/// [`ItemOutcome::Failed`] and a panic as [`ItemOutcome::Panicked`]; neither
/// cancels or delays any other item. Returns only after every item has settled. A `limit` of zero
/// is treated as one.
pub async fn fan_out<T, R, E, F, Fut>(items: Vec<T>, limit: usize, op: F) -> Vec<ItemOutcome<R>>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = Result<R, E>>,
    E: Display,
{
    let op = &op;
    stream::iter(items.into_iter().enumerate())
        .map(|(index, item)| async move {
            let attempt = AssertUnwindSafe(async move { op(item).await }).catch_unwind();
            match attempt.await {
                Ok(Ok(value)) => ItemOutcome::Completed(value),
                Ok(Err(e)) => ItemOutcome::Failed {
                    index,
                    reason: e.to_string(),
                },
                Err(panic) => ItemOutcome::Panicked {
                    index,
                    reason: panic_message(panic.as_ref()).to_owned(),
                },
            }
        })
        .buffered(limit.max(1))
        .collect()
        .await
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic payload"
    }
}
