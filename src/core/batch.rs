use crate::domain::model::StatusRow;
use crate::domain::ports::StatusSource;
use futures::stream::{self, StreamExt};
use std::sync::Arc;

pub const DEFAULT_MAX_WORKERS: usize = 16;

/// Runs one status lookup per receipt number with at most `max_workers` in flight.
pub struct BatchRunner<S: StatusSource> {
    source: Arc<S>,
    max_workers: usize,
}

impl<S: StatusSource> BatchRunner<S> {
    pub fn new(source: Arc<S>, max_workers: usize) -> Self {
        Self {
            source,
            max_workers: max_workers.max(1),
        }
    }

    /// Returns one row per input, in input order, once every lookup has finished.
    pub async fn run(&self, receipt_numbers: Vec<String>) -> Vec<StatusRow> {
        let total = receipt_numbers.len();
        tracing::debug!(total, max_workers = self.max_workers, "Starting batch");

        let completed: Vec<(usize, StatusRow)> = stream::iter(receipt_numbers.into_iter().enumerate())
            .map(|(index, receipt_number)| {
                let source = Arc::clone(&self.source);
                async move {
                    let outcome = source.fetch_status(&receipt_number).await;
                    if let Err(e) = &outcome {
                        tracing::warn!(
                            receipt = %receipt_number,
                            kind = e.kind(),
                            error = %e,
                            suggestion = e.recovery_suggestion(),
                            "Status lookup failed"
                        );
                    }
                    (
                        index,
                        StatusRow {
                            receipt_number,
                            outcome,
                        },
                    )
                }
            })
            .buffer_unordered(self.max_workers)
            .collect()
            .await;

        let mut slots: Vec<Option<StatusRow>> = (0..total).map(|_| None).collect();
        for (index, row) in completed {
            slots[index] = Some(row);
        }
        slots.into_iter().flatten().collect()
    }
}
