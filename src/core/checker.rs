use crate::core::batch::BatchRunner;
use crate::core::expander::expand_range;
use crate::domain::model::Report;
use crate::domain::ports::{ConfigProvider, StatusSource};
use crate::utils::error::Result;
use crate::utils::validation::validate_run_settings;
use std::sync::Arc;
use std::time::Instant;

/// Drives one run: validate, resolve receipt numbers, fetch, collect.
pub struct StatusChecker<S: StatusSource, C: ConfigProvider> {
    source: Arc<S>,
    config: C,
}

impl<S: StatusSource, C: ConfigProvider> StatusChecker<S, C> {
    pub fn new(source: S, config: C) -> Self {
        Self::with_shared_source(Arc::new(source), config)
    }

    pub fn with_shared_source(source: Arc<S>, config: C) -> Self {
        Self { source, config }
    }

    /// The receipt numbers this run will query, in report order.
    pub fn resolve_receipt_numbers(&self) -> Result<Vec<String>> {
        validate_run_settings(&self.config)?;

        let (before, after) = (self.config.before(), self.config.after());
        let given = self.config.receipt_numbers();
        if before > 0 || after > 0 {
            expand_range(&given[0], before, after)
        } else {
            Ok(given.iter().map(|r| r.trim().to_string()).collect())
        }
    }

    pub async fn run(&self) -> Result<Report> {
        let receipt_numbers = self.resolve_receipt_numbers()?;
        let started = Instant::now();
        tracing::info!(
            "🔍 Checking {} receipt number(s) with up to {} workers",
            receipt_numbers.len(),
            self.config.max_workers()
        );

        let runner = BatchRunner::new(Arc::clone(&self.source), self.config.max_workers());
        let report = Report {
            rows: runner.run(receipt_numbers).await,
        };

        let network_failures = report
            .failures()
            .filter(|(_, e)| e.kind() == "network")
            .count();
        let parse_failures = report.failures().count() - network_failures;
        tracing::info!(
            "✅ Finished {} lookup(s) in {:?} ({} network error(s), {} parse error(s))",
            report.rows.len(),
            started.elapsed(),
            network_failures,
            parse_failures
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::CaseStatus;
    use crate::utils::error::{FetchError, RstatError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl StatusSource for CountingSource {
        async fn fetch_status(&self, receipt_number: &str) -> std::result::Result<CaseStatus, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(CaseStatus {
                form: None,
                last_update: None,
                summary: receipt_number.to_string(),
                description: String::new(),
            })
        }
    }

    struct MockConfig {
        receipt_numbers: Vec<String>,
        before: u32,
        after: u32,
    }

    impl MockConfig {
        fn new(receipt_numbers: &[&str], before: u32, after: u32) -> Self {
            Self {
                receipt_numbers: receipt_numbers.iter().map(|s| s.to_string()).collect(),
                before,
                after,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn receipt_numbers(&self) -> &[String] {
            &self.receipt_numbers
        }

        fn before(&self) -> u32 {
            self.before
        }

        fn after(&self) -> u32 {
            self.after
        }

        fn max_workers(&self) -> usize {
            4
        }

        fn endpoint(&self) -> &str {
            "http://localhost/casestatus"
        }

        fn timeout(&self) -> Duration {
            Duration::from_secs(5)
        }

        fn user_agent(&self) -> &str {
            "rstat-test"
        }
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_calls() {
        let source = Arc::new(CountingSource::default());
        let checker = StatusChecker::with_shared_source(Arc::clone(&source), MockConfig::new(&[], 0, 0));

        let err = checker.run().await.unwrap_err();

        assert!(matches!(err, RstatError::InputError { .. }));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_range_with_batch_is_rejected() {
        let source = Arc::new(CountingSource::default());
        let config = MockConfig::new(&["EAC2190000001", "EAC2190000002"], 0, 2);
        let checker = StatusChecker::with_shared_source(Arc::clone(&source), config);

        let err = checker.run().await.unwrap_err();

        assert!(matches!(err, RstatError::InputError { .. }));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_oversized_range_is_rejected() {
        let source = Arc::new(CountingSource::default());
        let config = MockConfig::new(&["EAC0000000000"], 0, u32::MAX);
        let checker = StatusChecker::with_shared_source(Arc::clone(&source), config);

        let err = checker.run().await.unwrap_err();

        assert!(matches!(
            err,
            RstatError::InvalidConfigValueError { ref field, .. } if field == "after"
        ));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_range_expansion_run() {
        let source = Arc::new(CountingSource::default());
        let config = MockConfig::new(&["EAC2190000005"], 2, 1);
        let checker = StatusChecker::with_shared_source(Arc::clone(&source), config);

        let report = checker.run().await.unwrap();

        let receipts: Vec<_> = report.rows.iter().map(|r| r.receipt_number.as_str()).collect();
        assert_eq!(
            receipts,
            vec!["EAC2190000003", "EAC2190000004", "EAC2190000005", "EAC2190000006"]
        );
        assert_eq!(source.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_batch_run_passes_receipts_through() {
        let checker = StatusChecker::new(
            CountingSource::default(),
            MockConfig::new(&["LIN2190000001", " SRC2190000002 "], 0, 0),
        );

        let report = checker.run().await.unwrap();

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[1].receipt_number, "SRC2190000002");
        assert_eq!(report.rows[1].outcome.as_ref().unwrap().summary, "SRC2190000002");
    }
}
