use crate::domain::model::CaseStatus;
use crate::utils::error::FetchError;
use async_trait::async_trait;
use std::time::Duration;

/// Anything that can look up the status of one receipt number.
///
/// Receipt numbers are passed through untouched; batch mode does not
/// validate them.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_status(&self, receipt_number: &str) -> Result<CaseStatus, FetchError>;
}

pub trait ConfigProvider: Send + Sync {
    fn receipt_numbers(&self) -> &[String];
    fn before(&self) -> u32;
    fn after(&self) -> u32;
    fn max_workers(&self) -> usize;
    fn endpoint(&self) -> &str;
    fn timeout(&self) -> Duration;
    fn user_agent(&self) -> &str;
}
