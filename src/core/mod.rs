pub mod batch;
pub mod checker;
pub mod expander;
pub mod fetcher;
pub mod parser;
pub mod report;

pub use crate::domain::model::{CaseStatus, Report, StatusBlock, StatusRow};
pub use crate::domain::ports::{ConfigProvider, StatusSource};
pub use crate::utils::error::Result;
