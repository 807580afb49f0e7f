pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;
pub use config::Settings;

pub use crate::core::{
    batch::BatchRunner,
    checker::StatusChecker,
    expander::expand_range,
    fetcher::HttpStatusFetcher,
    parser::{extract_form, extract_last_update, parse_status_page},
    report::{render_report, OutputFormat, RenderOptions},
};
pub use domain::model::{CaseStatus, Report, StatusRow};
pub use domain::ports::{ConfigProvider, StatusSource};
pub use utils::error::{FetchError, ParseError, Result, RstatError};
