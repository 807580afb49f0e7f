use crate::config::{resolve_settings, Overrides, Settings};
use crate::core::report::{OutputFormat, RenderOptions};
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "rstat")]
#[command(about = "USCIS Case Status Checker", version)]
pub struct CliConfig {
    /// Receipt numbers to look up
    #[arg(short = 'n', long, num_args = 0.., value_name = "RECEIPT")]
    pub receipt_numbers: Vec<String>,

    /// Maximum number of concurrent lookups [default: 16]
    #[arg(short = 't', long)]
    pub num_threads: Option<usize>,

    /// Also check this many receipt numbers below the given one
    #[arg(short, long, default_value_t = 0)]
    pub before: u32,

    /// Also check this many receipt numbers above the given one
    #[arg(short, long, default_value_t = 0)]
    pub after: u32,

    /// Status endpoint to post the search form to
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Per-request timeout in seconds [default: 30]
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Include the full status description in the output
    #[arg(long)]
    pub description: bool,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliConfig {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            endpoint: self.endpoint.clone(),
            timeout_seconds: self.timeout_seconds,
            max_workers: self.num_threads,
        }
    }

    pub fn settings(&self) -> Result<Settings> {
        resolve_settings(
            self.receipt_numbers.clone(),
            self.before,
            self.after,
            &self.overrides(),
            self.config.as_deref(),
        )
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            format: self.format,
            include_description: self.description,
        }
    }
}
