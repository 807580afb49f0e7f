use thiserror::Error;

#[derive(Error, Debug)]
pub enum RstatError {
    #[error("Input error: {message}")]
    InputError { message: String },

    #[error("Invalid receipt number '{value}': {reason}")]
    InvalidReceiptNumber { value: String, reason: String },

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("HTTP client error: {0}")]
    ClientError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Network,
    Parse,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RstatError {
    pub fn input(message: impl Into<String>) -> Self {
        Self::InputError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InputError { .. }
            | Self::InvalidReceiptNumber { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigError { .. }
            | Self::TomlError(_) => ErrorCategory::Input,
            Self::ClientError(_) => ErrorCategory::Network,
            Self::IoError(_) | Self::CsvError(_) | Self::SerializationError(_) => {
                ErrorCategory::Output
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Network | ErrorCategory::Parse => ErrorSeverity::Medium,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InputError { message } => message.clone(),
            Self::InvalidReceiptNumber { value, reason } => {
                format!("Receipt number '{}' is not usable: {}", value, reason)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Option '{}' is invalid: {}", field, reason)
            }
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::TomlError(e) => format!("Config file is not valid TOML: {}", e),
            Self::ClientError(e) => format!("Could not set up the HTTP client: {}", e),
            Self::IoError(e) => format!("Could not write output: {}", e),
            Self::CsvError(e) => format!("Could not write CSV output: {}", e),
            Self::SerializationError(e) => format!("Could not write JSON output: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InputError { .. } => {
                "Pass one or more receipt numbers with -n, and use --before/--after only with a single receipt number"
            }
            Self::InvalidReceiptNumber { .. } => {
                "A receipt number is a 3-character service center code followed by digits, e.g. EAC2190000001"
            }
            Self::InvalidConfigValueError { .. } | Self::ConfigError { .. } => {
                "Check the command line flags and the config file values"
            }
            Self::TomlError(_) => "Fix the syntax of the TOML config file",
            Self::ClientError(_) => "Check the TLS setup and the configured user agent",
            Self::IoError(_) | Self::CsvError(_) | Self::SerializationError(_) => {
                "Make sure standard output is writable"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, RstatError>;

/// Why a status page could not be turned into a [`StatusBlock`](crate::domain::model::StatusBlock).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("status block not found{}", site_message_suffix(.site_message))]
    MissingStatusBlock { site_message: Option<String> },

    #[error("status block has no {element} element")]
    MissingElement { element: &'static str },
}

fn site_message_suffix(site_message: &Option<String>) -> String {
    match site_message {
        Some(msg) => format!(" (site says: {})", msg),
        None => String::new(),
    }
}

/// Failure of a single status lookup. Never aborts sibling lookups.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("request timed out after {seconds:.1}s")]
    Timeout { seconds: f64 },

    #[error("server returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("unexpected page layout: {0}")]
    Parse(#[from] ParseError),
}

impl FetchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Network(_) | Self::Timeout { .. } | Self::HttpStatus { .. } => ErrorCategory::Network,
            Self::Parse(_) => ErrorCategory::Parse,
        }
    }

    /// Short label used in row markers: `network` or `parse`.
    pub fn kind(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Parse => "parse",
            _ => "network",
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Parse => "Double-check the receipt number; the site may also have changed its layout",
            _ => "Transient outage or rate limit; try again later or lower --num-threads",
        }
    }
}
