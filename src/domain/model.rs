use crate::utils::error::{FetchError, RstatError, Result};
use std::fmt;

/// Rendered in place of a field the description text does not mention.
pub const NOT_AVAILABLE: &str = "N/A";

/// Length of the service center code at the start of every receipt number.
pub const PREFIX_LEN: usize = 3;

/// A receipt number split into its service center prefix and numeric suffix.
///
/// `width` remembers how many digits the suffix was written with, so that
/// neighbours produced by range expansion keep their leading zeros.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptNumber {
    prefix: String,
    sequence: u64,
    width: usize,
}

impl ReceiptNumber {
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let split_at = raw
            .char_indices()
            .nth(PREFIX_LEN)
            .map(|(idx, _)| idx)
            .ok_or_else(|| RstatError::InvalidReceiptNumber {
                value: raw.to_string(),
                reason: format!("expected a {}-character prefix followed by digits", PREFIX_LEN),
            })?;

        let (prefix, digits) = raw.split_at(split_at);
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RstatError::InvalidReceiptNumber {
                value: raw.to_string(),
                reason: format!("suffix '{}' is not numeric", digits),
            });
        }
        let sequence = digits
            .parse::<u64>()
            .map_err(|e| RstatError::InvalidReceiptNumber {
                value: raw.to_string(),
                reason: format!("suffix '{}' is not a valid integer: {}", digits, e),
            })?;

        Ok(Self {
            prefix: prefix.to_string(),
            sequence,
            width: digits.len(),
        })
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Same prefix and digit width, different sequence value.
    pub fn with_sequence(&self, sequence: u64) -> Self {
        Self {
            prefix: self.prefix.clone(),
            sequence,
            width: self.width,
        }
    }
}

impl fmt::Display for ReceiptNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:0width$}", self.prefix, self.sequence, width = self.width)
    }
}

/// The results region of a status page, before any field extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBlock {
    pub summary: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseStatus {
    pub form: Option<String>,
    pub last_update: Option<String>,
    pub summary: String,
    pub description: String,
}

impl CaseStatus {
    pub fn form_or_na(&self) -> &str {
        self.form.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn last_update_or_na(&self) -> &str {
        self.last_update.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

/// One line of the final report, keyed by the receipt number that produced it.
#[derive(Debug)]
pub struct StatusRow {
    pub receipt_number: String,
    pub outcome: std::result::Result<CaseStatus, FetchError>,
}

impl StatusRow {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

#[derive(Debug, Default)]
pub struct Report {
    pub rows: Vec<StatusRow>,
}

impl Report {
    pub fn failures(&self) -> impl Iterator<Item = (&str, &FetchError)> {
        self.rows.iter().filter_map(|row| match &row.outcome {
            Ok(_) => None,
            Err(e) => Some((row.receipt_number.as_str(), e)),
        })
    }
}
