use crate::domain::ports::ConfigProvider;
use crate::utils::error::{RstatError, Result};
use url::Url;

pub const MAX_WORKERS_LIMIT: usize = 256;
pub const MAX_RANGE_COUNT: u32 = 1000;
pub const MAX_TIMEOUT_SECONDS: u64 = 600;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(RstatError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(RstatError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(RstatError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RstatError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(RstatError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Checks everything that must hold before any request goes out.
pub fn validate_run_settings<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    let receipt_numbers = config.receipt_numbers();
    if receipt_numbers.is_empty() {
        return Err(RstatError::input("At least one receipt number is required"));
    }
    for receipt in receipt_numbers {
        validate_non_empty_string("receipt_numbers", receipt)?;
    }

    if (config.before() > 0 || config.after() > 0) && receipt_numbers.len() > 1 {
        return Err(RstatError::input(format!(
            "--before/--after need exactly one receipt number, got {}",
            receipt_numbers.len()
        )));
    }

    validate_range("before", config.before(), 0, MAX_RANGE_COUNT)?;
    validate_range("after", config.after(), 0, MAX_RANGE_COUNT)?;
    validate_range("num_threads", config.max_workers(), 1, MAX_WORKERS_LIMIT)?;
    validate_url("endpoint", config.endpoint())?;
    validate_non_empty_string("user_agent", config.user_agent())?;

    let timeout = config.timeout();
    if timeout.is_zero() || timeout.as_secs() > MAX_TIMEOUT_SECONDS {
        return Err(RstatError::InvalidConfigValueError {
            field: "timeout_seconds".to_string(),
            value: format!("{:?}", timeout),
            reason: format!("Timeout must be between 1 and {} seconds", MAX_TIMEOUT_SECONDS),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("endpoint", "https://egov.uscis.gov/casestatus/mycasestatus.do").is_ok());
        assert!(validate_url("endpoint", "http://127.0.0.1:8080/").is_ok());
        assert!(validate_url("endpoint", "").is_err());
        assert!(validate_url("endpoint", "invalid-url").is_err());
        assert!(validate_url("endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("num_threads", 16, 1, MAX_WORKERS_LIMIT).is_ok());
        assert!(validate_range("num_threads", 0, 1, MAX_WORKERS_LIMIT).is_err());
        assert!(validate_range("num_threads", 1000, 1, MAX_WORKERS_LIMIT).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("receipt_numbers", "EAC2190000001").is_ok());
        assert!(validate_non_empty_string("receipt_numbers", "   ").is_err());
    }
}
