use crate::domain::model::ReceiptNumber;
use crate::utils::error::{RstatError, Result};

/// Expand one base receipt number into its neighbours.
///
/// Returns `before` numbers below the base, the base itself, then `after`
/// numbers above it, in ascending order. The base sits at index `before`.
/// Callers must reject range expansion in multi-receipt batch mode first.
pub fn expand_range(base: &str, before: u32, after: u32) -> Result<Vec<String>> {
    let receipt = ReceiptNumber::parse(base)?;
    let center = receipt.sequence();

    let first = center
        .checked_sub(u64::from(before))
        .ok_or_else(|| RstatError::InvalidReceiptNumber {
            value: receipt.to_string(),
            reason: format!("cannot count {} numbers below {}", before, center),
        })?;
    let last = center
        .checked_add(u64::from(after))
        .ok_or_else(|| RstatError::InvalidReceiptNumber {
            value: receipt.to_string(),
            reason: format!("cannot count {} numbers above {}", after, center),
        })?;

    tracing::debug!(
        base = %receipt,
        before,
        after,
        "Expanding receipt number range"
    );

    Ok((first..=last)
        .map(|sequence| receipt.with_sequence(sequence).to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suffix(receipt: &str) -> u64 {
        receipt[3..].parse().unwrap()
    }

    #[test]
    fn test_expand_range_counts_and_position() {
        for (before, after) in [(0, 0), (3, 0), (0, 4), (2, 5), (10, 10)] {
            let numbers = expand_range("EAC2190000100", before, after).unwrap();
            assert_eq!(numbers.len(), (before + 1 + after) as usize);
            assert_eq!(numbers[before as usize], "EAC2190000100");

            for pair in numbers.windows(2) {
                assert!(suffix(&pair[0]) < suffix(&pair[1]));
            }
            assert!(numbers.iter().all(|n| n.starts_with("EAC")));
        }
    }

    #[test]
    fn test_expand_range_values() {
        let numbers = expand_range("LIN2190000010", 2, 2).unwrap();
        assert_eq!(
            numbers,
            vec![
                "LIN2190000008",
                "LIN2190000009",
                "LIN2190000010",
                "LIN2190000011",
                "LIN2190000012",
            ]
        );
    }

    #[test]
    fn test_expand_range_keeps_digit_width() {
        let numbers = expand_range("WAC0000000009", 1, 1).unwrap();
        assert_eq!(
            numbers,
            vec!["WAC0000000008", "WAC0000000009", "WAC0000000010"]
        );
    }

    #[test]
    fn test_expand_range_below_zero() {
        let err = expand_range("EAC0000000001", 2, 0).unwrap_err();
        assert!(matches!(err, RstatError::InvalidReceiptNumber { .. }));
    }

    #[test]
    fn test_expand_range_bad_suffix() {
        assert!(expand_range("EACABCDEF", 1, 1).is_err());
        assert!(expand_range("", 0, 0).is_err());
    }
}
