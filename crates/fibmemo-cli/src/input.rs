//! Validation of raw user input before it reaches the engine.

/// Why a raw input string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// Not an integer literal.
    #[error("Please enter a valid number")]
    NotANumber(String),

    /// A negative integer.
    #[error("Please enter a non-negative number")]
    Negative(String),

    /// A non-negative integer beyond the supported index range.
    #[error("Please enter a smaller number")]
    TooLarge(String),
}

impl InputError {
    /// The rejected input, trimmed.
    #[must_use]
    pub fn input(&self) -> &str {
        match self {
            Self::NotANumber(s) | Self::Negative(s) | Self::TooLarge(s) => s,
        }
    }

    /// Whether the input was an integer outside the accepted range.
    #[must_use]
    pub fn is_range_error(&self) -> bool {
        matches!(self, Self::Negative(_) | Self::TooLarge(_))
    }
}

/// Parse a base-10 Fibonacci index.
///
/// Surrounding whitespace and a single leading `+` or `-` are accepted.
/// `-0` is zero.
///
/// # Example
/// ```
/// use fibmemo_cli::input::{parse_request, InputError};
///
/// assert_eq!(parse_request(" 42 "), Ok(42));
/// assert!(matches!(parse_request("-5"), Err(InputError::Negative(_))));
/// assert!(matches!(parse_request("abc"), Err(InputError::NotANumber(_))));
/// ```
pub fn parse_request(raw: &str) -> Result<u64, InputError> {
    let trimmed = raw.trim();
    let (negative, digits) = if let Some(rest) = trimmed.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = trimmed.strip_prefix('+') {
        (false, rest)
    } else {
        (false, trimmed)
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InputError::NotANumber(trimmed.to_string()));
    }
    if negative && digits.bytes().any(|b| b != b'0') {
        return Err(InputError::Negative(trimmed.to_string()));
    }

    digits
        .parse::<u64>()
        .map_err(|_| InputError::TooLarge(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_digits() {
        assert_eq!(parse_request("0"), Ok(0));
        assert_eq!(parse_request("100"), Ok(100));
        assert_eq!(parse_request("007"), Ok(7));
    }

    #[test]
    fn accepts_whitespace_and_plus() {
        assert_eq!(parse_request("  12\n"), Ok(12));
        assert_eq!(parse_request("+9"), Ok(9));
        assert_eq!(parse_request("-0"), Ok(0));
    }

    #[test]
    fn rejects_non_numeric() {
        for raw in ["abc", "", "   ", "12abc", "1.5", "0x10", "--3", "+", "-", "1 2"] {
            let err = parse_request(raw).unwrap_err();
            assert!(
                matches!(err, InputError::NotANumber(_)),
                "{raw:?} should be NotANumber, got {err:?}"
            );
        }
    }

    #[test]
    fn rejects_negative() {
        let err = parse_request("-5").unwrap_err();
        assert_eq!(err, InputError::Negative("-5".into()));
        assert_eq!(err.to_string(), "Please enter a non-negative number");
        assert!(err.is_range_error());
    }

    #[test]
    fn rejects_overflow() {
        let err = parse_request("18446744073709551616").unwrap_err();
        assert!(matches!(err, InputError::TooLarge(_)));
        assert!(err.is_range_error());
        assert_eq!(err.to_string(), "Please enter a smaller number");
        assert_eq!(parse_request("18446744073709551615"), Ok(u64::MAX));
    }

    #[test]
    fn not_a_number_message() {
        let err = parse_request(" abc ").unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid number");
        assert_eq!(err.input(), "abc");
        assert!(!err.is_range_error());
    }
}
