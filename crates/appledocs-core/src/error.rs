//! Error types and handling for appledocs-core operations.
//!
//! Every failure in the query pipeline maps onto one of a small set of
//! variants. The split matters for the retry logic: a [`Error::NotFound`] is
//! terminal (the resource genuinely does not exist upstream), while network
//! and timeout failures are candidates for retry with backoff.

use thiserror::Error;

/// The main error type for appledocs-core operations.
///
/// All public functions in appledocs-core return `Result<T, Error>`.
/// `Display` gives a user-facing message; the source chain is preserved for
/// underlying reqwest/serde errors.
#[derive(Error, Debug)]
pub enum Error {
    /// Network operation failed.
    ///
    /// Covers transport-level failures fetching upstream JSON or HTML:
    /// connection resets, DNS failures, TLS problems, request timeouts.
    /// The underlying `reqwest::Error` is preserved.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Requested resource was not found upstream (HTTP 404).
    ///
    /// Terminal: a 404 from the documentation site means the page or index
    /// genuinely does not exist, so the fetcher never retries it.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input was rejected before any network call.
    ///
    /// Malformed documentation URLs, wrong host, unsupported language or
    /// category values.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Upstream response could not be parsed.
    ///
    /// A 2xx response whose body is not the expected JSON shape, or HTML
    /// that no longer matches the search result markup.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Operation exceeded its time budget.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Serialization or deserialization failed.
    ///
    /// Conversion failures at the cache boundary, where typed records
    /// round-trip through JSON values.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic error for uncategorized failures.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl Error {
    /// Check if the error might be recoverable through retry logic.
    ///
    /// Returns `true` for failures that are typically temporary: connection
    /// errors, timeouts, 5xx statuses. `NotFound` and input/parse failures
    /// are permanent.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(e) => {
                e.is_timeout()
                    || e.is_connect()
                    || e.status().is_some_and(|s| s.is_server_error())
            },
            Self::Timeout(_) => true,
            _ => false,
        }
    }

    /// Get the error category as a string identifier, for logging.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::NotFound(_) => "not_found",
            Self::InvalidInput(_) => "invalid_input",
            Self::Parse(_) => "parse",
            Self::Timeout(_) => "timeout",
            Self::Serialization(_) => "serialization",
            Self::Other(_) => "other",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_formatting() {
        let cases = vec![
            (
                Error::NotFound("documentation/swiftui/view".to_string()),
                "Not found: documentation/swiftui/view",
            ),
            (
                Error::InvalidInput("not a documentation URL".to_string()),
                "Invalid input: not a documentation URL",
            ),
            (
                Error::Parse("unexpected search markup".to_string()),
                "Parse error: unexpected search markup",
            ),
            (
                Error::Timeout("request exceeded 30s".to_string()),
                "Timeout: request exceeded 30s",
            ),
            (Error::Other("boom".to_string()), "boom"),
        ];

        for (error, expected) in cases {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(Error::NotFound(String::new()).category(), "not_found");
        assert_eq!(
            Error::InvalidInput(String::new()).category(),
            "invalid_input"
        );
        assert_eq!(Error::Parse(String::new()).category(), "parse");
        assert_eq!(Error::Timeout(String::new()).category(), "timeout");
        assert_eq!(
            Error::Serialization(String::new()).category(),
            "serialization"
        );
        assert_eq!(Error::Other(String::new()).category(), "other");
    }

    #[test]
    fn test_recoverability() {
        assert!(Error::Timeout("t".to_string()).is_recoverable());

        let permanent = vec![
            Error::NotFound("n".to_string()),
            Error::InvalidInput("i".to_string()),
            Error::Parse("p".to_string()),
            Error::Serialization("s".to_string()),
            Error::Other("o".to_string()),
        ];
        for error in permanent {
            assert!(
                !error.is_recoverable(),
                "expected {error:?} to be permanent"
            );
        }
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        let error: Error = json_err.into();
        assert_eq!(error.category(), "serialization");
    }
}
