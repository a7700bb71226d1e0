//! Error types
//!
//! Every failure is reported synchronously to the caller. Nothing is retried:
//! the core does no I/O apart from reading a settings file.

use thiserror::Error;

/// Errors raised by the namer, the geometry builder and the toy driver.
#[derive(Error, Debug)]
pub enum ToyError {
    /// A caller passed a value outside the documented domain
    /// (side count of zero, non-positive radius, non-finite coordinates).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A prefix table had no entry for a key the range checks accepted.
    ///
    /// This is an internal invariant violation, never a user error.
    #[error("No '{table}' prefix for {key} (naming table bug)")]
    LookupGap {
        /// Name of the prefix table that missed
        table: &'static str,
        /// Digit that was looked up
        key: u32,
    },

    /// Settings failed to parse or validate.
    #[error("Invalid settings: {0}")]
    Settings(String),

    /// Settings file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ToyError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        ToyError::InvalidArgument(msg.into())
    }

    /// True for errors that point at a bug in this crate rather than bad input
    pub fn is_internal(&self) -> bool {
        matches!(self, ToyError::LookupGap { .. })
    }
}

impl From<serde_json::Error> for ToyError {
    fn from(err: serde_json::Error) -> Self {
        ToyError::Settings(err.to_string())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ToyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ToyError::invalid("side count must be at least 1, got 0");
        assert_eq!(
            err.to_string(),
            "Invalid argument: side count must be at least 1, got 0"
        );

        let err = ToyError::LookupGap { table: "tens", key: 0 };
        assert!(err.to_string().contains("'tens'"));
        assert!(err.is_internal());
    }

    #[test]
    fn test_json_error_converts_to_settings() {
        let err: ToyError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, ToyError::Settings(_)));
        assert!(!err.is_internal());
    }
}
