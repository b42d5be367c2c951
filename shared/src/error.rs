//! Error types for the SMS calendar Lambda functions.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the SMS calendar Lambda functions.
#[derive(Error, Debug)]
pub enum Error {
    /// Event store error
    #[error("Store error: {0}")]
    Store(String),

    /// Outbound SMS error
    #[error("Notifier error: {0}")]
    Notifier(String),

    /// AWS SDK error
    #[error("AWS error: {0}")]
    Aws(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_category() {
        let err = Error::Store("table missing".to_string());
        assert_eq!(err.to_string(), "Store error: table missing");

        let err = Error::Config("TWILIO_TO_PHONE_NUMBER not set".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: TWILIO_TO_PHONE_NUMBER not set"
        );
    }
}
