//! Food backend error types.

use thiserror::Error;

/// Food operation error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum FoodError {
    #[error("network error talking to the food backend: {message}")]
    Network { message: String },

    #[error("food backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode backend response: {message}")]
    Decode { message: String },

    #[error("no food is being edited")]
    NothingSelected,

    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("unexpected error: {message}")]
    Unexpected { message: String },
}

impl FoodError {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates HTTP status error.
    #[must_use]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates invalid input error.
    #[must_use]
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether the backend call itself failed.
    #[must_use]
    pub const fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::Status { .. } | Self::Decode { .. }
        )
    }

    /// Returns whether a later retry could succeed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_failure_family() {
        assert!(FoodError::network("refused").is_backend_failure());
        assert!(FoodError::status(404, "not found").is_backend_failure());
        assert!(FoodError::decode("eof").is_backend_failure());
        assert!(!FoodError::NothingSelected.is_backend_failure());
        assert!(!FoodError::invalid_input("price", "not a number").is_backend_failure());
    }

    #[test]
    fn test_recoverable() {
        assert!(FoodError::network("timeout").is_recoverable());
        assert!(FoodError::status(503, "down").is_recoverable());
        assert!(!FoodError::status(400, "bad").is_recoverable());
    }

    #[test]
    fn test_display() {
        let err = FoodError::invalid_input("price", "not a number");
        assert_eq!(err.to_string(), "invalid price: not a number");
    }
}
