//! Infrastructure errors
//!
//! Failures that are not remote accessibility statuses: configuration I/O
//! and parsing, logging setup, and running on a platform without an
//! accessibility service. Remote failures stay `AxError`.

/// Infrastructure error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InfraError {
    /// Configuration could not be read, parsed or applied
    #[error("Configuration error: {0}")]
    Config(String),

    /// The current platform cannot provide the requested service
    #[error("Platform error: {0}")]
    Platform(String),
}

impl InfraError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn platform(message: impl Into<String>) -> Self {
        Self::Platform(message.into())
    }
}

/// Result type alias for infrastructure operations
pub type InfraResult<T> = std::result::Result<T, InfraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(InfraError::config("bad depth").to_string(), "Configuration error: bad depth");
        assert_eq!(
            InfraError::platform("macOS only").to_string(),
            "Platform error: macOS only"
        );
    }
}
