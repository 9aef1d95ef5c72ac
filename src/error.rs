//! Unified error handling for the climb-activity library.
//!
//! The correction, smoothing and statistics passes never fail. Errors only
//! come from configuration validation and from the sensor tracker boundary.

use thiserror::Error;

/// Unified error type for climb-activity operations.
#[derive(Debug, Clone, PartialEq, Error)]
#[cfg_attr(feature = "ffi", derive(uniffi::Error))]
pub enum ActivityError {
    /// The user did not grant motion/pedometer access
    #[error("Activity tracking authorization denied")]
    AuthorizationDenied,
    /// The sensor query could not be executed
    #[error("Activity query failed: {message}")]
    QueryFailed { message: String },
    /// Logs were requested without an active session
    #[error("No tracking session in progress")]
    NotTracking,
    /// A configuration value is out of range
    #[error("Invalid config '{field}': {message}")]
    InvalidConfig { field: String, message: String },
}

impl ActivityError {
    pub(crate) fn invalid_config(field: &str, message: impl Into<String>) -> Self {
        ActivityError::InvalidConfig {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for climb-activity operations.
pub type Result<T> = std::result::Result<T, ActivityError>;
