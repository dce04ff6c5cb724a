//! Error types for the jambel client
//!
//! Every operation surfaces exactly one categorized error. Nothing is retried
//! or downgraded internally.

use thiserror::Error;

/// Result type alias using JambelError
pub type Result<T> = std::result::Result<T, JambelError>;

/// Unified error type for jambel operations
#[derive(Debug, Error)]
pub enum JambelError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    /// Device unreachable, connection refused/reset, timeout or early close
    #[error("Communication error: {0}")]
    Communication(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    /// The device answered, but the answer violates the protocol
    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Caller Errors
    // -------------------------------------------------------------------------
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl JambelError {
    /// True for transport-level failures
    pub fn is_communication(&self) -> bool {
        matches!(self, JambelError::Communication(_))
    }

    /// True when the device response could not be interpreted
    pub fn is_protocol(&self) -> bool {
        matches!(self, JambelError::Protocol(_))
    }
}
