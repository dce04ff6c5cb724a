//! Response definitions
//!
//! Represents lines sent back by a device.

/// A device response line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Acknowledgement (`OK`)
    Ok,

    /// Status report
    Status {
        /// Raw per-module state codes, module 1 first (at most three)
        modules: Vec<u8>,

        /// Trailing device flags, kept as their decimal text
        flags: Vec<String>,
    },

    /// Any other line
    Text(String),
}

impl Response {
    /// Create a status response from per-module codes and trailing flags
    pub fn status(modules: &[u8], flags: &[u64]) -> Self {
        Self::Status {
            modules: modules.to_vec(),
            flags: flags.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Create an error line
    pub fn error(message: &str) -> Self {
        Self::Text(format!("ERROR {}", message))
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Response::Ok)
    }
}
