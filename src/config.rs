//! Configuration for the jambel client
//!
//! Centralized configuration with sensible defaults.

use std::fmt;
use std::str::FromStr;

use crate::error::{JambelError, Result};
use crate::light::LampColor;

/// TCP port a jambel listens on unless told otherwise
pub const DEFAULT_PORT: u16 = 10001;

// =============================================================================
// Endpoint
// =============================================================================

/// Host and port of a device; fixed for the lifetime of a client
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new("localhost", DEFAULT_PORT)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Parses `HOST[:PORT]`
impl FromStr for Endpoint {
    type Err = JambelError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        let (host, port) = match parts.as_slice() {
            [host] => (*host, DEFAULT_PORT),
            [host, port] => {
                let port = port.parse::<u16>().map_err(|_| {
                    JambelError::Config(format!("Port needs to be an integer: {:?}", port))
                })?;
                (*host, port)
            }
            _ => {
                return Err(JambelError::Config(format!(
                    "Address format is HOST[:PORT], got {:?}",
                    s
                )))
            }
        };

        if host.is_empty() {
            return Err(JambelError::Config(format!("Missing host in {:?}", s)));
        }

        Ok(Self::new(host, port))
    }
}

// =============================================================================
// Mounting
// =============================================================================

/// Where the green module sits on the device
///
/// Modules are numbered 1..=3 on the wire; this decides which color each
/// number addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GreenPosition {
    /// red = 1, yellow = 2, green = 3
    #[default]
    Top,

    /// green = 1, yellow = 2, red = 3
    Bottom,
}

impl GreenPosition {
    /// Module number (1..=3) addressing `color`
    pub fn module_of(self, color: LampColor) -> u8 {
        let ordinal = color.ordinal() as u8;
        match self {
            GreenPosition::Top => ordinal + 1,
            GreenPosition::Bottom => 3 - ordinal,
        }
    }

    /// Color addressed by a module number, if the number is valid
    pub fn color_of(self, module: u8) -> Option<LampColor> {
        LampColor::ALL
            .into_iter()
            .find(|color| self.module_of(*color) == module)
    }
}

// =============================================================================
// Config
// =============================================================================

/// Main configuration for a jambel client
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Device
    // -------------------------------------------------------------------------
    /// Device address
    pub endpoint: Endpoint,

    /// Module layout of the device
    pub green_position: GreenPosition,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Connect timeout (milliseconds, 0 = OS default)
    pub connect_timeout_ms: u64,

    /// Read timeout (milliseconds, 0 = none)
    pub read_timeout_ms: u64,

    /// Write timeout (milliseconds, 0 = none)
    pub write_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::default(),
            green_position: GreenPosition::Top,
            connect_timeout_ms: 5000,
            read_timeout_ms: 5000,
            write_timeout_ms: 5000,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the device endpoint
    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.config.endpoint = endpoint;
        self
    }

    /// Set the device host, keeping the current port
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.endpoint.host = host.into();
        self
    }

    /// Set the device port
    pub fn port(mut self, port: u16) -> Self {
        self.config.endpoint.port = port;
        self
    }

    /// Set the module layout
    pub fn green_position(mut self, position: GreenPosition) -> Self {
        self.config.green_position = position;
        self
    }

    /// Set the connect timeout (in milliseconds)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Set connect, read and write timeouts at once
    pub fn timeout_ms(self, ms: u64) -> Self {
        self.connect_timeout_ms(ms).read_timeout_ms(ms).write_timeout_ms(ms)
    }

    pub fn build(self) -> Config {
        self.config
    }
}
