//! # jambel
//!
//! Client library for networked jambel traffic lights:
//! - Per-lamp control (on, off, blink, flash, timed on)
//! - Aggregate status query decoded into a typed snapshot
//! - Device timing and maintenance commands
//! - An in-process device simulator for tests and demos
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              Lamp handles (red / yellow / green)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ set_lamp_state(color, state)
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     Jambel client                            │
//! │        (color ↔ module mapping, status decoding)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ one line per request
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │               Connection (TCP, timeouts)                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                       ▼
//!              device or Simulator
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use jambel::{Jambel, LampColor, LampState};
//!
//! let jambel = Jambel::with_endpoint("ampel3.example.com".parse()?);
//! jambel.green().on()?;
//! jambel.yellow().blink()?;
//!
//! let status = jambel.query_status()?;
//! assert_eq!(status[LampColor::Green], LampState::On);
//! # Ok::<(), jambel::JambelError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod light;
pub mod protocol;
pub mod network;
pub mod client;
pub mod cli;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{JambelError, Result};
pub use config::{Config, Endpoint, GreenPosition, DEFAULT_PORT};
pub use light::{Lamp, LampColor, LampState, Status};
pub use client::Jambel;
pub use network::Simulator;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the jambel crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
