//! Light Module
//!
//! Value types for the three lamps of a jambel and the per-color handle.
//!
//! ## Packed Status Layout
//! ```text
//!   bit:  7  6 │ 5  4 │ 3  2 │ 1  0
//!        ──────┼──────┼──────┼──────
//!        unused│ GREEN│YELLOW│  RED
//! ```
//!
//! ### State Codes (per 2-bit field)
//! - 0: OFF
//! - 1: ON
//! - 2: BLINK
//! - 3: FLASH
//!
//! The same state codes are used on the wire, one decimal field per module.

mod state;
mod status;
mod lamp;

pub use state::{LampColor, LampState, FIELD_MASK, FIELD_WIDTH};
pub use status::Status;
pub use lamp::Lamp;
