//! Network Module
//!
//! TCP transport for talking to a jambel, plus a simulated device.
//!
//! ## Architecture
//! - Client side: one short-lived connection per command
//! - Simulator: single acceptor thread, one thread per connection

mod server;
mod connection;

pub use server::{
    DeviceState, ReplyMode, Simulator, DEFAULT_BLINK_MILLIS, DEFAULT_REQUEST_LOG_CAPACITY,
};
pub use connection::Connection;
