//! Command definitions
//!
//! Represents requests sent to a device.

use crate::light::LampState;

/// Largest duration (milliseconds) the firmware accepts in a timed command
pub const MAX_MILLIS: u32 = 65_000;

/// Command types, one per request keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Set,
    SetAll,
    Reset,
    BlinkTimeOn,
    BlinkTimeOff,
    BlinkTime,
    Status,
    Test,
    Version,
}

impl CommandType {
    /// Keyword that starts the request line
    pub fn keyword(self) -> &'static str {
        match self {
            CommandType::Set => "set",
            CommandType::SetAll => "set_all",
            CommandType::Reset => "reset",
            CommandType::BlinkTimeOn => "blink_time_on",
            CommandType::BlinkTimeOff => "blink_time_off",
            CommandType::BlinkTime => "blink_time",
            CommandType::Status => "status",
            CommandType::Test => "test",
            CommandType::Version => "version",
        }
    }
}

/// A device request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Put one module into a state
    Set { module: u8, state: LampState },

    /// Switch one module on for a number of milliseconds
    SetTimed { module: u8, millis: u32 },

    /// Set all modules at once (state codes, module 1 first)
    SetAll { codes: [u8; 3] },

    /// Reset the device
    Reset,

    /// Global blink on-time
    BlinkTimeOn { millis: u32 },

    /// Global blink off-time
    BlinkTimeOff { millis: u32 },

    /// Blink timing for one module
    BlinkTime { module: u8, on_millis: u32, off_millis: u32 },

    /// Aggregate status query
    Status,

    /// Device self-test
    Test,

    /// Firmware version query
    Version,
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Set { .. } | Command::SetTimed { .. } => CommandType::Set,
            Command::SetAll { .. } => CommandType::SetAll,
            Command::Reset => CommandType::Reset,
            Command::BlinkTimeOn { .. } => CommandType::BlinkTimeOn,
            Command::BlinkTimeOff { .. } => CommandType::BlinkTimeOff,
            Command::BlinkTime { .. } => CommandType::BlinkTime,
            Command::Status => CommandType::Status,
            Command::Test => CommandType::Test,
            Command::Version => CommandType::Version,
        }
    }
}
