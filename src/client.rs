//! Client Module
//!
//! The device client: turns lamp intents into protocol commands and decodes
//! the device's answers.
//!
//! ## Request Model
//! - Every operation opens its own connection, sends one line, reads one
//!   line and drops the connection
//! - Nothing is cached; the device is the only source of truth
//! - Nothing is retried; the first failure is returned to the caller

use std::time::Duration;

use crate::config::{Config, Endpoint};
use crate::error::{JambelError, Result};
use crate::light::{Lamp, LampColor, LampState, Status};
use crate::network::Connection;
use crate::protocol::{encode_command, encode_response, Command, Response, MAX_MILLIS};

/// Client for one jambel
///
/// Holds only immutable configuration, so it can be shared between threads.
/// Concurrent commands are not serialized; the device decides the outcome.
#[derive(Debug, Clone)]
pub struct Jambel {
    config: Config,
}

impl Jambel {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Client with default settings for the given endpoint
    pub fn with_endpoint(endpoint: Endpoint) -> Self {
        Self::new(Config::builder().endpoint(endpoint).build())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.config.endpoint
    }

    // -------------------------------------------------------------------------
    // Lamp handles
    // -------------------------------------------------------------------------

    /// Handle for one lamp
    pub fn lamp(&self, color: LampColor) -> Lamp<'_> {
        Lamp::new(self, color)
    }

    pub fn red(&self) -> Lamp<'_> {
        self.lamp(LampColor::Red)
    }

    pub fn yellow(&self) -> Lamp<'_> {
        self.lamp(LampColor::Yellow)
    }

    pub fn green(&self) -> Lamp<'_> {
        self.lamp(LampColor::Green)
    }

    // -------------------------------------------------------------------------
    // Control
    // -------------------------------------------------------------------------

    /// Put one lamp into a state
    pub fn set_lamp_state(&self, color: LampColor, state: LampState) -> Result<()> {
        let module = self.module_of(color);
        self.command(&Command::Set { module, state })
    }

    /// Switch a lamp on for `duration`, after which the device turns it off
    ///
    /// A duration under one millisecond is a plain `on`. Durations above 65 s
    /// are rejected before anything is sent.
    pub fn on_for(&self, color: LampColor, duration: Duration) -> Result<()> {
        let millis = to_millis(duration, "on duration")?;
        if millis == 0 {
            return self.set_lamp_state(color, LampState::On);
        }
        if millis > MAX_MILLIS {
            return Err(JambelError::InvalidArgument(format!(
                "Max on duration is {} ms, got {} ms",
                MAX_MILLIS, millis
            )));
        }

        let module = self.module_of(color);
        self.command(&Command::SetTimed { module, millis })
    }

    /// Set all three lamps with one request
    pub fn set_all(&self, status: &Status) -> Result<()> {
        let codes = status.module_codes(self.config.green_position);
        self.command(&Command::SetAll { codes })
    }

    /// Reset the device
    pub fn reset(&self) -> Result<()> {
        self.command(&Command::Reset)
    }

    /// Global blink on-time
    pub fn set_blink_time_on(&self, duration: Duration) -> Result<()> {
        let millis = to_millis(duration, "blink on-time")?;
        self.command(&Command::BlinkTimeOn { millis })
    }

    /// Global blink off-time
    pub fn set_blink_time_off(&self, duration: Duration) -> Result<()> {
        let millis = to_millis(duration, "blink off-time")?;
        self.command(&Command::BlinkTimeOff { millis })
    }

    /// Blink on/off times for one lamp
    pub fn set_blink_time(&self, color: LampColor, on: Duration, off: Duration) -> Result<()> {
        let command = Command::BlinkTime {
            module: self.module_of(color),
            on_millis: to_millis(on, "blink on-time")?,
            off_millis: to_millis(off, "blink off-time")?,
        };
        self.command(&command)
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Query and decode the state of all three lamps
    ///
    /// Either every lamp decodes or the whole query fails.
    pub fn query_status(&self) -> Result<Status> {
        match self.send(&Command::Status)? {
            Response::Status { modules, .. } => {
                Status::from_module_codes(&modules, self.config.green_position)
            }
            other => Err(unexpected(&Command::Status, &other)),
        }
    }

    /// Run the device self-test; true when the device reports success
    pub fn self_test(&self) -> Result<bool> {
        Ok(self.send(&Command::Test)?.is_ok())
    }

    /// Firmware version text, whatever shape the line has
    pub fn version(&self) -> Result<String> {
        Ok(encode_response(&self.send(&Command::Version)?))
    }

    // -------------------------------------------------------------------------
    // Transport
    // -------------------------------------------------------------------------

    fn module_of(&self, color: LampColor) -> u8 {
        self.config.green_position.module_of(color)
    }

    /// Send a command that must be acknowledged with `OK`
    fn command(&self, command: &Command) -> Result<()> {
        match self.send(command)? {
            Response::Ok => Ok(()),
            other => Err(unexpected(command, &other)),
        }
    }

    /// One request/response round trip on a fresh connection
    fn send(&self, command: &Command) -> Result<Response> {
        let mut connection = Connection::open(&self.config)?;
        connection.request(command)
    }
}

fn to_millis(duration: Duration, what: &str) -> Result<u32> {
    u32::try_from(duration.as_millis())
        .map_err(|_| JambelError::InvalidArgument(format!("{} too long: {:?}", what, duration)))
}

fn unexpected(command: &Command, response: &Response) -> JambelError {
    JambelError::Protocol(format!(
        "Unexpected response to {:?}: {:?}",
        encode_command(command),
        response
    ))
}
