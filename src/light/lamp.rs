//! Per-color lamp handle

use std::time::Duration;

use crate::client::Jambel;
use crate::error::Result;
use super::{LampColor, LampState};

/// Handle for one lamp of a jambel
///
/// Holds no state of its own; every call delegates to the owning client.
/// Two handles for the same color are interchangeable.
#[derive(Debug, Clone, Copy)]
pub struct Lamp<'a> {
    jambel: &'a Jambel,
    color: LampColor,
}

impl<'a> Lamp<'a> {
    pub(crate) fn new(jambel: &'a Jambel, color: LampColor) -> Self {
        Self { jambel, color }
    }

    pub fn color(&self) -> LampColor {
        self.color
    }

    pub fn on(&self) -> Result<()> {
        self.jambel.set_lamp_state(self.color, LampState::On)
    }

    pub fn off(&self) -> Result<()> {
        self.jambel.set_lamp_state(self.color, LampState::Off)
    }

    pub fn blink(&self) -> Result<()> {
        self.jambel.set_lamp_state(self.color, LampState::Blink)
    }

    pub fn flash(&self) -> Result<()> {
        self.jambel.set_lamp_state(self.color, LampState::Flash)
    }

    /// Switch on for a limited time (see [`Jambel::on_for`])
    pub fn on_for(&self, duration: Duration) -> Result<()> {
        self.jambel.on_for(self.color, duration)
    }

    /// Set this lamp's blink on/off times
    pub fn blink_time(&self, on: Duration, off: Duration) -> Result<()> {
        self.jambel.set_blink_time(self.color, on, off)
    }

    /// Query the device and return this lamp's current state
    pub fn state(&self) -> Result<LampState> {
        Ok(self.jambel.query_status()?.get(self.color))
    }
}
