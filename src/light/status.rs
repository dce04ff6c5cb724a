//! Aggregate lamp status
//!
//! A `Status` is always fully populated. It is built fresh from every device
//! answer and never cached.

use std::fmt;
use std::ops::Index;

use crate::config::GreenPosition;
use crate::error::{JambelError, Result};
use super::{LampColor, LampState, FIELD_MASK, FIELD_WIDTH};

/// Number of lamp fields in a status snapshot
const LAMP_COUNT: usize = LampColor::ALL.len();

/// Snapshot of all three lamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Status {
    /// Indexed by `LampColor::ordinal`
    states: [LampState; LAMP_COUNT],
}

impl Status {
    /// Every lamp off
    pub const ALL_OFF: Status = Status::uniform(LampState::Off);

    /// Every lamp flashing
    pub const PANIC: Status = Status::uniform(LampState::Flash);

    pub const fn new(red: LampState, yellow: LampState, green: LampState) -> Self {
        Self {
            states: [red, yellow, green],
        }
    }

    /// Same state for every lamp
    pub const fn uniform(state: LampState) -> Self {
        Self {
            states: [state; LAMP_COUNT],
        }
    }

    /// State of one lamp
    pub fn get(&self, color: LampColor) -> LampState {
        self.states[color.ordinal()]
    }

    pub fn set(&mut self, color: LampColor, state: LampState) {
        self.states[color.ordinal()] = state;
    }

    /// Copy with one lamp replaced
    pub fn with(mut self, color: LampColor, state: LampState) -> Self {
        self.set(color, state);
        self
    }

    /// Iterate `(color, state)` pairs in color ordinal order
    pub fn iter(&self) -> impl Iterator<Item = (LampColor, LampState)> + '_ {
        LampColor::ALL.into_iter().map(move |color| (color, self.get(color)))
    }

    // -------------------------------------------------------------------------
    // Packed one-byte code
    // -------------------------------------------------------------------------

    /// Pack into one byte (red = bits 0-1, yellow = bits 2-3, green = bits 4-5)
    pub fn code(&self) -> u8 {
        self.iter()
            .fold(0u8, |code, (color, state)| code | (state.code() << color.bit_offset()))
    }

    /// Unpack a one-byte code
    ///
    /// Bits above the green field must be clear.
    pub fn from_code(code: u8) -> Result<Self> {
        let used_bits = (LAMP_COUNT as u32) * FIELD_WIDTH;
        if code >> used_bits != 0 {
            return Err(JambelError::Protocol(format!(
                "Status code 0x{:02x} has bits set above bit {}",
                code,
                used_bits - 1
            )));
        }

        let mut status = Status::default();
        for color in LampColor::ALL {
            let field = (code >> color.bit_offset()) & FIELD_MASK;
            status.set(color, LampState::from_code(field)?);
        }
        Ok(status)
    }

    // -------------------------------------------------------------------------
    // Per-module wire codes
    // -------------------------------------------------------------------------

    /// Build a status from per-module state codes (module 1 first)
    ///
    /// Only the first three codes are lamp fields; trailing device flags are
    /// ignored. Any lamp field outside the state table fails the whole decode.
    pub fn from_module_codes(codes: &[u8], position: GreenPosition) -> Result<Self> {
        if codes.len() < LAMP_COUNT {
            return Err(JambelError::Protocol(format!(
                "Status needs {} module fields, got {}",
                LAMP_COUNT,
                codes.len()
            )));
        }

        let mut status = Status::default();
        for color in LampColor::ALL {
            let module = position.module_of(color);
            let code = codes[(module - 1) as usize];
            let state = LampState::from_code(code).map_err(|_| {
                JambelError::Protocol(format!(
                    "Module {} ({}) reported unknown state code {}",
                    module, color, code
                ))
            })?;
            status.set(color, state);
        }
        Ok(status)
    }

    /// Per-module state codes, module 1 first
    pub fn module_codes(&self, position: GreenPosition) -> [u8; LAMP_COUNT] {
        let mut codes = [0u8; LAMP_COUNT];
        for (color, state) in self.iter() {
            codes[(position.module_of(color) - 1) as usize] = state.code();
        }
        codes
    }
}

impl Index<LampColor> for Status {
    type Output = LampState;

    fn index(&self, color: LampColor) -> &LampState {
        &self.states[color.ordinal()]
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (color, state)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", color, state)?;
        }
        Ok(())
    }
}
