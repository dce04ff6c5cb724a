//! Lamp colors and lamp states
//!
//! Both enumerations carry fixed numeric codes. The lookup tables below are
//! the only place those codes are defined.

use std::fmt;
use std::str::FromStr;

use crate::error::{JambelError, Result};

/// Width in bits of one lamp field in the packed status code
pub const FIELD_WIDTH: u32 = 2;

/// Mask selecting one lamp field after shifting
pub const FIELD_MASK: u8 = (1 << FIELD_WIDTH) - 1;

/// Bit offset of each color's field, indexed by color ordinal
const BIT_OFFSETS: [u32; 3] = [0, FIELD_WIDTH, 2 * FIELD_WIDTH];

/// State decode table, indexed by state code
const STATE_TABLE: [LampState; 4] = [
    LampState::Off,
    LampState::On,
    LampState::Blink,
    LampState::Flash,
];

// =============================================================================
// LampColor
// =============================================================================

/// One of the three colored lamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum LampColor {
    Red = 0,
    Yellow = 1,
    Green = 2,
}

impl LampColor {
    /// All colors in ordinal order
    pub const ALL: [LampColor; 3] = [LampColor::Red, LampColor::Yellow, LampColor::Green];

    /// Fixed ordinal (RED=0, YELLOW=1, GREEN=2)
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Offset of this color's field inside the packed status code
    pub fn bit_offset(self) -> u32 {
        BIT_OFFSETS[self.ordinal()]
    }

    pub fn name(self) -> &'static str {
        match self {
            LampColor::Red => "red",
            LampColor::Yellow => "yellow",
            LampColor::Green => "green",
        }
    }
}

impl fmt::Display for LampColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LampColor {
    type Err = JambelError;

    fn from_str(s: &str) -> Result<Self> {
        LampColor::ALL
            .into_iter()
            .find(|color| color.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| JambelError::InvalidArgument(format!("Unknown lamp color: {:?}", s)))
    }
}

// =============================================================================
// LampState
// =============================================================================

/// State of a single lamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum LampState {
    #[default]
    Off = 0,
    On = 1,
    Blink = 2,
    Flash = 3,
}

impl LampState {
    /// All states in code order
    pub const ALL: [LampState; 4] = STATE_TABLE;

    /// Numeric code used on the wire and in the packed status
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Decode a state code
    ///
    /// Codes outside the table are a protocol violation, never coerced to OFF.
    pub fn from_code(code: u8) -> Result<Self> {
        STATE_TABLE.get(code as usize).copied().ok_or_else(|| {
            JambelError::Protocol(format!("Unknown lamp state code: {}", code))
        })
    }

    /// Keyword used in `set=` commands
    pub fn keyword(self) -> &'static str {
        match self {
            LampState::Off => "off",
            LampState::On => "on",
            LampState::Blink => "blink",
            LampState::Flash => "flash",
        }
    }
}

impl fmt::Display for LampState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for LampState {
    type Err = JambelError;

    fn from_str(s: &str) -> Result<Self> {
        LampState::ALL
            .into_iter()
            .find(|state| state.keyword().eq_ignore_ascii_case(s))
            .ok_or_else(|| JambelError::InvalidArgument(format!("Unknown lamp state: {:?}", s)))
    }
}
