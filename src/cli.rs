//! Command-line instructions
//!
//! Parses `jambel` CLI tokens such as `green=on` or `status` and runs them
//! against a client, in order.

use std::fmt;
use std::str::FromStr;

use crate::client::Jambel;
use crate::error::{JambelError, Result};
use crate::light::{LampColor, LampState};

/// One CLI instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `<color>=<state>`
    Lamp(LampColor, LampState),
    Status,
    Reset,
    Version,
    Test,
}

impl FromStr for Instruction {
    type Err = JambelError;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.to_ascii_lowercase();
        let mut parts = lowered.split('=');
        let name = parts.next().unwrap_or_default();
        let value = parts.next();
        let extra = parts.next();

        let single = match name {
            "status" => Some(Instruction::Status),
            "reset" => Some(Instruction::Reset),
            "version" => Some(Instruction::Version),
            "test" => Some(Instruction::Test),
            _ => None,
        };
        if let Some(instruction) = single {
            if value.is_some() {
                return Err(JambelError::InvalidArgument(format!(
                    "Command {} takes no value",
                    name
                )));
            }
            return Ok(instruction);
        }

        let color = name
            .parse::<LampColor>()
            .map_err(|_| JambelError::InvalidArgument(format!("Command not found: {:?}", s)))?;

        match (value, extra) {
            (Some(value), None) if !value.is_empty() => {
                let state = value.parse::<LampState>().map_err(|_| {
                    JambelError::InvalidArgument(format!(
                        "Value for {} needs to be one of on, off, blink, flash; got {:?}",
                        color, value
                    ))
                })?;
                Ok(Instruction::Lamp(color, state))
            }
            _ => Err(JambelError::InvalidArgument(format!(
                "Command needs format {}=VALUE",
                color
            ))),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Lamp(color, state) => write!(f, "{}={}", color, state),
            Instruction::Status => f.write_str("status"),
            Instruction::Reset => f.write_str("reset"),
            Instruction::Version => f.write_str("version"),
            Instruction::Test => f.write_str("test"),
        }
    }
}

impl Instruction {
    /// Run against a device, returning text to show the user, if any
    pub fn execute(&self, jambel: &Jambel) -> Result<Option<String>> {
        match *self {
            Instruction::Lamp(color, state) => {
                jambel.set_lamp_state(color, state)?;
                Ok(None)
            }
            Instruction::Status => {
                let status = jambel.query_status()?;
                tracing::debug!("Packed status code 0x{:02x}", status.code());
                Ok(Some(status.to_string()))
            }
            Instruction::Reset => {
                jambel.reset()?;
                Ok(None)
            }
            Instruction::Version => jambel.version().map(Some),
            Instruction::Test => {
                let passed = jambel.self_test()?;
                Ok(Some(if passed { "test passed" } else { "test failed" }.to_string()))
            }
        }
    }
}

/// Log filter used when `RUST_LOG` is not set
pub fn default_log_filter(debug: bool) -> &'static str {
    if debug {
        "info,jambel=debug"
    } else {
        "info"
    }
}

/// Run instructions in order, stopping at the first failure
pub fn run(jambel: &Jambel, instructions: &[Instruction]) -> Result<Vec<String>> {
    let mut output = Vec::new();
    for instruction in instructions {
        tracing::debug!("Executing {}", instruction);
        if let Some(line) = instruction.execute(jambel)? {
            output.push(line);
        }
    }
    Ok(output)
}
