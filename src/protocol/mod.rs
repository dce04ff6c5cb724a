//! Protocol Module
//!
//! Defines the line-based text protocol spoken by a jambel.
//!
//! ## Framing
//! One command per line, terminated by `\n`. The device answers with one
//! line terminated by `\r\n`.
//!
//! ### Commands
//! - `set=<module>,<off|on|blink|flash>`
//! - `set=<module>,<millis>`            (timed on)
//! - `set_all=<m1>,<m2>,<m3>,0`
//! - `reset`
//! - `blink_time_on=<millis>` / `blink_time_off=<millis>`
//! - `blink_time=<module>,<on>,<off>`
//! - `status` / `test` / `version`
//!
//! ### Responses
//! - `OK`                               acknowledgement
//! - `status=<m1>,<m2>,<m3>[,<flag>...]` status report
//! - anything else                      free text (version, errors)
//!
//! Modules are numbered 1..=3; see [`crate::config::GreenPosition`].

mod command;
mod response;
mod codec;

pub use command::{Command, CommandType, MAX_MILLIS};
pub use response::Response;
pub use codec::{
    encode_command, decode_command, encode_response, decode_response,
    read_command, write_command, read_response, write_response,
    MAX_LINE_LEN,
};
