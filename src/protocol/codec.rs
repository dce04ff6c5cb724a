//! Protocol codec
//!
//! Encoding and decoding functions for the line protocol.
//!
//! ## Wire Format
//! ```text
//! client ──► "set=3,blink\n"
//! device ◄── "OK\r\n"
//!
//! client ──► "status\n"
//! device ◄── "status=1,0,2,0\r\n"
//! ```
//!
//! Every encoder returns the line without its terminator; the stream helpers
//! add and strip terminators.

use std::io::{BufRead, Read, Write};

use crate::error::{JambelError, Result};
use crate::light::LampState;
use super::{Command, CommandType, Response};

/// Longest line accepted from a peer, terminator included
pub const MAX_LINE_LEN: usize = 1024;

/// Terminator for request lines
const REQUEST_TERMINATOR: &str = "\n";

/// Terminator for response lines
const RESPONSE_TERMINATOR: &str = "\r\n";

/// Acknowledgement keyword
const ACK: &str = "OK";

/// Prefix of a status report
const STATUS_PREFIX: &str = "status=";

/// Leading fields of a status report or `set_all` that carry module codes
const MODULE_FIELDS: usize = 3;

// =============================================================================
// Command Encoding/Decoding
// =============================================================================

/// Encode a command to its request line
pub fn encode_command(command: &Command) -> String {
    let keyword = command.command_type().keyword();

    match command {
        Command::Set { module, state } => format!("{}={},{}", keyword, module, state.keyword()),
        Command::SetTimed { module, millis } => format!("{}={},{}", keyword, module, millis),
        Command::SetAll { codes } => {
            format!("{}={},{},{},0", keyword, codes[0], codes[1], codes[2])
        }
        Command::BlinkTimeOn { millis } | Command::BlinkTimeOff { millis } => {
            format!("{}={}", keyword, millis)
        }
        Command::BlinkTime {
            module,
            on_millis,
            off_millis,
        } => format!("{}={},{},{}", keyword, module, on_millis, off_millis),
        Command::Reset | Command::Status | Command::Test | Command::Version => keyword.to_string(),
    }
}

/// Decode a request line into a command
pub fn decode_command(line: &str) -> Result<Command> {
    let line = line.trim();
    let (keyword, args) = match line.split_once('=') {
        Some((keyword, args)) => (keyword, Some(args)),
        None => (line, None),
    };

    match (keyword, args) {
        ("reset", None) => Ok(Command::Reset),
        ("status", None) => Ok(Command::Status),
        ("test", None) => Ok(Command::Test),
        ("version", None) => Ok(Command::Version),
        ("set", Some(args)) => decode_set_command(args),
        ("set_all", Some(args)) => decode_set_all_command(args),
        ("blink_time_on", Some(args)) => Ok(Command::BlinkTimeOn {
            millis: parse_number(args, "blink_time_on")?,
        }),
        ("blink_time_off", Some(args)) => Ok(Command::BlinkTimeOff {
            millis: parse_number(args, "blink_time_off")?,
        }),
        ("blink_time", Some(args)) => decode_blink_time_command(args),
        _ => Err(JambelError::Protocol(format!("Unknown command: {:?}", line))),
    }
}

/// Decode `set=<module>,<keyword|millis>` arguments
fn decode_set_command(args: &str) -> Result<Command> {
    let (module, action) = args.split_once(',').ok_or_else(|| {
        JambelError::Protocol(format!("set command: expected MODULE,ACTION, got {:?}", args))
    })?;
    let module = parse_module(module, CommandType::Set)?;

    if let Ok(state) = action.parse::<LampState>() {
        return Ok(Command::Set { module, state });
    }

    let millis = parse_number(action, "set")?;
    Ok(Command::SetTimed { module, millis })
}

/// Decode `set_all=<m1>,<m2>,<m3>,<flag>` arguments
fn decode_set_all_command(args: &str) -> Result<Command> {
    let (modules, _flags) = parse_module_fields(args)?;
    match modules.as_slice() {
        &[m1, m2, m3] => Ok(Command::SetAll { codes: [m1, m2, m3] }),
        _ => Err(JambelError::Protocol(format!(
            "set_all command: expected at least {} fields, got {}",
            MODULE_FIELDS,
            modules.len()
        ))),
    }
}

/// Decode `blink_time=<module>,<on>,<off>` arguments
fn decode_blink_time_command(args: &str) -> Result<Command> {
    let parts: Vec<&str> = args.split(',').collect();
    match parts.as_slice() {
        [module, on, off] => Ok(Command::BlinkTime {
            module: parse_module(module, CommandType::BlinkTime)?,
            on_millis: parse_number(on, "blink_time")?,
            off_millis: parse_number(off, "blink_time")?,
        }),
        _ => Err(JambelError::Protocol(format!(
            "blink_time command: expected MODULE,ON,OFF, got {:?}",
            args
        ))),
    }
}

fn parse_module(value: &str, command: CommandType) -> Result<u8> {
    match value.trim().parse::<u8>() {
        Ok(module @ 1..=3) => Ok(module),
        _ => Err(JambelError::Protocol(format!(
            "{} command: invalid module {:?}",
            command.keyword(),
            value
        ))),
    }
}

fn parse_number(value: &str, context: &str) -> Result<u32> {
    value.trim().parse::<u32>().map_err(|_| {
        JambelError::Protocol(format!("{} command: invalid number {:?}", context, value))
    })
}

/// Split a comma-separated list of decimal fields into module codes and
/// trailing flags
///
/// The first three fields must fit a `u8`; later fields only need to be
/// decimal digits and are returned as text.
fn parse_module_fields(values: &str) -> Result<(Vec<u8>, Vec<String>)> {
    let mut modules = Vec::with_capacity(MODULE_FIELDS);
    let mut flags = Vec::new();

    for (i, field) in values.split(',').enumerate() {
        let field = field.trim();
        if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
            return Err(JambelError::Protocol(format!(
                "Expected a decimal field, got {:?}",
                field
            )));
        }

        if i < MODULE_FIELDS {
            let code = field.parse::<u8>().map_err(|_| {
                JambelError::Protocol(format!("Module field out of range: {}", field))
            })?;
            modules.push(code);
        } else {
            flags.push(field.to_string());
        }
    }

    Ok((modules, flags))
}

// =============================================================================
// Response Encoding/Decoding
// =============================================================================

/// Encode a response to its line
pub fn encode_response(response: &Response) -> String {
    match response {
        Response::Ok => ACK.to_string(),
        Response::Status { modules, flags } => {
            let fields: Vec<String> = modules
                .iter()
                .map(|m| m.to_string())
                .chain(flags.iter().cloned())
                .collect();
            format!("{}{}", STATUS_PREFIX, fields.join(","))
        }
        Response::Text(text) => text.clone(),
    }
}

/// Decode a response line
///
/// A line that claims to be a status report but is malformed is an error;
/// any other unrecognized line is returned as text.
pub fn decode_response(line: &str) -> Result<Response> {
    let line = line.trim();

    if line.eq_ignore_ascii_case(ACK) {
        return Ok(Response::Ok);
    }

    if let Some(values) = line.strip_prefix(STATUS_PREFIX) {
        let (modules, flags) = parse_module_fields(values).map_err(|e| match e {
            JambelError::Protocol(reason) => {
                JambelError::Protocol(format!("Malformed status {:?}: {}", line, reason))
            }
            other => other,
        })?;
        return Ok(Response::Status { modules, flags });
    }

    Ok(Response::Text(line.to_string()))
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read one `\n`-terminated line
///
/// The peer closing the stream before a terminator is a communication
/// failure; an overlong or non-UTF-8 line is a protocol failure.
fn read_line<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut buf = Vec::new();
    reader
        .take(MAX_LINE_LEN as u64)
        .read_until(b'\n', &mut buf)?;

    if buf.last() != Some(&b'\n') {
        if buf.len() >= MAX_LINE_LEN {
            return Err(JambelError::Protocol(format!(
                "Line exceeds {} bytes",
                MAX_LINE_LEN
            )));
        }
        return Err(JambelError::Communication(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!("connection closed after {} bytes without a line end", buf.len()),
        )));
    }

    tracing::trace!("Read raw line {:?}", String::from_utf8_lossy(&buf));

    let line = String::from_utf8(buf)
        .map_err(|_| JambelError::Protocol("Line is not valid UTF-8".to_string()))?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn write_line<W: Write>(writer: &mut W, line: &str, terminator: &str) -> Result<()> {
    writer.write_all(line.as_bytes())?;
    writer.write_all(terminator.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Read a complete command from a stream
pub fn read_command<R: BufRead>(reader: &mut R) -> Result<Command> {
    let line = read_line(reader)?;
    decode_command(&line)
}

/// Write a command to a stream
pub fn write_command<W: Write>(writer: &mut W, command: &Command) -> Result<()> {
    write_line(writer, &encode_command(command), REQUEST_TERMINATOR)
}

/// Read a complete response from a stream
pub fn read_response<R: BufRead>(reader: &mut R) -> Result<Response> {
    let line = read_line(reader)?;
    decode_response(&line)
}

/// Write a response to a stream
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<()> {
    write_line(writer, &encode_response(response), RESPONSE_TERMINATOR)
}
