//! Codec Tests
//!
//! Tests for request and response line encoding/decoding.

use std::io::Cursor;

use jambel::light::LampState;
use jambel::protocol::{
    Command, Response,
    encode_command, decode_command,
    encode_response, decode_response,
    read_command, write_command,
    read_response, write_response,
    MAX_LINE_LEN,
};
use jambel::JambelError;

// =============================================================================
// Command Encoding Tests
// =============================================================================

#[test]
fn test_encode_set() {
    let cmd = Command::Set {
        module: 1,
        state: LampState::On,
    };
    assert_eq!(encode_command(&cmd), "set=1,on");

    let cmd = Command::Set {
        module: 3,
        state: LampState::Blink,
    };
    assert_eq!(encode_command(&cmd), "set=3,blink");
}

#[test]
fn test_encode_set_distinguishes_every_state() {
    let lines: Vec<String> = LampState::ALL
        .into_iter()
        .map(|state| encode_command(&Command::Set { module: 2, state }))
        .collect();
    assert_eq!(lines, ["set=2,off", "set=2,on", "set=2,blink", "set=2,flash"]);
}

#[test]
fn test_encode_timed_and_timing_commands() {
    assert_eq!(
        encode_command(&Command::SetTimed { module: 1, millis: 1000 }),
        "set=1,1000"
    );
    assert_eq!(
        encode_command(&Command::BlinkTime {
            module: 1,
            on_millis: 234,
            off_millis: 567
        }),
        "blink_time=1,234,567"
    );
    assert_eq!(
        encode_command(&Command::BlinkTimeOn { millis: 123 }),
        "blink_time_on=123"
    );
    assert_eq!(
        encode_command(&Command::BlinkTimeOff { millis: 567 }),
        "blink_time_off=567"
    );
}

#[test]
fn test_encode_set_all_appends_flag() {
    let cmd = Command::SetAll { codes: [3, 3, 3] };
    assert_eq!(encode_command(&cmd), "set_all=3,3,3,0");
}

#[test]
fn test_encode_bare_commands() {
    assert_eq!(encode_command(&Command::Status), "status");
    assert_eq!(encode_command(&Command::Reset), "reset");
    assert_eq!(encode_command(&Command::Test), "test");
    assert_eq!(encode_command(&Command::Version), "version");
}

// =============================================================================
// Command Decoding Tests
// =============================================================================

#[test]
fn test_decode_set_keyword_and_timed() {
    assert_eq!(
        decode_command("set=2,flash").unwrap(),
        Command::Set {
            module: 2,
            state: LampState::Flash
        }
    );
    assert_eq!(
        decode_command("set=3,65000\n").unwrap(),
        Command::SetTimed {
            module: 3,
            millis: 65000
        }
    );
}

#[test]
fn test_decode_set_all_ignores_flag() {
    assert_eq!(
        decode_command("set_all=1,2,3,0").unwrap(),
        Command::SetAll { codes: [1, 2, 3] }
    );
}

#[test]
fn test_decode_rejects_bad_commands() {
    for line in [
        "",
        "bork",
        "status=1",
        "set=4,on",
        "set=0,on",
        "set=1",
        "set=1,blink_invers",
        "set_all=1,2",
        "blink_time=1,2",
        "blink_time_on=abc",
    ] {
        let result = decode_command(line);
        assert!(
            matches!(result, Err(JambelError::Protocol(_))),
            "{:?} gave {:?}",
            line,
            result
        );
    }
}

// =============================================================================
// Response Tests
// =============================================================================

#[test]
fn test_decode_ack() {
    assert_eq!(decode_response("OK\r\n").unwrap(), Response::Ok);
    assert_eq!(decode_response("ok").unwrap(), Response::Ok);
}

#[test]
fn test_decode_status() {
    assert_eq!(
        decode_response("status=0,0,0,1\r\n").unwrap(),
        Response::Status {
            modules: vec![0, 0, 0],
            flags: vec!["1".to_string()],
        }
    );
}

#[test]
fn test_decode_status_keeps_large_flags() {
    assert_eq!(
        decode_response("status=1,0,2,300,18446744073709551616\r\n").unwrap(),
        Response::Status {
            modules: vec![1, 0, 2],
            flags: vec!["300".to_string(), "18446744073709551616".to_string()],
        }
    );
}

#[test]
fn test_decode_status_rejects_non_numeric_flag() {
    let result = decode_response("status=1,0,2,x");
    assert!(matches!(result, Err(JambelError::Protocol(_))), "{:?}", result);
}

#[test]
fn test_malformed_status_message_is_not_nested() {
    match decode_response("status=1,2,300") {
        Err(JambelError::Protocol(msg)) => {
            assert!(msg.contains("status=1,2,300"), "{}", msg);
            assert!(!msg.contains("Protocol error"), "{}", msg);
        }
        other => panic!("Expected protocol error, got {:?}", other),
    }
}

#[test]
fn test_decode_malformed_status_fails() {
    for line in ["status=", "status=1,,2", "status=1,x,2", "status=1,2,300"] {
        let result = decode_response(line);
        assert!(
            matches!(result, Err(JambelError::Protocol(_))),
            "{:?} gave {:?}",
            line,
            result
        );
    }
}

#[test]
fn test_decode_truncated_token_is_text() {
    // Seen from real devices: the "status=" prefix missing entirely
    assert_eq!(
        decode_response(",0,0\r\n").unwrap(),
        Response::Text(",0,0".to_string())
    );
}

#[test]
fn test_encode_responses() {
    assert_eq!(encode_response(&Response::Ok), "OK");
    assert_eq!(encode_response(&Response::status(&[2, 3, 1], &[0])), "status=2,3,1,0");
    assert_eq!(encode_response(&Response::error("nope")), "ERROR nope");
}

// =============================================================================
// Stream Tests
// =============================================================================

#[test]
fn test_write_command_terminates_with_newline() {
    let mut buf = Vec::new();
    write_command(&mut buf, &Command::Status).unwrap();
    assert_eq!(buf, b"status\n");
}

#[test]
fn test_write_response_terminates_with_crlf() {
    let mut buf = Vec::new();
    write_response(&mut buf, &Response::Ok).unwrap();
    assert_eq!(buf, b"OK\r\n");
}

#[test]
fn test_read_command_from_stream() {
    let mut cursor = Cursor::new(b"set=1,on\nreset\n".to_vec());
    assert_eq!(
        read_command(&mut cursor).unwrap(),
        Command::Set {
            module: 1,
            state: LampState::On
        }
    );
    assert_eq!(read_command(&mut cursor).unwrap(), Command::Reset);
}

#[test]
fn test_read_response_from_stream() {
    let mut cursor = Cursor::new(b"status=1,2,3,0\r\n".to_vec());
    assert_eq!(
        read_response(&mut cursor).unwrap(),
        Response::status(&[1, 2, 3], &[0])
    );
}

#[test]
fn test_read_response_without_line_end_is_communication_error() {
    let mut cursor = Cursor::new(b"status=1,2".to_vec());
    let err = read_response(&mut cursor).unwrap_err();
    assert!(err.is_communication(), "{:?}", err);

    let mut empty = Cursor::new(Vec::new());
    assert!(read_response(&mut empty).unwrap_err().is_communication());
}

#[test]
fn test_read_response_rejects_overlong_line() {
    let mut cursor = Cursor::new(vec![b'1'; MAX_LINE_LEN * 2]);
    let err = read_response(&mut cursor).unwrap_err();
    assert!(err.is_protocol(), "{:?}", err);
}
