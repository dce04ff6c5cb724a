//! Status Tests
//!
//! Tests for lamp state codes, packed status codes and per-module decoding.

use jambel::light::{LampColor, LampState, Status};
use jambel::{GreenPosition, JambelError};

// =============================================================================
// State Code Table Tests
// =============================================================================

#[test]
fn test_state_codes_are_fixed() {
    assert_eq!(LampState::Off.code(), 0);
    assert_eq!(LampState::On.code(), 1);
    assert_eq!(LampState::Blink.code(), 2);
    assert_eq!(LampState::Flash.code(), 3);
}

#[test]
fn test_state_from_code_inverts_code() {
    for state in LampState::ALL {
        assert_eq!(LampState::from_code(state.code()).unwrap(), state);
    }
}

#[test]
fn test_state_from_unknown_code_fails() {
    for code in [4u8, 5, 42, 255] {
        let err = LampState::from_code(code).unwrap_err();
        assert!(err.is_protocol(), "code {} gave {:?}", code, err);
    }
}

#[test]
fn test_state_keywords_parse_case_insensitively() {
    assert_eq!("blink".parse::<LampState>().unwrap(), LampState::Blink);
    assert_eq!("FLASH".parse::<LampState>().unwrap(), LampState::Flash);
    assert!("blink_inverse".parse::<LampState>().is_err());
}

#[test]
fn test_color_ordinals_and_offsets() {
    assert_eq!(LampColor::Red.ordinal(), 0);
    assert_eq!(LampColor::Yellow.ordinal(), 1);
    assert_eq!(LampColor::Green.ordinal(), 2);

    assert_eq!(LampColor::Red.bit_offset(), 0);
    assert_eq!(LampColor::Yellow.bit_offset(), 2);
    assert_eq!(LampColor::Green.bit_offset(), 4);
}

#[test]
fn test_color_parse() {
    assert_eq!("Green".parse::<LampColor>().unwrap(), LampColor::Green);
    assert!(matches!(
        "blue".parse::<LampColor>(),
        Err(JambelError::InvalidArgument(_))
    ));
}

// =============================================================================
// Packed Code Tests
// =============================================================================

#[test]
fn test_code_layout() {
    let status = Status::new(LampState::On, LampState::Blink, LampState::Flash);
    // green=3 << 4 | yellow=2 << 2 | red=1
    assert_eq!(status.code(), 0b11_10_01);
}

#[test]
fn test_all_off_is_zero() {
    assert_eq!(Status::ALL_OFF.code(), 0);
    assert_eq!(Status::from_code(0).unwrap(), Status::ALL_OFF);
}

#[test]
fn test_from_code_inverts_code_for_every_status() {
    for red in LampState::ALL {
        for yellow in LampState::ALL {
            for green in LampState::ALL {
                let status = Status::new(red, yellow, green);
                assert_eq!(Status::from_code(status.code()).unwrap(), status);
            }
        }
    }
}

#[test]
fn test_from_code_is_deterministic() {
    for code in 0u8..64 {
        assert_eq!(Status::from_code(code).unwrap(), Status::from_code(code).unwrap());
    }
}

#[test]
fn test_from_code_rejects_high_bits() {
    for code in [0b0100_0000u8, 0b1000_0000, 0xff] {
        let err = Status::from_code(code).unwrap_err();
        assert!(err.is_protocol());
    }
}

// =============================================================================
// Per-Module Decoding Tests
// =============================================================================

#[test]
fn test_module_codes_green_top() {
    // module 1 = red, module 3 = green
    let status = Status::from_module_codes(&[2, 3, 1], GreenPosition::Top).unwrap();
    assert_eq!(status[LampColor::Red], LampState::Blink);
    assert_eq!(status[LampColor::Yellow], LampState::Flash);
    assert_eq!(status[LampColor::Green], LampState::On);
}

#[test]
fn test_module_codes_green_bottom() {
    // module 1 = green, module 3 = red
    let status = Status::from_module_codes(&[2, 3, 1], GreenPosition::Bottom).unwrap();
    assert_eq!(status[LampColor::Green], LampState::Blink);
    assert_eq!(status[LampColor::Yellow], LampState::Flash);
    assert_eq!(status[LampColor::Red], LampState::On);
}

#[test]
fn test_module_codes_ignore_trailing_flags() {
    let status = Status::from_module_codes(&[0, 0, 0, 1], GreenPosition::Top).unwrap();
    assert_eq!(status, Status::ALL_OFF);
}

#[test]
fn test_module_codes_too_few_fields() {
    let err = Status::from_module_codes(&[0, 0], GreenPosition::Top).unwrap_err();
    assert!(err.is_protocol());
}

#[test]
fn test_module_codes_out_of_range_yellow_fails() {
    // blink-inverse (4) is not a recognised state; must not become OFF
    let err = Status::from_module_codes(&[0, 4, 0], GreenPosition::Top).unwrap_err();
    match err {
        JambelError::Protocol(msg) => assert!(msg.contains("yellow"), "{}", msg),
        other => panic!("Expected protocol error, got {:?}", other),
    }
}

#[test]
fn test_module_codes_round_trip() {
    let status = Status::new(LampState::Off, LampState::Blink, LampState::On);
    for position in [GreenPosition::Top, GreenPosition::Bottom] {
        let codes = status.module_codes(position);
        assert_eq!(Status::from_module_codes(&codes, position).unwrap(), status);
    }
    assert_eq!(status.module_codes(GreenPosition::Top), [0, 2, 1]);
    assert_eq!(status.module_codes(GreenPosition::Bottom), [1, 2, 0]);
}

// =============================================================================
// Accessor Tests
// =============================================================================

#[test]
fn test_with_and_display() {
    let status = Status::ALL_OFF
        .with(LampColor::Green, LampState::On)
        .with(LampColor::Yellow, LampState::Blink);
    assert_eq!(status.to_string(), "red=off yellow=blink green=on");
    assert_eq!(status.iter().count(), 3);
    assert_eq!(Status::PANIC.to_string(), "red=flash yellow=flash green=flash");
}
