//! Integration tests for stage-jog.
//!
//! These tests drive a full session against the in-memory transport, from
//! TOML configuration through startup, jogging, queries, and shutdown.

use embedded_hal_mock::eh1::delay::NoopDelay;
use stage_jog::error::{Error, ParseError, SessionError, TransportError};
use stage_jog::{
    parse_config, DeviceSession, DeviceStatus, Millimeters, MockTransport, SessionState,
    StagePosition, StatusReport, Steps,
};

// =============================================================================
// Test configuration data
// =============================================================================

const PANEL_CONFIG: &str = r#"
[serial]
port = "/dev/tty.usbserial-AI054UCW"

[session]
settle_after_move_ms = 0
"#;

const GUARDED_CONFIG: &str = r#"
[session]
require_online = true
settle_after_move_ms = 0
"#;

fn open_session<'a>(
    mock: &'a mut MockTransport,
    toml_str: &str,
) -> DeviceSession<&'a mut MockTransport, NoopDelay> {
    let config = parse_config(toml_str).expect("Should parse config");
    DeviceSession::open(mock, NoopDelay::new(), config.session)
}

// =============================================================================
// Panel workflow
// =============================================================================

#[test]
fn panel_session_full_workflow() {
    let mut mock = MockTransport::new()
        .with_reply("R")
        .with_reply("-400")
        .with_reply("1000");
    {
        let mut session = open_session(&mut mock, PANEL_CONFIG);

        session.start_up().unwrap();
        session.move_left(Millimeters(400.0)).unwrap();
        session.move_right(Millimeters(1.0)).unwrap();
        session.move_up(Millimeters(0.004)).unwrap();
        session.move_down(Millimeters(0.004)).unwrap();
        session.set_zero().unwrap();
        session.start_limit().unwrap();
        session.end_limit().unwrap();

        let status = session.get_status().unwrap();
        assert_eq!(StatusReport(status).to_string(), "Motor Status: Running");

        let position = session.get_position().unwrap();
        assert_eq!(
            position.to_string(),
            "X Position: 1.00 mm; Y Position: -2.50 mm; "
        );

        session.clear().unwrap();
        session.kill().unwrap();
        session.shut_down().unwrap();
    }

    assert_eq!(
        mock.sent(),
        [
            "F",
            "setM1M4, setM2M5, setM3M4",
            "C, I2M160000, R",
            "C, I2M-400, R",
            "C, (,I3M-2, I1M-2,), R",
            "C, (,I3M1, I1M1,), R",
            "N",
            "C, (, I3M0, I1M0,), R",
            "C, (, I3M-0, I1M-0,), R",
            "V",
            "Y",
            "Z",
            "C",
            "K",
            "Q",
        ]
    );
    assert!(mock.is_closed());
}

#[test]
fn position_is_two_round_trips_y_then_z() {
    let mut mock = MockTransport::new().with_reply("0").with_reply("-1234");
    let mut session = open_session(&mut mock, PANEL_CONFIG);

    let position = session.get_position().unwrap();

    assert_eq!(session.transport().sent(), ["Y", "Z"]);
    assert_eq!(session.transport().pending_replies(), 0);
    assert_eq!(position, StagePosition::from_registers(Steps(0), Steps(-1234)));
    assert!((position.y_mm.0 - 3.085).abs() < 1e-9);
}

// =============================================================================
// Failed actions leave displayed state unchanged
// =============================================================================

#[test]
fn write_failure_surfaces_and_keeps_state() {
    let mut mock = MockTransport::new().with_reply("B").with_reply("4").with_reply("8");
    let mut session = open_session(&mut mock, PANEL_CONFIG);

    session.online().unwrap();
    let status = session.get_status().unwrap();
    let position = session.get_position().unwrap();

    session.transport_mut().fail_writes(true);

    let err = session.get_status().unwrap_err();
    assert!(matches!(err, Error::Transport(TransportError::Write(_))));
    let err = session.get_position().unwrap_err();
    assert!(err.is_transport());
    let err = session.offline().unwrap_err();
    assert!(err.is_transport());
    assert!(session.move_left(Millimeters(1.0)).unwrap_err().is_transport());

    assert_eq!(session.state(), SessionState::Online);
    assert_eq!(session.last_status(), Some(status));
    assert_eq!(session.last_position(), Some(position));
}

#[test]
fn unparseable_second_register_keeps_position() {
    let mut mock = MockTransport::new().with_reply("10").with_reply("20");
    let mut session = open_session(&mut mock, PANEL_CONFIG);
    let first = session.get_position().unwrap();

    session.transport_mut().push_reply("30");
    session.transport_mut().push_reply("not a number");
    let err = session.get_position().unwrap_err();

    assert!(matches!(err, Error::Parse(ParseError::NotAnInteger(_))));
    assert_eq!(session.last_position(), Some(first));
}

#[test]
fn silent_controller_reads_as_jog_but_empty_position_fails() {
    let mut mock = MockTransport::new();
    let mut session = open_session(&mut mock, PANEL_CONFIG);

    assert_eq!(session.get_status().unwrap(), DeviceStatus::Jog);
    assert!(matches!(
        session.get_position(),
        Err(Error::Parse(ParseError::Empty))
    ));
}

// =============================================================================
// Online guard
// =============================================================================

#[test]
fn guarded_session_refuses_actions_until_online() {
    let mut mock = MockTransport::new().with_reply("B");
    let mut session = open_session(&mut mock, GUARDED_CONFIG);

    assert_eq!(
        session.move_up(Millimeters(1.0)),
        Err(Error::Session(SessionError::NotOnline))
    );
    assert!(session.get_status().is_err());
    assert!(session.transport().sent().is_empty());

    session.start_up().unwrap();
    assert_eq!(session.get_status().unwrap(), DeviceStatus::Busy);

    session.offline().unwrap();
    assert!(session.set_zero().is_err());
    assert_eq!(
        session.transport().sent(),
        ["F", "setM1M4, setM2M5, setM3M4", "V", "Q"]
    );
}

#[test]
fn unguarded_session_allows_actions_while_offline() {
    let mut mock = MockTransport::new();
    let mut session = open_session(&mut mock, PANEL_CONFIG);

    assert_eq!(session.state(), SessionState::Offline);
    session.kill().unwrap();
    assert_eq!(session.transport().sent(), ["K"]);
}

// =============================================================================
// Operator input
// =============================================================================

#[test]
fn operator_text_is_parsed_before_sending() {
    let mut mock = MockTransport::new();
    let mut session = open_session(&mut mock, PANEL_CONFIG);

    let distance = Millimeters::parse("2.5").unwrap();
    session.move_down(distance).unwrap();
    assert!(Millimeters::parse("two").is_err());

    assert_eq!(session.transport().sent(), ["C, (,I3M1000, I1M1000,), R"]);
}
