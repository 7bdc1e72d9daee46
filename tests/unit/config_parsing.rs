//! Unit tests for TOML configuration parsing.

use stage_jog::config::{load_config, parse_config, Parity, SystemConfig};

/// Test parsing a complete serial and session configuration.
#[test]
fn test_parse_full_config() {
    let toml_str = r#"
[serial]
port = "/dev/ttyUSB0"
baud_rate = 19200
data_bits = 7
stop_bits = 2
parity = "even"
flow_control = true
read_timeout_ms = 2000

[session]
require_online = true
lenient_position_parsing = true
settle_after_write_ms = 1000
settle_after_move_ms = 250
response_len = 16
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.serial.port.as_str(), "/dev/ttyUSB0");
    assert_eq!(config.serial.baud_rate, 19200);
    assert_eq!(config.serial.data_bits, 7);
    assert_eq!(config.serial.stop_bits, 2);
    assert_eq!(config.serial.parity, Parity::Even);
    assert!(config.serial.flow_control);
    assert_eq!(config.serial.read_timeout_ms, Some(2000));

    assert!(config.session.require_online);
    assert!(config.session.lenient_position_parsing);
    assert_eq!(config.session.settle_after_write_ms, 1000);
    assert_eq!(config.session.settle_after_move_ms, 250);
    assert_eq!(config.session.response_len, 16);
}

/// Test that omitted keys fall back to the controller's line settings.
#[test]
fn test_partial_config_uses_defaults() {
    let toml_str = r#"
[serial]
port = "COM3"
"#;

    let config = parse_config(toml_str).expect("Failed to parse config");

    assert_eq!(config.serial.port.as_str(), "COM3");
    assert_eq!(config.serial.baud_rate, 9600);
    assert_eq!(config.serial.data_bits, 8);
    assert_eq!(config.serial.stop_bits, 1);
    assert_eq!(config.serial.parity, Parity::None);
    assert!(!config.serial.flow_control);
    assert_eq!(config.serial.read_timeout_ms, None);
    assert_eq!(config.session.settle_after_move_ms, 1000);
    assert_eq!(config.session.response_len, 31);
}

/// Test that an unknown parity name is a parse error.
#[test]
fn test_unknown_parity_rejected() {
    let toml_str = r#"
[serial]
parity = "mark"
"#;

    let result: Result<SystemConfig, _> = toml::from_str(toml_str);
    assert!(result.is_err());
}

/// Test loading a config file from disk.
#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join(format!("stage-jog-{}.toml", std::process::id()));
    std::fs::write(&path, "[session]\nrequire_online = true\n").expect("Failed to write fixture");

    let config = load_config(&path).expect("Failed to load config");
    let _ = std::fs::remove_file(&path);

    assert!(config.session.require_online);
    assert_eq!(config.serial, SystemConfig::default().serial);
}
