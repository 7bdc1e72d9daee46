//! Unit tests for configuration validation.

use stage_jog::config::{validate_config, SystemConfig};
use stage_jog::error::{ConfigError, Error};

fn parse(toml_str: &str) -> SystemConfig {
    toml::from_str(toml_str).expect("Failed to parse TOML")
}

/// Test validation of the default configuration.
#[test]
fn test_default_config_passes_validation() {
    assert!(validate_config(&SystemConfig::default()).is_ok());
}

/// Test validation of an explicit, valid configuration.
#[test]
fn test_valid_config_passes_validation() {
    let config = parse(
        r#"
[serial]
port = "/dev/ttyS0"
baud_rate = 115200
data_bits = 5
stop_bits = 2
read_timeout_ms = 1

[session]
response_len = 32
"#,
    );
    assert!(validate_config(&config).is_ok());
}

/// Test validation fails for a blank port path.
#[test]
fn test_blank_port_rejected() {
    let config = parse("[serial]\nport = \"   \"\n");
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::EmptyPort))
    ));
}

/// Test validation fails for a zero baud rate.
#[test]
fn test_zero_baud_rate_rejected() {
    let config = parse("[serial]\nbaud_rate = 0\n");
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidBaudRate(0)))
    ));
}

/// Test validation fails for out-of-range frame settings.
#[test]
fn test_frame_settings_rejected() {
    let config = parse("[serial]\ndata_bits = 4\n");
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidDataBits(4)))
    ));

    let config = parse("[serial]\nstop_bits = 0\n");
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidStopBits(0)))
    ));
}

/// Test validation fails for a zero read timeout.
#[test]
fn test_zero_timeout_rejected() {
    let config = parse("[serial]\nread_timeout_ms = 0\n");
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidReadTimeout(0)))
    ));
}

/// Test validation fails for a response length outside the read buffer.
#[test]
fn test_response_len_bounds() {
    for len in [0usize, 33] {
        let config = parse(&format!("[session]\nresponse_len = {}\n", len));
        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidResponseLength(l))) if l == len
        ));
    }
}
