//! Configuration validation.

use crate::error::{ConfigError, Error, Result};
use crate::protocol::RESPONSE_BUFFER_LEN;

use super::{SerialConfig, SessionConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks:
/// - Serial port path is set
/// - Baud rate, data bits, and stop bits are usable
/// - Read timeout, if given, is non-zero
/// - Response length fits the response buffer
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    validate_serial(&config.serial)?;
    validate_session(&config.session)?;
    Ok(())
}

fn validate_serial(config: &SerialConfig) -> Result<()> {
    if config.port.trim().is_empty() {
        return Err(Error::Config(ConfigError::EmptyPort));
    }

    if config.baud_rate == 0 {
        return Err(Error::Config(ConfigError::InvalidBaudRate(config.baud_rate)));
    }

    if !(5..=8).contains(&config.data_bits) {
        return Err(Error::Config(ConfigError::InvalidDataBits(config.data_bits)));
    }

    if !matches!(config.stop_bits, 1 | 2) {
        return Err(Error::Config(ConfigError::InvalidStopBits(config.stop_bits)));
    }

    // A zero timeout would make every read return immediately
    if let Some(0) = config.read_timeout_ms {
        return Err(Error::Config(ConfigError::InvalidReadTimeout(0)));
    }

    Ok(())
}

fn validate_session(config: &SessionConfig) -> Result<()> {
    if config.response_len == 0 || config.response_len > RESPONSE_BUFFER_LEN {
        return Err(Error::Config(ConfigError::InvalidResponseLength(
            config.response_len,
        )));
    }

    Ok(())
}
