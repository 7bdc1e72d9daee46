//! Serial link configuration.

use core::time::Duration;

use heapless::String;
use serde::Deserialize;

/// Parity bit setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parity {
    /// No parity bit.
    #[default]
    None,
    /// Even parity.
    Even,
    /// Odd parity.
    Odd,
}

/// Serial port settings for the controller link.
///
/// Defaults match the controller's factory setup: 9600 baud, 8N1, no flow
/// control.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Device path, e.g. `/dev/ttyUSB0` or `COM3`.
    pub port: String<64>,

    /// Line speed.
    pub baud_rate: u32,

    /// Data bits per character (5-8).
    pub data_bits: u8,

    /// Stop bits (1 or 2).
    pub stop_bits: u8,

    /// Parity setting.
    pub parity: Parity,

    /// Hardware (RTS/CTS) flow control.
    pub flow_control: bool,

    /// Upper bound on a single response read, in milliseconds.
    ///
    /// `None` blocks until the controller answers.
    pub read_timeout_ms: Option<u64>,
}

impl SerialConfig {
    /// Device the panel was first wired to.
    pub const DEFAULT_PORT: &'static str = "/dev/tty.usbserial-AI054UCW";

    /// Create a configuration for `port` with all other settings at defaults.
    pub fn for_port(port: &str) -> Self {
        Self {
            port: crate::error::bounded(port),
            ..Self::default()
        }
    }

    /// Read timeout as a duration, `None` meaning no timeout.
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: crate::error::bounded(Self::DEFAULT_PORT),
            baud_rate: 9600,
            data_bits: 8,
            stop_bits: 1,
            parity: Parity::None,
            flow_control: false,
            read_timeout_ms: None,
        }
    }
}
