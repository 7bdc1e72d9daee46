//! Serial port transport (serial feature).

use std::time::Duration;

use crate::config::{Parity, SerialConfig};
use crate::error::{bounded, TransportError};

use super::{IoTransport, Transport};

/// Read timeout used when the configuration asks reads to block.
///
/// The port layer needs a finite value; `i32::MAX` ms is roughly 24 days.
const BLOCKING_READ_TIMEOUT: Duration = Duration::from_millis(i32::MAX as u64);

/// Transport over a physical serial port.
pub struct SerialTransport {
    port_name: String,
    inner: IoTransport<Box<dyn serialport::SerialPort>>,
}

impl SerialTransport {
    /// Open and configure the port described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Open` if the port is unavailable or rejects
    /// the settings.
    pub fn open(config: &SerialConfig) -> Result<Self, TransportError> {
        let data_bits = match config.data_bits {
            5 => serialport::DataBits::Five,
            6 => serialport::DataBits::Six,
            7 => serialport::DataBits::Seven,
            8 => serialport::DataBits::Eight,
            other => {
                return Err(TransportError::Open(bounded(&format!(
                    "invalid data bits: {}",
                    other
                ))))
            }
        };

        let stop_bits = match config.stop_bits {
            1 => serialport::StopBits::One,
            2 => serialport::StopBits::Two,
            other => {
                return Err(TransportError::Open(bounded(&format!(
                    "invalid stop bits: {}",
                    other
                ))))
            }
        };

        let builder = serialport::new(config.port.as_str(), config.baud_rate)
            .data_bits(data_bits)
            .stop_bits(stop_bits)
            .parity(to_serialport_parity(config.parity))
            .flow_control(if config.flow_control {
                serialport::FlowControl::Hardware
            } else {
                serialport::FlowControl::None
            })
            .timeout(config.read_timeout().unwrap_or(BLOCKING_READ_TIMEOUT));

        match builder.open() {
            Ok(port) => {
                log_info!(
                    "opened serial port {} at {} baud",
                    config.port.as_str(),
                    config.baud_rate
                );
                Ok(Self {
                    port_name: config.port.as_str().to_string(),
                    inner: IoTransport::new(port),
                })
            }
            Err(e) => {
                let msg: heapless::String<128> =
                    bounded(&format!("{}: {}", config.port.as_str(), e));
                log_warn!("Failed to open serial port {}", msg.as_str());
                Err(TransportError::Open(msg))
            }
        }
    }

    /// Device path this transport was opened on.
    pub fn port_name(&self) -> &str {
        &self.port_name
    }
}

impl Transport for SerialTransport {
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.inner.write(bytes)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, TransportError> {
        self.inner.read(buf)
    }

    fn close(&mut self) -> Result<(), TransportError> {
        if !self.inner.is_closed() {
            log_info!("closing serial port {}", self.port_name.as_str());
        }
        self.inner.close()
    }
}

/// Names of the serial ports currently present on the system.
///
/// # Errors
///
/// Returns `TransportError::Open` if the platform cannot enumerate ports.
pub fn list_ports() -> Result<Vec<String>, TransportError> {
    serialport::available_ports()
        .map(|ports| ports.into_iter().map(|p| p.port_name).collect())
        .map_err(|e| {
            let msg: heapless::String<128> = bounded(&e.to_string());
            log_warn!("Failed to enumerate serial ports: {}", msg.as_str());
            TransportError::Open(msg)
        })
}

fn to_serialport_parity(parity: Parity) -> serialport::Parity {
    match parity {
        Parity::None => serialport::Parity::None,
        Parity::Even => serialport::Parity::Even,
        Parity::Odd => serialport::Parity::Odd,
    }
}
