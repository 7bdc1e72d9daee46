//! Controller response parsing.
//!
//! Responses carry no terminator and arrive as whatever a single fixed-size
//! read returned, so parsers trim padding before interpreting the payload.

use core::fmt;

use crate::config::units::{steps_to_mm, Millimeters, Steps};
use crate::error::{bounded, ParseError};

/// Run status reported for the `V` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceStatus {
    /// Controller is executing a program (`R`)
    Running,
    /// Controller is busy (`B`)
    Busy,
    /// Anything else, including an empty reply
    Jog,
}

impl DeviceStatus {
    /// Display name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Busy => "Busy",
            Self::Jog => "Jog",
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status line as shown on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReport(pub DeviceStatus);

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Motor Status: {}", self.0)
    }
}

/// Stage position assembled from the two register queries.
///
/// `x_mm` comes from the `Y` register and `y_mm` from the `Z` register.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StagePosition {
    /// Reading labelled "X"
    pub x_mm: Millimeters,
    /// Reading labelled "Y"
    pub y_mm: Millimeters,
}

impl StagePosition {
    /// Build from raw register values in query order.
    pub fn from_registers(y_register: Steps, z_register: Steps) -> Self {
        Self {
            x_mm: steps_to_mm(y_register),
            y_mm: steps_to_mm(z_register),
        }
    }
}

impl fmt::Display for StagePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X Position: {:.2} mm; Y Position: {:.2} mm; ",
            self.x_mm.0, self.y_mm.0
        )
    }
}

fn is_padding(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\0'
}

/// Interpret a status reply.
///
/// Only the first whitespace-separated token is considered; it must be
/// exactly `R` or `B`. Everything else, including empty or non-UTF-8 input,
/// is `Jog`.
pub fn parse_status(raw: &[u8]) -> DeviceStatus {
    let text = match core::str::from_utf8(raw) {
        Ok(text) => text,
        Err(_) => return DeviceStatus::Jog,
    };

    match text.split(is_padding).find(|token| !token.is_empty()) {
        Some("R") => DeviceStatus::Running,
        Some("B") => DeviceStatus::Busy,
        _ => DeviceStatus::Jog,
    }
}

/// Interpret a position register reply as a signed step count.
///
/// # Errors
///
/// Returns `ParseError::Empty` when only padding was read,
/// `ParseError::NotUtf8` for binary noise, and `ParseError::NotAnInteger`
/// for anything that is not a plain signed integer.
pub fn parse_position(raw: &[u8]) -> Result<Steps, ParseError> {
    let text = core::str::from_utf8(raw).map_err(|_| ParseError::NotUtf8)?;
    let trimmed = text.trim_matches(is_padding);
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    trimmed
        .parse::<i64>()
        .map(Steps)
        .map_err(|_| ParseError::NotAnInteger(bounded(trimmed)))
}

/// Interpret a position register reply the permissive way.
///
/// Skips leading whitespace, accepts an optional sign, then reads digits
/// until the first non-digit. No digits yields 0; values beyond the step
/// range saturate. Garbage is indistinguishable from a zero position, so
/// prefer [`parse_position`].
pub fn parse_position_lenient(raw: &[u8]) -> Steps {
    let mut bytes = raw
        .iter()
        .copied()
        .skip_while(|b| b.is_ascii_whitespace())
        .peekable();

    let negative = match bytes.peek() {
        Some(b'-') => {
            bytes.next();
            true
        }
        Some(b'+') => {
            bytes.next();
            false
        }
        _ => false,
    };

    let mut value: i64 = 0;
    for b in bytes.take_while(u8::is_ascii_digit) {
        let digit = i64::from(b - b'0');
        value = value.saturating_mul(10);
        value = if negative {
            value.saturating_sub(digit)
        } else {
            value.saturating_add(digit)
        };
    }

    Steps(value)
}
