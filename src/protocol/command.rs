//! Controller command strings.
//!
//! Every user action maps to exactly one ASCII command. Building a command
//! never touches the device; delivery is the transport's job.

use core::fmt::{self, Write};

use crate::config::units::{mm_to_steps, Millimeters, RoundingMode, Steps};
use crate::error::InputError;

/// Longest command the builder can produce.
pub const MAX_COMMAND_LEN: usize = 64;

/// An encoded command, without the line terminator.
pub type CommandString = heapless::String<MAX_COMMAND_LEN>;

/// Position register queried by a position request.
///
/// The panel shows the `Y` register as its "X" reading and the `Z` register
/// as its "Y" reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PositionRegister {
    /// Queried with `Y`, displayed as "X"
    Y,
    /// Queried with `Z`, displayed as "Y"
    Z,
}

impl PositionRegister {
    /// Registers in the order they are queried.
    pub const QUERY_ORDER: [Self; 2] = [Self::Y, Self::Z];

    /// Command letter sent to the controller.
    pub const fn command(self) -> &'static str {
        match self {
            Self::Y => "Y",
            Self::Z => "Z",
        }
    }

    /// Axis label used when the reading is displayed.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Y => "X",
            Self::Z => "Y",
        }
    }
}

/// One controller command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisCommand {
    /// Raise the stage on motors 1 and 3
    MoveUp(Steps),
    /// Lower the stage on motors 1 and 3
    MoveDown(Steps),
    /// Move motor 2 toward its positive end
    MoveLeft(Steps),
    /// Move motor 2 toward its negative end
    MoveRight(Steps),
    /// Declare the current position as zero
    SetZero,
    /// Drive motors 1 and 3 to their start limit switches
    StartLimit,
    /// Drive motors 1 and 3 to their end limit switches
    EndLimit,
    /// Request the single-character run status
    GetStatus,
    /// Request one position register
    GetPosition(PositionRegister),
    /// Clear the current program
    Clear,
    /// Abort motion
    Kill,
    /// Put the controller online (host mode)
    Online,
    /// Return the controller to local mode
    Offline,
    /// Select motor types
    SetMotors,
}

impl AxisCommand {
    /// Upward move; rounds half up.
    pub fn move_up(distance: Millimeters) -> Result<Self, InputError> {
        Ok(Self::MoveUp(mm_to_steps(distance, Self::rounding_for_up())?))
    }

    /// Downward move; truncates.
    pub fn move_down(distance: Millimeters) -> Result<Self, InputError> {
        Ok(Self::MoveDown(mm_to_steps(distance, RoundingMode::Truncate)?))
    }

    /// Leftward move; truncates.
    pub fn move_left(distance: Millimeters) -> Result<Self, InputError> {
        Ok(Self::MoveLeft(mm_to_steps(distance, RoundingMode::Truncate)?))
    }

    /// Rightward move; truncates.
    pub fn move_right(distance: Millimeters) -> Result<Self, InputError> {
        Ok(Self::MoveRight(mm_to_steps(distance, RoundingMode::Truncate)?))
    }

    /// Rounding applied to upward moves, the only move that does not truncate.
    #[inline]
    pub const fn rounding_for_up() -> RoundingMode {
        RoundingMode::NearestHalfUp
    }

    /// Encode as the ASCII command string.
    pub fn encode(&self) -> CommandString {
        let mut out = CommandString::new();
        // The longest variant is 60 bytes with two i64::MIN step counts
        let _ = write!(out, "{}", self);
        out
    }
}

impl fmt::Display for AxisCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoveUp(steps) => {
                write!(f, "C, (,I3M-{}, I1M-{},), R", steps.0, steps.0)
            }
            Self::MoveDown(steps) => write!(f, "C, (,I3M{}, I1M{},), R", steps.0, steps.0),
            Self::MoveLeft(steps) => write!(f, "C, I2M{}, R", steps.0),
            Self::MoveRight(steps) => write!(f, "C, I2M-{}, R", steps.0),
            Self::SetZero => f.write_str("N"),
            Self::StartLimit => f.write_str("C, (, I3M0, I1M0,), R"),
            Self::EndLimit => f.write_str("C, (, I3M-0, I1M-0,), R"),
            Self::GetStatus => f.write_str("V"),
            Self::GetPosition(register) => f.write_str(register.command()),
            Self::Clear => f.write_str("C"),
            Self::Kill => f.write_str("K"),
            Self::Online => f.write_str("F"),
            Self::Offline => f.write_str("Q"),
            Self::SetMotors => f.write_str("setM1M4, setM2M5, setM3M4"),
        }
    }
}
