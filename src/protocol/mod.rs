//! Protocol module for stage-jog.
//!
//! ASCII command encoding, line framing, and response parsing for the
//! stage's motion controller.

mod command;
mod response;

pub use command::{AxisCommand, CommandString, PositionRegister, MAX_COMMAND_LEN};
pub use response::{
    parse_position, parse_position_lenient, parse_status, DeviceStatus, StagePosition,
    StatusReport,
};

/// Line terminator appended to every command before transmission.
pub const TERMINATOR: &[u8] = b"\r\n";

/// Size of the buffer a single response read fills.
pub const RESPONSE_BUFFER_LEN: usize = 32;

/// A command followed by [`TERMINATOR`], ready to write.
pub type Frame = heapless::Vec<u8, { MAX_COMMAND_LEN + 2 }>;

/// Append the line terminator to an encoded command.
pub fn frame_command(command: &CommandString) -> Frame {
    let mut frame = Frame::new();
    // CommandString is bounded by MAX_COMMAND_LEN, so both halves always fit
    let _ = frame.extend_from_slice(command.as_bytes());
    let _ = frame.extend_from_slice(TERMINATOR);
    frame
}
