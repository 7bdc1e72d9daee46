//! Device session behavior settings.

use serde::Deserialize;

/// How a [`DeviceSession`](crate::session::DeviceSession) sequences actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Refuse device actions until `online()` has been sent.
    pub require_online: bool,

    /// Parse position replies atoi-style (non-numeric becomes 0) instead of
    /// failing with a parse error.
    pub lenient_position_parsing: bool,

    /// Pause after every command write, in milliseconds.
    pub settle_after_write_ms: u32,

    /// Additional pause after a jog move, in milliseconds.
    ///
    /// Moves are not acknowledged, so this is the only wait for motion to
    /// finish before the next action.
    pub settle_after_move_ms: u32,

    /// Bytes requested per blocking response read.
    pub response_len: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            require_online: false,
            lenient_position_parsing: false,
            settle_after_write_ms: 0,
            settle_after_move_ms: 1000,
            response_len: crate::protocol::RESPONSE_BUFFER_LEN - 1,
        }
    }
}
