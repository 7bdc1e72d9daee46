//! Session module for stage-jog.
//!
//! Sequences "send command, then read reply" over an owned transport, with
//! one operation per panel action.

mod device;
mod state;

pub use device::DeviceSession;
pub use state::SessionState;
