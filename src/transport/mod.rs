//! Transport module for stage-jog.
//!
//! The session's only collaborator: something that can write command frames,
//! perform a blocking read, and be closed. Opening is each transport's own
//! constructor because the parameters differ per link.

#[cfg(feature = "std")]
mod io;
#[cfg(feature = "std")]
mod mock;
#[cfg(feature = "serial")]
mod serial;

#[cfg(feature = "std")]
pub use io::IoTransport;
#[cfg(feature = "std")]
pub use mock::MockTransport;
#[cfg(feature = "serial")]
pub use serial::{list_ports, SerialTransport};

use crate::error::TransportError;
use crate::protocol::{frame_command, CommandString};

/// Byte link to the motion controller.
pub trait Transport {
    /// Write all of `bytes`. A short write is an error.
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError>;

    /// Perform one blocking read into `buf`, returning the byte count.
    ///
    /// Returns as soon as any data is available, or zero at end of stream;
    /// callers do not loop. A link with a read timeout reports expiry as
    /// `TransportError::Read`.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, TransportError>;

    /// Release the link. Closing twice is a no-op.
    fn close(&mut self) -> Result<(), TransportError>;

    /// Write `command` followed by the line terminator.
    fn send_command(&mut self, command: &CommandString) -> Result<(), TransportError> {
        self.write(&frame_command(command))
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        (**self).write(bytes)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, TransportError> {
        (**self).read(buf)
    }

    fn close(&mut self) -> Result<(), TransportError> {
        (**self).close()
    }
}
