//! Transport over any `std::io` byte stream.

use std::io::{Read, Write};

use crate::error::{bounded, TransportError};

use super::Transport;

/// Adapts a `Read + Write` stream (serial port, pipe, TCP bridge) to
/// [`Transport`].
///
/// Closing drops the stream, which releases the underlying handle.
#[derive(Debug)]
pub struct IoTransport<S: Read + Write> {
    stream: Option<S>,
}

impl<S: Read + Write> IoTransport<S> {
    /// Wrap an already-open stream.
    pub fn new(stream: S) -> Self {
        Self {
            stream: Some(stream),
        }
    }

    /// Whether [`Transport::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.stream.is_none()
    }

    /// Borrow the wrapped stream, if still open.
    pub fn get_ref(&self) -> Option<&S> {
        self.stream.as_ref()
    }

    fn stream(&mut self) -> Result<&mut S, TransportError> {
        self.stream.as_mut().ok_or(TransportError::Closed)
    }
}

impl<S: Read + Write> Transport for IoTransport<S> {
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        let stream = self.stream()?;
        stream
            .write_all(bytes)
            .and_then(|_| stream.flush())
            .map_err(|e| TransportError::Write(bounded(&e.to_string())))
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, TransportError> {
        self.stream()?
            .read(buf)
            .map_err(|e| TransportError::Read(bounded(&e.to_string())))
    }

    fn close(&mut self) -> Result<(), TransportError> {
        if let Some(mut stream) = self.stream.take() {
            stream
                .flush()
                .map_err(|e| TransportError::Write(bounded(&e.to_string())))?;
        }
        Ok(())
    }
}
