//! In-memory transport for running without hardware.

use std::collections::VecDeque;

use crate::error::{bounded, TransportError};
use crate::protocol::TERMINATOR;

use super::Transport;

/// Transport that records every command and replays scripted replies.
///
/// Opening always succeeds. Reads with nothing scripted return zero bytes,
/// the way an idle controller would. Write and read failures can be
/// injected to exercise error paths.
#[derive(Debug, Default)]
pub struct MockTransport {
    sent: Vec<String>,
    replies: VecDeque<Vec<u8>>,
    fail_writes: bool,
    fail_reads: bool,
    closed: bool,
}

impl MockTransport {
    /// Create an idle mock link.
    pub fn new() -> Self {
        log_debug!("mock: open port");
        Self::default()
    }

    /// Queue a reply for a later read.
    pub fn with_reply(mut self, reply: impl AsRef<[u8]>) -> Self {
        self.push_reply(reply);
        self
    }

    /// Queue a reply for a later read.
    pub fn push_reply(&mut self, reply: impl AsRef<[u8]>) {
        self.replies.push_back(reply.as_ref().to_vec());
    }

    /// Make every subsequent write fail.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Make every subsequent read fail.
    pub fn fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Commands written so far, terminator stripped.
    pub fn sent(&self) -> &[String] {
        &self.sent
    }

    /// Replies not yet consumed.
    pub fn pending_replies(&self) -> usize {
        self.replies.len()
    }

    /// Whether the link has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Transport for MockTransport {
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        if self.fail_writes {
            return Err(TransportError::Write(bounded("injected write failure")));
        }

        let line = bytes.strip_suffix(TERMINATOR).unwrap_or(bytes);
        let command = String::from_utf8_lossy(line).into_owned();
        log_debug!("mock: sending command {}", command.as_str());
        self.sent.push(command);
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, TransportError> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        if self.fail_reads {
            return Err(TransportError::Read(bounded("injected read failure")));
        }

        let Some(mut reply) = self.replies.pop_front() else {
            log_debug!("mock: no reply scripted");
            return Ok(0);
        };

        let n = reply.len().min(buf.len());
        buf[..n].copy_from_slice(&reply[..n]);

        // Bytes that did not fit stay buffered, as they would in the UART
        if n < reply.len() {
            reply.drain(..n);
            self.replies.push_front(reply);
        }

        log_debug!("mock: reading response ({} bytes)", n);
        Ok(n)
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::AxisCommand;

    #[test]
    fn test_records_commands_without_terminator() {
        let mut mock = MockTransport::new();
        mock.send_command(&AxisCommand::Kill.encode()).unwrap();
        mock.send_command(&AxisCommand::Online.encode()).unwrap();
        assert_eq!(mock.sent(), ["K", "F"]);
    }

    #[test]
    fn test_replays_replies_in_order() {
        let mut mock = MockTransport::new().with_reply("R").with_reply("400");
        let mut buf = [0u8; 32];

        let n = mock.read(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"R");
        let n = mock.read(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"400");
        assert_eq!(mock.read(&mut buf), Ok(0));
    }

    #[test]
    fn test_oversized_reply_is_split() {
        let mut mock = MockTransport::new().with_reply("123456");
        let mut buf = [0u8; 4];

        assert_eq!(mock.read(&mut buf), Ok(4));
        assert_eq!(&buf, b"1234");
        assert_eq!(mock.read(&mut buf), Ok(2));
        assert_eq!(&buf[..2], b"56");
        assert_eq!(mock.pending_replies(), 0);
    }

    #[test]
    fn test_injected_failures() {
        let mut mock = MockTransport::new().with_reply("R");
        mock.fail_writes(true);
        mock.fail_reads(true);

        assert!(matches!(mock.write(b"V\r\n"), Err(TransportError::Write(_))));
        let mut buf = [0u8; 4];
        assert!(matches!(mock.read(&mut buf), Err(TransportError::Read(_))));
        assert!(mock.sent().is_empty());
        assert_eq!(mock.pending_replies(), 1);
    }

    #[test]
    fn test_closed_rejects_io() {
        let mut mock = MockTransport::new();
        mock.close().unwrap();
        assert_eq!(mock.write(b"F\r\n"), Err(TransportError::Closed));
        assert!(mock.is_closed());
    }
}
