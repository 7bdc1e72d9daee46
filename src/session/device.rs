//! Device session.
//!
//! Owns the transport and a delay provider. Every operator action is one
//! method: build the command, write it, and for queries read one reply and
//! parse it.

use embedded_hal::delay::DelayNs;

use crate::config::units::{Millimeters, Steps};
use crate::config::SessionConfig;
use crate::error::{Error, Result, SessionError};
use crate::protocol::{
    parse_position, parse_position_lenient, parse_status, AxisCommand, DeviceStatus,
    PositionRegister, StagePosition, RESPONSE_BUFFER_LEN,
};
use crate::transport::Transport;

use super::state::SessionState;

/// Connection to one motion controller.
///
/// Generic over:
/// - `T`: the byte link (must implement [`Transport`])
/// - `D`: delay provider for settle pauses (must implement `DelayNs`)
///
/// The transport is released by [`close`](Self::close),
/// [`shut_down`](Self::shut_down), or on drop, whichever comes first.
pub struct DeviceSession<T, D>
where
    T: Transport,
    D: DelayNs,
{
    transport: T,
    delay: D,
    config: SessionConfig,
    state: SessionState,

    /// Last successfully read status; failed reads leave it untouched.
    last_status: Option<DeviceStatus>,

    /// Last successfully read position; failed reads leave it untouched.
    last_position: Option<StagePosition>,

    closed: bool,
}

impl<T, D> DeviceSession<T, D>
where
    T: Transport,
    D: DelayNs,
{
    /// Wrap an already-open transport. No handshake is performed; the
    /// session starts Offline.
    pub fn open(transport: T, delay: D, config: SessionConfig) -> Self {
        log_info!("Session opened (Offline)");
        Self {
            transport,
            delay,
            config,
            state: SessionState::Offline,
            last_status: None,
            last_position: None,
            closed: false,
        }
    }

    /// Current connection state.
    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether `online()` has succeeded more recently than `offline()`.
    #[inline]
    pub fn is_online(&self) -> bool {
        self.state == SessionState::Online
    }

    /// Session behavior settings.
    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Status from the last successful `get_status()`.
    #[inline]
    pub fn last_status(&self) -> Option<DeviceStatus> {
        self.last_status
    }

    /// Position from the last successful `get_position()`.
    #[inline]
    pub fn last_position(&self) -> Option<StagePosition> {
        self.last_position
    }

    /// Borrow the transport.
    #[inline]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutably borrow the transport.
    #[inline]
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Put the controller online, then select motor types.
    pub fn start_up(&mut self) -> Result<()> {
        self.online()?;
        self.set_motors()
    }

    /// Send `F`. The session becomes Online only if the write succeeds.
    pub fn online(&mut self) -> Result<()> {
        self.send(&AxisCommand::Online)?;
        self.transition(SessionState::Online);
        Ok(())
    }

    /// Send `Q`. The session becomes Offline only if the write succeeds.
    pub fn offline(&mut self) -> Result<()> {
        self.send(&AxisCommand::Offline)?;
        self.transition(SessionState::Offline);
        Ok(())
    }

    /// Select motor types for all three motors.
    pub fn set_motors(&mut self) -> Result<()> {
        self.ensure_ready()?;
        self.send(&AxisCommand::SetMotors)
    }

    /// Raise the stage by `distance`, rounding half up to whole steps.
    pub fn move_up(&mut self, distance: Millimeters) -> Result<()> {
        self.ensure_ready()?;
        let command = AxisCommand::move_up(distance)?;
        self.jog(&command)
    }

    /// Lower the stage by `distance`, truncating to whole steps.
    pub fn move_down(&mut self, distance: Millimeters) -> Result<()> {
        self.ensure_ready()?;
        let command = AxisCommand::move_down(distance)?;
        self.jog(&command)
    }

    /// Move the stage left by `distance`, truncating to whole steps.
    pub fn move_left(&mut self, distance: Millimeters) -> Result<()> {
        self.ensure_ready()?;
        let command = AxisCommand::move_left(distance)?;
        self.jog(&command)
    }

    /// Move the stage right by `distance`, truncating to whole steps.
    pub fn move_right(&mut self, distance: Millimeters) -> Result<()> {
        self.ensure_ready()?;
        let command = AxisCommand::move_right(distance)?;
        self.jog(&command)
    }

    /// Declare the current position as zero.
    pub fn set_zero(&mut self) -> Result<()> {
        self.ensure_ready()?;
        self.send(&AxisCommand::SetZero)
    }

    /// Drive the vertical motors to their start limit switches.
    pub fn start_limit(&mut self) -> Result<()> {
        self.ensure_ready()?;
        self.send(&AxisCommand::StartLimit)
    }

    /// Drive the vertical motors to their end limit switches.
    pub fn end_limit(&mut self) -> Result<()> {
        self.ensure_ready()?;
        self.send(&AxisCommand::EndLimit)
    }

    /// Clear the current program.
    pub fn clear(&mut self) -> Result<()> {
        self.ensure_ready()?;
        self.send(&AxisCommand::Clear)
    }

    /// Abort motion.
    pub fn kill(&mut self) -> Result<()> {
        self.ensure_ready()?;
        self.send(&AxisCommand::Kill)
    }

    /// Query the run status.
    ///
    /// Any reply that is not `R` or `B` reads as [`DeviceStatus::Jog`].
    pub fn get_status(&mut self) -> Result<DeviceStatus> {
        self.ensure_ready()?;
        let mut buf = [0u8; RESPONSE_BUFFER_LEN];
        let len = self.query(&AxisCommand::GetStatus, &mut buf)?;

        let status = parse_status(&buf[..len]);
        log_info!("Motor Status: {}", status);
        self.last_status = Some(status);
        Ok(status)
    }

    /// Query both position registers, `Y` then `Z`.
    ///
    /// Exactly two round trips are made unless one fails, in which case the
    /// action stops there and the cached position is left unchanged.
    pub fn get_position(&mut self) -> Result<StagePosition> {
        self.ensure_ready()?;

        let mut readings = [Steps(0); 2];
        for (reading, register) in readings.iter_mut().zip(PositionRegister::QUERY_ORDER) {
            *reading = self.read_register(register)?;
        }

        let position = StagePosition::from_registers(readings[0], readings[1]);
        log_info!("{}", position);
        self.last_position = Some(position);
        Ok(position)
    }

    /// Run one command, reading the reply of a query before returning.
    ///
    /// `Online` and `Offline` update the session state as
    /// [`online`](Self::online) and [`offline`](Self::offline) do, and
    /// `GetStatus` updates the cached status as [`get_status`](Self::get_status)
    /// does. `GetPosition` reads its single register and leaves the cached
    /// position alone, since that holds both registers.
    pub fn execute(&mut self, command: AxisCommand) -> Result<()> {
        match command {
            AxisCommand::Online => self.online(),
            AxisCommand::Offline => self.offline(),
            AxisCommand::GetStatus => self.get_status().map(|_| ()),
            AxisCommand::GetPosition(register) => {
                self.ensure_ready()?;
                self.read_register(register).map(|_| ())
            }
            AxisCommand::MoveUp(_)
            | AxisCommand::MoveDown(_)
            | AxisCommand::MoveLeft(_)
            | AxisCommand::MoveRight(_) => {
                self.ensure_ready()?;
                self.jog(&command)
            }
            _ => {
                self.ensure_ready()?;
                self.send(&command)
            }
        }
    }

    /// Close the transport.
    pub fn close(mut self) -> Result<()> {
        self.release()
    }

    /// Send `Q` if Online, then close the transport.
    ///
    /// The transport is closed even when `Q` fails; that failure is the one
    /// reported.
    pub fn shut_down(mut self) -> Result<()> {
        let offline = if self.is_online() {
            self.offline()
        } else {
            Ok(())
        };
        let closed = self.release();
        offline.and(closed)
    }

    fn ensure_ready(&self) -> Result<()> {
        if self.config.require_online && !self.is_online() {
            log_warn!("Refusing action while {}", self.state.name());
            return Err(SessionError::NotOnline.into());
        }
        Ok(())
    }

    fn transition(&mut self, to: SessionState) {
        if self.state != to {
            log_info!("Session {} -> {}", self.state.name(), to.name());
        }
        self.state = to;
    }

    fn jog(&mut self, command: &AxisCommand) -> Result<()> {
        if let AxisCommand::MoveUp(steps)
        | AxisCommand::MoveDown(steps)
        | AxisCommand::MoveLeft(steps)
        | AxisCommand::MoveRight(steps) = command
        {
            log_debug!("Steps: {}", steps.0);
        }
        self.send(command)?;
        if self.config.settle_after_move_ms > 0 {
            self.delay.delay_ms(self.config.settle_after_move_ms);
        }
        Ok(())
    }

    fn send(&mut self, command: &AxisCommand) -> Result<()> {
        let encoded = command.encode();
        log_debug!("Command: {}", encoded.as_str());

        if let Err(e) = self.transport.send_command(&encoded) {
            log_warn!("Command '{}' failed: {}", encoded.as_str(), e);
            return Err(e.into());
        }

        if self.config.settle_after_write_ms > 0 {
            self.delay.delay_ms(self.config.settle_after_write_ms);
        }
        Ok(())
    }

    fn query(
        &mut self,
        command: &AxisCommand,
        buf: &mut [u8; RESPONSE_BUFFER_LEN],
    ) -> Result<usize> {
        self.send(command)?;

        let want = self.config.response_len.clamp(1, RESPONSE_BUFFER_LEN);
        let len = match self.transport.read(&mut buf[..want]) {
            Ok(len) => len.min(want),
            Err(e) => {
                log_warn!("Reading reply failed: {}", e);
                return Err(e.into());
            }
        };
        log_debug!("Response: {} bytes", len);
        Ok(len)
    }

    fn read_register(&mut self, register: PositionRegister) -> Result<Steps> {
        let mut buf = [0u8; RESPONSE_BUFFER_LEN];
        let len = self.query(&AxisCommand::GetPosition(register), &mut buf)?;
        let raw = &buf[..len];

        if self.config.lenient_position_parsing {
            return Ok(parse_position_lenient(raw));
        }
        parse_position(raw).map_err(|e| {
            log_warn!("Position {} unreadable: {}", register.label(), e);
            Error::from(e)
        })
    }

    fn release(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        log_info!("Closing session");
        self.transport.close().map_err(Error::from)
    }
}

impl<T, D> Drop for DeviceSession<T, D>
where
    T: Transport,
    D: DelayNs,
{
    fn drop(&mut self) {
        if !self.closed {
            if let Err(e) = self.release() {
                log_warn!("Close on drop failed: {}", e);
            }
        }
    }
}
