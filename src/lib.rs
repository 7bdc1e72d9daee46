//! # stage-jog
//!
//! Jog-panel control of a three-motor positioning stage over a serial link.
//!
//! ## Features
//!
//! - **One call per action**: move, zero, limits, status and position queries
//! - **Typed units**: operator millimeters converted to controller steps at 0.0025 mm/step
//! - **Explicit errors**: transport, input, and response parse failures are surfaced, never swallowed
//! - **Configuration-driven**: serial line settings and session behavior from a TOML file
//! - **no_std compatible**: command building and response parsing work without the standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stage_jog::{DeviceSession, Millimeters, SerialTransport};
//!
//! let config = stage_jog::load_config("stage.toml")?;
//! let transport = SerialTransport::open(&config.serial)?;
//! let mut session = DeviceSession::open(transport, delay, config.session);
//!
//! session.start_up()?;
//! session.move_left(Millimeters(2.5))?;
//! println!("{}", session.get_position()?);
//! session.shut_down()?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): TOML loading, `tracing` logging, `std::io` and mock transports
//! - `serial`: real serial port transport via `serialport`
//! - `alloc`: heap allocation for no_std with allocator
//! - `defmt`: defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[macro_use]
mod log;

// Core modules
pub mod config;
pub mod error;
pub mod protocol;
pub mod session;
pub mod transport;

// Re-exports for ergonomic API
pub use config::{validate_config, SerialConfig, SessionConfig, SystemConfig};
pub use error::{Error, Result};
pub use protocol::{AxisCommand, DeviceStatus, PositionRegister, StagePosition, StatusReport};
pub use session::{DeviceSession, SessionState};
pub use transport::Transport;

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

#[cfg(feature = "std")]
pub use transport::{IoTransport, MockTransport};

#[cfg(feature = "serial")]
pub use transport::{list_ports, SerialTransport};

// Unit types
pub use config::units::{mm_to_steps, steps_to_mm, Millimeters, RoundingMode, Steps, MM_PER_STEP};
