//! Configuration module for stage-jog.
//!
//! Provides types for loading and validating serial link and session
//! settings from TOML files (with `std` feature) or pre-parsed data, plus
//! the millimeter/step unit types.

mod serial;
mod session;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use serial::{Parity, SerialConfig};
pub use session::SessionConfig;
pub use system::SystemConfig;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{mm_to_steps, steps_to_mm, Millimeters, RoundingMode, Steps, MM_PER_STEP};
