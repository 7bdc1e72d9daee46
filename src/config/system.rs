//! System configuration - root configuration structure.

use serde::Deserialize;

use super::serial::SerialConfig;
use super::session::SessionConfig;

/// Root configuration structure from TOML.
///
/// Both tables are optional; a missing table takes its defaults.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SystemConfig {
    /// Serial link settings.
    #[serde(default)]
    pub serial: SerialConfig,

    /// Session behavior.
    #[serde(default)]
    pub session: SessionConfig,
}
