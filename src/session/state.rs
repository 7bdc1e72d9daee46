//! Session connection state.

/// Whether the controller has been put online (host mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    /// Port is open; controller is in local mode.
    #[default]
    Offline,
    /// `F` has been sent; controller accepts host commands.
    Online,
}

impl SessionState {
    /// State name for display/debugging.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Offline => "Offline",
            Self::Online => "Online",
        }
    }
}
