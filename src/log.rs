//! Logging shims.
//!
//! Forward to `tracing` on hosts (`std`) and to `defmt` on embedded targets
//! (`defmt`). With neither feature enabled the arguments are still
//! type-checked through `format_args!` but nothing is emitted, so format
//! arguments must not have side effects. Format strings use plain `{}`
//! placeholders only, which all three backends accept.

macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "std")]
        tracing::debug!($($arg)*);
        #[cfg(feature = "defmt")]
        defmt::debug!($($arg)*);
        #[cfg(not(any(feature = "std", feature = "defmt")))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "std")]
        tracing::info!($($arg)*);
        #[cfg(feature = "defmt")]
        defmt::info!($($arg)*);
        #[cfg(not(any(feature = "std", feature = "defmt")))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "std")]
        tracing::warn!($($arg)*);
        #[cfg(feature = "defmt")]
        defmt::warn!($($arg)*);
        #[cfg(not(any(feature = "std", feature = "defmt")))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}
