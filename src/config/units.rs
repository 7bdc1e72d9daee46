//! Unit types for stage travel.
//!
//! Provides type-safe millimeter and step quantities and the conversions
//! between them. The stage has a single fixed pitch, [`MM_PER_STEP`], used
//! in both directions.

use serde::Deserialize;

use crate::error::{bounded, InputError};

/// Linear travel of one motor step, in millimeters.
pub const MM_PER_STEP: f64 = 0.0025;

/// 2^63; `i64::MAX as f64` rounds up to this, which is itself out of range.
const STEP_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Linear distance in millimeters, as entered by the operator.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl Millimeters {
    /// Create a new Millimeters value.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Parse operator entry text such as `"12.5"`.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Unparseable` for text that is not a number and
    /// `InputError::NonFinite` for `nan`/`inf`.
    pub fn parse(text: &str) -> Result<Self, InputError> {
        let trimmed = text.trim();
        let value: f64 = trimmed
            .parse()
            .map_err(|_| InputError::Unparseable(bounded(trimmed)))?;
        if !value.is_finite() {
            return Err(InputError::NonFinite(value));
        }
        Ok(Self(value))
    }

    /// Convert to steps using the given rounding mode.
    #[inline]
    pub fn to_steps(self, mode: RoundingMode) -> Result<Steps, InputError> {
        mm_to_steps(self, mode)
    }
}

/// Motor position or move length in steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Steps(pub i64);

impl Steps {
    /// Create a new Steps value.
    #[inline]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Convert a controller-reported position to millimeters.
    #[inline]
    pub fn to_mm(self) -> Millimeters {
        steps_to_mm(self)
    }
}

/// How a fractional step count is turned into a whole number of steps.
///
/// Moves do not all round the same way: the upward move rounds half up,
/// every other move truncates toward zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RoundingMode {
    /// `trunc(distance / MM_PER_STEP + 0.5)`
    NearestHalfUp,
    /// `trunc(distance / MM_PER_STEP)`
    Truncate,
}

/// Convert an operator distance to a step count.
///
/// No range checking is applied beyond what the step type can hold.
///
/// # Errors
///
/// Returns `InputError::NonFinite` for NaN or infinite input and
/// `InputError::StepOverflow` when the result does not fit in an `i64`.
pub fn mm_to_steps(distance: Millimeters, mode: RoundingMode) -> Result<Steps, InputError> {
    if !distance.0.is_finite() {
        return Err(InputError::NonFinite(distance.0));
    }

    let raw = distance.0 / MM_PER_STEP;
    let steps = match mode {
        RoundingMode::NearestHalfUp => libm::trunc(raw + 0.5),
        RoundingMode::Truncate => libm::trunc(raw),
    };

    if !(-STEP_LIMIT..STEP_LIMIT).contains(&steps) {
        return Err(InputError::StepOverflow(distance.0));
    }

    Ok(Steps(steps as i64))
}

/// Convert a controller-reported position to millimeters.
///
/// The controller counts positive steps away from the operator, so the
/// displayed distance is negated.
#[inline]
pub fn steps_to_mm(position: Steps) -> Millimeters {
    Millimeters(-1.0 * position.0 as f64 * MM_PER_STEP)
}
