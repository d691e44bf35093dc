//! Common error types for HAL operations

use core::fmt;

/// HAL operation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalError {
    /// Invalid parameter provided
    InvalidParameter,
    /// Pin is outside the GPIO bank
    InvalidPin(u8),
    /// No timer slot or thread available for a repeating callback
    TimerUnavailable,
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter => write!(f, "invalid parameter"),
            Self::InvalidPin(pin) => write!(f, "invalid pin: {}", pin),
            Self::TimerUnavailable => write!(f, "no timer available"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

#[cfg(feature = "defmt")]
impl defmt::Format for HalError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidParameter => defmt::write!(fmt, "InvalidParameter"),
            Self::InvalidPin(pin) => defmt::write!(fmt, "InvalidPin({})", pin),
            Self::TimerUnavailable => defmt::write!(fmt, "TimerUnavailable"),
        }
    }
}

/// Result type for HAL operations
pub type HalResult<T> = Result<T, HalError>;
