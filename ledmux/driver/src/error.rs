//! Start-up errors

use core::fmt;

use ledmux_core::MuxError;
use ledmux_hal::HalError;

/// Failures before the display reaches steady state
///
/// Every one of them is fatal: without its timer the display has nothing to
/// show, so callers report the error and stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupError {
    /// Configuration and bus layout do not fit together
    Layout(MuxError),
    /// Pin configuration was refused by the GPIO block
    Bus(HalError),
    /// The repeating timer could not be registered
    TimerRegistration(HalError),
}

impl From<MuxError> for StartupError {
    fn from(value: MuxError) -> Self {
        Self::Layout(value)
    }
}

impl From<HalError> for StartupError {
    fn from(value: HalError) -> Self {
        Self::Bus(value)
    }
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(err) => write!(f, "bus layout rejected: {err}"),
            Self::Bus(err) => write!(f, "pin setup failed: {err}"),
            Self::TimerRegistration(err) => write!(f, "failed to add timer: {err}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StartupError {}

#[cfg(feature = "defmt")]
impl defmt::Format for StartupError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Layout(err) => defmt::write!(fmt, "Layout({})", err),
            Self::Bus(err) => defmt::write!(fmt, "Bus({})", err),
            Self::TimerRegistration(err) => defmt::write!(fmt, "TimerRegistration({})", err),
        }
    }
}
