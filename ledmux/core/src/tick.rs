//! Wrapping tick counter

use core::fmt;

/// Multiplexer tick counter
///
/// Advances by one per timer firing and wraps at the period of the active
/// [`MuxConfig`](crate::MuxConfig), so both the digit phase and the displayed
/// count are recovered from it alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct MuxTick(u32);

impl MuxTick {
    /// Zero tick
    pub const ZERO: Self = Self(0);

    /// Create a new tick count
    pub const fn new(ticks: u32) -> Self {
        Self(ticks)
    }

    /// Get the raw tick value
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Step to the next tick, wrapping to zero at `period`
    ///
    /// `period` must be non-zero. A value already at or past it is reduced
    /// first.
    pub fn advance(&mut self, period: u32) {
        let next = (self.0 % period).wrapping_add(1);
        self.0 = if next >= period { 0 } else { next };
    }

    /// Reduce an arbitrary tick into `[0, period)`
    pub const fn wrapped(self, period: u32) -> Self {
        Self(self.0 % period)
    }
}

impl fmt::Display for MuxTick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick:{}", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for MuxTick {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "tick:{}", self.0);
    }
}
