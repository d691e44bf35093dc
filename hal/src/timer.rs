//! Repeating timer abstraction

use crate::error::HalResult;

/// How a repeating timer measures its period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPeriod {
    /// Fire every `n` µs measured from the previous deadline; no drift
    ExactInterval(u32),
    /// Wait `n` µs after each callback returns; drifts by the callback time
    AfterCallback(u32),
}

impl TimerPeriod {
    /// Decode the signed convention where a negative value means exact interval
    pub const fn from_signed_us(period_us: i64) -> Self {
        let magnitude = period_us.unsigned_abs();
        let micros = if magnitude > u32::MAX as u64 {
            u32::MAX
        } else {
            magnitude as u32
        };
        if period_us < 0 {
            Self::ExactInterval(micros)
        } else {
            Self::AfterCallback(micros)
        }
    }

    /// Period length in microseconds
    pub const fn micros(&self) -> u32 {
        match self {
            Self::ExactInterval(us) | Self::AfterCallback(us) => *us,
        }
    }

    /// Check if deadlines are fixed to the first firing
    pub const fn is_exact(&self) -> bool {
        matches!(self, Self::ExactInterval(_))
    }
}

/// Returned by a timer callback to keep or drop its slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Fire again after the next period
    Continue,
    /// Stop firing
    Cancel,
}

/// A platform timer that can run a callback at a fixed period
pub trait RepeatingTimer {
    /// Register `callback` to run every `period`
    ///
    /// The callback owns whatever context it needs. It runs in the timer's
    /// context (an interrupt on hardware, a dedicated thread on a host) and
    /// must complete within one period.
    fn add_repeating<F>(&mut self, period: TimerPeriod, callback: F) -> HalResult<()>
    where
        F: FnMut() -> Repeat + Send + 'static;
}
