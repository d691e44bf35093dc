//! Per-tick digit selection
//!
//! Everything here is a pure projection of the tick counter. For a tick `t`
//! on a display with `N` digits and `R` rounds per count:
//!
//! ```text
//! position = t % N
//! count    = t / R / N
//! digit    = (count / DIVIDERS[position % 4]) % 10
//! ```
//!
//! With [`Visibility::ParityGroups`] a position is lit only when
//! `count % 2 == position / 4`.

use heapless::Vec;

use crate::config::{MuxConfig, Visibility, DIVIDERS, MAX_DIGITS};
use crate::segments::{encode, Digit, BLANK};
use crate::tick::MuxTick;

/// What the bus must show during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitFrame {
    /// Digit position, in `[0, digits)`
    pub position: u8,
    /// Physical select line to assert for this position
    pub select_line: u8,
    /// Counter value being rendered
    pub count: u32,
    /// Decimal digit for this position's place value
    pub digit: Digit,
    /// Whether the position is lit or blanked
    pub visible: bool,
}

impl DigitFrame {
    /// Segment mask to drive, [`BLANK`] when the position is hidden
    pub const fn segments(&self) -> u8 {
        if self.visible {
            encode(self.digit)
        } else {
            BLANK
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DigitFrame {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "DigitFrame{{pos: {}, line: {}, count: {}, digit: {}, visible: {}}}",
            self.position,
            self.select_line,
            self.count,
            self.digit,
            self.visible
        );
    }
}

impl MuxConfig {
    /// Frame for a tick
    ///
    /// Ticks at or beyond [`period`](MuxConfig::period) are reduced first, so
    /// the result always matches the wrapped counter.
    pub fn select(&self, tick: MuxTick) -> DigitFrame {
        let tick = tick.wrapped(self.period()).raw();
        let digits = self.digits() as u32;
        let position = (tick % digits) as u8;
        let count = tick / self.round_per_count() / digits;
        self.frame(position, count)
    }

    /// Frames for every position of one pass at a fixed count
    pub fn pass(&self, count: u32) -> Vec<DigitFrame, { MAX_DIGITS as usize }> {
        (0..self.digits())
            .map(|position| self.frame(position, count))
            .collect()
    }

    fn frame(&self, position: u8, count: u32) -> DigitFrame {
        let place = DIVIDERS[(position % 4) as usize];
        let visible = match self.visibility() {
            Visibility::Always => true,
            Visibility::ParityGroups => count % 2 == (position / 4) as u32,
        };
        DigitFrame {
            position,
            select_line: (position + self.select_rotation()) % self.digits(),
            count,
            digit: Digit::ones_of(count / place),
            visible,
        }
    }
}
