//! What a viewer would see on the simulated display
//!
//! The eye integrates the multiplexed digits: each position looks like it
//! shows whatever it showed the last time its select line was up. This
//! decoder keeps exactly that, one segment mask per select line.

use ledmux_core::{decode, BLANK, MAX_DIGITS};
use ledmux_driver::BusLayout;

/// Last pattern shown on each select line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persistence {
    layout: BusLayout,
    lit: [u8; MAX_DIGITS as usize],
}

impl Persistence {
    /// Start with every digit dark
    pub fn new(layout: BusLayout) -> Self {
        Self {
            layout,
            lit: [BLANK; MAX_DIGITS as usize],
        }
    }

    /// Feed the physical pin levels of the bank
    ///
    /// Levels with no or several select lines high are transitions between
    /// digits and are skipped. Segment pins are active-low.
    pub fn observe(&mut self, levels: u32) {
        let layout = &self.layout;
        let lines = (levels & layout.digit_mask()) >> layout.first_digit_pin();
        if lines.count_ones() != 1 {
            return;
        }
        let line = lines.trailing_zeros() as usize;
        let pads = (levels & layout.segment_mask()) >> layout.first_segment_pin();
        self.lit[line] = !(pads as u8);
    }

    /// Lit segments last seen on a select line
    pub fn segments(&self, line: u8) -> u8 {
        self.lit[line as usize]
    }

    /// One character per select line, highest line first
    ///
    /// Blank digits render as a space, patterns outside the digit table as `?`.
    pub fn render(&self) -> String {
        (0..self.layout.digits())
            .rev()
            .map(|line| glyph(self.segments(line)))
            .collect()
    }
}

fn glyph(segments: u8) -> char {
    if segments == BLANK {
        return ' ';
    }
    decode(segments).map_or('?', |digit| digit.as_char())
}
