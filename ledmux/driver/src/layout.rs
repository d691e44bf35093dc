//! Placement of the digit-select and segment buses in the GPIO bank

use ledmux_core::{MuxError, MuxResult, Segments, MAX_DIGITS};

/// Pins in a GPIO bank
const BANK_WIDTH: u8 = 32;

/// Two disjoint pin ranges: one select line per digit, eight segment lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusLayout {
    first_digit_pin: u8,
    digits: u8,
    first_segment_pin: u8,
}

impl BusLayout {
    /// 4-digit board: select lines on GPIO 2-5, segments on GPIO 6-13
    pub const QUAD_BOARD: Self = Self {
        first_digit_pin: 2,
        digits: 4,
        first_segment_pin: 6,
    };

    /// 8-digit board: select lines on GPIO 2-9, segments on GPIO 10-17
    pub const OCTAL_BOARD: Self = Self {
        first_digit_pin: 2,
        digits: 8,
        first_segment_pin: 10,
    };

    /// Create a layout, rejecting overlapping or out-of-bank ranges
    pub const fn new(first_digit_pin: u8, digits: u8, first_segment_pin: u8) -> MuxResult<Self> {
        if digits == 0 || digits > MAX_DIGITS {
            return Err(MuxError::InvalidConfig);
        }
        let digit_end = first_digit_pin as u16 + digits as u16;
        let segment_end = first_segment_pin as u16 + Segments::WIDTH as u16;
        if digit_end > BANK_WIDTH as u16 || segment_end > BANK_WIDTH as u16 {
            return Err(MuxError::PinOutOfRange);
        }
        let layout = Self {
            first_digit_pin,
            digits,
            first_segment_pin,
        };
        if layout.digit_mask() & layout.segment_mask() != 0 {
            return Err(MuxError::OverlappingBuses);
        }
        Ok(layout)
    }

    /// Number of select lines
    pub const fn digits(&self) -> u8 {
        self.digits
    }

    /// GPIO number of select line 0
    pub const fn first_digit_pin(&self) -> u8 {
        self.first_digit_pin
    }

    /// GPIO number of segment bit 0
    pub const fn first_segment_pin(&self) -> u8 {
        self.first_segment_pin
    }

    /// Pins of the digit-select bus
    pub const fn digit_mask(&self) -> u32 {
        (((1u64 << self.digits) - 1) as u32) << self.first_digit_pin
    }

    /// Pins of the segment bus
    pub const fn segment_mask(&self) -> u32 {
        0xffu32 << self.first_segment_pin
    }

    /// Every pin the display uses
    pub const fn mask(&self) -> u32 {
        self.digit_mask() | self.segment_mask()
    }

    /// Bank value asserting one select line
    pub const fn select_bits(&self, line: u8) -> u32 {
        (1u32 << line) << self.first_digit_pin
    }

    /// Bank value carrying a segment mask
    pub const fn segment_bits(&self, segments: u8) -> u32 {
        (segments as u32) << self.first_segment_pin
    }

    /// GPIO numbers of the segment lines
    pub fn segment_pins(&self) -> impl Iterator<Item = u8> {
        self.first_segment_pin..self.first_segment_pin + Segments::WIDTH
    }

    /// GPIO numbers of every display pin, select lines first
    pub fn pins(&self) -> impl Iterator<Item = u8> {
        (self.first_digit_pin..self.first_digit_pin + self.digits).chain(self.segment_pins())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for BusLayout {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "BusLayout{{digits: {=u32:#x}, segments: {=u32:#x}}}",
            self.digit_mask(),
            self.segment_mask()
        );
    }
}
