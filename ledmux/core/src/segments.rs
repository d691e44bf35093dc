//! Digit to segment bitmask encoding
//!
//! Segment layout and bit assignment of the reference board:
//!
//! ```text
//!    --A--        A: bit 5
//!   F     B       B: bit 7
//!    --G--        C: bit 1
//!   E     C       D: bit 3
//!    --D--  .DP   E: bit 4
//!                 F: bit 6
//!                 G: bit 0
//!                DP: bit 2 (never lit)
//! ```
//!
//! Masks are active-high: a set bit means the segment is lit. The physical
//! segment lines are active-low, which the bus inverts once at start-up.

use core::fmt;

/// Segment bit positions on the segment bus
pub struct Segments;

impl Segments {
    /// Segment A (top horizontal)
    pub const A: u8 = 1 << 5;
    /// Segment B (top right vertical)
    pub const B: u8 = 1 << 7;
    /// Segment C (bottom right vertical)
    pub const C: u8 = 1 << 1;
    /// Segment D (bottom horizontal)
    pub const D: u8 = 1 << 3;
    /// Segment E (bottom left vertical)
    pub const E: u8 = 1 << 4;
    /// Segment F (top left vertical)
    pub const F: u8 = 1 << 6;
    /// Segment G (middle horizontal)
    pub const G: u8 = 1 << 0;
    /// Decimal point
    pub const DP: u8 = 1 << 2;

    /// Width of the segment bus in bits
    pub const WIDTH: u8 = 8;
}

/// All segments off
pub const BLANK: u8 = 0;

/// Segment masks for the digits 0 to 9
pub const SEGMENT_TABLE: [u8; 10] = [
    Segments::A | Segments::B | Segments::C | Segments::D | Segments::E | Segments::F,
    Segments::B | Segments::C,
    Segments::A | Segments::B | Segments::D | Segments::E | Segments::G,
    Segments::A | Segments::B | Segments::C | Segments::D | Segments::G,
    Segments::B | Segments::C | Segments::F | Segments::G,
    Segments::A | Segments::C | Segments::D | Segments::F | Segments::G,
    Segments::A | Segments::C | Segments::D | Segments::E | Segments::F | Segments::G,
    Segments::A | Segments::B | Segments::C,
    Segments::A | Segments::B | Segments::C | Segments::D | Segments::E | Segments::F | Segments::G,
    Segments::A | Segments::B | Segments::C | Segments::D | Segments::F | Segments::G,
];

/// A decimal digit, always in `0..=9`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Digit(u8);

impl Digit {
    /// Zero digit
    pub const ZERO: Self = Self(0);

    /// Create a digit, rejecting values above nine
    pub const fn new(value: u8) -> Option<Self> {
        if value < 10 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Ones place of an arbitrary value
    pub const fn ones_of(value: u32) -> Self {
        Self((value % 10) as u8)
    }

    /// Get the raw digit value
    pub const fn value(self) -> u8 {
        self.0
    }

    /// ASCII character for this digit
    pub const fn as_char(self) -> char {
        (b'0' + self.0) as char
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Digit {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.0);
    }
}

/// Segment mask for a digit
pub const fn encode(digit: Digit) -> u8 {
    SEGMENT_TABLE[digit.0 as usize]
}

/// Reverse lookup of a segment mask
///
/// Returns `None` for masks that are not in the table, including [`BLANK`].
pub fn decode(mask: u8) -> Option<Digit> {
    SEGMENT_TABLE
        .iter()
        .position(|&bits| bits == mask)
        .map(|index| Digit(index as u8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_board_wiring() {
        assert_eq!(
            SEGMENT_TABLE,
            [0xfa, 0x82, 0xb9, 0xab, 0xc3, 0x6b, 0x7b, 0xa2, 0xfb, 0xeb]
        );
    }

    #[test]
    fn test_decimal_point_is_never_lit() {
        assert!(SEGMENT_TABLE.iter().all(|bits| bits & Segments::DP == 0));
    }

    #[test]
    fn test_digit_rejects_values_above_nine() {
        assert_eq!(Digit::new(9).map(Digit::value), Some(9));
        assert_eq!(Digit::new(10), None);
        assert_eq!(Digit::ones_of(1234), Digit::new(4).unwrap());
    }

    #[test]
    fn test_decode_inverts_encode() {
        for value in 0..10 {
            let digit = Digit::new(value).unwrap();
            assert_eq!(decode(encode(digit)), Some(digit));
        }
        assert_eq!(decode(BLANK), None);
        assert_eq!(decode(Segments::DP), None);
    }
}
