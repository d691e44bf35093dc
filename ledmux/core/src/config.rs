//! Compile-time display variants

use crate::{MuxError, MuxResult};

/// Largest digit count supported by the select bus
pub const MAX_DIGITS: u8 = 8;

/// Place-value divisors shared by every group of four digits
pub const DIVIDERS: [u32; 4] = [1, 10, 100, 1000];

/// Number of distinct counter values before the tick counter wraps
pub const COUNT_RANGE: u32 = 10_000;

/// Base multiplexing round, in microseconds, split evenly between digits
const ROUND_US: u32 = 100;

/// Which positions are lit for a given count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Every position shows its digit on every pass
    Always,
    /// Positions 0-3 light on even counts, positions 4-7 on odd counts
    ParityGroups,
}

/// Fixed parameters of one display variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MuxConfig {
    digits: u8,
    round_per_count: u32,
    visibility: Visibility,
    select_rotation: u8,
}

impl MuxConfig {
    /// Eight digits in two parity-gated groups of four
    pub const OCTAL: Self = Self {
        digits: 8,
        round_per_count: 25,
        visibility: Visibility::ParityGroups,
        select_rotation: 0,
    };

    /// Four digits, every digit always lit
    ///
    /// The 4-digit board wires its select lines one place behind the digit
    /// position, so position `p` drives line `(p + 3) % 4`.
    pub const QUAD: Self = Self {
        digits: 4,
        round_per_count: 10,
        visibility: Visibility::Always,
        select_rotation: 3,
    };

    /// Create a configuration with the select lines wired straight through
    pub const fn new(digits: u8, round_per_count: u32, visibility: Visibility) -> MuxResult<Self> {
        if digits == 0 || digits > MAX_DIGITS || round_per_count == 0 {
            return Err(MuxError::InvalidConfig);
        }
        let config = Self {
            digits,
            round_per_count,
            visibility,
            select_rotation: 0,
        };
        match config.checked_period() {
            Some(_) if config.tick_period_us() > 0 => Ok(config),
            _ => Err(MuxError::InvalidConfig),
        }
    }

    /// Rotate the select line driven for each position
    pub const fn with_select_rotation(mut self, rotation: u8) -> Self {
        self.select_rotation = rotation % self.digits;
        self
    }

    /// Number of digit positions
    pub const fn digits(&self) -> u8 {
        self.digits
    }

    /// Full multiplexing passes per counter step
    pub const fn round_per_count(&self) -> u32 {
        self.round_per_count
    }

    /// Visibility rule
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Select line offset applied to each position
    pub const fn select_rotation(&self) -> u8 {
        self.select_rotation
    }

    /// Ticks each counter value stays on the display
    pub const fn ticks_per_count(&self) -> u32 {
        self.round_per_count * self.digits as u32
    }

    /// Tick counter modulus
    pub const fn period(&self) -> u32 {
        self.ticks_per_count() * COUNT_RANGE
    }

    /// Timer period in microseconds
    pub const fn tick_period_us(&self) -> u32 {
        ROUND_US / self.digits as u32
    }

    const fn checked_period(&self) -> Option<u32> {
        match self.round_per_count.checked_mul(self.digits as u32) {
            Some(per_count) => per_count.checked_mul(COUNT_RANGE),
            None => None,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for MuxConfig {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "MuxConfig{{digits: {}, rounds: {}, period: {}}}",
            self.digits,
            self.round_per_count,
            self.period()
        );
    }
}
