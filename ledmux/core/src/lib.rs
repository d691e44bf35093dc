#![no_std]
#![forbid(unsafe_code)]

//! # ledmux core
//!
//! Pure display logic for a time-multiplexed 7-segment LED counter. Nothing in
//! this crate touches hardware: the tick scheduler in `ledmux-driver` feeds a
//! [`MuxTick`] in and gets a [`DigitFrame`] out, which it then turns into bus
//! writes.
//!
//! ## Module Overview
//! - [`segments`] – digit to segment bitmask encoding.
//! - [`config`]   – compile-time display variants (4 and 8 digits).
//! - [`mux`]      – per-tick digit selection and visibility.
//! - [`tick`]     – the wrapping tick counter.

use core::fmt;

pub mod config;
pub mod mux;
pub mod segments;
pub mod tick;

pub use config::{MuxConfig, Visibility, COUNT_RANGE, DIVIDERS, MAX_DIGITS};
pub use mux::DigitFrame;
pub use segments::{decode, encode, Digit, Segments, BLANK, SEGMENT_TABLE};
pub use tick::MuxTick;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type used throughout ledmux
pub type MuxResult<T> = Result<T, MuxError>;

/// Errors raised while building a display configuration
///
/// None of these can occur once a scheduler is running: they are all
/// detected before the first tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuxError {
    /// Digit count, rounds per count or tick period out of range
    InvalidConfig,
    /// Digit-select and segment bit ranges share at least one pin
    OverlappingBuses,
    /// A bus extends past the 32-pin GPIO bank
    PinOutOfRange,
    /// Bus layout was built for a different digit count than the config
    LayoutMismatch,
}

impl fmt::Display for MuxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MuxError::InvalidConfig => write!(f, "Invalid multiplexer configuration"),
            MuxError::OverlappingBuses => write!(f, "Digit and segment buses overlap"),
            MuxError::PinOutOfRange => write!(f, "Bus pin outside the GPIO bank"),
            MuxError::LayoutMismatch => write!(f, "Bus layout does not match digit count"),
        }
    }
}

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "std")]
impl std::error::Error for MuxError {}

#[cfg(feature = "defmt")]
impl defmt::Format for MuxError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            MuxError::InvalidConfig => defmt::write!(fmt, "InvalidConfig"),
            MuxError::OverlappingBuses => defmt::write!(fmt, "OverlappingBuses"),
            MuxError::PinOutOfRange => defmt::write!(fmt, "PinOutOfRange"),
            MuxError::LayoutMismatch => defmt::write!(fmt, "LayoutMismatch"),
        }
    }
}
