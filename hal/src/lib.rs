//! Hardware Abstraction Layer (HAL) for the display
//!
//! This crate provides the two platform capabilities the multiplexer needs:
//! raw bit-level access to a GPIO bank and a repeating timer. Board crates
//! and host simulators implement them; `ledmux-driver` only consumes them.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod error;
pub mod gpio;
pub mod timer;

// Re-export commonly used types
pub use error::{HalError, HalResult};
pub use gpio::{DriveStrength, GpioBus, GpioBusSetup, OutputOverride};
pub use timer::{Repeat, RepeatingTimer, TimerPeriod};
