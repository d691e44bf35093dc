//! GPIO bank abstraction
//!
//! Pins are addressed as bits of a single 32-bit bank, the way SIO-style
//! GPIO blocks expose them. Masks select the pins an operation touches.

use crate::error::HalResult;

/// Output drive strength
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveStrength {
    /// 2 mA
    Ma2,
    /// 4 mA
    Ma4,
    /// 8 mA
    Ma8,
    /// 12 mA
    Ma12,
}

/// Output override applied between the output register and the pad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputOverride {
    /// Drive the register value
    Normal,
    /// Drive the inverse of the register value
    Invert,
    /// Force low
    Low,
    /// Force high
    High,
}

/// Bit-level writes to a GPIO bank
///
/// These run from timer interrupt context: implementations must not block
/// and cannot fail.
pub trait GpioBus {
    /// Drive every pin in `mask` low
    fn clear_bits(&mut self, mask: u32);

    /// Drive every pin in `mask` high
    fn set_bits(&mut self, mask: u32);

    /// Drive the pins in `mask` to the matching bits of `value`
    fn put_masked(&mut self, mask: u32, value: u32) {
        self.clear_bits(mask & !value);
        self.set_bits(mask & value);
    }
}

/// One-time configuration of a GPIO bank
pub trait GpioBusSetup: GpioBus {
    /// Hand the pins in `mask` to the GPIO block
    fn init(&mut self, mask: u32) -> HalResult<()>;

    /// Make the pins in `mask` outputs
    fn set_direction_out(&mut self, mask: u32) -> HalResult<()>;

    /// Set the output override of a single pin
    fn set_output_override(&mut self, pin: u8, mode: OutputOverride) -> HalResult<()>;

    /// Set the drive strength of a single pin
    fn set_drive_strength(&mut self, pin: u8, strength: DriveStrength) -> HalResult<()>;
}

impl<B: GpioBus + ?Sized> GpioBus for &mut B {
    fn clear_bits(&mut self, mask: u32) {
        (**self).clear_bits(mask)
    }

    fn set_bits(&mut self, mask: u32) {
        (**self).set_bits(mask)
    }

    fn put_masked(&mut self, mask: u32, value: u32) {
        (**self).put_masked(mask, value)
    }
}

/// Fan out every write to two buses, e.g. separate digit and segment ports
impl<A: GpioBus, B: GpioBus> GpioBus for (A, B) {
    fn clear_bits(&mut self, mask: u32) {
        self.0.clear_bits(mask);
        self.1.clear_bits(mask);
    }

    fn set_bits(&mut self, mask: u32) {
        self.0.set_bits(mask);
        self.1.set_bits(mask);
    }

    fn put_masked(&mut self, mask: u32, value: u32) {
        self.0.put_masked(mask, value);
        self.1.put_masked(mask, value);
    }
}
