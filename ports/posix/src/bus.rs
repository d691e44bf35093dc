//! Simulated 32-pin GPIO bank

use std::sync::Arc;

use ledmux_driver::BusLayout;
use ledmux_hal::{DriveStrength, GpioBus, GpioBusSetup, HalError, HalResult, OutputOverride};
use parking_lot::{Mutex, MutexGuard};

use crate::persistence::Persistence;

const BANK_WIDTH: u8 = 32;

/// A recorded bus write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusOp {
    /// Pins driven low
    Clear(u32),
    /// Pins driven high
    Set(u32),
    /// Pins in `mask` driven to `value`
    Put { mask: u32, value: u32 },
}

/// GPIO bank with an output register and per-pin pad overrides
///
/// Pins report a level only once they are initialised and set to output;
/// everything else reads low.
#[derive(Debug, Default)]
pub struct SimBus {
    initialised: u32,
    outputs: u32,
    inverted: u32,
    forced_low: u32,
    forced_high: u32,
    strengths: [Option<DriveStrength>; BANK_WIDTH as usize],
    register: u32,
    log: Option<Vec<BusOp>>,
    persistence: Option<Persistence>,
}

impl SimBus {
    /// Create a bank with every pin unconfigured
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every write for later inspection
    pub fn with_log(mut self) -> Self {
        self.log = Some(Vec::new());
        self
    }

    /// Decode the display wired at `layout` after every write
    pub fn with_persistence(mut self, layout: BusLayout) -> Self {
        self.persistence = Some(Persistence::new(layout));
        self
    }

    /// Output register, before pad overrides
    pub fn register(&self) -> u32 {
        self.register
    }

    /// Pad levels as seen from outside the chip
    pub fn levels(&self) -> u32 {
        let pads = (self.register ^ self.inverted) & !self.forced_low | self.forced_high;
        pads & self.outputs & self.initialised
    }

    /// Drive strength configured on a pin
    pub fn drive_strength(&self, pin: u8) -> Option<DriveStrength> {
        self.strengths.get(pin as usize).copied().flatten()
    }

    /// Recorded writes, if logging is enabled
    pub fn log(&self) -> &[BusOp] {
        self.log.as_deref().unwrap_or(&[])
    }

    /// Display decoder, if one is attached
    pub fn persistence(&self) -> Option<&Persistence> {
        self.persistence.as_ref()
    }

    fn write(&mut self, op: BusOp) {
        self.register = match op {
            BusOp::Clear(mask) => self.register & !mask,
            BusOp::Set(mask) => self.register | mask,
            BusOp::Put { mask, value } => (self.register & !mask) | (value & mask),
        };
        if let Some(log) = self.log.as_mut() {
            log.push(op);
        }
        let levels = self.levels();
        if let Some(persistence) = self.persistence.as_mut() {
            persistence.observe(levels);
        }
    }
}

fn check_pin(pin: u8) -> HalResult<u32> {
    if pin < BANK_WIDTH {
        Ok(1 << pin)
    } else {
        Err(HalError::InvalidPin(pin))
    }
}

impl GpioBus for SimBus {
    fn clear_bits(&mut self, mask: u32) {
        self.write(BusOp::Clear(mask));
    }

    fn set_bits(&mut self, mask: u32) {
        self.write(BusOp::Set(mask));
    }

    fn put_masked(&mut self, mask: u32, value: u32) {
        self.write(BusOp::Put { mask, value });
    }
}

impl GpioBusSetup for SimBus {
    fn init(&mut self, mask: u32) -> HalResult<()> {
        self.initialised |= mask;
        self.register &= !mask;
        Ok(())
    }

    fn set_direction_out(&mut self, mask: u32) -> HalResult<()> {
        self.outputs |= mask;
        Ok(())
    }

    fn set_output_override(&mut self, pin: u8, mode: OutputOverride) -> HalResult<()> {
        let bit = check_pin(pin)?;
        self.inverted &= !bit;
        self.forced_low &= !bit;
        self.forced_high &= !bit;
        match mode {
            OutputOverride::Normal => {}
            OutputOverride::Invert => self.inverted |= bit,
            OutputOverride::Low => self.forced_low |= bit,
            OutputOverride::High => self.forced_high |= bit,
        }
        Ok(())
    }

    fn set_drive_strength(&mut self, pin: u8, strength: DriveStrength) -> HalResult<()> {
        check_pin(pin)?;
        self.strengths[pin as usize] = Some(strength);
        Ok(())
    }
}

/// [`SimBus`] shared between the ticker thread and observers
///
/// Every operation takes the lock on its own, so an observer can land
/// between the writes of one tick, just as a camera could on real hardware.
#[derive(Debug, Clone, Default)]
pub struct SharedSimBus(Arc<Mutex<SimBus>>);

impl SharedSimBus {
    /// Share `bus`
    pub fn new(bus: SimBus) -> Self {
        Self(Arc::new(Mutex::new(bus)))
    }

    /// Lock the bank for inspection
    pub fn lock(&self) -> MutexGuard<'_, SimBus> {
        self.0.lock()
    }
}

impl GpioBus for SharedSimBus {
    fn clear_bits(&mut self, mask: u32) {
        self.0.lock().clear_bits(mask);
    }

    fn set_bits(&mut self, mask: u32) {
        self.0.lock().set_bits(mask);
    }

    fn put_masked(&mut self, mask: u32, value: u32) {
        self.0.lock().put_masked(mask, value);
    }
}

impl GpioBusSetup for SharedSimBus {
    fn init(&mut self, mask: u32) -> HalResult<()> {
        self.0.lock().init(mask)
    }

    fn set_direction_out(&mut self, mask: u32) -> HalResult<()> {
        self.0.lock().set_direction_out(mask)
    }

    fn set_output_override(&mut self, pin: u8, mode: OutputOverride) -> HalResult<()> {
        self.0.lock().set_output_override(pin, mode)
    }

    fn set_drive_strength(&mut self, pin: u8, strength: DriveStrength) -> HalResult<()> {
        self.0.lock().set_drive_strength(pin, strength)
    }
}
