//! [`GpioBus`] over individual embedded-hal output pins
//!
//! For HALs that hand out typed pins instead of a raw bank register. Each
//! `PinBus` owns a contiguous window of the bank starting at `first_pin`
//! and ignores mask bits outside it, so a digit bus and a segment bus can
//! be combined as a `(PinBus, PinBus)` pair.
//!
//! Pins are driven at the logical level. Output inversion for active-low
//! segments belongs to the HAL pin configuration.

use core::convert::Infallible;

use embedded_hal::digital::OutputPin;
use ledmux_hal::GpioBus;

/// Contiguous run of output pins addressed as bank bits
pub struct PinBus<P, const N: usize> {
    first_pin: u8,
    pins: [P; N],
}

impl<P, const N: usize> PinBus<P, N>
where
    P: OutputPin<Error = Infallible>,
{
    /// Wrap `pins`, with `pins[0]` standing for bank bit `first_pin`
    pub fn new(first_pin: u8, pins: [P; N]) -> Self {
        Self { first_pin, pins }
    }

    /// Give the pins back
    pub fn release(self) -> [P; N] {
        self.pins
    }

    fn for_each_in(&mut self, mask: u32, mut f: impl FnMut(&mut P)) {
        let window = mask.checked_shr(u32::from(self.first_pin)).unwrap_or(0);
        for (index, pin) in self.pins.iter_mut().enumerate() {
            let bit = u32::try_from(index).ok().and_then(|index| window.checked_shr(index));
            if bit.is_some_and(|bit| bit & 1 != 0) {
                f(pin);
            }
        }
    }
}

impl<P, const N: usize> GpioBus for PinBus<P, N>
where
    P: OutputPin<Error = Infallible>,
{
    fn clear_bits(&mut self, mask: u32) {
        self.for_each_in(mask, |pin| match pin.set_low() {
            Ok(()) => {}
            Err(never) => match never {},
        });
    }

    fn set_bits(&mut self, mask: u32) {
        self.for_each_in(mask, |pin| match pin.set_high() {
            Ok(()) => {}
            Err(never) => match never {},
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::BusLayout;
    use crate::scheduler::MuxScheduler;
    use embedded_hal::digital::ErrorType;
    use ledmux_core::{encode, Digit, MuxConfig};

    #[derive(Default)]
    struct FakePin {
        high: bool,
        writes: usize,
    }

    impl ErrorType for FakePin {
        type Error = Infallible;
    }

    impl OutputPin for FakePin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            self.writes += 1;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            self.writes += 1;
            Ok(())
        }
    }

    fn levels<const N: usize>(bus: &PinBus<FakePin, N>) -> u32 {
        bus.pins
            .iter()
            .enumerate()
            .filter(|(_, pin)| pin.high)
            .fold(0, |acc, (index, _)| acc | (1 << index))
    }

    #[test]
    fn test_ignores_bits_outside_window() {
        let mut bus = PinBus::new(4, core::array::from_fn::<FakePin, 4, _>(|_| FakePin::default()));
        bus.set_bits(0xffff_000f);
        assert!(bus.pins.iter().all(|pin| pin.writes == 0));

        bus.put_masked(0xf0, 0x50);
        assert_eq!(levels(&bus), 0b0101);
    }

    #[test]
    fn test_window_past_the_bank_is_never_driven() {
        let mut bus = PinBus::new(40, core::array::from_fn::<FakePin, 2, _>(|_| FakePin::default()));
        bus.set_bits(u32::MAX);
        bus.clear_bits(u32::MAX);
        assert!(bus.pins.iter().all(|pin| pin.writes == 0));

        let mut bus = PinBus::new(30, core::array::from_fn::<FakePin, 4, _>(|_| FakePin::default()));
        bus.set_bits(u32::MAX);
        assert_eq!(levels(&bus), 0b0011);
    }

    #[test]
    fn test_drives_quad_display_through_pin_pair() {
        let layout = BusLayout::QUAD_BOARD;
        let digits = PinBus::new(layout.first_digit_pin(), core::array::from_fn::<FakePin, 4, _>(|_| FakePin::default()));
        let segments = PinBus::new(layout.first_segment_pin(), core::array::from_fn::<FakePin, 8, _>(|_| FakePin::default()));
        let mut bus = (digits, segments);
        let mut scheduler = MuxScheduler::new(MuxConfig::QUAD, layout).unwrap();

        scheduler.on_tick(&mut bus);

        // position 0 is wired to select line 3 on the 4-digit board
        assert_eq!(levels(&bus.0), 0b1000);
        assert_eq!(levels(&bus.1), encode(Digit::ZERO) as u32);
    }
}
