//! Scheduler cell for bare-metal timer interrupts
//!
//! On targets whose timer fires a plain interrupt handler rather than a
//! closure, the scheduler and its bus live in a `static`:
//!
//! ```ignore
//! static DISPLAY: SharedScheduler<Bus> = SharedScheduler::new();
//!
//! #[interrupt]
//! fn TIMER_IRQ_0() {
//!     DISPLAY.on_interrupt();
//! }
//! ```
//!
//! Only the interrupt handler drives the bus; other contexts may inspect the
//! state through [`SharedScheduler::with`].

use core::cell::RefCell;

use critical_section::Mutex;
use ledmux_hal::{GpioBus, Repeat};

use crate::scheduler::MuxScheduler;

/// Scheduler and bus guarded by a critical section
pub struct SharedScheduler<B> {
    inner: Mutex<RefCell<Option<(MuxScheduler, B)>>>,
}

impl<B: GpioBus> SharedScheduler<B> {
    /// Create an empty cell
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Move a scheduler and its bus into the cell
    ///
    /// Returns the previous pair, if any.
    pub fn install(&self, scheduler: MuxScheduler, bus: B) -> Option<(MuxScheduler, B)> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).replace((scheduler, bus)))
    }

    /// Take the scheduler and bus back out
    pub fn take(&self) -> Option<(MuxScheduler, B)> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).take())
    }

    /// Check if a scheduler is installed
    pub fn is_installed(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow_ref(cs).is_some())
    }

    /// Run one tick from the timer interrupt
    ///
    /// Returns `None` when nothing has been installed yet.
    pub fn on_interrupt(&self) -> Option<Repeat> {
        critical_section::with(|cs| {
            let mut slot = self.inner.borrow_ref_mut(cs);
            let (scheduler, bus) = slot.as_mut()?;
            Some(scheduler.on_tick(bus))
        })
    }

    /// Inspect the installed scheduler and bus
    pub fn with<R>(&self, f: impl FnOnce(&MuxScheduler, &B) -> R) -> Option<R> {
        critical_section::with(|cs| {
            let slot = self.inner.borrow_ref(cs);
            slot.as_ref().map(|(scheduler, bus)| f(scheduler, bus))
        })
    }
}

impl<B: GpioBus> Default for SharedScheduler<B> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::BusLayout;
    use ledmux_core::{MuxConfig, MuxTick};

    #[derive(Default)]
    struct Bank(u32);

    impl GpioBus for Bank {
        fn clear_bits(&mut self, mask: u32) {
            self.0 &= !mask;
        }

        fn set_bits(&mut self, mask: u32) {
            self.0 |= mask;
        }
    }

    static DISPLAY: SharedScheduler<Bank> = SharedScheduler::new();

    #[test]
    fn test_interrupt_before_install_is_ignored() {
        let cell: SharedScheduler<Bank> = SharedScheduler::new();
        assert_eq!(cell.on_interrupt(), None);
        assert!(!cell.is_installed());
    }

    #[test]
    fn test_interrupt_ticks_installed_scheduler() {
        let scheduler = MuxScheduler::new(MuxConfig::OCTAL, BusLayout::OCTAL_BOARD).unwrap();
        assert!(DISPLAY.install(scheduler, Bank::default()).is_none());

        for _ in 0..5 {
            assert_eq!(DISPLAY.on_interrupt(), Some(Repeat::Continue));
        }

        let (tick, bank) = DISPLAY.with(|scheduler, bank| (scheduler.tick(), bank.0)).unwrap();
        assert_eq!(tick, MuxTick::new(5));
        assert_eq!(bank & BusLayout::OCTAL_BOARD.digit_mask(), 1 << (4 + 2));

        let (scheduler, _) = DISPLAY.take().unwrap();
        assert_eq!(scheduler.tick(), MuxTick::new(5));
        assert!(!DISPLAY.is_installed());
    }
}
