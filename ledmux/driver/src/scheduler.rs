//! Fixed-rate multiplexing scheduler
//!
//! One call to [`MuxScheduler::on_tick`] is one timer firing. The bus writes
//! for a tick always go in this order:
//!
//! 1. clear every select line,
//! 2. drive the segment bus (pattern, or blank),
//! 3. assert the select line for this tick's position.
//!
//! Segments change only while no digit is selected, so a pattern never
//! lands on the previous digit.

use ledmux_core::{DigitFrame, MuxConfig, MuxError, MuxResult, MuxTick};
use ledmux_hal::{GpioBus, Repeat};

use crate::layout::BusLayout;

/// Scheduler state: the display variant, where it is wired, and the tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MuxScheduler {
    config: MuxConfig,
    layout: BusLayout,
    tick: MuxTick,
}

impl MuxScheduler {
    /// Create a scheduler starting at tick zero
    pub fn new(config: MuxConfig, layout: BusLayout) -> MuxResult<Self> {
        if config.digits() != layout.digits() {
            return Err(MuxError::LayoutMismatch);
        }
        Ok(Self {
            config,
            layout,
            tick: MuxTick::ZERO,
        })
    }

    /// Start from an arbitrary tick, reduced into the counter period
    pub fn with_tick(mut self, tick: MuxTick) -> Self {
        self.tick = tick.wrapped(self.config.period());
        self
    }

    /// Display variant
    pub fn config(&self) -> &MuxConfig {
        &self.config
    }

    /// Pin placement
    pub fn layout(&self) -> &BusLayout {
        &self.layout
    }

    /// Tick the next call will render
    pub fn tick(&self) -> MuxTick {
        self.tick
    }

    /// Frame the next call will render
    pub fn next_frame(&self) -> DigitFrame {
        self.config.select(self.tick)
    }

    /// Render one tick onto `bus` and advance the counter
    ///
    /// Always returns [`Repeat::Continue`]: the display runs until power-off.
    pub fn on_tick<B: GpioBus + ?Sized>(&mut self, bus: &mut B) -> Repeat {
        let frame = self.config.select(self.tick);
        let layout = &self.layout;

        bus.clear_bits(layout.digit_mask());
        if frame.visible {
            bus.put_masked(layout.segment_mask(), layout.segment_bits(frame.segments()));
        } else {
            bus.clear_bits(layout.segment_mask());
        }
        bus.set_bits(layout.select_bits(frame.select_line));

        self.tick.advance(self.config.period());
        Repeat::Continue
    }
}
