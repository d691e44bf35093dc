//! POSIX host port for ledmux.
//!
//! Runs the multiplexing scheduler on a ticker thread against a simulated
//! GPIO bank, with the same start-up path a board would use:
//! [`startup::start`](ledmux_driver::startup::start) configures the pins and
//! registers an exact-interval timer. What the LEDs would show is decoded by
//! [`Persistence`] and can be read back as text.

pub mod bus;
pub mod error;
pub mod persistence;
pub mod time;

pub use bus::{BusOp, SharedSimBus, SimBus};
pub use error::PosixError;
pub use persistence::Persistence;
pub use time::PosixTimer;

use ledmux_core::MuxConfig;
use ledmux_driver::{startup, BusLayout, MuxScheduler};
use log::info;

/// A simulated display running in real time
pub struct HostDisplay {
    bus: SharedSimBus,
    timer: PosixTimer,
    config: MuxConfig,
}

impl HostDisplay {
    /// Configure the simulated pins and start multiplexing
    pub fn start(config: MuxConfig, layout: BusLayout) -> Result<Self, PosixError> {
        let scheduler = MuxScheduler::new(config, layout)?;
        let bus = SharedSimBus::new(SimBus::new().with_persistence(layout));
        let mut timer = PosixTimer::new();

        startup::start(bus.clone(), &mut timer, scheduler, None)?;
        info!(
            "{}-digit display running, tick every {} us, count every {} ticks",
            config.digits(),
            config.tick_period_us(),
            config.ticks_per_count()
        );

        Ok(Self { bus, timer, config })
    }

    /// Display variant
    pub fn config(&self) -> &MuxConfig {
        &self.config
    }

    /// Simulated GPIO bank
    pub fn bus(&self) -> &SharedSimBus {
        &self.bus
    }

    /// What the display currently looks like, highest select line first
    pub fn snapshot(&self) -> String {
        self.bus
            .lock()
            .persistence()
            .map(Persistence::render)
            .unwrap_or_default()
    }

    /// Whether the ticker thread is still running
    pub fn is_running(&self) -> bool {
        self.timer.active() > 0
    }

    /// Stop multiplexing
    pub fn stop(&mut self) {
        self.timer.stop();
        info!("display stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledmux_core::MuxError;
    use ledmux_driver::StartupError;
    use ledmux_hal::HalError;

    #[test]
    fn test_start_rejects_mismatched_layout() {
        let result = HostDisplay::start(MuxConfig::OCTAL, BusLayout::QUAD_BOARD);
        assert!(matches!(
            result,
            Err(PosixError::Config(MuxError::LayoutMismatch))
        ));
    }

    #[test]
    fn test_only_timer_failures_mention_the_timer() {
        let timer = PosixError::from(StartupError::TimerRegistration(HalError::TimerUnavailable));
        assert!(timer.to_string().contains("failed to add timer"));

        let config = PosixError::from(MuxError::LayoutMismatch);
        assert!(!config.to_string().contains("timer"));
        let pins = PosixError::from(StartupError::Bus(HalError::InvalidPin(40)));
        assert!(!pins.to_string().contains("timer"));
    }
}
