//! One-time bring-up: pin configuration and timer registration

use ledmux_hal::{DriveStrength, GpioBusSetup, HalResult, OutputOverride, RepeatingTimer, TimerPeriod};

use crate::error::StartupError;
use crate::layout::BusLayout;
use crate::scheduler::MuxScheduler;

/// Configure every display pin as an output
///
/// Segment lines get an inverting output override: masks are active-high
/// but the segments light when pulled low. `strength`, when given, is
/// applied to every display pin.
pub fn init_bus<S>(setup: &mut S, layout: &BusLayout, strength: Option<DriveStrength>) -> HalResult<()>
where
    S: GpioBusSetup + ?Sized,
{
    let mask = layout.mask();
    setup.init(mask)?;
    setup.set_direction_out(mask)?;

    for pin in layout.segment_pins() {
        setup.set_output_override(pin, OutputOverride::Invert)?;
    }

    if let Some(strength) = strength {
        for pin in layout.pins() {
            setup.set_drive_strength(pin, strength)?;
        }
    }

    #[cfg(feature = "defmt")]
    defmt::debug!("display bus ready: {}", layout);

    Ok(())
}

/// Exact-interval timer period for a scheduler's variant
pub fn tick_period(scheduler: &MuxScheduler) -> TimerPeriod {
    TimerPeriod::ExactInterval(scheduler.config().tick_period_us())
}

/// Configure the pins, then hand the scheduler and bus to the timer
///
/// After this returns `Ok` the display runs on its own; the caller only has
/// to idle.
pub fn start<S, T>(
    mut bus: S,
    timer: &mut T,
    mut scheduler: MuxScheduler,
    strength: Option<DriveStrength>,
) -> Result<(), StartupError>
where
    S: GpioBusSetup + Send + 'static,
    T: RepeatingTimer + ?Sized,
{
    init_bus(&mut bus, scheduler.layout(), strength)?;

    let period = tick_period(&scheduler);
    timer
        .add_repeating(period, move || scheduler.on_tick(&mut bus))
        .map_err(StartupError::TimerRegistration)?;

    #[cfg(feature = "defmt")]
    defmt::debug!("multiplexer started every {} us", period.micros());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledmux_core::MuxConfig;
    use ledmux_hal::{GpioBus, HalError, Repeat};
    use std::boxed::Box;
    use std::sync::{Arc, Mutex};
    use std::vec::Vec;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum SetupOp {
        Init(u32),
        DirectionOut(u32),
        Override(u8, OutputOverride),
        Strength(u8, DriveStrength),
        Write,
    }

    #[derive(Clone, Default)]
    struct SetupLog(Arc<Mutex<Vec<SetupOp>>>);

    impl SetupLog {
        fn ops(&self) -> Vec<SetupOp> {
            self.0.lock().unwrap().clone()
        }
    }

    impl GpioBus for SetupLog {
        fn clear_bits(&mut self, _mask: u32) {
            self.0.lock().unwrap().push(SetupOp::Write);
        }

        fn set_bits(&mut self, _mask: u32) {
            self.0.lock().unwrap().push(SetupOp::Write);
        }
    }

    impl GpioBusSetup for SetupLog {
        fn init(&mut self, mask: u32) -> HalResult<()> {
            self.0.lock().unwrap().push(SetupOp::Init(mask));
            Ok(())
        }

        fn set_direction_out(&mut self, mask: u32) -> HalResult<()> {
            self.0.lock().unwrap().push(SetupOp::DirectionOut(mask));
            Ok(())
        }

        fn set_output_override(&mut self, pin: u8, mode: OutputOverride) -> HalResult<()> {
            self.0.lock().unwrap().push(SetupOp::Override(pin, mode));
            Ok(())
        }

        fn set_drive_strength(&mut self, pin: u8, strength: DriveStrength) -> HalResult<()> {
            self.0.lock().unwrap().push(SetupOp::Strength(pin, strength));
            Ok(())
        }
    }

    type Callback = Box<dyn FnMut() -> Repeat + Send>;

    #[derive(Default)]
    struct ManualTimer {
        refuse: bool,
        slots: Vec<(TimerPeriod, Callback)>,
    }

    impl RepeatingTimer for ManualTimer {
        fn add_repeating<F>(&mut self, period: TimerPeriod, callback: F) -> HalResult<()>
        where
            F: FnMut() -> Repeat + Send + 'static,
        {
            if self.refuse {
                return Err(HalError::TimerUnavailable);
            }
            self.slots.push((period, Box::new(callback)));
            Ok(())
        }
    }

    fn quad_scheduler() -> MuxScheduler {
        MuxScheduler::new(MuxConfig::QUAD, BusLayout::QUAD_BOARD).unwrap()
    }

    #[test]
    fn test_init_bus_inverts_segment_pins_only() {
        let mut log = SetupLog::default();
        init_bus(&mut log, &BusLayout::QUAD_BOARD, None).unwrap();

        let mut expected = std::vec![SetupOp::Init(0x3ffc), SetupOp::DirectionOut(0x3ffc)];
        expected.extend((6..14).map(|pin| SetupOp::Override(pin, OutputOverride::Invert)));
        assert_eq!(log.ops(), expected);
    }

    #[test]
    fn test_init_bus_applies_drive_strength_to_every_pin() {
        let mut log = SetupLog::default();
        init_bus(&mut log, &BusLayout::QUAD_BOARD, Some(DriveStrength::Ma12)).unwrap();

        let strengths: Vec<u8> = log
            .ops()
            .into_iter()
            .filter_map(|op| match op {
                SetupOp::Strength(pin, DriveStrength::Ma12) => Some(pin),
                _ => None,
            })
            .collect();
        assert_eq!(strengths, (2..14).collect::<Vec<u8>>());
    }

    #[test]
    fn test_start_registers_exact_interval_timer() {
        let log = SetupLog::default();
        let mut timer = ManualTimer::default();

        start(log.clone(), &mut timer, quad_scheduler(), None).unwrap();

        assert_eq!(timer.slots.len(), 1);
        assert_eq!(timer.slots[0].0, TimerPeriod::ExactInterval(25));

        let setup_ops = log.ops().len();
        assert_eq!((timer.slots[0].1)(), Repeat::Continue);
        assert!(log.ops().len() > setup_ops);
        assert!(log.ops()[setup_ops..].iter().all(|op| *op == SetupOp::Write));
    }

    #[test]
    fn test_start_reports_timer_registration_failure() {
        let mut timer = ManualTimer {
            refuse: true,
            ..ManualTimer::default()
        };

        let err = start(SetupLog::default(), &mut timer, quad_scheduler(), None).unwrap_err();
        assert_eq!(err, StartupError::TimerRegistration(HalError::TimerUnavailable));
        assert!(timer.slots.is_empty());
    }
}
