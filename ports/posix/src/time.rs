//! Repeating timer for POSIX hosts
//!
//! Each registered callback gets its own ticker thread. Exact-interval
//! timers sleep until absolute deadlines on the monotonic clock, so a late
//! wake-up shortens the next sleep instead of shifting every later tick.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use ledmux_hal::{HalError, HalResult, Repeat, RepeatingTimer, TimerPeriod};
use log::{debug, warn};

/// Thread-backed [`RepeatingTimer`]
///
/// Dropping the timer stops and joins every ticker thread.
pub struct PosixTimer {
    running: Arc<AtomicBool>,
    threads: Vec<JoinHandle<()>>,
}

impl PosixTimer {
    /// Create a timer with no registered callbacks
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
            threads: Vec::new(),
        }
    }

    /// Number of ticker threads still running
    pub fn active(&self) -> usize {
        self.threads.iter().filter(|handle| !handle.is_finished()).count()
    }

    /// Stop every ticker thread and wait for it to finish
    ///
    /// Later registrations fail with [`HalError::TimerUnavailable`].
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        for handle in self.threads.drain(..) {
            if handle.join().is_err() {
                warn!("ticker thread panicked");
            }
        }
    }
}

impl Default for PosixTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PosixTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

impl RepeatingTimer for PosixTimer {
    fn add_repeating<F>(&mut self, period: TimerPeriod, callback: F) -> HalResult<()>
    where
        F: FnMut() -> Repeat + Send + 'static,
    {
        if period.micros() == 0 {
            return Err(HalError::InvalidParameter);
        }
        if !self.running.load(Ordering::SeqCst) {
            warn!("ticker registration after stop");
            return Err(HalError::TimerUnavailable);
        }

        let running = Arc::clone(&self.running);
        let handle = thread::Builder::new()
            .name(format!("ledmux-tick-{}", self.threads.len()))
            .spawn(move || ticker_thread(period, running, callback))
            .map_err(|err| {
                warn!("cannot spawn ticker thread: {err}");
                HalError::TimerUnavailable
            })?;

        debug!("ticker started: {period:?}");
        self.threads.push(handle);
        Ok(())
    }
}

fn ticker_thread<F>(period: TimerPeriod, running: Arc<AtomicBool>, mut callback: F)
where
    F: FnMut() -> Repeat,
{
    let step = Duration::from_micros(u64::from(period.micros()));
    let mut next_tick = Instant::now();

    while running.load(Ordering::Relaxed) {
        match period {
            TimerPeriod::ExactInterval(_) => {
                // Advance to next tick (absolute time)
                next_tick += step;
                let now = Instant::now();
                if next_tick > now {
                    thread::sleep(next_tick - now);
                }
            }
            TimerPeriod::AfterCallback(_) => thread::sleep(step),
        }

        if callback() == Repeat::Cancel {
            debug!("ticker cancelled by callback");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn wait_for(deadline: Duration, mut done: impl FnMut() -> bool) -> bool {
        let start = Instant::now();
        while start.elapsed() < deadline {
            if done() {
                return true;
            }
            thread::sleep(Duration::from_millis(1));
        }
        done()
    }

    #[test]
    fn test_zero_period_is_rejected() {
        let mut timer = PosixTimer::new();
        let result = timer.add_repeating(TimerPeriod::ExactInterval(0), || Repeat::Continue);
        assert_eq!(result, Err(HalError::InvalidParameter));
        assert_eq!(timer.active(), 0);
    }

    #[test]
    fn test_callback_cancel_ends_thread() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let mut timer = PosixTimer::new();

        timer
            .add_repeating(TimerPeriod::ExactInterval(100), move || {
                if seen.fetch_add(1, Ordering::SeqCst) + 1 == 10 {
                    Repeat::Cancel
                } else {
                    Repeat::Continue
                }
            })
            .unwrap();

        assert!(wait_for(Duration::from_secs(5), || timer.active() == 0));
        assert_eq!(count.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn test_stop_joins_running_threads() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let mut timer = PosixTimer::new();

        timer
            .add_repeating(TimerPeriod::AfterCallback(200), move || {
                seen.fetch_add(1, Ordering::SeqCst);
                Repeat::Continue
            })
            .unwrap();

        assert!(wait_for(Duration::from_secs(5), || count.load(Ordering::SeqCst) > 3));
        timer.stop();
        let stopped_at = count.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(5));
        assert_eq!(count.load(Ordering::SeqCst), stopped_at);
        assert_eq!(timer.active(), 0);
    }

    #[test]
    fn test_registration_after_stop_is_refused() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let mut timer = PosixTimer::new();
        timer.stop();

        let result = timer.add_repeating(TimerPeriod::ExactInterval(100), move || {
            seen.fetch_add(1, Ordering::SeqCst);
            Repeat::Continue
        });

        assert_eq!(result, Err(HalError::TimerUnavailable));
        thread::sleep(Duration::from_millis(20));
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(timer.active(), 0);
    }
}
