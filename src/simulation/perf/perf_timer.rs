//! Phase timing for `PhysicsStats`
//!
//! The detection pipeline starts one timer, calls `lap_ms` after the broad
//! phase and again after the narrow phase. Response and constraint passes
//! use their own timer and read `elapsed_ms` once.

#[cfg(target_arch = "wasm32")]
use js_sys;

/// Millisecond stopwatch
///
/// `Date.now()` in the browser, `Instant` natively.
#[derive(Clone, Copy)]
pub(crate) struct PerfTimer {
    #[cfg(target_arch = "wasm32")]
    start_ms: f64,
    #[cfg(not(target_arch = "wasm32"))]
    start: std::time::Instant,
}

impl PerfTimer {
    pub(crate) fn start() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            PerfTimer { start_ms: js_sys::Date::now() }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            PerfTimer { start: std::time::Instant::now() }
        }
    }

    /// Time since `start` (or the last lap)
    pub(crate) fn elapsed_ms(&self) -> f64 {
        #[cfg(target_arch = "wasm32")]
        {
            js_sys::Date::now() - self.start_ms
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.start.elapsed().as_secs_f64() * 1000.0
        }
    }

    /// Close the current phase: return its duration and start the next one
    pub(crate) fn lap_ms(&mut self) -> f64 {
        let ms = self.elapsed_ms();
        *self = PerfTimer::start();
        ms
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn laps_restart_the_clock() {
        let mut timer = PerfTimer::start();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let first = timer.lap_ms();
        assert!(first >= 5.0);
        assert!(timer.elapsed_ms() < first);
    }
}
