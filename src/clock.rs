//! Frame clock.

use std::time::{Duration, Instant};

/// Wall-clock frame timer.
///
/// With auto-start enabled (the default), the first [`Clock::delta`] call
/// starts the clock and returns zero, so the animation loop needs no
/// explicit start. [`Clock::stop`] freezes the running total and disables
/// auto-start until the next explicit [`Clock::start`].
#[derive(Debug)]
pub struct Clock {
    auto_start: bool,
    running: bool,
    start: Option<Instant>,
    last: Option<Instant>,
    frozen_total: Duration,
}

impl Clock {
    pub fn new(auto_start: bool) -> Self {
        Self {
            auto_start,
            running: false,
            start: None,
            last: None,
            frozen_total: Duration::ZERO,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        let now = Instant::now();
        self.start = Some(now);
        self.last = Some(now);
        self.frozen_total = Duration::ZERO;
        self.running = true;
    }

    pub fn stop(&mut self) {
        if let Some(start) = self.start {
            self.frozen_total = start.elapsed();
        }
        self.running = false;
        self.auto_start = false;
    }

    /// Seconds since the previous `delta` call.
    ///
    /// Returns zero on the auto-starting first call and while stopped.
    pub fn delta(&mut self) -> f32 {
        if self.auto_start && !self.running {
            self.start();
            return 0.0;
        }
        if !self.running {
            return 0.0;
        }
        let now = Instant::now();
        let delta = self
            .last
            .map(|last| now.duration_since(last))
            .unwrap_or(Duration::ZERO);
        self.last = Some(now);
        delta.as_secs_f32()
    }

    /// Seconds since [`Clock::start`], frozen by [`Clock::stop`].
    pub fn total_time(&self) -> f32 {
        if self.running {
            self.start.map(|s| s.elapsed()).unwrap_or(Duration::ZERO)
        } else {
            self.frozen_total
        }
        .as_secs_f32()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_start_first_delta_is_zero() {
        let mut clock = Clock::default();
        assert!(!clock.is_running());
        assert_eq!(clock.delta(), 0.0);
        assert!(clock.is_running());
        assert!(clock.delta() >= 0.0);
    }

    #[test]
    fn test_stop_freezes_total_and_disables_auto_start() {
        let mut clock = Clock::default();
        clock.delta();
        clock.stop();
        let frozen = clock.total_time();
        assert_eq!(clock.total_time(), frozen);
        // No auto-restart after an explicit stop.
        assert_eq!(clock.delta(), 0.0);
        assert!(!clock.is_running());
    }

    #[test]
    fn test_explicit_start_resets_total() {
        let mut clock = Clock::new(false);
        assert_eq!(clock.delta(), 0.0);
        clock.start();
        assert!(clock.is_running());
        assert!(clock.total_time() >= 0.0);
    }
}
