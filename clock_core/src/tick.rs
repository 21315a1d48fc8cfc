//! Wall-clock tick detection
//!
//! Polled about once a second. A change in the minute raises the left miss
//! flag, a change in the hour the right one. While a side's flag is pending
//! its target is left alone, so a second tick coalesces into the first.

use crate::{Clock, Side, Simulation};

/// What one poll observed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub minute_advanced: bool,
    pub hour_advanced: bool,
    pub minute_deferred: bool,
    pub hour_deferred: bool,
    pub clock_failed: bool,
}

/// Periodic poller of the clock source
#[derive(Debug, Clone)]
pub struct TickDetector {
    interval_ms: f64,
    next_poll_ms: Option<f64>,
}

impl TickDetector {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            next_poll_ms: None,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Arm the schedule; the first poll falls one interval after `now_ms`
    pub fn start(&mut self, now_ms: f64) {
        self.next_poll_ms = Some(now_ms + self.interval_ms);
    }

    pub fn stop(&mut self) {
        self.next_poll_ms = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_poll_ms.is_some()
    }

    /// True once per elapsed interval, for hosts that drive the schedule
    ///
    /// Missed intervals collapse into one poll; the next one is scheduled
    /// from `now_ms`.
    pub fn due(&mut self, now_ms: f64) -> bool {
        match self.next_poll_ms {
            Some(next) if now_ms >= next => {
                let behind = ((now_ms - next) / self.interval_ms).floor() + 1.0;
                self.next_poll_ms = Some(next + behind * self.interval_ms);
                true
            }
            _ => false,
        }
    }

    /// Read the clock and raise miss flags for the sides that owe an update
    pub fn poll<C: Clock + ?Sized>(&self, clock: &C, sim: &mut Simulation) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        let reading = match clock.read() {
            Ok(reading) => reading,
            Err(err) => {
                log::warn!("Clock read failed, skipping poll: {}", err);
                outcome.clock_failed = true;
                return outcome;
            }
        };

        let target = sim.clock_target();
        let flags = sim.miss_flags();

        if reading.minute() != target.minute {
            if flags.left {
                outcome.minute_deferred = true;
                log::debug!("Minute {} deferred, left miss still pending", reading.minute());
            } else {
                sim.schedule_miss(Side::Left, reading.minute());
                outcome.minute_advanced = true;
                log::debug!("Minute advanced to {}, left paddle will miss", reading.minute());
            }
        }

        if reading.hour() != target.hour {
            if flags.right {
                outcome.hour_deferred = true;
                log::debug!("Hour {} deferred, right miss still pending", reading.hour());
            } else {
                sim.schedule_miss(Side::Right, reading.hour());
                outcome.hour_advanced = true;
                log::debug!("Hour advanced to {}, right paddle will miss", reading.hour());
            }
        }

        outcome
    }
}

impl Default for TickDetector {
    fn default() -> Self {
        Self::new(crate::Params::POLL_INTERVAL_MS)
    }
}
