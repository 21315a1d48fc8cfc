use crate::{
    Clock, ClockReading, Config, Events, FrameDriver, Renderer, Simulation, Snapshot, TickDetector,
    TickOutcome,
};

/// The whole clock: simulation, tick detector, frame driver and clock source
///
/// Hosts call [`frame`](Self::frame) once per display refresh,
/// [`poll`](Self::poll) from a one-second timer and [`resize`](Self::resize)
/// on viewport changes, all from the same thread.
pub struct PongClock<C> {
    clock: C,
    sim: Simulation,
    ticks: TickDetector,
    driver: FrameDriver,
}

impl<C: Clock> PongClock<C> {
    pub fn new(clock: C, width: f32, height: f32, seed: u64) -> Self {
        Self::with_config(Config::new(), clock, width, height, seed)
    }

    pub fn with_config(config: Config, clock: C, width: f32, height: f32, seed: u64) -> Self {
        let initial = match clock.read() {
            Ok(reading) => reading,
            Err(err) => {
                log::warn!("Initial clock read failed, starting from 00:00: {}", err);
                ClockReading::default()
            }
        };
        let ticks = TickDetector::new(config.poll_interval_ms);
        let sim = Simulation::with_config(config, width, height, initial, seed);
        log::info!("Pong clock created at {} ({}x{})", initial, width, height);
        Self {
            clock,
            sim,
            ticks,
            driver: FrameDriver::new(),
        }
    }

    /// Start the poller and the frame driver
    pub fn start(&mut self, now_ms: f64) {
        self.ticks.start(now_ms);
        self.driver.start();
        log::info!("Pong clock started");
    }

    /// Cancel the poller and the frame driver
    pub fn stop(&mut self) {
        self.ticks.stop();
        self.driver.stop();
        log::info!("Pong clock stopped");
    }

    /// Stop drawing (hidden viewport); miss flags and the poller survive
    pub fn suspend_frames(&mut self) {
        self.driver.stop();
    }

    /// Resume drawing with fresh timestamps
    pub fn resume_frames(&mut self) {
        if self.ticks.is_running() {
            self.driver.start();
        }
    }

    pub fn is_running(&self) -> bool {
        self.ticks.is_running()
    }

    /// Frame callback
    pub fn frame<R: Renderer + ?Sized>(
        &mut self,
        timestamp_ms: f64,
        renderer: &mut R,
    ) -> Option<Events> {
        self.driver
            .frame(timestamp_ms, &mut self.sim, &self.clock, renderer)
    }

    /// Timer callback; does nothing once stopped
    pub fn poll(&mut self) -> Option<TickOutcome> {
        if !self.ticks.is_running() {
            return None;
        }
        Some(self.ticks.poll(&self.clock, &mut self.sim))
    }

    /// Poll if an interval has elapsed, for hosts with one loop
    pub fn poll_due(&mut self, now_ms: f64) -> Option<TickOutcome> {
        if self.ticks.due(now_ms) {
            self.poll()
        } else {
            None
        }
    }

    /// Viewport callback
    pub fn resize(&mut self, width: f32, height: f32) {
        self.sim.resize(width, height);
    }

    pub fn snapshot(&self) -> Snapshot {
        self.sim.snapshot()
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClockReading, DisplayedScore, ManualClock};

    fn noop(_: &Snapshot) {}

    #[test]
    fn test_initial_score_comes_from_clock() {
        let clock = ManualClock::new(ClockReading::new(10, 30).unwrap());
        let app = PongClock::new(&clock, 800.0, 600.0, 1);
        assert_eq!(app.simulation().score(), DisplayedScore { hour: 10, minute: 30 });
    }

    #[test]
    fn test_failed_initial_read_starts_at_midnight() {
        let clock = ManualClock::new(ClockReading::new(10, 30).unwrap());
        clock.set_failing(true);
        let mut app = PongClock::new(&clock, 800.0, 600.0, 1);
        assert_eq!(app.simulation().score(), DisplayedScore::default());

        clock.set_failing(false);
        app.start(0.0);
        app.poll();
        let flags = app.simulation().miss_flags();
        assert!(flags.left && flags.right, "Both sides owe an update");
    }

    #[test]
    fn test_stop_cancels_poll_and_frames() {
        let clock = ManualClock::new(ClockReading::new(10, 30).unwrap());
        let mut app = PongClock::new(&clock, 800.0, 600.0, 1);
        app.start(0.0);
        assert!(app.frame(0.0, &mut noop).is_some());

        app.stop();

        assert!(app.poll().is_none());
        assert!(app.frame(16.0, &mut noop).is_none());
    }

    #[test]
    fn test_suspended_frames_keep_pending_miss() {
        let clock = ManualClock::new(ClockReading::new(10, 30).unwrap());
        let mut app = PongClock::new(&clock, 800.0, 600.0, 1);
        app.start(0.0);
        clock.set(ClockReading::new(10, 31).unwrap());
        app.poll();

        app.suspend_frames();
        assert!(app.frame(16.0, &mut noop).is_none());
        app.resume_frames();

        assert!(app.simulation().miss_flags().left, "Flag survives backgrounding");
        let before = app.snapshot().ball;
        app.frame(600_000.0, &mut noop);
        assert_eq!(app.snapshot().ball, before, "First frame after resume has zero dt");
    }
}
