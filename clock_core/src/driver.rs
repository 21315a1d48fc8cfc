use crate::{coupler, Clock, Events, Simulation, Snapshot};

/// Something that can draw one frame
pub trait Renderer {
    fn draw(&mut self, snapshot: &Snapshot);
}

impl<F: FnMut(&Snapshot)> Renderer for F {
    fn draw(&mut self, snapshot: &Snapshot) {
        self(snapshot)
    }
}

/// Turns frame timestamps into simulation steps
#[derive(Debug, Clone, Default)]
pub struct FrameDriver {
    last_timestamp_ms: Option<f64>,
    running: bool,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)start; the first frame after this steps by zero
    pub fn start(&mut self) {
        self.running = true;
        self.last_timestamp_ms = None;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.last_timestamp_ms = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Seconds since the previous frame, unclamped
    pub fn elapsed(&mut self, timestamp_ms: f64) -> f32 {
        let dt = match self.last_timestamp_ms {
            Some(last) if timestamp_ms > last => ((timestamp_ms - last) / 1000.0) as f32,
            _ => 0.0,
        };
        self.last_timestamp_ms = Some(timestamp_ms);
        dt
    }

    /// Step, settle exits, then draw. Frames while stopped are dropped.
    pub fn frame<C, R>(
        &mut self,
        timestamp_ms: f64,
        sim: &mut Simulation,
        clock: &C,
        renderer: &mut R,
    ) -> Option<Events>
    where
        C: Clock + ?Sized,
        R: Renderer + ?Sized,
    {
        if !self.running {
            return None;
        }
        let dt = self.elapsed(timestamp_ms);
        let events = sim.step(dt);
        coupler::reconcile(&events, clock, sim);
        renderer.draw(&sim.snapshot());
        Some(events)
    }
}
