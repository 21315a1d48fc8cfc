use std::fmt;

use crate::clock::ClockReading;
use crate::components::Side;

/// Time resource for one simulation step
#[derive(Debug, Clone, Copy)]
pub struct Time {
    pub dt: f32,  // Delta time for this step (seconds)
    pub now: f32, // Total simulated time
}

impl Time {
    pub fn new(dt: f32, now: f32) -> Self {
        Self { dt, now }
    }
}

impl Default for Time {
    fn default() -> Self {
        Self {
            dt: 0.016,
            now: 0.0,
        }
    }
}

/// The score the user sees: hours on the left, minutes on the right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayedScore {
    pub hour: u8,
    pub minute: u8,
}

impl DisplayedScore {
    pub fn from_reading(reading: ClockReading) -> Self {
        Self {
            hour: reading.hour(),
            minute: reading.minute(),
        }
    }
}

impl fmt::Display for DisplayedScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Last reading taken from the clock source, used to detect advances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockTarget {
    pub hour: u8,
    pub minute: u8,
}

impl ClockTarget {
    pub fn from_reading(reading: ClockReading) -> Self {
        Self {
            hour: reading.hour(),
            minute: reading.minute(),
        }
    }
}

/// Per-side scripted miss flags
///
/// `left` lets the ball out on the left so the minute (right) score updates;
/// `right` lets it out on the right so the hour (left) score updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MissFlags {
    pub left: bool,
    pub right: bool,
}

impl MissFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn set(&mut self, side: Side, value: bool) {
        match side {
            Side::Left => self.left = value,
            Side::Right => self.right = value,
        }
    }

    pub fn clear(&mut self) {
        self.left = false;
        self.right = false;
    }
}

/// Ball speed multiplier, `1.0..=max`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedState {
    pub multiplier: f32,
}

impl SpeedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.multiplier = 1.0;
    }

    pub fn increase(&mut self, factor: f32, max: f32) {
        self.multiplier = (self.multiplier * factor).clamp(1.0, max);
    }
}

impl Default for SpeedState {
    fn default() -> Self {
        Self { multiplier: 1.0 }
    }
}

/// Serve bookkeeping: the horizontal sign of the last exit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServeState {
    pub last_exit_dir: f32, // -1.0 or 1.0
}

impl ServeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_exit(&mut self, side: Side) {
        self.last_exit_dir = side.approach_sign();
    }

    /// Flip and return the direction the next serve travels
    pub fn next_serve_dir(&mut self) -> f32 {
        self.last_exit_dir = -self.last_exit_dir;
        self.last_exit_dir
    }
}

impl Default for ServeState {
    fn default() -> Self {
        // First serve goes right
        Self { last_exit_dir: -1.0 }
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }

    /// Uniform sample in `[-half_width, half_width]`
    pub fn symmetric(&mut self, half_width: f32) -> f32 {
        use rand::Rng;
        let half_width = half_width.abs();
        if half_width == 0.0 || !half_width.is_finite() {
            return 0.0;
        }
        self.0.gen_range(-half_width..=half_width)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Events that occurred during this step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Events {
    pub exit_left: bool,
    pub exit_right: bool,
    pub left_paddle_hit: bool,
    pub right_paddle_hit: bool,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn exited(&self, side: Side) -> bool {
        match side {
            Side::Left => self.exit_left,
            Side::Right => self.exit_right,
        }
    }

    pub fn record_exit(&mut self, side: Side) {
        match side {
            Side::Left => self.exit_left = true,
            Side::Right => self.exit_right = true,
        }
    }

    pub fn record_paddle_hit(&mut self, side: Side) {
        match side {
            Side::Left => self.left_paddle_hit = true,
            Side::Right => self.right_paddle_hit = true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_displayed_score_formats_as_clock() {
        let score = DisplayedScore { hour: 9, minute: 5 };
        assert_eq!(score.to_string(), "09:05");
    }

    #[test]
    fn test_speed_increase_caps_at_max() {
        let mut speed = SpeedState::new();
        for _ in 0..20 {
            speed.increase(1.08, 1.8);
        }
        assert_eq!(speed.multiplier, 1.8);
        speed.reset();
        assert_eq!(speed.multiplier, 1.0);
    }

    #[test]
    fn test_serve_alternates_against_last_exit() {
        let mut serve = ServeState::new();
        assert_eq!(serve.next_serve_dir(), 1.0, "First serve goes right");

        serve.record_exit(Side::Left);
        assert_eq!(serve.next_serve_dir(), 1.0, "After a left exit serve right");

        serve.record_exit(Side::Right);
        assert_eq!(serve.next_serve_dir(), -1.0, "After a right exit serve left");
    }

    #[test]
    fn test_miss_flags_per_side() {
        let mut flags = MissFlags::new();
        flags.set(Side::Left, true);
        assert!(flags.get(Side::Left));
        assert!(!flags.get(Side::Right));
        flags.clear();
        assert_eq!(flags, MissFlags::default());
    }

    #[test]
    fn test_events_clear() {
        let mut events = Events::new();
        events.record_exit(Side::Left);
        events.record_paddle_hit(Side::Right);

        events.clear();

        assert!(!events.exited(Side::Left));
        assert!(!events.right_paddle_hit);
        assert!(!events.exited(Side::Right));
    }

    #[test]
    fn test_rng_symmetric_range() {
        let mut rng = GameRng::new(7);
        for _ in 0..100 {
            let v = rng.symmetric(10.0);
            assert!((-10.0..=10.0).contains(&v));
        }
        assert_eq!(rng.symmetric(0.0), 0.0);
    }
}
