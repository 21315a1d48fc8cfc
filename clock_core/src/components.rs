use glam::Vec2;

/// Which end of the arena a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Sign of `vx` for a ball travelling toward this side
    pub fn approach_sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    /// True when a ball with this x velocity is coming at this side
    pub fn is_approached_by(self, vx: f32) -> bool {
        vx * self.approach_sign() > 0.0
    }
}

/// Ball component - the pong ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    pub fn is_finite(&self) -> bool {
        self.pos.is_finite() && self.vel.is_finite() && self.radius.is_finite()
    }
}

/// Paddle component - one computer-controlled paddle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub side: Side,
    pub y: f32,          // Top edge
    pub aim_offset: f32, // Bias added to the ball y when tracking
}

impl Paddle {
    pub fn new(side: Side, y: f32) -> Self {
        Self {
            side,
            y,
            aim_offset: 0.0,
        }
    }

    pub fn center(&self, height: f32) -> f32 {
        self.y + height / 2.0
    }

    /// Whether `y` lies on the paddle face, edges included
    pub fn covers(&self, y: f32, height: f32) -> bool {
        y >= self.y && y <= self.y + height
    }

    /// Move toward `target` by at most `max_step`, snapping when within one step
    pub fn move_toward(&mut self, target: f32, max_step: f32) {
        let delta = target - self.y;
        if delta.abs() <= max_step {
            self.y = target;
        } else {
            self.y += max_step.copysign(delta);
        }
    }
}
