use glam::Vec2;

use crate::components::Side;
use crate::config::Config;

/// The play field and the sizes derived from it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub ball_radius: f32,
    playable: bool,
}

impl Arena {
    pub fn new(width: f32, height: f32, config: &Config) -> Self {
        let mut arena = Self {
            width: 0.0,
            height: 0.0,
            paddle_width: 0.0,
            paddle_height: 0.0,
            ball_radius: 0.0,
            playable: false,
        };
        arena.resize(width, height, config);
        arena
    }

    /// Recompute paddle and ball sizes for a new viewport
    ///
    /// Sizes that do not fit are scaled down together. If the ball is still
    /// too small to be meaningful the arena is flagged unplayable and the
    /// simulation holds the ball until a usable size arrives.
    pub fn resize(&mut self, width: f32, height: f32, config: &Config) {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        let height = if height.is_finite() { height.max(0.0) } else { 0.0 };

        let mut paddle_height = (height * config.paddle_height_fraction).max(config.paddle_height_min);
        let mut paddle_width = (width * config.paddle_width_fraction).max(config.paddle_width_min);
        let mut ball_radius =
            (width.min(height) * config.ball_radius_fraction).max(config.ball_radius_min);

        let needed_width = 2.0 * paddle_width + 2.0 * ball_radius;
        if width < needed_width || height < paddle_height {
            let scale = (width / needed_width).min(height / paddle_height).clamp(0.0, 1.0);
            paddle_height *= scale;
            paddle_width *= scale;
            ball_radius *= scale;
        }

        self.width = width;
        self.height = height;
        self.paddle_width = paddle_width;
        self.paddle_height = paddle_height;
        self.ball_radius = ball_radius;
        // Scaling guarantees the paddles fit, so only the ball size can disqualify
        self.playable = ball_radius >= config.ball_radius_usable && height >= 2.0 * ball_radius;
    }

    /// False when the viewport is too small to run a rally
    pub fn is_playable(&self) -> bool {
        self.playable
    }

    /// Highest allowed paddle top edge
    pub fn paddle_max_y(&self) -> f32 {
        (self.height - self.paddle_height).max(0.0)
    }

    /// Clamp a paddle top edge to `[0, H - ph]`
    pub fn clamp_paddle_y(&self, y: f32) -> f32 {
        y.clamp(0.0, self.paddle_max_y())
    }

    /// Top edge that centres a paddle vertically
    pub fn paddle_spawn_y(&self) -> f32 {
        self.paddle_max_y() / 2.0
    }

    pub fn ball_spawn(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Left edge of the paddle rectangle on `side`
    pub fn paddle_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => 0.0,
            Side::Right => self.width - self.paddle_width,
        }
    }

    /// X of the face the ball strikes
    pub fn paddle_face_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.paddle_width,
            Side::Right => self.width - self.paddle_width,
        }
    }
}
