use crate::params::Params;

/// Game configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub ball_speed_base: f32,
    pub ball_speed_increase: f32,
    pub ball_speed_multiplier_max: f32,
    pub serve_half_angle: f32,
    pub max_bounce_angle: f32,
    pub paddle_speed_factor: f32,
    pub aim_offset_fraction: f32,
    pub miss_padding: f32,
    pub paddle_height_fraction: f32,
    pub paddle_height_min: f32,
    pub paddle_width_fraction: f32,
    pub paddle_width_min: f32,
    pub ball_radius_fraction: f32,
    pub ball_radius_min: f32,
    pub ball_radius_usable: f32,
    pub max_dt: f32,
    pub poll_interval_ms: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ball_speed_base: Params::BALL_SPEED_BASE,
            ball_speed_increase: Params::BALL_SPEED_INCREASE,
            ball_speed_multiplier_max: Params::BALL_SPEED_MULTIPLIER_MAX,
            serve_half_angle: Params::SERVE_HALF_ANGLE,
            max_bounce_angle: Params::MAX_BOUNCE_ANGLE,
            paddle_speed_factor: Params::PADDLE_SPEED_FACTOR,
            aim_offset_fraction: Params::AIM_OFFSET_FRACTION,
            miss_padding: Params::MISS_PADDING,
            paddle_height_fraction: Params::PADDLE_HEIGHT_FRACTION,
            paddle_height_min: Params::PADDLE_HEIGHT_MIN,
            paddle_width_fraction: Params::PADDLE_WIDTH_FRACTION,
            paddle_width_min: Params::PADDLE_WIDTH_MIN,
            ball_radius_fraction: Params::BALL_RADIUS_FRACTION,
            ball_radius_min: Params::BALL_RADIUS_MIN,
            ball_radius_usable: Params::BALL_RADIUS_USABLE,
            max_dt: Params::MAX_DT,
            poll_interval_ms: Params::POLL_INTERVAL_MS,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current ball speed for a given multiplier
    pub fn ball_speed(&self, multiplier: f32) -> f32 {
        self.ball_speed_base * multiplier
    }

    /// Paddle speed scales with the ball so miss positions stay reachable
    pub fn paddle_speed(&self, multiplier: f32) -> f32 {
        self.paddle_speed_factor * self.ball_speed(multiplier)
    }

    /// Clamp a frame delta (seconds) to `[0, max_dt]`
    pub fn clamp_dt(&self, dt: f32) -> f32 {
        if dt.is_finite() {
            dt.clamp(0.0, self.max_dt)
        } else {
            0.0
        }
    }
}
