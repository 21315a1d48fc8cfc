/// Tuning parameters for the Pong clock
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Ball
    pub const BALL_SPEED_BASE: f32 = 360.0; // px/s, ~2.2s to cross 800px
    pub const BALL_SPEED_INCREASE: f32 = 1.08; // Multiply speed on paddle hit
    pub const BALL_SPEED_MULTIPLIER_MAX: f32 = 1.8;
    pub const SERVE_HALF_ANGLE: f32 = std::f32::consts::FRAC_PI_8;
    pub const MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_4;

    // Paddle AI
    pub const PADDLE_SPEED_FACTOR: f32 = 1.2; // Relative to current ball speed
    pub const AIM_OFFSET_FRACTION: f32 = 0.35; // Of paddle height, either way
    pub const MISS_PADDING: f32 = 15.0; // px beyond the ball edge

    // Geometry, as fractions of the viewport with pixel floors
    pub const PADDLE_HEIGHT_FRACTION: f32 = 0.18;
    pub const PADDLE_HEIGHT_MIN: f32 = 40.0;
    pub const PADDLE_WIDTH_FRACTION: f32 = 0.015;
    pub const PADDLE_WIDTH_MIN: f32 = 8.0;
    pub const BALL_RADIUS_FRACTION: f32 = 0.015;
    pub const BALL_RADIUS_MIN: f32 = 5.0;
    pub const BALL_RADIUS_USABLE: f32 = 1.0; // Below this the arena is paused

    // Timing
    pub const MAX_DT: f32 = 0.05; // Clamp to prevent tunnelling after backgrounding
    pub const POLL_INTERVAL_MS: f64 = 1000.0;
}
