use serde::Serialize;

use crate::{Side, Simulation};

/// Ball as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BallView {
    pub x: f32,
    pub y: f32,
    pub r: f32,
}

/// Axis-aligned rectangle, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RectView {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Everything one frame needs, detached from the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub width: f32,
    pub height: f32,
    pub ball: BallView,
    pub left_paddle: RectView,
    pub right_paddle: RectView,
    pub hour_shown: u8,
    pub minute_shown: u8,
    pub paused: bool,
}

impl Snapshot {
    pub fn capture(sim: &Simulation) -> Self {
        let arena = sim.arena();
        let spawn = arena.ball_spawn();
        let (x, y, r) = sim
            .ball()
            .map(|b| (b.pos.x, b.pos.y, b.radius))
            .unwrap_or((spawn.x, spawn.y, arena.ball_radius));

        let paddle_rect = |side: Side| RectView {
            x: arena.paddle_x(side),
            y: sim
                .paddle(side)
                .map(|p| p.y)
                .unwrap_or_else(|| arena.paddle_spawn_y()),
            w: arena.paddle_width,
            h: arena.paddle_height,
        };

        let score = sim.score();
        Self {
            width: arena.width,
            height: arena.height,
            ball: BallView { x, y, r },
            left_paddle: paddle_rect(Side::Left),
            right_paddle: paddle_rect(Side::Right),
            hour_shown: score.hour,
            minute_shown: score.minute,
            paused: !arena.is_playable(),
        }
    }
}
