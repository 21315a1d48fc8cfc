//! Pong clock core
//!
//! A wall clock drawn as a self-playing Pong rally. Hours are the left score,
//! minutes the right. When the real clock advances, the paddle on the losing
//! side is scripted to miss and the score catches up when the ball exits.

pub mod app;
pub mod arena;
pub mod clock;
pub mod components;
pub mod config;
pub mod coupler;
pub mod driver;
pub mod error;
pub mod params;
pub mod resources;
pub mod simulation;
pub mod snapshot;
pub mod systems;
pub mod tick;

pub use app::*;
pub use arena::*;
pub use clock::*;
pub use components::*;
pub use config::*;
pub use driver::*;
pub use error::*;
pub use params::*;
pub use resources::*;
pub use simulation::*;
pub use snapshot::*;
pub use tick::*;

use hecs::World;
use systems::*;

/// Run one variable-length step of the rally physics
///
/// `time.dt` must already be clamped. Exits are reported in `events`; the
/// ball is left where it is so the scoring coupler can react.
#[allow(clippy::too_many_arguments)]
pub fn step(
    world: &mut World,
    time: &Time,
    arena: &Arena,
    config: &Config,
    flags: &MissFlags,
    speed: &mut SpeedState,
    events: &mut Events,
    rng: &mut GameRng,
) {
    // Clear events at start of step
    events.clear();

    // 1. Integrate ball
    move_ball(world, time);

    // 2. Top/bottom walls
    bounce_walls(world, arena);

    // 3. Paddle AI, then 4. keep paddles in bounds
    drive_paddles(world, time, arena, config, flags, speed);
    clamp_paddles(world, arena);

    // 5-6. Paddle collisions, left first
    check_paddle_collisions(world, arena, config, speed, rng, events);

    // 7. Exits
    check_exits(world, arena, events);
}

/// Helper to create a paddle entity
pub fn create_paddle(world: &mut World, side: Side, y: f32) -> hecs::Entity {
    world.spawn((Paddle::new(side, y),))
}

/// Helper to create the ball entity
pub fn create_ball(world: &mut World, pos: glam::Vec2, vel: glam::Vec2, radius: f32) -> hecs::Entity {
    world.spawn((Ball::new(pos, vel, radius),))
}
