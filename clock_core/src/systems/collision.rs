use crate::{Arena, Ball, Config, Events, GameRng, Paddle, Side, SpeedState};
use glam::Vec2;
use hecs::World;

/// Reflect the ball off the top and bottom walls
pub fn bounce_walls(world: &mut World, arena: &Arena) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        let r = ball.radius;
        if ball.pos.y < r {
            ball.pos.y = r;
            ball.vel.y = ball.vel.y.abs();
        } else if ball.pos.y > arena.height - r {
            ball.pos.y = arena.height - r;
            ball.vel.y = -ball.vel.y.abs();
        }
    }
}

/// Check ball collisions with both paddles, left first
pub fn check_paddle_collisions(
    world: &mut World,
    arena: &Arena,
    config: &Config,
    speed: &mut SpeedState,
    rng: &mut GameRng,
    events: &mut Events,
) {
    // Collect ball and paddle data without holding borrows
    let ball = {
        let mut ball_query = world.query::<&Ball>();
        ball_query.iter().next().map(|(_e, ball)| *ball)
    };
    let Some(mut ball) = ball else {
        return; // No ball in world
    };
    let paddles: Vec<Paddle> = world
        .query::<&Paddle>()
        .iter()
        .map(|(_e, paddle)| *paddle)
        .collect();

    for side in [Side::Left, Side::Right] {
        let Some(paddle) = paddles.iter().find(|p| p.side == side) else {
            continue;
        };
        if !touches_face(&ball, paddle, arena) {
            continue;
        }

        resolve_hit(&mut ball, paddle, arena, config, speed);
        events.record_paddle_hit(side);

        // Update ball
        for (_entity, b) in world.query_mut::<&mut Ball>() {
            *b = ball;
        }

        // The other paddle picks a fresh contact point for the return
        let half_range = config.aim_offset_fraction * arena.paddle_height;
        for (_entity, other) in world.query_mut::<&mut Paddle>() {
            if other.side == side.opposite() {
                other.aim_offset = rng.symmetric(half_range);
            }
        }
        return;
    }
}

/// The ball has reached the face while moving toward it, within its span
fn touches_face(ball: &Ball, paddle: &Paddle, arena: &Arena) -> bool {
    let face = arena.paddle_face_x(paddle.side);
    let reached = match paddle.side {
        Side::Left => ball.pos.x - ball.radius < face,
        Side::Right => ball.pos.x + ball.radius > face,
    };
    reached
        && paddle.side.is_approached_by(ball.vel.x)
        && paddle.covers(ball.pos.y, arena.paddle_height)
}

/// Bounce the ball off `paddle` with an angle set by the contact point
fn resolve_hit(
    ball: &mut Ball,
    paddle: &Paddle,
    arena: &Arena,
    config: &Config,
    speed: &mut SpeedState,
) {
    // Relative position from -1 (top edge) to 1 (bottom edge)
    let half_height = arena.paddle_height / 2.0;
    let offset = ball.pos.y - paddle.center(arena.paddle_height);
    let hit_relative_y = if half_height > 0.0 {
        (offset / half_height).clamp(-1.0, 1.0)
    } else {
        0.0
    };
    let angle = hit_relative_y * config.max_bounce_angle;

    speed.increase(config.ball_speed_increase, config.ball_speed_multiplier_max);
    let new_speed = config.ball_speed(speed.multiplier);

    // X: always away from the paddle
    let dir_x = -paddle.side.approach_sign();
    ball.vel = Vec2::new(dir_x * angle.cos(), angle.sin()) * new_speed;

    // Eject so the next frame cannot hit again
    ball.pos.x = match paddle.side {
        Side::Left => arena.paddle_face_x(Side::Left) + ball.radius,
        Side::Right => arena.paddle_face_x(Side::Right) - ball.radius,
    };
}
