use crate::{Arena, Ball, Config, MissFlags, Paddle, Side, SpeedState, Time};
use hecs::World;

/// Steer both paddles toward their targets
///
/// A paddle only moves while the ball is approaching its side. With its miss
/// flag clear it tracks the ball plus its aim offset; with the flag set it
/// parks clear of every height the ball can pass its face at.
pub fn drive_paddles(
    world: &mut World,
    time: &Time,
    arena: &Arena,
    config: &Config,
    flags: &MissFlags,
    speed: &SpeedState,
) {
    let ball = {
        let mut ball_query = world.query::<&Ball>();
        ball_query.iter().next().map(|(_e, ball)| *ball)
    };
    let Some(ball) = ball else {
        return;
    };

    let paddle_speed = config.paddle_speed(speed.multiplier);
    let max_step = paddle_speed * time.dt;

    for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
        if !paddle.side.is_approached_by(ball.vel.x) {
            continue;
        }
        let scripted_miss = flags.get(paddle.side);
        let target = paddle_target(paddle, &ball, arena, config, paddle_speed, scripted_miss);
        paddle.move_toward(target, max_step);
    }
}

/// Top edge a paddle is steering for this frame
pub fn paddle_target(
    paddle: &Paddle,
    ball: &Ball,
    arena: &Arena,
    config: &Config,
    paddle_speed: f32,
    scripted_miss: bool,
) -> f32 {
    let height = arena.paddle_height;
    if !scripted_miss {
        return arena.clamp_paddle_y(ball.pos.y + paddle.aim_offset - height / 2.0);
    }

    let band = contact_band(ball, paddle.side, arena);
    let gap = ball.radius + config.miss_padding;
    let above = arena.clamp_paddle_y(band.lo - gap - height);
    let below = arena.clamp_paddle_y(band.hi + gap);
    // A clamped wall bounce can lose up to a frame of travel, so a paddle
    // pinned near the band needs slack beyond a bare miss
    let slack = config.miss_padding;
    let above_clear = above + height + slack < band.lo;
    let below_clear = below > band.hi + slack;

    let (near, near_clear, far, far_clear) = if paddle.center(height) < band.mid() {
        (above, above_clear, below, below_clear)
    } else {
        (below, below_clear, above, above_clear)
    };
    if near_clear {
        return near;
    }

    // Crossing the ball's path is only safe if it is done before contact
    let crossing_time = (far - paddle.y).abs() / paddle_speed;
    if far_clear && crossing_time <= band.time_to_contact {
        far
    } else {
        near
    }
}

/// Ball centre heights while the ball can touch a paddle face
///
/// The zone runs from the ball's edge reaching the face until the ball has
/// fully left the field. Heights are projected along the current velocity,
/// reflecting off both walls.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ContactBand {
    lo: f32,
    hi: f32,
    time_to_contact: f32,
}

impl ContactBand {
    fn mid(&self) -> f32 {
        (self.lo + self.hi) / 2.0
    }
}

fn contact_band(ball: &Ball, side: Side, arena: &Arena) -> ContactBand {
    let r = ball.radius;
    let face = arena.paddle_face_x(side);
    let (to_enter, to_leave) = match side {
        Side::Left => (ball.pos.x - (face + r), ball.pos.x + r),
        Side::Right => ((face - r) - ball.pos.x, arena.width + r - ball.pos.x),
    };
    let vx = ball.vel.x.abs();
    let t_enter = (to_enter / vx).max(0.0);
    let t_leave = (to_leave / vx).max(t_enter);

    let span = arena.height - 2.0 * r;
    if span <= 0.0 {
        let y = arena.height / 2.0;
        return ContactBand { lo: y, hi: y, time_to_contact: t_enter };
    }
    if !t_leave.is_finite() {
        return ContactBand { lo: r, hi: arena.height - r, time_to_contact: t_enter };
    }

    // Unfolded distance below the top limit; walls sit at multiples of `span`
    let s0 = ball.pos.y - r + ball.vel.y * t_enter;
    let s1 = ball.pos.y - r + ball.vel.y * t_leave;
    let (y0, y1) = (fold(s0, span), fold(s1, span));
    let mut lo = y0.min(y1);
    let mut hi = y0.max(y1);

    let (a, b) = (s0.min(s1), s0.max(s1));
    let first_wall = (a / span).floor() + 1.0;
    let last_wall = (b / span).ceil() - 1.0;
    if last_wall > first_wall {
        lo = 0.0;
        hi = span;
    } else if last_wall == first_wall {
        if first_wall.rem_euclid(2.0) == 0.0 {
            lo = 0.0;
        } else {
            hi = span;
        }
    }

    ContactBand {
        lo: lo + r,
        hi: hi + r,
        time_to_contact: t_enter,
    }
}

/// Reflect an unfolded offset back into `[0, span]`
fn fold(s: f32, span: f32) -> f32 {
    let m = s.rem_euclid(2.0 * span);
    if m > span {
        2.0 * span - m
    } else {
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_ball, create_paddle};
    use glam::Vec2;

    fn setup_world() -> (World, Arena, Config) {
        let config = Config::new();
        let arena = Arena::new(800.0, 600.0, &config);
        (World::new(), arena, config)
    }

    fn paddle_y(world: &World, side: Side) -> f32 {
        world
            .query::<&Paddle>()
            .iter()
            .find(|(_e, p)| p.side == side)
            .map(|(_e, p)| p.y)
            .unwrap()
    }

    #[test]
    fn test_normal_mode_tracks_ball_with_offset() {
        let (_, arena, config) = setup_world();
        let mut paddle = Paddle::new(Side::Left, 0.0);
        paddle.aim_offset = 20.0;
        let ball = Ball::new(Vec2::new(300.0, 300.0), Vec2::new(-360.0, 0.0), 9.0);

        let target = paddle_target(&paddle, &ball, &arena, &config, config.paddle_speed(1.0), false);

        assert!((target - (320.0 - arena.paddle_height / 2.0)).abs() < 1e-4);
    }

    #[test]
    fn test_scripted_miss_stays_on_current_side() {
        let (_, arena, config) = setup_world();
        let ball = Ball::new(Vec2::new(300.0, 300.0), Vec2::new(-360.0, 0.0), 9.0);
        let clearance = arena.paddle_height / 2.0 + ball.radius + config.miss_padding;

        // Paddle above the ball stays above it
        let above = Paddle::new(Side::Left, 100.0);
        let target = paddle_target(&above, &ball, &arena, &config, config.paddle_speed(1.0), true);
        assert!((target + arena.paddle_height / 2.0 - (300.0 - clearance)).abs() < 1e-4);
        assert!(target + arena.paddle_height < ball.pos.y - ball.radius);

        // Paddle below the ball stays below it
        let below = Paddle::new(Side::Left, 400.0);
        let target = paddle_target(&below, &ball, &arena, &config, config.paddle_speed(1.0), true);
        assert!(target > ball.pos.y + ball.radius);
    }

    #[test]
    fn test_scripted_miss_switches_side_near_wall() {
        let (_, arena, config) = setup_world();
        // Ball just below a paddle pinned to the top wall; going above is impossible
        let ball = Ball::new(Vec2::new(300.0, 60.0), Vec2::new(-360.0, 0.0), 9.0);
        let paddle = Paddle::new(Side::Left, 0.0);
        assert!(paddle.center(arena.paddle_height) < ball.pos.y);

        let target = paddle_target(&paddle, &ball, &arena, &config, config.paddle_speed(1.0), true);

        assert!(
            target > ball.pos.y + ball.radius,
            "Paddle should go below the ball, got top {}",
            target
        );
    }

    #[test]
    fn test_contact_band_follows_wall_reflection() {
        let (_, arena, _) = setup_world();
        // Climbing toward the top wall, reflected well before the face
        let ball = Ball::new(Vec2::new(400.0, 100.0), Vec2::new(-300.0, -300.0), 9.0);

        let band = contact_band(&ball, Side::Left, &arena);

        assert!((band.lo - 297.0).abs() < 1e-2, "lo {}", band.lo);
        assert!((band.hi - 327.0).abs() < 1e-2, "hi {}", band.hi);
        assert!((band.time_to_contact - 379.0 / 300.0).abs() < 1e-4);
    }

    #[test]
    fn test_contact_band_reaches_wall_inside_zone() {
        let (_, arena, _) = setup_world();
        let ball = Ball::new(Vec2::new(40.0, 15.0), Vec2::new(-360.0, -100.0), 9.0);

        let band = contact_band(&ball, Side::Left, &arena);

        assert_eq!(band.lo, 9.0, "Bounce inside the zone touches the wall");
        assert!(band.hi > 16.0 && band.hi < 17.0);
    }

    #[test]
    fn test_scripted_miss_aims_at_projected_height() {
        let (_, arena, config) = setup_world();
        let ball = Ball::new(Vec2::new(400.0, 100.0), Vec2::new(-300.0, -300.0), 9.0);
        let paddle = Paddle::new(Side::Left, 0.0);

        let target = paddle_target(&paddle, &ball, &arena, &config, config.paddle_speed(1.0), true);

        // Clear of the band [297, 327], not of the ball's current height
        assert!((target - (297.0 - 9.0 - config.miss_padding - arena.paddle_height)).abs() < 1e-2);
    }

    #[test]
    fn test_scripted_miss_keeps_wall_side_when_ball_passes_clear() {
        let (_, arena, config) = setup_world();
        // Paddle pinned to the floor, ball just above it and rising away
        let paddle = Paddle::new(Side::Left, arena.paddle_max_y());
        let ball = Ball::new(Vec2::new(51.0, 484.0), Vec2::new(-360.0, -100.0), 9.0);

        let target = paddle_target(&paddle, &ball, &arena, &config, config.paddle_speed(1.0), true);

        assert_eq!(target, arena.paddle_max_y(), "Stay pinned, do not cross the ball");
    }

    #[test]
    fn test_scripted_miss_does_not_cross_too_late() {
        let (_, arena, config) = setup_world();
        // Ball about to pass inside a paddle pinned to the ceiling
        let paddle = Paddle::new(Side::Left, 0.0);
        let ball = Ball::new(Vec2::new(40.0, 100.0), Vec2::new(-360.0, -50.0), 9.0);

        let target = paddle_target(&paddle, &ball, &arena, &config, config.paddle_speed(1.0), true);

        assert_eq!(target, 0.0, "No time to get below the ball");
    }

    #[test]
    fn test_pinned_paddle_lets_rising_ball_through() {
        let (mut world, arena, config) = setup_world();
        create_paddle(&mut world, Side::Left, arena.paddle_max_y());
        create_paddle(&mut world, Side::Right, arena.paddle_spawn_y());
        create_ball(&mut world, Vec2::new(51.0, 484.0), Vec2::new(-360.0, -100.0), 9.0);
        let mut flags = MissFlags::new();
        flags.left = true;
        let mut speed = SpeedState::new();
        let mut rng = crate::GameRng::new(1);
        let mut events = crate::Events::new();

        let mut exited = false;
        for _ in 0..30 {
            crate::step(
                &mut world,
                &Time::new(1.0 / 60.0, 0.0),
                &arena,
                &config,
                &flags,
                &mut speed,
                &mut events,
                &mut rng,
            );
            assert!(!events.left_paddle_hit, "Flagged paddle returned the ball");
            if events.exit_left {
                exited = true;
                break;
            }
        }
        assert!(exited, "Ball should leave on the left");
    }

    #[test]
    fn test_paddle_holds_when_ball_recedes() {
        let (mut world, arena, config) = setup_world();
        create_paddle(&mut world, Side::Left, 100.0);
        create_ball(&mut world, Vec2::new(400.0, 500.0), Vec2::new(360.0, 0.0), 9.0);

        drive_paddles(
            &mut world,
            &Time::new(0.016, 0.0),
            &arena,
            &config,
            &MissFlags::new(),
            &SpeedState::new(),
        );

        assert_eq!(paddle_y(&world, Side::Left), 100.0, "Receding ball: hold position");
    }

    #[test]
    fn test_paddle_speed_is_limited() {
        let (mut world, arena, config) = setup_world();
        create_paddle(&mut world, Side::Right, 0.0);
        create_ball(&mut world, Vec2::new(400.0, 550.0), Vec2::new(360.0, 0.0), 9.0);
        let dt = 0.016;

        drive_paddles(
            &mut world,
            &Time::new(dt, 0.0),
            &arena,
            &config,
            &MissFlags::new(),
            &SpeedState::new(),
        );

        let expected = config.paddle_speed(1.0) * dt;
        assert!((paddle_y(&world, Side::Right) - expected).abs() < 1e-3);
    }

    #[test]
    fn test_miss_flag_moves_paddle_away() {
        let (mut world, arena, config) = setup_world();
        // Paddle centred on the ball's line
        let start = 300.0 - arena.paddle_height / 2.0 - 1.0;
        create_paddle(&mut world, Side::Left, start);
        create_ball(&mut world, Vec2::new(400.0, 300.0), Vec2::new(-360.0, 0.0), 9.0);
        let mut flags = MissFlags::new();
        flags.left = true;

        for _ in 0..30 {
            drive_paddles(
                &mut world,
                &Time::new(0.016, 0.0),
                &arena,
                &config,
                &flags,
                &SpeedState::new(),
            );
        }

        let top = paddle_y(&world, Side::Left);
        assert!(
            top + arena.paddle_height < 300.0 - 9.0,
            "Paddle should clear the ball, bottom edge at {}",
            top + arena.paddle_height
        );
    }
}
