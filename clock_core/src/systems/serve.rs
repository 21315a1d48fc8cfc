use crate::{Arena, Ball, Config, GameRng, Paddle, ServeState, SpeedState};
use glam::Vec2;
use hecs::World;

/// Put the ball back in the middle and serve it away from the last exit
pub fn serve_ball(
    world: &mut World,
    arena: &Arena,
    config: &Config,
    speed: &mut SpeedState,
    serve: &mut ServeState,
    rng: &mut GameRng,
) {
    let dir_x = serve.next_serve_dir();
    speed.reset();

    let angle = rng.symmetric(config.serve_half_angle);
    let vel = Vec2::new(dir_x * angle.cos(), angle.sin()) * config.ball_speed(speed.multiplier);

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.pos = arena.ball_spawn();
        ball.vel = vel;
        ball.radius = arena.ball_radius;
    }

    resample_aim_offsets(world, arena, config, rng);
}

/// Give every paddle a new random aim offset
pub fn resample_aim_offsets(world: &mut World, arena: &Arena, config: &Config, rng: &mut GameRng) {
    let half_range = config.aim_offset_fraction * arena.paddle_height;
    for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
        paddle.aim_offset = rng.symmetric(half_range);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_ball, create_paddle, Side};

    #[test]
    fn test_serve_resets_ball_and_speed() {
        let config = Config::new();
        let arena = Arena::new(800.0, 600.0, &config);
        let mut world = World::new();
        let mut speed = SpeedState { multiplier: 1.5 };
        let mut serve = ServeState::new();
        let mut rng = GameRng::new(1);
        create_ball(&mut world, Vec2::new(-20.0, 40.0), Vec2::new(-500.0, 0.0), 9.0);

        serve.record_exit(Side::Left);
        serve_ball(&mut world, &arena, &config, &mut speed, &mut serve, &mut rng);

        assert_eq!(speed.multiplier, 1.0);
        for (_e, ball) in world.query::<&Ball>().iter() {
            assert_eq!(ball.pos, arena.ball_spawn(), "Ball should reset to center");
            assert!(ball.vel.x > 0.0, "Serve travels away from a left exit");
            assert!((ball.vel.length() - config.ball_speed_base).abs() < 1e-3);
            let angle = (ball.vel.y / ball.vel.length()).asin().abs();
            assert!(angle <= config.serve_half_angle + 1e-5);
        }
    }

    #[test]
    fn test_serve_resamples_both_aim_offsets() {
        let config = Config::new();
        let arena = Arena::new(800.0, 600.0, &config);
        let mut world = World::new();
        create_ball(&mut world, Vec2::ZERO, Vec2::ZERO, 9.0);
        create_paddle(&mut world, Side::Left, 0.0);
        create_paddle(&mut world, Side::Right, 0.0);

        serve_ball(
            &mut world,
            &arena,
            &config,
            &mut SpeedState::new(),
            &mut ServeState::new(),
            &mut GameRng::new(99),
        );

        let limit = config.aim_offset_fraction * arena.paddle_height;
        for (_e, paddle) in world.query::<&Paddle>().iter() {
            assert_ne!(paddle.aim_offset, 0.0);
            assert!(paddle.aim_offset.abs() <= limit);
        }
    }
}
