use crate::{Arena, Ball, Paddle, Time};
use hecs::World;

/// Move ball based on velocity
pub fn move_ball(world: &mut World, time: &Time) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.pos += ball.vel * time.dt;
    }
}

/// Keep every paddle inside `[0, H - ph]`
pub fn clamp_paddles(world: &mut World, arena: &Arena) {
    for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
        paddle.y = arena.clamp_paddle_y(paddle.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_ball, create_paddle, Config, Side};
    use glam::Vec2;

    #[test]
    fn test_move_ball_integrates_velocity() {
        let mut world = World::new();
        create_ball(&mut world, Vec2::new(100.0, 100.0), Vec2::new(200.0, -100.0), 9.0);

        move_ball(&mut world, &Time::new(0.5, 0.0));

        for (_entity, ball) in world.query::<&Ball>().iter() {
            assert_eq!(ball.pos, Vec2::new(200.0, 50.0));
        }
    }

    #[test]
    fn test_clamp_paddles_to_arena() {
        let mut world = World::new();
        let arena = Arena::new(800.0, 600.0, &Config::new());
        create_paddle(&mut world, Side::Left, -40.0);
        create_paddle(&mut world, Side::Right, 900.0);

        clamp_paddles(&mut world, &arena);

        for (_entity, paddle) in world.query::<&Paddle>().iter() {
            match paddle.side {
                Side::Left => assert_eq!(paddle.y, 0.0),
                Side::Right => assert_eq!(paddle.y, arena.paddle_max_y()),
            }
        }
    }
}
