use crate::{Arena, Ball, Events, Side};
use hecs::World;

/// Check if the ball left the arena past either paddle
pub fn check_exits(world: &mut World, arena: &Arena, events: &mut Events) {
    for (_entity, ball) in world.query::<&Ball>().iter() {
        if ball.pos.x + ball.radius < 0.0 {
            events.record_exit(Side::Left);
        } else if ball.pos.x - ball.radius > arena.width {
            events.record_exit(Side::Right);
        }
    }
}
