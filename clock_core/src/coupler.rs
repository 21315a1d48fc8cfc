//! Scoring coupler
//!
//! Reacts to ball exits. The clock is read again at the moment of the exit,
//! so the score always shows what the wall clock says when the user sees it
//! change.

use crate::{Clock, Events, Side, Simulation};

/// Settle every exit reported by a step. Returns true if the ball left.
pub fn reconcile<C: Clock + ?Sized>(events: &Events, clock: &C, sim: &mut Simulation) -> bool {
    let mut scored = false;
    for side in [Side::Left, Side::Right] {
        if events.exited(side) {
            on_exit(side, clock, sim);
            scored = true;
        }
    }
    scored
}

/// A left exit updates the minute, a right exit the hour
pub fn on_exit<C: Clock + ?Sized>(side: Side, clock: &C, sim: &mut Simulation) {
    let target = sim.clock_target();
    let value = match clock.read() {
        Ok(reading) => match side {
            Side::Left => reading.minute(),
            Side::Right => reading.hour(),
        },
        Err(err) => {
            // Fall back to the last value the tick detector saw
            log::warn!("Clock read failed at exit, using last target: {}", err);
            match side {
                Side::Left => target.minute,
                Side::Right => target.hour,
            }
        }
    };

    let at = sim.time().now;
    sim.settle_exit(side, value);
    match side {
        Side::Left => log::info!("Ball out left at {:.1}s, minute now {:02}", at, value),
        Side::Right => log::info!("Ball out right at {:.1}s, hour now {:02}", at, value),
    }
}
