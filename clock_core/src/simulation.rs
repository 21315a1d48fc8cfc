//! The single owned game value
//!
//! `Simulation` holds the ECS world and every resource the rally needs. The
//! tick detector, scoring coupler and frame driver all work through it.

use glam::Vec2;
use hecs::World;

use crate::systems::serve_ball;
use crate::{
    create_ball, create_paddle, Arena, Ball, ClockReading, ClockTarget, Config, DisplayedScore,
    Events, GameRng, MissFlags, Paddle, ServeState, Side, Snapshot, SpeedState, Time,
};

pub struct Simulation {
    world: World,
    time: Time,
    arena: Arena,
    config: Config,
    speed: SpeedState,
    flags: MissFlags,
    target: ClockTarget,
    score: DisplayedScore,
    serve: ServeState,
    rng: GameRng,
    events: Events,
}

impl Simulation {
    pub fn new(width: f32, height: f32, initial: ClockReading, seed: u64) -> Self {
        Self::with_config(Config::new(), width, height, initial, seed)
    }

    pub fn with_config(
        config: Config,
        width: f32,
        height: f32,
        initial: ClockReading,
        seed: u64,
    ) -> Self {
        let arena = Arena::new(width, height, &config);
        let mut world = World::new();

        // Create paddles
        create_paddle(&mut world, Side::Left, arena.paddle_spawn_y());
        create_paddle(&mut world, Side::Right, arena.paddle_spawn_y());

        // Create ball; the first serve sets its velocity
        create_ball(&mut world, arena.ball_spawn(), Vec2::ZERO, arena.ball_radius);

        let mut sim = Self {
            world,
            time: Time::new(0.0, 0.0),
            arena,
            config,
            speed: SpeedState::new(),
            flags: MissFlags::new(),
            target: ClockTarget::from_reading(initial),
            score: DisplayedScore::from_reading(initial),
            serve: ServeState::new(),
            rng: GameRng::new(seed),
            events: Events::new(),
        };
        sim.reset_ball();
        if !sim.arena.is_playable() {
            log::warn!(
                "Viewport {}x{} too small, rally paused",
                sim.arena.width,
                sim.arena.height
            );
        }
        sim
    }

    /// Advance the rally by `dt` seconds (clamped) and report what happened
    pub fn step(&mut self, dt: f32) -> Events {
        let dt = self.config.clamp_dt(dt);

        if !self.arena.is_playable() {
            self.events.clear();
            self.hold_ball();
            return self.events;
        }

        self.time = Time::new(dt, self.time.now + dt);
        crate::step(
            &mut self.world,
            &self.time,
            &self.arena,
            &self.config,
            &self.flags,
            &mut self.speed,
            &mut self.events,
            &mut self.rng,
        );

        if !self.is_finite() {
            self.recover();
        }
        self.events
    }

    /// Serve a fresh ball from the centre, away from the last exit
    pub fn reset_ball(&mut self) {
        serve_ball(
            &mut self.world,
            &self.arena,
            &self.config,
            &mut self.speed,
            &mut self.serve,
            &mut self.rng,
        );
    }

    /// Apply a new viewport size; the rally continues from the centre
    pub fn resize(&mut self, width: f32, height: f32) {
        let was_playable = self.arena.is_playable();
        self.arena.resize(width, height, &self.config);
        log::info!(
            "Arena resized to {}x{} (paddle {}x{}, ball r={})",
            self.arena.width,
            self.arena.height,
            self.arena.paddle_width,
            self.arena.paddle_height,
            self.arena.ball_radius
        );
        if !self.arena.is_playable() {
            log::warn!("Viewport {}x{} too small, rally paused", width, height);
        }

        let spawn_y = self.arena.paddle_spawn_y();
        for (_entity, paddle) in self.world.query_mut::<&mut Paddle>() {
            paddle.y = spawn_y;
        }

        let speed = self.config.ball_speed(self.speed.multiplier);
        let mut needs_serve = false;
        for (_entity, ball) in self.world.query_mut::<&mut Ball>() {
            ball.pos = self.arena.ball_spawn();
            ball.radius = self.arena.ball_radius;
            match ball.vel.try_normalize() {
                Some(dir) => ball.vel = dir * speed,
                None => needs_serve = true,
            }
        }
        if needs_serve || (!was_playable && self.arena.is_playable()) {
            self.reset_ball();
        }
    }

    /// Set a side's miss flag and the matching clock target field
    ///
    /// The left flag carries the minute, the right flag the hour.
    pub(crate) fn schedule_miss(&mut self, side: Side, value: u8) {
        self.flags.set(side, true);
        match side {
            Side::Left => self.target.minute = value,
            Side::Right => self.target.hour = value,
        }
    }

    /// Show `value` on the scoring side, clear the flag and serve again
    pub(crate) fn settle_exit(&mut self, side: Side, value: u8) {
        self.serve.record_exit(side);
        match side {
            Side::Left => {
                self.score.minute = value;
                self.target.minute = value;
            }
            Side::Right => {
                self.score.hour = value;
                self.target.hour = value;
            }
        }
        self.flags.set(side, false);
        self.reset_ball();
    }

    fn hold_ball(&mut self) {
        let spawn = self.arena.ball_spawn();
        for (_entity, ball) in self.world.query_mut::<&mut Ball>() {
            ball.pos = spawn;
        }
    }

    fn is_finite(&self) -> bool {
        let ball_ok = self.world.query::<&Ball>().iter().all(|(_e, b)| b.is_finite());
        let paddles_ok = self
            .world
            .query::<&Paddle>()
            .iter()
            .all(|(_e, p)| p.y.is_finite() && p.aim_offset.is_finite());
        ball_ok && paddles_ok && self.speed.multiplier.is_finite()
    }

    /// Recover from a non-finite state without touching the displayed score
    fn recover(&mut self) {
        log::warn!("Non-finite simulation state, resetting rally");
        // Exits seen in a broken step are not settled
        self.events.clear();
        let spawn_y = self.arena.paddle_spawn_y();
        for (_entity, paddle) in self.world.query_mut::<&mut Paddle>() {
            if !paddle.y.is_finite() {
                paddle.y = spawn_y;
            }
        }
        self.flags.clear();
        // Re-arm detection so owed updates are scheduled again on the next poll
        self.target = ClockTarget {
            hour: self.score.hour,
            minute: self.score.minute,
        };
        self.reset_ball();
    }

    pub fn ball(&self) -> Option<Ball> {
        self.world.query::<&Ball>().iter().next().map(|(_e, b)| *b)
    }

    pub fn paddle(&self, side: Side) -> Option<Paddle> {
        self.world
            .query::<&Paddle>()
            .iter()
            .find(|(_e, p)| p.side == side)
            .map(|(_e, p)| *p)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn speed(&self) -> SpeedState {
        self.speed
    }

    pub fn miss_flags(&self) -> MissFlags {
        self.flags
    }

    pub fn clock_target(&self) -> ClockTarget {
        self.target
    }

    pub fn score(&self) -> DisplayedScore {
        self.score
    }

    pub fn serve(&self) -> ServeState {
        self.serve
    }

    pub fn time(&self) -> Time {
        self.time
    }

    pub fn last_events(&self) -> Events {
        self.events
    }

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
