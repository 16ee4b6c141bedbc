//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation deterministically.

use super::collision::CollisionPolicy;
use super::input::InputEvent;
use super::physics::PhysicsEngine;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::{MAX_FRAME_TIME, MAX_SUBSTEPS};

/// Input gathered since the previous tick, applied in order before stepping
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub events: Vec<InputEvent>,
}

impl TickInput {
    pub fn new(events: Vec<InputEvent>) -> Self {
        Self { events }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick<P: PhysicsEngine>(state: &mut GameState<P>, input: &TickInput) {
    for event in &input.events {
        state.handle_input(*event);
    }

    // Completed is terminal
    if state.phase == GamePhase::Completed {
        return;
    }

    let dt = state.tuning.sim_dt;
    state.time_ticks += 1;

    // Physics, with contacts judged inside the step
    let mut policy = CollisionPolicy::from_tuning(&state.tuning);
    if state.is_settling() {
        let projectile = state
            .active_projectile
            .and_then(|id| state.entity(id))
            .map(|e| e.body);
        policy = policy.settling(projectile);
    }
    state.physics.step(dt, &mut policy);
    state.apply_collisions(policy);
    state.level_time += dt;

    // Miss timeout
    if let Some(id) = state.active_projectile {
        state.projectile_age += dt;
        if state.projectile_age > state.tuning.projectile_timeout {
            log::debug!("Bird {} expired after {:.2}s", id, state.projectile_age);
            state.destroy(id);
            state.active_projectile = None;
            state.emit(GameEvent::ProjectileExpired { id });
        }
    }

    if state.is_level_complete() {
        let index = state.current_level_index;
        log::info!("Level {} cleared", index);
        state.emit(GameEvent::LevelCleared { index });
        state.advance_level();
    }
}

impl<P: PhysicsEngine> GameState<P> {
    /// Move past the current level: load the next one or finish the game
    ///
    /// No-op once completed.
    pub fn advance_level(&mut self) {
        if self.phase == GamePhase::Completed {
            return;
        }

        let next = self.current_level_index + 1;
        if self.catalog.has_level(next) {
            self.load_level(next);
        } else {
            log::info!("Congratulations! All {} levels completed", next);
            self.launcher.cancel_drag();
            self.phase = GamePhase::Completed;
            self.emit(GameEvent::GameCompleted);
        }
    }

    /// Explicit level skip from input
    pub fn skip_level(&mut self) {
        if self.phase == GamePhase::Completed {
            return;
        }
        let index = self.current_level_index;
        log::info!("Skipping level {}", index);
        self.emit(GameEvent::LevelSkipped { index });
        self.advance_level();
    }
}

/// Converts variable host frame time into a whole number of fixed ticks
#[derive(Debug, Clone)]
pub struct FrameClock {
    dt: f32,
    accumulator: f32,
}

impl FrameClock {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add `frame_time` seconds and return how many ticks to run now
    ///
    /// Long frames are clamped and the tick count is capped so a slow host
    /// cannot fall into a spiral of ever longer frames.
    pub fn advance(&mut self, frame_time: f32) -> u32 {
        self.accumulator += frame_time.clamp(0.0, MAX_FRAME_TIME);

        let mut ticks = 0;
        while self.accumulator >= self.dt && ticks < MAX_SUBSTEPS {
            self.accumulator -= self.dt;
            ticks += 1;
        }
        ticks
    }

    /// Fraction of a tick left in the accumulator, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }
}
