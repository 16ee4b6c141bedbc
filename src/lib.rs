//! Slingshot - A 2D physics puzzle game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (rigid bodies, collisions, game state)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest real frame time the clock will accept (seconds)
    pub const MAX_FRAME_TIME: f32 = 0.1;

    /// World dimensions (pixels, y up)
    pub const WORLD_WIDTH: f32 = 1800.0;
    pub const WORLD_HEIGHT: f32 = 800.0;

    /// Downward gravity (pixels/s²)
    pub const GRAVITY: f32 = -900.0;
    /// Ground line height and friction
    pub const GROUND_Y: f32 = 15.0;
    pub const GROUND_FRICTION: f32 = 10.0;

    /// Drag length is clamped to this launch magnitude
    pub const MAX_IMPULSE: f32 = 100.0;
    /// Launch magnitude to physical impulse multiplier
    pub const LAUNCH_POWER: f32 = 50.0;

    /// Contact impulse below this is ignored
    pub const HIT_THRESHOLD: f32 = 100.0;
    /// Contact impulse above this destroys both bodies
    pub const DESTROY_THRESHOLD: f32 = 1200.0;

    /// A projectile older than this (seconds) is a miss
    pub const PROJECTILE_TIMEOUT: f32 = 4.0;
    /// After a level loads, towers settle this long (seconds) before
    /// structural contacts can break anything
    pub const SETTLE_TIME: f32 = 2.0;

    /// Column geometry (vertical orientation; horizontal swaps the sides)
    pub const COLUMN_WIDTH: f32 = 21.0;
    pub const COLUMN_HEIGHT: f32 = 89.0;
    pub const COLUMN_MASS: f32 = 5.0;
    pub const COLUMN_FRICTION: f32 = 0.4;

    /// Pig geometry
    pub const PIG_RADIUS: f32 = 12.0;
    pub const PIG_MASS: f32 = 2.0;
    pub const PIG_FRICTION: f32 = 0.4;
}

/// Unit vector pointing along `angle` (radians, counter-clockwise from +x)
#[inline]
pub fn unit_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
