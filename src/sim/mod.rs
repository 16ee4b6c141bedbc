//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (by entity ID and body handle)
//! - Physics behind the `PhysicsEngine` trait
//! - No rendering or platform dependencies

pub mod collision;
pub mod engine;
pub mod geometry;
pub mod input;
pub mod launch;
pub mod levels;
pub mod lifecycle;
pub mod physics;
pub mod state;
pub mod tick;
pub mod view;

pub use collision::{CollisionPolicy, HitRecord, ImpactClass, classify_impulse};
pub use engine::{PIXELS_PER_METER, RapierWorld};
pub use geometry::{ImpulseVector, Point2D, angle_between, distance, impulse_from_drag};
pub use input::{InputEvent, Key};
pub use launch::{DragState, LaunchController, LaunchRequest};
pub use levels::{
    ColumnSpec, LevelCatalog, LevelDefinition, Orientation, PigSpec, get_level, level_count,
};
pub use physics::{
    BodyHandle, BodyPose, Contact, ContactHandler, ContactResolution, Geometry, PhysicsEngine,
    ShapeHandle,
};
pub use state::{
    EntityId, EntityRole, GameEvent, GamePhase, GameState, ProjectileKind, RenderHandle,
    SimulatedEntity, Sprite,
};
pub use tick::{FrameClock, TickInput, tick};
pub use view::{EntityView, FrameView};
