//! Game state and core simulation types
//!
//! `GameState` exclusively owns the physics engine and every simulated entity.
//! All body creation and removal goes through it so the entity set and the
//! engine's body set never drift apart.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::engine::RapierWorld;
use super::geometry::ImpulseVector;
use super::launch::LaunchController;
use super::levels::{LevelCatalog, Orientation};
use super::physics::{BodyHandle, Geometry, PhysicsEngine, ShapeHandle};
use crate::consts::*;
use crate::tuning::Tuning;

/// Stable entity identifier (monotonic, never reused within a run)
pub type EntityId = u32;

/// Projectile types, in selection order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectileKind {
    #[default]
    Red,
    Blue,
    Yellow,
}

impl ProjectileKind {
    /// Selection cycle
    pub const ALL: [ProjectileKind; 3] = [
        ProjectileKind::Red,
        ProjectileKind::Blue,
        ProjectileKind::Yellow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectileKind::Red => "Red",
            ProjectileKind::Blue => "Blue",
            ProjectileKind::Yellow => "Yellow",
        }
    }

    pub fn radius(&self) -> f32 {
        match self {
            ProjectileKind::Red => 12.0,
            ProjectileKind::Blue => 8.0,
            ProjectileKind::Yellow => 11.0,
        }
    }

    pub fn mass(&self) -> f32 {
        match self {
            ProjectileKind::Red => 5.0,
            ProjectileKind::Blue => 3.0,
            ProjectileKind::Yellow => 4.0,
        }
    }

    pub fn friction(&self) -> f32 {
        1.0
    }
}

/// What an entity is in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityRole {
    Column(Orientation),
    Pig,
    Projectile(ProjectileKind),
}

impl EntityRole {
    pub fn is_pig(&self) -> bool {
        matches!(self, EntityRole::Pig)
    }

    pub fn is_column(&self) -> bool {
        matches!(self, EntityRole::Column(_))
    }

    pub fn is_projectile(&self) -> bool {
        matches!(self, EntityRole::Projectile(_))
    }
}

/// Sprite a renderer should draw for an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sprite {
    Column,
    Pig,
    RedBird,
    BlueBird,
    YellowBird,
}

/// Drawing information carried by each entity; the simulation never reads it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderHandle {
    pub sprite: Sprite,
    /// Unrotated size in world units
    pub size: Vec2,
}

/// A live simulated body with its game role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatedEntity {
    pub id: EntityId,
    pub role: EntityRole,
    pub body: BodyHandle,
    pub shape: ShapeHandle,
    pub render: RenderHandle,
}

/// Spawn parameters derived from a role
pub(crate) struct SpawnParams {
    pub mass: f32,
    pub moment: f32,
    pub geometry: Geometry,
    pub friction: f32,
    pub render: RenderHandle,
}

impl EntityRole {
    pub(crate) fn spawn_params(&self) -> SpawnParams {
        use super::physics::{moment_for_box, moment_for_circle};

        match *self {
            EntityRole::Column(orientation) => {
                let size = match orientation {
                    Orientation::Vertical => Vec2::new(COLUMN_WIDTH, COLUMN_HEIGHT),
                    Orientation::Horizontal => Vec2::new(COLUMN_HEIGHT, COLUMN_WIDTH),
                };
                SpawnParams {
                    mass: COLUMN_MASS,
                    moment: moment_for_box(COLUMN_MASS, size),
                    geometry: Geometry::Box {
                        half_extents: size * 0.5,
                    },
                    friction: COLUMN_FRICTION,
                    render: RenderHandle {
                        sprite: Sprite::Column,
                        size,
                    },
                }
            }
            EntityRole::Pig => SpawnParams {
                mass: PIG_MASS,
                moment: moment_for_circle(PIG_MASS, PIG_RADIUS),
                geometry: Geometry::Circle { radius: PIG_RADIUS },
                friction: PIG_FRICTION,
                render: RenderHandle {
                    sprite: Sprite::Pig,
                    size: Vec2::splat(PIG_RADIUS * 2.0),
                },
            },
            EntityRole::Projectile(kind) => {
                let radius = kind.radius();
                let sprite = match kind {
                    ProjectileKind::Red => Sprite::RedBird,
                    ProjectileKind::Blue => Sprite::BlueBird,
                    ProjectileKind::Yellow => Sprite::YellowBird,
                };
                SpawnParams {
                    mass: kind.mass(),
                    moment: moment_for_circle(kind.mass(), radius),
                    geometry: Geometry::Circle { radius },
                    friction: kind.friction(),
                    render: RenderHandle {
                        sprite,
                        size: Vec2::splat(radius * 2.0),
                    },
                }
            }
        }
    }
}

/// Level progression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// A level is loaded and running
    Playing,
    /// Every level cleared; nothing loads any more
    Completed,
}

/// Observable game happenings, drained by the host each frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelLoaded { index: usize, entities: usize },
    ProjectileLaunched {
        id: EntityId,
        kind: ProjectileKind,
        impulse: ImpulseVector,
    },
    /// Projectile removed after the age timeout
    ProjectileExpired { id: EntityId },
    /// Contact hard enough to register, too soft to destroy
    Hit {
        a: Option<EntityId>,
        b: Option<EntityId>,
        impulse: f32,
    },
    EntityDestroyed { id: EntityId, role: EntityRole },
    KindSwitched { kind: ProjectileKind },
    /// Kind-specific power-up requested for the airborne projectile
    PowerUpRequested { id: EntityId, kind: ProjectileKind },
    LevelCleared { index: usize },
    LevelSkipped { index: usize },
    GameCompleted,
}

/// Complete game state
#[derive(Debug)]
pub struct GameState<P: PhysicsEngine = RapierWorld> {
    /// Gameplay tuning in effect
    pub tuning: Tuning,
    pub(crate) catalog: LevelCatalog,
    /// Index of the loaded level
    pub current_level_index: usize,
    /// Current phase
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Drag gesture and projectile selection
    pub launcher: LaunchController,
    /// Live entities (sorted by id for determinism)
    pub(crate) entities: Vec<SimulatedEntity>,
    pub(crate) active_projectile: Option<EntityId>,
    pub(crate) projectile_age: f32,
    /// Seconds since the current level loaded
    pub(crate) level_time: f32,
    pub(crate) events: Vec<GameEvent>,
    pub(crate) physics: P,
    ground: BodyHandle,
    next_id: EntityId,
}

impl GameState<RapierWorld> {
    /// Stock levels, default tuning, built-in physics; level 0 loaded
    pub fn new() -> Self {
        Self::with_tuning(Tuning::default())
    }

    /// Stock levels with custom tuning
    pub fn with_tuning(tuning: Tuning) -> Self {
        let physics = RapierWorld::new(tuning.solver_iterations);
        Self::with_engine(physics, LevelCatalog::builtin(), tuning)
    }
}

impl Default for GameState<RapierWorld> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PhysicsEngine> GameState<P> {
    /// Build a game over any engine and catalog; level 0 loaded
    pub fn with_engine(mut physics: P, catalog: LevelCatalog, tuning: Tuning) -> Self {
        physics.set_gravity(Vec2::new(0.0, tuning.gravity));

        let ground = physics.create_static_body();
        physics.add_shape(
            ground,
            Geometry::Segment {
                a: Vec2::new(0.0, tuning.ground_y),
                b: Vec2::new(WORLD_WIDTH, tuning.ground_y),
            },
            tuning.ground_friction,
        );

        let mut state = Self {
            tuning,
            catalog,
            current_level_index: 0,
            phase: GamePhase::Playing,
            time_ticks: 0,
            launcher: LaunchController::new(),
            entities: Vec::new(),
            active_projectile: None,
            projectile_age: 0.0,
            level_time: 0.0,
            events: Vec::new(),
            physics,
            ground,
            next_id: 1,
        };
        state.load_level(0);
        state
    }

    /// Allocate a new entity ID
    pub(crate) fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The level catalog being played
    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    /// Read access to the engine
    pub fn physics(&self) -> &P {
        &self.physics
    }

    /// The static ground body
    pub fn ground(&self) -> BodyHandle {
        self.ground
    }

    /// Live entities, in id order
    pub fn entities(&self) -> &[SimulatedEntity] {
        &self.entities
    }

    /// The airborne projectile, if any
    pub fn active_projectile(&self) -> Option<EntityId> {
        self.active_projectile
    }

    /// Seconds since the active projectile launched
    pub fn projectile_age(&self) -> f32 {
        self.projectile_age
    }

    /// Seconds since the current level loaded
    pub fn level_time(&self) -> f32 {
        self.level_time
    }

    /// Whether the freshly loaded level is still inside its settle window
    pub fn is_settling(&self) -> bool {
        self.level_time < self.tuning.settle_time
    }

    pub fn is_completed(&self) -> bool {
        self.phase == GamePhase::Completed
    }

    /// Events recorded since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_loads_first_level() {
        let state = GameState::new();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.current_level_index, 0);
        assert_eq!(state.entities().len(), 4);
        assert!(state.active_projectile().is_none());
        // Ground plus one body per entity
        assert_eq!(state.physics().body_count(), 5);
        assert!(matches!(
            state.events()[0],
            GameEvent::LevelLoaded { index: 0, entities: 4 }
        ));
    }

    #[test]
    fn test_projectile_kind_cycle_order() {
        assert_eq!(ProjectileKind::ALL[0], ProjectileKind::default());
        assert_eq!(ProjectileKind::ALL.len(), 3);
    }

    #[test]
    fn test_horizontal_column_is_wide() {
        let params = EntityRole::Column(Orientation::Horizontal).spawn_params();
        assert_eq!(params.render.size, Vec2::new(COLUMN_HEIGHT, COLUMN_WIDTH));
        assert!(matches!(params.geometry, Geometry::Box { half_extents } if half_extents.x > half_extents.y));
    }

    #[test]
    fn test_roles() {
        assert!(EntityRole::Pig.is_pig());
        assert!(EntityRole::Column(Orientation::Vertical).is_column());
        assert!(EntityRole::Projectile(ProjectileKind::Blue).is_projectile());
        assert!(!EntityRole::Projectile(ProjectileKind::Blue).is_pig());
    }
}
