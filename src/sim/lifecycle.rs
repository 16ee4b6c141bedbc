//! Entity lifecycle
//!
//! Creation and destruction of columns, pigs and projectiles. Every body the
//! engine holds (apart from the ground) belongs to exactly one entity here.

use glam::Vec2;

use super::geometry::{ImpulseVector, Point2D};
use super::physics::{BodyHandle, PhysicsEngine};
use super::state::{EntityId, EntityRole, GameEvent, GameState, ProjectileKind, SimulatedEntity};

impl<P: PhysicsEngine> GameState<P> {
    /// Replace every entity with the layout of level `index`
    ///
    /// # Panics
    /// If `index` is outside the catalog.
    pub fn load_level(&mut self, index: usize) {
        let level = self.catalog.get_level(index).clone();

        self.clear_level();
        for column in &level.columns {
            self.spawn_entity(
                EntityRole::Column(column.orientation),
                Vec2::new(column.x, column.y),
            );
        }
        for pig in &level.pigs {
            self.spawn_entity(EntityRole::Pig, Vec2::new(pig.x, pig.y));
        }

        self.current_level_index = index;
        self.level_time = 0.0;
        self.launcher.cancel_drag();
        log::info!(
            "Loaded level {} ({} columns, {} pigs)",
            index,
            level.columns.len(),
            level.pigs.len()
        );
        self.emit(GameEvent::LevelLoaded {
            index,
            entities: self.entities.len(),
        });
    }

    /// Remove every entity from the world
    pub fn clear_level(&mut self) {
        for entity in self.entities.drain(..) {
            self.physics.remove(entity.body, entity.shape);
        }
        self.active_projectile = None;
        self.projectile_age = 0.0;
    }

    /// Create a body for `role` at `position` and track it
    fn spawn_entity(&mut self, role: EntityRole, position: Vec2) -> EntityId {
        let params = role.spawn_params();
        let body = self
            .physics
            .create_dynamic_body(position, params.mass, params.moment);
        let shape = self.physics.add_shape(body, params.geometry, params.friction);

        let id = self.next_entity_id();
        // Ids are monotonic, so pushing keeps the list sorted
        self.entities.push(SimulatedEntity {
            id,
            role,
            body,
            shape,
            render: params.render,
        });
        id
    }

    /// Launch a new projectile, replacing any that is still active
    pub fn spawn_projectile(
        &mut self,
        kind: ProjectileKind,
        spawn_point: Point2D,
        impulse: ImpulseVector,
    ) -> EntityId {
        if let Some(previous) = self.active_projectile.take() {
            self.destroy(previous);
        }

        let id = self.spawn_entity(EntityRole::Projectile(kind), spawn_point);
        if let Some(body) = self.entity(id).map(|e| e.body) {
            let launch = impulse.direction() * impulse.magnitude * self.tuning.launch_power;
            self.physics.apply_impulse(body, launch);
        }
        self.active_projectile = Some(id);
        self.projectile_age = 0.0;

        log::debug!(
            "Launched {} bird {} at ({:.0}, {:.0}), angle {:.2}, magnitude {:.1}",
            kind.as_str(),
            id,
            spawn_point.x,
            spawn_point.y,
            impulse.angle,
            impulse.magnitude
        );
        self.emit(GameEvent::ProjectileLaunched { id, kind, impulse });
        id
    }

    /// Remove an entity from the world
    ///
    /// Unknown or already-destroyed ids are ignored. Returns whether anything
    /// was removed.
    pub fn destroy(&mut self, id: EntityId) -> bool {
        let Ok(index) = self.entities.binary_search_by_key(&id, |e| e.id) else {
            return false;
        };
        let entity = self.entities.remove(index);
        self.physics.remove(entity.body, entity.shape);

        if self.active_projectile == Some(id) {
            self.active_projectile = None;
            self.projectile_age = 0.0;
        }

        log::debug!("Destroyed {:?} {}", entity.role, id);
        self.emit(GameEvent::EntityDestroyed {
            id,
            role: entity.role,
        });
        true
    }

    /// True when no pig remains (columns don't matter)
    pub fn is_level_complete(&self) -> bool {
        !self.entities.iter().any(|e| e.role.is_pig())
    }

    pub fn entity(&self, id: EntityId) -> Option<&SimulatedEntity> {
        self.entities
            .binary_search_by_key(&id, |e| e.id)
            .ok()
            .map(|i| &self.entities[i])
    }

    /// The entity owning `body`, if it is tracked
    pub fn entity_for_body(&self, body: BodyHandle) -> Option<&SimulatedEntity> {
        self.entities.iter().find(|e| e.body == body)
    }

    pub fn pig_count(&self) -> usize {
        self.entities.iter().filter(|e| e.role.is_pig()).count()
    }

    pub fn column_count(&self) -> usize {
        self.entities.iter().filter(|e| e.role.is_column()).count()
    }

    pub fn projectile_count(&self) -> usize {
        self.entities.iter().filter(|e| e.role.is_projectile()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::impulse_from_drag;
    use crate::sim::levels::get_level;

    fn launch(state: &mut GameState) -> EntityId {
        let impulse = impulse_from_drag(Vec2::new(100.0, 300.0), Vec2::new(150.0, 320.0));
        state.spawn_projectile(ProjectileKind::Red, Vec2::new(150.0, 320.0), impulse)
    }

    #[test]
    fn test_load_level_populates_entities() {
        let mut state = GameState::new();
        for i in 0..state.catalog().level_count() {
            state.load_level(i);
            let level = get_level(i);
            assert_eq!(state.entities().len(), level.columns.len() + level.pigs.len());
            assert_eq!(state.pig_count(), level.pigs.len());
            assert_eq!(state.projectile_count(), 0);
            assert!(state.active_projectile().is_none());
            // Entity set and engine stay in lockstep (plus ground)
            assert_eq!(state.physics().body_count(), state.entities().len() + 1);
        }
    }

    #[test]
    fn test_load_level_drops_active_projectile() {
        let mut state = GameState::new();
        launch(&mut state);
        assert_eq!(state.projectile_count(), 1);

        state.load_level(1);
        assert_eq!(state.projectile_count(), 0);
        assert!(state.active_projectile().is_none());
    }

    #[test]
    fn test_second_projectile_replaces_first() {
        let mut state = GameState::new();
        let first = launch(&mut state);
        let second = launch(&mut state);

        assert_ne!(first, second);
        assert_eq!(state.projectile_count(), 1);
        assert_eq!(state.active_projectile(), Some(second));
        assert!(state.entity(first).is_none());
        assert_eq!(state.physics().body_count(), state.entities().len() + 1);
    }

    #[test]
    fn test_spawn_applies_launch_velocity() {
        let mut state = GameState::new();
        let id = launch(&mut state);
        let body = state.entity(id).unwrap().body;
        let v = state.physics().velocity(body).unwrap();
        // Launch points toward the release point: up and to the right
        assert!(v.x > 0.0 && v.y > 0.0);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut state = GameState::new();
        let pig = state.entities().iter().find(|e| e.role.is_pig()).unwrap().id;

        assert!(state.destroy(pig));
        assert!(!state.destroy(pig));
        assert!(!state.destroy(9999));
        assert_eq!(state.pig_count(), 0);
    }

    #[test]
    fn test_level_complete_ignores_columns() {
        let mut state = GameState::new();
        assert!(!state.is_level_complete());

        let pigs: Vec<_> = state
            .entities()
            .iter()
            .filter(|e| e.role.is_pig())
            .map(|e| e.id)
            .collect();
        for id in pigs {
            state.destroy(id);
        }
        assert!(state.column_count() > 0);
        assert!(state.is_level_complete());
    }

    #[test]
    fn test_destroying_projectile_clears_active() {
        let mut state = GameState::new();
        let id = launch(&mut state);
        state.destroy(id);
        assert!(state.active_projectile().is_none());
        assert_eq!(state.projectile_age(), 0.0);
    }

    #[test]
    fn test_entity_for_body() {
        let state = GameState::new();
        let pig = state.entities().iter().find(|e| e.role.is_pig()).unwrap();
        assert_eq!(state.entity_for_body(pig.body).map(|e| e.id), Some(pig.id));
        assert!(state.entity_for_body(state.ground()).is_none());
    }
}
