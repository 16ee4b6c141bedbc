//! Input events
//!
//! Discrete events from the host, applied between ticks.

use serde::{Deserialize, Serialize};

use super::geometry::Point2D;
use super::physics::PhysicsEngine;
use super::state::{EntityRole, GameEvent, GameState};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    /// Cycle projectile kind
    Tab,
    /// Kind-specific power-up
    Space,
    /// Skip to the next level
    Left,
}

/// One input event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    Press(Point2D),
    Drag(Point2D),
    Release(Point2D),
    Key(Key),
}

impl<P: PhysicsEngine> GameState<P> {
    /// Apply one input event. Everything is ignored once the game is completed.
    pub fn handle_input(&mut self, event: InputEvent) {
        if self.is_completed() {
            return;
        }

        match event {
            InputEvent::Press(point) => self.launcher.begin_drag(point),
            InputEvent::Drag(point) => self.launcher.update_drag(point),
            InputEvent::Release(point) => {
                if let Some(request) = self.launcher.release_drag(point) {
                    self.spawn_projectile(request.kind, request.spawn_point, request.impulse);
                }
            }
            InputEvent::Key(Key::Tab) => {
                let kind = self.launcher.switch_projectile_kind();
                self.emit(GameEvent::KindSwitched { kind });
            }
            InputEvent::Key(Key::Space) => {
                let active = self
                    .active_projectile
                    .and_then(|id| self.entity(id))
                    .and_then(|e| match e.role {
                        EntityRole::Projectile(kind) => Some((e.id, kind)),
                        _ => None,
                    });
                if let Some((id, kind)) = active {
                    self.emit(GameEvent::PowerUpRequested { id, kind });
                }
            }
            InputEvent::Key(Key::Left) => self.skip_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ProjectileKind;
    use glam::Vec2;

    #[test]
    fn test_press_drag_release_launches() {
        let mut state = GameState::new();
        state.handle_input(InputEvent::Press(Vec2::new(200.0, 300.0)));
        state.handle_input(InputEvent::Drag(Vec2::new(220.0, 310.0)));
        assert!(state.launcher.is_dragging());
        assert!(state.active_projectile().is_none());

        state.handle_input(InputEvent::Release(Vec2::new(260.0, 330.0)));
        assert!(state.active_projectile().is_some());
        assert_eq!(state.projectile_count(), 1);
    }

    #[test]
    fn test_release_without_press_spawns_nothing() {
        let mut state = GameState::new();
        state.handle_input(InputEvent::Release(Vec2::new(260.0, 330.0)));
        assert!(state.active_projectile().is_none());
    }

    #[test]
    fn test_tab_switch_keeps_airborne_kind() {
        let mut state = GameState::new();
        state.handle_input(InputEvent::Press(Vec2::new(200.0, 300.0)));
        state.handle_input(InputEvent::Release(Vec2::new(260.0, 330.0)));
        let id = state.active_projectile().unwrap();

        state.handle_input(InputEvent::Key(Key::Tab));
        assert_eq!(state.launcher.current_kind(), ProjectileKind::Blue);
        assert_eq!(
            state.entity(id).unwrap().role,
            EntityRole::Projectile(ProjectileKind::Red)
        );
    }

    #[test]
    fn test_space_requests_power_up_only_when_airborne() {
        let mut state = GameState::new();
        state.drain_events();
        state.handle_input(InputEvent::Key(Key::Space));
        assert!(state.events().is_empty());

        state.handle_input(InputEvent::Press(Vec2::new(200.0, 300.0)));
        state.handle_input(InputEvent::Release(Vec2::new(260.0, 330.0)));
        state.handle_input(InputEvent::Key(Key::Space));
        assert!(matches!(
            state.events().last(),
            Some(GameEvent::PowerUpRequested {
                kind: ProjectileKind::Red,
                ..
            })
        ));
    }

    #[test]
    fn test_left_skips_level() {
        let mut state = GameState::new();
        state.handle_input(InputEvent::Key(Key::Left));
        assert_eq!(state.current_level_index, 1);
    }
}
