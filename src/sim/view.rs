//! Read-only snapshot for renderers and hosts

use serde::Serialize;

use super::geometry::Point2D;
use super::physics::PhysicsEngine;
use super::state::{EntityId, EntityRole, GamePhase, GameState, ProjectileKind, RenderHandle};

/// One entity as a renderer sees it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityView {
    pub id: EntityId,
    pub role: EntityRole,
    pub render: RenderHandle,
    pub position: Point2D,
    /// Radians, counter-clockwise
    pub angle: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameView {
    pub level_index: usize,
    pub level_count: usize,
    pub phase: GamePhase,
    pub entities: Vec<EntityView>,
    /// Rubber band from drag start to current end
    pub drag_line: Option<(Point2D, Point2D)>,
    /// Kind the next launch will use
    pub projectile_kind: ProjectileKind,
}

impl<P: PhysicsEngine> GameState<P> {
    /// Snapshot the current poses, in entity id order
    pub fn frame_view(&self) -> FrameView {
        let entities = self
            .entities
            .iter()
            .filter_map(|e| {
                let pose = self.physics.body_pose(e.body)?;
                Some(EntityView {
                    id: e.id,
                    role: e.role,
                    render: e.render,
                    position: pose.position,
                    angle: pose.angle,
                })
            })
            .collect();

        FrameView {
            level_index: self.current_level_index,
            level_count: self.catalog.level_count(),
            phase: self.phase,
            entities,
            drag_line: self.launcher.drag_line(),
            projectile_kind: self.launcher.current_kind(),
        }
    }
}
