//! Drag-to-launch controller
//!
//! Idle -> Dragging -> Idle. Releasing a drag yields a launch request; the
//! game state turns it into a projectile.

use serde::{Deserialize, Serialize};

use super::geometry::{ImpulseVector, Point2D, impulse_from_drag};
use super::state::ProjectileKind;

/// Gesture state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { start: Point2D, end: Point2D },
}

/// A completed gesture, ready to spawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaunchRequest {
    pub kind: ProjectileKind,
    pub spawn_point: Point2D,
    pub impulse: ImpulseVector,
}

/// Drag gesture tracking and projectile selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LaunchController {
    state: DragState,
    kind_index: usize,
}

impl LaunchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Kind the next launch will use
    pub fn current_kind(&self) -> ProjectileKind {
        ProjectileKind::ALL[self.kind_index]
    }

    /// Start a drag (restarts one already in progress)
    pub fn begin_drag(&mut self, point: Point2D) {
        log::debug!("Drag start at ({:.0}, {:.0})", point.x, point.y);
        self.state = DragState::Dragging {
            start: point,
            end: point,
        };
    }

    /// Move the drag end point; ignored while idle
    pub fn update_drag(&mut self, point: Point2D) {
        if let DragState::Dragging { ref mut end, .. } = self.state {
            *end = point;
        }
    }

    /// Finish the drag at `point`; `None` while idle
    pub fn release_drag(&mut self, point: Point2D) -> Option<LaunchRequest> {
        let DragState::Dragging { start, .. } = self.state else {
            return None;
        };
        self.state = DragState::Idle;

        let impulse = impulse_from_drag(start, point);
        log::debug!(
            "Drag released at ({:.0}, {:.0}), magnitude {:.1}",
            point.x,
            point.y,
            impulse.magnitude
        );
        Some(LaunchRequest {
            kind: self.current_kind(),
            spawn_point: point,
            impulse,
        })
    }

    /// Drop a drag in progress without launching
    pub fn cancel_drag(&mut self) {
        self.state = DragState::Idle;
    }

    /// Select the next kind in the cycle; an airborne projectile keeps its kind
    pub fn switch_projectile_kind(&mut self) -> ProjectileKind {
        self.kind_index = (self.kind_index + 1) % ProjectileKind::ALL.len();
        log::debug!("Switched to {} bird", self.current_kind().as_str());
        self.current_kind()
    }

    /// Line from drag start to current end, while dragging
    pub fn drag_line(&self) -> Option<(Point2D, Point2D)> {
        match self.state {
            DragState::Dragging { start, end } => Some((start, end)),
            DragState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_drag_lifecycle() {
        let mut c = LaunchController::new();
        assert!(!c.is_dragging());

        c.begin_drag(Vec2::new(10.0, 10.0));
        assert_eq!(
            c.drag_line(),
            Some((Vec2::new(10.0, 10.0), Vec2::new(10.0, 10.0)))
        );

        c.update_drag(Vec2::new(40.0, 50.0));
        assert_eq!(c.drag_line().unwrap().1, Vec2::new(40.0, 50.0));

        let req = c.release_drag(Vec2::new(40.0, 50.0)).unwrap();
        assert_eq!(req.kind, ProjectileKind::Red);
        assert_eq!(req.spawn_point, Vec2::new(40.0, 50.0));
        assert!((req.impulse.magnitude - 50.0).abs() < 1e-4);
        assert!(!c.is_dragging());
        assert!(c.drag_line().is_none());
    }

    #[test]
    fn test_release_uses_release_point() {
        let mut c = LaunchController::new();
        c.begin_drag(Vec2::ZERO);
        c.update_drag(Vec2::new(5.0, 0.0));
        let req = c.release_drag(Vec2::new(0.0, 30.0)).unwrap();
        assert!((req.impulse.magnitude - 30.0).abs() < 1e-4);
        assert!((req.impulse.angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_release_while_idle_is_noop() {
        let mut c = LaunchController::new();
        assert!(c.release_drag(Vec2::new(1.0, 1.0)).is_none());
        c.update_drag(Vec2::new(2.0, 2.0));
        assert_eq!(c.state(), DragState::Idle);
    }

    #[test]
    fn test_kind_cycle_wraps() {
        let mut c = LaunchController::new();
        assert_eq!(c.current_kind(), ProjectileKind::Red);
        assert_eq!(c.switch_projectile_kind(), ProjectileKind::Blue);
        assert_eq!(c.switch_projectile_kind(), ProjectileKind::Yellow);
        assert_eq!(c.switch_projectile_kind(), ProjectileKind::Red);
    }

    #[test]
    fn test_selected_kind_goes_into_request() {
        let mut c = LaunchController::new();
        c.switch_projectile_kind();
        c.begin_drag(Vec2::ZERO);
        let req = c.release_drag(Vec2::new(3.0, 4.0)).unwrap();
        assert_eq!(req.kind, ProjectileKind::Blue);
    }
}
