//! Physics engine contract
//!
//! The game core never touches body positions or velocities directly. It
//! creates and removes bodies, applies a launch impulse once at spawn time,
//! and steps the engine. Everything else belongs to the engine.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque handle to a rigid body owned by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyHandle(pub u32);

/// Opaque handle to a collision shape attached to a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeHandle(pub u32);

/// Collision geometry, in body-local coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Circle { radius: f32 },
    /// Oriented box centered on the body origin
    Box { half_extents: Vec2 },
    /// Zero-thickness line segment (used for the static ground)
    Segment { a: Vec2, b: Vec2 },
}

/// Position and rotation of a body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPose {
    pub position: Vec2,
    /// Rotation in radians, counter-clockwise
    pub angle: f32,
}

/// One resolved contact, reported after the solver has run
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    /// Sum of the normal impulses over every contact point
    pub total_impulse: Vec2,
}

impl Contact {
    /// Magnitude of the impulse the solver applied to resolve this contact
    #[inline]
    pub fn impulse_magnitude(&self) -> f32 {
        self.total_impulse.length()
    }

    /// Whether `body` is one of the two bodies in contact
    pub fn involves(&self, body: BodyHandle) -> bool {
        self.body_a == body || self.body_b == body
    }
}

/// Signal returned to the engine from a contact callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactResolution {
    /// Keep the physical resolution as solved
    Continue,
}

/// Receives every resolved contact during `PhysicsEngine::step`
///
/// Called synchronously from inside the step, once per contact pair.
pub trait ContactHandler {
    fn post_solve(&mut self, contact: &Contact) -> ContactResolution;
}

/// Handler that ignores every contact
impl ContactHandler for () {
    fn post_solve(&mut self, _contact: &Contact) -> ContactResolution {
        ContactResolution::Continue
    }
}

/// The operations the game consumes from a rigid-body engine
pub trait PhysicsEngine {
    /// Set world gravity (acceleration applied to every dynamic body)
    fn set_gravity(&mut self, gravity: Vec2);

    /// Create an immovable body at the origin
    fn create_static_body(&mut self) -> BodyHandle;

    /// Create a body that responds to gravity and collisions
    fn create_dynamic_body(&mut self, position: Vec2, mass: f32, moment: f32) -> BodyHandle;

    /// Attach collision geometry to a body
    fn add_shape(&mut self, body: BodyHandle, geometry: Geometry, friction: f32) -> ShapeHandle;

    /// Remove a body and its shape. Unknown handles are ignored.
    fn remove(&mut self, body: BodyHandle, shape: ShapeHandle);

    /// Apply an instantaneous impulse through the body's center of mass
    fn apply_impulse(&mut self, body: BodyHandle, impulse: Vec2);

    /// Current pose of a body, `None` if it does not exist
    fn body_pose(&self, body: BodyHandle) -> Option<BodyPose>;

    /// Number of live bodies (static ones included)
    fn body_count(&self) -> usize;

    /// Advance the simulation by `dt`, reporting resolved contacts to `handler`
    fn step(&mut self, dt: f32, handler: &mut dyn ContactHandler);
}

/// Moment of inertia of a solid disc
pub fn moment_for_circle(mass: f32, radius: f32) -> f32 {
    0.5 * mass * radius * radius
}

/// Moment of inertia of a solid box
pub fn moment_for_box(mass: f32, size: Vec2) -> f32 {
    mass * (size.x * size.x + size.y * size.y) / 12.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_impulse_magnitude() {
        let contact = Contact {
            body_a: BodyHandle(1),
            body_b: BodyHandle(2),
            total_impulse: Vec2::new(300.0, 400.0),
        };
        assert!((contact.impulse_magnitude() - 500.0).abs() < 1e-3);
        assert!(contact.involves(BodyHandle(2)));
        assert!(!contact.involves(BodyHandle(3)));
    }

    #[test]
    fn test_moments() {
        assert!((moment_for_circle(2.0, 3.0) - 9.0).abs() < 1e-6);
        assert!((moment_for_box(12.0, Vec2::new(3.0, 4.0)) - 25.0).abs() < 1e-6);
    }
}
