//! Rapier-backed physics engine
//!
//! The game works in pixels (y up). Rapier is happiest in meters, so the
//! adapter scales every length, velocity and impulse crossing the boundary
//! by `PIXELS_PER_METER`.

use std::collections::{BTreeMap, HashMap};

use glam::Vec2;
use rapier2d::prelude::*;

use super::physics::{
    BodyHandle, BodyPose, Contact, ContactHandler, Geometry, PhysicsEngine, ShapeHandle,
};

/// World scale: pixels per simulated meter
pub const PIXELS_PER_METER: f32 = 50.0;

#[inline]
fn to_meters(v: Vec2) -> Vector<Real> {
    vector![v.x / PIXELS_PER_METER, v.y / PIXELS_PER_METER]
}

#[inline]
fn to_pixels(v: &Vector<Real>) -> Vec2 {
    Vec2::new(v.x, v.y) * PIXELS_PER_METER
}

#[inline]
fn point_to_meters(v: Vec2) -> Point<Real> {
    point![v.x / PIXELS_PER_METER, v.y / PIXELS_PER_METER]
}

/// Deterministic rigid body world over rapier's pipeline
pub struct RapierWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,
    /// Game handle -> rapier handle and inverse mass, in creation order
    handles: BTreeMap<BodyHandle, (RigidBodyHandle, f32)>,
    owners: HashMap<RigidBodyHandle, BodyHandle>,
    shapes: BTreeMap<ShapeHandle, (BodyHandle, ColliderHandle)>,
    next_body: u32,
    next_shape: u32,
}

impl Default for RapierWorld {
    fn default() -> Self {
        Self::new(10)
    }
}

impl RapierWorld {
    /// Create an empty world solving contacts with `iterations` velocity passes per step
    pub fn new(iterations: u32) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.max_velocity_iterations = iterations.max(1) as usize;

        Self {
            gravity: vector![0.0, 0.0],
            integration_parameters,
            pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
            handles: BTreeMap::new(),
            owners: HashMap::new(),
            shapes: BTreeMap::new(),
            next_body: 1,
            next_shape: 1,
        }
    }

    /// Current gravity (pixels/s²)
    pub fn gravity(&self) -> Vec2 {
        to_pixels(&self.gravity)
    }

    /// Linear velocity of a body (pixels/s), `None` if it does not exist
    pub fn velocity(&self, body: BodyHandle) -> Option<Vec2> {
        let (rb_handle, _) = self.handles.get(&body)?;
        let rb = self.bodies.get(*rb_handle)?;
        Some(to_pixels(rb.linvel()))
    }

    /// Number of attached shapes
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    fn insert_body(&mut self, rb: RigidBody, inv_mass: f32) -> BodyHandle {
        let handle = BodyHandle(self.next_body);
        self.next_body += 1;
        let rb_handle = self.bodies.insert(rb);
        self.handles.insert(handle, (rb_handle, inv_mass));
        self.owners.insert(rb_handle, handle);
        handle
    }

    fn owner_of(&self, collider: ColliderHandle) -> Option<BodyHandle> {
        let parent = self.colliders.get(collider)?.parent()?;
        self.owners.get(&parent).copied()
    }

    /// Summed normal impulse per touching body pair, in pixel units
    fn resolved_contacts(&self) -> Vec<Contact> {
        let mut contacts: Vec<Contact> = self
            .narrow_phase
            .contact_pairs()
            .filter(|pair| pair.has_any_active_contact)
            .filter_map(|pair| {
                let body_a = self.owner_of(pair.collider1)?;
                let body_b = self.owner_of(pair.collider2)?;
                let total = pair
                    .manifolds
                    .iter()
                    .flat_map(|m| m.points.iter().map(move |p| m.data.normal * p.data.impulse))
                    .fold(vector![0.0, 0.0], |acc, v| acc + v);
                Some(Contact {
                    body_a,
                    body_b,
                    total_impulse: to_pixels(&total),
                })
            })
            .collect();

        // Narrow-phase storage order is an implementation detail
        contacts.sort_by_key(|c| (c.body_a, c.body_b));
        contacts
    }
}

impl PhysicsEngine for RapierWorld {
    fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = to_meters(gravity);
    }

    fn create_static_body(&mut self) -> BodyHandle {
        self.insert_body(RigidBodyBuilder::fixed().build(), 0.0)
    }

    fn create_dynamic_body(&mut self, position: Vec2, mass: f32, moment: f32) -> BodyHandle {
        // Mass lives on the body; colliders are massless
        let inertia = moment / (PIXELS_PER_METER * PIXELS_PER_METER);
        let rb = RigidBodyBuilder::dynamic()
            .translation(to_meters(position))
            .additional_mass_properties(MassProperties::new(point![0.0, 0.0], mass, inertia))
            .ccd_enabled(true)
            .build();
        let inv_mass = if mass > 0.0 { 1.0 / mass } else { 0.0 };
        self.insert_body(rb, inv_mass)
    }

    fn add_shape(&mut self, body: BodyHandle, geometry: Geometry, friction: f32) -> ShapeHandle {
        let builder = match geometry {
            Geometry::Circle { radius } => ColliderBuilder::ball(radius / PIXELS_PER_METER),
            Geometry::Box { half_extents } => ColliderBuilder::cuboid(
                half_extents.x / PIXELS_PER_METER,
                half_extents.y / PIXELS_PER_METER,
            ),
            Geometry::Segment { a, b } => {
                ColliderBuilder::segment(point_to_meters(a), point_to_meters(b))
            }
        };
        let collider = builder
            .density(0.0)
            .friction(friction)
            .friction_combine_rule(CoefficientCombineRule::Multiply)
            .build();

        let handle = ShapeHandle(self.next_shape);
        self.next_shape += 1;
        if let Some(&(rb_handle, _)) = self.handles.get(&body) {
            let collider_handle =
                self.colliders
                    .insert_with_parent(collider, rb_handle, &mut self.bodies);
            self.shapes.insert(handle, (body, collider_handle));
        }
        handle
    }

    fn remove(&mut self, body: BodyHandle, shape: ShapeHandle) {
        if let Some((_, collider)) = self.shapes.remove(&shape) {
            self.colliders
                .remove(collider, &mut self.island_manager, &mut self.bodies, true);
        }
        if let Some((rb_handle, _)) = self.handles.remove(&body) {
            self.owners.remove(&rb_handle);
            self.bodies.remove(
                rb_handle,
                &mut self.island_manager,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            );
        }
        // Rapier dropped any other colliders with the body
        self.shapes.retain(|_, (owner, _)| *owner != body);
    }

    fn apply_impulse(&mut self, body: BodyHandle, impulse: Vec2) {
        let Some(&(rb_handle, inv_mass)) = self.handles.get(&body) else {
            return;
        };
        // Rapier folds in mass properties lazily, so the velocity change is
        // computed here rather than through its own impulse API
        if let Some(rb) = self.bodies.get_mut(rb_handle) {
            let linvel = *rb.linvel() + to_meters(impulse * inv_mass);
            rb.set_linvel(linvel, true);
        }
    }

    fn body_pose(&self, body: BodyHandle) -> Option<BodyPose> {
        let (rb_handle, _) = self.handles.get(&body)?;
        let rb = self.bodies.get(*rb_handle)?;
        Some(BodyPose {
            position: to_pixels(rb.translation()),
            angle: rb.rotation().angle(),
        })
    }

    fn body_count(&self) -> usize {
        self.handles.len()
    }

    fn step(&mut self, dt: f32, handler: &mut dyn ContactHandler) {
        if dt <= 0.0 {
            return;
        }
        self.integration_parameters.dt = dt;

        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            None,
            &(),
            &(),
        );

        for contact in self.resolved_contacts() {
            handler.post_solve(&contact);
        }
    }
}
