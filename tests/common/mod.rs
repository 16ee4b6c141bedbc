//! Shared test fixtures
//!
//! `ScriptedEngine` is a physics stand-in: bodies never move, and each step
//! reports whatever contacts the test queued for it.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

use glam::Vec2;
use slingshot::Tuning;
use slingshot::sim::{
    BodyHandle, BodyPose, Contact, ContactHandler, GameState, Geometry, LevelCatalog,
    LevelDefinition, PhysicsEngine, PigSpec, ShapeHandle, TickInput, tick,
};

#[derive(Debug, Clone, Copy)]
struct ScriptedBody {
    position: Vec2,
    velocity: Vec2,
    inv_mass: f32,
}

/// Contacts queued per step, shared between the test and the engine
#[derive(Debug, Clone, Default)]
pub struct ContactScript(Rc<RefCell<VecDeque<Vec<(BodyHandle, BodyHandle, f32)>>>>);

impl ContactScript {
    /// Queue contacts for the next unscripted step
    pub fn push_step(&self, contacts: Vec<(BodyHandle, BodyHandle, f32)>) {
        self.0.borrow_mut().push_back(contacts);
    }

    /// Queue one contact for the next step
    pub fn push_contact(&self, a: BodyHandle, b: BodyHandle, impulse: f32) {
        self.push_step(vec![(a, b, impulse)]);
    }

    pub fn pending(&self) -> usize {
        self.0.borrow().len()
    }
}

#[derive(Debug, Default)]
pub struct ScriptedEngine {
    gravity: Vec2,
    bodies: BTreeMap<BodyHandle, ScriptedBody>,
    shapes: BTreeMap<ShapeHandle, BodyHandle>,
    next_handle: u32,
    script: ContactScript,
    pub steps: u32,
}

impl ScriptedEngine {
    pub fn new(script: ContactScript) -> Self {
        Self {
            script,
            ..Default::default()
        }
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    /// Velocity set by launch impulses (bodies never integrate)
    pub fn velocity(&self, body: BodyHandle) -> Option<Vec2> {
        self.bodies.get(&body).map(|b| b.velocity)
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    fn handle(&mut self) -> u32 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl PhysicsEngine for ScriptedEngine {
    fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    fn create_static_body(&mut self) -> BodyHandle {
        let body = BodyHandle(self.handle());
        self.bodies.insert(
            body,
            ScriptedBody {
                position: Vec2::ZERO,
                velocity: Vec2::ZERO,
                inv_mass: 0.0,
            },
        );
        body
    }

    fn create_dynamic_body(&mut self, position: Vec2, mass: f32, _moment: f32) -> BodyHandle {
        let body = BodyHandle(self.handle());
        self.bodies.insert(
            body,
            ScriptedBody {
                position,
                velocity: Vec2::ZERO,
                inv_mass: 1.0 / mass,
            },
        );
        body
    }

    fn add_shape(&mut self, body: BodyHandle, _geometry: Geometry, _friction: f32) -> ShapeHandle {
        let shape = ShapeHandle(self.handle());
        self.shapes.insert(shape, body);
        shape
    }

    fn remove(&mut self, body: BodyHandle, shape: ShapeHandle) {
        self.bodies.remove(&body);
        self.shapes.remove(&shape);
    }

    fn apply_impulse(&mut self, body: BodyHandle, impulse: Vec2) {
        if let Some(b) = self.bodies.get_mut(&body) {
            b.velocity += impulse * b.inv_mass;
        }
    }

    fn body_pose(&self, body: BodyHandle) -> Option<BodyPose> {
        self.bodies.get(&body).map(|b| BodyPose {
            position: b.position,
            angle: 0.0,
        })
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn step(&mut self, _dt: f32, handler: &mut dyn ContactHandler) {
        self.steps += 1;
        let Some(contacts) = self.script.0.borrow_mut().pop_front() else {
            return;
        };
        for (body_a, body_b, impulse) in contacts {
            // A removed body can't touch anything
            if !self.bodies.contains_key(&body_a) || !self.bodies.contains_key(&body_b) {
                continue;
            }
            handler.post_solve(&Contact {
                body_a,
                body_b,
                total_impulse: Vec2::new(0.0, impulse),
            });
        }
    }
}

/// One pig resting on the ground, repeated `levels` times
pub fn single_pig_catalog(levels: usize) -> LevelCatalog {
    let level = LevelDefinition {
        columns: Vec::new(),
        pigs: vec![PigSpec::new(1100.0, 27.0)],
    };
    LevelCatalog::new(vec![level; levels])
}

/// A scripted game over `catalog`, plus the handle used to queue contacts
pub fn scripted_game(catalog: LevelCatalog) -> (GameState<ScriptedEngine>, ContactScript) {
    let script = ContactScript::default();
    let state = GameState::with_engine(
        ScriptedEngine::new(script.clone()),
        catalog,
        Tuning::default(),
    );
    (state, script)
}

/// Tick with no input until the post-load settle window has closed
pub fn settle(state: &mut GameState<ScriptedEngine>) {
    while state.is_settling() {
        tick(state, &TickInput::default());
    }
}

/// Scripted game over the stock levels
pub fn scripted_builtin_game() -> (GameState<ScriptedEngine>, ContactScript) {
    scripted_game(LevelCatalog::builtin())
}
