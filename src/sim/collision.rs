//! Collision damage policy
//!
//! Decides, from the impulse the solver needed to resolve a contact, whether
//! the bodies involved break. Runs inside the physics step, so it only records
//! decisions; the game state applies them once the step returns.
//!
//! Right after a level loads its towers drop onto their supports. Until the
//! settle window closes, only contacts with the active projectile can break
//! anything; everything else is downgraded to a hit.

use super::physics::{BodyHandle, Contact, ContactHandler, ContactResolution, PhysicsEngine};
use super::state::{GameEvent, GameState};
use crate::tuning::Tuning;

/// How hard a contact was
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactClass {
    /// Below the hit threshold
    Ignored,
    /// Registered, but not enough to break anything
    Hit,
    /// Both bodies break
    Destructive,
}

/// Classify an impulse magnitude; both thresholds are inclusive of the
/// gentler class, so exactly `destroy` is still only a hit
pub fn classify_impulse(magnitude: f32, hit: f32, destroy: f32) -> ImpactClass {
    if magnitude < hit {
        ImpactClass::Ignored
    } else if magnitude <= destroy {
        ImpactClass::Hit
    } else {
        ImpactClass::Destructive
    }
}

/// A registered, non-destructive hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    pub impulse: f32,
}

/// Contact handler collecting hits and destruction requests for one step
#[derive(Debug, Clone)]
pub struct CollisionPolicy {
    hit_threshold: f32,
    destroy_threshold: f32,
    settling: bool,
    projectile: Option<BodyHandle>,
    /// Bodies to destroy, in report order (may contain duplicates)
    pub doomed: Vec<BodyHandle>,
    pub hits: Vec<HitRecord>,
}

impl CollisionPolicy {
    pub fn new(hit_threshold: f32, destroy_threshold: f32) -> Self {
        Self {
            hit_threshold,
            destroy_threshold,
            settling: false,
            projectile: None,
            doomed: Vec::new(),
            hits: Vec::new(),
        }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(tuning.hit_threshold, tuning.destroy_threshold)
    }

    /// Only contacts involving `projectile` may destroy during this step
    pub fn settling(mut self, projectile: Option<BodyHandle>) -> Self {
        self.settling = true;
        self.projectile = projectile;
        self
    }

    pub fn classify(&self, magnitude: f32) -> ImpactClass {
        classify_impulse(magnitude, self.hit_threshold, self.destroy_threshold)
    }

    /// Class after the settle window is taken into account
    fn classify_contact(&self, contact: &Contact) -> ImpactClass {
        match self.classify(contact.impulse_magnitude()) {
            ImpactClass::Destructive
                if self.settling && !self.projectile.is_some_and(|p| contact.involves(p)) =>
            {
                log::debug!("Settling contact absorbed");
                ImpactClass::Hit
            }
            class => class,
        }
    }
}

impl ContactHandler for CollisionPolicy {
    fn post_solve(&mut self, contact: &Contact) -> ContactResolution {
        let impulse = contact.impulse_magnitude();
        match self.classify_contact(contact) {
            ImpactClass::Ignored => {}
            ImpactClass::Hit => {
                log::debug!("Collision impulse: {impulse:.1}");
                self.hits.push(HitRecord {
                    body_a: contact.body_a,
                    body_b: contact.body_b,
                    impulse,
                });
            }
            ImpactClass::Destructive => {
                log::debug!("Collision impulse: {impulse:.1} (destructive)");
                self.doomed.push(contact.body_a);
                self.doomed.push(contact.body_b);
            }
        }
        // Damage never vetoes the physical response
        ContactResolution::Continue
    }
}

impl<P: PhysicsEngine> GameState<P> {
    /// Apply one step's worth of collision outcomes
    ///
    /// Bodies that are not tracked entities (the ground) are skipped, as are
    /// bodies already destroyed earlier in the same step.
    pub fn apply_collisions(&mut self, policy: CollisionPolicy) {
        for hit in policy.hits {
            let a = self.entity_for_body(hit.body_a).map(|e| e.id);
            let b = self.entity_for_body(hit.body_b).map(|e| e.id);
            self.emit(GameEvent::Hit {
                a,
                b,
                impulse: hit.impulse,
            });
        }

        for body in policy.doomed {
            if let Some(id) = self.entity_for_body(body).map(|e| e.id) {
                self.destroy(id);
            }
        }
    }
}
