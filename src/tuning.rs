//! Data-driven game balance
//!
//! Every gameplay number the simulation reads at runtime. Defaults come from
//! `consts`; a JSON document may override any subset of fields.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Error loading or validating tuning values
#[derive(Debug)]
pub enum TuningError {
    /// Could not read the tuning file
    Io(std::io::Error),
    /// The document is not valid tuning JSON
    Parse(serde_json::Error),
    /// A value is out of its allowed range
    Invalid(String),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(e) => write!(f, "failed to read tuning file: {e}"),
            TuningError::Parse(e) => write!(f, "failed to parse tuning: {e}"),
            TuningError::Invalid(msg) => write!(f, "invalid tuning: {msg}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(e) => Some(e),
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        TuningError::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Fixed simulation step (seconds)
    pub sim_dt: f32,
    /// Vertical gravity (pixels/s², negative is down)
    pub gravity: f32,
    /// Height of the static ground line
    pub ground_y: f32,
    pub ground_friction: f32,
    /// Drag magnitude to physical impulse multiplier
    pub launch_power: f32,
    /// Contact impulse below this is ignored
    pub hit_threshold: f32,
    /// Contact impulse above this destroys both bodies
    pub destroy_threshold: f32,
    /// Seconds before an unresolved projectile is removed
    pub projectile_timeout: f32,
    /// Seconds after a level loads during which only projectile contacts destroy
    pub settle_time: f32,
    /// Contact solver passes per step
    pub solver_iterations: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            sim_dt: SIM_DT,
            gravity: GRAVITY,
            ground_y: GROUND_Y,
            ground_friction: GROUND_FRICTION,
            launch_power: LAUNCH_POWER,
            hit_threshold: HIT_THRESHOLD,
            destroy_threshold: DESTROY_THRESHOLD,
            projectile_timeout: PROJECTILE_TIMEOUT,
            settle_time: SETTLE_TIME,
            solver_iterations: 10,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.sim_dt > 0.0 && self.sim_dt <= MAX_FRAME_TIME) {
            return Err(TuningError::Invalid(format!(
                "sim_dt must be in (0, {MAX_FRAME_TIME}], got {}",
                self.sim_dt
            )));
        }
        if self.launch_power < 0.0 {
            return Err(TuningError::Invalid(
                "launch_power must not be negative".into(),
            ));
        }
        if self.hit_threshold < 0.0 || self.destroy_threshold < self.hit_threshold {
            return Err(TuningError::Invalid(format!(
                "thresholds must satisfy 0 <= hit ({}) <= destroy ({})",
                self.hit_threshold, self.destroy_threshold
            )));
        }
        if self.projectile_timeout <= 0.0 {
            return Err(TuningError::Invalid(
                "projectile_timeout must be positive".into(),
            ));
        }
        if self.settle_time < 0.0 {
            return Err(TuningError::Invalid(
                "settle_time must not be negative".into(),
            ));
        }
        if self.solver_iterations == 0 {
            return Err(TuningError::Invalid(
                "solver_iterations must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
