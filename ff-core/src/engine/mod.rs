//! Physics engine boundary.
//!
//! The trajectory itself comes from an engine behind the `PhysicsEngine`
//! trait: one blocking `run_simulation` call per run, then indexed reads of
//! the result. Reads past `result_len()` return `None`.
//!
//! `DragEngine` is a point-mass reference implementation (gravity plus
//! quadratic drag in a standard atmosphere) used by the CLI, the bindings
//! and the tests. A full 6-DOF engine plugs in through the same trait.

pub mod atmosphere;
pub mod drag;

pub use drag::DragEngine;

use crate::error::EngineError;
use crate::trajectory::TrajectorySample;
use crate::types::Vec3;
use crate::vehicles::VehicleKind;

/// Initialization state of an engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineStatus {
    /// Still initializing; a start request must be retried later.
    Loading,
    Ready,
    /// Failed to load. Permanent for the lifetime of the engine.
    Failed(String),
}

/// Initial conditions for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineRequest {
    pub vehicle: VehicleKind,
    pub altitude_m: f64,
    /// Roll, pitch, yaw (rad)
    pub initial_orientation: Vec3,
    /// Body rates p, q, r (rad/s)
    pub initial_angular_velocity: Vec3,
    /// m/s, x north, y up, z east
    pub initial_velocity: Vec3,
    pub duration_s: f64,
    pub time_step_s: f64,
}

impl EngineRequest {
    /// Release velocity handed to the engine: a tiny forward drift so the
    /// direction of motion is defined at t = 0.
    pub const RELEASE_VELOCITY: Vec3 = Vec3::new(0.001, 0.0, 0.0);

    pub(crate) fn validate(&self) -> Result<(), EngineError> {
        if !(self.duration_s > 0.0) {
            return Err(EngineError::InvalidRequest(format!(
                "duration must be positive, got {}",
                self.duration_s
            )));
        }
        if !(self.time_step_s > 0.0) {
            return Err(EngineError::InvalidRequest(format!(
                "time step must be positive, got {}",
                self.time_step_s
            )));
        }
        Ok(())
    }
}

/// An engine producing a trajectory time series.
pub trait PhysicsEngine {
    fn status(&self) -> EngineStatus;

    /// Run one simulation, replacing any previous result. Blocks until done.
    fn run_simulation(&mut self, request: &EngineRequest) -> Result<(), EngineError>;

    /// Number of samples in the last result.
    fn result_len(&self) -> usize;

    /// Sample `index` of the last result, or `None` past the end.
    fn sample(&self, index: usize) -> Option<TrajectorySample>;
}
