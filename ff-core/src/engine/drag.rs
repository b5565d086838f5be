//! Point-mass reference engine.
//!
//! Forces:
//! - **Gravity**: constant 9.81 m/s² downward
//! - **Drag**: F = 0.5 * ρ(h) * Cd * A * |v|², opposing motion
//!
//! Attitude integrates the constant body rates from the request; there is no
//! aerodynamic moment model. Integration is forward Euler at the requested
//! time step and stops at the first sample at or below the ground, or at the
//! end of the requested duration.

use std::collections::HashMap;

use log::{debug, info};

use super::atmosphere;
use super::{EngineRequest, EngineStatus, PhysicsEngine};
use crate::error::EngineError;
use crate::trajectory::TrajectorySample;
use crate::types::{constants, Vec3};
use crate::vehicles::{AeroProperties, VehicleKind, VehicleProfile};

/// Gravity plus drag in a standard atmosphere.
#[derive(Debug, Clone)]
pub struct DragEngine {
    aero: HashMap<VehicleKind, AeroProperties>,
    results: Vec<TrajectorySample>,
}

impl Default for DragEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DragEngine {
    /// Engine using the built-in profile of every vehicle kind.
    pub fn new() -> Self {
        Self::with_profiles(VehicleKind::ALL.iter().map(|kind| kind.profile()))
    }

    pub fn with_profiles<I>(profiles: I) -> Self
    where
        I: IntoIterator<Item = VehicleProfile>,
    {
        let mut aero: HashMap<VehicleKind, AeroProperties> = VehicleKind::ALL
            .iter()
            .map(|kind| (*kind, kind.profile().aero))
            .collect();
        for profile in profiles {
            aero.insert(profile.kind, profile.aero);
        }
        Self {
            aero,
            results: Vec::new(),
        }
    }

    /// Linear acceleration for the current velocity at `altitude_m`.
    fn acceleration(aero: &AeroProperties, altitude_m: f64, vel: Vec3) -> Vec3 {
        let gravity = Vec3::new(0.0, -constants::GRAVITY, 0.0);

        let speed = vel.magnitude();
        if speed < constants::EPSILON || aero.drag_coefficient == 0.0 {
            return gravity;
        }

        let rho = atmosphere::properties(altitude_m).density_kgpm3;
        let drag_mag = 0.5 * rho * aero.drag_coefficient * aero.reference_area_m2 * speed * speed;
        gravity + vel * (-drag_mag / (aero.mass_kg * speed))
    }
}

impl PhysicsEngine for DragEngine {
    fn status(&self) -> EngineStatus {
        EngineStatus::Ready
    }

    fn run_simulation(&mut self, request: &EngineRequest) -> Result<(), EngineError> {
        request.validate()?;
        let aero = *self.aero.get(&request.vehicle).ok_or_else(|| {
            EngineError::InvalidRequest(format!("no aero data for {}", request.vehicle))
        })?;
        if !(aero.mass_kg > 0.0) {
            return Err(EngineError::InvalidRequest(format!(
                "mass must be positive for {}",
                request.vehicle
            )));
        }

        self.results.clear();

        let dt = request.time_step_s;
        // Guard against 120.0 / 0.01 landing just under 12000.
        let steps = (request.duration_s / dt + 1e-9).floor() as usize;

        let mut pos = Vec3::new(0.0, request.altitude_m, 0.0);
        let mut vel = request.initial_velocity;
        // (roll, pitch, yaw)
        let mut attitude = request.initial_orientation;
        let rates = request.initial_angular_velocity;

        for i in 0..=steps {
            let speed = vel.magnitude();
            let air = atmosphere::properties(pos.y);
            self.results.push(TrajectorySample {
                time_s: i as f64 * dt,
                position: pos,
                roll: attitude.x,
                pitch: attitude.y,
                yaw: attitude.z,
                speed,
                mach: speed / air.speed_of_sound_mps,
            });

            if pos.y <= 0.0 {
                debug!("ground reached at t={:.2}s, {:.1} m/s", i as f64 * dt, speed);
                break;
            }

            let acc = Self::acceleration(&aero, pos.y, vel);
            pos += vel * dt;
            vel += acc * dt;
            attitude += rates * dt;
        }

        info!(
            "{} from {:.0} m: {} samples",
            request.vehicle,
            request.altitude_m,
            self.results.len()
        );
        Ok(())
    }

    fn result_len(&self) -> usize {
        self.results.len()
    }

    fn sample(&self, index: usize) -> Option<TrajectorySample> {
        self.results.get(index).copied()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn request(vehicle: VehicleKind, altitude_m: f64, duration_s: f64) -> EngineRequest {
        EngineRequest {
            vehicle,
            altitude_m,
            initial_orientation: Vec3::ZERO,
            initial_angular_velocity: vehicle.profile().initial_angular_velocity,
            initial_velocity: EngineRequest::RELEASE_VELOCITY,
            duration_s,
            time_step_s: 0.01,
        }
    }

    #[test]
    fn test_brick_free_fall_reaches_ground() {
        let mut engine = DragEngine::new();
        engine
            .run_simulation(&request(VehicleKind::Brick, 9000.0, 120.0))
            .unwrap();

        // No drag: t = sqrt(2h/g) ≈ 42.8s
        let last = engine.sample(engine.result_len() - 1).unwrap();
        assert!(last.position.y <= 0.0);
        assert!(
            (last.time_s - 42.8).abs() < 0.2,
            "Expected ~42.8s fall, got {}",
            last.time_s
        );
        // v = g*t ≈ 420 m/s
        assert!((last.speed - 420.0).abs() < 5.0, "speed={}", last.speed);
        assert!(last.mach > 1.0);
    }

    #[test]
    fn test_bowling_ball_approaches_terminal_velocity() {
        let mut engine = DragEngine::new();
        engine
            .run_simulation(&request(VehicleKind::BowlingBall, 3000.0, 120.0))
            .unwrap();

        let last = engine.sample(engine.result_len() - 1).unwrap();
        let aero = VehicleProfile::bowling_ball().aero;
        let v_term = (2.0 * aero.mass_kg * constants::GRAVITY
            / (1.225 * aero.drag_coefficient * aero.reference_area_m2))
            .sqrt();
        assert!(
            (last.speed - v_term).abs() / v_term < 0.05,
            "speed={} terminal={}",
            last.speed,
            v_term
        );
    }

    #[test]
    fn test_duration_exhausted_before_ground() {
        let mut engine = DragEngine::new();
        engine
            .run_simulation(&request(VehicleKind::Blueberry, 9000.0, 5.0))
            .unwrap();

        assert_eq!(engine.result_len(), 501);
        assert!(engine.sample(500).unwrap().position.y > 0.0);
        assert!(engine.sample(501).is_none());
    }

    #[test]
    fn test_attitude_integrates_body_rates() {
        let mut engine = DragEngine::new();
        engine
            .run_simulation(&request(VehicleKind::Brick, 1000.0, 1.0))
            .unwrap();

        let sample = engine.sample(100).unwrap();
        assert!((sample.roll - 0.17).abs() < 1e-9);
        assert!((sample.pitch - 0.35).abs() < 1e-9);
        assert!((sample.yaw - 0.52).abs() < 1e-9);
    }

    #[test]
    fn test_rerun_replaces_result() {
        let mut engine = DragEngine::new();
        engine
            .run_simulation(&request(VehicleKind::Brick, 1000.0, 2.0))
            .unwrap();
        engine
            .run_simulation(&request(VehicleKind::Brick, 1000.0, 1.0))
            .unwrap();
        assert_eq!(engine.result_len(), 101);
    }

    #[test]
    fn test_invalid_request() {
        let mut engine = DragEngine::new();
        let mut bad = request(VehicleKind::Brick, 1000.0, 1.0);
        bad.time_step_s = 0.0;
        assert!(matches!(
            engine.run_simulation(&bad),
            Err(EngineError::InvalidRequest(_))
        ));
    }
}
