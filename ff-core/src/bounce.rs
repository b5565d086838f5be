//! Post-impact bounce and tumble.
//!
//! Once playback detects ground contact, this integrator owns the pose. It is
//! a fixed-step semi-implicit Euler integrator with a flat ground plane:
//!
//! ```text
//! 1. v.y -= g*dt
//! 2. x   += v*dt
//! 3. θ   += ω*dt;  ω *= damping
//! 4. if x.y <= floor:
//!        x.y = floor
//!        |v.y| > v_min  →  v.y = -e*v.y, v.xz *= μ, random re-spin on x/z
//!        otherwise      →  settle (v = ω = 0, inactive)
//! ```
//!
//! The step is a constant, not the measured frame time. The animation lasts a
//! few seconds and only has to look plausible.

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::{constants, Pose, Vec3};

/// Step used by the frame loop (one step per rendered frame at 60 Hz).
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Tuning for the bounce animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BounceParams {
    /// Gravitational acceleration (m/s²)
    pub gravity: f64,

    /// Fraction of vertical speed kept (and reversed) on each bounce
    pub restitution: f64,

    /// Horizontal velocity multiplier applied on each bounce
    pub friction: f64,

    /// Angular velocity multiplier applied every step
    pub angular_damping: f64,

    /// Vertical contact speed below which the object settles (m/s)
    pub min_bounce_speed: f64,

    /// Half-width of the random spin kick added on each bounce (rad/s)
    pub respin_range: f64,

    /// Half-width of the random tumble rates seeded at impact (rad/s)
    pub impact_spin_range: f64,
}

impl Default for BounceParams {
    fn default() -> Self {
        Self {
            gravity: constants::GRAVITY,
            restitution: 0.4,
            friction: 0.98,
            angular_damping: 0.95,
            min_bounce_speed: 0.5,
            respin_range: 1.0,
            impact_spin_range: 2.5,
        }
    }
}

/// Velocities of the object while it bounces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BounceState {
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
    pub bounce_count: u32,
    pub active: bool,
}

impl BounceState {
    pub fn new(linear_velocity: Vec3, angular_velocity: Vec3) -> Self {
        Self {
            linear_velocity,
            angular_velocity,
            bounce_count: 0,
            active: true,
        }
    }

    /// State at the moment of impact: the given velocity and a random tumble
    /// on every axis.
    pub fn from_impact<R: Rng + ?Sized>(
        linear_velocity: Vec3,
        params: &BounceParams,
        rng: &mut R,
    ) -> Self {
        let spin = Vec3::new(
            jitter(rng, params.impact_spin_range),
            jitter(rng, params.impact_spin_range),
            jitter(rng, params.impact_spin_range),
        );
        Self::new(linear_velocity, spin)
    }
}

/// What a single step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BounceOutcome {
    /// State already settled; nothing changed.
    Inactive,
    Airborne,
    Bounced,
    Settled,
}

/// Fixed-step bounce integrator.
#[derive(Debug, Clone)]
pub struct BounceIntegrator {
    pub params: BounceParams,
    pub dt: f64,
}

impl Default for BounceIntegrator {
    fn default() -> Self {
        Self::new(BounceParams::default())
    }
}

impl BounceIntegrator {
    pub fn new(params: BounceParams) -> Self {
        Self {
            params,
            dt: FIXED_DT,
        }
    }

    /// Advance the bounce by one fixed step.
    ///
    /// # Arguments
    /// * `state` - Bounce velocities, mutated in place
    /// * `pose` - Object pose, mutated in place
    /// * `floor` - Center height at which the object rests on the ground
    /// * `rng` - Source for the re-spin kicks
    pub fn step<R: Rng + ?Sized>(
        &self,
        state: &mut BounceState,
        pose: &mut Pose,
        floor: f64,
        rng: &mut R,
    ) -> BounceOutcome {
        if !state.active {
            return BounceOutcome::Inactive;
        }

        let p = &self.params;
        let dt = self.dt;

        state.linear_velocity.y -= p.gravity * dt;
        pose.position += state.linear_velocity * dt;

        pose.orientation += state.angular_velocity * dt;
        state.angular_velocity = state.angular_velocity * p.angular_damping;

        if pose.position.y > floor {
            return BounceOutcome::Airborne;
        }

        pose.position.y = floor;

        let contact_speed = state.linear_velocity.y.abs();
        if contact_speed > p.min_bounce_speed {
            state.linear_velocity.y = -state.linear_velocity.y * p.restitution;
            state.linear_velocity.x *= p.friction;
            state.linear_velocity.z *= p.friction;
            state.bounce_count += 1;

            state.angular_velocity.x += jitter(rng, p.respin_range);
            state.angular_velocity.z += jitter(rng, p.respin_range);

            debug!(
                "bounce {} at {:.2} m/s, rebound {:.2} m/s",
                state.bounce_count, contact_speed, state.linear_velocity.y
            );
            BounceOutcome::Bounced
        } else {
            state.linear_velocity = Vec3::ZERO;
            state.angular_velocity = Vec3::ZERO;
            state.active = false;
            debug!(
                "settled after {} bounces at ({:.2}, {:.2})",
                state.bounce_count, pose.position.x, pose.position.z
            );
            BounceOutcome::Settled
        }
    }
}

/// Uniform sample in `[-half_range, half_range)`, zero for an empty range.
fn jitter<R: Rng + ?Sized>(rng: &mut R, half_range: f64) -> f64 {
    if half_range > 0.0 {
        rng.random_range(-half_range..half_range)
    } else {
        0.0
    }
}

// =============================================================================
// Tests
// =============================================================================
