//! Core types shared by the playback, bounce and camera stages.
//!
//! All units are SI:
//! - Position: meters (m), with Y pointing up and the ground at y = 0
//! - Velocity: meters per second (m/s)
//! - Orientation: radians
//! - Angular velocity: radians per second (rad/s)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

// =============================================================================
// Vec3 - 3D Vector
// =============================================================================

/// A 3D vector used for positions, velocities, orientations and sizes.
///
/// Coordinate system:
/// - X: horizontal, north
/// - Y: vertical (positive upward)
/// - Z: horizontal, east
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Squared magnitude (avoids sqrt for comparisons)
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Magnitude (length) of the vector
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Largest of the three components
    pub fn max_component(&self) -> f64 {
        self.x.max(self.y).max(self.z)
    }

    /// Linear interpolation between two vectors
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        *self + (*other - *self) * t
    }
}

// Operator overloads for Vec3
impl Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Self::ZERO
    }
}

// =============================================================================
// Pose
// =============================================================================

/// Placement of the falling object for the current frame.
///
/// Orientation is kept in the order the render surface applies it:
/// - x: roll
/// - y: yaw
/// - z: pitch
///
/// Only one driver writes the pose in any given frame: the playback driver
/// while the run is `Playing`, the bounce integrator while it is `Bouncing`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Vec3,
}

impl Pose {
    /// Object at rest, level, directly above the origin.
    pub fn at_altitude(altitude: f64) -> Self {
        Self {
            position: Vec3::new(0.0, altitude, 0.0),
            orientation: Vec3::ZERO,
        }
    }
}

// =============================================================================
// Telemetry
// =============================================================================

/// Scalars copied from the current trajectory sample for the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Telemetry {
    /// Altitude above ground, never negative
    pub altitude: f64,
    /// Speed in m/s
    pub speed: f64,
    pub mach: f64,
    /// Simulation time of the sample in seconds
    pub time: f64,
}

impl fmt::Display for Telemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "alt {:.0} m | {:.1} m/s | Mach {:.2} | t {:.1} s",
            self.altitude, self.speed, self.mach, self.time
        )
    }
}

// =============================================================================
// Physical Constants
// =============================================================================

/// Physical constants used in the simulation.
pub mod constants {
    /// Gravitational acceleration (m/s²)
    pub const GRAVITY: f64 = 9.81;

    /// Small value for floating-point comparisons
    pub const EPSILON: f64 = 1e-10;
}

// =============================================================================
// Tests
// =============================================================================
