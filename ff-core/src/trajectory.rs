//! Trajectory store: the time series produced by the engine for one run.

use serde::{Deserialize, Serialize};

use crate::error::TrajectoryError;
use crate::types::{Pose, Telemetry, Vec3};

/// One engine output sample.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrajectorySample {
    pub time_s: f64,
    pub position: Vec3,
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
    pub speed: f64,
    pub mach: f64,
}

impl TrajectorySample {
    /// Pose in render order (roll, yaw, pitch).
    pub fn pose(&self) -> Pose {
        Pose {
            position: self.position,
            orientation: Vec3::new(self.roll, self.yaw, self.pitch),
        }
    }

    pub fn telemetry(&self) -> Telemetry {
        Telemetry {
            altitude: self.position.y.max(0.0),
            speed: self.speed,
            mach: self.mach,
            time: self.time_s,
        }
    }
}

/// Immutable, indexed sequence of samples.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Trajectory {
    samples: Vec<TrajectorySample>,
}

impl Trajectory {
    pub fn new(samples: Vec<TrajectorySample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&TrajectorySample, TrajectoryError> {
        self.samples
            .get(index)
            .ok_or(TrajectoryError::InvalidSampleIndex {
                index,
                len: self.samples.len(),
            })
    }

    /// Position change from `lookback` samples before `index` up to `index`.
    pub fn displacement(&self, index: usize, lookback: usize) -> Result<Vec3, TrajectoryError> {
        let earlier = index
            .checked_sub(lookback)
            .ok_or(TrajectoryError::InvalidSampleIndex {
                index,
                len: self.samples.len(),
            })?;
        Ok(self.get(index)?.position - self.get(earlier)?.position)
    }
}
