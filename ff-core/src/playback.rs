//! Playback of the engine trajectory and ground impact detection.
//!
//! Each frame copies one sample into the shared pose and advances the cursor
//! by the playback speed. Skipped samples are not interpolated.

use log::{debug, warn};

use crate::error::TrajectoryError;
use crate::lifecycle::RunLifecycle;
use crate::trajectory::Trajectory;
use crate::types::{Pose, Telemetry, Vec3};

/// Height at or below which a sample counts as ground contact. Slightly
/// above zero so a sample that overshoots the ground still registers.
pub const IMPACT_HEIGHT: f64 = 0.05;

/// Samples looked back to estimate horizontal velocity at impact.
pub const IMPACT_LOOKBACK: usize = 10;

/// Vertical bounce speed seeded at impact, as a fraction of sample speed.
pub const IMPACT_SPEED_FACTOR: f64 = 0.3;

/// Ground contact detected during playback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    pub sample_index: usize,
    /// Window actually used for the velocity estimate (may be shorter than
    /// `IMPACT_LOOKBACK` right after release).
    pub lookback: usize,
    /// Seed velocity for the bounce phase
    pub linear_velocity: Vec3,
}

/// Result of one `advance` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackStep {
    /// Run not in `Playing`; nothing was read or written.
    Inactive,
    /// Sample `index` was applied and the cursor moved on.
    Advanced { index: usize },
    /// No samples left.
    Exhausted,
    /// Sample at the impact point was applied; the cursor stays put.
    Impact(Impact),
}

/// Cursor over the trajectory of one run.
#[derive(Debug, Clone)]
pub struct PlaybackDriver {
    trajectory: Trajectory,
    cursor: usize,
    speed: usize,
    impacted: bool,
}

impl PlaybackDriver {
    /// A speed of 0 is treated as 1 so playback always makes progress.
    pub fn new(trajectory: Trajectory, playback_speed: u32) -> Self {
        Self {
            trajectory,
            cursor: 0,
            speed: playback_speed.max(1) as usize,
            impacted: false,
        }
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn has_impacted(&self) -> bool {
        self.impacted
    }

    /// Apply the sample under the cursor to `pose` and `telemetry`.
    pub fn advance(
        &mut self,
        lifecycle: RunLifecycle,
        pose: &mut Pose,
        telemetry: &mut Telemetry,
    ) -> Result<PlaybackStep, TrajectoryError> {
        if lifecycle != RunLifecycle::Playing {
            return Ok(PlaybackStep::Inactive);
        }

        if self.cursor >= self.trajectory.len() {
            return Ok(PlaybackStep::Exhausted);
        }

        let index = self.cursor;
        let sample = *self.trajectory.get(index)?;
        *pose = sample.pose();
        *telemetry = sample.telemetry();

        if sample.position.y <= IMPACT_HEIGHT && !self.impacted {
            self.impacted = true;
            let impact = self.impact_at(index, sample.speed)?;
            debug!(
                "impact at sample {} (t={:.2}s), seed velocity ({:.2}, {:.2}, {:.2})",
                index,
                sample.time_s,
                impact.linear_velocity.x,
                impact.linear_velocity.y,
                impact.linear_velocity.z
            );
            return Ok(PlaybackStep::Impact(impact));
        }

        self.cursor += self.speed;
        Ok(PlaybackStep::Advanced { index })
    }

    /// Seed velocity: horizontal displacement over the lookback window and a
    /// downward component proportional to the sample speed.
    fn impact_at(&self, index: usize, speed: f64) -> Result<Impact, TrajectoryError> {
        let lookback = IMPACT_LOOKBACK.min(index);
        if lookback < IMPACT_LOOKBACK {
            warn!(
                "impact at sample {}: lookback shortened to {} samples",
                index, lookback
            );
        }

        let displacement = self.trajectory.displacement(index, lookback)?;
        Ok(Impact {
            sample_index: index,
            lookback,
            linear_velocity: Vec3::new(
                displacement.x,
                -speed * IMPACT_SPEED_FACTOR,
                displacement.z,
            ),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
