//! Camera placement.
//!
//! Before impact the camera is a chase cam: a fixed offset from the object,
//! recomputed every frame with no smoothing. At impact it starts a transition
//! from wherever it was to a close-up. The close-up target is recomputed from
//! the live object position every frame, so the camera keeps following the
//! object while it bounces.
//!
//! ```text
//!  start ●───────────────▶ ● target(t)   ◀── moves with the object
//!         smoothstep(progress)
//! ```
//!
//! Progress grows by a fixed amount per frame, so the transition length is
//! counted in frames rather than seconds.

use log::debug;

use crate::lifecycle::RunLifecycle;
use crate::types::{Pose, Vec3};
use crate::vehicles::VehicleProfile;

/// Progress added per frame (≈50 frames for a full transition).
pub const TRANSITION_STEP: f64 = 0.02;

/// Close-up distance as a multiple of the object's largest extent.
pub const CLOSE_UP_SCALE: f64 = 5.0;

/// Where the camera is and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

/// Smooth Hermite easing, `t²(3 - 2t)`, for `t` in [0, 1].
pub fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// Post-impact camera transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraAnimState {
    pub start: Vec3,
    pub target: Vec3,
    accumulated: f64,
}

impl CameraAnimState {
    pub fn new(start: Vec3, target: Vec3) -> Self {
        Self {
            start,
            target,
            accumulated: 0.0,
        }
    }

    /// Transition progress, clamped to [0, 1].
    pub fn progress(&self) -> f64 {
        self.accumulated.clamp(0.0, 1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Camera position for the current progress and target.
    ///
    /// Returns `target` exactly once finished: `start + (target - start)`
    /// does not round-trip in floating point when the endpoints differ
    /// widely in magnitude.
    pub fn position(&self) -> Vec3 {
        if self.is_finished() {
            return self.target;
        }
        self.start.lerp(&self.target, smoothstep(self.progress()))
    }

    fn advance(&mut self, step: f64) {
        self.accumulated = (self.accumulated + step).min(1.0);
    }
}

/// What `CameraDirector::update` did this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraUpdate {
    Chase,
    Transition { progress: f64 },
    /// No animation and not in a chase mode; the camera keeps its pose.
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct CameraDirector {
    follow_distance: f64,
    close_up_distance: f64,
    pose: CameraPose,
    animation: Option<CameraAnimState>,
}

impl CameraDirector {
    /// Camera chasing an object of the given profile, starting at `object`.
    pub fn new(profile: &VehicleProfile, object: &Pose) -> Self {
        let mut director = Self {
            follow_distance: profile.camera_follow_distance,
            close_up_distance: profile.visual_size.max_component() * CLOSE_UP_SCALE,
            pose: CameraPose::default(),
            animation: None,
        };
        director.chase(object);
        director
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn animation(&self) -> Option<&CameraAnimState> {
        self.animation.as_ref()
    }

    /// Chase offset: behind (−x), above and to the side (+z) of the object.
    pub fn chase_position(&self, object: Vec3) -> Vec3 {
        let d = self.follow_distance;
        object + Vec3::new(-d, d * 0.5, d)
    }

    /// Close-up point captured at impact.
    pub fn close_up_position(&self, object: Vec3) -> Vec3 {
        let d = self.close_up_distance;
        object + Vec3::new(-d, 2.0 * d, d)
    }

    /// Close-up point while tracking; never lower than the resting close-up
    /// height.
    fn tracking_target(&self, object: Vec3) -> Vec3 {
        let d = self.close_up_distance;
        Vec3::new(
            object.x - d,
            (object.y + 2.0 * d).max(2.0 * d),
            object.z + d,
        )
    }

    /// Capture the current camera position as the start of the transition.
    pub fn begin_transition(&mut self, object: &Pose) {
        let start = self.pose.position;
        let target = self.close_up_position(object.position);
        debug!(
            "camera transition from ({:.2}, {:.2}, {:.2}) to ({:.2}, {:.2}, {:.2})",
            start.x, start.y, start.z, target.x, target.y, target.z
        );
        self.animation = Some(CameraAnimState::new(start, target));
    }

    /// Drop any transition and snap back to the chase position.
    pub fn reset(&mut self, profile: &VehicleProfile, object: &Pose) {
        *self = Self::new(profile, object);
    }

    pub fn update(&mut self, lifecycle: RunLifecycle, object: &Pose) -> CameraUpdate {
        if let Some(mut anim) = self.animation {
            anim.advance(TRANSITION_STEP);
            anim.target = self.tracking_target(object.position);
            self.animation = Some(anim);
            self.pose = CameraPose {
                position: anim.position(),
                look_at: object.position,
            };
            return CameraUpdate::Transition {
                progress: anim.progress(),
            };
        }

        match lifecycle {
            RunLifecycle::Idle | RunLifecycle::Playing => {
                self.chase(object);
                CameraUpdate::Chase
            }
            _ => CameraUpdate::Unchanged,
        }
    }

    fn chase(&mut self, object: &Pose) {
        self.pose = CameraPose {
            position: self.chase_position(object.position),
            look_at: object.position,
        };
    }
}

// =============================================================================
// Tests
// =============================================================================
