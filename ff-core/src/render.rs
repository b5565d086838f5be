//! Render surface boundary.
//!
//! The session pushes the resolved object pose and camera into a surface once
//! per frame, after all simulation stages have run. Scene construction and
//! the actual drawing live behind this trait.

use crate::camera::CameraPose;
use crate::lifecycle::Status;
use crate::types::{Pose, Telemetry};

pub trait RenderSurface {
    /// Place the object mesh.
    fn set_object_transform(&mut self, pose: &Pose);

    fn set_camera(&mut self, camera: &CameraPose);

    /// Update the telemetry overlay and status line.
    fn refresh_overlay(&mut self, _telemetry: &Telemetry, _status: &Status) {}

    /// Draw the frame.
    fn render(&mut self) {}
}

/// Surface that discards everything, for headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl RenderSurface for NullSurface {
    fn set_object_transform(&mut self, _pose: &Pose) {}

    fn set_camera(&mut self, _camera: &CameraPose) {}
}
