//! Python bindings for the ff-core playback session.
//!
//! Provides a simple Python API:
//!
//! ```python
//! from ff_viz import Session
//!
//! session = Session(vehicle="brick", altitude=9000.0, seed=1)
//! session.playback_speed = 50
//! session.start()
//!
//! while not session.is_terminal():
//!     session.frame()
//!     pos = session.object_position()
//!     print(f"{session.lifecycle}: ({pos.x:.1}, {pos.y:.1}, {pos.z:.1})")
//! ```

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use ff_core::engine::DragEngine;
use ff_core::error::SessionError;
use ff_core::render::NullSurface;
use ff_core::session::Session as CoreSession;
use ff_core::types::Vec3 as CoreVec3;
use ff_core::vehicles::{ProfileLoader, VehicleKind};
use ff_core::SimulationConfig;

/// 3D vector for positions, orientations, etc.
#[pyclass]
#[derive(Clone, Copy)]
pub struct Vec3 {
    #[pyo3(get, set)]
    pub x: f64,
    #[pyo3(get, set)]
    pub y: f64,
    #[pyo3(get, set)]
    pub z: f64,
}

#[pymethods]
impl Vec3 {
    #[new]
    fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    fn __repr__(&self) -> String {
        format!("Vec3({:.4}, {:.4}, {:.4})", self.x, self.y, self.z)
    }

    fn magnitude(&self) -> f64 {
        CoreVec3::from(*self).magnitude()
    }

    fn to_tuple(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }
}

impl From<CoreVec3> for Vec3 {
    fn from(v: CoreVec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<Vec3> for CoreVec3 {
    fn from(v: Vec3) -> Self {
        CoreVec3::new(v.x, v.y, v.z)
    }
}

fn to_py_err(err: SessionError) -> PyErr {
    match err {
        SessionError::InvalidConfig(e) => PyValueError::new_err(e.to_string()),
        other => PyRuntimeError::new_err(other.to_string()),
    }
}

fn parse_vehicle(id: &str) -> PyResult<VehicleKind> {
    id.parse::<VehicleKind>()
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Playback session driven one frame at a time.
///
/// Wraps the drag reference engine; the pose, camera and telemetry are read
/// back after each `frame()` call.
#[pyclass]
pub struct Session {
    inner: CoreSession<DragEngine>,
}

#[pymethods]
impl Session {
    /// Create an idle session.
    ///
    /// `profiles_dir` optionally points at a directory of vehicle YAML files
    /// overriding the built-in profiles.
    #[new]
    #[pyo3(signature = (vehicle="brick", altitude=9000.0, seed=None, profiles_dir=None))]
    fn new(
        vehicle: &str,
        altitude: f64,
        seed: Option<u64>,
        profiles_dir: Option<&str>,
    ) -> PyResult<Self> {
        let config = SimulationConfig {
            vehicle: parse_vehicle(vehicle)?,
            altitude_m: altitude,
            ..SimulationConfig::default()
        };

        let profiles = match profiles_dir {
            Some(dir) => {
                let loader = ProfileLoader::new(dir);
                VehicleKind::ALL
                    .iter()
                    .map(|kind| loader.load_or_builtin(*kind))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| PyValueError::new_err(e.to_string()))?
            }
            None => VehicleKind::ALL.iter().map(|kind| kind.profile()).collect(),
        };
        let engine = DragEngine::with_profiles(profiles.iter().cloned());

        let inner = match seed {
            Some(seed) => CoreSession::with_seed(engine, config, seed),
            None => CoreSession::new(engine, config),
        }
        .map_err(to_py_err)?
        .with_profiles(profiles);

        Ok(Self { inner })
    }

    /// Run the engine and begin playback.
    fn start(&mut self) -> PyResult<()> {
        self.inner.start().map_err(to_py_err)
    }

    /// Discard the run and return to idle.
    fn reset(&mut self) {
        self.inner.reset();
    }

    /// Advance one frame. Returns the lifecycle name after the frame.
    fn frame(&mut self) -> String {
        self.inner.frame(&mut NullSurface).lifecycle.to_string()
    }

    /// Advance `count` frames, stopping early at a terminal state.
    fn frame_n(&mut self, count: usize) -> String {
        for _ in 0..count {
            if self.inner.frame(&mut NullSurface).lifecycle.is_terminal() {
                break;
            }
        }
        self.inner.lifecycle().to_string()
    }

    fn can_start(&self) -> bool {
        self.inner.can_start()
    }

    fn is_terminal(&self) -> bool {
        self.inner.lifecycle().is_terminal()
    }

    #[getter]
    fn lifecycle(&self) -> String {
        self.inner.lifecycle().to_string()
    }

    /// Status line text, e.g. "Playing..." or "Error: ...".
    #[getter]
    fn status(&self) -> String {
        self.inner.status().to_string()
    }

    #[getter]
    fn vehicle(&self) -> String {
        self.inner.config().vehicle.id().to_string()
    }

    #[setter]
    fn set_vehicle(&mut self, id: &str) -> PyResult<()> {
        self.inner.set_vehicle(parse_vehicle(id)?);
        Ok(())
    }

    #[getter]
    fn altitude(&self) -> f64 {
        self.inner.config().altitude_m
    }

    #[setter]
    fn set_altitude(&mut self, altitude: f64) -> PyResult<()> {
        self.inner.set_altitude(altitude).map_err(to_py_err)
    }

    #[getter]
    fn playback_speed(&self) -> u32 {
        self.inner.config().playback_speed
    }

    #[setter]
    fn set_playback_speed(&mut self, speed: u32) -> PyResult<()> {
        self.inner.set_playback_speed(speed).map_err(to_py_err)
    }

    fn object_position(&self) -> Vec3 {
        self.inner.pose().position.into()
    }

    /// Euler angles as applied to the mesh (rad).
    fn object_orientation(&self) -> Vec3 {
        self.inner.pose().orientation.into()
    }

    fn camera_position(&self) -> Vec3 {
        self.inner.camera().position.into()
    }

    fn camera_look_at(&self) -> Vec3 {
        self.inner.camera().look_at.into()
    }

    fn bounce_count(&self) -> u32 {
        self.inner.bounce_count()
    }

    /// Overlay text, e.g. "alt 8523 m | 98.2 m/s | Mach 0.31 | t 12.4 s".
    fn overlay(&self) -> String {
        self.inner.telemetry().to_string()
    }

    /// Get current state as dict for easy inspection.
    fn state_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let pose = self.inner.pose();
        let camera = self.inner.camera();
        let telemetry = self.inner.telemetry();

        let dict = PyDict::new(py);
        dict.set_item("lifecycle", self.inner.lifecycle().to_string())?;
        dict.set_item("status", self.inner.status().to_string())?;
        dict.set_item("x", pose.position.x)?;
        dict.set_item("y", pose.position.y)?;
        dict.set_item("z", pose.position.z)?;
        dict.set_item("rot_x", pose.orientation.x)?;
        dict.set_item("rot_y", pose.orientation.y)?;
        dict.set_item("rot_z", pose.orientation.z)?;
        dict.set_item("camera_x", camera.position.x)?;
        dict.set_item("camera_y", camera.position.y)?;
        dict.set_item("camera_z", camera.position.z)?;
        dict.set_item("altitude", telemetry.altitude)?;
        dict.set_item("speed", telemetry.speed)?;
        dict.set_item("mach", telemetry.mach)?;
        dict.set_item("time", telemetry.time)?;
        dict.set_item("bounce_count", self.inner.bounce_count())?;
        Ok(dict)
    }
}

/// Names of the built-in vehicles.
#[pyfunction]
fn vehicles() -> Vec<&'static str> {
    VehicleKind::ALL.iter().map(|kind| kind.id()).collect()
}

/// Python module definition.
#[pymodule]
fn ff_viz(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Vec3>()?;
    m.add_class::<Session>()?;
    m.add_function(wrap_pyfunction!(vehicles, m)?)?;
    Ok(())
}
