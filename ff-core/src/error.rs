//! Error types for session control, configuration, trajectories and profiles.
//!
//! None of these escape a rendered frame: `Session::frame` folds them into
//! the status text and keeps rendering the last valid pose.

use thiserror::Error;

/// Errors returned by `Session::start` and the configuration setters.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The engine is still initializing. Nothing was changed; retry later.
    #[error("simulation engine still loading, please wait")]
    EngineNotReady,

    /// The engine failed to load and will never become ready.
    #[error("simulation engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),

    #[error("simulation engine failed: {0}")]
    Engine(#[from] EngineError),

    #[error("simulation engine returned no samples")]
    EmptyTrajectory,

    #[error(transparent)]
    Trajectory(#[from] TrajectoryError),
}

/// A configuration value outside its accepted range.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("altitude {value} m outside [{min}, {max}] m")]
    AltitudeOutOfRange { value: f64, min: f64, max: f64 },

    #[error("playback speed {value}x outside [{min}, {max}]x")]
    PlaybackSpeedOutOfRange { value: u32, min: u32, max: u32 },

    #[error("duration must be positive, got {0} s")]
    InvalidDuration(f64),

    #[error("time step must be in (0, duration], got {0} s")]
    InvalidTimeStep(f64),

    #[error("unknown vehicle: {0}")]
    UnknownVehicle(String),
}

/// Guarded access into a trajectory.
#[derive(Debug, Error, PartialEq)]
pub enum TrajectoryError {
    #[error("sample index {index} out of bounds for trajectory of {len} samples")]
    InvalidSampleIndex { index: usize, len: usize },
}

/// Failures reported by a physics engine.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EngineError {
    #[error("invalid engine request: {0}")]
    InvalidRequest(String),
}

/// Error type for vehicle profile loading.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("vehicle profile not found: {0}")]
    NotFound(String),
}
