//! # FF Core
//!
//! Playback, bounce and camera state machine for a falling-object trajectory
//! viewer.
//!
//! ## Architecture
//!
//! - `types`: Core data structures (Vec3, pose, telemetry)
//! - `vehicles`: Vehicle profiles and the YAML profile loader
//! - `config`: Run configuration and its accepted ranges
//! - `engine`: Physics engine boundary and the drag reference engine
//! - `trajectory`: Engine samples with guarded access
//! - `playback`: Per-frame trajectory playback and impact detection
//! - `bounce`: Fixed-step bounce and tumble after impact
//! - `camera`: Chase camera and the post-impact close-up transition
//! - `lifecycle`: Run modes and status text
//! - `render`: Render surface boundary
//! - `session`: Frame loop orchestrator

pub mod bounce;
pub mod camera;
pub mod config;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod playback;
pub mod render;
pub mod session;
pub mod trajectory;
pub mod types;
pub mod vehicles;

pub use config::SimulationConfig;
pub use engine::{DragEngine, PhysicsEngine};
pub use error::SessionError;
pub use lifecycle::{RunLifecycle, Status};
pub use render::{NullSurface, RenderSurface};
pub use session::{FrameReport, Session};
pub use types::{Pose, Telemetry, Vec3};
pub use vehicles::{VehicleKind, VehicleProfile};
