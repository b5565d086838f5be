//! Vehicle profiles: the static per-kind records the harness reads.
//!
//! Built-in profiles cover the three selectable objects. The same records can
//! be loaded from YAML so new tunings don't need a recompile.
//!
//! ## Directory Structure
//!
//! ```text
//! vehicles/
//! ├── brick.yaml
//! ├── bowlingball.yaml
//! └── blueberry.yaml
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ProfileError};
use crate::types::Vec3;

/// The selectable falling objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    Brick,
    BowlingBall,
    Blueberry,
}

impl VehicleKind {
    pub const ALL: [VehicleKind; 3] = [
        VehicleKind::Brick,
        VehicleKind::BowlingBall,
        VehicleKind::Blueberry,
    ];

    /// Identifier used in config files, CLI flags and profile file names.
    pub fn id(&self) -> &'static str {
        match self {
            VehicleKind::Brick => "brick",
            VehicleKind::BowlingBall => "bowlingball",
            VehicleKind::Blueberry => "blueberry",
        }
    }

    /// Built-in profile for this kind.
    pub fn profile(&self) -> VehicleProfile {
        match self {
            VehicleKind::Brick => VehicleProfile::brick(),
            VehicleKind::BowlingBall => VehicleProfile::bowling_ball(),
            VehicleKind::Blueberry => VehicleProfile::blueberry(),
        }
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for VehicleKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownVehicle(s.to_string()))
    }
}

/// Aerodynamic and mass properties consumed by the reference engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AeroProperties {
    pub mass_kg: f64,
    pub drag_coefficient: f64,
    pub reference_area_m2: f64,
}

impl AeroProperties {
    /// Solid sphere of the given radius and density.
    pub fn sphere(radius_m: f64, density_kgpm3: f64, drag_coefficient: f64) -> Self {
        let volume = (4.0 / 3.0) * std::f64::consts::PI * radius_m.powi(3);
        Self {
            mass_kg: density_kgpm3 * volume,
            drag_coefficient,
            reference_area_m2: std::f64::consts::PI * radius_m * radius_m,
        }
    }
}

/// Static description of one vehicle kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleProfile {
    pub kind: VehicleKind,
    pub display_name: String,

    /// Mesh color as 0xRRGGBB
    pub color: u32,

    /// Box extents (or diameter for spheres) in meters
    pub visual_size: Vec3,

    /// Body rates handed to the engine at release (rad/s)
    pub initial_angular_velocity: Vec3,

    /// Chase camera offset scale in meters
    pub camera_follow_distance: f64,

    pub aero: AeroProperties,
}

impl VehicleProfile {
    /// Standard 8 x 2 x 4 inch brick. No drag, matching the NASA Atmos
    /// tumbling-brick check case.
    pub fn brick() -> Self {
        Self {
            kind: VehicleKind::Brick,
            display_name: "Tumbling Brick".to_string(),
            color: 0xCC4444,
            visual_size: Vec3::new(0.2032, 0.0508, 0.1016),
            initial_angular_velocity: Vec3::new(0.17, 0.35, 0.52),
            camera_follow_distance: 1.5,
            aero: AeroProperties {
                mass_kg: 2.268,
                drag_coefficient: 0.0,
                reference_area_m2: 0.2032 * 0.1016,
            },
        }
    }

    pub fn bowling_ball() -> Self {
        Self {
            kind: VehicleKind::BowlingBall,
            display_name: "Bowling Ball".to_string(),
            color: 0x222222,
            visual_size: Vec3::new(0.22, 0.22, 0.22),
            initial_angular_velocity: Vec3::new(0.1, 0.1, 0.1),
            camera_follow_distance: 1.5,
            aero: AeroProperties::sphere(0.11176, 1500.0, 0.5),
        }
    }

    pub fn blueberry() -> Self {
        Self {
            kind: VehicleKind::Blueberry,
            display_name: "Blueberry".to_string(),
            color: 0x4444AA,
            visual_size: Vec3::new(0.015, 0.015, 0.015),
            initial_angular_velocity: Vec3::new(0.2, 0.3, 0.4),
            camera_follow_distance: 0.1,
            aero: AeroProperties::sphere(0.00762, 786.0, 0.5),
        }
    }

    /// Height of the object's center when resting on its footprint.
    pub fn rest_height(&self) -> f64 {
        self.visual_size.y / 2.0
    }
}

impl Default for VehicleProfile {
    fn default() -> Self {
        Self::brick()
    }
}

/// Profile loader with configurable base directory.
pub struct ProfileLoader {
    base_path: PathBuf,
}

impl ProfileLoader {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Load a profile by id (without .yaml extension).
    ///
    /// # Example
    /// ```ignore
    /// let loader = ProfileLoader::new("vehicles");
    /// let brick = loader.load("brick")?;
    /// ```
    pub fn load(&self, id: &str) -> Result<VehicleProfile, ProfileError> {
        let path = self.base_path.join(format!("{}.yaml", id));
        if !path.exists() {
            return Err(ProfileError::NotFound(id.to_string()));
        }
        let contents = fs::read_to_string(&path)?;
        let profile: VehicleProfile = serde_yaml::from_str(&contents)?;
        Ok(profile)
    }

    /// Load the profile for `kind`, falling back to the built-in record when
    /// no file exists for it.
    pub fn load_or_builtin(&self, kind: VehicleKind) -> Result<VehicleProfile, ProfileError> {
        match self.load(kind.id()) {
            Err(ProfileError::NotFound(_)) => Ok(kind.profile()),
            other => other,
        }
    }

    /// List the ids of all profiles in the directory.
    pub fn list(&self) -> Result<Vec<String>, ProfileError> {
        if !self.base_path.exists() {
            return Ok(vec![]);
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if name.ends_with(".yaml") {
                names.push(name.trim_end_matches(".yaml").to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

// =============================================================================
// Tests
// =============================================================================
