//! `ff run` and `ff config`

use anyhow::{Context, Result};
use log::info;

use ff_core::camera::CameraPose;
use ff_core::engine::DragEngine;
use ff_core::lifecycle::Status;
use ff_core::render::RenderSurface;
use ff_core::types::{Pose, Telemetry};
use ff_core::vehicles::{ProfileLoader, VehicleKind, VehicleProfile};
use ff_core::{Session, SimulationConfig};

use crate::cli::RunArgs;

/// Build the effective configuration: file (or defaults), then flags.
fn resolve_config(args: &RunArgs) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => SimulationConfig::default(),
    };

    if let Some(vehicle) = &args.vehicle {
        config.vehicle = vehicle.parse()?;
    }
    if let Some(altitude) = args.altitude {
        config.altitude_m = altitude;
    }
    if let Some(speed) = args.speed {
        config.playback_speed = speed;
    }
    if let Some(duration) = args.duration {
        config.duration_s = duration;
    }
    if let Some(time_step) = args.time_step {
        config.time_step_s = time_step;
    }

    config.validate()?;
    Ok(config)
}

fn load_profiles(args: &RunArgs) -> Result<Vec<VehicleProfile>> {
    match &args.profiles {
        Some(dir) => {
            let loader = ProfileLoader::new(dir);
            VehicleKind::ALL
                .iter()
                .map(|kind| {
                    loader
                        .load_or_builtin(*kind)
                        .with_context(|| format!("Failed to load profile '{}'", kind))
                })
                .collect()
        }
        None => Ok(VehicleKind::ALL.iter().map(|kind| kind.profile()).collect()),
    }
}

pub fn print_config(args: RunArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    print!("{}", serde_yaml::to_string(&config)?);
    Ok(())
}

/// Surface printing the overlay to stdout at a fixed frame interval.
struct ConsoleSurface {
    print_every: u64,
    frames: u64,
}

impl RenderSurface for ConsoleSurface {
    fn set_object_transform(&mut self, _pose: &Pose) {}

    fn set_camera(&mut self, _camera: &CameraPose) {}

    fn refresh_overlay(&mut self, telemetry: &Telemetry, status: &Status) {
        self.frames += 1;
        if self.print_every > 0 && self.frames % self.print_every == 0 {
            println!("[{:>6}] {} | {}", self.frames, telemetry, status);
        }
    }
}

pub fn execute(args: RunArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    let profiles = load_profiles(&args)?;

    let engine = DragEngine::with_profiles(profiles.iter().cloned());
    let session = match args.seed {
        Some(seed) => Session::with_seed(engine, config, seed)?,
        None => Session::new(engine, config)?,
    };
    let mut session = session.with_profiles(profiles);

    println!(
        "Dropping {} from {:.0} m (playback {}x)",
        session.profile().display_name,
        session.config().altitude_m,
        session.config().playback_speed
    );

    session.start().context("Failed to start simulation")?;
    if let Some(driver) = session.playback() {
        println!("Trajectory: {} samples", driver.trajectory().len());
    }

    let mut surface = ConsoleSurface {
        print_every: args.print_every,
        frames: 0,
    };

    let mut frames = 0;
    while frames < args.max_frames {
        let report = session.frame(&mut surface);
        frames = report.frame;

        if report.transitioned() {
            println!(
                "frame {:>6}: {} -> {} | {}",
                report.frame,
                report.previous,
                report.lifecycle,
                session.telemetry()
            );
        }

        let camera_done = session
            .camera_animation()
            .map_or(true, |anim| anim.is_finished());
        if report.lifecycle.is_terminal() && camera_done {
            break;
        }
    }

    if !session.lifecycle().is_terminal() {
        info!("stopped after {} frames in {}", frames, session.lifecycle());
    }

    let p = session.pose().position;
    println!();
    println!("Final state: {} ({})", session.lifecycle(), session.status());
    println!("  Position:  ({:.2}, {:.4}, {:.2}) m", p.x, p.y, p.z);
    println!("  Bounces:   {}", session.bounce_count());
    println!("  Frames:    {}", frames);
    println!("  Overlay:   {}", session.telemetry());
    Ok(())
}
