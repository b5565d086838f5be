//! Root CLI structure for ff

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ff")]
#[command(about = "Headless playback of falling-object trajectories", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Simulate a drop and play it back frame by frame
    Run(RunArgs),

    /// List available vehicles
    Vehicles {
        /// Directory of vehicle profile YAML files
        #[arg(long, value_name = "DIR")]
        profiles: Option<PathBuf>,
    },

    /// Print the effective run configuration as YAML
    Config(RunArgs),
}

/// Run configuration. Flags override values from `--config`.
#[derive(Args, Clone)]
pub struct RunArgs {
    /// YAML run configuration
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Vehicle to drop (brick, bowlingball, blueberry)
    #[arg(long)]
    pub vehicle: Option<String>,

    /// Release altitude in meters
    #[arg(long)]
    pub altitude: Option<f64>,

    /// Samples advanced per frame
    #[arg(long)]
    pub speed: Option<u32>,

    /// Simulated duration in seconds
    #[arg(long)]
    pub duration: Option<f64>,

    /// Engine time step in seconds
    #[arg(long)]
    pub time_step: Option<f64>,

    /// Directory of vehicle profile YAML files
    #[arg(long, value_name = "DIR")]
    pub profiles: Option<PathBuf>,

    /// Seed for the tumble randomness
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop after this many frames
    #[arg(long, default_value = "100000")]
    pub max_frames: u64,

    /// Print the overlay every N frames (0 prints transitions only)
    #[arg(long, default_value = "0")]
    pub print_every: u64,
}
