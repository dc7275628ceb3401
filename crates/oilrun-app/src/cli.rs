//! Command-line arguments for the host binary.

use std::path::PathBuf;

use clap::Parser;

use oilrun_core::config::AppConfig;
use oilrun_core::enums::FuelSchedule;

/// Oil Run command-line arguments.
///
/// CLI values override settings loaded from the config file.
#[derive(Parser, Debug, Default)]
#[command(name = "oilrun", about = "Oil Run headless session host")]
pub struct CliArgs {
    /// Path to a RON config file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Spawn RNG seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log filter (error, warn, info, debug, trace or a directive list).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Render frames per second.
    #[arg(long)]
    pub frame_rate: Option<u32>,

    /// Length of the demo session in milliseconds.
    #[arg(long)]
    pub duration_ms: Option<u64>,

    /// Only burn fuel when the host asks (no background timer).
    #[arg(long)]
    pub manual_fuel: bool,

    /// Reported device SDK level.
    #[arg(long)]
    pub sdk_level: Option<u32>,

    /// Reported OpenGL ES version.
    #[arg(long)]
    pub gles_version: Option<f64>,

    /// Write the effective config to this path and continue.
    #[arg(long)]
    pub write_config: Option<PathBuf>,
}

/// Apply CLI overrides to a loaded config.
pub fn apply_cli_overrides(config: &mut AppConfig, args: &CliArgs) {
    if let Some(seed) = args.seed {
        config.sim.seed = seed;
    }
    if let Some(ref level) = args.log_level {
        config.app.log_level = level.clone();
    }
    if let Some(rate) = args.frame_rate {
        config.app.frame_rate = rate;
    }
    if let Some(ms) = args.duration_ms {
        config.app.demo_duration_ms = ms;
    }
    if args.manual_fuel {
        config.sim.fuel.schedule = FuelSchedule::Manual;
    }
    if let Some(sdk) = args.sdk_level {
        config.device.sdk_level = sdk;
    }
    if let Some(gles) = args.gles_version {
        config.device.gles_version = gles;
    }
}
