//! Oil Run host binary.
//!
//! Loads the config, checks the device, then replays the demo session and
//! prints the final snapshot as JSON.
//!
//! Run with `cargo run -p oilrun-app -- --duration-ms 10000 --log-level debug`.

use std::process::ExitCode;

use clap::Parser;

use oilrun_app::cli::{apply_cli_overrides, CliArgs};
use oilrun_app::demo::run_demo;
use oilrun_app::device::check_supported_device;
use oilrun_app::error::SessionError;
use oilrun_app::logging::init_logging;
use oilrun_core::config::AppConfig;

fn run(args: &CliArgs) -> Result<(), SessionError> {
    let mut config = match args.config {
        Some(ref path) => AppConfig::load_or_default(path)?,
        None => AppConfig::default(),
    };
    apply_cli_overrides(&mut config, args);
    init_logging(&config.app.log_level);

    if let Some(ref path) = args.write_config {
        config.save(path)?;
        tracing::info!(path = %path.display(), "config written");
    }

    check_supported_device(&config.device)?;

    let Some(snapshot) = run_demo(&config)? else {
        tracing::warn!("session produced no frames");
        return Ok(());
    };
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::warn!("could not serialize final snapshot: {e}"),
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("oilrun: {e}");
            ExitCode::FAILURE
        }
    }
}
