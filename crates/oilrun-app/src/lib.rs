//! Oil Run headless host.
//!
//! Wires the simulation engine to a render-loop thread, a simulated asset
//! loader and a scripted input session. Stands in for the platform activity
//! that owns the AR view on device.

pub mod assets;
pub mod cli;
pub mod demo;
pub mod device;
pub mod error;
pub mod game_loop;
pub mod logging;
pub mod state;

pub use oilrun_core as core;
