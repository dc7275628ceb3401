//! Simulation engine for oilrun.
//!
//! Owns the hecs scene world, applies inputs at frame boundaries, drives
//! interpolation tasks, detects drum consumption and produces
//! `SimulationSnapshot`s for an external renderer.

pub mod engine;
pub mod fuel;
pub mod interpolation;
pub mod motion;
pub mod overlap;
pub mod spawn;
pub mod systems;
pub mod world_setup;

pub use engine::SimulationEngine;
pub use oilrun_core as core;

#[cfg(test)]
mod tests;
