//! Core types and definitions for the oilrun simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! transforms, scene components, inputs, events, snapshots, constants
//! and configuration. It has no dependency on threads, RNG or the ECS.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
