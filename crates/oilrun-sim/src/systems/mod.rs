//! Systems that operate on the scene world each frame.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only)
//! plus whatever engine state they touch. They own nothing themselves.

pub mod animation;
pub mod consumption;
pub mod snapshot;
