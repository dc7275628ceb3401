//! Spawn placement: random drum positions around a reference point.

use glam::{Vec2, Vec3};
use rand::Rng;

use oilrun_core::config::SpawnConfig;
use oilrun_core::constants::SPAWN_MAX_OFFSET;

/// Draws spawn positions in the reference's horizontal plane.
#[derive(Debug, Clone)]
pub struct SpawnPlacer {
    max_offset: f32,
    min_separation: f32,
    max_attempts: u32,
}

impl Default for SpawnPlacer {
    fn default() -> Self {
        Self::new(&SpawnConfig::default())
    }
}

impl SpawnPlacer {
    /// Non-finite offsets fall back to the default radius.
    pub fn new(config: &SpawnConfig) -> Self {
        let max_offset = if config.max_offset.is_finite() {
            config.max_offset.abs()
        } else {
            tracing::warn!(max_offset = config.max_offset, "invalid spawn offset, using default");
            SPAWN_MAX_OFFSET
        };
        Self {
            max_offset,
            min_separation: config.min_separation.max(0.0),
            max_attempts: config.max_attempts.max(1),
        }
    }

    /// Offset `reference` by independent uniform draws in
    /// `[-max_offset, max_offset]` on X and Z. Y is unchanged.
    ///
    /// With a positive `min_separation`, draws closer than that (horizontally)
    /// are redrawn up to `max_attempts` times; the last draw is kept if every
    /// attempt is rejected.
    pub fn place<R: Rng + ?Sized>(&self, reference: Vec3, rng: &mut R) -> Vec3 {
        let mut offset = self.draw(rng);
        let mut attempts = 1;
        while offset.length() < self.min_separation && attempts < self.max_attempts {
            offset = self.draw(rng);
            attempts += 1;
        }
        reference + Vec3::new(offset.x, 0.0, offset.y)
    }

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        if self.max_offset == 0.0 {
            return Vec2::ZERO;
        }
        let d = self.max_offset;
        Vec2::new(rng.gen_range(-d..=d), rng.gen_range(-d..=d))
    }
}
