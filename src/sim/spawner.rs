//! Enemy spawning
//!
//! Enemies arrive on a timer. The interval tightens as the round runs down and
//! never loosens again within the same round.

use glam::Vec2;
use serde::Serialize;

use super::entity::Enemy;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Serialize)]
pub struct Spawner {
    /// Seconds accumulated since the last spawn
    pub timer: f32,
    /// Current seconds between spawns
    pub interval: f32,
}

impl Spawner {
    pub fn new(base_interval: f32) -> Self {
        Self {
            timer: 0.0,
            interval: base_interval,
        }
    }

    /// Advance the timer; returns a fresh enemy when one is due
    pub fn tick(&mut self, dt: f32, time_remaining: f32, tuning: &Tuning) -> Option<Enemy> {
        self.timer += dt;
        if self.timer < self.interval {
            return None;
        }
        self.timer = 0.0;

        let origin = Vec2::new(
            tuning.world.width + tuning.enemy.spawn_offset,
            tuning.world.ground_level,
        );
        let enemy = Enemy::new(origin, &tuning.enemy);

        let target = tuning.spawn.interval_for(time_remaining);
        if target < self.interval {
            log::debug!(
                "Spawn interval {:.2}s -> {:.2}s ({:.1}s left)",
                self.interval,
                target,
                time_remaining
            );
            self.interval = target;
        }

        Some(enemy)
    }
}
