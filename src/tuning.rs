//! Data-driven game balance
//!
//! Every constant the simulation reads lives in [`Tuning`]. Defaults come from
//! [`crate::consts`]; any subset can be overridden from JSON, missing fields
//! keep their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or checking a [`Tuning`]
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("malformed tuning json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
    TuningError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("must be positive, got {value}")))
    }
}

/// World geometry and round length
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldTuning {
    pub width: f32,
    pub height: f32,
    pub ground_level: f32,
    pub bound_margin: f32,
    pub despawn_margin: f32,
    pub round_seconds: f32,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            ground_level: GROUND_LEVEL,
            bound_margin: BOUND_MARGIN,
            despawn_margin: DESPAWN_MARGIN,
            round_seconds: ROUND_SECONDS,
        }
    }
}

impl WorldTuning {
    /// Smallest x the player may occupy
    pub fn min_x(&self) -> f32 {
        self.bound_margin
    }

    /// Largest x the player may occupy
    pub fn max_x(&self) -> f32 {
        self.width - self.bound_margin
    }
}

/// Player base stats, before any character profile is applied
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub start_x: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub jump_power: f32,
    pub throw_cooldown: f32,
    pub snowball_power: f32,
    pub gravity: f32,
    pub friction: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            start_x: PLAYER_START_X,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            speed: PLAYER_SPEED,
            jump_power: PLAYER_JUMP_POWER,
            throw_cooldown: PLAYER_THROW_COOLDOWN,
            snowball_power: PLAYER_SNOWBALL_POWER,
            gravity: GRAVITY,
            friction: FRICTION,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub width: f32,
    pub height: f32,
    /// Leftward walking speed (positive number)
    pub speed: f32,
    pub gravity: f32,
    pub spawn_offset: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            width: ENEMY_WIDTH,
            height: ENEMY_HEIGHT,
            speed: ENEMY_SPEED,
            gravity: GRAVITY,
            spawn_offset: ENEMY_SPAWN_OFFSET,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub radius: f32,
    /// Horizontal launch speed before the snowball power multiplier
    pub launch_vx: f32,
    pub launch_vy: f32,
    pub gravity: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            radius: SNOWBALL_RADIUS,
            launch_vx: SNOWBALL_LAUNCH_VX,
            launch_vy: SNOWBALL_LAUNCH_VY,
            gravity: SNOWBALL_GRAVITY,
        }
    }
}

/// Once less than `below` seconds remain, the spawn interval drops to `interval`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnStep {
    pub below: f32,
    pub interval: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    pub base_interval: f32,
    pub steps: Vec<SpawnStep>,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            base_interval: SPAWN_BASE_INTERVAL,
            steps: vec![
                SpawnStep {
                    below: 45.0,
                    interval: 1.8,
                },
                SpawnStep {
                    below: 30.0,
                    interval: 1.5,
                },
            ],
        }
    }
}

impl SpawnTuning {
    /// Interval the schedule asks for with `time_remaining` seconds left
    pub fn interval_for(&self, time_remaining: f32) -> f32 {
        self.steps
            .iter()
            .filter(|step| time_remaining < step.below)
            .map(|step| step.interval)
            .fold(self.base_interval, f32::min)
    }
}

/// Cosmetic background snowfall
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnowTuning {
    pub count: usize,
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_size: f32,
    pub max_size: f32,
}

impl Default for SnowTuning {
    fn default() -> Self {
        Self {
            count: SNOW_PARTICLES,
            min_speed: SNOW_MIN_SPEED,
            max_speed: SNOW_MAX_SPEED,
            min_size: SNOW_MIN_SIZE,
            max_size: SNOW_MAX_SIZE,
        }
    }
}

/// Complete balance sheet for one engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub world: WorldTuning,
    pub player: PlayerTuning,
    pub enemy: EnemyTuning,
    pub projectile: ProjectileTuning,
    pub spawn: SpawnTuning,
    pub snow: SnowTuning,
    pub hit_score: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world: WorldTuning::default(),
            player: PlayerTuning::default(),
            enemy: EnemyTuning::default(),
            projectile: ProjectileTuning::default(),
            spawn: SpawnTuning::default(),
            snow: SnowTuning::default(),
            hit_score: HIT_SCORE,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!(
            "Loaded tuning: world {}x{}, round {}s",
            tuning.world.width,
            tuning.world.height,
            tuning.world.round_seconds
        );
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let w = &self.world;
        positive("world.width", w.width)?;
        positive("world.height", w.height)?;
        positive("world.round_seconds", w.round_seconds)?;
        if w.ground_level < 0.0 || w.ground_level >= w.height {
            return Err(invalid(
                "world.ground_level",
                format!("must lie within [0, {}), got {}", w.height, w.ground_level),
            ));
        }
        if w.bound_margin < 0.0 || w.min_x() > w.max_x() {
            return Err(invalid(
                "world.bound_margin",
                format!("leaves no room in a world {} wide", w.width),
            ));
        }

        let p = &self.player;
        positive("player.width", p.width)?;
        positive("player.height", p.height)?;
        positive("player.throw_cooldown", p.throw_cooldown)?;
        if !(0.0..=1.0).contains(&p.friction) {
            return Err(invalid(
                "player.friction",
                format!("must be within [0, 1], got {}", p.friction),
            ));
        }

        positive("enemy.width", self.enemy.width)?;
        positive("enemy.height", self.enemy.height)?;
        positive("projectile.radius", self.projectile.radius)?;

        positive("spawn.base_interval", self.spawn.base_interval)?;
        for step in &self.spawn.steps {
            positive("spawn.steps.interval", step.interval)?;
        }

        if self.snow.min_speed > self.snow.max_speed {
            return Err(invalid("snow.min_speed", "exceeds snow.max_speed"));
        }
        if self.snow.min_size > self.snow.max_size {
            return Err(invalid("snow.min_size", "exceeds snow.max_size"));
        }
        Ok(())
    }
}
