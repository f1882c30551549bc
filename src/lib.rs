//! Snowfight - a side-scrolling snowball fight
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, scoring)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use sim::{Action, CharacterProfile, Engine, GameEvent, RoundPhase, Snapshot};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
///
/// These are the defaults baked into [`Tuning::default`].
pub mod consts {
    /// Intended frame step (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Length of one round in seconds
    pub const ROUND_SECONDS: f32 = 60.0;
    /// Slack for comparisons against accumulated simulation time
    pub const TIME_EPSILON: f64 = 1e-6;

    /// World dimensions (y-up, origin bottom-left)
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;
    pub const GROUND_LEVEL: f32 = 100.0;
    /// Player x is kept this far from either world edge
    pub const BOUND_MARGIN: f32 = 20.0;
    /// Projectiles are dropped once this far past either edge
    pub const DESPAWN_MARGIN: f32 = 50.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const PLAYER_SPEED: f32 = 200.0;
    pub const PLAYER_JUMP_POWER: f32 = 400.0;
    pub const PLAYER_THROW_COOLDOWN: f32 = 1.0;
    pub const PLAYER_SNOWBALL_POWER: f32 = 1.0;
    /// Shared by player and enemies (pixels/s²)
    pub const GRAVITY: f32 = 800.0;
    /// Horizontal velocity multiplier applied after each physics step
    pub const FRICTION: f32 = 0.8;

    /// Enemy defaults
    pub const ENEMY_WIDTH: f32 = 35.0;
    pub const ENEMY_HEIGHT: f32 = 55.0;
    pub const ENEMY_SPEED: f32 = 80.0;
    /// Enemies appear this far right of the world edge
    pub const ENEMY_SPAWN_OFFSET: f32 = 50.0;

    /// Snowball defaults
    pub const SNOWBALL_RADIUS: f32 = 8.0;
    pub const SNOWBALL_LAUNCH_VX: f32 = 300.0;
    pub const SNOWBALL_LAUNCH_VY: f32 = 50.0;
    pub const SNOWBALL_GRAVITY: f32 = 400.0;

    /// Spawn cadence
    pub const SPAWN_BASE_INTERVAL: f32 = 2.0;

    /// Points for knocking out an enemy
    pub const HIT_SCORE: u64 = 10;

    /// Background snow
    pub const SNOW_PARTICLES: usize = 30;
    pub const SNOW_MIN_SPEED: f32 = 20.0;
    pub const SNOW_MAX_SPEED: f32 = 60.0;
    pub const SNOW_MIN_SIZE: f32 = 2.0;
    pub const SNOW_MAX_SIZE: f32 = 4.0;
}
