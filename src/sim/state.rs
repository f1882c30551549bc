//! Round state and supporting types
//!
//! Everything the engine tracks besides the entity collections lives here.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::spawner::Spawner;
use crate::consts::TIME_EPSILON;
use crate::tuning::{SnowTuning, Tuning, WorldTuning};

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Timer still running
    Running,
    /// Timer hit zero; updates are no-ops until reset
    Ended,
}

/// Player actions the input layer can toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Left,
    Right,
    Jump,
    Throw,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Left, Action::Right, Action::Jump, Action::Throw];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Left => "left",
            Action::Right => "right",
            Action::Jump => "jump",
            Action::Throw => "throw",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "left" => Some(Action::Left),
            "right" => Some(Action::Right),
            "jump" => Some(Action::Jump),
            "throw" => Some(Action::Throw),
            _ => None,
        }
    }
}

/// Held/pressed state of every action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Edge-triggered: cleared by the engine when read
    pub throw: bool,
}

impl InputState {
    pub fn set(&mut self, action: Action, active: bool) {
        *self.slot(action) = active;
    }

    pub fn get(&self, action: Action) -> bool {
        match action {
            Action::Left => self.left,
            Action::Right => self.right,
            Action::Jump => self.jump,
            Action::Throw => self.throw,
        }
    }

    /// Read and clear the throw request
    pub fn take_throw(&mut self) -> bool {
        std::mem::take(&mut self.throw)
    }

    fn slot(&mut self, action: Action) -> &mut bool {
        match action {
            Action::Left => &mut self.left,
            Action::Right => &mut self.right,
            Action::Jump => &mut self.jump,
            Action::Throw => &mut self.throw,
        }
    }
}

/// A background snowflake (not gameplay-affecting)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnowParticle {
    pub pos: Vec2,
    /// Fall speed, pixels/s
    pub speed: f32,
    pub size: f32,
}

impl SnowParticle {
    /// Place a flake anywhere in the world
    pub fn scatter<R: Rng>(rng: &mut R, world: &WorldTuning, snow: &SnowTuning) -> Self {
        Self {
            pos: Vec2::new(
                rng.random_range(0.0..=world.width),
                rng.random_range(0.0..=world.height),
            ),
            speed: rng.random_range(snow.min_speed..=snow.max_speed),
            size: rng.random_range(snow.min_size..=snow.max_size),
        }
    }

    /// Drift down; wrap to the top at a new x once below the bottom
    pub fn fall<R: Rng>(&mut self, dt: f32, rng: &mut R, world: &WorldTuning) {
        self.pos.y -= self.speed * dt;
        if self.pos.y < 0.0 {
            self.pos.y = world.height;
            self.pos.x = rng.random_range(0.0..=world.width);
        }
    }
}

/// Gameplay notifications, drained by the caller each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    ProjectileThrown { x: f32, y: f32 },
    EnemySpawned { x: f32 },
    EnemyHit { points: u64 },
    /// An enemy overlapped the player (no gameplay consequence)
    PlayerContact,
    RoundEnded { score: u64 },
}

/// Scalar state of the current round
#[derive(Debug, Clone, Serialize)]
pub struct RoundState {
    pub score: u64,
    /// Seconds left, never below zero
    pub time_remaining: f64,
    /// Simulated seconds since reset
    pub clock: f64,
    pub phase: RoundPhase,
    pub input: InputState,
    pub spawner: Spawner,
}

impl RoundState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            time_remaining: f64::from(tuning.world.round_seconds),
            clock: 0.0,
            phase: RoundPhase::Running,
            input: InputState::default(),
            spawner: Spawner::new(tuning.spawn.base_interval),
        }
    }

    /// Count down; returns true once the round is over.
    ///
    /// Time accumulates in f64 and expires within [`TIME_EPSILON`] of zero, so
    /// a 60 s round at 1/60 s steps ends on exactly frame 3600.
    pub fn run_clock(&mut self, dt: f32) -> bool {
        let dt = f64::from(dt);
        self.time_remaining -= dt;
        if self.time_remaining <= TIME_EPSILON {
            self.time_remaining = 0.0;
            self.phase = RoundPhase::Ended;
            return true;
        }
        self.clock += dt;
        false
    }
}
