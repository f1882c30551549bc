//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time advances only through `Engine::update`
//! - Seeded RNG only (and only for cosmetic snow)
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod collision;
pub mod engine;
pub mod entity;
pub mod profile;
pub mod spawner;
pub mod state;

pub use aabb::{Aabb, Bounded};
pub use collision::{CollisionResult, player_contacts, resolve, resolve_hits};
pub use engine::{Engine, Snapshot};
pub use entity::{Enemy, Player, Projectile};
pub use profile::{Character, CharacterProfile, ROSTER, character};
pub use spawner::Spawner;
pub use state::{Action, GameEvent, InputState, RoundPhase, RoundState, SnowParticle};
