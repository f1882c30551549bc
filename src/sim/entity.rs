//! Entity models: the player, walking enemies and snowballs
//!
//! Each entity integrates its own physics in `advance`. Ground contact and
//! world bounds are applied by the engine afterwards.

use glam::Vec2;
use serde::Serialize;

use super::aabb::{Aabb, Bounded};
use super::profile::CharacterProfile;
use crate::consts::TIME_EPSILON;
use crate::tuning::{EnemyTuning, PlayerTuning, ProjectileTuning, WorldTuning};

/// Snap onto the ground if at or below it. Returns the new grounded flag.
fn settle(pos: &mut Vec2, vel: &mut Vec2, ground_level: f32) -> bool {
    if pos.y <= ground_level {
        pos.y = ground_level;
        vel.y = 0.0;
        true
    } else {
        false
    }
}

/// The player character
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    /// Feet position: x is the horizontal center, y the bottom edge
    pub pos: Vec2,
    pub vel: Vec2,
    pub width: f32,
    pub height: f32,
    pub grounded: bool,
    pub speed: f32,
    pub jump_power: f32,
    pub throw_cooldown: f32,
    pub snowball_power: f32,
    /// Simulation time of the last successful throw
    pub last_throw: Option<f64>,
    #[serde(skip)]
    base: PlayerTuning,
    #[serde(skip)]
    snowball: ProjectileTuning,
}

impl Player {
    /// Create a grounded player with base stats (no profile applied)
    pub fn new(pos: Vec2, base: &PlayerTuning, snowball: &ProjectileTuning) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            width: base.width,
            height: base.height,
            grounded: true,
            speed: base.speed,
            jump_power: base.jump_power,
            throw_cooldown: base.throw_cooldown,
            snowball_power: base.snowball_power,
            last_throw: None,
            base: base.clone(),
            snowball: snowball.clone(),
        }
    }

    /// Derive stats from base values. Replaces any earlier profile.
    pub fn set_character_profile(&mut self, profile: &CharacterProfile) {
        self.speed = self.base.speed * profile.speed;
        self.jump_power = self.base.jump_power * profile.jump_power;
        self.throw_cooldown = self.base.throw_cooldown * profile.throw_cooldown;
        self.snowball_power = self.base.snowball_power * profile.snowball_power;
    }

    pub fn move_left(&mut self) {
        self.vel.x = -self.speed;
    }

    pub fn move_right(&mut self) {
        self.vel.x = self.speed;
    }

    /// Jump if standing on the ground. Returns whether the jump happened.
    pub fn jump(&mut self) -> bool {
        if !self.grounded {
            return false;
        }
        self.vel.y = self.jump_power;
        self.grounded = false;
        true
    }

    /// Whether a throw at simulation time `now` would pass the cooldown
    pub fn can_throw(&self, now: f64) -> bool {
        match self.last_throw {
            None => true,
            Some(last) => now - last + TIME_EPSILON >= f64::from(self.throw_cooldown),
        }
    }

    /// Throw a snowball from the player's center, if the cooldown allows
    pub fn throw(&mut self, now: f64) -> Option<Projectile> {
        if !self.can_throw(now) {
            return None;
        }
        self.last_throw = Some(now);

        let origin = Vec2::new(self.pos.x, self.pos.y + self.height / 2.0);
        let vel = Vec2::new(
            self.snowball.launch_vx * self.snowball_power,
            self.snowball.launch_vy,
        );
        Some(Projectile::new(origin, vel, &self.snowball))
    }

    /// Integrate one physics step
    pub fn advance(&mut self, dt: f32) {
        self.vel.y -= self.base.gravity * dt;
        self.pos += self.vel * dt;
        self.vel.x *= self.base.friction;
    }

    /// Keep the player inside the playable strip
    pub fn clamp_to(&mut self, world: &WorldTuning) {
        self.pos.x = self.pos.x.clamp(world.min_x(), world.max_x());
    }

    /// Apply ground contact
    pub fn settle(&mut self, ground_level: f32) {
        self.grounded = settle(&mut self.pos, &mut self.vel, ground_level);
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Aabb {
        Aabb::standing(self.pos, self.width, self.height)
    }
}

/// A walking enemy
#[derive(Debug, Clone, Serialize)]
pub struct Enemy {
    /// Feet position, like [`Player::pos`]
    pub pos: Vec2,
    pub vel: Vec2,
    pub width: f32,
    pub height: f32,
    pub grounded: bool,
    #[serde(skip)]
    gravity: f32,
}

impl Enemy {
    pub fn new(pos: Vec2, tuning: &EnemyTuning) -> Self {
        Self {
            pos,
            vel: Vec2::new(-tuning.speed, 0.0),
            width: tuning.width,
            height: tuning.height,
            grounded: true,
            gravity: tuning.gravity,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.vel.y -= self.gravity * dt;
        self.pos += self.vel * dt;
    }

    pub fn settle(&mut self, ground_level: f32) {
        self.grounded = settle(&mut self.pos, &mut self.vel, ground_level);
    }

    /// Fully past the left edge of the world
    pub fn is_off_screen(&self) -> bool {
        self.pos.x < -self.width
    }
}

impl Bounded for Enemy {
    fn bounds(&self) -> Aabb {
        Aabb::standing(self.pos, self.width, self.height)
    }
}

/// A thrown snowball
#[derive(Debug, Clone, Serialize)]
pub struct Projectile {
    /// Center of the snowball
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    #[serde(skip)]
    gravity: f32,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, tuning: &ProjectileTuning) -> Self {
        Self {
            pos,
            vel,
            radius: tuning.radius,
            gravity: tuning.gravity,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.vel.y -= self.gravity * dt;
        self.pos += self.vel * dt;
    }

    /// Left the world sideways or came down on the ground
    pub fn is_spent(&self, world: &WorldTuning) -> bool {
        self.pos.x > world.width + world.despawn_margin
            || self.pos.x < -world.despawn_margin
            || self.pos.y <= world.ground_level
    }
}

impl Bounded for Projectile {
    fn bounds(&self) -> Aabb {
        Aabb::around(self.pos, self.radius)
    }
}
