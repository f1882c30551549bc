//! Hit detection between snowballs, enemies and the player
//!
//! Runs once per frame after physics. Removals are collected first and applied
//! only after every pair has been tested.

use super::aabb::Bounded;
use super::entity::{Enemy, Player, Projectile};

/// What the resolver did this frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionResult {
    /// Projectile/enemy pairs scored
    pub hits: u32,
    /// Enemies overlapping the player (after hits were removed)
    pub player_contacts: usize,
}

/// Match each projectile against the first enemy it overlaps and mark both.
///
/// Enemies are tested in order whether or not an earlier projectile already
/// hit them, so two snowballs landing on one enemy both score. Each marked
/// entity is removed once, after every pair has been tested.
pub fn resolve_hits(projectiles: &mut Vec<Projectile>, enemies: &mut Vec<Enemy>) -> u32 {
    let mut spent = vec![false; projectiles.len()];
    let mut downed = vec![false; enemies.len()];
    let mut hits = 0;

    for (pi, projectile) in projectiles.iter().enumerate() {
        if let Some(ei) = enemies.iter().position(|enemy| projectile.overlaps(enemy)) {
            spent[pi] = true;
            downed[ei] = true;
            hits += 1;
        }
    }

    if hits > 0 {
        let mut flags = spent.into_iter();
        projectiles.retain(|_| !flags.next().unwrap_or(false));
        let mut flags = downed.into_iter();
        enemies.retain(|_| !flags.next().unwrap_or(false));
    }

    hits
}

/// Count enemies touching the player. Contact has no gameplay effect yet.
pub fn player_contacts(player: &Player, enemies: &[Enemy]) -> usize {
    enemies.iter().filter(|enemy| player.overlaps(*enemy)).count()
}

/// Full per-frame pass: snowball hits first, then player contact
pub fn resolve(
    player: Option<&Player>,
    projectiles: &mut Vec<Projectile>,
    enemies: &mut Vec<Enemy>,
) -> CollisionResult {
    let hits = resolve_hits(projectiles, enemies);
    let player_contacts = player.map_or(0, |p| player_contacts(p, enemies));
    CollisionResult {
        hits,
        player_contacts,
    }
}
