//! Character profiles
//!
//! A profile scales the player's base stats. Missing fields default to 1.0,
//! so a partial profile only changes what it names.

use serde::{Deserialize, Serialize};

fn one() -> f32 {
    1.0
}

/// Multiplicative stat modifiers for the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharacterProfile {
    #[serde(default = "one")]
    pub speed: f32,
    #[serde(default = "one")]
    pub jump_power: f32,
    #[serde(default = "one")]
    pub throw_cooldown: f32,
    #[serde(default = "one")]
    pub snowball_power: f32,
}

impl Default for CharacterProfile {
    fn default() -> Self {
        Self {
            speed: 1.0,
            jump_power: 1.0,
            throw_cooldown: 1.0,
            snowball_power: 1.0,
        }
    }
}

impl CharacterProfile {
    /// Build a profile from optional fields, substituting 1.0 for each gap
    pub fn from_parts(
        speed: Option<f32>,
        jump_power: Option<f32>,
        throw_cooldown: Option<f32>,
        snowball_power: Option<f32>,
    ) -> Self {
        Self {
            speed: speed.unwrap_or(1.0),
            jump_power: jump_power.unwrap_or(1.0),
            throw_cooldown: throw_cooldown.unwrap_or(1.0),
            snowball_power: snowball_power.unwrap_or(1.0),
        }
    }
}

/// A selectable character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Character {
    pub name: &'static str,
    pub description: &'static str,
    pub profile: CharacterProfile,
}

/// Built-in characters
pub const ROSTER: [Character; 4] = [
    Character {
        name: "Arda",
        description: "Fast on his feet",
        profile: CharacterProfile {
            speed: 1.5,
            jump_power: 1.0,
            throw_cooldown: 1.0,
            snowball_power: 1.0,
        },
    },
    Character {
        name: "Elif",
        description: "Throws in quick succession",
        profile: CharacterProfile {
            speed: 1.0,
            jump_power: 1.0,
            throw_cooldown: 0.6,
            snowball_power: 1.0,
        },
    },
    Character {
        name: "Can",
        description: "Hurls snowballs the farthest",
        profile: CharacterProfile {
            speed: 1.0,
            jump_power: 1.0,
            throw_cooldown: 1.0,
            snowball_power: 1.5,
        },
    },
    Character {
        name: "Ayşe",
        description: "Jumps the highest",
        profile: CharacterProfile {
            speed: 1.0,
            jump_power: 1.4,
            throw_cooldown: 1.0,
            snowball_power: 1.0,
        },
    },
];

/// Look up a built-in character by name (case-insensitive)
pub fn character(name: &str) -> Option<&'static Character> {
    let wanted = name.to_lowercase();
    ROSTER.iter().find(|c| c.name.to_lowercase() == wanted)
}
