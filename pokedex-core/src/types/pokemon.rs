//! Pokemon types.
//!
//! [`PokemonDetail`] mirrors the API payload; [`Pokemon`] is what the user
//! keeps after a successful catch.

use serde::{Deserialize, Serialize};

use crate::constants::{CATCH_EXPERIENCE_DIVISOR, CATCH_ROLL_MAX};
use crate::types::NamedResource;

/// A base stat entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonStat {
    /// Base value of the stat
    pub base_stat: u32,
    /// Effort points gained when defeating this Pokemon
    #[serde(default)]
    pub effort: u32,
    /// Which stat this is (hp, attack, ...)
    pub stat: NamedResource,
}

/// A type slot entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonType {
    /// Slot order (1 = primary type)
    pub slot: u32,
    /// The type
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

/// An ability slot entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonAbility {
    /// Whether this is a hidden ability
    #[serde(default)]
    pub is_hidden: bool,
    /// Slot number
    pub slot: u32,
    /// The ability
    pub ability: NamedResource,
}

/// How and when a move is learned.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveVersionDetail {
    /// Level at which the move is learned (0 if not level-up)
    #[serde(default)]
    pub level_learned_at: u32,
    /// Game version group
    pub version_group: NamedResource,
    /// Learn method (level-up, machine, ...)
    pub move_learn_method: NamedResource,
}

/// A learnable move.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonMove {
    /// The move
    #[serde(rename = "move")]
    pub move_ref: NamedResource,
    /// Per-version learn details
    #[serde(default)]
    pub version_group_details: Vec<MoveVersionDetail>,
}

/// Sprite URLs. Any of them may be null in the API.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonSprites {
    /// Back view
    pub back_default: Option<String>,
    /// Back view, female
    pub back_female: Option<String>,
    /// Back view, shiny
    pub back_shiny: Option<String>,
    /// Back view, shiny female
    pub back_shiny_female: Option<String>,
    /// Front view
    pub front_default: Option<String>,
    /// Front view, female
    pub front_female: Option<String>,
    /// Front view, shiny
    pub front_shiny: Option<String>,
    /// Front view, shiny female
    pub front_shiny_female: Option<String>,
}

/// The Pokemon resource as returned by `GET /pokemon/{name}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonDetail {
    /// National Pokedex number
    pub id: u32,
    /// Lowercase API name
    pub name: String,
    /// Experience for defeating it. Null for a handful of alternate forms
    #[serde(default)]
    pub base_experience: Option<u32>,
    /// Height in decimetres
    #[serde(default)]
    pub height: u32,
    /// Weight in hectograms
    #[serde(default)]
    pub weight: u32,
    /// Sort order, families grouped together
    #[serde(default)]
    pub order: i32,
    /// Whether this is the default form of its species
    #[serde(default)]
    pub is_default: bool,
    /// URL listing where it can be encountered
    #[serde(default)]
    pub location_area_encounters: String,
    /// Base stats
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    /// Type slots
    #[serde(default)]
    pub types: Vec<PokemonType>,
    /// Ability slots
    #[serde(default)]
    pub abilities: Vec<PokemonAbility>,
    /// Learnable moves
    #[serde(default)]
    pub moves: Vec<PokemonMove>,
    /// Sprite URLs
    #[serde(default)]
    pub sprites: PokemonSprites,
    /// Species this form belongs to
    #[serde(default)]
    pub species: NamedResource,
}

impl PokemonDetail {
    /// Percent chance (0..=100) that a throw succeeds.
    ///
    /// `100 - base_experience / 10`, clamped to `[0, 100]`.
    pub fn catch_threshold(&self) -> u32 {
        let penalty = self.base_experience.unwrap_or(0) / CATCH_EXPERIENCE_DIVISOR;
        CATCH_ROLL_MAX.saturating_sub(penalty)
    }

    /// Whether a roll in `0..100` catches this Pokemon.
    pub fn is_caught_by(&self, roll: u32) -> bool {
        roll < self.catch_threshold()
    }
}

/// A Pokemon in the user's Pokedex.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    /// National Pokedex number
    pub id: u32,
    /// Lowercase API name, also the Pokedex key
    pub name: String,
    /// Base experience, 0 when the API had none
    pub base_experience: u32,
    /// Height in decimetres
    pub height: u32,
    /// Weight in hectograms
    pub weight: u32,
    /// Base stats
    pub stats: Vec<PokemonStat>,
    /// Type slots
    pub types: Vec<PokemonType>,
    /// Ability slots
    pub abilities: Vec<PokemonAbility>,
    /// Species this form belongs to
    pub species: NamedResource,
}

impl From<PokemonDetail> for Pokemon {
    fn from(detail: PokemonDetail) -> Self {
        Self {
            id: detail.id,
            name: detail.name,
            base_experience: detail.base_experience.unwrap_or(0),
            height: detail.height,
            weight: detail.weight,
            stats: detail.stats,
            types: detail.types,
            abilities: detail.abilities,
            species: detail.species,
        }
    }
}

impl Pokemon {
    /// `(stat name, base value)` pairs in API order.
    pub fn stat_lines(&self) -> impl Iterator<Item = (&str, u32)> {
        self.stats.iter().map(|s| (s.stat.name.as_str(), s.base_stat))
    }

    /// Type names ordered by slot.
    pub fn type_names(&self) -> Vec<&str> {
        let mut types: Vec<_> = self.types.iter().collect();
        types.sort_by_key(|t| t.slot);
        types.into_iter().map(|t| t.kind.name.as_str()).collect()
    }
}
