//! Enumeration types used throughout the simulation.
//!
//! Tower and enemy *kinds* are open string tags defined by the game
//! config. The enums here are the closed vocabularies: unrecognized
//! tags in serialized data map to an `Unknown` variant instead of
//! failing deserialization.

use serde::{Deserialize, Serialize};

/// Top-level game state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// No wave running: before the first wave or before a game starts.
    #[default]
    Waiting,
    /// Simulation advancing.
    Playing,
    /// Simulation frozen by the player.
    Paused,
    /// All waves cleared with lives remaining.
    Won,
    /// Lives exhausted.
    Lost,
}

impl GameState {
    /// Whether the game has ended (no further ticks mutate the world).
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameState::Won | GameState::Lost)
    }
}

/// Damage type carried by projectiles and minion detonations.
/// Enemies resist or are weak to specific types.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "String")]
pub enum DamageType {
    #[default]
    Physical,
    Fire,
    Ice,
    Lightning,
    Poison,
    /// Unrecognized tag in serialized data. Modified by nothing.
    Unknown,
}

impl From<String> for DamageType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "Physical" => Self::Physical,
            "Fire" => Self::Fire,
            "Ice" => Self::Ice,
            "Lightning" => Self::Lightning,
            "Poison" => Self::Poison,
            _ => Self::Unknown,
        }
    }
}

/// Kinds of timed status effects applied to enemies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum EffectKind {
    /// Multiplies movement speed by the effect strength.
    Slow,
    /// Damage over time.
    Burn,
    /// Damage over time.
    Poison,
    /// Halts movement entirely while active.
    Freeze,
    /// Halts movement entirely while active.
    Stun,
    /// Unrecognized tag in serialized data. Inert.
    Unknown,
}

impl From<String> for EffectKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "Slow" => Self::Slow,
            "Burn" => Self::Burn,
            "Poison" => Self::Poison,
            "Freeze" => Self::Freeze,
            "Stun" => Self::Stun,
            _ => Self::Unknown,
        }
    }
}

/// How a tower picks its target among enemies in range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum TargetingStrategy {
    /// Furthest along the path.
    #[default]
    First,
    /// Least far along the path.
    Last,
    /// Nearest to the tower.
    Closest,
    /// Highest current health.
    Strongest,
    /// Lowest current health.
    Weakest,
    /// Unrecognized tag in serialized data. Behaves as `First`.
    Unknown,
}

impl From<String> for TargetingStrategy {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "First" => Self::First,
            "Last" => Self::Last,
            "Closest" => Self::Closest,
            "Strongest" => Self::Strongest,
            "Weakest" => Self::Weakest,
            _ => Self::Unknown,
        }
    }
}

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    /// Open for tower placement.
    #[default]
    Empty,
    /// Covered by the enemy path. Never placeable.
    Path,
    /// Occupied by a placed tower.
    Tower,
    /// Blocked by the map layout. Never placeable.
    Blocked,
}

/// Special behavior attached to an enemy kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SpecialBehavior {
    /// On death, spawn `count` enemies of kind `into` slightly behind
    /// the parent's path position.
    SplitOnDeath { into: String, count: u32 },
    /// Recover health every second, up to max health.
    Regenerate { health_per_sec: f32 },
    /// Travels the straight line from path start to path end instead of
    /// following the waypoints.
    Flying,
}

/// Kind of transient visual marker reported in snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerKind {
    /// Area damage went off here.
    Explosion,
    /// An enemy died here.
    Death,
}
