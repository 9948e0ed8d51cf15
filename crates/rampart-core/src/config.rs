//! Game content records.
//!
//! Content arrives as already-validated in-memory data, built in code
//! or deserialized by the host. The simulation performs no file I/O
//! and no schema validation; commands that reference a tag missing
//! from the config fail with a typed error instead.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::{DamageType, EffectKind, SpecialBehavior, TargetingStrategy};
use crate::types::CellCoord;

/// Chain lightning parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChainSpec {
    /// Number of extra targets hit after the primary one.
    pub max_chains: u32,
    /// Damage multiplier applied per hop (`base * falloff^i`).
    pub falloff: f32,
}

/// Minion production parameters for spawner towers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnSpec {
    /// Seconds between spawned minions.
    pub interval_secs: f32,
    /// Damage dealt by the minion's detonation.
    pub damage: f32,
    /// Minion movement speed (world units per second).
    pub speed: f32,
    /// Seconds a minion survives before despawning.
    pub lifetime_secs: f32,
    /// Detonation radius (world units).
    pub aoe_radius: f32,
}

/// Combat numbers for a tower kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerStats {
    pub damage: f32,
    pub damage_type: DamageType,
    /// Attack range (world units).
    pub range: f32,
    /// Shots per second.
    pub fire_rate: f32,
    /// Projectile speed (world units per second).
    pub projectile_speed: f32,
    /// Splash radius around the impact point, if this tower deals
    /// area damage.
    #[serde(default)]
    pub aoe_radius: Option<f32>,
    /// Chain parameters, if hits arc to further enemies.
    #[serde(default)]
    pub chain: Option<ChainSpec>,
    /// Minion production, if this tower spawns minions instead of
    /// firing projectiles.
    #[serde(default)]
    pub spawn: Option<SpawnSpec>,
}

/// A placeable tower kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerSpec {
    /// Display name.
    pub name: String,
    /// Purchase cost (resources).
    pub cost: u32,
    pub stats: TowerStats,
    pub targeting: TargetingStrategy,
    /// Status effects applied to every enemy damaged by this tower.
    #[serde(default)]
    pub effects: Vec<EffectSpec>,
}

/// A status effect template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectSpec {
    pub kind: EffectKind,
    pub duration_secs: f32,
    /// Kind-specific magnitude. For `Slow` this is the speed
    /// multiplier while active.
    #[serde(default)]
    pub strength: Option<f32>,
    /// Raw damage per second while active (not type-modified).
    #[serde(default)]
    pub damage_per_sec: Option<f32>,
}

/// An enemy kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpec {
    /// Display name.
    pub name: String,
    pub health: f32,
    /// Base movement speed (world units per second).
    pub speed: f32,
    /// Resources awarded on kill.
    pub reward: u32,
    /// Fractional damage reduction per damage type.
    #[serde(default)]
    pub resistances: BTreeMap<DamageType, f32>,
    /// Fractional damage amplification per damage type.
    #[serde(default)]
    pub weaknesses: BTreeMap<DamageType, f32>,
    #[serde(default)]
    pub behavior: Option<SpecialBehavior>,
}

/// Map layout: world extent, grid resolution, enemy path, and
/// permanently blocked cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSpec {
    /// World width (world units).
    pub width: f32,
    /// World height (world units).
    pub height: f32,
    /// Side length of a grid cell (world units).
    pub cell_size: f32,
    /// Enemy path waypoints in world coordinates, entry to exit.
    pub waypoints: Vec<Vec2>,
    #[serde(default)]
    pub blocked_cells: Vec<CellCoord>,
}

/// One spawn group within a wave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnGroupSpec {
    /// Enemy kind tag.
    pub enemy: String,
    pub count: u32,
    /// Seconds between spawns within this group.
    pub interval_secs: f32,
}

/// One wave: several groups spawning concurrently, plus the pause
/// before the next wave auto-starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveSpec {
    pub groups: Vec<SpawnGroupSpec>,
    pub post_delay_secs: f32,
}

/// A playable level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSpec {
    /// Display name.
    pub name: String,
    pub starting_resources: u32,
    pub starting_lives: u32,
    pub map: MapSpec,
    pub waves: Vec<WaveSpec>,
}

/// One node of the tech tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechNodeSpec {
    /// Node tag, referenced by `requires` lists and unlock commands.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Tower kinds this node unlocks.
    pub towers: Vec<String>,
    /// Node tags that must be unlocked first.
    #[serde(default)]
    pub requires: Vec<String>,
    /// Skill point cost.
    pub cost: u32,
}

/// The complete content set for a game session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub towers: BTreeMap<String, TowerSpec>,
    pub enemies: BTreeMap<String, EnemySpec>,
    pub levels: BTreeMap<String, LevelSpec>,
    #[serde(default)]
    pub tech_nodes: Vec<TechNodeSpec>,
}
