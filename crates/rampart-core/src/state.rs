//! Game state snapshot: the complete visible state published after
//! each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::{DamageType, EffectKind, GameState, MarkerKind, TargetingStrategy};
use crate::events::GameEvent;
use crate::types::{EnemyId, MinionId, ProjectileId, SimTime, TowerId};

/// Complete game state broadcast to the host after each tick.
/// Entity views are sorted by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub state: GameState,
    pub resources: u32,
    pub lives: u32,
    pub max_lives: u32,
    pub score: u32,
    pub waves_completed: u32,
    pub total_waves: u32,
    /// Wave currently spawning, if any.
    pub wave_in_progress: Option<u32>,
    /// Current speed multiplier.
    pub speed: f32,
    pub towers: Vec<TowerView>,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub minions: Vec<MinionView>,
    pub markers: Vec<MarkerView>,
    /// Unspent skill points.
    pub skill_points: u32,
    /// Unlocked tech node tags, sorted.
    pub unlocked_tech: Vec<String>,
    /// Tower kinds currently placeable, sorted.
    pub available_towers: Vec<String>,
    /// Events that occurred this tick, in order.
    pub events: Vec<GameEvent>,
}

/// A placed tower, as visible to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerView {
    pub id: TowerId,
    pub kind: String,
    pub position: Vec2,
    pub range: f32,
    pub targeting: TargetingStrategy,
    /// Seconds until the next shot.
    pub cooldown_secs: f32,
    /// Enemy targeted by the most recent shot.
    pub target: Option<EnemyId>,
}

/// A live enemy, as visible to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EnemyId,
    pub kind: String,
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
    /// Health fraction in [0, 1].
    pub health_pct: f32,
    /// Path progress in [0, 1].
    pub progress: f32,
    pub speed: f32,
    pub effects: Vec<EffectView>,
}

/// An active status effect on an enemy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectView {
    pub kind: EffectKind,
    pub remaining_secs: f32,
}

/// A projectile in flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: ProjectileId,
    pub source: TowerId,
    pub target: EnemyId,
    pub position: Vec2,
    pub damage_type: DamageType,
}

/// A tower-spawned minion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinionView {
    pub id: MinionId,
    pub owner: TowerId,
    pub position: Vec2,
}

/// A transient visual marker (explosion flash, death burst).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerView {
    pub kind: MarkerKind,
    pub position: Vec2,
    pub radius: f32,
}
