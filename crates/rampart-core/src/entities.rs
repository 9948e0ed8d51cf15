//! Entity records for towers, enemies, projectiles, and minions.
//!
//! These are plain data structs plus the math intrinsic to a single
//! entity (damage application, path progress, cooldowns, status effect
//! bookkeeping). Anything involving more than one entity lives in the
//! simulation crate's systems.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::{ChainSpec, EffectSpec, EnemySpec, SpawnSpec, TowerSpec};
use crate::constants::{DT, FIRE_RATE_FALLBACK, PROJECTILE_HIT_RADIUS};
use crate::enums::{DamageType, EffectKind, SpecialBehavior, TargetingStrategy};
use crate::types::{EnemyId, MinionId, ProjectileId, TowerId};

/// A placed tower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tower {
    pub id: TowerId,
    /// Kind tag from the game config.
    pub kind: String,
    /// Cell-center position (world units).
    pub position: Vec2,
    /// Purchase cost, remembered for the sell refund.
    pub cost: u32,
    pub stats: crate::config::TowerStats,
    pub targeting: TargetingStrategy,
    /// Status effects applied to every enemy this tower damages.
    pub effects: Vec<EffectSpec>,
    /// Seconds until the tower may fire again.
    pub cooldown_secs: f32,
    /// Enemy targeted by the most recent shot.
    pub target: Option<EnemyId>,
    /// Tick of the most recent minion spawn (spawner towers).
    pub last_spawn_tick: u64,
}

impl Tower {
    pub fn from_spec(id: TowerId, kind: &str, spec: &TowerSpec, position: Vec2) -> Self {
        Self {
            id,
            kind: kind.to_string(),
            position,
            cost: spec.cost,
            stats: spec.stats.clone(),
            targeting: spec.targeting,
            effects: spec.effects.clone(),
            cooldown_secs: 0.0,
            target: None,
            last_spawn_tick: 0,
        }
    }

    pub fn can_fire(&self) -> bool {
        self.cooldown_secs <= 0.0
    }

    pub fn cool_down(&mut self, dt: f32) {
        self.cooldown_secs = (self.cooldown_secs - dt).max(0.0);
    }

    /// Restart the cooldown from the spec fire rate.
    pub fn reset_cooldown(&mut self) {
        let fire_rate = if self.stats.fire_rate > 0.0 {
            self.stats.fire_rate
        } else {
            FIRE_RATE_FALLBACK
        };
        self.cooldown_secs = 1.0 / fire_rate;
    }

    pub fn in_range(&self, position: Vec2) -> bool {
        self.position.distance(position) <= self.stats.range
    }
}

/// A live enemy walking the path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    /// Kind tag from the game config.
    pub kind: String,
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
    /// Current speed after status effect modifiers.
    pub speed: f32,
    /// Speed from the spec, before modifiers.
    pub base_speed: f32,
    /// Normalized position along the path, 0 at entry, 1 at exit.
    pub progress: f32,
    /// Resources awarded on kill.
    pub reward: u32,
    pub resistances: BTreeMap<DamageType, f32>,
    pub weaknesses: BTreeMap<DamageType, f32>,
    /// Active status effects.
    pub effects: Vec<Effect>,
    pub behavior: Option<SpecialBehavior>,
}

impl Enemy {
    pub fn from_spec(id: EnemyId, kind: &str, spec: &EnemySpec, position: Vec2) -> Self {
        Self {
            id,
            kind: kind.to_string(),
            position,
            health: spec.health,
            max_health: spec.health,
            speed: spec.speed,
            base_speed: spec.speed,
            progress: 0.0,
            reward: spec.reward,
            resistances: spec.resistances.clone(),
            weaknesses: spec.weaknesses.clone(),
            effects: Vec::new(),
            behavior: spec.behavior.clone(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn reached_end(&self) -> bool {
        self.progress >= 1.0
    }

    /// Combined type modifier: `1 - resistance + weakness`, floored at
    /// zero. Not capped above; stacked weaknesses amplify without
    /// bound.
    pub fn damage_multiplier(&self, damage_type: DamageType) -> f32 {
        let resistance = self.resistances.get(&damage_type).copied().unwrap_or(0.0);
        let weakness = self.weaknesses.get(&damage_type).copied().unwrap_or(0.0);
        (1.0 - resistance + weakness).max(0.0)
    }

    /// Apply typed damage. Returns the effective amount after the type
    /// modifier; health floors at zero.
    pub fn take_damage(&mut self, amount: f32, damage_type: DamageType) -> f32 {
        let dealt = amount * self.damage_multiplier(damage_type);
        self.health = (self.health - dealt).max(0.0);
        dealt
    }

    /// Advance along a path of the given total length. Progress never
    /// decreases and clamps at 1. Returns true once the end is
    /// reached. A degenerate path counts as immediately finished.
    pub fn advance(&mut self, dt: f32, path_length: f32) -> bool {
        if path_length <= 0.0 {
            self.progress = 1.0;
            return true;
        }
        self.progress = (self.progress + self.speed * dt / path_length).min(1.0);
        self.reached_end()
    }

    /// Attach a status effect. A second effect of the same kind
    /// refreshes the existing one, keeping the larger duration,
    /// strength, and damage rate.
    pub fn apply_effect(&mut self, effect: Effect) {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == effect.kind) {
            existing.remaining_secs = existing.remaining_secs.max(effect.remaining_secs);
            existing.strength = max_optional(existing.strength, effect.strength);
            existing.damage_per_sec = max_optional(existing.damage_per_sec, effect.damage_per_sec);
        } else {
            self.effects.insert(0, effect);
        }
    }

    /// Run one tick of status effect bookkeeping: expire finished
    /// effects, apply damage over time from the survivors, and
    /// recompute current speed.
    pub fn tick_effects(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        for effect in &mut self.effects {
            effect.remaining_secs -= dt;
        }
        self.effects.retain(|e| e.remaining_secs > 0.0);
        let damage_per_sec: f32 = self.effects.iter().filter_map(|e| e.damage_per_sec).sum();
        if damage_per_sec > 0.0 {
            self.health = (self.health - damage_per_sec * dt).max(0.0);
        }
        self.speed = self.base_speed * self.speed_modifier();
    }

    /// Current speed multiplier from active effects: 0 while frozen or
    /// stunned, otherwise the strongest (smallest) slow, otherwise 1.
    pub fn speed_modifier(&self) -> f32 {
        let mut modifier = 1.0f32;
        for effect in &self.effects {
            match effect.kind {
                EffectKind::Freeze | EffectKind::Stun => return 0.0,
                EffectKind::Slow => modifier = modifier.min(effect.strength.unwrap_or(1.0)),
                _ => {}
            }
        }
        modifier
    }

    /// Health as a fraction of max, in [0, 1]. Zero exactly when dead.
    pub fn health_percentage(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (self.health / self.max_health).clamp(0.0, 1.0)
    }
}

fn max_optional(a: Option<f32>, b: Option<f32>) -> Option<f32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (Some(a), None) => Some(a),
        (None, b) => b,
    }
}

/// An active status effect instance on an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub kind: EffectKind,
    pub remaining_secs: f32,
    pub strength: Option<f32>,
    pub damage_per_sec: Option<f32>,
}

impl Effect {
    pub fn from_spec(spec: &EffectSpec) -> Self {
        // Unrecognized kinds ride out their duration without slowing
        // or damaging anything.
        if spec.kind == EffectKind::Unknown {
            return Self {
                kind: EffectKind::Unknown,
                remaining_secs: spec.duration_secs,
                strength: None,
                damage_per_sec: None,
            };
        }
        Self {
            kind: spec.kind,
            remaining_secs: spec.duration_secs,
            strength: spec.strength,
            damage_per_sec: spec.damage_per_sec,
        }
    }
}

/// A projectile in flight. Resolves against its target the tick it
/// arrives; it never outlives the impact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: ProjectileId,
    pub source: TowerId,
    pub target: EnemyId,
    pub position: Vec2,
    /// Last known target position; refreshed while the target lives.
    pub target_position: Vec2,
    pub damage: f32,
    pub damage_type: DamageType,
    /// Flight speed (world units per second).
    pub speed: f32,
    pub aoe_radius: Option<f32>,
    pub chain: Option<ChainSpec>,
    /// Status effects applied to every enemy damaged by the impact.
    pub effects: Vec<EffectSpec>,
}

impl Projectile {
    pub fn from_tower(id: ProjectileId, tower: &Tower, target: &Enemy) -> Self {
        Self {
            id,
            source: tower.id,
            target: target.id,
            position: tower.position,
            target_position: target.position,
            damage: tower.stats.damage,
            damage_type: tower.stats.damage_type,
            speed: tower.stats.projectile_speed,
            aoe_radius: tower.stats.aoe_radius,
            chain: tower.stats.chain,
            effects: tower.effects.clone(),
        }
    }

    /// Step toward the target position. Returns true on arrival, with
    /// the position snapped to the target point.
    pub fn advance(&mut self, dt: f32) -> bool {
        let to_target = self.target_position - self.position;
        let distance = to_target.length();
        let step = self.speed * dt;
        if distance <= step || distance < PROJECTILE_HIT_RADIUS {
            self.position = self.target_position;
            return true;
        }
        self.position += to_target / distance * step;
        false
    }
}

/// A short-lived attacker produced by a spawner tower. Walks toward
/// the nearest enemy and detonates in an area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Minion {
    pub id: MinionId,
    pub owner: TowerId,
    pub position: Vec2,
    pub damage: f32,
    /// Movement speed (world units per second).
    pub speed: f32,
    pub lifetime_secs: f32,
    /// Tick at which this minion was spawned.
    pub spawned_at: u64,
    /// Detonation radius (world units).
    pub aoe_radius: f32,
}

impl Minion {
    pub fn from_spawn(
        id: MinionId,
        owner: TowerId,
        spawn: &SpawnSpec,
        position: Vec2,
        tick: u64,
    ) -> Self {
        Self {
            id,
            owner,
            position,
            damage: spawn.damage,
            speed: spawn.speed,
            lifetime_secs: spawn.lifetime_secs,
            spawned_at: tick,
            aoe_radius: spawn.aoe_radius,
        }
    }

    /// Step toward a target point without overshooting it.
    pub fn advance_toward(&mut self, target: Vec2, dt: f32) {
        let to_target = target - self.position;
        let distance = to_target.length();
        let step = self.speed * dt;
        if distance <= step {
            self.position = target;
        } else if distance > 0.0 {
            self.position += to_target / distance * step;
        }
    }

    pub fn age_secs(&self, tick: u64) -> f32 {
        tick.saturating_sub(self.spawned_at) as f32 * DT
    }

    pub fn expired(&self, tick: u64) -> bool {
        self.age_secs(tick) >= self.lifetime_secs
    }
}
