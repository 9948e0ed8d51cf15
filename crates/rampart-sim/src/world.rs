//! The root simulation aggregate and its pure mutators.
//!
//! `World` is a value: every mutator either consumes the world and
//! returns the updated one, or borrows it and returns a fresh world on
//! success so that a failed operation leaves the caller's copy
//! untouched. Entity collections are id-keyed BTreeMaps, which makes
//! iteration order (and therefore the whole simulation) deterministic.

use std::collections::BTreeMap;

use glam::Vec2;
use rampart_core::config::LevelSpec;
use rampart_core::constants::MARKER_LIFETIME_TICKS;
use rampart_core::entities::{Enemy, Minion, Projectile, Tower};
use rampart_core::enums::{GameState, MarkerKind};
use rampart_core::errors::CommandError;
use rampart_core::types::{EnemyId, MinionId, ProjectileId, SimTime, TowerId};

use crate::map::Map;

/// Monotonic id allocation for every entity kind. Owned by the
/// session and threaded through spawning code.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdAlloc {
    next_tower: u32,
    next_enemy: u32,
    next_projectile: u32,
    next_minion: u32,
}

impl IdAlloc {
    pub fn tower(&mut self) -> TowerId {
        self.next_tower += 1;
        TowerId::new(self.next_tower)
    }

    pub fn enemy(&mut self) -> EnemyId {
        self.next_enemy += 1;
        EnemyId::new(self.next_enemy)
    }

    pub fn projectile(&mut self) -> ProjectileId {
        self.next_projectile += 1;
        ProjectileId::new(self.next_projectile)
    }

    pub fn minion(&mut self) -> MinionId {
        self.next_minion += 1;
        MinionId::new(self.next_minion)
    }
}

/// A transient visual marker with a fixed lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub position: Vec2,
    pub radius: f32,
    /// Tick after which the marker is dropped.
    pub expires_at: u64,
}

impl Marker {
    pub fn explosion(position: Vec2, radius: f32, now: u64) -> Self {
        Self {
            kind: MarkerKind::Explosion,
            position,
            radius,
            expires_at: now + MARKER_LIFETIME_TICKS,
        }
    }

    pub fn death(position: Vec2, now: u64) -> Self {
        Self {
            kind: MarkerKind::Death,
            position,
            radius: 0.0,
            expires_at: now + MARKER_LIFETIME_TICKS,
        }
    }
}

/// Complete simulation state for one game.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    pub map: Map,
    pub towers: BTreeMap<TowerId, Tower>,
    pub enemies: BTreeMap<EnemyId, Enemy>,
    pub projectiles: BTreeMap<ProjectileId, Projectile>,
    pub minions: BTreeMap<MinionId, Minion>,
    pub markers: Vec<Marker>,
    pub time: SimTime,
    pub state: GameState,
    pub resources: u32,
    pub lives: u32,
    pub max_lives: u32,
    pub score: u32,
    /// Number of waves fully cleared.
    pub waves_completed: u32,
    pub total_waves: u32,
}

impl Default for World {
    fn default() -> Self {
        Self::empty()
    }
}

impl World {
    /// The pre-game world: no map, nothing to interact with.
    pub fn empty() -> Self {
        Self {
            map: Map::empty(),
            towers: BTreeMap::new(),
            enemies: BTreeMap::new(),
            projectiles: BTreeMap::new(),
            minions: BTreeMap::new(),
            markers: Vec::new(),
            time: SimTime::default(),
            state: GameState::Waiting,
            resources: 0,
            lives: 0,
            max_lives: 0,
            score: 0,
            waves_completed: 0,
            total_waves: 0,
        }
    }

    /// Fresh world for a level: geometry built, economy seeded, no
    /// entities, waiting for the first wave.
    pub fn from_level(level: &LevelSpec) -> Self {
        Self {
            map: Map::from_spec(&level.map),
            resources: level.starting_resources,
            lives: level.starting_lives,
            max_lives: level.starting_lives,
            total_waves: level.waves.len() as u32,
            ..Self::empty()
        }
    }

    /// Advance the clock by one tick.
    pub fn tick(mut self) -> Self {
        self.time.advance();
        self
    }

    pub fn set_state(mut self, state: GameState) -> Self {
        self.state = state;
        self
    }

    // --- Fallible mutators: borrow and return a fresh world ---

    /// Deduct resources, or fail without touching anything.
    pub fn spend_resources(&self, cost: u32) -> Result<Self, CommandError> {
        if cost > self.resources {
            return Err(CommandError::InsufficientResources {
                required: cost,
                available: self.resources,
            });
        }
        let mut next = self.clone();
        next.resources -= cost;
        Ok(next)
    }

    /// Insert a tower and claim its grid cell, or fail without
    /// touching anything.
    pub fn add_tower(&self, tower: Tower) -> Result<Self, CommandError> {
        let cell = self.map.cell_at(tower.position);
        let mut next = self.clone();
        next.map.grid.place(cell)?;
        next.towers.insert(tower.id, tower);
        Ok(next)
    }

    // --- Infallible mutators: consume and return ---

    /// Remove a tower, free its cell, and refund part of its cost.
    /// Unknown ids are a no-op. Returns the refund when a tower was
    /// removed.
    pub fn remove_tower(mut self, id: TowerId, refund_fraction: f32) -> (Self, Option<u32>) {
        let Some(tower) = self.towers.remove(&id) else {
            return (self, None);
        };
        let cell = self.map.cell_at(tower.position);
        self.map.grid.remove(cell);
        let refund = (tower.cost as f32 * refund_fraction).floor() as u32;
        self.resources += refund;
        (self, Some(refund))
    }

    pub fn add_enemy(mut self, enemy: Enemy) -> Self {
        self.enemies.insert(enemy.id, enemy);
        self
    }

    pub fn remove_enemy(mut self, id: EnemyId) -> Self {
        self.enemies.remove(&id);
        self
    }

    pub fn add_projectile(mut self, projectile: Projectile) -> Self {
        self.projectiles.insert(projectile.id, projectile);
        self
    }

    pub fn remove_projectile(mut self, id: ProjectileId) -> Self {
        self.projectiles.remove(&id);
        self
    }

    pub fn add_minion(mut self, minion: Minion) -> Self {
        self.minions.insert(minion.id, minion);
        self
    }

    pub fn remove_minion(mut self, id: MinionId) -> Self {
        self.minions.remove(&id);
        self
    }

    pub fn add_resources(mut self, amount: u32) -> Self {
        self.resources += amount;
        self
    }

    pub fn set_resources(mut self, amount: u32) -> Self {
        self.resources = amount;
        self
    }

    pub fn add_score(mut self, points: u32) -> Self {
        self.score += points;
        self
    }

    pub fn push_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Lose one life. The second value is true exactly when this call
    /// ended the game.
    pub fn lose_life(mut self) -> (Self, bool) {
        if self.lives > 0 {
            self.lives -= 1;
        }
        if self.lives == 0 && !self.state.is_terminal() {
            self.state = GameState::Lost;
            return (self, true);
        }
        (self, false)
    }

    /// Record a completed wave. Completing the final wave wins the
    /// game.
    pub fn next_wave(mut self) -> Self {
        self.waves_completed += 1;
        if self.waves_completed >= self.total_waves && !self.state.is_terminal() {
            self.state = GameState::Won;
        }
        self
    }
}
