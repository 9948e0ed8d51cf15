//! Events emitted by the simulation for host-side feedback.
//!
//! Events accumulate during a tick and are drained into the snapshot
//! built at the end of it, so each event is delivered exactly once.

use serde::{Deserialize, Serialize};

use crate::types::{EnemyId, TowerId};

/// Things that happened during a tick, in occurrence order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A fresh world was initialized from a level.
    GameStarted { level: String },
    /// A tower was bought and placed.
    TowerPlaced { tower: TowerId, kind: String },
    /// A tower was sold.
    TowerSold { tower: TowerId, refund: u32 },
    /// A wave began spawning.
    WaveStarted { wave: u32 },
    /// A wave's spawns are exhausted and the field is clear.
    WaveCompleted { wave: u32 },
    /// An enemy entered the field (wave spawn, split, or designer).
    EnemySpawned { enemy: EnemyId, kind: String },
    /// An enemy died to damage.
    EnemyKilled { enemy: EnemyId, reward: u32 },
    /// An enemy reached the end of the path.
    EnemyLeaked { enemy: EnemyId, lives_left: u32 },
    /// A tech node was unlocked.
    TechUnlocked { node: String },
    /// All waves cleared with lives remaining.
    GameWon,
    /// Lives exhausted.
    GameLost,
}
