//! Player commands sent from the host to the simulation.
//!
//! Commands are applied at the next tick boundary, in arrival order.
//! Each returns a typed result; failures never mutate the world.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::types::TowerId;

/// All possible player and designer actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    // --- Session lifecycle ---
    /// Initialize a fresh world from the named level.
    StartGame { level: String },

    // --- Building ---
    /// Buy and place a tower of the given kind. The position snaps to
    /// the center of the containing grid cell.
    PlaceTower { kind: String, position: Vec2 },
    /// Sell a placed tower for a partial refund.
    SellTower { tower: TowerId },

    // --- Waves ---
    /// Start the next wave immediately.
    StartWave,

    // --- Simulation control ---
    /// Freeze the simulation.
    Pause,
    /// Resume a paused simulation.
    Resume,
    /// Set the speed multiplier (clamped to the supported range).
    SetSpeed { factor: f32 },
    /// Advance exactly one tick while paused.
    SingleStep,

    // --- Progression ---
    /// Spend skill points to unlock a tech node.
    UnlockTech { node: String },

    // --- Designer tools ---
    /// Spawn a single enemy at the path start. Designer mode only.
    SpawnEnemy { kind: String },
    /// Overwrite the resource pool. Designer mode only.
    SetResources { amount: u32 },
}
