//! Typed failure reasons for the command surface.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::GameState;

/// Why a command was rejected. The world is never mutated by a
/// rejected command.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum CommandError {
    #[error("unknown level `{0}`")]
    UnknownLevel(String),
    #[error("unknown tower kind `{0}`")]
    UnknownTowerKind(String),
    #[error("unknown enemy kind `{0}`")]
    UnknownEnemyKind(String),
    #[error("tower kind `{0}` has not been unlocked")]
    TowerLocked(String),
    #[error("position is not placeable")]
    InvalidPosition,
    #[error("insufficient resources: need {required}, have {available}")]
    InsufficientResources { required: u32, available: u32 },
    #[error("no wave available to start")]
    WaveUnavailable,
    #[error("command not valid while {0:?}")]
    WrongState(GameState),
    #[error("designer mode required")]
    DesignerOnly,
    #[error("single step requires the game to be paused")]
    NotPaused,
    #[error(transparent)]
    Tech(#[from] TechTreeError),
    /// The session thread is gone (engine-level failure).
    #[error("session is closed")]
    SessionClosed,
}

/// Why a tech node unlock was rejected. Checks run in declaration
/// order: node existence, then unlock state, then prerequisites, then
/// points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum TechTreeError {
    #[error("unknown tech node")]
    UnknownNode,
    #[error("tech node is already unlocked")]
    AlreadyUnlocked,
    #[error("prerequisites are not unlocked")]
    RequirementsNotMet,
    #[error("insufficient skill points")]
    InsufficientPoints,
}
