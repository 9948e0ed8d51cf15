//! Simulation engine for RAMPART.
//!
//! Owns the world state, applies player commands, runs the ordered
//! tick pipeline at a fixed rate, and produces GameStateSnapshots for
//! the host.

pub mod combat;
pub mod map;
pub mod progression;
pub mod scenario;
pub mod session;
pub mod systems;
pub mod tick;
pub mod waves;
pub mod world;

pub use rampart_core as core;
pub use session::{GameSession, SessionConfig};
