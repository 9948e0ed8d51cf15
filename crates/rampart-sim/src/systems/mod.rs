//! Tick systems, one per pipeline stage group.
//!
//! Systems are pure transformations: each takes the world by value
//! and returns the updated one. Cross-entity writes collect into
//! buffers first and apply after iteration.

pub mod cleanup;
pub mod minions;
pub mod movement;
pub mod projectiles;
pub mod snapshot;
pub mod status;
pub mod towers;
