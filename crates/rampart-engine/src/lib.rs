//! Session runtime for RAMPART.
//!
//! Each game session runs on its own OS thread at the fixed tick rate.
//! Hosts talk to it through a [`SessionHandle`]: commands make a blocking
//! round trip, snapshots stream to subscribers, and the latest snapshot
//! is always readable without waiting for the loop.

pub mod runtime;

pub use rampart_core as core;
pub use runtime::{spawn_session, SessionHandle};
