//! Core types and definitions for the RAMPART simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! entity records, config records, commands, state snapshots, events,
//! errors, and constants. It has no dependency on any runtime framework
//! and performs no I/O.

pub mod commands;
pub mod config;
pub mod constants;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
