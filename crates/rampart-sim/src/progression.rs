//! The tech tree: a DAG of unlockable nodes gating tower kinds.

use std::collections::{BTreeMap, BTreeSet};

use rampart_core::config::{GameConfig, TechNodeSpec};
use rampart_core::errors::TechTreeError;

/// Unlock state over the configured tech nodes.
///
/// Nodes with zero cost and no prerequisites are unlocked from the
/// start, so a fresh session always has its starter towers. Tower
/// kinds no node mentions are ungated and always available.
#[derive(Debug, Clone, PartialEq)]
pub struct TechTree {
    nodes: BTreeMap<String, TechNodeSpec>,
    unlocked: BTreeSet<String>,
    points: u32,
}

impl TechTree {
    pub fn from_config(nodes: &[TechNodeSpec]) -> Self {
        let mut tree = Self {
            nodes: nodes
                .iter()
                .map(|node| (node.id.clone(), node.clone()))
                .collect(),
            unlocked: BTreeSet::new(),
            points: 0,
        };
        for node in tree.nodes.values() {
            if node.cost == 0 && node.requires.is_empty() {
                tree.unlocked.insert(node.id.clone());
            }
        }
        tree
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn add_points(&mut self, amount: u32) {
        self.points += amount;
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked.contains(id)
    }

    /// Check whether a node could be unlocked right now. Failure
    /// reasons are checked in a fixed order: existence, unlock state,
    /// prerequisites, then points.
    pub fn can_unlock(&self, id: &str) -> Result<(), TechTreeError> {
        let node = self.nodes.get(id).ok_or(TechTreeError::UnknownNode)?;
        if self.unlocked.contains(id) {
            return Err(TechTreeError::AlreadyUnlocked);
        }
        if !node.requires.iter().all(|req| self.unlocked.contains(req)) {
            return Err(TechTreeError::RequirementsNotMet);
        }
        if node.cost > self.points {
            return Err(TechTreeError::InsufficientPoints);
        }
        Ok(())
    }

    /// Unlock a node, deducting its cost.
    pub fn unlock(&mut self, id: &str) -> Result<(), TechTreeError> {
        self.can_unlock(id)?;
        if let Some(node) = self.nodes.get(id) {
            self.points -= node.cost;
        }
        self.unlocked.insert(id.to_string());
        Ok(())
    }

    /// Whether a tower kind is currently placeable: either no node
    /// gates it, or some unlocked node lists it.
    pub fn tower_unlocked(&self, kind: &str) -> bool {
        let mut gated = false;
        for node in self.nodes.values() {
            if node.towers.iter().any(|tower| tower == kind) {
                gated = true;
                if self.unlocked.contains(&node.id) {
                    return true;
                }
            }
        }
        !gated
    }

    /// Sorted tower kinds currently placeable out of the full config.
    pub fn available_towers(&self, config: &GameConfig) -> Vec<String> {
        config
            .towers
            .keys()
            .filter(|kind| self.tower_unlocked(kind))
            .cloned()
            .collect()
    }

    /// Sorted unlocked node tags.
    pub fn unlocked_nodes(&self) -> Vec<String> {
        self.unlocked.iter().cloned().collect()
    }
}
