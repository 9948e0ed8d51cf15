//! Target selection for towers.

use std::collections::BTreeMap;

use rampart_core::entities::{Enemy, Tower};
use rampart_core::enums::TargetingStrategy;
use rampart_core::types::EnemyId;

/// Pick a target among live enemies in range, per the tower's
/// strategy. Ties resolve to the lowest id because candidates are
/// scanned in id order with strict comparisons. Returns None when
/// nothing is in range.
pub fn find_target(tower: &Tower, enemies: &BTreeMap<EnemyId, Enemy>) -> Option<EnemyId> {
    let mut best: Option<(EnemyId, f32)> = None;
    for (id, enemy) in enemies {
        if !enemy.is_alive() || !tower.in_range(enemy.position) {
            continue;
        }
        let key = match tower.targeting {
            // Furthest along the path. Unknown tags behave the same.
            TargetingStrategy::First | TargetingStrategy::Unknown => enemy.progress,
            TargetingStrategy::Last => -enemy.progress,
            TargetingStrategy::Closest => -tower.position.distance(enemy.position),
            TargetingStrategy::Strongest => enemy.health,
            TargetingStrategy::Weakest => -enemy.health,
        };
        match best {
            Some((_, best_key)) if key <= best_key => {}
            _ => best = Some((*id, key)),
        }
    }
    best.map(|(id, _)| id)
}
