//! Damage calculation helpers.
//!
//! The area and chain helpers return *base* amounts scaled by
//! geometry; the per-enemy type modifier is applied when the damage
//! lands, by `Enemy::take_damage`. Since both scalings are linear the
//! order does not change the result.

use std::collections::BTreeMap;

use glam::Vec2;
use rampart_core::config::ChainSpec;
use rampart_core::entities::Enemy;
use rampart_core::enums::DamageType;
use rampart_core::types::EnemyId;

/// Effective damage a hit of `base` would deal to this enemy after
/// its type modifier.
pub fn calculate(base: f32, damage_type: DamageType, enemy: &Enemy) -> f32 {
    base * enemy.damage_multiplier(damage_type)
}

/// Area damage around an impact point with linear falloff: full at
/// the center, zero at the edge. Returns one entry per live enemy
/// strictly inside the radius.
pub fn calculate_aoe(
    base: f32,
    center: Vec2,
    radius: f32,
    enemies: &BTreeMap<EnemyId, Enemy>,
) -> Vec<(EnemyId, f32)> {
    if radius <= 0.0 {
        return Vec::new();
    }
    let mut hits = Vec::new();
    for (id, enemy) in enemies {
        if !enemy.is_alive() {
            continue;
        }
        let distance = center.distance(enemy.position);
        if distance < radius {
            hits.push((*id, base * (1.0 - distance / radius)));
        }
    }
    hits
}

/// Chain damage along a caller-ordered target list: `base *
/// falloff^i` for the i-th entry, over at most `max_chains + 1`
/// targets. The caller decides hop order; the tick pipeline passes
/// the primary target first, then the others nearest-first from the
/// impact point.
pub fn calculate_chain(
    base: f32,
    chain: &ChainSpec,
    ordered: &[EnemyId],
) -> Vec<(EnemyId, f32)> {
    ordered
        .iter()
        .take(chain.max_chains as usize + 1)
        .enumerate()
        .map(|(i, id)| (*id, base * chain.falloff.powi(i as i32)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rampart_core::config::EnemySpec;

    fn enemy_at(id: u32, position: Vec2) -> (EnemyId, Enemy) {
        let spec = EnemySpec {
            name: "Test".to_string(),
            health: 100.0,
            speed: 1.0,
            reward: 5,
            resistances: BTreeMap::new(),
            weaknesses: BTreeMap::new(),
            behavior: None,
        };
        let id = EnemyId::new(id);
        (id, Enemy::from_spec(id, "test", &spec, position))
    }

    #[test]
    fn test_calculate_applies_modifier() {
        let (_, mut enemy) = enemy_at(1, Vec2::ZERO);
        enemy.resistances.insert(DamageType::Fire, 0.25);
        assert!((calculate(40.0, DamageType::Fire, &enemy) - 30.0).abs() < 1e-6);
    }

    #[test]
    fn test_aoe_linear_falloff() {
        let enemies: BTreeMap<_, _> = vec![
            enemy_at(1, Vec2::new(0.0, 0.0)),
            enemy_at(2, Vec2::new(2.0, 0.0)),
            enemy_at(3, Vec2::new(5.0, 0.0)),
        ]
        .into_iter()
        .collect();
        let hits = calculate_aoe(100.0, Vec2::ZERO, 4.0, &enemies);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0], (EnemyId::new(1), 100.0));
        assert!((hits[1].1 - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_aoe_skips_dead_enemies() {
        let (id, mut dead) = enemy_at(1, Vec2::ZERO);
        dead.health = 0.0;
        let enemies: BTreeMap<_, _> = vec![(id, dead)].into_iter().collect();
        assert!(calculate_aoe(100.0, Vec2::ZERO, 4.0, &enemies).is_empty());
    }

    #[test]
    fn test_aoe_zero_radius() {
        let enemies: BTreeMap<_, _> = vec![enemy_at(1, Vec2::ZERO)].into_iter().collect();
        assert!(calculate_aoe(100.0, Vec2::ZERO, 0.0, &enemies).is_empty());
    }

    #[test]
    fn test_chain_falloff_powers() {
        let chain = ChainSpec {
            max_chains: 2,
            falloff: 0.5,
        };
        let ordered = vec![
            EnemyId::new(3),
            EnemyId::new(1),
            EnemyId::new(7),
            EnemyId::new(2),
        ];
        let hits = calculate_chain(80.0, &chain, &ordered);
        // Only max_chains + 1 targets, in caller order.
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0], (EnemyId::new(3), 80.0));
        assert_eq!(hits[1], (EnemyId::new(1), 40.0));
        assert_eq!(hits[2], (EnemyId::new(7), 20.0));
    }

    #[test]
    fn test_chain_shorter_list_than_hops() {
        let chain = ChainSpec {
            max_chains: 5,
            falloff: 0.9,
        };
        let hits = calculate_chain(10.0, &chain, &[EnemyId::new(1)]);
        assert_eq!(hits.len(), 1);
    }
}
