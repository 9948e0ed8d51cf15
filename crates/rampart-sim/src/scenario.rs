//! Built-in demo content: tower catalog, enemy roster, tech tree, and
//! one playable level.
//!
//! Hosts normally ship their own content as data; this set exists so
//! the engine binary and the integration tests have a complete game to
//! run.

use std::collections::BTreeMap;

use glam::Vec2;

use rampart_core::config::{
    ChainSpec, EffectSpec, EnemySpec, GameConfig, LevelSpec, MapSpec, SpawnGroupSpec, SpawnSpec,
    TechNodeSpec, TowerSpec, TowerStats, WaveSpec,
};
use rampart_core::enums::{DamageType, EffectKind, SpecialBehavior, TargetingStrategy};
use rampart_core::types::CellCoord;

/// The complete demo content set.
pub fn demo_config() -> GameConfig {
    GameConfig {
        towers: towers(),
        enemies: enemies(),
        levels: levels(),
        tech_nodes: tech_nodes(),
    }
}

/// Tower catalog. Arrow and cannon are ungated starters; the rest sit
/// behind the tech tree.
fn towers() -> BTreeMap<String, TowerSpec> {
    let mut catalog = BTreeMap::new();

    // Arrow: cheap single-target pepper.
    catalog.insert(
        "arrow".to_string(),
        TowerSpec {
            name: "Arrow Tower".to_string(),
            cost: 50,
            stats: TowerStats {
                damage: 8.0,
                damage_type: DamageType::Physical,
                range: 3.0,
                fire_rate: 2.0,
                projectile_speed: 12.0,
                aoe_radius: None,
                chain: None,
                spawn: None,
            },
            targeting: TargetingStrategy::First,
            effects: Vec::new(),
        },
    );

    // Cannon: slow splash hits for packed groups.
    catalog.insert(
        "cannon".to_string(),
        TowerSpec {
            name: "Cannon".to_string(),
            cost: 90,
            stats: TowerStats {
                damage: 20.0,
                damage_type: DamageType::Physical,
                range: 2.5,
                fire_rate: 0.6,
                projectile_speed: 8.0,
                aoe_radius: Some(1.5),
                chain: None,
                spawn: None,
            },
            targeting: TargetingStrategy::First,
            effects: Vec::new(),
        },
    );

    // Frost: low damage, strong slow.
    catalog.insert(
        "frost".to_string(),
        TowerSpec {
            name: "Frost Spire".to_string(),
            cost: 70,
            stats: TowerStats {
                damage: 4.0,
                damage_type: DamageType::Ice,
                range: 2.75,
                fire_rate: 1.0,
                projectile_speed: 10.0,
                aoe_radius: None,
                chain: None,
                spawn: None,
            },
            targeting: TargetingStrategy::First,
            effects: vec![EffectSpec {
                kind: EffectKind::Slow,
                duration_secs: 2.0,
                strength: Some(0.5),
                damage_per_sec: None,
            }],
        },
    );

    // Tesla: chain lightning, picks the closest conductor.
    catalog.insert(
        "tesla".to_string(),
        TowerSpec {
            name: "Tesla Coil".to_string(),
            cost: 120,
            stats: TowerStats {
                damage: 14.0,
                damage_type: DamageType::Lightning,
                range: 3.0,
                fire_rate: 0.8,
                projectile_speed: 16.0,
                aoe_radius: None,
                chain: Some(ChainSpec {
                    max_chains: 3,
                    falloff: 0.5,
                }),
                spawn: None,
            },
            targeting: TargetingStrategy::Closest,
            effects: Vec::new(),
        },
    );

    // Venom: damage over time, aimed at the back of the pack so the
    // poison has time to work.
    catalog.insert(
        "venom".to_string(),
        TowerSpec {
            name: "Venom Thrower".to_string(),
            cost: 80,
            stats: TowerStats {
                damage: 5.0,
                damage_type: DamageType::Poison,
                range: 2.75,
                fire_rate: 1.2,
                projectile_speed: 10.0,
                aoe_radius: None,
                chain: None,
                spawn: None,
            },
            targeting: TargetingStrategy::Last,
            effects: vec![EffectSpec {
                kind: EffectKind::Poison,
                duration_secs: 3.0,
                strength: None,
                damage_per_sec: Some(6.0),
            }],
        },
    );

    // Hive: fires nothing itself; produces exploding minions.
    catalog.insert(
        "hive".to_string(),
        TowerSpec {
            name: "Hive".to_string(),
            cost: 110,
            stats: TowerStats {
                damage: 0.0,
                damage_type: DamageType::Physical,
                range: 3.5,
                fire_rate: 1.0,
                projectile_speed: 0.0,
                aoe_radius: None,
                chain: None,
                spawn: Some(SpawnSpec {
                    interval_secs: 2.5,
                    damage: 12.0,
                    speed: 3.0,
                    lifetime_secs: 6.0,
                    aoe_radius: 1.0,
                }),
            },
            targeting: TargetingStrategy::First,
            effects: Vec::new(),
        },
    );

    // Sniper: long range, big hits, goes for the healthiest target.
    catalog.insert(
        "sniper".to_string(),
        TowerSpec {
            name: "Sniper Nest".to_string(),
            cost: 140,
            stats: TowerStats {
                damage: 45.0,
                damage_type: DamageType::Physical,
                range: 6.0,
                fire_rate: 0.4,
                projectile_speed: 20.0,
                aoe_radius: None,
                chain: None,
                spawn: None,
            },
            targeting: TargetingStrategy::Strongest,
            effects: Vec::new(),
        },
    );

    catalog
}

/// Enemy roster.
fn enemies() -> BTreeMap<String, EnemySpec> {
    let mut roster = BTreeMap::new();

    // Runner: the baseline wave filler.
    roster.insert(
        "runner".to_string(),
        EnemySpec {
            name: "Runner".to_string(),
            health: 30.0,
            speed: 2.2,
            reward: 5,
            resistances: BTreeMap::new(),
            weaknesses: BTreeMap::new(),
            behavior: None,
        },
    );

    // Brute: armored against physical, conducts lightning.
    roster.insert(
        "brute".to_string(),
        EnemySpec {
            name: "Brute".to_string(),
            health: 160.0,
            speed: 0.9,
            reward: 15,
            resistances: BTreeMap::from([(DamageType::Physical, 0.3)]),
            weaknesses: BTreeMap::from([(DamageType::Lightning, 0.25)]),
            behavior: None,
        },
    );

    // Regenerator: heals while walking; poison bypasses the regen by
    // ticking every frame.
    roster.insert(
        "regenerator".to_string(),
        EnemySpec {
            name: "Regenerator".to_string(),
            health: 90.0,
            speed: 1.1,
            reward: 12,
            resistances: BTreeMap::new(),
            weaknesses: BTreeMap::from([(DamageType::Poison, 0.5)]),
            behavior: Some(SpecialBehavior::Regenerate { health_per_sec: 4.0 }),
        },
    );

    // Swarmling: dies to a stiff breeze, comes in crowds.
    roster.insert(
        "swarmling".to_string(),
        EnemySpec {
            name: "Swarmling".to_string(),
            health: 12.0,
            speed: 2.8,
            reward: 2,
            resistances: BTreeMap::new(),
            weaknesses: BTreeMap::new(),
            behavior: None,
        },
    );

    // Broodmother: bursts into swarmlings on death.
    roster.insert(
        "broodmother".to_string(),
        EnemySpec {
            name: "Broodmother".to_string(),
            health: 220.0,
            speed: 0.7,
            reward: 25,
            resistances: BTreeMap::from([(DamageType::Poison, 0.5)]),
            weaknesses: BTreeMap::new(),
            behavior: Some(SpecialBehavior::SplitOnDeath {
                into: "swarmling".to_string(),
                count: 4,
            }),
        },
    );

    // Wraith: flies straight across, shrugging off physical hits.
    roster.insert(
        "wraith".to_string(),
        EnemySpec {
            name: "Wraith".to_string(),
            health: 70.0,
            speed: 1.6,
            reward: 14,
            resistances: BTreeMap::from([(DamageType::Physical, 0.5)]),
            weaknesses: BTreeMap::from([(DamageType::Lightning, 0.5)]),
            behavior: Some(SpecialBehavior::Flying),
        },
    );

    roster
}

/// One level: "Outpost", a 20x12 map with an S-shaped path and five
/// waves of rising pressure.
fn levels() -> BTreeMap<String, LevelSpec> {
    let map = MapSpec {
        width: 20.0,
        height: 12.0,
        cell_size: 1.0,
        waypoints: vec![
            Vec2::new(0.0, 6.5),
            Vec2::new(6.5, 6.5),
            Vec2::new(6.5, 2.5),
            Vec2::new(13.5, 2.5),
            Vec2::new(13.5, 9.5),
            Vec2::new(20.0, 9.5),
        ],
        blocked_cells: vec![
            CellCoord { col: 2, row: 10 },
            CellCoord { col: 3, row: 10 },
            CellCoord { col: 16, row: 1 },
        ],
    };

    let waves = vec![
        // Wave 1: runners only, a gentle opener.
        wave(&[("runner", 6, 1.2)], 8.0),
        // Wave 2: runners with the first brutes mixed in.
        wave(&[("runner", 8, 1.0), ("brute", 2, 4.0)], 8.0),
        // Wave 3: swarm pressure plus regenerators.
        wave(&[("swarmling", 4, 0.6), ("regenerator", 2, 3.0)], 10.0),
        // Wave 4: broodmothers arrive, wraiths cut the corner.
        wave(
            &[("broodmother", 2, 5.0), ("runner", 6, 1.0), ("wraith", 3, 2.5)],
            10.0,
        ),
        // Wave 5: the final push.
        wave(
            &[("brute", 4, 2.5), ("broodmother", 2, 4.0), ("wraith", 4, 2.0)],
            0.0,
        ),
    ];

    BTreeMap::from([(
        "outpost".to_string(),
        LevelSpec {
            name: "Outpost".to_string(),
            starting_resources: 300,
            starting_lives: 20,
            map,
            waves,
        },
    )])
}

/// Tech tree: one free root, two tier-one branches, two capstones.
fn tech_nodes() -> Vec<TechNodeSpec> {
    vec![
        node("basics", "Field Manual", &["frost"], &[], 0),
        node("voltaics", "Voltaics", &["tesla"], &["basics"], 1),
        node("toxicology", "Toxicology", &["venom"], &["basics"], 1),
        node("hivecraft", "Hivecraft", &["hive"], &["toxicology"], 2),
        node("marksmanship", "Marksmanship", &["sniper"], &["voltaics"], 2),
    ]
}

fn wave(groups: &[(&str, u32, f32)], post_delay_secs: f32) -> WaveSpec {
    WaveSpec {
        groups: groups
            .iter()
            .map(|&(enemy, count, interval_secs)| SpawnGroupSpec {
                enemy: enemy.to_string(),
                count,
                interval_secs,
            })
            .collect(),
        post_delay_secs,
    }
}

fn node(id: &str, name: &str, towers: &[&str], requires: &[&str], cost: u32) -> TechNodeSpec {
    TechNodeSpec {
        id: id.to_string(),
        name: name.to_string(),
        towers: towers.iter().map(|t| t.to_string()).collect(),
        requires: requires.iter().map(|r| r.to_string()).collect(),
        cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every tag referenced anywhere in the demo content resolves.
    #[test]
    fn test_demo_config_is_self_consistent() {
        let config = demo_config();

        for level in config.levels.values() {
            for wave in &level.waves {
                for group in &wave.groups {
                    assert!(
                        config.enemies.contains_key(&group.enemy),
                        "wave references unknown enemy {}",
                        group.enemy
                    );
                }
            }
        }

        for (kind, enemy) in &config.enemies {
            if let Some(SpecialBehavior::SplitOnDeath { into, .. }) = &enemy.behavior {
                assert!(
                    config.enemies.contains_key(into),
                    "{kind} splits into unknown enemy {into}"
                );
            }
        }

        let node_ids: Vec<&str> = config.tech_nodes.iter().map(|n| n.id.as_str()).collect();
        for node in &config.tech_nodes {
            for req in &node.requires {
                assert!(
                    node_ids.contains(&req.as_str()),
                    "{} requires unknown node {req}",
                    node.id
                );
            }
            for tower in &node.towers {
                assert!(
                    config.towers.contains_key(tower),
                    "{} unlocks unknown tower {tower}",
                    node.id
                );
            }
        }
    }

    /// The demo level loads into a world with the expected shape.
    #[test]
    fn test_outpost_level_loads() {
        let config = demo_config();
        let level = config.levels.get("outpost").unwrap();
        let world = crate::world::World::from_level(level);
        assert_eq!(world.total_waves, 5);
        assert_eq!(world.resources, 300);
        assert_eq!(world.lives, 20);
        assert!(world.map.path.total_length() > 0.0);
    }
}
