#[cfg(test)]
mod tests {
    use glam::Vec2;

    use crate::commands::Command;
    use crate::config::{EffectSpec, EnemySpec, TowerSpec, TowerStats};
    use crate::entities::{Effect, Enemy, Projectile, Tower};
    use crate::enums::*;
    use crate::events::GameEvent;
    use crate::state::GameStateSnapshot;
    use crate::types::{EnemyId, ProjectileId, SimTime, TowerId};

    fn enemy_with(resistances: &[(DamageType, f32)], weaknesses: &[(DamageType, f32)]) -> Enemy {
        let spec = EnemySpec {
            name: "Test".to_string(),
            health: 100.0,
            speed: 1.0,
            reward: 10,
            resistances: resistances.iter().copied().collect(),
            weaknesses: weaknesses.iter().copied().collect(),
            behavior: None,
        };
        Enemy::from_spec(EnemyId::new(1), "test", &spec, Vec2::ZERO)
    }

    /// 0.5 physical resistance halves a 30 damage hit.
    #[test]
    fn test_take_damage_resistance() {
        let mut enemy = enemy_with(&[(DamageType::Physical, 0.5)], &[]);
        let dealt = enemy.take_damage(30.0, DamageType::Physical);
        assert!((dealt - 15.0).abs() < 1e-6);
        assert!((enemy.health - 85.0).abs() < 1e-6);
    }

    /// 0.5 fire weakness amplifies a 20 damage hit to 30.
    #[test]
    fn test_take_damage_weakness() {
        let mut enemy = enemy_with(&[], &[(DamageType::Fire, 0.5)]);
        let dealt = enemy.take_damage(20.0, DamageType::Fire);
        assert!((dealt - 30.0).abs() < 1e-6);
        assert!((enemy.health - 70.0).abs() < 1e-6);
    }

    /// Damage never goes negative, even with resistance above 1.
    #[test]
    fn test_take_damage_floors_at_zero() {
        let mut enemy = enemy_with(&[(DamageType::Ice, 2.0)], &[]);
        let dealt = enemy.take_damage(50.0, DamageType::Ice);
        assert_eq!(dealt, 0.0);
        assert_eq!(enemy.health, 100.0);
    }

    /// Weakness stacking is uncapped above the zero floor.
    #[test]
    fn test_take_damage_uncapped_amplification() {
        let mut enemy = enemy_with(&[], &[(DamageType::Lightning, 1.5)]);
        let dealt = enemy.take_damage(10.0, DamageType::Lightning);
        assert!((dealt - 25.0).abs() < 1e-6);
    }

    /// A type with no entries has a neutral modifier.
    #[test]
    fn test_damage_multiplier_neutral() {
        let enemy = enemy_with(&[(DamageType::Fire, 0.3)], &[]);
        assert_eq!(enemy.damage_multiplier(DamageType::Poison), 1.0);
    }

    #[test]
    fn test_health_percentage_bounds() {
        let mut enemy = enemy_with(&[], &[]);
        assert_eq!(enemy.health_percentage(), 1.0);
        enemy.take_damage(40.0, DamageType::Physical);
        assert!((enemy.health_percentage() - 0.6).abs() < 1e-6);
        enemy.take_damage(1000.0, DamageType::Physical);
        assert_eq!(enemy.health_percentage(), 0.0);
        assert!(!enemy.is_alive());
    }

    /// Progress accumulates with speed and clamps at 1.
    #[test]
    fn test_advance_clamps_progress() {
        let mut enemy = enemy_with(&[], &[]);
        assert!(!enemy.advance(1.0, 10.0));
        assert!((enemy.progress - 0.1).abs() < 1e-6);
        assert!(enemy.advance(100.0, 10.0));
        assert_eq!(enemy.progress, 1.0);
        assert!(enemy.reached_end());
    }

    /// A zero-length path counts as immediately finished.
    #[test]
    fn test_advance_degenerate_path() {
        let mut enemy = enemy_with(&[], &[]);
        assert!(enemy.advance(0.016, 0.0));
        assert_eq!(enemy.progress, 1.0);
    }

    /// Reapplying an effect of the same kind refreshes instead of
    /// stacking, keeping the larger values.
    #[test]
    fn test_apply_effect_same_kind_refreshes() {
        let mut enemy = enemy_with(&[], &[]);
        enemy.apply_effect(Effect {
            kind: EffectKind::Slow,
            remaining_secs: 2.0,
            strength: Some(0.5),
            damage_per_sec: None,
        });
        enemy.apply_effect(Effect {
            kind: EffectKind::Slow,
            remaining_secs: 1.0,
            strength: Some(0.3),
            damage_per_sec: None,
        });
        assert_eq!(enemy.effects.len(), 1);
        assert_eq!(enemy.effects[0].remaining_secs, 2.0);
        assert_eq!(enemy.effects[0].strength, Some(0.5));

        enemy.apply_effect(Effect {
            kind: EffectKind::Burn,
            remaining_secs: 1.0,
            strength: None,
            damage_per_sec: Some(5.0),
        });
        assert_eq!(enemy.effects.len(), 2);
    }

    /// Freeze zeroes speed; once expired, speed recovers.
    #[test]
    fn test_tick_effects_freeze_and_recovery() {
        let mut enemy = enemy_with(&[], &[]);
        enemy.apply_effect(Effect {
            kind: EffectKind::Freeze,
            remaining_secs: 0.5,
            strength: None,
            damage_per_sec: None,
        });
        enemy.tick_effects(0.1);
        assert_eq!(enemy.speed, 0.0);
        enemy.tick_effects(1.0);
        assert_eq!(enemy.speed, enemy.base_speed);
        assert!(enemy.effects.is_empty());
    }

    /// The strongest (smallest multiplier) slow wins.
    #[test]
    fn test_slow_uses_minimum_strength() {
        let mut enemy = enemy_with(&[], &[]);
        enemy.apply_effect(Effect {
            kind: EffectKind::Slow,
            remaining_secs: 3.0,
            strength: Some(0.4),
            damage_per_sec: None,
        });
        enemy.tick_effects(0.1);
        assert!((enemy.speed - enemy.base_speed * 0.4).abs() < 1e-6);
    }

    /// Damage over time drains health each tick.
    #[test]
    fn test_tick_effects_damage_over_time() {
        let mut enemy = enemy_with(&[], &[]);
        enemy.apply_effect(Effect {
            kind: EffectKind::Poison,
            remaining_secs: 10.0,
            strength: None,
            damage_per_sec: Some(6.0),
        });
        enemy.tick_effects(0.5);
        assert!((enemy.health - 97.0).abs() < 1e-6);
    }

    /// An effect that expires this tick deals no damage for it.
    #[test]
    fn test_expiring_effect_skips_its_last_tick() {
        let mut enemy = enemy_with(&[], &[]);
        enemy.apply_effect(Effect {
            kind: EffectKind::Burn,
            remaining_secs: 0.3,
            strength: None,
            damage_per_sec: Some(10.0),
        });
        enemy.tick_effects(0.5);
        assert_eq!(enemy.health, 100.0);
        assert!(enemy.effects.is_empty());
    }

    /// Templates with an unrecognized kind attach but do nothing: no
    /// damage over time, no speed change.
    #[test]
    fn test_unknown_effect_kind_is_inert() {
        let spec: EffectSpec = serde_json::from_str(
            r#"{"kind":"Curse","duration_secs":3.0,"strength":0.5,"damage_per_sec":10.0}"#,
        )
        .unwrap();
        assert_eq!(spec.kind, EffectKind::Unknown);
        let mut enemy = enemy_with(&[], &[]);
        enemy.apply_effect(Effect::from_spec(&spec));
        enemy.tick_effects(1.0);
        assert_eq!(enemy.health, 100.0);
        assert_eq!(enemy.speed, enemy.base_speed);
        assert_eq!(enemy.effects.len(), 1);
    }

    /// Ticking effects with dt = 0 changes nothing.
    #[test]
    fn test_tick_effects_zero_dt_is_identity() {
        let mut enemy = enemy_with(&[], &[]);
        enemy.apply_effect(Effect {
            kind: EffectKind::Burn,
            remaining_secs: 1.0,
            strength: None,
            damage_per_sec: Some(4.0),
        });
        let before = enemy.clone();
        enemy.tick_effects(0.0);
        assert_eq!(enemy, before);
    }

    /// Cooldown counts down to zero and resets from the fire rate.
    #[test]
    fn test_tower_cooldown_cycle() {
        let spec = TowerSpec {
            name: "Test".to_string(),
            cost: 50,
            stats: TowerStats {
                damage: 10.0,
                damage_type: DamageType::Physical,
                range: 3.0,
                fire_rate: 2.0,
                projectile_speed: 10.0,
                aoe_radius: None,
                chain: None,
                spawn: None,
            },
            targeting: TargetingStrategy::First,
            effects: Vec::new(),
        };
        let mut tower = Tower::from_spec(TowerId::new(1), "test", &spec, Vec2::ZERO);
        assert!(tower.can_fire());
        tower.reset_cooldown();
        assert!((tower.cooldown_secs - 0.5).abs() < 1e-6);
        assert!(!tower.can_fire());
        tower.cool_down(0.3);
        assert!(!tower.can_fire());
        tower.cool_down(0.3);
        assert!(tower.can_fire());
    }

    /// A non-positive fire rate falls back instead of dividing by zero.
    #[test]
    fn test_tower_fire_rate_fallback() {
        let spec = TowerSpec {
            name: "Test".to_string(),
            cost: 50,
            stats: TowerStats {
                damage: 10.0,
                damage_type: DamageType::Physical,
                range: 3.0,
                fire_rate: 0.0,
                projectile_speed: 10.0,
                aoe_radius: None,
                chain: None,
                spawn: None,
            },
            targeting: TargetingStrategy::First,
            effects: Vec::new(),
        };
        let mut tower = Tower::from_spec(TowerId::new(1), "test", &spec, Vec2::ZERO);
        tower.reset_cooldown();
        assert_eq!(tower.cooldown_secs, 1.0);
    }

    /// A projectile arrives once the remaining distance fits in a step
    /// and snaps onto the target point.
    #[test]
    fn test_projectile_advance_snaps_on_arrival() {
        let mut projectile = Projectile {
            id: ProjectileId::new(1),
            source: TowerId::new(1),
            target: EnemyId::new(1),
            position: Vec2::ZERO,
            target_position: Vec2::new(5.0, 0.0),
            damage: 10.0,
            damage_type: DamageType::Physical,
            speed: 2.0,
            aoe_radius: None,
            chain: None,
            effects: Vec::new(),
        };
        assert!(!projectile.advance(1.0));
        assert!((projectile.position.x - 2.0).abs() < 1e-6);
        assert!(!projectile.advance(1.0));
        // 1 unit left: inside the hit radius.
        assert!(projectile.advance(1.0));
        assert_eq!(projectile.position, Vec2::new(5.0, 0.0));
    }

    /// Unrecognized tags deserialize to the Unknown variant instead of
    /// failing.
    #[test]
    fn test_enum_unknown_fallback() {
        let damage: DamageType = serde_json::from_str("\"Radiant\"").unwrap();
        assert_eq!(damage, DamageType::Unknown);
        let effect: EffectKind = serde_json::from_str("\"Curse\"").unwrap();
        assert_eq!(effect, EffectKind::Unknown);
        let targeting: TargetingStrategy = serde_json::from_str("\"Random\"").unwrap();
        assert_eq!(targeting, TargetingStrategy::Unknown);
    }

    /// Known tags still round-trip through serde.
    #[test]
    fn test_damage_type_serde_round_trip() {
        let variants = vec![
            DamageType::Physical,
            DamageType::Fire,
            DamageType::Ice,
            DamageType::Lightning,
            DamageType::Poison,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: DamageType = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    /// Resistance maps keyed by damage type survive serde.
    #[test]
    fn test_resistance_map_serde() {
        let enemy_spec = EnemySpec {
            name: "Test".to_string(),
            health: 50.0,
            speed: 1.0,
            reward: 5,
            resistances: [(DamageType::Physical, 0.5)].into_iter().collect(),
            weaknesses: [(DamageType::Fire, 0.25)].into_iter().collect(),
            behavior: Some(SpecialBehavior::SplitOnDeath {
                into: "mite".to_string(),
                count: 2,
            }),
        };
        let json = serde_json::to_string(&enemy_spec).unwrap();
        let back: EnemySpec = serde_json::from_str(&json).unwrap();
        assert_eq!(enemy_spec, back);
    }

    /// Verify Command round-trips through serde (tagged union).
    #[test]
    fn test_command_serde() {
        let commands = vec![
            Command::StartGame {
                level: "outpost".to_string(),
            },
            Command::PlaceTower {
                kind: "arrow".to_string(),
                position: Vec2::new(4.5, 5.5),
            },
            Command::SellTower {
                tower: TowerId::new(3),
            },
            Command::StartWave,
            Command::Pause,
            Command::Resume,
            Command::SetSpeed { factor: 2.0 },
            Command::SingleStep,
            Command::UnlockTech {
                node: "cryonics".to_string(),
            },
            Command::SpawnEnemy {
                kind: "runner".to_string(),
            },
            Command::SetResources { amount: 999 },
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: Command = serde_json::from_str(&json).unwrap();
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }
    }

    /// Verify GameEvent round-trips through serde.
    #[test]
    fn test_game_event_serde() {
        let events = vec![
            GameEvent::WaveStarted { wave: 2 },
            GameEvent::EnemyKilled {
                enemy: EnemyId::new(9),
                reward: 12,
            },
            GameEvent::EnemyLeaked {
                enemy: EnemyId::new(4),
                lives_left: 7,
            },
            GameEvent::GameWon,
        ];
        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            let back: GameEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(*event, back);
        }
    }

    /// Verify GameStateSnapshot can be serialized to JSON.
    #[test]
    fn test_snapshot_serde() {
        let snapshot = GameStateSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, back);
        assert!(
            json.len() < 1024,
            "Empty snapshot should be <1KB, was {} bytes",
            json.len()
        );
    }

    /// Verify SimTime advancement.
    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        assert_eq!(time.tick, 0);
        assert_eq!(time.elapsed_secs, 0.0);

        for _ in 0..60 {
            time.advance();
        }
        assert_eq!(time.tick, 60);
        // 60 ticks at 60Hz = 1 second
        assert!((time.elapsed_secs - 1.0).abs() < 1e-4);
    }
}
