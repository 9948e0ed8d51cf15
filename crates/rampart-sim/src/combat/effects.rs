//! Status effect application.

use rampart_core::config::EffectSpec;
use rampart_core::entities::{Effect, Enemy};

/// Attach every template to the enemy, merging with any effect of the
/// same kind already present.
pub fn apply_on_hit(enemy: &mut Enemy, templates: &[EffectSpec]) {
    for spec in templates {
        enemy.apply_effect(Effect::from_spec(spec));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use rampart_core::config::EnemySpec;
    use rampart_core::enums::EffectKind;
    use rampart_core::types::EnemyId;

    #[test]
    fn test_apply_on_hit_attaches_all_templates() {
        let spec = EnemySpec {
            name: "Test".to_string(),
            health: 100.0,
            speed: 2.0,
            reward: 5,
            resistances: Default::default(),
            weaknesses: Default::default(),
            behavior: None,
        };
        let mut enemy = Enemy::from_spec(EnemyId::new(1), "test", &spec, Vec2::ZERO);
        let templates = vec![
            EffectSpec {
                kind: EffectKind::Slow,
                duration_secs: 2.0,
                strength: Some(0.5),
                damage_per_sec: None,
            },
            EffectSpec {
                kind: EffectKind::Burn,
                duration_secs: 1.5,
                strength: None,
                damage_per_sec: Some(4.0),
            },
        ];
        apply_on_hit(&mut enemy, &templates);
        assert_eq!(enemy.effects.len(), 2);
        // Applying again merges rather than stacking.
        apply_on_hit(&mut enemy, &templates);
        assert_eq!(enemy.effects.len(), 2);
    }
}
