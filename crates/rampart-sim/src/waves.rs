//! Wave spawning: counted groups that tick down independently.

use rampart_core::config::{GameConfig, WaveSpec};
use rampart_core::entities::Enemy;
use rampart_core::events::GameEvent;

use crate::world::{IdAlloc, World};

/// One group of identical enemies within a wave, spawning on its own
/// cadence.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnGroup {
    /// Enemy kind tag.
    pub kind: String,
    /// Spawns left in this group.
    pub remaining: u32,
    /// Seconds between spawns.
    pub interval_secs: f32,
    /// Seconds until the next spawn.
    pub countdown_secs: f32,
}

/// An in-progress wave. Groups run concurrently, so a wave of fast
/// runners and slow brutes interleaves naturally.
#[derive(Debug, Clone, PartialEq)]
pub struct Spawner {
    wave_number: u32,
    groups: Vec<SpawnGroup>,
    post_delay_secs: f32,
}

impl Spawner {
    pub fn from_spec(wave_number: u32, spec: &WaveSpec) -> Self {
        let groups = spec
            .groups
            .iter()
            .map(|group| SpawnGroup {
                kind: group.enemy.clone(),
                remaining: group.count,
                interval_secs: group.interval_secs,
                countdown_secs: group.interval_secs,
            })
            .collect();
        Self {
            wave_number,
            groups,
            post_delay_secs: spec.post_delay_secs,
        }
    }

    /// 1-based wave number this spawner belongs to.
    pub fn wave_number(&self) -> u32 {
        self.wave_number
    }

    /// Pause before the next wave auto-starts, once this one is done.
    pub fn post_delay_secs(&self) -> f32 {
        self.post_delay_secs
    }

    /// All groups have spawned everything. The field may still hold
    /// live enemies; wave *completion* additionally requires a clear
    /// field, which the session checks.
    pub fn complete(&self) -> bool {
        self.groups.iter().all(|group| group.remaining == 0)
    }

    /// Count down every group and spawn at most one enemy per group
    /// per tick at the path entry.
    pub fn tick(
        &mut self,
        mut world: World,
        dt: f32,
        config: &GameConfig,
        ids: &mut IdAlloc,
        events: &mut Vec<GameEvent>,
    ) -> World {
        for group in &mut self.groups {
            if group.remaining == 0 {
                continue;
            }
            group.countdown_secs -= dt;
            if group.countdown_secs > 0.0 {
                continue;
            }
            group.countdown_secs = group.interval_secs.max(0.0);
            group.remaining -= 1;
            let Some(spec) = config.enemies.get(&group.kind) else {
                continue;
            };
            let id = ids.enemy();
            let enemy = Enemy::from_spec(id, &group.kind, spec, world.map.path.start());
            events.push(GameEvent::EnemySpawned {
                enemy: id,
                kind: group.kind.clone(),
            });
            world = world.add_enemy(enemy);
        }
        world
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use rampart_core::config::{EnemySpec, LevelSpec, MapSpec, SpawnGroupSpec};
    use rampart_core::constants::DT;

    fn config_with_runner() -> GameConfig {
        let mut config = GameConfig::default();
        config.enemies.insert(
            "runner".to_string(),
            EnemySpec {
                name: "Runner".to_string(),
                health: 20.0,
                speed: 2.0,
                reward: 4,
                resistances: Default::default(),
                weaknesses: Default::default(),
                behavior: None,
            },
        );
        config.enemies.insert(
            "brute".to_string(),
            EnemySpec {
                name: "Brute".to_string(),
                health: 120.0,
                speed: 0.8,
                reward: 15,
                resistances: Default::default(),
                weaknesses: Default::default(),
                behavior: None,
            },
        );
        config
    }

    fn test_world() -> World {
        World::from_level(&LevelSpec {
            name: "Test".to_string(),
            starting_resources: 0,
            starting_lives: 10,
            map: MapSpec {
                width: 10.0,
                height: 10.0,
                cell_size: 1.0,
                waypoints: vec![Vec2::new(0.5, 5.5), Vec2::new(9.5, 5.5)],
                blocked_cells: Vec::new(),
            },
            waves: Vec::new(),
        })
    }

    fn run_ticks(
        spawner: &mut Spawner,
        mut world: World,
        config: &GameConfig,
        ids: &mut IdAlloc,
        n: u32,
    ) -> World {
        let mut events = Vec::new();
        for _ in 0..n {
            world = spawner.tick(world, DT, config, ids, &mut events);
        }
        world
    }

    /// One spawn per elapsed interval, at the path entry.
    #[test]
    fn test_spawns_on_interval() {
        let spec = WaveSpec {
            groups: vec![SpawnGroupSpec {
                enemy: "runner".to_string(),
                count: 3,
                interval_secs: 0.5,
            }],
            post_delay_secs: 0.0,
        };
        let mut spawner = Spawner::from_spec(1, &spec);
        let config = config_with_runner();
        let mut ids = IdAlloc::default();

        // 29 ticks: just short of the half-second interval.
        let world = run_ticks(&mut spawner, test_world(), &config, &mut ids, 29);
        assert!(world.enemies.is_empty());
        // Tick 30 crosses it.
        let world = run_ticks(&mut spawner, world, &config, &mut ids, 1);
        assert_eq!(world.enemies.len(), 1);
        let spawned = world.enemies.values().next().unwrap();
        assert_eq!(spawned.position, Vec2::new(0.5, 5.5));
        assert_eq!(spawned.progress, 0.0);

        // The rest of the group lands at ticks 60 and 90; then the
        // spawner is done.
        let world = run_ticks(&mut spawner, world, &config, &mut ids, 70);
        assert_eq!(world.enemies.len(), 3);
        assert!(spawner.complete());
        let world = run_ticks(&mut spawner, world, &config, &mut ids, 30);
        assert_eq!(world.enemies.len(), 3);
    }

    /// Groups tick concurrently and interleave.
    #[test]
    fn test_groups_run_concurrently() {
        let spec = WaveSpec {
            groups: vec![
                SpawnGroupSpec {
                    enemy: "runner".to_string(),
                    count: 4,
                    interval_secs: 0.2,
                },
                SpawnGroupSpec {
                    enemy: "brute".to_string(),
                    count: 2,
                    interval_secs: 0.5,
                },
            ],
            post_delay_secs: 2.0,
        };
        let mut spawner = Spawner::from_spec(2, &spec);
        let config = config_with_runner();
        let mut ids = IdAlloc::default();

        // One second in, all four runners and both brutes are out.
        let world = run_ticks(&mut spawner, test_world(), &config, &mut ids, 60);
        let runners = world.enemies.values().filter(|e| e.kind == "runner").count();
        let brutes = world.enemies.values().filter(|e| e.kind == "brute").count();
        assert_eq!(runners, 4);
        assert_eq!(brutes, 2);
        assert!(spawner.complete());
    }

    /// Ids keep increasing across spawns.
    #[test]
    fn test_spawned_ids_are_unique() {
        let spec = WaveSpec {
            groups: vec![SpawnGroupSpec {
                enemy: "runner".to_string(),
                count: 5,
                interval_secs: 0.1,
            }],
            post_delay_secs: 0.0,
        };
        let mut spawner = Spawner::from_spec(1, &spec);
        let config = config_with_runner();
        let mut ids = IdAlloc::default();
        let world = run_ticks(&mut spawner, test_world(), &config, &mut ids, 60);
        assert_eq!(world.enemies.len(), 5);
    }
}
