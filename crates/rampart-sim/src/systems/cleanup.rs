//! End-of-tick cleanup: deaths, leaks, stale references, and marker
//! expiry.

use rand::Rng;
use rampart_core::constants::SPLIT_PROGRESS_OFFSET_MAX;
use rampart_core::entities::Enemy;
use rampart_core::enums::SpecialBehavior;
use rampart_core::events::GameEvent;
use rampart_core::types::EnemyId;

use crate::tick::TickContext;
use crate::world::{Marker, World};

/// Settle everything that died or finished this tick. All
/// simultaneous deaths and leaks are processed; a game-ending leak
/// does not stop the rest of the pass.
pub fn run(mut world: World, ctx: &mut TickContext) -> World {
    // 11. Deaths: pay the reward, mark the spot, run split-on-death.
    let dead: Vec<EnemyId> = world
        .enemies
        .iter()
        .filter(|(_, enemy)| !enemy.is_alive())
        .map(|(id, _)| *id)
        .collect();
    for id in dead {
        let Some(enemy) = world.enemies.remove(&id) else {
            continue;
        };
        world = world.add_resources(enemy.reward).add_score(enemy.reward);
        ctx.events.push(GameEvent::EnemyKilled {
            enemy: id,
            reward: enemy.reward,
        });
        let marker = Marker::death(enemy.position, world.time.tick);
        world = world.push_marker(marker);
        if let Some(SpecialBehavior::SplitOnDeath { into, count }) = &enemy.behavior {
            world = split(world, &enemy, into, *count, ctx);
        }
    }

    // 12. Leaks: each enemy that reached the exit costs a life.
    let leaked: Vec<EnemyId> = world
        .enemies
        .iter()
        .filter(|(_, enemy)| enemy.reached_end())
        .map(|(id, _)| *id)
        .collect();
    for id in leaked {
        if world.enemies.remove(&id).is_none() {
            continue;
        }
        let (next, game_over) = world.lose_life();
        world = next;
        ctx.events.push(GameEvent::EnemyLeaked {
            enemy: id,
            lives_left: world.lives,
        });
        if game_over {
            ctx.events.push(GameEvent::GameLost);
        }
    }

    // Towers tracking a removed enemy drop the reference.
    let World {
        towers, enemies, ..
    } = &mut world;
    for tower in towers.values_mut() {
        if let Some(target) = tower.target {
            if !enemies.contains_key(&target) {
                tower.target = None;
            }
        }
    }

    // 13. Markers past their lifetime.
    let now = world.time.tick;
    world.markers.retain(|marker| marker.expires_at > now);
    world
}

/// Spawn the split children slightly behind the parent's progress,
/// each with its own small random regression so they fan out instead
/// of stacking.
fn split(mut world: World, parent: &Enemy, into: &str, count: u32, ctx: &mut TickContext) -> World {
    let Some(spec) = ctx.config.enemies.get(into) else {
        return world;
    };
    for _ in 0..count {
        let offset: f32 = ctx.rng.gen_range(0.0..SPLIT_PROGRESS_OFFSET_MAX);
        let progress = (parent.progress - offset).max(0.0);
        let id = ctx.ids.enemy();
        let position = world.map.path.position_at(progress);
        let mut child = Enemy::from_spec(id, into, spec, position);
        child.progress = progress;
        ctx.events.push(GameEvent::EnemySpawned {
            enemy: id,
            kind: into.to_string(),
        });
        world = world.add_enemy(child);
    }
    world
}
