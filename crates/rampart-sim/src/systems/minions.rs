//! Minion production, flight, detonation, and expiry.

use std::collections::BTreeMap;

use glam::Vec2;
use rampart_core::constants::TICK_RATE;
use rampart_core::entities::{Enemy, Minion};
use rampart_core::enums::DamageType;
use rampart_core::types::{EnemyId, MinionId, TowerId};

use crate::combat::damage;
use crate::tick::TickContext;
use crate::world::{Marker, World};

/// Let spawner towers produce a minion whenever their interval has
/// elapsed.
pub fn spawn(mut world: World, ctx: &mut TickContext) -> World {
    let now = world.time.tick;
    let mut due: Vec<TowerId> = Vec::new();
    for (id, tower) in &world.towers {
        let Some(spawn) = &tower.stats.spawn else {
            continue;
        };
        let interval_ticks = ((spawn.interval_secs * TICK_RATE as f32) as u64).max(1);
        if now.saturating_sub(tower.last_spawn_tick) >= interval_ticks {
            due.push(*id);
        }
    }

    for tower_id in due {
        let Some(tower) = world.towers.get_mut(&tower_id) else {
            continue;
        };
        let Some(spawn) = tower.stats.spawn else {
            continue;
        };
        tower.last_spawn_tick = now;
        let minion = Minion::from_spawn(ctx.ids.minion(), tower_id, &spawn, tower.position, now);
        world.minions.insert(minion.id, minion);
    }
    world
}

/// Walk every minion toward the nearest live enemy and detonate once
/// inside its own blast radius. Minions past their lifetime despawn
/// quietly.
pub fn run(mut world: World, ctx: &mut TickContext) -> World {
    let now = world.time.tick;
    let mut detonations: Vec<MinionId> = Vec::new();
    let mut expired: Vec<MinionId> = Vec::new();

    {
        let World {
            minions, enemies, ..
        } = &mut world;
        for (id, minion) in minions.iter_mut() {
            if minion.expired(now) {
                expired.push(*id);
                continue;
            }
            let Some(target) = nearest_enemy(enemies, minion.position) else {
                continue;
            };
            minion.advance_toward(target, ctx.dt);
            if minion.position.distance(target) < minion.aoe_radius {
                detonations.push(*id);
            }
        }
    }

    for id in expired {
        world.minions.remove(&id);
    }
    for id in detonations {
        let Some(minion) = world.minions.remove(&id) else {
            continue;
        };
        let hits = damage::calculate_aoe(
            minion.damage,
            minion.position,
            minion.aoe_radius,
            &world.enemies,
        );
        for (enemy_id, amount) in hits {
            if let Some(enemy) = world.enemies.get_mut(&enemy_id) {
                enemy.take_damage(amount, DamageType::Physical);
            }
        }
        let marker = Marker::explosion(minion.position, minion.aoe_radius, now);
        world = world.push_marker(marker);
    }
    world
}

/// Position of the nearest live enemy, ties by id.
fn nearest_enemy(enemies: &BTreeMap<EnemyId, Enemy>, from: Vec2) -> Option<Vec2> {
    let mut best: Option<(f32, Vec2)> = None;
    for enemy in enemies.values() {
        if !enemy.is_alive() {
            continue;
        }
        let distance = from.distance(enemy.position);
        match best {
            Some((best_distance, _)) if distance >= best_distance => {}
            _ => best = Some((distance, enemy.position)),
        }
    }
    best.map(|(_, position)| position)
}
