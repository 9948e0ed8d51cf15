//! Projectile flight and impact resolution.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use rampart_core::entities::{Enemy, Projectile};
use rampart_core::types::{EnemyId, ProjectileId};

use crate::combat::{damage, effects};
use crate::tick::TickContext;
use crate::world::{Marker, World};

/// Fly every projectile toward its (re-tracked) target and resolve
/// arrivals. A projectile whose target died mid-flight still flies to
/// the last known position; it detonates there if it has a blast
/// radius and fizzles otherwise.
pub fn run(mut world: World, ctx: &mut TickContext) -> World {
    let mut impacts: Vec<ProjectileId> = Vec::new();
    let mut fizzles: Vec<ProjectileId> = Vec::new();

    {
        let World {
            projectiles,
            enemies,
            ..
        } = &mut world;
        for (id, projectile) in projectiles.iter_mut() {
            if let Some(target) = enemies.get(&projectile.target) {
                if target.is_alive() {
                    projectile.target_position = target.position;
                }
            }
            if !projectile.advance(ctx.dt) {
                continue;
            }
            let target_live = enemies
                .get(&projectile.target)
                .is_some_and(|enemy| enemy.is_alive());
            if target_live || projectile.aoe_radius.is_some() {
                impacts.push(*id);
            } else {
                fizzles.push(*id);
            }
        }
    }

    for id in fizzles {
        world.projectiles.remove(&id);
    }
    for id in impacts {
        let Some(projectile) = world.projectiles.remove(&id) else {
            continue;
        };
        world = resolve_impact(world, &projectile, ctx);
    }
    world
}

/// Apply one projectile's damage: plain hit, area with linear
/// falloff, chain hops, or area plus chain. Every damaged enemy also
/// receives the projectile's status effects.
fn resolve_impact(mut world: World, projectile: &Projectile, ctx: &mut TickContext) -> World {
    let mut damaged: Vec<(EnemyId, f32)> = Vec::new();

    if let Some(radius) = projectile.aoe_radius {
        damaged.extend(damage::calculate_aoe(
            projectile.damage,
            projectile.position,
            radius,
            &world.enemies,
        ));
        let marker = Marker::explosion(projectile.position, radius, world.time.tick);
        world = world.push_marker(marker);
    }

    if let Some(chain) = &projectile.chain {
        let ordered = chain_order(&world.enemies, projectile);
        let mut hops = damage::calculate_chain(projectile.damage, chain, &ordered);
        // With a blast, the primary already took area damage; the
        // hops continue outward from it.
        if projectile.aoe_radius.is_some() && !hops.is_empty() {
            hops.remove(0);
        }
        damaged.extend(hops);
    }

    if projectile.aoe_radius.is_none() && projectile.chain.is_none() {
        damaged.push((projectile.target, projectile.damage));
    }

    for (enemy_id, amount) in damaged {
        if let Some(enemy) = world.enemies.get_mut(&enemy_id) {
            enemy.take_damage(amount, projectile.damage_type);
            effects::apply_on_hit(enemy, &projectile.effects);
        }
    }
    world
}

/// Hop order for chain damage: the primary target first, then every
/// other live enemy by distance from the impact point, ties by id. An
/// impact whose primary is already dead chains to nobody.
fn chain_order(enemies: &BTreeMap<EnemyId, Enemy>, projectile: &Projectile) -> Vec<EnemyId> {
    let primary_live = enemies
        .get(&projectile.target)
        .is_some_and(|enemy| enemy.is_alive());
    if !primary_live {
        return Vec::new();
    }

    let mut others: Vec<(f32, EnemyId)> = enemies
        .iter()
        .filter(|(id, enemy)| **id != projectile.target && enemy.is_alive())
        .map(|(id, enemy)| (projectile.position.distance(enemy.position), *id))
        .collect();
    others.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(Ordering::Equal)
            .then(a.1.cmp(&b.1))
    });

    let mut ordered = vec![projectile.target];
    ordered.extend(others.into_iter().map(|(_, id)| id));
    ordered
}
