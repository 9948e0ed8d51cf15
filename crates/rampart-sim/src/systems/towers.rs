//! Tower cooldowns and firing.

use rampart_core::entities::Projectile;
use rampart_core::types::{EnemyId, TowerId};

use crate::combat::targeting;
use crate::tick::TickContext;
use crate::world::World;

/// Cool every tower down, then let ready towers pick a target and
/// loose a projectile. Spawner towers produce minions elsewhere and
/// never fire.
pub fn run(mut world: World, ctx: &mut TickContext) -> World {
    for tower in world.towers.values_mut() {
        tower.cool_down(ctx.dt);
    }

    let mut shots: Vec<(TowerId, EnemyId)> = Vec::new();
    for (id, tower) in &world.towers {
        if tower.stats.spawn.is_some() || !tower.can_fire() {
            continue;
        }
        if let Some(target) = targeting::find_target(tower, &world.enemies) {
            shots.push((*id, target));
        }
    }

    for (tower_id, enemy_id) in shots {
        let Some(enemy) = world.enemies.get(&enemy_id) else {
            continue;
        };
        let Some(tower) = world.towers.get_mut(&tower_id) else {
            continue;
        };
        let projectile = Projectile::from_tower(ctx.ids.projectile(), tower, enemy);
        tower.reset_cooldown();
        tower.target = Some(enemy_id);
        world.projectiles.insert(projectile.id, projectile);
    }
    world
}
