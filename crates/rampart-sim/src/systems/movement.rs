//! Enemy movement along the path.

use rampart_core::enums::SpecialBehavior;

use crate::tick::TickContext;
use crate::world::World;

/// Advance every enemy by its current speed and recompute its world
/// position from path progress. Flying enemies cut the straight line
/// from entry to exit instead of following the waypoints.
pub fn run(mut world: World, ctx: &mut TickContext) -> World {
    let World { map, enemies, .. } = &mut world;
    for enemy in enemies.values_mut() {
        let flying = matches!(enemy.behavior, Some(SpecialBehavior::Flying));
        if flying {
            enemy.advance(ctx.dt, map.path.direct_length());
            enemy.position = map.path.direct_position_at(enemy.progress);
        } else {
            enemy.advance(ctx.dt, map.path.total_length());
            enemy.position = map.path.position_at(enemy.progress);
        }
    }
    world
}
