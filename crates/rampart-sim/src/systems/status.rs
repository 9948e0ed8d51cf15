//! Status effect ticking and enemy regeneration.

use rampart_core::enums::SpecialBehavior;

use crate::tick::TickContext;
use crate::world::World;

/// Tick every enemy's status effects (damage over time, expiry, speed
/// recomputation), then apply regeneration for enemies that have it.
/// Regeneration never revives: a dead enemy stays at zero.
pub fn run(mut world: World, ctx: &mut TickContext) -> World {
    for enemy in world.enemies.values_mut() {
        enemy.tick_effects(ctx.dt);
        if let Some(SpecialBehavior::Regenerate { health_per_sec }) = enemy.behavior {
            if enemy.is_alive() {
                enemy.health = (enemy.health + health_per_sec * ctx.dt).min(enemy.max_health);
            }
        }
    }
    world
}
