//! The ordered per-tick pipeline.
//!
//! Stage order is load-bearing: damage resolves after flight, deaths
//! after damage, leaks after deaths, so everything that happens in a
//! tick is settled by its end.

use rand_chacha::ChaCha8Rng;
use rampart_core::config::GameConfig;
use rampart_core::enums::GameState;
use rampart_core::events::GameEvent;

use crate::systems;
use crate::world::{IdAlloc, World};

/// Shared context threaded through tick stages.
pub struct TickContext<'a> {
    pub config: &'a GameConfig,
    pub ids: &'a mut IdAlloc,
    pub rng: &'a mut ChaCha8Rng,
    pub events: &'a mut Vec<GameEvent>,
    /// Fixed seconds per tick. Speed multipliers change tick cadence,
    /// never this value.
    pub dt: f32,
}

/// Run one tick over the world. Anything but a Playing world passes
/// through unchanged.
pub fn process(world: World, ctx: &mut TickContext) -> World {
    if world.state != GameState::Playing {
        return world;
    }

    // 1. Clock
    let world = world.tick();
    // 2. Enemy movement along the path
    let world = systems::movement::run(world, ctx);
    // 3-4. Status effects, then regeneration
    let world = systems::status::run(world, ctx);
    // 5-6. Tower cooldowns and firing
    let world = systems::towers::run(world, ctx);
    // 7. Minion production
    let world = systems::minions::spawn(world, ctx);
    // 8-9. Projectile flight and impact resolution
    let world = systems::projectiles::run(world, ctx);
    // 10. Minion flight, detonation, and expiry
    let world = systems::minions::run(world, ctx);
    // 11-13. Deaths, leaks, and marker expiry
    systems::cleanup::run(world, ctx)
}
