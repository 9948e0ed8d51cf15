//! Snapshot system: builds the complete GameStateSnapshot published
//! after each tick.
//!
//! Read-only over the world. Entity views come out sorted by id
//! because the world stores entities in ordered maps.

use rampart_core::config::GameConfig;
use rampart_core::events::GameEvent;
use rampart_core::state::{
    EffectView, EnemyView, GameStateSnapshot, MarkerView, MinionView, ProjectileView, TowerView,
};

use crate::progression::TechTree;
use crate::world::World;

/// Build a complete snapshot from the current world state.
pub fn build(
    world: &World,
    tech: &TechTree,
    config: &GameConfig,
    speed: f32,
    wave_in_progress: Option<u32>,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: world.time,
        state: world.state,
        resources: world.resources,
        lives: world.lives,
        max_lives: world.max_lives,
        score: world.score,
        waves_completed: world.waves_completed,
        total_waves: world.total_waves,
        wave_in_progress,
        speed,
        towers: build_towers(world),
        enemies: build_enemies(world),
        projectiles: build_projectiles(world),
        minions: build_minions(world),
        markers: build_markers(world),
        skill_points: tech.points(),
        unlocked_tech: tech.unlocked_nodes(),
        available_towers: tech.available_towers(config),
        events,
    }
}

fn build_towers(world: &World) -> Vec<TowerView> {
    world
        .towers
        .values()
        .map(|tower| TowerView {
            id: tower.id,
            kind: tower.kind.clone(),
            position: tower.position,
            range: tower.stats.range,
            targeting: tower.targeting,
            cooldown_secs: tower.cooldown_secs,
            target: tower.target,
        })
        .collect()
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    world
        .enemies
        .values()
        .map(|enemy| EnemyView {
            id: enemy.id,
            kind: enemy.kind.clone(),
            position: enemy.position,
            health: enemy.health,
            max_health: enemy.max_health,
            health_pct: enemy.health_percentage(),
            progress: enemy.progress,
            speed: enemy.speed,
            effects: enemy
                .effects
                .iter()
                .map(|effect| EffectView {
                    kind: effect.kind,
                    remaining_secs: effect.remaining_secs,
                })
                .collect(),
        })
        .collect()
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .projectiles
        .values()
        .map(|projectile| ProjectileView {
            id: projectile.id,
            source: projectile.source,
            target: projectile.target,
            position: projectile.position,
            damage_type: projectile.damage_type,
        })
        .collect()
}

fn build_minions(world: &World) -> Vec<MinionView> {
    world
        .minions
        .values()
        .map(|minion| MinionView {
            id: minion.id,
            owner: minion.owner,
            position: minion.position,
        })
        .collect()
}

fn build_markers(world: &World) -> Vec<MarkerView> {
    world
        .markers
        .iter()
        .map(|marker| MarkerView {
            kind: marker.kind,
            position: marker.position,
            radius: marker.radius,
        })
        .collect()
}
