//! Headless demo: plays the sample level from start to finish and
//! prints the result as JSON.
//!
//! Run with `RUST_LOG=debug` to see per-kill detail.

use glam::Vec2;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use rampart_core::commands::Command;
use rampart_core::errors::CommandError;
use rampart_core::events::GameEvent;
use rampart_engine::spawn_session;
use rampart_sim::scenario;
use rampart_sim::session::SessionConfig;

fn main() {
    init_tracing();
    info!("RAMPART headless demo");

    if let Err(error) = run_demo() {
        error!(%error, "demo failed");
        std::process::exit(1);
    }
}

fn run_demo() -> Result<(), CommandError> {
    let handle = spawn_session(
        scenario::demo_config(),
        SessionConfig {
            seed: 7,
            designer: true,
            ..SessionConfig::default()
        },
    );
    let snapshots = handle.subscribe();

    handle.command(Command::StartGame {
        level: "outpost".into(),
    })?;
    for (kind, position) in [
        ("arrow", Vec2::new(4.5, 5.5)),
        ("cannon", Vec2::new(5.5, 7.5)),
        ("frost", Vec2::new(7.5, 3.5)),
        ("tesla", Vec2::new(12.5, 4.5)),
        ("sniper", Vec2::new(14.5, 8.5)),
    ] {
        handle.command(Command::PlaceTower {
            kind: kind.into(),
            position,
        })?;
    }
    handle.command(Command::SetSpeed { factor: 4.0 })?;
    handle.command(Command::StartWave)?;

    let mut outcome = None;
    for snapshot in snapshots.iter() {
        for event in &snapshot.events {
            log_event(event);
        }
        if snapshot.state.is_terminal() {
            outcome = Some(snapshot);
            break;
        }
    }
    handle.shutdown();

    let Some(final_state) = outcome else {
        warn!("session ended before reaching a result");
        return Ok(());
    };
    let summary = serde_json::json!({
        "state": final_state.state,
        "score": final_state.score,
        "waves_completed": final_state.waves_completed,
        "lives": final_state.lives,
        "resources": final_state.resources,
        "ticks": final_state.time.tick,
    });
    println!("{summary}");
    Ok(())
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::GameStarted { level } => info!(%level, "game started"),
        GameEvent::TowerPlaced { tower, kind } => info!(?tower, %kind, "tower placed"),
        GameEvent::TowerSold { tower, refund } => info!(?tower, refund, "tower sold"),
        GameEvent::WaveStarted { wave } => info!(wave, "wave started"),
        GameEvent::WaveCompleted { wave } => info!(wave, "wave completed"),
        GameEvent::EnemySpawned { enemy, kind } => debug!(?enemy, %kind, "enemy spawned"),
        GameEvent::EnemyKilled { enemy, reward } => debug!(?enemy, reward, "enemy killed"),
        GameEvent::EnemyLeaked { enemy, lives_left } => warn!(?enemy, lives_left, "enemy leaked"),
        GameEvent::TechUnlocked { node } => info!(%node, "tech unlocked"),
        GameEvent::GameWon => info!("game won"),
        GameEvent::GameLost => info!("game lost"),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
