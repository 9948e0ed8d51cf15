//! Session thread: runs a `GameSession` at the fixed tick rate.
//!
//! The session is created inside its own thread, so every mutation of
//! game state happens there and none of it needs locking. Handles only
//! exchange messages with the loop: commands carry a reply channel,
//! subscribers receive every published snapshot, and the newest
//! snapshot is mirrored into a mutex for synchronous reads.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use rampart_core::commands::Command;
use rampart_core::config::GameConfig;
use rampart_core::constants::TICK_RATE;
use rampart_core::errors::CommandError;
use rampart_core::state::GameStateSnapshot;
use rampart_sim::session::{GameSession, SessionConfig};

/// Nominal duration of one tick at 1x speed.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Requests accepted by a session thread.
#[derive(Debug)]
enum SessionRequest {
    /// Apply a player command and report the result back.
    Command {
        command: Command,
        reply: mpsc::Sender<Result<(), CommandError>>,
    },
    /// Register a snapshot subscriber.
    Subscribe { tx: mpsc::Sender<GameStateSnapshot> },
    /// Shut down the session thread gracefully.
    Shutdown,
}

/// Shared handle to a running session.
///
/// Cheap to clone; all clones talk to the same session thread. When the
/// last handle drops, the thread exits on its next iteration.
#[derive(Clone)]
pub struct SessionHandle {
    request_tx: mpsc::Sender<SessionRequest>,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
}

impl SessionHandle {
    /// Apply a command, blocking until the session replies.
    ///
    /// Requests are served in arrival order, so a command sent before a
    /// tick boundary is visible to that tick.
    pub fn command(&self, command: Command) -> Result<(), CommandError> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.request_tx
            .send(SessionRequest::Command {
                command,
                reply: reply_tx,
            })
            .map_err(|_| CommandError::SessionClosed)?;
        reply_rx.recv().map_err(|_| CommandError::SessionClosed)?
    }

    /// Subscribe to the snapshot stream, one snapshot per tick.
    ///
    /// The receiver disconnects when the session exits.
    pub fn subscribe(&self) -> mpsc::Receiver<GameStateSnapshot> {
        let (tx, rx) = mpsc::channel();
        let _ = self.request_tx.send(SessionRequest::Subscribe { tx });
        rx
    }

    /// The most recently published snapshot, if any tick has run yet.
    pub fn latest_snapshot(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot.lock().ok()?.clone()
    }

    /// Ask the session thread to exit after its current iteration.
    pub fn shutdown(&self) {
        let _ = self.request_tx.send(SessionRequest::Shutdown);
    }
}

/// Spawn a session on a dedicated named thread and return its handle.
pub fn spawn_session(config: GameConfig, session_config: SessionConfig) -> SessionHandle {
    let (request_tx, request_rx) = mpsc::channel::<SessionRequest>();
    let latest_snapshot = Arc::new(Mutex::new(None));

    let shared = Arc::clone(&latest_snapshot);
    thread::Builder::new()
        .name("rampart-session".into())
        .spawn(move || {
            session_loop(config, session_config, request_rx, &shared);
        })
        .expect("Failed to spawn session thread");

    SessionHandle {
        request_tx,
        latest_snapshot,
    }
}

/// The session loop. Runs until a shutdown request arrives or every
/// handle has been dropped.
fn session_loop(
    config: GameConfig,
    session_config: SessionConfig,
    request_rx: mpsc::Receiver<SessionRequest>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    info!(
        seed = session_config.seed,
        speed = session_config.speed,
        designer = session_config.designer,
        "session started"
    );
    let mut session = GameSession::new(config, session_config);
    let mut subscribers: Vec<mpsc::Sender<GameStateSnapshot>> = Vec::new();
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending requests
        loop {
            match request_rx.try_recv() {
                Ok(SessionRequest::Command { command, reply }) => {
                    let result = session.handle_command(command);
                    if let Err(error) = &result {
                        debug!(%error, "command rejected");
                    }
                    let _ = reply.send(result);
                }
                Ok(SessionRequest::Subscribe { tx }) => subscribers.push(tx),
                Ok(SessionRequest::Shutdown) => {
                    info!("session shut down");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    info!("all session handles dropped");
                    return;
                }
            }
        }

        // 2. Advance one tick (the session handles pause internally)
        let snapshot = session.advance();

        // 3. Publish to subscribers, dropping any that disconnected
        subscribers.retain(|tx| tx.send(snapshot.clone()).is_ok());

        // 4. Mirror the snapshot for synchronous reads; a poisoned lock
        //    counts as shutdown
        match latest_snapshot.lock() {
            Ok(mut lock) => *lock = Some(snapshot),
            Err(_) => return,
        }

        // 5. Sleep until the next tick, scaled by the speed multiplier
        let effective_tick_duration = TICK_DURATION.div_f32(session.speed());
        next_tick_time += effective_tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > effective_tick_duration * 2 {
            warn!("tick deadline slipped more than two periods, resetting");
            next_tick_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rampart_core::enums::GameState;
    use rampart_sim::scenario;

    fn demo_handle() -> SessionHandle {
        spawn_session(scenario::demo_config(), SessionConfig::default())
    }

    #[test]
    fn test_tick_duration_constant() {
        let expected_nanos = 1_000_000_000u64 / TICK_RATE as u64;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }

    #[test]
    fn test_command_round_trip() {
        let handle = demo_handle();

        assert_eq!(
            handle.command(Command::StartGame {
                level: "nowhere".into()
            }),
            Err(CommandError::UnknownLevel("nowhere".into()))
        );
        assert_eq!(
            handle.command(Command::StartGame {
                level: "outpost".into()
            }),
            Ok(())
        );
        assert_eq!(handle.command(Command::StartWave), Ok(()));
        assert_eq!(
            handle.command(Command::StartWave),
            Err(CommandError::WaveUnavailable)
        );

        handle.shutdown();
    }

    #[test]
    fn test_latest_snapshot_appears() {
        let handle = demo_handle();
        handle
            .command(Command::StartGame {
                level: "outpost".into(),
            })
            .unwrap();

        let mut latest = None;
        for _ in 0..200 {
            latest = handle.latest_snapshot();
            if latest.is_some() {
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }
        let snapshot = latest.expect("no snapshot published within a second");
        assert_eq!(
            snapshot.state,
            GameState::Waiting,
            "a started game waits for its first wave"
        );

        handle.shutdown();
    }

    #[test]
    fn test_subscriber_receives_ticking_stream() {
        let handle = demo_handle();
        handle
            .command(Command::StartGame {
                level: "outpost".into(),
            })
            .unwrap();
        handle.command(Command::StartWave).unwrap();

        let rx = handle.subscribe();
        let first = rx
            .recv_timeout(Duration::from_secs(1))
            .expect("no snapshot within a second");
        let second = rx
            .recv_timeout(Duration::from_secs(1))
            .expect("stream went quiet");
        assert!(
            second.time.tick > first.time.tick,
            "expected the clock to advance between snapshots, got {} then {}",
            first.time.tick,
            second.time.tick
        );

        handle.shutdown();
    }

    #[test]
    fn test_pause_freezes_published_clock() {
        let handle = demo_handle();
        handle
            .command(Command::StartGame {
                level: "outpost".into(),
            })
            .unwrap();
        handle.command(Command::StartWave).unwrap();
        handle.command(Command::Pause).unwrap();

        // Subscribed after the pause reply, so everything received here
        // comes from paused ticks.
        let rx = handle.subscribe();
        let first = rx
            .recv_timeout(Duration::from_secs(1))
            .expect("no snapshot within a second");
        let second = rx
            .recv_timeout(Duration::from_secs(1))
            .expect("stream went quiet");
        assert_eq!(first.state, GameState::Paused);
        assert_eq!(
            second.time.tick, first.time.tick,
            "paused session advanced the clock"
        );

        handle.shutdown();
    }

    #[test]
    fn test_command_after_shutdown_reports_closed() {
        let handle = demo_handle();
        handle.shutdown();

        // The shutdown request is queued ahead of this command, so the
        // loop exits before it can reply.
        assert_eq!(
            handle.command(Command::Pause),
            Err(CommandError::SessionClosed)
        );
    }

    #[test]
    fn test_stream_ends_after_shutdown() {
        let handle = demo_handle();
        let rx = handle.subscribe();
        rx.recv_timeout(Duration::from_secs(1))
            .expect("no snapshot within a second");

        handle.shutdown();
        let mut disconnected = false;
        for _ in 0..50 {
            match rx.recv_timeout(Duration::from_millis(100)) {
                Ok(_) => continue,
                Err(mpsc::RecvTimeoutError::Timeout) => continue,
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }
        assert!(disconnected, "snapshot stream should disconnect after shutdown");
    }
}
