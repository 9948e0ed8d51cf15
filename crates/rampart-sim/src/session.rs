//! Game session: owns the world, the content config, progression, and
//! the RNG, and applies player commands between ticks.
//!
//! Completely headless. The engine crate drives `advance` on a timer;
//! tests drive it directly, which is what makes whole games
//! reproducible from a seed and a command list.

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use rampart_core::commands::Command;
use rampart_core::config::{GameConfig, WaveSpec};
use rampart_core::constants::{
    DT, SELL_REFUND_FRACTION, SKILL_POINTS_PER_WAVE, SPEED_MAX, SPEED_MIN,
};
use rampart_core::entities::{Enemy, Tower};
use rampart_core::enums::GameState;
use rampart_core::errors::CommandError;
use rampart_core::events::GameEvent;
use rampart_core::state::GameStateSnapshot;
use rampart_core::types::TowerId;

use crate::progression::TechTree;
use crate::systems::snapshot;
use crate::tick::{self, TickContext};
use crate::waves::Spawner;
use crate::world::{IdAlloc, World};

/// Settings for starting a new session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// RNG seed. Same seed and same commands give the same game.
    pub seed: u64,
    /// Initial speed multiplier.
    pub speed: f32,
    /// Enable designer commands and free placement.
    pub designer: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            speed: 1.0,
            designer: false,
        }
    }
}

/// One running game. Commands apply immediately; `advance` runs one
/// fixed tick and returns the snapshot for it.
pub struct GameSession {
    config: GameConfig,
    world: World,
    /// Name of the loaded level; None until the first StartGame.
    level: Option<String>,
    /// Wave spec list of the active level.
    waves: Vec<WaveSpec>,
    /// The in-progress wave, if one is running.
    spawner: Option<Spawner>,
    tech: TechTree,
    ids: IdAlloc,
    rng: ChaCha8Rng,
    /// Remembered so a restart replays identically.
    seed: u64,
    speed: f32,
    designer: bool,
    /// Seconds until the next wave auto-starts.
    next_wave_countdown: Option<f32>,
    /// Events accumulated since the last snapshot.
    events: Vec<GameEvent>,
}

impl GameSession {
    pub fn new(config: GameConfig, session: SessionConfig) -> Self {
        let tech = TechTree::from_config(&config.tech_nodes);
        Self {
            config,
            world: World::empty(),
            level: None,
            waves: Vec::new(),
            spawner: None,
            tech,
            ids: IdAlloc::default(),
            rng: ChaCha8Rng::seed_from_u64(session.seed),
            seed: session.seed,
            speed: session.speed.clamp(SPEED_MIN, SPEED_MAX),
            designer: session.designer,
            next_wave_countdown: None,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> GameState {
        self.world.state
    }

    /// Current speed multiplier. The engine reads this to set its tick
    /// cadence; the simulation itself never sees it.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn tech(&self) -> &TechTree {
        &self.tech
    }

    /// Apply one command. Failures leave the session untouched.
    pub fn handle_command(&mut self, command: Command) -> Result<(), CommandError> {
        match command {
            Command::StartGame { level } => self.start_game(&level),
            Command::PlaceTower { kind, position } => self.place_tower(&kind, position),
            Command::SellTower { tower } => self.sell_tower(tower),
            Command::StartWave => self.start_wave(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::SetSpeed { factor } => self.set_speed(factor),
            Command::SingleStep => self.single_step(),
            Command::UnlockTech { node } => self.unlock_tech(&node),
            Command::SpawnEnemy { kind } => self.spawn_enemy(&kind),
            Command::SetResources { amount } => self.set_resources(amount),
        }
    }

    /// Run one fixed tick and return the snapshot for it, with every
    /// event since the previous snapshot.
    pub fn advance(&mut self) -> GameStateSnapshot {
        self.step();
        self.snapshot()
    }

    /// Build a snapshot of the current state, draining pending events.
    pub fn snapshot(&mut self) -> GameStateSnapshot {
        let events = std::mem::take(&mut self.events);
        let wave_in_progress = self.spawner.as_ref().map(Spawner::wave_number);
        snapshot::build(
            &self.world,
            &self.tech,
            &self.config,
            self.speed,
            wave_in_progress,
            events,
        )
    }

    // --- Command handlers ---

    /// Reset everything and start the named level. The world comes up
    /// Waiting: the clock only runs once the first wave starts, so the
    /// player can build in peace. Restarting with the same seed replays
    /// identically.
    fn start_game(&mut self, level: &str) -> Result<(), CommandError> {
        let spec = self
            .config
            .levels
            .get(level)
            .ok_or_else(|| CommandError::UnknownLevel(level.to_string()))?;
        self.world = World::from_level(spec);
        self.level = Some(level.to_string());
        self.waves = spec.waves.clone();
        self.spawner = None;
        self.next_wave_countdown = None;
        self.ids = IdAlloc::default();
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.tech = TechTree::from_config(&self.config.tech_nodes);
        self.events.clear();
        self.events.push(GameEvent::GameStarted {
            level: level.to_string(),
        });
        Ok(())
    }

    fn place_tower(&mut self, kind: &str, position: Vec2) -> Result<(), CommandError> {
        self.require_active()?;
        let Some(spec) = self.config.towers.get(kind) else {
            return Err(CommandError::UnknownTowerKind(kind.to_string()));
        };
        if !self.designer && !self.tech.tower_unlocked(kind) {
            return Err(CommandError::TowerLocked(kind.to_string()));
        }
        let cell = self.world.map.cell_at(position);
        if !self.world.map.can_place(cell) {
            return Err(CommandError::InvalidPosition);
        }
        let position = self.world.map.cell_center(cell);
        let world = if self.designer {
            self.world.clone()
        } else {
            self.world.spend_resources(spec.cost)?
        };
        let id = self.ids.tower();
        let mut tower = Tower::from_spec(id, kind, spec, position);
        // A spawner tower's first minion waits a full interval from
        // placement, not from tick zero.
        tower.last_spawn_tick = self.world.time.tick;
        self.world = world.add_tower(tower)?;
        self.events.push(GameEvent::TowerPlaced {
            tower: id,
            kind: kind.to_string(),
        });
        Ok(())
    }

    /// Sell a tower for a partial refund. Unknown ids are a no-op, so
    /// a double-click cannot fail a session.
    fn sell_tower(&mut self, tower: TowerId) -> Result<(), CommandError> {
        self.require_active()?;
        let world = std::mem::take(&mut self.world);
        let (world, refund) = world.remove_tower(tower, SELL_REFUND_FRACTION);
        self.world = world;
        if let Some(refund) = refund {
            self.events.push(GameEvent::TowerSold { tower, refund });
        }
        Ok(())
    }

    /// Start the next wave, from the pre-game Waiting state or between
    /// waves. Ends the between-wave pause early; fails while a wave is
    /// still in progress.
    fn start_wave(&mut self) -> Result<(), CommandError> {
        self.require_active()?;
        if !matches!(self.world.state, GameState::Waiting | GameState::Playing) {
            return Err(CommandError::WrongState(self.world.state));
        }
        if self.spawner.is_some() || self.world.waves_completed >= self.world.total_waves {
            return Err(CommandError::WaveUnavailable);
        }
        self.world.state = GameState::Playing;
        self.begin_wave();
        Ok(())
    }

    fn pause(&mut self) -> Result<(), CommandError> {
        if self.world.state != GameState::Playing {
            return Err(CommandError::WrongState(self.world.state));
        }
        self.world.state = GameState::Paused;
        Ok(())
    }

    fn resume(&mut self) -> Result<(), CommandError> {
        if self.world.state != GameState::Paused {
            return Err(CommandError::NotPaused);
        }
        self.world.state = GameState::Playing;
        Ok(())
    }

    fn set_speed(&mut self, factor: f32) -> Result<(), CommandError> {
        self.speed = factor.clamp(SPEED_MIN, SPEED_MAX);
        Ok(())
    }

    /// Advance exactly one tick while paused. The tick runs with the
    /// normal fixed dt.
    fn single_step(&mut self) -> Result<(), CommandError> {
        if self.world.state != GameState::Paused {
            return Err(CommandError::NotPaused);
        }
        self.world.state = GameState::Playing;
        self.step();
        if !self.world.state.is_terminal() {
            self.world.state = GameState::Paused;
        }
        Ok(())
    }

    fn unlock_tech(&mut self, node: &str) -> Result<(), CommandError> {
        self.require_active()?;
        self.tech.unlock(node)?;
        self.events.push(GameEvent::TechUnlocked {
            node: node.to_string(),
        });
        Ok(())
    }

    fn spawn_enemy(&mut self, kind: &str) -> Result<(), CommandError> {
        if !self.designer {
            return Err(CommandError::DesignerOnly);
        }
        self.require_active()?;
        let Some(spec) = self.config.enemies.get(kind) else {
            return Err(CommandError::UnknownEnemyKind(kind.to_string()));
        };
        let id = self.ids.enemy();
        let enemy = Enemy::from_spec(id, kind, spec, self.world.map.path.start());
        self.world = std::mem::take(&mut self.world).add_enemy(enemy);
        self.events.push(GameEvent::EnemySpawned {
            enemy: id,
            kind: kind.to_string(),
        });
        Ok(())
    }

    fn set_resources(&mut self, amount: u32) -> Result<(), CommandError> {
        if !self.designer {
            return Err(CommandError::DesignerOnly);
        }
        self.world = std::mem::take(&mut self.world).set_resources(amount);
        Ok(())
    }

    /// Most commands only make sense for a started, unfinished game:
    /// waiting before the first wave, playing, or paused.
    fn require_active(&self) -> Result<(), CommandError> {
        if self.level.is_none() || self.world.state.is_terminal() {
            return Err(CommandError::WrongState(self.world.state));
        }
        Ok(())
    }

    // --- Tick flow ---

    /// Run one fixed tick: wave spawning, the system pipeline, then
    /// wave completion and pacing. A non-Playing world does not move.
    fn step(&mut self) {
        if self.world.state != GameState::Playing {
            return;
        }
        let mut world = std::mem::take(&mut self.world);
        if let Some(spawner) = &mut self.spawner {
            world = spawner.tick(world, DT, &self.config, &mut self.ids, &mut self.events);
        }
        let mut ctx = TickContext {
            config: &self.config,
            ids: &mut self.ids,
            rng: &mut self.rng,
            events: &mut self.events,
            dt: DT,
        };
        self.world = tick::process(world, &mut ctx);
        self.finish_wave();
        self.tick_wave_pacing();
    }

    /// A wave completes when its spawns are exhausted and the field is
    /// clear. Completing one awards a skill point and either wins the
    /// game or arms the auto-start countdown.
    fn finish_wave(&mut self) {
        if self.world.state.is_terminal() {
            return;
        }
        let exhausted = matches!(&self.spawner, Some(spawner) if spawner.complete());
        if !exhausted || !self.world.enemies.is_empty() {
            return;
        }
        let Some(spawner) = self.spawner.take() else {
            return;
        };
        self.world = std::mem::take(&mut self.world).next_wave();
        self.tech.add_points(SKILL_POINTS_PER_WAVE);
        self.events.push(GameEvent::WaveCompleted {
            wave: spawner.wave_number(),
        });
        match self.world.state {
            GameState::Won => self.events.push(GameEvent::GameWon),
            GameState::Playing => self.next_wave_countdown = Some(spawner.post_delay_secs()),
            _ => {}
        }
    }

    /// Count down the between-wave pause and auto-start the next wave
    /// when it runs out.
    fn tick_wave_pacing(&mut self) {
        if self.world.state != GameState::Playing {
            return;
        }
        let Some(remaining) = &mut self.next_wave_countdown else {
            return;
        };
        *remaining -= DT;
        if *remaining <= 0.0 {
            self.next_wave_countdown = None;
            self.begin_wave();
        }
    }

    fn begin_wave(&mut self) {
        let index = self.world.waves_completed as usize;
        let Some(spec) = self.waves.get(index) else {
            return;
        };
        let wave = index as u32 + 1;
        self.spawner = Some(Spawner::from_spec(wave, spec));
        self.next_wave_countdown = None;
        self.events.push(GameEvent::WaveStarted { wave });
    }
}
