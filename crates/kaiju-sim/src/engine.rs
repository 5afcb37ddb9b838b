//! Simulation engine: owns the world and drives every system.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use glam::DVec2;
use hecs::{Entity, World};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use kaiju_core::commands::PlayerCommand;
use kaiju_core::constants::*;
use kaiju_core::enums::{GamePhase, SplashAim, TowerKind};
use kaiju_core::events::GameEvent;
use kaiju_core::geometry::{Path, PathError};
use kaiju_core::state::{GameStateSnapshot, RunView};
use kaiju_core::types::SimTime;

use crate::economy;
use crate::enemy::{Enemy, SpawnDescriptor, SpawnError, SpawnParams};
use crate::placement::{self, PlacementError};
use crate::projectile::Crystal;
use crate::run::RunState;
use crate::systems;
use crate::tower::{self, Tower};
use crate::wave::{WaveConfig, WaveDirector, WaveError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid path: {0}")]
    Path(#[from] PathError),
    #[error("max_waves must be at least 1")]
    ZeroWaves,
    #[error("max_towers must be at least 1")]
    ZeroTowers,
    #[error("base hit points must be positive, got {0}")]
    BaseHp(f64),
    #[error("spawn delay of {ms} ms exceeds {max} ms", max = MAX_SPAWN_DELAY_MS)]
    SpawnDelay { ms: u64 },
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub path: Path,
    pub starting_cash: u32,
    pub base_hp: f64,
    pub max_towers: usize,
    pub auto_advance: bool,
    pub splash_aim: SplashAim,
    pub waves: WaveConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            path: Path::default(),
            starting_cash: STARTING_CASH,
            base_hp: STARTING_BASE_HP,
            max_towers: MAX_TOWERS,
            auto_advance: false,
            splash_aim: SplashAim::default(),
            waves: WaveConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Default config on a custom path.
    pub fn with_path(points: &[(f64, f64)]) -> Result<Self, ConfigError> {
        Ok(Self {
            path: Path::from_points(points)?,
            ..Self::default()
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.waves.max_waves == 0 {
            return Err(ConfigError::ZeroWaves);
        }
        if self.max_towers == 0 {
            return Err(ConfigError::ZeroTowers);
        }
        if !(self.base_hp > 0.0) {
            return Err(ConfigError::BaseHp(self.base_hp));
        }
        let waves = &self.waves;
        if let Some(ms) = [waves.spawn_delay_base_ms, waves.spawn_delay_floor_ms]
            .into_iter()
            .find(|&ms| ms > MAX_SPAWN_DELAY_MS)
        {
            return Err(ConfigError::SpawnDelay { ms });
        }
        Ok(())
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    config: SimConfig,
    world: World,
    time: SimTime,
    run: RunState,
    waves: WaveDirector,
    /// Phase to resume when leaving the menu mid-run.
    suspended: Option<GamePhase>,
    /// Phase as of the previous snapshot.
    reported_phase: GamePhase,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<GameEvent>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        let run = RunState::new(config.starting_cash, config.base_hp, config.auto_advance);
        let waves = WaveDirector::new(config.waves.clone(), config.seed);
        Self {
            config,
            world: World::new(),
            time: SimTime::default(),
            run,
            waves,
            suspended: None,
            reported_phase: GamePhase::Menu,
            command_queue: VecDeque::new(),
            events: Vec::new(),
        }
    }

    /// Validate the config before building the engine.
    pub fn try_new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.run.phase.is_running() {
            self.run_systems();
            self.time.advance();
        }

        self.report_phase_change();
        let events = std::mem::take(&mut self.events);
        let run = self.run_view();
        systems::snapshot::build_snapshot(&self.world, &self.time, &self.config.path, run, events)
    }

    /// Rebuild run state from the config: empty world, fresh economy and
    /// waves, back at the menu.
    pub fn reset(&mut self) {
        self.world.clear();
        self.time = SimTime::default();
        self.run = RunState::new(
            self.config.starting_cash,
            self.config.base_hp,
            self.config.auto_advance,
        );
        self.waves = WaveDirector::new(self.config.waves.clone(), self.config.seed);
        self.suspended = None;
    }

    /// Leave the menu: resume a suspended run, or begin a fresh one if there
    /// is none or the last one ended.
    pub fn start_game(&mut self) {
        match self.run.phase {
            GamePhase::Menu => match self.suspended.take() {
                Some(phase) => self.run.phase = phase,
                None => self.begin_run(),
            },
            GamePhase::GameOver | GamePhase::Victory => self.begin_run(),
            GamePhase::WavePrep | GamePhase::Playing => {}
        }
    }

    fn begin_run(&mut self) {
        self.reset();
        self.run.phase = GamePhase::WavePrep;
        info!(seed = self.config.seed, "run started");
    }

    /// Suspend the run (or leave a finished one) and show the menu.
    pub fn return_to_menu(&mut self) {
        if self.run.phase.is_running() {
            self.suspended = Some(self.run.phase);
        }
        self.run.phase = GamePhase::Menu;
    }

    /// Start the next wave. Only valid between waves.
    pub fn start_wave(&mut self) -> Result<u32, WaveError> {
        systems::waves::start_wave(&mut self.waves, &mut self.run, &mut self.events, self.time.tick)
    }

    /// Flip auto-advance, returning the new setting.
    pub fn toggle_auto_advance(&mut self) -> bool {
        self.run.auto_advance = !self.run.auto_advance;
        self.run.auto_advance
    }

    /// Validate, charge and place a tower centered at `position`.
    pub fn place_tower(&mut self, kind: TowerKind, position: DVec2) -> Result<Entity, PlacementError> {
        if !self.run.phase.is_running() {
            return Err(PlacementError::WrongPhase {
                phase: self.run.phase,
            });
        }
        let existing: Vec<DVec2> = self
            .world
            .query::<&Tower>()
            .iter()
            .map(|(_, tower)| tower.position)
            .collect();
        placement::can_place(position, &self.config.path, &existing, self.config.max_towers)?;

        let cost = tower::get_profile(kind).cost;
        if !self.run.try_spend(cost) {
            return Err(PlacementError::InsufficientFunds {
                cost,
                cash: self.run.cash,
            });
        }

        let entity = self
            .world
            .spawn((Tower::new(kind, position, self.config.splash_aim),));
        debug!(?kind, x = position.x, y = position.y, cost, "tower placed");
        self.events.push(GameEvent::TowerPlaced { kind, cost });
        Ok(entity)
    }

    /// Sell the first tower whose footprint contains `position`, refunding
    /// half its cost. Returns the refund, or `None` if nothing was there.
    pub fn sell_tower(&mut self, position: DVec2) -> Option<u32> {
        if !self.run.phase.is_running() {
            return None;
        }
        let towers: Vec<(Entity, DVec2)> = self
            .world
            .query::<&Tower>()
            .iter()
            .map(|(entity, tower)| (entity, tower.position))
            .collect();
        let entity = placement::find_tower_at(position, towers)?;
        let (kind, cost) = {
            let tower = self.world.get::<&Tower>(entity).ok()?;
            (tower.kind, tower.cost)
        };
        self.world.despawn(entity).ok()?;

        let refund = economy::sell_refund(cost);
        self.run.credit(refund);
        debug!(?kind, refund, "tower sold");
        self.events.push(GameEvent::TowerSold { kind, refund });
        Some(refund)
    }

    /// Collect the first crystal within pickup range of `position`.
    pub fn collect_crystal(&mut self, position: DVec2) -> Option<u32> {
        if !self.run.phase.is_running() {
            return None;
        }
        let (entity, value) = self
            .world
            .query::<&Crystal>()
            .iter()
            .find(|(_, crystal)| crystal.in_pickup_range(position))
            .map(|(entity, crystal)| (entity, crystal.value))?;
        self.world.despawn(entity).ok()?;

        self.run.credit(value);
        self.events.push(GameEvent::CrystalCollected { value });
        Some(value)
    }

    /// Insert an enemy at the path start outside the wave queue, scaled for
    /// the current wave. Used by scenarios and tests.
    pub fn spawn_enemy(&mut self, desc: SpawnDescriptor) -> Result<Entity, SpawnError> {
        let enemy = Enemy::spawn(desc, SpawnParams::wave(self.waves.wave()), &self.config.path)?;
        Ok(self.world.spawn((enemy,)))
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.run.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn run_state(&self) -> &RunState {
        &self.run
    }

    pub fn waves(&self) -> &WaveDirector {
        &self.waves
    }

    pub fn cash(&self) -> u32 {
        self.run.cash
    }

    pub fn base_hp(&self) -> f64 {
        self.run.base_hp
    }

    pub fn tower_count(&self) -> usize {
        self.world.query::<&Tower>().iter().count()
    }

    pub fn enemy_count(&self) -> usize {
        self.world.query::<&Enemy>().iter().count()
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for scripted scenarios.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command. Failures become events.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartGame => self.start_game(),
            PlayerCommand::ReturnToMenu => self.return_to_menu(),
            PlayerCommand::StartWave => {
                if let Err(err) = self.start_wave() {
                    debug!(%err, "start wave refused");
                    self.events.push(GameEvent::WaveRejected {
                        reason: err.to_string(),
                    });
                }
            }
            PlayerCommand::ToggleAutoAdvance => {
                self.toggle_auto_advance();
            }
            PlayerCommand::PlaceTower { kind, x, y } => {
                if let Err(err) = self.place_tower(kind, DVec2::new(x, y)) {
                    debug!(?kind, x, y, %err, "placement rejected");
                    self.events.push(GameEvent::PlacementRejected {
                        reason: err.to_string(),
                    });
                }
            }
            PlayerCommand::SellTower { x, y } => {
                self.sell_tower(DVec2::new(x, y));
            }
            PlayerCommand::CollectCrystal { x, y } => {
                self.collect_crystal(DVec2::new(x, y));
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let now = self.time.tick;
        // 1. Spawning
        systems::spawning::run(
            &mut self.world,
            &self.config.path,
            &mut self.waves,
            &mut self.run,
            &mut self.events,
            now,
        );
        // 2. Enemies (reap, abilities, movement); stops the tick on base loss
        let flow = systems::enemies::run(
            &mut self.world,
            &self.config.path,
            &mut self.run,
            &mut self.events,
            now,
        );
        if flow.is_break() {
            return;
        }
        // 3. Fire control
        systems::fire_control::run(&mut self.world, now);
        // 4. Projectiles, beams, heal zones, crystals
        systems::impact::run(&mut self.world, &self.config.path, &mut self.events, now);
        // 5. Wave completion
        systems::waves::run(&self.world, &mut self.waves, &mut self.run, &mut self.events, now);
    }

    fn report_phase_change(&mut self) {
        let phase = self.run.phase;
        if phase == self.reported_phase {
            return;
        }
        if phase.is_terminal() {
            info!(?phase, wave = self.waves.wave(), cash = self.run.cash, "run ended");
        }
        self.events.push(GameEvent::PhaseChanged { phase });
        self.reported_phase = phase;
    }

    fn run_view(&mut self) -> RunView {
        RunView {
            phase: self.run.phase,
            cash: self.run.cash,
            base_hp: self.run.base_hp,
            wave: self.waves.wave(),
            max_waves: self.waves.max_waves(),
            boss_wave: self.waves.is_boss_wave(),
            auto_advance: self.run.auto_advance,
            tower_count: self.tower_count(),
            max_towers: self.config.max_towers,
            pending_spawns: self.waves.pending(),
            wave_bonus: self.run.wave_bonus.take(),
        }
    }
}
