//! Wave director: builds each wave's spawn queue and paces it out.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use kaiju_core::constants::*;
use kaiju_core::enums::{EnemyKind, GamePhase};
use kaiju_core::types::ms_to_ticks;

use crate::enemy::SpawnDescriptor;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WaveError {
    #[error("all {max} waves already started")]
    NoMoreWaves { max: u32 },
    #[error("cannot start a wave during {phase:?}")]
    WrongPhase { phase: GamePhase },
}

/// A wave whose queue is a single fixed enemy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BossWave {
    pub wave: u32,
    pub spawn: SpawnDescriptor,
}

/// An enemy kind joining the regular pool once the wave index exceeds `after_wave`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoolUnlock {
    pub after_wave: u32,
    pub kind: EnemyKind,
}

/// Wave generation policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    pub max_waves: u32,
    /// Regular waves spawn `min(wave, cap)` enemies; uncapped when `None`.
    pub regular_cap: Option<u32>,
    pub boss_waves: Vec<BossWave>,
    /// Kinds available from wave 1.
    pub base_pool: Vec<EnemyKind>,
    pub unlocks: Vec<PoolUnlock>,
    /// Waves whose Crystalbacks and Stormlords spawn a roster on death.
    pub death_roster_waves: Vec<u32>,
    pub spawn_delay_base_ms: u64,
    pub spawn_delay_step_ms: u64,
    pub spawn_delay_floor_ms: u64,
}

impl Default for WaveConfig {
    fn default() -> Self {
        let devastator = |wave: u32, stage: u8| BossWave {
            wave,
            spawn: SpawnDescriptor::staged(EnemyKind::Devastator, stage),
        };
        Self {
            max_waves: MAX_WAVES,
            regular_cap: Some(REGULAR_WAVE_CAP),
            boss_waves: vec![
                devastator(10, 1),
                devastator(20, 2),
                devastator(30, 3),
                devastator(40, 4),
                BossWave {
                    wave: 50,
                    spawn: SpawnDescriptor::staged(EnemyKind::Stormlord, 1),
                },
            ],
            base_pool: vec![EnemyKind::Flyer],
            unlocks: vec![
                PoolUnlock {
                    after_wave: CRYSTALBACK_UNLOCK_WAVE,
                    kind: EnemyKind::Crystalback,
                },
                PoolUnlock {
                    after_wave: REGENERATOR_UNLOCK_WAVE,
                    kind: EnemyKind::Regenerator,
                },
                PoolUnlock {
                    after_wave: STORMLORD_UNLOCK_WAVE,
                    kind: EnemyKind::Stormlord,
                },
            ],
            death_roster_waves: vec![45, 50],
            spawn_delay_base_ms: SPAWN_DELAY_BASE_MS,
            spawn_delay_step_ms: SPAWN_DELAY_STEP_MS,
            spawn_delay_floor_ms: SPAWN_DELAY_FLOOR_MS,
        }
    }
}

impl WaveConfig {
    pub fn boss_for(&self, wave: u32) -> Option<SpawnDescriptor> {
        self.boss_waves
            .iter()
            .find(|boss| boss.wave == wave)
            .map(|boss| boss.spawn)
    }

    /// Kinds regular wave `wave` draws from.
    pub fn pool_for(&self, wave: u32) -> Vec<EnemyKind> {
        let mut pool = self.base_pool.clone();
        pool.extend(
            self.unlocks
                .iter()
                .filter(|unlock| wave > unlock.after_wave)
                .map(|unlock| unlock.kind),
        );
        pool
    }

    /// Inter-spawn delay for `wave`, in ticks.
    pub fn spawn_delay_ticks(&self, wave: u32) -> u64 {
        let reduction = self.spawn_delay_step_ms.saturating_mul(wave as u64);
        let ms = self
            .spawn_delay_base_ms
            .saturating_sub(reduction)
            .max(self.spawn_delay_floor_ms);
        ms_to_ticks(ms)
    }

    pub fn has_death_roster(&self, wave: u32) -> bool {
        self.death_roster_waves.contains(&wave)
    }
}

/// Wave state: index, pending spawns and pacing.
#[derive(Debug, Clone)]
pub struct WaveDirector {
    config: WaveConfig,
    wave: u32,
    queue: VecDeque<SpawnDescriptor>,
    delay_ticks: u64,
    last_spawn_tick: u64,
    boss_wave: bool,
    rng: ChaCha8Rng,
}

impl WaveDirector {
    pub fn new(config: WaveConfig, seed: u64) -> Self {
        let delay_ticks = config.spawn_delay_ticks(0);
        Self {
            config,
            wave: 0,
            queue: VecDeque::new(),
            delay_ticks,
            last_spawn_tick: 0,
            boss_wave: false,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &WaveConfig {
        &self.config
    }

    /// Current wave index (0 before the first wave).
    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn max_waves(&self) -> u32 {
        self.config.max_waves
    }

    pub fn is_boss_wave(&self) -> bool {
        self.boss_wave
    }

    pub fn is_last_wave(&self) -> bool {
        self.wave >= self.config.max_waves
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn delay_ticks(&self) -> u64 {
        self.delay_ticks
    }

    /// Advance to the next wave and queue its spawns. The first spawn comes
    /// one delay after `now`.
    pub fn start_next_wave(&mut self, now: u64) -> Result<u32, WaveError> {
        if self.is_last_wave() {
            return Err(WaveError::NoMoreWaves {
                max: self.config.max_waves,
            });
        }
        self.wave += 1;
        self.queue = self.generate_wave(self.wave);
        self.boss_wave = self.config.boss_for(self.wave).is_some();
        self.delay_ticks = self.config.spawn_delay_ticks(self.wave);
        self.last_spawn_tick = now;
        Ok(self.wave)
    }

    /// Spawn queue for `wave`: the boss alone, or a random regular batch.
    pub fn generate_wave(&mut self, wave: u32) -> VecDeque<SpawnDescriptor> {
        if let Some(boss) = self.config.boss_for(wave) {
            return VecDeque::from([boss]);
        }

        let count = match self.config.regular_cap {
            Some(cap) => wave.min(cap),
            None => wave,
        };
        let pool = self.config.pool_for(wave);
        (0..count)
            .filter_map(|_| pool.choose(&mut self.rng).copied())
            .map(SpawnDescriptor::new)
            .collect()
    }

    /// Next spawn if the inter-spawn delay has elapsed.
    pub fn pop_due_spawn(&mut self, now: u64) -> Option<SpawnDescriptor> {
        if now.saturating_sub(self.last_spawn_tick) < self.delay_ticks {
            return None;
        }
        let next = self.queue.pop_front()?;
        self.last_spawn_tick = now;
        Some(next)
    }

    /// Drop every pending spawn.
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boss_waves_are_singletons() {
        let mut director = WaveDirector::new(WaveConfig::default(), 1);
        let queue = director.generate_wave(30);
        assert_eq!(
            queue,
            VecDeque::from([SpawnDescriptor::staged(EnemyKind::Devastator, 3)])
        );
        let queue = director.generate_wave(50);
        assert_eq!(
            queue,
            VecDeque::from([SpawnDescriptor::staged(EnemyKind::Stormlord, 1)])
        );
    }

    #[test]
    fn regular_waves_capped() {
        let mut director = WaveDirector::new(WaveConfig::default(), 1);
        assert_eq!(director.generate_wave(3).len(), 3);
        assert_eq!(director.generate_wave(27).len(), 15);

        let uncapped = WaveConfig {
            regular_cap: None,
            ..WaveConfig::default()
        };
        let mut director = WaveDirector::new(uncapped, 1);
        assert_eq!(director.generate_wave(27).len(), 27);
    }

    #[test]
    fn pool_grows_with_wave() {
        let config = WaveConfig::default();
        assert_eq!(config.pool_for(10), vec![EnemyKind::Flyer]);
        assert_eq!(
            config.pool_for(11),
            vec![EnemyKind::Flyer, EnemyKind::Crystalback]
        );
        assert_eq!(config.pool_for(36).len(), 4);
    }

    #[test]
    fn early_waves_only_draw_flyers() {
        let mut director = WaveDirector::new(WaveConfig::default(), 9);
        assert!(director
            .generate_wave(7)
            .iter()
            .all(|desc| desc.kind == EnemyKind::Flyer));
    }

    #[test]
    fn delay_has_floor() {
        let config = WaveConfig::default();
        assert_eq!(config.spawn_delay_ticks(1), ms_to_ticks(990));
        assert_eq!(config.spawn_delay_ticks(49), ms_to_ticks(510));
        assert_eq!(config.spawn_delay_ticks(80), ms_to_ticks(500));
    }

    #[test]
    fn same_seed_same_waves() {
        let mut a = WaveDirector::new(WaveConfig::default(), 42);
        let mut b = WaveDirector::new(WaveConfig::default(), 42);
        assert_eq!(a.generate_wave(38), b.generate_wave(38));
    }

    #[test]
    fn spawns_paced_by_delay() {
        let mut director = WaveDirector::new(WaveConfig::default(), 3);
        assert_eq!(director.start_next_wave(100), Ok(1));
        let delay = director.delay_ticks();
        assert_eq!(director.pop_due_spawn(100 + delay - 1), None);
        assert!(director.pop_due_spawn(100 + delay).is_some());
        assert_eq!(director.pending(), 0);
        assert_eq!(director.pop_due_spawn(1000), None);
    }

    #[test]
    fn stops_at_last_wave() {
        let config = WaveConfig {
            max_waves: 2,
            ..WaveConfig::default()
        };
        let mut director = WaveDirector::new(config, 3);
        assert!(director.start_next_wave(0).is_ok());
        assert!(director.start_next_wave(0).is_ok());
        assert!(director.is_last_wave());
        assert_eq!(
            director.start_next_wave(0),
            Err(WaveError::NoMoreWaves { max: 2 })
        );
        assert_eq!(director.wave(), 2);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = WaveConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: WaveConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);

        let partial: WaveConfig = serde_json::from_str(r#"{"max_waves": 5}"#).unwrap();
        assert_eq!(partial.max_waves, 5);
        assert_eq!(partial.base_pool, vec![EnemyKind::Flyer]);
    }
}
