//! Events emitted by the simulation for audio and UI feedback.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Discrete things that happened during a tick, drained into each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    PhaseChanged { phase: GamePhase },
    WaveStarted { wave: u32, boss: bool },
    /// Wave cleared; `bonus` was credited to currency.
    WaveCleared { wave: u32, bonus: u32 },
    /// A start-wave request was refused.
    WaveRejected { reason: String },
    /// A queued spawn could not be instantiated; the wave queue was dropped.
    SpawnFailed { wave: u32, reason: String },

    EnemySpawned { kind: EnemyKind, stage: u8 },
    EnemyKilled { kind: EnemyKind, reward: u32 },
    /// Enemy reached the end of the path.
    EnemyLeaked { kind: EnemyKind, damage: f64 },
    EnemiesSummoned { kind: EnemyKind, count: u32 },
    /// Death roster spawned from a dying enemy.
    ReplacementsSpawned { count: u32 },
    Roar { position: DVec2 },
    /// A status effect bounced off an immune enemy.
    EffectRejected { kind: EnemyKind, effect: StatusKind },

    BaseDamaged { damage: f64, remaining: f64 },

    TowerPlaced { kind: TowerKind, cost: u32 },
    TowerSold { kind: TowerKind, refund: u32 },
    TowerDestroyed { kind: TowerKind },
    PlacementRejected { reason: String },

    CrystalSpawned { position: DVec2 },
    CrystalCollected { value: u32 },
}
