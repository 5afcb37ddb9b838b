//! Game state snapshot: the complete visible state handed to the frontend each tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::SimTime;

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub run: RunView,
    pub enemies: Vec<EnemyView>,
    pub towers: Vec<TowerView>,
    pub projectiles: Vec<ProjectileView>,
    pub beams: Vec<BeamView>,
    pub heal_zones: Vec<HealZoneView>,
    pub crystals: Vec<CrystalView>,
    pub events: Vec<GameEvent>,
}

/// Run-level state for the HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunView {
    pub phase: GamePhase,
    pub cash: u32,
    pub base_hp: f64,
    pub wave: u32,
    pub max_waves: u32,
    pub boss_wave: bool,
    pub auto_advance: bool,
    pub tower_count: usize,
    pub max_towers: usize,
    pub pending_spawns: usize,
    /// Wave-completion bonus awarded since the previous snapshot (reported once).
    pub wave_bonus: Option<u32>,
}

/// A live enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u64,
    pub kind: EnemyKind,
    pub stage: u8,
    pub boss: bool,
    pub position: DVec2,
    /// Current hit points over max (may be negative for the tick a kill lands).
    pub health_fraction: f64,
    pub alive: bool,
    /// Fraction of the path covered (0.0 - 1.0).
    pub progress: f64,
    pub slowed: bool,
}

/// A placed tower.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerView {
    pub id: u64,
    pub kind: TowerKind,
    pub position: DVec2,
    pub range: f64,
    pub last_fire_tick: Option<u64>,
    pub health_fraction: f64,
}

/// A travelling projectile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub kind: ProjectileKind,
    pub position: DVec2,
    pub active: bool,
}

/// An active beam segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamView {
    pub start: DVec2,
    pub end: DVec2,
    pub width: f64,
    pub active: bool,
}

/// An active heal zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealZoneView {
    pub position: DVec2,
    pub radius: f64,
    pub active: bool,
}

/// A collectable crystal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrystalView {
    pub position: DVec2,
    pub expires_at_tick: u64,
}
