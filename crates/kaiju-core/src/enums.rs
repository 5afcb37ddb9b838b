//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Overall run phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, or a suspended run.
    #[default]
    Menu,
    /// Between waves: towers may be placed, the next wave may be started.
    WavePrep,
    /// A wave is spawning or still has live enemies.
    Playing,
    /// Base hit points exhausted.
    GameOver,
    /// Final wave cleared.
    Victory,
}

impl GamePhase {
    /// Whether entity systems advance in this phase.
    pub fn is_running(self) -> bool {
        matches!(self, GamePhase::WavePrep | GamePhase::Playing)
    }

    /// Whether the run has ended.
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// Enemy variant tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Fast, fragile flying unit. Immune to slow.
    Flyer,
    /// Tanky unit that periodically drops a collectable crystal.
    Crystalback,
    /// Slow unit that regenerates a fixed amount on a fixed period.
    Regenerator,
    /// Ranged attacker with periodic lightning; has a boss configuration.
    Stormlord,
    /// Multi-stage boss whose stats and special ability scale with stage.
    Devastator,
}

/// Tower variant tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowerKind {
    /// Fast-firing single-target direct damage.
    Cannon,
    /// Slow-firing single target that also slows.
    Maser,
    /// Splash damage around the impact.
    Launcher,
    /// Non-damaging; heals nearby towers.
    Support,
    /// High-damage, slow-firing beam.
    Lancer,
}

/// Kind of timed status effect on an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatusKind {
    /// Multiplicative movement speed reduction.
    Slow,
}

/// Where a splash tower aims its missile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplashAim {
    /// At the nearest in-range enemy.
    #[default]
    Primary,
    /// At the centroid of every in-range enemy.
    Centroid,
}

/// Travelling projectile variant, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    Bolt,
    Maser,
    Missile,
}

/// How an enemy entered the field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnOrigin {
    /// Popped from the wave queue.
    #[default]
    Wave,
    /// Summoned by a boss ability.
    Summoned,
    /// Spawned from a dying enemy's death roster.
    Replacement,
}
