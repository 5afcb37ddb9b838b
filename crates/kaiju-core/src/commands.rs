//! Player intents sent from the frontend to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Run control ---
    /// Leave the menu: resume a suspended run or begin a fresh one.
    StartGame,
    /// Suspend the run and show the menu (escape).
    ReturnToMenu,
    /// Start the next wave (only between waves).
    StartWave,
    /// Toggle automatic start of the next wave after a clear.
    ToggleAutoAdvance,

    // --- Building ---
    /// Buy and place a tower centered at (x, y).
    PlaceTower { kind: TowerKind, x: f64, y: f64 },
    /// Sell the tower whose footprint contains (x, y).
    SellTower { x: f64, y: f64 },

    // --- Pickups ---
    /// Collect a dropped crystal near (x, y).
    CollectCrystal { x: f64, y: f64 },
}
