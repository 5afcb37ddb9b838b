//! Run-level state mutated by the systems and by player actions.

use serde::{Deserialize, Serialize};

use kaiju_core::enums::GamePhase;

/// Currency, base health and the run phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub phase: GamePhase,
    pub cash: u32,
    pub base_hp: f64,
    pub auto_advance: bool,
    /// Bonus from the latest wave clear, until the next snapshot takes it.
    pub wave_bonus: Option<u32>,
}

impl RunState {
    pub fn new(cash: u32, base_hp: f64, auto_advance: bool) -> Self {
        Self {
            phase: GamePhase::Menu,
            cash,
            base_hp,
            auto_advance,
            wave_bonus: None,
        }
    }

    /// Subtract base hit points. Returns true when the base has fallen,
    /// in which case the phase is already `GameOver`.
    pub fn damage_base(&mut self, damage: f64) -> bool {
        self.base_hp -= damage;
        if self.base_hp <= 0.0 {
            self.phase = GamePhase::GameOver;
            return true;
        }
        false
    }

    pub fn credit(&mut self, amount: u32) {
        self.cash = self.cash.saturating_add(amount);
    }

    /// Deduct `amount` if affordable.
    pub fn try_spend(&mut self, amount: u32) -> bool {
        match self.cash.checked_sub(amount) {
            Some(rest) => {
                self.cash = rest;
                true
            }
            None => false,
        }
    }
}
