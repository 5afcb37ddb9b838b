//! Timed status effects attached to an enemy.

use std::collections::BTreeMap;

use kaiju_core::enums::StatusKind;
use serde::{Deserialize, Serialize};

/// One active effect: how strong, and for how many more ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub magnitude: f64,
    pub remaining_ticks: u32,
}

/// A status effect to inflict, as carried by a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusPayload {
    pub kind: StatusKind,
    pub magnitude: f64,
    pub duration_ticks: u32,
}

/// Active effects keyed by kind. Re-applying a kind refreshes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusEffects {
    active: BTreeMap<StatusKind, StatusEffect>,
}

impl StatusEffects {
    /// Install or refresh an effect. A zero duration removes it.
    pub fn insert(&mut self, kind: StatusKind, magnitude: f64, duration_ticks: u32) {
        if duration_ticks == 0 {
            self.active.remove(&kind);
            return;
        }
        self.active.insert(
            kind,
            StatusEffect {
                magnitude,
                remaining_ticks: duration_ticks,
            },
        );
    }

    pub fn get(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.active.get(&kind)
    }

    pub fn contains(&self, kind: StatusKind) -> bool {
        self.active.contains_key(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Multiplier applied to movement speed: `1 - slow magnitude`, clamped to `0..=1`.
    pub fn speed_factor(&self) -> f64 {
        self.get(StatusKind::Slow)
            .map(|slow| (1.0 - slow.magnitude).clamp(0.0, 1.0))
            .unwrap_or(1.0)
    }

    /// Count every effect down by one tick, dropping the expired ones.
    pub fn tick(&mut self) {
        self.active.retain(|_, effect| {
            effect.remaining_ticks = effect.remaining_ticks.saturating_sub(1);
            effect.remaining_ticks > 0
        });
    }
}
