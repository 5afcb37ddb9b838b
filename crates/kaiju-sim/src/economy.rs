//! Rewards, refunds and wave bonuses.

use kaiju_core::constants::*;
use kaiju_core::enums::EnemyKind;

use crate::enemy::Variant;

/// Cash credited when an enemy of this variant dies.
pub fn kill_reward(variant: Variant) -> u32 {
    match variant.kind {
        EnemyKind::Flyer => FLYER_REWARD,
        EnemyKind::Crystalback => CRYSTALBACK_REWARD,
        EnemyKind::Regenerator => REGENERATOR_REWARD,
        EnemyKind::Stormlord => STORMLORD_REWARD,
        EnemyKind::Devastator => DEVASTATOR_REWARD_PER_STAGE * variant.stage as u32,
    }
}

/// Bonus for clearing `wave`: steps up every [`WAVE_BONUS_STEP`] waves.
pub fn wave_bonus(wave: u32) -> u32 {
    WAVE_BONUS_PER_STEP * (wave / WAVE_BONUS_STEP + 1)
}

/// Half the purchase cost, rounded down.
pub fn sell_refund(cost: u32) -> u32 {
    cost / 2
}
