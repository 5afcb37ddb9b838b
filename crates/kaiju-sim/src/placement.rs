//! Tower placement validation and sell lookup.

use glam::DVec2;
use hecs::Entity;
use thiserror::Error;

use kaiju_core::constants::*;
use kaiju_core::enums::GamePhase;
use kaiju_core::geometry::{square_contains, square_overlaps_corridor, Path};

/// Why a tower cannot go where the player asked.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    #[error("towers cannot be placed during {phase:?}")]
    WrongPhase { phase: GamePhase },
    #[error("tower cap of {max} reached")]
    TowerCap { max: usize },
    #[error("footprint overlaps the enemy path")]
    OnPath,
    #[error("too close to another tower ({distance:.1} units)")]
    TooClose { distance: f64 },
    #[error("costs {cost}, only {cash} available")]
    InsufficientFunds { cost: u32, cash: u32 },
    #[error("position is not finite")]
    NonFinite,
}

/// Check a candidate tower center against the cap, the path corridor and
/// the existing towers. Each rule is checked independently.
pub fn can_place(
    position: DVec2,
    path: &Path,
    existing: &[DVec2],
    max_towers: usize,
) -> Result<(), PlacementError> {
    if !position.is_finite() {
        return Err(PlacementError::NonFinite);
    }
    if existing.len() >= max_towers {
        return Err(PlacementError::TowerCap { max: max_towers });
    }
    let on_path = path.segments().any(|(a, b)| {
        square_overlaps_corridor(position, TOWER_FOOTPRINT, a, b, PATH_CORRIDOR_WIDTH)
    });
    if on_path {
        return Err(PlacementError::OnPath);
    }
    if let Some(distance) = existing
        .iter()
        .map(|other| other.distance(position))
        .find(|&distance| distance < TOWER_MIN_SEPARATION)
    {
        return Err(PlacementError::TooClose { distance });
    }
    Ok(())
}

/// First tower whose footprint contains `point`.
pub fn find_tower_at(
    point: DVec2,
    towers: impl IntoIterator<Item = (Entity, DVec2)>,
) -> Option<Entity> {
    towers
        .into_iter()
        .find(|&(_, center)| square_contains(center, TOWER_FOOTPRINT, point))
        .map(|(entity, _)| entity)
}
