//! Wave progression: starting waves and detecting clears.

use hecs::World;
use tracing::{info, warn};

use kaiju_core::enums::GamePhase;
use kaiju_core::events::GameEvent;

use crate::economy;
use crate::enemy::Enemy;
use crate::run::RunState;
use crate::wave::{WaveDirector, WaveError};

/// Start the next wave from wave prep.
pub fn start_wave(
    waves: &mut WaveDirector,
    run: &mut RunState,
    events: &mut Vec<GameEvent>,
    current_tick: u64,
) -> Result<u32, WaveError> {
    if run.phase != GamePhase::WavePrep {
        return Err(WaveError::WrongPhase { phase: run.phase });
    }
    let wave = waves.start_next_wave(current_tick)?;
    let boss = waves.is_boss_wave();
    run.phase = GamePhase::Playing;
    info!(wave, boss, spawns = waves.pending(), "wave started");
    events.push(GameEvent::WaveStarted { wave, boss });
    Ok(wave)
}

/// Check for a cleared wave: no live enemies and nothing left to spawn.
pub fn run(
    world: &World,
    waves: &mut WaveDirector,
    run: &mut RunState,
    events: &mut Vec<GameEvent>,
    current_tick: u64,
) {
    if run.phase != GamePhase::Playing || waves.pending() > 0 {
        return;
    }
    if world.query::<&Enemy>().iter().next().is_some() {
        return;
    }

    let wave = waves.wave();
    if waves.is_last_wave() {
        run.phase = GamePhase::Victory;
        info!(wave, cash = run.cash, "final wave cleared");
        return;
    }

    let bonus = economy::wave_bonus(wave);
    run.credit(bonus);
    run.wave_bonus = Some(bonus);
    run.phase = GamePhase::WavePrep;
    info!(wave, bonus, "wave cleared");
    events.push(GameEvent::WaveCleared { wave, bonus });

    if run.auto_advance {
        if let Err(err) = start_wave(waves, run, events, current_tick) {
            warn!(%err, "auto-advance failed");
        }
    }
}
