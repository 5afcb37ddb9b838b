//! Spawning system: pops due wave spawns into the world.

use hecs::World;
use tracing::{debug, warn};

use kaiju_core::enums::{GamePhase, SpawnOrigin};
use kaiju_core::events::GameEvent;
use kaiju_core::geometry::Path;

use crate::enemy::{Enemy, SpawnDescriptor, SpawnParams};
use crate::run::RunState;
use crate::wave::WaveDirector;

/// Spawn at most one due enemy while a wave is playing. A spawn that cannot
/// be instantiated drops the rest of the wave and returns to wave prep.
pub fn run(
    world: &mut World,
    path: &Path,
    waves: &mut WaveDirector,
    run: &mut RunState,
    events: &mut Vec<GameEvent>,
    current_tick: u64,
) {
    if run.phase != GamePhase::Playing {
        return;
    }
    let Some(desc) = waves.pop_due_spawn(current_tick) else {
        return;
    };

    let wave = waves.wave();
    let params = SpawnParams {
        wave,
        origin: SpawnOrigin::Wave,
        death_roster: waves.config().has_death_roster(wave),
        at: None,
    };
    match Enemy::spawn(desc, params, path) {
        Ok(enemy) => {
            debug!(kind = ?desc.kind, stage = enemy.variant.stage, wave, "enemy spawned");
            events.push(GameEvent::EnemySpawned {
                kind: enemy.kind(),
                stage: enemy.variant.stage,
            });
            world.spawn((enemy,));
        }
        Err(err) => {
            warn!(wave, %err, "spawn failed, dropping the rest of the wave");
            waves.clear();
            run.phase = GamePhase::WavePrep;
            events.push(GameEvent::SpawnFailed {
                wave,
                reason: err.to_string(),
            });
        }
    }
}

/// Spawn each descriptor with shared parameters, returning how many entered
/// the world. Used for summons and death rosters.
pub fn spawn_group(
    world: &mut World,
    path: &Path,
    descriptors: &[SpawnDescriptor],
    params: SpawnParams,
) -> u32 {
    let mut spawned = 0;
    for &desc in descriptors {
        match Enemy::spawn(desc, params, path) {
            Ok(enemy) => {
                world.spawn((enemy,));
                spawned += 1;
            }
            Err(err) => warn!(origin = ?params.origin, %err, "group spawn skipped"),
        }
    }
    spawned
}
