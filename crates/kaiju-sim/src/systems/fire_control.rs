//! Fire control system: towers retarget and fire, emissions enter the world.

use hecs::World;
use tracing::trace;

use crate::enemy::Enemy;
use crate::tower::{Emission, Tower};

/// Run fire control for one tick. Returns how many emissions were spawned.
pub fn run(world: &mut World, current_tick: u64) -> usize {
    let emissions = collect_emissions(world, current_tick);
    let count = emissions.len();

    for emission in emissions {
        match emission {
            Emission::Projectile(projectile) => {
                trace!(kind = ?projectile.kind, "projectile launched");
                world.spawn((projectile,));
            }
            Emission::Beam(beam) => {
                world.spawn((beam,));
            }
            Emission::HealZone(zone) => {
                world.spawn((zone,));
            }
        }
    }
    count
}

/// Every tower reacquires its nearest target; those off cooldown fire.
fn collect_emissions(world: &World, current_tick: u64) -> Vec<Emission> {
    let mut emissions = Vec::new();
    let mut towers = world.query::<&mut Tower>();
    for (_entity, tower) in towers.iter() {
        {
            let mut enemies = world.query::<&Enemy>();
            tower.acquire_target(enemies.iter());
        }
        if !tower.can_fire(current_tick) {
            continue;
        }
        if let Some(emission) = tower.fire(current_tick, world) {
            emissions.push(emission);
        }
    }
    emissions
}
