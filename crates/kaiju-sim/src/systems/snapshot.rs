//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only and never modifies the world.

use hecs::World;

use kaiju_core::enums::StatusKind;
use kaiju_core::events::GameEvent;
use kaiju_core::geometry::Path;
use kaiju_core::state::*;
use kaiju_core::types::SimTime;

use crate::enemy::Enemy;
use crate::projectile::{Beam, Crystal, HealZone, Projectile};
use crate::tower::Tower;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    path: &Path,
    run: RunView,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        run,
        enemies: build_enemies(world, path),
        towers: build_towers(world),
        projectiles: build_projectiles(world),
        beams: build_beams(world, time.tick),
        heal_zones: build_heal_zones(world, time.tick),
        crystals: build_crystals(world),
        events,
    }
}

fn build_enemies(world: &World, path: &Path) -> Vec<EnemyView> {
    world
        .query::<&Enemy>()
        .iter()
        .map(|(entity, enemy)| EnemyView {
            id: entity.to_bits().get(),
            kind: enemy.kind(),
            stage: enemy.variant.stage,
            boss: enemy.variant.boss,
            position: enemy.position,
            health_fraction: enemy.health_fraction(),
            alive: enemy.alive,
            progress: path.progress(enemy.path_index, enemy.position),
            slowed: enemy.effects.contains(StatusKind::Slow),
        })
        .collect()
}

fn build_towers(world: &World) -> Vec<TowerView> {
    world
        .query::<&Tower>()
        .iter()
        .map(|(entity, tower)| TowerView {
            id: entity.to_bits().get(),
            kind: tower.kind,
            position: tower.position,
            range: tower.range,
            last_fire_tick: tower.last_fire_tick,
            health_fraction: tower.health_fraction(),
        })
        .collect()
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<&Projectile>()
        .iter()
        .map(|(_, projectile)| ProjectileView {
            kind: projectile.kind,
            position: projectile.position,
            active: projectile.active,
        })
        .collect()
}

fn build_beams(world: &World, tick: u64) -> Vec<BeamView> {
    world
        .query::<&Beam>()
        .iter()
        .map(|(_, beam)| BeamView {
            start: beam.start,
            end: beam.end,
            width: beam.width,
            active: beam.is_active(tick),
        })
        .collect()
}

fn build_heal_zones(world: &World, tick: u64) -> Vec<HealZoneView> {
    world
        .query::<&HealZone>()
        .iter()
        .map(|(_, zone)| HealZoneView {
            position: zone.position,
            radius: zone.radius,
            active: zone.is_active(tick),
        })
        .collect()
}

fn build_crystals(world: &World) -> Vec<CrystalView> {
    world
        .query::<&Crystal>()
        .iter()
        .map(|(_, crystal)| CrystalView {
            position: crystal.position,
            expires_at_tick: crystal.expires_at_tick,
        })
        .collect()
}

