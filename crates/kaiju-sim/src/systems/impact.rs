//! Impact system: projectile flight and hits, beams, heal zones, crystals.
//!
//! Hits go through `Enemy::take_damage` and `Enemy::apply_status_effect`
//! only. Kills are left in the world with `alive == false`; the enemy
//! system reaps them and credits the reward on its next pass.

use glam::DVec2;
use hecs::{Entity, World};
use tracing::{debug, warn};

use kaiju_core::constants::*;
use kaiju_core::enums::SpawnOrigin;
use kaiju_core::events::GameEvent;
use kaiju_core::geometry::{squares_overlap, Path};

use crate::enemy::{DamageOutcome, EffectError, Enemy, SpawnParams};
use crate::projectile::{Beam, Crystal, HealZone, Payload, Projectile};
use crate::systems::spawning;
use crate::tower::Tower;

/// Run the impact system for one tick.
pub fn run(world: &mut World, path: &Path, events: &mut Vec<GameEvent>, current_tick: u64) {
    advance_projectiles(world, path, events);
    apply_beams(world, path, events, current_tick);
    apply_heal_zones(world, current_tick);
    expire_crystals(world, current_tick);
}

fn advance_projectiles(world: &mut World, path: &Path, events: &mut Vec<GameEvent>) {
    let mut impacts = Vec::new();
    for (entity, projectile) in world.query_mut::<&mut Projectile>() {
        if projectile.advance() {
            impacts.push((entity, projectile.clone()));
        }
    }

    for (entity, projectile) in impacts {
        resolve_impact(world, path, events, &projectile);
        let _ = world.despawn(entity);
    }
}

/// Resolve one impact against the first live enemy whose hit box overlaps
/// the projectile's.
pub fn resolve_impact(
    world: &mut World,
    path: &Path,
    events: &mut Vec<GameEvent>,
    projectile: &Projectile,
) {
    let primary = world
        .query::<&Enemy>()
        .iter()
        .find(|(_, enemy)| {
            enemy.alive
                && squares_overlap(
                    enemy.position,
                    ENEMY_HITBOX,
                    projectile.position,
                    PROJECTILE_HITBOX,
                )
        })
        .map(|(entity, enemy)| (entity, enemy.position));
    let Some((primary, center)) = primary else {
        return;
    };

    damage_enemy(world, path, events, primary, projectile.damage);

    match projectile.payload {
        Payload::Direct => {}
        Payload::Status(status) => {
            let result = match world.get::<&mut Enemy>(primary) {
                Ok(mut enemy) if enemy.alive => {
                    enemy.apply_status_effect(status.kind, status.magnitude, status.duration_ticks)
                }
                _ => Ok(()),
            };
            match result {
                Ok(()) => {}
                Err(EffectError::Immune { enemy, effect }) => {
                    events.push(GameEvent::EffectRejected {
                        kind: enemy,
                        effect,
                    });
                }
                Err(err) => warn!(%err, "status effect rejected"),
            }
        }
        Payload::Splash { radius } => {
            let splash_damage = projectile.damage * SPLASH_DAMAGE_FACTOR;
            for entity in enemies_near(world, center, radius, Some(primary)) {
                damage_enemy(world, path, events, entity, splash_damage);
            }
        }
    }
}

/// Live enemies within `radius` of `center`, optionally excluding one.
fn enemies_near(
    world: &World,
    center: DVec2,
    radius: f64,
    exclude: Option<Entity>,
) -> Vec<Entity> {
    world
        .query::<&Enemy>()
        .iter()
        .filter(|&(entity, enemy)| {
            Some(entity) != exclude && enemy.alive && enemy.position.distance(center) <= radius
        })
        .map(|(entity, _)| entity)
        .collect()
}

/// Damage one enemy; a kill with a death roster spawns the replacements at
/// its last position and path cursor.
pub fn damage_enemy(
    world: &mut World,
    path: &Path,
    events: &mut Vec<GameEvent>,
    entity: Entity,
    amount: f64,
) {
    let (outcome, kind, wave, cursor) = {
        let Ok(mut enemy) = world.get::<&mut Enemy>(entity) else {
            return;
        };
        let outcome = enemy.take_damage(amount);
        (outcome, enemy.kind(), enemy.wave, enemy.cursor())
    };

    let DamageOutcome::Killed { replacements } = outcome else {
        return;
    };
    debug!(?kind, "killing blow");
    if replacements.is_empty() {
        return;
    }
    let params = SpawnParams {
        wave,
        origin: SpawnOrigin::Replacement,
        death_roster: false,
        at: Some(cursor),
    };
    let count = spawning::spawn_group(world, path, &replacements, params);
    debug!(?kind, count, "death roster spawned");
    events.push(GameEvent::ReplacementsSpawned { count });
}

fn apply_beams(world: &mut World, path: &Path, events: &mut Vec<GameEvent>, current_tick: u64) {
    let beams: Vec<(Entity, Beam)> = world
        .query::<&Beam>()
        .iter()
        .map(|(entity, beam)| (entity, beam.clone()))
        .collect();

    for (entity, beam) in beams {
        if !beam.is_active(current_tick) {
            let _ = world.despawn(entity);
            continue;
        }
        let hits: Vec<Entity> = world
            .query::<&Enemy>()
            .iter()
            .filter(|(_, enemy)| enemy.alive && beam.intersects(enemy.position))
            .map(|(entity, _)| entity)
            .collect();
        for target in hits {
            damage_enemy(world, path, events, target, beam.damage_per_tick());
        }
    }
}

fn apply_heal_zones(world: &mut World, current_tick: u64) {
    let zones: Vec<(Entity, HealZone)> = world
        .query::<&HealZone>()
        .iter()
        .map(|(entity, zone)| (entity, zone.clone()))
        .collect();

    for (entity, zone) in zones {
        if !zone.is_active(current_tick) {
            let _ = world.despawn(entity);
            continue;
        }
        for (_tower_entity, tower) in world.query_mut::<&mut Tower>() {
            if zone.covers(tower.position) {
                tower.heal(zone.amount);
            }
        }
    }
}

fn expire_crystals(world: &mut World, current_tick: u64) {
    let expired: Vec<Entity> = world
        .query::<&Crystal>()
        .iter()
        .filter(|(_, crystal)| crystal.is_expired(current_tick))
        .map(|(entity, _)| entity)
        .collect();
    for entity in expired {
        let _ = world.despawn(entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemy::{EnemyStats, Variant};
    use kaiju_core::enums::{EnemyKind, ProjectileKind, StatusKind};

    fn path() -> Path {
        Path::from_points(&[(0.0, 0.0), (1000.0, 0.0)]).unwrap()
    }

    fn enemy_at(world: &mut World, kind: EnemyKind, x: f64, y: f64) -> Entity {
        let mut enemy = Enemy::new(Variant::basic(kind), EnemyStats::new(100.0, 1.0, 5.0), &path());
        enemy.position = DVec2::new(x, y);
        world.spawn((enemy,))
    }

    fn hit_points(world: &World, entity: Entity) -> f64 {
        world.get::<&Enemy>(entity).unwrap().hit_points
    }

    #[test]
    fn splash_halves_damage_within_radius() {
        let mut world = World::new();
        let a = enemy_at(&mut world, EnemyKind::Crystalback, 100.0, 100.0);
        let b = enemy_at(&mut world, EnemyKind::Crystalback, 140.0, 100.0);
        let c = enemy_at(&mut world, EnemyKind::Crystalback, 100.0, 160.0);
        let mut missile = Projectile::new(
            ProjectileKind::Missile,
            DVec2::new(100.0, 100.0),
            DVec2::new(100.0, 100.0),
            20.0,
            8.0,
            Payload::Splash { radius: 50.0 },
        );
        assert!(missile.advance());

        let mut events = Vec::new();
        resolve_impact(&mut world, &path(), &mut events, &missile);
        assert_eq!(hit_points(&world, a), 80.0);
        assert_eq!(hit_points(&world, b), 90.0);
        assert_eq!(hit_points(&world, c), 100.0);
    }

    #[test]
    fn only_first_overlap_is_primary() {
        let mut world = World::new();
        let a = enemy_at(&mut world, EnemyKind::Crystalback, 100.0, 100.0);
        let b = enemy_at(&mut world, EnemyKind::Crystalback, 105.0, 100.0);
        let bolt = Projectile::new(
            ProjectileKind::Bolt,
            DVec2::new(102.0, 100.0),
            DVec2::new(102.0, 100.0),
            10.0,
            10.0,
            Payload::Direct,
        );
        let mut events = Vec::new();
        resolve_impact(&mut world, &path(), &mut events, &bolt);
        let damaged = [a, b]
            .iter()
            .filter(|&&e| hit_points(&world, e) < 100.0)
            .count();
        assert_eq!(damaged, 1);
    }

    #[test]
    fn immune_enemy_reports_rejection() {
        let mut world = World::new();
        let flyer = enemy_at(&mut world, EnemyKind::Flyer, 50.0, 50.0);
        let maser = Projectile::new(
            ProjectileKind::Maser,
            DVec2::new(50.0, 50.0),
            DVec2::new(50.0, 50.0),
            5.0,
            15.0,
            Payload::Status(crate::status::StatusPayload {
                kind: StatusKind::Slow,
                magnitude: 0.5,
                duration_ticks: 120,
            }),
        );
        let mut events = Vec::new();
        resolve_impact(&mut world, &path(), &mut events, &maser);
        assert_eq!(hit_points(&world, flyer), 95.0);
        assert!(world.get::<&Enemy>(flyer).unwrap().effects.is_empty());
        assert_eq!(
            events,
            vec![GameEvent::EffectRejected {
                kind: EnemyKind::Flyer,
                effect: StatusKind::Slow
            }]
        );
    }

    #[test]
    fn miss_hits_nothing() {
        let mut world = World::new();
        let a = enemy_at(&mut world, EnemyKind::Crystalback, 100.0, 100.0);
        let bolt = Projectile::new(
            ProjectileKind::Bolt,
            DVec2::new(200.0, 100.0),
            DVec2::new(200.0, 100.0),
            10.0,
            10.0,
            Payload::Direct,
        );
        let mut events = Vec::new();
        resolve_impact(&mut world, &path(), &mut events, &bolt);
        assert_eq!(hit_points(&world, a), 100.0);
    }

    #[test]
    fn beam_ticks_then_expires() {
        let mut world = World::new();
        let a = enemy_at(&mut world, EnemyKind::Crystalback, 50.0, 0.0);
        world.spawn((Beam::new(DVec2::ZERO, DVec2::new(200.0, 0.0), 45.0, 10.0, 0),));
        let mut events = Vec::new();
        for tick in 0..=BEAM_DURATION_TICKS {
            run(&mut world, &path(), &mut events, tick);
        }
        assert!((hit_points(&world, a) - 55.0).abs() < 1e-9);
        assert_eq!(world.query::<&Beam>().iter().count(), 0);
    }

    #[test]
    fn heal_zone_restores_towers_in_radius() {
        use kaiju_core::enums::{SplashAim, TowerKind};
        let mut world = World::new();
        let mut near = Tower::new(TowerKind::Cannon, DVec2::new(10.0, 0.0), SplashAim::Primary);
        near.hit_points = 50.0;
        let mut far = Tower::new(TowerKind::Cannon, DVec2::new(500.0, 0.0), SplashAim::Primary);
        far.hit_points = 50.0;
        let near = world.spawn((near,));
        let far = world.spawn((far,));
        world.spawn((HealZone::new(DVec2::ZERO, 100.0, 15.0, 0),));

        let mut events = Vec::new();
        run(&mut world, &path(), &mut events, 0);
        run(&mut world, &path(), &mut events, 1);
        assert_eq!(world.get::<&Tower>(near).unwrap().hit_points, 80.0);
        assert_eq!(world.get::<&Tower>(far).unwrap().hit_points, 50.0);
    }
}
