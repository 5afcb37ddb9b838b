//! Enemy update system: reaping, abilities, movement and leaks.

use std::ops::ControlFlow;

use glam::DVec2;
use hecs::{Entity, World};
use tracing::{debug, info, trace};

use kaiju_core::enums::SpawnOrigin;
use kaiju_core::events::GameEvent;
use kaiju_core::geometry::Path;

use crate::economy;
use crate::enemy::{AbilityAction, Enemy, SpawnDescriptor, SpawnParams, StrikeReach};
use crate::projectile::Crystal;
use crate::run::RunState;
use crate::systems::spawning;
use crate::tower::Tower;

/// Update every enemy present at the start of the tick. Breaks as soon as
/// the base falls; nothing else should run that tick.
pub fn run(
    world: &mut World,
    path: &Path,
    run: &mut RunState,
    events: &mut Vec<GameEvent>,
    current_tick: u64,
) -> ControlFlow<()> {
    let entities: Vec<Entity> = world.query::<&Enemy>().iter().map(|(e, _)| e).collect();

    for entity in entities {
        // Reap enemies killed since the last pass and credit the reward.
        let dead = match world.get::<&Enemy>(entity) {
            Ok(enemy) if !enemy.alive => Some(enemy.variant),
            Ok(_) => None,
            Err(_) => continue,
        };
        if let Some(variant) = dead {
            let reward = economy::kill_reward(variant);
            run.credit(reward);
            debug!(kind = ?variant.kind, reward, "enemy killed");
            events.push(GameEvent::EnemyKilled {
                kind: variant.kind,
                reward,
            });
            let _ = world.despawn(entity);
            continue;
        }

        let (action, wave) = {
            let Ok(mut enemy) = world.get::<&mut Enemy>(entity) else {
                continue;
            };
            (enemy.tick_abilities(), enemy.wave)
        };
        if let Some(action) = action {
            apply_action(world, path, run, events, action, wave, current_tick)?;
        }

        let leaked = {
            let Ok(mut enemy) = world.get::<&mut Enemy>(entity) else {
                continue;
            };
            let reached_end = enemy.advance(path);
            enemy.decay_effects();
            reached_end.then_some((enemy.kind(), enemy.damage))
        };
        if let Some((kind, damage)) = leaked {
            let _ = world.despawn(entity);
            debug!(?kind, damage, "enemy reached the base");
            events.push(GameEvent::EnemyLeaked { kind, damage });
            damage_base(run, events, damage)?;
        }
    }
    ControlFlow::Continue(())
}

fn apply_action(
    world: &mut World,
    path: &Path,
    run: &mut RunState,
    events: &mut Vec<GameEvent>,
    action: AbilityAction,
    wave: u32,
    current_tick: u64,
) -> ControlFlow<()> {
    match action {
        AbilityAction::DamageBase { damage } => return damage_base(run, events, damage),
        AbilityAction::SpawnCrystal { position } => {
            world.spawn((Crystal::new(position, current_tick),));
            events.push(GameEvent::CrystalSpawned { position });
        }
        AbilityAction::SelfHeal { amount } => trace!(amount, "enemy regenerated"),
        AbilityAction::Strike {
            origin,
            damage,
            reach,
        } => strike_towers(world, events, origin, damage, reach),
        AbilityAction::Summon { at, kind, count } => {
            let group = vec![SpawnDescriptor::new(kind); count as usize];
            let params = SpawnParams {
                wave,
                origin: SpawnOrigin::Summoned,
                death_roster: false,
                at: Some(at),
            };
            let spawned = spawning::spawn_group(world, path, &group, params);
            if spawned > 0 {
                debug!(?kind, spawned, "enemies summoned");
                events.push(GameEvent::EnemiesSummoned {
                    kind,
                    count: spawned,
                });
            }
        }
        AbilityAction::Roar { position } => events.push(GameEvent::Roar { position }),
    }
    ControlFlow::Continue(())
}

fn damage_base(run: &mut RunState, events: &mut Vec<GameEvent>, damage: f64) -> ControlFlow<()> {
    let fallen = run.damage_base(damage);
    events.push(GameEvent::BaseDamaged {
        damage,
        remaining: run.base_hp,
    });
    if fallen {
        info!(base_hp = run.base_hp, "base destroyed");
        return ControlFlow::Break(());
    }
    ControlFlow::Continue(())
}

/// Damage towers hit by an enemy attack, removing destroyed ones.
pub fn strike_towers(
    world: &mut World,
    events: &mut Vec<GameEvent>,
    origin: DVec2,
    damage: f64,
    reach: StrikeReach,
) {
    let mut victims = Vec::new();
    let mut nearest: Option<(Entity, f64)> = None;
    for (entity, tower) in world.query::<&Tower>().iter() {
        let distance = tower.position.distance(origin);
        match reach {
            StrikeReach::Area { radius } if distance <= radius => victims.push(entity),
            StrikeReach::Nearest { radius } if distance <= radius => {
                if nearest.map_or(true, |(_, best)| distance < best) {
                    nearest = Some((entity, distance));
                }
            }
            _ => {}
        }
    }
    victims.extend(nearest.map(|(entity, _)| entity));

    for entity in victims {
        let destroyed = match world.get::<&mut Tower>(entity) {
            Ok(mut tower) => tower.take_damage(damage).then_some(tower.kind),
            Err(_) => None,
        };
        if let Some(kind) = destroyed {
            debug!(?kind, "tower destroyed");
            events.push(GameEvent::TowerDestroyed { kind });
            let _ = world.despawn(entity);
        }
    }
}
