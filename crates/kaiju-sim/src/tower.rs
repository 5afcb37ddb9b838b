//! Tower data model: targeting, fire cadence and emissions.

use glam::DVec2;
use hecs::{Entity, World};

use kaiju_core::constants::*;
use kaiju_core::enums::{ProjectileKind, SplashAim, StatusKind, TowerKind};

use crate::enemy::Enemy;
use crate::projectile::{Beam, HealZone, Payload, Projectile};
use crate::status::StatusPayload;

/// Per-kind tower parameters.
pub struct TowerProfile {
    pub damage: f64,
    /// Hit points restored per tick by the emitted heal zone (support only).
    pub heal_amount: f64,
    /// Targeting radius; also the heal radius for support towers.
    pub range: f64,
    /// Minimum ticks between shots.
    pub fire_rate_ticks: u64,
    pub cost: u32,
}

/// Get the profile for a given tower kind.
pub fn get_profile(kind: TowerKind) -> TowerProfile {
    match kind {
        TowerKind::Cannon => TowerProfile {
            damage: CANNON_DAMAGE,
            heal_amount: 0.0,
            range: CANNON_RANGE,
            fire_rate_ticks: CANNON_FIRE_TICKS,
            cost: CANNON_COST,
        },
        TowerKind::Maser => TowerProfile {
            damage: MASER_DAMAGE,
            heal_amount: 0.0,
            range: MASER_RANGE,
            fire_rate_ticks: MASER_FIRE_TICKS,
            cost: MASER_COST,
        },
        TowerKind::Launcher => TowerProfile {
            damage: LAUNCHER_DAMAGE,
            heal_amount: 0.0,
            range: LAUNCHER_RANGE,
            fire_rate_ticks: LAUNCHER_FIRE_TICKS,
            cost: LAUNCHER_COST,
        },
        TowerKind::Support => TowerProfile {
            damage: 0.0,
            heal_amount: SUPPORT_HEAL_AMOUNT,
            range: SUPPORT_RANGE,
            fire_rate_ticks: SUPPORT_FIRE_TICKS,
            cost: SUPPORT_COST,
        },
        TowerKind::Lancer => TowerProfile {
            damage: LANCER_DAMAGE,
            heal_amount: 0.0,
            range: LANCER_RANGE,
            fire_rate_ticks: LANCER_FIRE_TICKS,
            cost: LANCER_COST,
        },
    }
}

/// What a tower puts into the world when it fires.
#[derive(Debug, Clone, PartialEq)]
pub enum Emission {
    /// Point-seeking projectile (direct, status or splash payload).
    Projectile(Projectile),
    Beam(Beam),
    HealZone(HealZone),
}

/// A placed tower.
#[derive(Debug, Clone)]
pub struct Tower {
    pub kind: TowerKind,
    pub position: DVec2,
    pub damage: f64,
    pub heal_amount: f64,
    pub range: f64,
    pub fire_rate_ticks: u64,
    pub cost: u32,
    pub last_fire_tick: Option<u64>,
    /// Non-owning handle to the primary target, validated on use.
    pub target: Option<Entity>,
    /// Every alive enemy in range at the last acquisition (launchers only).
    pub in_range: Vec<Entity>,
    pub hit_points: f64,
    pub max_hit_points: f64,
    pub aim: SplashAim,
}

impl Tower {
    pub fn new(kind: TowerKind, position: DVec2, aim: SplashAim) -> Self {
        let profile = get_profile(kind);
        Self {
            kind,
            position,
            damage: profile.damage,
            heal_amount: profile.heal_amount,
            range: profile.range,
            fire_rate_ticks: profile.fire_rate_ticks,
            cost: profile.cost,
            last_fire_tick: None,
            target: None,
            in_range: Vec::new(),
            hit_points: TOWER_MAX_HP,
            max_hit_points: TOWER_MAX_HP,
            aim,
        }
    }

    /// Whether the cooldown since the last shot has elapsed.
    pub fn can_fire(&self, now: u64) -> bool {
        match self.last_fire_tick {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.fire_rate_ticks,
        }
    }

    fn tracks_all_in_range(&self) -> bool {
        self.kind == TowerKind::Launcher && self.aim == SplashAim::Centroid
    }

    /// Select the nearest alive enemy in range. Ties keep the first one found.
    pub fn acquire_target<'a>(
        &mut self,
        enemies: impl IntoIterator<Item = (Entity, &'a Enemy)>,
    ) -> Option<Entity> {
        self.in_range.clear();
        self.target = None;

        let track_all = self.tracks_all_in_range();
        let mut best: Option<(Entity, f64)> = None;
        for (entity, enemy) in enemies {
            if !enemy.alive {
                continue;
            }
            let distance = self.position.distance(enemy.position);
            if distance > self.range {
                continue;
            }
            if track_all {
                self.in_range.push(entity);
            }
            if best.map_or(true, |(_, nearest)| distance < nearest) {
                best = Some((entity, distance));
            }
        }

        self.target = best.map(|(entity, _)| entity);
        self.target
    }

    /// Position of `entity` if it is still alive and in range.
    fn resolve(&self, world: &World, entity: Entity) -> Option<DVec2> {
        let enemy = world.get::<&Enemy>(entity).ok()?;
        (enemy.alive && self.position.distance(enemy.position) <= self.range)
            .then_some(enemy.position)
    }

    /// Fire at the held target, resetting the cooldown. A missing or stale
    /// target yields nothing and leaves the cooldown untouched. Support
    /// towers need a target too, but center their heal zone on themselves.
    pub fn fire(&mut self, now: u64, world: &World) -> Option<Emission> {
        let target = self.target?;
        let Some(target_point) = self.resolve(world, target) else {
            self.target = None;
            return None;
        };
        self.last_fire_tick = Some(now);

        let emission = match self.kind {
            TowerKind::Cannon => Emission::Projectile(Projectile::new(
                ProjectileKind::Bolt,
                self.position,
                target_point,
                self.damage,
                BOLT_SPEED,
                Payload::Direct,
            )),
            TowerKind::Maser => Emission::Projectile(Projectile::new(
                ProjectileKind::Maser,
                self.position,
                target_point,
                self.damage,
                MASER_BOLT_SPEED,
                Payload::Status(StatusPayload {
                    kind: StatusKind::Slow,
                    magnitude: MASER_SLOW_MAGNITUDE,
                    duration_ticks: MASER_SLOW_TICKS,
                }),
            )),
            TowerKind::Launcher => {
                let aim_point = match self.aim {
                    SplashAim::Primary => target_point,
                    SplashAim::Centroid => self.centroid(world).unwrap_or(target_point),
                };
                Emission::Projectile(Projectile::new(
                    ProjectileKind::Missile,
                    self.position,
                    aim_point,
                    self.damage,
                    MISSILE_SPEED,
                    Payload::Splash {
                        radius: LAUNCHER_SPLASH_RADIUS,
                    },
                ))
            }
            TowerKind::Lancer => {
                let direction = (target_point - self.position).normalize_or_zero();
                let direction = if direction == DVec2::ZERO {
                    DVec2::X
                } else {
                    direction
                };
                Emission::Beam(Beam::new(
                    self.position,
                    self.position + direction * self.range,
                    self.damage,
                    LANCER_BEAM_WIDTH,
                    now,
                ))
            }
            TowerKind::Support => Emission::HealZone(HealZone::new(
                self.position,
                self.range,
                self.heal_amount,
                now,
            )),
        };
        Some(emission)
    }

    /// Mean position of the tracked in-range enemies still valid.
    fn centroid(&self, world: &World) -> Option<DVec2> {
        let points: Vec<DVec2> = self
            .in_range
            .iter()
            .filter_map(|&entity| self.resolve(world, entity))
            .collect();
        if points.is_empty() {
            return None;
        }
        Some(points.iter().copied().sum::<DVec2>() / points.len() as f64)
    }

    /// Subtract hit points. Returns true when the tower is destroyed.
    pub fn take_damage(&mut self, amount: f64) -> bool {
        self.hit_points -= amount;
        self.hit_points <= 0.0
    }

    pub fn heal(&mut self, amount: f64) {
        self.hit_points = (self.hit_points + amount).min(self.max_hit_points);
    }

    pub fn health_fraction(&self) -> f64 {
        (self.hit_points / self.max_hit_points).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemy::{EnemyStats, Variant};
    use kaiju_core::enums::EnemyKind;
    use kaiju_core::geometry::Path;

    fn path() -> Path {
        Path::from_points(&[(0.0, 0.0), (1000.0, 0.0)]).unwrap()
    }

    fn enemy_at(world: &mut World, x: f64, y: f64) -> Entity {
        let mut enemy = Enemy::new(
            Variant::basic(EnemyKind::Crystalback),
            EnemyStats::new(100.0, 1.0, 5.0),
            &path(),
        );
        enemy.position = DVec2::new(x, y);
        world.spawn((enemy,))
    }

    fn acquire(tower: &mut Tower, world: &World) -> Option<Entity> {
        let mut query = world.query::<&Enemy>();
        tower.acquire_target(query.iter())
    }

    #[test]
    fn cooldown_gates_fire() {
        let mut tower = Tower::new(TowerKind::Cannon, DVec2::ZERO, SplashAim::Primary);
        assert!(tower.can_fire(0));
        tower.last_fire_tick = Some(10);
        assert!(!tower.can_fire(69));
        assert!(tower.can_fire(70));
    }

    #[test]
    fn nearest_in_range_wins() {
        let mut world = World::new();
        let _far = enemy_at(&mut world, 90.0, 0.0);
        let near = enemy_at(&mut world, 30.0, 0.0);
        let _out = enemy_at(&mut world, 150.0, 0.0);
        let mut tower = Tower::new(TowerKind::Cannon, DVec2::ZERO, SplashAim::Primary);
        assert_eq!(acquire(&mut tower, &world), Some(near));
    }

    #[test]
    fn dead_enemies_ignored() {
        let mut world = World::new();
        let only = enemy_at(&mut world, 30.0, 0.0);
        world.get::<&mut Enemy>(only).unwrap().alive = false;
        let mut tower = Tower::new(TowerKind::Cannon, DVec2::ZERO, SplashAim::Primary);
        assert_eq!(acquire(&mut tower, &world), None);
    }

    #[test]
    fn no_target_is_no_op() {
        let world = World::new();
        let mut tower = Tower::new(TowerKind::Cannon, DVec2::ZERO, SplashAim::Primary);
        assert_eq!(tower.fire(5, &world), None);
        assert_eq!(tower.last_fire_tick, None);
    }

    #[test]
    fn stale_handle_is_safe() {
        let mut world = World::new();
        let target = enemy_at(&mut world, 30.0, 0.0);
        let mut tower = Tower::new(TowerKind::Cannon, DVec2::ZERO, SplashAim::Primary);
        acquire(&mut tower, &world);
        world.despawn(target).unwrap();
        assert_eq!(tower.fire(5, &world), None);
        assert_eq!(tower.target, None);
        assert!(tower.can_fire(5));
    }

    #[test]
    fn maser_carries_slow() {
        let mut world = World::new();
        enemy_at(&mut world, 50.0, 0.0);
        let mut tower = Tower::new(TowerKind::Maser, DVec2::ZERO, SplashAim::Primary);
        acquire(&mut tower, &world);
        match tower.fire(0, &world) {
            Some(Emission::Projectile(projectile)) => {
                assert_eq!(projectile.kind, ProjectileKind::Maser);
                assert!(matches!(projectile.payload, Payload::Status(p) if p.kind == StatusKind::Slow));
            }
            other => panic!("expected projectile, got {other:?}"),
        }
        assert_eq!(tower.last_fire_tick, Some(0));
    }

    #[test]
    fn beam_extends_to_full_range() {
        let mut world = World::new();
        enemy_at(&mut world, 0.0, 50.0);
        let mut tower = Tower::new(TowerKind::Lancer, DVec2::ZERO, SplashAim::Primary);
        acquire(&mut tower, &world);
        match tower.fire(3, &world) {
            Some(Emission::Beam(beam)) => {
                assert_eq!(beam.start, DVec2::ZERO);
                assert!((beam.end - DVec2::new(0.0, LANCER_RANGE)).length() < 1e-9);
                assert_eq!(beam.created_tick, 3);
            }
            other => panic!("expected beam, got {other:?}"),
        }
    }

    #[test]
    fn centroid_aim_averages_in_range() {
        let mut world = World::new();
        enemy_at(&mut world, 40.0, 0.0);
        enemy_at(&mut world, 80.0, 0.0);
        let mut tower = Tower::new(TowerKind::Launcher, DVec2::ZERO, SplashAim::Centroid);
        acquire(&mut tower, &world);
        assert_eq!(tower.in_range.len(), 2);
        match tower.fire(0, &world) {
            Some(Emission::Projectile(projectile)) => {
                assert_eq!(projectile.target_point, DVec2::new(60.0, 0.0));
            }
            other => panic!("expected missile, got {other:?}"),
        }
    }

    #[test]
    fn support_idle_without_enemies() {
        let world = World::new();
        let mut tower = Tower::new(TowerKind::Support, DVec2::new(5.0, 5.0), SplashAim::Primary);
        assert_eq!(acquire(&mut tower, &world), None);
        assert_eq!(tower.fire(0, &world), None);
        assert!(tower.can_fire(1));
    }

    #[test]
    fn support_heals_around_itself_when_enemy_in_range() {
        let mut world = World::new();
        let enemy = enemy_at(&mut world, 40.0, 5.0);
        let mut tower = Tower::new(TowerKind::Support, DVec2::new(5.0, 5.0), SplashAim::Primary);
        assert_eq!(acquire(&mut tower, &world), Some(enemy));
        match tower.fire(0, &world) {
            Some(Emission::HealZone(zone)) => {
                assert_eq!(zone.position, DVec2::new(5.0, 5.0));
                assert_eq!(zone.amount, SUPPORT_HEAL_AMOUNT);
                assert_eq!(zone.radius, SUPPORT_RANGE);
            }
            other => panic!("expected heal zone, got {other:?}"),
        }
        assert!(!tower.can_fire(1));
        assert_eq!(tower.damage, 0.0);
    }

    #[test]
    fn damage_and_heal_respect_bounds() {
        let mut tower = Tower::new(TowerKind::Cannon, DVec2::ZERO, SplashAim::Primary);
        assert!(!tower.take_damage(60.0));
        tower.heal(100.0);
        assert_eq!(tower.hit_points, TOWER_MAX_HP);
        assert!(tower.take_damage(150.0));
    }
}
