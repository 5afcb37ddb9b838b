//! Projectiles and timed zone effects.
//!
//! Projectiles travel to a fixed point and report impact; the impact system
//! resolves hits. Beams, heal zones and crystals are purely time-based.

use glam::DVec2;

use kaiju_core::constants::*;
use kaiju_core::enums::ProjectileKind;
use kaiju_core::geometry::distance_to_segment;

use crate::status::StatusPayload;

/// What a projectile does to the enemy it hits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payload {
    Direct,
    Status(StatusPayload),
    /// Reduced damage to every other enemy within `radius` of the primary hit.
    Splash { radius: f64 },
}

/// A point-seeking projectile.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub position: DVec2,
    pub target_point: DVec2,
    pub damage: f64,
    /// Units per tick.
    pub speed: f64,
    pub payload: Payload,
    pub active: bool,
}

impl Projectile {
    pub fn new(
        kind: ProjectileKind,
        origin: DVec2,
        target_point: DVec2,
        damage: f64,
        speed: f64,
        payload: Payload,
    ) -> Self {
        Self {
            kind,
            position: origin,
            target_point,
            damage,
            speed,
            payload,
            active: true,
        }
    }

    /// Move toward the target point. Returns true on the step that arrives,
    /// snapping onto the target and deactivating.
    pub fn advance(&mut self) -> bool {
        if !self.active {
            return false;
        }
        let to_target = self.target_point - self.position;
        let distance = to_target.length();
        if distance <= self.speed {
            self.position = self.target_point;
            self.active = false;
            return true;
        }
        self.position += to_target / distance * self.speed;
        false
    }
}

/// A line segment dealing damage every tick while active.
#[derive(Debug, Clone, PartialEq)]
pub struct Beam {
    pub start: DVec2,
    pub end: DVec2,
    /// Nominal damage; each active tick deals a fraction of it.
    pub damage: f64,
    pub width: f64,
    pub created_tick: u64,
    pub duration_ticks: u64,
}

impl Beam {
    pub fn new(start: DVec2, end: DVec2, damage: f64, width: f64, now: u64) -> Self {
        Self {
            start,
            end,
            damage,
            width,
            created_tick: now,
            duration_ticks: BEAM_DURATION_TICKS,
        }
    }

    pub fn is_active(&self, now: u64) -> bool {
        now.saturating_sub(self.created_tick) < self.duration_ticks
    }

    pub fn damage_per_tick(&self) -> f64 {
        self.damage * BEAM_DAMAGE_FRACTION
    }

    /// Whether an enemy hit box centered at `point` touches the beam.
    pub fn intersects(&self, point: DVec2) -> bool {
        distance_to_segment(point, self.start, self.end) <= (self.width + ENEMY_HITBOX) * 0.5
    }
}

/// A circle restoring tower hit points every tick while active.
#[derive(Debug, Clone, PartialEq)]
pub struct HealZone {
    pub position: DVec2,
    pub radius: f64,
    /// Hit points granted per active tick.
    pub amount: f64,
    pub created_tick: u64,
    pub duration_ticks: u64,
}

impl HealZone {
    pub fn new(position: DVec2, radius: f64, amount: f64, now: u64) -> Self {
        Self {
            position,
            radius,
            amount,
            created_tick: now,
            duration_ticks: HEAL_ZONE_DURATION_TICKS,
        }
    }

    pub fn is_active(&self, now: u64) -> bool {
        now.saturating_sub(self.created_tick) < self.duration_ticks
    }

    pub fn covers(&self, point: DVec2) -> bool {
        self.position.distance(point) <= self.radius
    }
}

/// A collectable pickup dropped by crystal-spawning enemies.
#[derive(Debug, Clone, PartialEq)]
pub struct Crystal {
    pub position: DVec2,
    pub value: u32,
    pub expires_at_tick: u64,
}

impl Crystal {
    pub fn new(position: DVec2, now: u64) -> Self {
        Self {
            position,
            value: CRYSTAL_VALUE,
            expires_at_tick: now + CRYSTAL_LIFETIME_TICKS,
        }
    }

    pub fn is_expired(&self, now: u64) -> bool {
        now >= self.expires_at_tick
    }

    pub fn in_pickup_range(&self, point: DVec2) -> bool {
        self.position.distance(point) <= CRYSTAL_PICKUP_RADIUS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projectile_snaps_on_impact() {
        let mut bolt = Projectile::new(
            ProjectileKind::Bolt,
            DVec2::ZERO,
            DVec2::new(25.0, 0.0),
            10.0,
            10.0,
            Payload::Direct,
        );
        assert!(!bolt.advance());
        assert!(!bolt.advance());
        assert!(bolt.advance());
        assert_eq!(bolt.position, DVec2::new(25.0, 0.0));
        assert!(!bolt.active);
        assert!(!bolt.advance());
    }

    #[test]
    fn beam_lives_for_its_duration() {
        let beam = Beam::new(DVec2::ZERO, DVec2::new(100.0, 0.0), 45.0, 10.0, 100);
        assert!(beam.is_active(100));
        assert!(beam.is_active(109));
        assert!(!beam.is_active(110));
        let total: f64 = (100..120)
            .filter(|&t| beam.is_active(t))
            .map(|_| beam.damage_per_tick())
            .sum();
        assert!((total - 45.0).abs() < 1e-9);
    }

    #[test]
    fn beam_hits_within_half_widths() {
        let beam = Beam::new(DVec2::ZERO, DVec2::new(100.0, 0.0), 45.0, 10.0, 0);
        assert!(beam.intersects(DVec2::new(50.0, 25.0)));
        assert!(!beam.intersects(DVec2::new(50.0, 25.5)));
    }

    #[test]
    fn crystal_expires() {
        let crystal = Crystal::new(DVec2::new(10.0, 10.0), 5);
        assert!(!crystal.is_expired(5 + CRYSTAL_LIFETIME_TICKS - 1));
        assert!(crystal.is_expired(5 + CRYSTAL_LIFETIME_TICKS));
        assert!(crystal.in_pickup_range(DVec2::new(25.0, 10.0)));
        assert!(!crystal.in_pickup_range(DVec2::new(40.0, 10.0)));
    }
}
