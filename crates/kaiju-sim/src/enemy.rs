//! Enemy data model and per-variant behavior.
//!
//! One shared record for every enemy; the [`Variant`] tag selects stats,
//! immunities, ability timers and death rosters.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use kaiju_core::constants::*;
use kaiju_core::enums::{EnemyKind, SpawnOrigin, StatusKind};
use kaiju_core::geometry::Path;

use crate::status::StatusEffects;

/// A queued request to spawn one enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnDescriptor {
    pub kind: EnemyKind,
    /// Devastator stage (1..=4), or `Some(1)` for the Stormlord boss form.
    #[serde(default)]
    pub stage: Option<u8>,
}

impl SpawnDescriptor {
    pub fn new(kind: EnemyKind) -> Self {
        Self { kind, stage: None }
    }

    pub fn staged(kind: EnemyKind, stage: u8) -> Self {
        Self {
            kind,
            stage: Some(stage),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpawnError {
    #[error("{kind:?} has no stage {stage}")]
    InvalidStage { kind: EnemyKind, stage: u8 },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EffectError {
    #[error("{enemy:?} is immune to {effect:?}")]
    Immune { enemy: EnemyKind, effect: StatusKind },
    #[error("effect magnitude {magnitude} is not a finite non-negative number")]
    InvalidMagnitude { magnitude: f64 },
}

/// Resolved variant: kind plus stage and boss configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub kind: EnemyKind,
    /// 1 for unstaged kinds.
    pub stage: u8,
    pub boss: bool,
}

impl Variant {
    /// Plain, unstaged, non-boss variant.
    pub fn basic(kind: EnemyKind) -> Self {
        Self {
            kind,
            stage: 1,
            boss: false,
        }
    }

    /// Validate a spawn descriptor's stage against its kind.
    pub fn resolve(desc: SpawnDescriptor) -> Result<Self, SpawnError> {
        let invalid = |stage| SpawnError::InvalidStage {
            kind: desc.kind,
            stage,
        };
        match (desc.kind, desc.stage) {
            (EnemyKind::Devastator, stage) => {
                let stage = stage.unwrap_or(1);
                if !(1..=DEVASTATOR_MAX_STAGE).contains(&stage) {
                    return Err(invalid(stage));
                }
                Ok(Self {
                    kind: EnemyKind::Devastator,
                    stage,
                    boss: true,
                })
            }
            (EnemyKind::Stormlord, Some(1)) => Ok(Self {
                kind: EnemyKind::Stormlord,
                stage: 1,
                boss: true,
            }),
            (kind, None) => Ok(Self::basic(kind)),
            (_, Some(stage)) => Err(invalid(stage)),
        }
    }

    /// Unscaled stats for this variant.
    pub fn base_stats(&self) -> EnemyStats {
        let stage = self.stage as f64;
        match (self.kind, self.boss) {
            (EnemyKind::Flyer, _) => EnemyStats::new(FLYER_HP, FLYER_SPEED, FLYER_DAMAGE),
            (EnemyKind::Crystalback, _) => {
                EnemyStats::new(CRYSTALBACK_HP, CRYSTALBACK_SPEED, CRYSTALBACK_DAMAGE)
            }
            (EnemyKind::Regenerator, _) => {
                EnemyStats::new(REGENERATOR_HP, REGENERATOR_SPEED, REGENERATOR_DAMAGE)
            }
            (EnemyKind::Stormlord, false) => {
                EnemyStats::new(STORMLORD_HP, STORMLORD_SPEED, STORMLORD_DAMAGE)
            }
            (EnemyKind::Stormlord, true) => EnemyStats::new(
                STORMLORD_BOSS_HP,
                STORMLORD_BOSS_SPEED,
                STORMLORD_BOSS_DAMAGE,
            ),
            (EnemyKind::Devastator, _) => EnemyStats::new(
                DEVASTATOR_HP_PER_STAGE * stage,
                DEVASTATOR_SPEED_BASE + DEVASTATOR_SPEED_PER_STAGE * stage,
                DEVASTATOR_DAMAGE_PER_STAGE * stage,
            ),
        }
    }

    pub fn immune_to(&self, effect: StatusKind) -> bool {
        matches!((self.kind, effect), (EnemyKind::Flyer, StatusKind::Slow))
    }

    /// Enemies spawned when this variant dies with a death roster.
    fn death_roster(&self) -> &'static [EnemyKind] {
        match self.kind {
            EnemyKind::Crystalback => &[
                EnemyKind::Flyer,
                EnemyKind::Crystalback,
                EnemyKind::Regenerator,
            ],
            EnemyKind::Stormlord => &[
                EnemyKind::Flyer,
                EnemyKind::Crystalback,
                EnemyKind::Regenerator,
                EnemyKind::Stormlord,
            ],
            _ => &[],
        }
    }

    fn special_period(&self) -> u32 {
        match self.kind {
            EnemyKind::Flyer => 0,
            EnemyKind::Crystalback => CRYSTAL_PERIOD_TICKS,
            EnemyKind::Regenerator => REGENERATOR_HEAL_PERIOD_TICKS,
            EnemyKind::Stormlord if self.boss => STORMLORD_BOSS_STRIKE_PERIOD_TICKS,
            EnemyKind::Stormlord => STORMLORD_STRIKE_PERIOD_TICKS,
            EnemyKind::Devastator => {
                DEVASTATOR_SPECIAL_PERIOD_TICKS[self.stage.saturating_sub(1) as usize]
            }
        }
    }

    /// Final forms regenerate and strike the base directly.
    fn final_form(&self) -> Option<f64> {
        match self.kind {
            EnemyKind::Stormlord if self.boss => Some(STORMLORD_BOSS_REGEN),
            EnemyKind::Devastator if self.stage == DEVASTATOR_MAX_STAGE => {
                Some(DEVASTATOR_FINAL_REGEN)
            }
            _ => None,
        }
    }
}

/// Hit points, movement speed (units/tick) and contact damage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub hit_points: f64,
    pub speed: f64,
    pub damage: f64,
}

impl EnemyStats {
    pub fn new(hit_points: f64, speed: f64, damage: f64) -> Self {
        Self {
            hit_points,
            speed,
            damage,
        }
    }
}

/// Hit-point multiplier applied once at spawn for enemies of `kind` in `wave`.
pub fn wave_hp_multiplier(kind: EnemyKind, wave: u32) -> f64 {
    let mut scale = 1.0 + (wave / HP_SCALE_WAVE_STEP) as f64 * HP_SCALE_PER_STEP;
    if kind == EnemyKind::Stormlord && wave > STORMLORD_LATE_WAVE {
        scale *= STORMLORD_LATE_MULTIPLIER;
    }
    scale
}

/// Position on the path plus the index of the waypoint last passed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathCursor {
    pub position: DVec2,
    pub index: usize,
}

/// Everything decided at spawn time.
#[derive(Debug, Clone, Copy)]
pub struct SpawnParams {
    pub wave: u32,
    pub origin: SpawnOrigin,
    /// Whether death spawns the variant's roster.
    pub death_roster: bool,
    /// Spawn point; the path start when `None`.
    pub at: Option<PathCursor>,
}

impl SpawnParams {
    pub fn wave(wave: u32) -> Self {
        Self {
            wave,
            origin: SpawnOrigin::Wave,
            death_roster: false,
            at: None,
        }
    }
}

/// Result of a hit.
#[derive(Debug, Clone, PartialEq)]
pub enum DamageOutcome {
    Damaged,
    /// This hit took the enemy from alive to dead.
    Killed { replacements: Vec<SpawnDescriptor> },
}

/// How far an enemy attack reaches among towers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrikeReach {
    /// Nearest tower within the radius.
    Nearest { radius: f64 },
    /// Every tower within the radius.
    Area { radius: f64 },
}

/// At most one of these is emitted per enemy per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AbilityAction {
    SpawnCrystal {
        position: DVec2,
    },
    /// Hit points restored (already applied, capped at max).
    SelfHeal {
        amount: f64,
    },
    Strike {
        origin: DVec2,
        damage: f64,
        reach: StrikeReach,
    },
    DamageBase {
        damage: f64,
    },
    Summon {
        at: PathCursor,
        kind: EnemyKind,
        count: u32,
    },
    Roar {
        position: DVec2,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct AbilityTimers {
    special: u32,
    regen: u32,
    base_strike: u32,
}

/// A live enemy walking the path.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub variant: Variant,
    pub wave: u32,
    pub origin: SpawnOrigin,
    pub position: DVec2,
    /// Index of the waypoint last passed.
    pub path_index: usize,
    pub target: DVec2,
    pub hit_points: f64,
    pub max_hit_points: f64,
    pub speed: f64,
    pub damage: f64,
    pub alive: bool,
    pub effects: StatusEffects,
    death_roster: bool,
    finished: bool,
    timers: AbilityTimers,
}

impl Enemy {
    /// Enemy with explicit stats at the start of `path`.
    pub fn new(variant: Variant, stats: EnemyStats, path: &Path) -> Self {
        Self::place(variant, stats, SpawnParams::wave(0), path)
    }

    /// Enemy from a spawn descriptor, with wave scaling applied to hit points.
    pub fn spawn(
        desc: SpawnDescriptor,
        params: SpawnParams,
        path: &Path,
    ) -> Result<Self, SpawnError> {
        let variant = Variant::resolve(desc)?;
        let mut stats = variant.base_stats();
        stats.hit_points *= wave_hp_multiplier(variant.kind, params.wave);
        Ok(Self::place(variant, stats, params, path))
    }

    fn place(variant: Variant, stats: EnemyStats, params: SpawnParams, path: &Path) -> Self {
        let cursor = params.at.unwrap_or(PathCursor {
            position: path.start(),
            index: 0,
        });
        let index = cursor.index.min(path.last_index() - 1);
        let target = path.waypoint(index + 1).unwrap_or_else(|| path.end());

        Self {
            variant,
            wave: params.wave,
            origin: params.origin,
            position: cursor.position,
            path_index: index,
            target,
            hit_points: stats.hit_points,
            max_hit_points: stats.hit_points,
            speed: stats.speed,
            damage: stats.damage,
            alive: true,
            effects: StatusEffects::default(),
            death_roster: params.death_roster && params.origin != SpawnOrigin::Replacement,
            finished: false,
            timers: AbilityTimers::default(),
        }
    }

    pub fn kind(&self) -> EnemyKind {
        self.variant.kind
    }

    pub fn cursor(&self) -> PathCursor {
        PathCursor {
            position: self.position,
            index: self.path_index,
        }
    }

    /// Whether the enemy has reached the final waypoint.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn health_fraction(&self) -> f64 {
        if self.max_hit_points > 0.0 {
            self.hit_points / self.max_hit_points
        } else {
            0.0
        }
    }

    /// Speed after status effects.
    pub fn effective_speed(&self) -> f64 {
        self.speed * self.effects.speed_factor()
    }

    /// Move one step toward the target waypoint. Returns true exactly once,
    /// on the step that lands on the final waypoint.
    pub fn advance(&mut self, path: &Path) -> bool {
        if self.finished {
            return false;
        }

        let step = self.effective_speed();
        let to_target = self.target - self.position;
        let distance = to_target.length();

        if distance <= step {
            self.position = self.target;
            self.path_index += 1;
            match path.waypoint(self.path_index + 1) {
                Some(next) => self.target = next,
                None => {
                    self.finished = true;
                    return true;
                }
            }
        } else {
            self.position += to_target / distance * step;
        }
        false
    }

    /// Subtract `amount` from hit points. Death is reported once, on the hit
    /// that crosses zero, together with any death roster.
    pub fn take_damage(&mut self, amount: f64) -> DamageOutcome {
        self.hit_points -= amount;
        if self.alive && self.hit_points <= 0.0 {
            self.alive = false;
            let replacements = if self.death_roster {
                self.variant
                    .death_roster()
                    .iter()
                    .map(|&kind| SpawnDescriptor::new(kind))
                    .collect()
            } else {
                Vec::new()
            };
            return DamageOutcome::Killed { replacements };
        }
        DamageOutcome::Damaged
    }

    /// Install or refresh a status effect unless this variant is immune.
    pub fn apply_status_effect(
        &mut self,
        kind: StatusKind,
        magnitude: f64,
        duration_ticks: u32,
    ) -> Result<(), EffectError> {
        if self.variant.immune_to(kind) {
            return Err(EffectError::Immune {
                enemy: self.variant.kind,
                effect: kind,
            });
        }
        if !magnitude.is_finite() || magnitude < 0.0 {
            return Err(EffectError::InvalidMagnitude { magnitude });
        }
        self.effects.insert(kind, magnitude, duration_ticks);
        Ok(())
    }

    /// Count status effects down by one tick.
    pub fn decay_effects(&mut self) {
        self.effects.tick();
    }

    /// Drive per-variant timers for one tick.
    pub fn tick_abilities(&mut self) -> Option<AbilityAction> {
        if !self.alive {
            return None;
        }

        if let Some(regen) = self.variant.final_form() {
            self.timers.regen += 1;
            if self.timers.regen >= BOSS_REGEN_PERIOD_TICKS {
                self.timers.regen = 0;
                self.heal(regen);
            }
            self.timers.base_strike += 1;
            if self.timers.base_strike >= BASE_STRIKE_PERIOD_TICKS {
                self.timers.base_strike = 0;
                // The special timer keeps counting and fires on a later tick.
                self.timers.special += 1;
                return Some(AbilityAction::DamageBase {
                    damage: BASE_STRIKE_DAMAGE,
                });
            }
        }

        let period = self.variant.special_period();
        if period == 0 {
            return None;
        }
        self.timers.special += 1;
        if self.timers.special < period {
            return None;
        }
        self.timers.special = 0;
        Some(self.special_action())
    }

    fn special_action(&mut self) -> AbilityAction {
        let position = self.position;
        match self.variant.kind {
            EnemyKind::Crystalback => AbilityAction::SpawnCrystal { position },
            EnemyKind::Regenerator => AbilityAction::SelfHeal {
                amount: self.heal(REGENERATOR_HEAL_AMOUNT),
            },
            EnemyKind::Stormlord => {
                let damage = if self.variant.boss {
                    self.damage * STORMLORD_BOSS_STRIKE_MULTIPLIER
                } else {
                    self.damage
                };
                AbilityAction::Strike {
                    origin: position,
                    damage,
                    reach: StrikeReach::Nearest {
                        radius: ENEMY_STRIKE_RADIUS,
                    },
                }
            }
            EnemyKind::Devastator => match self.variant.stage {
                1 => AbilityAction::Roar { position },
                2 => AbilityAction::Strike {
                    origin: position,
                    damage: DEVASTATOR_AREA_DAMAGE,
                    reach: StrikeReach::Area {
                        radius: ENEMY_AREA_ATTACK_RADIUS,
                    },
                },
                stage => AbilityAction::Summon {
                    at: self.cursor(),
                    kind: EnemyKind::Flyer,
                    count: DEVASTATOR_SUMMON_COUNT[stage.saturating_sub(1) as usize],
                },
            },
            EnemyKind::Flyer => AbilityAction::Roar { position },
        }
    }

    /// Restore up to `amount` hit points, capped at max. Returns the amount restored.
    fn heal(&mut self, amount: f64) -> f64 {
        let before = self.hit_points;
        self.hit_points = (self.hit_points + amount).min(self.max_hit_points);
        (self.hit_points - before).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_path() -> Path {
        Path::from_points(&[(0.0, 0.0), (10.0, 0.0)]).unwrap()
    }

    fn long_path() -> Path {
        Path::from_points(&[(0.0, 0.0), (1000.0, 0.0)]).unwrap()
    }

    #[test]
    fn three_hits_kill_without_roster() {
        let path = straight_path();
        let mut enemy = Enemy::new(
            Variant::basic(EnemyKind::Flyer),
            EnemyStats::new(30.0, 1.0, 5.0),
            &path,
        );
        assert_eq!(enemy.take_damage(10.0), DamageOutcome::Damaged);
        assert_eq!(enemy.take_damage(10.0), DamageOutcome::Damaged);
        assert!(enemy.alive);
        assert_eq!(
            enemy.take_damage(10.0),
            DamageOutcome::Killed {
                replacements: Vec::new()
            }
        );
        assert!(!enemy.alive);
        assert_eq!(enemy.hit_points, 0.0);
    }

    #[test]
    fn overkill_is_not_clamped() {
        let path = straight_path();
        let mut enemy = Enemy::new(
            Variant::basic(EnemyKind::Crystalback),
            EnemyStats::new(5.0, 1.0, 5.0),
            &path,
        );
        enemy.take_damage(12.5);
        assert_eq!(enemy.hit_points, -7.5);
        assert!(!enemy.alive);
        // Further hits keep subtracting but never re-report the kill.
        assert_eq!(enemy.take_damage(1.0), DamageOutcome::Damaged);
        assert_eq!(enemy.hit_points, -8.5);
    }

    #[test]
    fn reaches_end_exactly_once() {
        let path = straight_path();
        let mut enemy = Enemy::new(
            Variant::basic(EnemyKind::Flyer),
            EnemyStats::new(30.0, 2.0, 5.0),
            &path,
        );
        let mut results = Vec::new();
        for _ in 0..6 {
            results.push(enemy.advance(&path));
        }
        assert_eq!(results, vec![false, false, false, false, true, false]);
        assert_eq!(enemy.position, DVec2::new(10.0, 0.0));
        assert!(enemy.is_finished());
    }

    #[test]
    fn snaps_through_corner_waypoints() {
        let path = Path::from_points(&[(0.0, 0.0), (3.0, 0.0), (3.0, 3.0)]).unwrap();
        let mut enemy = Enemy::new(
            Variant::basic(EnemyKind::Flyer),
            EnemyStats::new(30.0, 2.0, 5.0),
            &path,
        );
        assert!(!enemy.advance(&path));
        assert_eq!(enemy.position, DVec2::new(2.0, 0.0));
        assert!(!enemy.advance(&path));
        assert_eq!(enemy.position, DVec2::new(3.0, 0.0));
        assert_eq!(enemy.path_index, 1);
        assert_eq!(enemy.target, DVec2::new(3.0, 3.0));
    }

    #[test]
    fn slow_halves_step() {
        let path = long_path();
        let mut enemy = Enemy::new(
            Variant::basic(EnemyKind::Crystalback),
            EnemyStats::new(30.0, 2.0, 5.0),
            &path,
        );
        enemy
            .apply_status_effect(StatusKind::Slow, 0.5, 60)
            .unwrap();
        enemy.advance(&path);
        assert_eq!(enemy.position, DVec2::new(1.0, 0.0));
    }

    #[test]
    fn flyer_rejects_slow_without_mutation() {
        let path = straight_path();
        let mut enemy = Enemy::new(
            Variant::basic(EnemyKind::Flyer),
            EnemyStats::new(30.0, 2.0, 5.0),
            &path,
        );
        let err = enemy
            .apply_status_effect(StatusKind::Slow, 0.5, 60)
            .unwrap_err();
        assert_eq!(
            err,
            EffectError::Immune {
                enemy: EnemyKind::Flyer,
                effect: StatusKind::Slow
            }
        );
        assert!(enemy.effects.is_empty());
    }

    #[test]
    fn negative_magnitude_rejected() {
        let path = straight_path();
        let mut enemy = Enemy::new(
            Variant::basic(EnemyKind::Regenerator),
            EnemyStats::new(30.0, 2.0, 5.0),
            &path,
        );
        assert!(enemy
            .apply_status_effect(StatusKind::Slow, -0.5, 60)
            .is_err());
        assert!(enemy.effects.is_empty());
    }

    #[test]
    fn resolve_validates_stage() {
        assert!(Variant::resolve(SpawnDescriptor::staged(EnemyKind::Devastator, 4)).is_ok());
        assert_eq!(
            Variant::resolve(SpawnDescriptor::staged(EnemyKind::Devastator, 5)),
            Err(SpawnError::InvalidStage {
                kind: EnemyKind::Devastator,
                stage: 5
            })
        );
        assert_eq!(
            Variant::resolve(SpawnDescriptor::new(EnemyKind::Devastator))
                .unwrap()
                .stage,
            1
        );
        assert!(
            Variant::resolve(SpawnDescriptor::staged(EnemyKind::Stormlord, 1))
                .unwrap()
                .boss
        );
        assert!(Variant::resolve(SpawnDescriptor::staged(EnemyKind::Flyer, 2)).is_err());
    }

    #[test]
    fn wave_scaling_applies_to_current_and_max() {
        let path = long_path();
        let enemy = Enemy::spawn(
            SpawnDescriptor::new(EnemyKind::Flyer),
            SpawnParams::wave(10),
            &path,
        )
        .unwrap();
        let expected = FLYER_HP * 1.4;
        assert!((enemy.max_hit_points - expected).abs() < 1e-9);
        assert_eq!(enemy.hit_points, enemy.max_hit_points);
    }

    #[test]
    fn late_stormlords_double() {
        assert!((wave_hp_multiplier(EnemyKind::Stormlord, 40) - 3.2).abs() < 1e-9);
        assert!((wave_hp_multiplier(EnemyKind::Flyer, 40) - 2.6).abs() < 1e-9);
        assert_eq!(wave_hp_multiplier(EnemyKind::Stormlord, 4), 1.0);
    }

    #[test]
    fn crystalback_drops_on_period() {
        let path = long_path();
        let mut enemy = Enemy::new(
            Variant::basic(EnemyKind::Crystalback),
            EnemyStats::new(100.0, 1.0, 5.0),
            &path,
        );
        for _ in 0..CRYSTAL_PERIOD_TICKS - 1 {
            assert_eq!(enemy.tick_abilities(), None);
        }
        assert!(matches!(
            enemy.tick_abilities(),
            Some(AbilityAction::SpawnCrystal { .. })
        ));
        // Timer resets after firing.
        assert_eq!(enemy.tick_abilities(), None);
    }

    #[test]
    fn regenerator_heals_up_to_max() {
        let path = long_path();
        let mut enemy = Enemy::new(
            Variant::basic(EnemyKind::Regenerator),
            EnemyStats::new(100.0, 1.0, 5.0),
            &path,
        );
        enemy.take_damage(5.0);
        let mut healed = None;
        for _ in 0..REGENERATOR_HEAL_PERIOD_TICKS {
            healed = enemy.tick_abilities();
        }
        assert_eq!(healed, Some(AbilityAction::SelfHeal { amount: 5.0 }));
        assert_eq!(enemy.hit_points, 100.0);
    }

    #[test]
    fn boss_stormlord_strikes_base() {
        let path = long_path();
        let mut enemy = Enemy::spawn(
            SpawnDescriptor::staged(EnemyKind::Stormlord, 1),
            SpawnParams::wave(50),
            &path,
        )
        .unwrap();
        let mut base_hits = 0;
        let mut strikes = 0;
        for _ in 0..BASE_STRIKE_PERIOD_TICKS {
            match enemy.tick_abilities() {
                Some(AbilityAction::DamageBase { damage }) => {
                    assert_eq!(damage, BASE_STRIKE_DAMAGE);
                    base_hits += 1;
                }
                Some(AbilityAction::Strike { damage, .. }) => {
                    assert_eq!(damage, STORMLORD_BOSS_DAMAGE * 2.0);
                    strikes += 1;
                }
                _ => {}
            }
        }
        assert_eq!(base_hits, 1);
        assert_eq!(strikes, 2);
    }

    #[test]
    fn devastator_special_depends_on_stage() {
        let path = long_path();
        let mut specials = Vec::new();
        for stage in 1..=DEVASTATOR_MAX_STAGE {
            let mut enemy = Enemy::spawn(
                SpawnDescriptor::staged(EnemyKind::Devastator, stage),
                SpawnParams::wave(10 * stage as u32),
                &path,
            )
            .unwrap();
            let period = DEVASTATOR_SPECIAL_PERIOD_TICKS[stage as usize - 1];
            let action = (0..period).filter_map(|_| enemy.tick_abilities()).last();
            specials.push(action);
        }
        assert!(matches!(specials[0], Some(AbilityAction::Roar { .. })));
        assert!(matches!(
            specials[1],
            Some(AbilityAction::Strike {
                reach: StrikeReach::Area { .. },
                ..
            })
        ));
        assert!(matches!(
            specials[2],
            Some(AbilityAction::Summon { count: 2, .. })
        ));
        assert!(matches!(
            specials[3],
            Some(AbilityAction::Summon { count: 3, .. })
        ));
    }

    #[test]
    fn roster_only_when_flagged_and_not_a_replacement() {
        let path = long_path();
        let params = SpawnParams {
            death_roster: true,
            ..SpawnParams::wave(45)
        };
        let mut flagged =
            Enemy::spawn(SpawnDescriptor::new(EnemyKind::Stormlord), params, &path).unwrap();
        match flagged.take_damage(1e9) {
            DamageOutcome::Killed { replacements } => assert_eq!(replacements.len(), 4),
            other => panic!("expected kill, got {other:?}"),
        }

        let replacement = SpawnParams {
            origin: SpawnOrigin::Replacement,
            ..params
        };
        let mut child =
            Enemy::spawn(SpawnDescriptor::new(EnemyKind::Stormlord), replacement, &path).unwrap();
        assert_eq!(
            child.take_damage(1e9),
            DamageOutcome::Killed {
                replacements: Vec::new()
            }
        );
    }

    #[test]
    fn spawn_at_cursor_targets_next_waypoint() {
        let path = Path::from_points(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]).unwrap();
        let params = SpawnParams {
            at: Some(PathCursor {
                position: DVec2::new(10.0, 4.0),
                index: 1,
            }),
            ..SpawnParams::wave(1)
        };
        let enemy = Enemy::spawn(SpawnDescriptor::new(EnemyKind::Flyer), params, &path).unwrap();
        assert_eq!(enemy.position, DVec2::new(10.0, 4.0));
        assert_eq!(enemy.target, DVec2::new(10.0, 10.0));
    }
}
