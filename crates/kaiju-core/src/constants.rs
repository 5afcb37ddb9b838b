//! Simulation constants and tuning parameters.
//!
//! Durations are expressed in ticks at [`TICK_RATE`]. Distances and speeds are
//! in world units (pixels of the reference 1024x768 playfield).

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Run ---

/// Currency at the start of a run.
pub const STARTING_CASH: u32 = 200;

/// Base (player) hit points at the start of a run.
pub const STARTING_BASE_HP: f64 = 100.0;

/// Default cap on simultaneously placed towers.
pub const MAX_TOWERS: usize = 20;

/// Number of waves in a full run.
pub const MAX_WAVES: u32 = 50;

/// Default enemy path across the reference playfield.
pub const DEFAULT_PATH: [(f64, f64); 8] = [
    (100.0, 50.0),
    (300.0, 50.0),
    (300.0, 250.0),
    (500.0, 250.0),
    (500.0, 450.0),
    (700.0, 450.0),
    (700.0, 650.0),
    (900.0, 650.0),
];

// --- Placement ---

/// Width of the no-build corridor around each path segment.
pub const PATH_CORRIDOR_WIDTH: f64 = 40.0;

/// Edge length of a tower's square footprint.
pub const TOWER_FOOTPRINT: f64 = 40.0;

/// Minimum center-to-center distance between two towers.
pub const TOWER_MIN_SEPARATION: f64 = 40.0;

// --- Hit boxes ---

/// Edge length of an enemy's square hit box.
pub const ENEMY_HITBOX: f64 = 40.0;

/// Edge length of a travelling projectile's square hit box.
pub const PROJECTILE_HITBOX: f64 = 6.0;

// --- Waves ---

/// Upper bound on the enemy count of a regular wave.
pub const REGULAR_WAVE_CAP: u32 = 15;

/// Inter-spawn delay at wave 0 (milliseconds).
pub const SPAWN_DELAY_BASE_MS: u64 = 1000;

/// Inter-spawn delay reduction per wave (milliseconds).
pub const SPAWN_DELAY_STEP_MS: u64 = 10;

/// Inter-spawn delay floor (milliseconds).
pub const SPAWN_DELAY_FLOOR_MS: u64 = 500;

/// Longest spawn delay a run config may ask for.
pub const MAX_SPAWN_DELAY_MS: u64 = 60_000;

/// Crystalbacks join the regular pool after this wave.
pub const CRYSTALBACK_UNLOCK_WAVE: u32 = 10;

/// Regenerators join the regular pool after this wave.
pub const REGENERATOR_UNLOCK_WAVE: u32 = 20;

/// Stormlords join the regular pool after this wave.
pub const STORMLORD_UNLOCK_WAVE: u32 = 35;

/// Hit points grow by [`HP_SCALE_PER_STEP`] every this many waves.
pub const HP_SCALE_WAVE_STEP: u32 = 5;

/// Fractional hit-point increase per scaling step.
pub const HP_SCALE_PER_STEP: f64 = 0.2;

/// Stormlords spawned past this wave get [`STORMLORD_LATE_MULTIPLIER`] hit points.
pub const STORMLORD_LATE_WAVE: u32 = 35;

/// Late-game Stormlord hit-point multiplier.
pub const STORMLORD_LATE_MULTIPLIER: f64 = 2.0;

/// The wave-completion bonus steps up every this many waves.
pub const WAVE_BONUS_STEP: u32 = 10;

/// Cash added to the wave-completion bonus per step.
pub const WAVE_BONUS_PER_STEP: u32 = 10;

// --- Enemies ---

pub const FLYER_HP: f64 = 18.0;
pub const FLYER_SPEED: f64 = 1.0;
pub const FLYER_DAMAGE: f64 = 5.0;
pub const FLYER_REWARD: u32 = 10;

pub const CRYSTALBACK_HP: f64 = 108.0;
pub const CRYSTALBACK_SPEED: f64 = 0.75;
pub const CRYSTALBACK_DAMAGE: f64 = 20.0;
pub const CRYSTALBACK_REWARD: u32 = 15;
/// Ticks between crystal drops (3 seconds).
pub const CRYSTAL_PERIOD_TICKS: u32 = 180;

pub const REGENERATOR_HP: f64 = 90.0;
pub const REGENERATOR_SPEED: f64 = 0.4;
pub const REGENERATOR_DAMAGE: f64 = 15.0;
pub const REGENERATOR_REWARD: u32 = 15;
/// Ticks between self-heals (0.5 seconds).
pub const REGENERATOR_HEAL_PERIOD_TICKS: u32 = 30;
pub const REGENERATOR_HEAL_AMOUNT: f64 = 8.0;

pub const STORMLORD_HP: f64 = 144.0;
pub const STORMLORD_SPEED: f64 = 0.45;
pub const STORMLORD_DAMAGE: f64 = 25.0;
pub const STORMLORD_REWARD: u32 = 20;
/// Ticks between lightning strikes (6 seconds).
pub const STORMLORD_STRIKE_PERIOD_TICKS: u32 = 360;

pub const STORMLORD_BOSS_HP: f64 = 4800.0;
pub const STORMLORD_BOSS_SPEED: f64 = 0.35;
pub const STORMLORD_BOSS_DAMAGE: f64 = 100.0;
/// Ticks between boss lightning strikes (3 seconds).
pub const STORMLORD_BOSS_STRIKE_PERIOD_TICKS: u32 = 180;
/// Boss lightning deals this multiple of contact damage.
pub const STORMLORD_BOSS_STRIKE_MULTIPLIER: f64 = 2.0;
pub const STORMLORD_BOSS_REGEN: f64 = 20.0;

pub const DEVASTATOR_MAX_STAGE: u8 = 4;
pub const DEVASTATOR_HP_PER_STAGE: f64 = 480.0;
pub const DEVASTATOR_SPEED_BASE: f64 = 0.5;
pub const DEVASTATOR_SPEED_PER_STAGE: f64 = 0.075;
pub const DEVASTATOR_DAMAGE_PER_STAGE: f64 = 50.0;
pub const DEVASTATOR_REWARD_PER_STAGE: u32 = 50;
/// Special ability period per stage (index 0 = stage 1).
pub const DEVASTATOR_SPECIAL_PERIOD_TICKS: [u32; 4] = [360, 300, 270, 240];
/// Minions summoned per special, per stage.
pub const DEVASTATOR_SUMMON_COUNT: [u32; 4] = [0, 0, 2, 3];
pub const DEVASTATOR_AREA_DAMAGE: f64 = 20.0;
pub const DEVASTATOR_FINAL_REGEN: f64 = 5.0;

/// Ticks between regeneration pulses for regenerating bosses (1 second).
pub const BOSS_REGEN_PERIOD_TICKS: u32 = 60;

/// Ticks between direct base strikes by final-form bosses (7 seconds).
pub const BASE_STRIKE_PERIOD_TICKS: u32 = 420;
pub const BASE_STRIKE_DAMAGE: f64 = 5.0;

/// Reach of a single-target enemy strike against towers.
pub const ENEMY_STRIKE_RADIUS: f64 = 150.0;

/// Radius of an enemy area attack against towers.
pub const ENEMY_AREA_ATTACK_RADIUS: f64 = 120.0;

// --- Crystals ---

/// Ticks a dropped crystal stays collectable (10 seconds).
pub const CRYSTAL_LIFETIME_TICKS: u64 = 600;
pub const CRYSTAL_VALUE: u32 = 5;
pub const CRYSTAL_PICKUP_RADIUS: f64 = 20.0;

// --- Towers ---

pub const TOWER_MAX_HP: f64 = 100.0;

pub const CANNON_DAMAGE: f64 = 12.0;
pub const CANNON_RANGE: f64 = 100.0;
pub const CANNON_FIRE_TICKS: u64 = 60;
pub const CANNON_COST: u32 = 100;

pub const MASER_DAMAGE: f64 = 7.5;
pub const MASER_RANGE: f64 = 150.0;
pub const MASER_FIRE_TICKS: u64 = 90;
pub const MASER_COST: u32 = 150;
pub const MASER_SLOW_MAGNITUDE: f64 = 0.5;
/// Slow duration (2 seconds).
pub const MASER_SLOW_TICKS: u32 = 120;

pub const LAUNCHER_DAMAGE: f64 = 22.5;
pub const LAUNCHER_RANGE: f64 = 120.0;
pub const LAUNCHER_FIRE_TICKS: u64 = 120;
pub const LAUNCHER_COST: u32 = 250;
pub const LAUNCHER_SPLASH_RADIUS: f64 = 50.0;

pub const SUPPORT_RANGE: f64 = 100.0;
pub const SUPPORT_FIRE_TICKS: u64 = 300;
pub const SUPPORT_COST: u32 = 180;
pub const SUPPORT_HEAL_AMOUNT: f64 = 15.0;

pub const LANCER_DAMAGE: f64 = 45.0;
pub const LANCER_RANGE: f64 = 200.0;
pub const LANCER_FIRE_TICKS: u64 = 180;
pub const LANCER_COST: u32 = 350;
pub const LANCER_BEAM_WIDTH: f64 = 10.0;

// --- Projectiles and effects ---

pub const BOLT_SPEED: f64 = 10.0;
pub const MASER_BOLT_SPEED: f64 = 15.0;
pub const MISSILE_SPEED: f64 = 8.0;

/// Fraction of primary damage dealt to enemies caught in a splash.
pub const SPLASH_DAMAGE_FACTOR: f64 = 0.5;

/// Beam lifetime; with [`BEAM_DAMAGE_FRACTION`] a full beam deals its nominal damage.
pub const BEAM_DURATION_TICKS: u64 = 10;
pub const BEAM_DAMAGE_FRACTION: f64 = 0.1;

/// Heal zone lifetime (0.5 seconds).
pub const HEAL_ZONE_DURATION_TICKS: u64 = 30;
