//! headless-run: drive a full game without a renderer and print a summary.
//!
//! Usage:
//!   headless-run [--seed N] [--ticks N] [--config run.json] [--towers N]

use std::process;

use glam::DVec2;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use kaiju_core::enums::{GamePhase, TowerKind};
use kaiju_core::events::GameEvent;
use kaiju_core::geometry::Path;
use kaiju_sim::{SimConfig, SimulationEngine};

/// Tower mix cycled through when building the defence.
const BUILD_ORDER: [TowerKind; 5] = [
    TowerKind::Cannon,
    TowerKind::Maser,
    TowerKind::Launcher,
    TowerKind::Cannon,
    TowerKind::Lancer,
];

/// Perpendicular distance from the path centerline for placed towers.
const TOWER_OFFSET: f64 = 60.0;

struct Options {
    seed: Option<u64>,
    ticks: u64,
    config: Option<String>,
    towers: usize,
}

#[derive(Default)]
struct Tally {
    kills: u32,
    leaks: u32,
    waves_cleared: u32,
    towers_lost: u32,
    crystals: u32,
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }
    let options = match parse_options(&args) {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("Error: {msg}");
            print_usage();
            process::exit(1);
        }
    };

    let mut config = match &options.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(msg) => {
                eprintln!("Error: {msg}");
                process::exit(1);
            }
        },
        None => SimConfig::default(),
    };
    if let Some(seed) = options.seed {
        config.seed = seed;
    }
    config.auto_advance = true;

    let mut engine = match SimulationEngine::try_new(config) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("Error: invalid config: {err}");
            process::exit(1);
        }
    };

    engine.start_game();
    let placed = build_defence(&mut engine, options.towers);
    info!(placed, cash = engine.cash(), "defence built");
    if let Err(err) = engine.start_wave() {
        warn!(%err, "first wave did not start");
    }

    let mut tally = Tally::default();
    let mut last_phase = engine.phase();
    for _ in 0..options.ticks {
        let snap = engine.tick();
        for event in &snap.events {
            match event {
                GameEvent::EnemyKilled { .. } => tally.kills += 1,
                GameEvent::EnemyLeaked { .. } => tally.leaks += 1,
                GameEvent::WaveCleared { .. } => tally.waves_cleared += 1,
                GameEvent::TowerDestroyed { .. } => tally.towers_lost += 1,
                _ => {}
            }
        }
        for crystal in &snap.crystals {
            if let Some(value) = engine.collect_crystal(crystal.position) {
                tally.crystals += value;
            }
        }
        last_phase = snap.run.phase;
        if last_phase.is_terminal() {
            break;
        }
    }

    print_summary(&engine, last_phase, &tally);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn print_usage() {
    eprintln!(
        "headless-run: play a kaiju defence run without a renderer\n\
         \n\
           --seed <N>       RNG seed (overrides the config file)\n\
           --ticks <N>      Tick limit (default: 216000, one hour at 60 Hz)\n\
           --config <path>  JSON run configuration (optional)\n\
           --towers <N>     Towers to place before the first wave (default: 6)\n\
         \n\
         Set RUST_LOG=debug for per-enemy tracing.\n"
    );
}

fn parse_options(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        seed: None,
        ticks: 216_000,
        config: None,
        towers: 6,
    };
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = args
            .get(i + 1)
            .ok_or_else(|| format!("{flag} needs a value"))?;
        match flag {
            "--seed" => options.seed = Some(parse_number(flag, value)?),
            "--ticks" => options.ticks = parse_number(flag, value)?,
            "--config" => options.config = Some(value.clone()),
            "--towers" => options.towers = parse_number(flag, value)?,
            other => return Err(format!("unknown option: {other}")),
        }
        i += 2;
    }
    Ok(options)
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("{flag} expects a number, got {value:?}"))
}

fn load_config(path: &str) -> Result<SimConfig, String> {
    let json =
        std::fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?;
    SimConfig::from_json(&json).map_err(|e| format!("bad config {path}: {e}"))
}

/// Candidate tower spots: evenly spaced along the path, alternating sides.
fn tower_sites(path: &Path, count: usize) -> impl Iterator<Item = DVec2> + '_ {
    let steps = count.max(1) * 4;
    (1..steps).map(move |i| {
        let t = i as f64 / steps as f64;
        let here = path.point_at(t);
        let ahead = path.point_at(t + 0.01);
        let normal = (ahead - here).normalize_or_zero().perp();
        let side = if i % 2 == 0 { 1.0 } else { -1.0 };
        here + normal * TOWER_OFFSET * side
    })
}

fn build_defence(engine: &mut SimulationEngine, count: usize) -> usize {
    let path = engine.path().clone();
    let mut placed = 0;
    for site in tower_sites(&path, count) {
        if placed >= count {
            break;
        }
        let kind = BUILD_ORDER[placed % BUILD_ORDER.len()];
        match engine.place_tower(kind, site) {
            Ok(_) => placed += 1,
            Err(err) => debug!(?kind, x = site.x, y = site.y, %err, "site skipped"),
        }
    }
    placed
}

fn print_summary(engine: &SimulationEngine, phase: GamePhase, tally: &Tally) {
    let time = engine.time();
    eprintln!("=== headless run ===");
    eprintln!("  seed:          {}", engine.config().seed);
    eprintln!("  outcome:       {phase:?}");
    eprintln!("  wave:          {}/{}", engine.waves().wave(), engine.waves().max_waves());
    eprintln!("  ticks:         {} ({:.1}s)", time.tick, time.elapsed_secs);
    eprintln!("  base hp:       {:.1}", engine.base_hp());
    eprintln!("  cash:          {}", engine.cash());
    eprintln!("  towers:        {} ({} lost)", engine.tower_count(), tally.towers_lost);
    eprintln!("  kills:         {}", tally.kills);
    eprintln!("  leaks:         {}", tally.leaks);
    eprintln!("  waves cleared: {}", tally.waves_cleared);
    eprintln!("  crystal cash:  {}", tally.crystals);
    if !phase.is_terminal() {
        eprintln!("  (tick limit reached)");
    }
}
