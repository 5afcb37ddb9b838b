//! Simulation engine for the kaiju tower-defense game.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for the frontend.

pub mod economy;
pub mod enemy;
pub mod engine;
pub mod placement;
pub mod projectile;
pub mod run;
pub mod status;
pub mod systems;
pub mod tower;
pub mod wave;

pub use engine::{ConfigError, SimConfig, SimulationEngine};
pub use kaiju_core as core;
