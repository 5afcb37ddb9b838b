//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only).
//! Run-level state is passed in explicitly; entity state lives in components.

pub mod enemies;
pub mod fire_control;
pub mod impact;
pub mod snapshot;
pub mod spawning;
pub mod waves;
