//! Core types and definitions for the kaiju tower-defense simulation.
//!
//! This crate defines the vocabulary shared across the workspace:
//! geometry and path utilities, commands, state snapshots, events, and constants.
//! It has no dependency on a renderer or any runtime framework.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod events;
pub mod geometry;
pub mod state;
pub mod types;
