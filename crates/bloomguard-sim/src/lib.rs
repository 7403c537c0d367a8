//! Simulation engine for BLOOMGUARD.
//!
//! Owns the hecs ECS world of live pests plus the boss, clouds and spray
//! effects beside it, runs the systems in a fixed order on each caller
//! supplied tick, and produces `EncounterSnapshot`s for the renderer.

pub mod encounter;
pub mod engine;
pub mod session;
pub mod systems;
pub mod world_setup;

pub use bloomguard_core as core;
pub use engine::{SimConfig, SimulationEngine};
