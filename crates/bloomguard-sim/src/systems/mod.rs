//! Systems that operate on the encounter state each tick.
//!
//! Systems are plain functions over `EncounterState`. They do not own
//! state; everything they touch lives in the world or beside it.

pub mod boss;
pub mod combat;
pub mod difficulty;
pub mod environment;
pub mod hazards;
pub mod movement;
pub mod powerups;
pub mod proximity;
pub mod snapshot;
pub mod spawner;
