//! Pest AI for BLOOMGUARD.
//!
//! Implements the behaviour modifier table and the movement state machine
//! that walks pests (and the boss) toward the defended plant.

pub mod fsm;
pub mod profiles;

pub use bloomguard_core as core;

#[cfg(test)]
mod tests;
