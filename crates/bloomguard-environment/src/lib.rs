//! Environment model for BLOOMGUARD.
//!
//! Resolves weather and season into pest modifiers, cycles the weather
//! and the day/night clock, and decays the plant's resources.

pub mod modifiers;
pub mod resources;
pub mod weather;

pub use bloomguard_core as core;

#[cfg(test)]
mod tests;
