//! Procedural level generation for BLOOMGUARD.
//!
//! Produces a complete `LevelConfig` from a level number, the catalog and a
//! seeded generator. The engine accepts these exactly like hand-authored
//! levels.

pub mod level;

pub use level::generate_level;

#[cfg(test)]
mod tests;
