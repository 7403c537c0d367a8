//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// 3D position in encounter space (abstract units).
/// x/z span the ground plane around the defended plant, y = height.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Simulation time tracking. Time only moves when the caller ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of ticks evaluated so far.
    pub tick: u64,
    /// Elapsed logical time in milliseconds.
    pub elapsed_ms: u64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// 3D distance to another position.
    pub fn range_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Distance on the ground plane (ignoring height).
    pub fn ground_range_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        (dx * dx + dz * dz).sqrt()
    }

    /// Point at `distance` from this one along ground bearing `angle` (radians).
    pub fn offset_on_ground(&self, angle: f64, distance: f64) -> Position {
        Position::new(
            self.x + angle.cos() * distance,
            self.y,
            self.z + angle.sin() * distance,
        )
    }
}

impl SimTime {
    /// Advance by one tick covering `delta_ms` of logical time.
    pub fn advance(&mut self, delta_ms: u64) {
        self.tick += 1;
        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_ms as f64 / 1000.0
    }
}
