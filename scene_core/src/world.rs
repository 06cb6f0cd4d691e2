//! World bounds.

use serde::{Deserialize, Serialize};
use shape_models::Disc;

/// Closed interval on one axis (metres).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn extent(&self) -> f64 {
        self.max - self.min
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Range pulled in by `margin` on both ends.
    pub fn shrunk(&self, margin: f64) -> Self {
        Self {
            min: self.min + margin,
            max: self.max - margin,
        }
    }

    pub fn contains(&self, v: f64) -> bool {
        self.min <= v && v <= self.max
    }

    /// Finite and strictly increasing.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max
    }
}

/// Rectangular world volume. Collision reasoning uses only x/y; z bounds the
/// scatterer heights for downstream consumers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub x: AxisRange,
    pub y: AxisRange,
    pub z: AxisRange,
}

impl World {
    pub fn new(x: AxisRange, y: AxisRange, z: AxisRange) -> Self {
        Self { x, y, z }
    }

    /// Ground-plane area (m²).
    pub fn area(&self) -> f64 {
        self.x.extent() * self.y.extent()
    }

    /// Sampling box for a disc of `radius`: every centre drawn from it keeps
    /// the disc inside the world.
    pub fn sampling_box(&self, radius: f64) -> (AxisRange, AxisRange) {
        (self.x.shrunk(radius), self.y.shrunk(radius))
    }

    /// True if the whole disc lies inside the x/y rectangle.
    pub fn contains_disc(&self, disc: &Disc) -> bool {
        let (xs, ys) = self.sampling_box(disc.radius);
        xs.contains(disc.center[0]) && ys.contains(disc.center[1])
    }

    pub fn contains_point(&self, p: [f64; 2]) -> bool {
        self.x.contains(p[0]) && self.y.contains(p[1])
    }
}

impl Default for World {
    fn default() -> Self {
        Self {
            x: AxisRange::new(0.0, 28.0),
            y: AxisRange::new(0.0, 28.0),
            z: AxisRange::new(0.0, 20.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disc_containment_uses_shrunk_box() {
        let world = World::default();
        assert!(world.contains_disc(&Disc::new([3.5, 3.5], 3.5)));
        assert!(!world.contains_disc(&Disc::new([3.4, 14.0], 3.5)));
        assert!(!world.contains_disc(&Disc::new([14.0, 24.6], 3.5)));
    }

    #[test]
    fn degenerate_axis_is_invalid() {
        assert!(!AxisRange::new(5.0, 5.0).is_valid());
        assert!(!AxisRange::new(0.0, f64::NAN).is_valid());
        assert!(AxisRange::new(-1.0, 1.0).is_valid());
    }

    #[test]
    fn sampling_box_collapses_at_half_extent() {
        let world = World::default();
        let (xs, _) = world.sampling_box(14.0);
        assert_eq!(xs.extent(), 0.0);
    }
}
