//! Circular footprint approximation used for every collision decision.

use serde::{Deserialize, Serialize};

/// A collision disc on the ground plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Disc {
    /// Centre (x, y) in metres
    pub center: [f64; 2],
    /// Radius in metres
    pub radius: f64,
}

impl Disc {
    pub fn new(center: [f64; 2], radius: f64) -> Self {
        Self { center, radius }
    }

    /// Euclidean distance between centres.
    pub fn distance_to(&self, other: &Disc) -> f64 {
        let dx = self.center[0] - other.center[0];
        let dy = self.center[1] - other.center[1];
        (dx * dx + dy * dy).sqrt()
    }

    /// Minimum centre distance two discs must keep, given a safety buffer.
    pub fn required_separation(&self, other: &Disc, safety_buffer: f64) -> f64 {
        self.radius + other.radius + safety_buffer
    }

    /// True if the discs are separated by at least `safety_buffer` beyond touching.
    pub fn clears(&self, other: &Disc, safety_buffer: f64) -> bool {
        self.distance_to(other) >= self.required_separation(other, safety_buffer)
    }
}

/// Collision footprint of a placed object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Footprint {
    /// Compact object: one disc at the effective centre.
    Disc(Disc),
    /// Extended object: discs strung along a spine (may be empty for a
    /// zero-length barrier).
    Spine(Vec<Disc>),
}

impl Footprint {
    /// All discs of this footprint, in spine order.
    pub fn discs(&self) -> &[Disc] {
        match self {
            Footprint::Disc(d) => std::slice::from_ref(d),
            Footprint::Spine(discs) => discs,
        }
    }

    /// Effective centre of a compact footprint.
    pub fn center(&self) -> Option<[f64; 2]> {
        match self {
            Footprint::Disc(d) => Some(d.center),
            Footprint::Spine(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_discs_fail_with_buffer() {
        let a = Disc::new([0.0, 0.0], 1.0);
        let b = Disc::new([2.0, 0.0], 1.0);
        assert!(a.clears(&b, 0.0));
        assert!(!a.clears(&b, 0.5));
    }

    #[test]
    fn exact_separation_clears() {
        let a = Disc::new([0.0, 0.0], 3.5);
        let b = Disc::new([0.0, 7.5], 3.5);
        assert!(a.clears(&b, 0.5));
    }

    #[test]
    fn spine_discs_view() {
        let fp = Footprint::Spine(vec![Disc::new([0.0, 1.0], 0.5), Disc::new([0.0, 2.0], 0.5)]);
        assert_eq!(fp.discs().len(), 2);
        assert_eq!(fp.center(), None);
        let single = Footprint::Disc(Disc::new([3.0, 4.0], 1.0));
        assert_eq!(single.discs().len(), 1);
        assert_eq!(single.center(), Some([3.0, 4.0]));
    }
}
