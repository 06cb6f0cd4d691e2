//! Point clouds: ordered `[x, y, z, velocity]` scatterer rows.

use serde::{Deserialize, Serialize};

/// One scatterer: world position (m) and the owning object's scalar velocity (m/s).
pub type Scatterer = [f64; 4];

/// Ordered scatterer rows. Row order follows group membership, so a cloud
/// built by [`PointCloud::concat`] keeps each input's rows contiguous.
///
/// An empty cloud is a valid zero-row value, never a missing one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointCloud {
    rows: Vec<Scatterer>,
}

impl PointCloud {
    pub fn new(rows: Vec<Scatterer>) -> Self {
        Self { rows }
    }

    /// Zero-row cloud.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Concatenate clouds in iteration order.
    pub fn concat<'a, I>(clouds: I) -> Self
    where
        I: IntoIterator<Item = &'a PointCloud>,
    {
        let mut rows = Vec::new();
        for cloud in clouds {
            rows.extend_from_slice(&cloud.rows);
        }
        Self { rows }
    }

    pub fn rows(&self) -> &[Scatterer] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Mean of the x/y columns. `None` for an empty cloud.
    pub fn xy_mean(&self) -> Option<[f64; 2]> {
        if self.rows.is_empty() {
            return None;
        }
        let n = self.rows.len() as f64;
        let (sx, sy) = self
            .rows
            .iter()
            .fold((0.0, 0.0), |(sx, sy), r| (sx + r[0], sy + r[1]));
        Some([sx / n, sy / n])
    }

    /// Axis-aligned x/y bounds as `(min, max)`. `None` for an empty cloud.
    pub fn xy_bounds(&self) -> Option<([f64; 2], [f64; 2])> {
        if self.rows.is_empty() {
            return None;
        }
        let mut lo = [f64::INFINITY; 2];
        let mut hi = [f64::NEG_INFINITY; 2];
        for r in &self.rows {
            lo[0] = lo[0].min(r[0]);
            lo[1] = lo[1].min(r[1]);
            hi[0] = hi[0].max(r[0]);
            hi[1] = hi[1].max(r[1]);
        }
        Some((lo, hi))
    }

    /// Centre of the x/y bounding box. `None` for an empty cloud.
    pub fn xy_bbox_center(&self) -> Option<[f64; 2]> {
        self.xy_bounds()
            .map(|(lo, hi)| [(lo[0] + hi[0]) / 2.0, (lo[1] + hi[1]) / 2.0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cloud_has_no_center() {
        let cloud = PointCloud::empty();
        assert!(cloud.is_empty());
        assert_eq!(cloud.xy_mean(), None);
        assert_eq!(cloud.xy_bbox_center(), None);
    }

    #[test]
    fn concat_preserves_group_order() {
        let a = PointCloud::new(vec![[0.0, 0.0, 0.0, 1.0], [1.0, 0.0, 0.0, 1.0]]);
        let b = PointCloud::new(vec![[5.0, 5.0, 0.0, -2.0]]);
        let empty = PointCloud::empty();
        let all = PointCloud::concat([&a, &empty, &b]);
        assert_eq!(all.len(), 3);
        assert_eq!(all.rows()[2], [5.0, 5.0, 0.0, -2.0]);
        assert_eq!(&all.rows()[..2], a.rows());
    }

    #[test]
    fn mean_and_bbox_differ_for_skewed_cloud() {
        let cloud = PointCloud::new(vec![
            [0.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [4.0, 2.0, 0.0, 0.0],
        ]);
        let mean = cloud.xy_mean().unwrap();
        let bbox = cloud.xy_bbox_center().unwrap();
        assert!((mean[0] - 4.0 / 3.0).abs() < 1e-12);
        assert_eq!(bbox, [2.0, 1.0]);
    }
}
