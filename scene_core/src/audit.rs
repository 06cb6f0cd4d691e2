//! Collision auditor: an independent check of a finished scene.
//!
//! Footprint centres are re-derived from each object's realized point cloud
//! rather than read from the placement bookkeeping:
//! - compact objects: cloud mean shifted by the template's bounding-box
//!   correction at the object's heading, radius from the recorded footprint
//! - the barrier: a circle through three stations of the outer layer gives
//!   an arc spine; when they are collinear the cloud is projected onto the
//!   heading instead. Either spine is re-discretized with the recorded disc
//!   count and radius
//!
//! Every pair involving a dynamic object is then tested with the same rule the
//! placement generator uses. Static pairs are not compared; the lights sit on
//! the barrier median by construction.

use crate::assembly::Scene;
use crate::world::World;
use serde::{Deserialize, Serialize};
use shape_models::{bbox_correction, Disc, ObjectKind, PlacedObject};
use std::f64::consts::TAU;

/// Slack for floating-point noise between placement and re-derivation.
pub const AUDIT_TOLERANCE: f64 = 1e-9;

/// An object in a scene, with the disc index for multi-disc footprints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub kind: ObjectKind,
    pub index: usize,
    pub disc: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Violation {
    Overlap {
        a: ObjectRef,
        b: ObjectRef,
        distance: f64,
        required: f64,
    },
    OutOfBounds {
        object: ObjectRef,
        center: [f64; 2],
        radius: f64,
    },
}

/// Effective centre of a compact object: the cloud mean plus the bbox
/// correction recomputed from the kind's template at the object's heading.
///
/// The cloud mean is the only positional input, so a cloud that drifted from
/// its footprint is caught.
pub fn derive_center(object: &PlacedObject) -> Option<[f64; 2]> {
    let mean = object.points.xy_mean()?;
    let c = bbox_correction(object.kind, object.direction.to_degrees());
    Some([mean[0] + c[0], mean[1] + c[1]])
}

/// Circle through three points, `None` when they are (nearly) collinear.
fn circumcircle(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> Option<[f64; 2]> {
    let (bx, by) = (b[0] - a[0], b[1] - a[1]);
    let (cx, cy) = (c[0] - a[0], c[1] - a[1]);
    let (b2, c2) = (bx * bx + by * by, cx * cx + cy * cy);
    let d = 2.0 * (bx * cy - by * cx);
    if d.abs() <= 1e-9 * (b2 + c2) {
        return None;
    }
    Some([a[0] + (cy * b2 - by * c2) / d, a[1] + (bx * c2 - cx * b2) / d])
}

/// Spine discs of a curved barrier, if its cloud describes an arc.
///
/// Rows are layer-major; the first layer's first, middle and last stations
/// pin the circle, and the mean distance of all rows is the spine radius.
fn derive_arc(barrier: &PlacedObject, count: usize, radius: f64) -> Option<Vec<Disc>> {
    let rows = barrier.points.rows();
    let per_layer = rows.len() / ObjectKind::Barrier.local_template().len();
    if per_layer < 3 {
        return None;
    }
    let xy = |i: usize| [rows[i][0], rows[i][1]];
    let (first, mid, last) = (xy(0), xy(per_layer / 2), xy(per_layer - 1));
    let center = circumcircle(first, mid, last)?;

    let spine_radius = rows
        .iter()
        .map(|r| (r[0] - center[0]).hypot(r[1] - center[1]))
        .sum::<f64>()
        / rows.len() as f64;

    let angle = |p: [f64; 2]| (p[1] - center[1]).atan2(p[0] - center[0]);
    let start = angle(first);
    let ccw_end = (angle(last) - start).rem_euclid(TAU);
    let ccw_mid = (angle(mid) - start).rem_euclid(TAU);
    let sweep = if ccw_mid <= ccw_end { ccw_end } else { ccw_end - TAU };

    Some(
        (0..count)
            .map(|i| {
                let (sin, cos) = (start + sweep * (i as f64 + 0.5) / count as f64).sin_cos();
                Disc::new(
                    [center[0] + spine_radius * cos, center[1] + spine_radius * sin],
                    radius,
                )
            })
            .collect(),
    )
}

/// Spine discs of a barrier recovered from its cloud.
pub fn derive_spine(barrier: &PlacedObject) -> Vec<Disc> {
    let recorded = barrier.footprint.discs();
    let Some(first) = recorded.first() else {
        return Vec::new();
    };
    if barrier.points.is_empty() {
        return Vec::new();
    }
    if let Some(arc) = derive_arc(barrier, recorded.len(), first.radius) {
        return arc;
    }

    // Straight: heading 0 points along +Y; u is the spine direction, n the
    // lateral axis.
    let (sin, cos) = barrier.direction.sin_cos();
    let u = [-sin, cos];
    let n = [cos, sin];

    let rows = barrier.points.rows();
    let mut s_min = f64::INFINITY;
    let mut s_max = f64::NEG_INFINITY;
    let mut lateral = 0.0;
    for r in rows {
        let s = r[0] * u[0] + r[1] * u[1];
        s_min = s_min.min(s);
        s_max = s_max.max(s);
        lateral += r[0] * n[0] + r[1] * n[1];
    }
    lateral /= rows.len() as f64;

    let count = recorded.len();
    let step = (s_max - s_min) / count as f64;
    (0..count)
        .map(|i| {
            let s = s_min + (i as f64 + 0.5) * step;
            Disc::new(
                [lateral * n[0] + s * u[0], lateral * n[1] + s * u[1]],
                first.radius,
            )
        })
        .collect()
}

fn compact_disc(object: &PlacedObject) -> Option<Disc> {
    let radius = object.footprint.discs().first()?.radius;
    Some(Disc::new(derive_center(object)?, radius))
}

/// Find every overlap and out-of-bounds footprint in `scene`.
///
/// Read-only; an empty result means the scene is consistent.
pub fn audit(scene: &Scene) -> Vec<Violation> {
    let mut discs: Vec<(ObjectRef, Disc)> = Vec::new();
    for (disc, d) in derive_spine(&scene.barrier).into_iter().enumerate() {
        discs.push((
            ObjectRef {
                kind: ObjectKind::Barrier,
                index: 0,
                disc,
            },
            d,
        ));
    }
    for kind in [ObjectKind::Light, ObjectKind::Vehicle, ObjectKind::Pedestrian] {
        for (index, object) in scene.objects(kind).iter().enumerate() {
            if let Some(d) = compact_disc(object) {
                discs.push((ObjectRef { kind, index, disc: 0 }, d));
            }
        }
    }

    audit_discs(&discs, &scene.world, scene.safety_buffer)
}

/// Pairwise and bounds check over labelled discs.
///
/// Bounds apply to dynamic discs only; static pairs are skipped.
pub fn audit_discs(discs: &[(ObjectRef, Disc)], world: &World, safety_buffer: f64) -> Vec<Violation> {
    let mut violations = Vec::new();
    let (xs, ys) = (world.x, world.y);

    for (i, (ra, a)) in discs.iter().enumerate() {
        if !ra.kind.is_static() {
            let inside = xs.min + a.radius - AUDIT_TOLERANCE <= a.center[0]
                && a.center[0] <= xs.max - a.radius + AUDIT_TOLERANCE
                && ys.min + a.radius - AUDIT_TOLERANCE <= a.center[1]
                && a.center[1] <= ys.max - a.radius + AUDIT_TOLERANCE;
            if !inside {
                violations.push(Violation::OutOfBounds {
                    object: *ra,
                    center: a.center,
                    radius: a.radius,
                });
            }
        }

        for (rb, b) in &discs[i + 1..] {
            if ra.kind.is_static() && rb.kind.is_static() {
                continue;
            }
            let distance = a.distance_to(b);
            let required = a.required_separation(b, safety_buffer);
            if distance < required - AUDIT_TOLERANCE {
                violations.push(Violation::Overlap {
                    a: *ra,
                    b: *rb,
                    distance,
                    required,
                });
            }
        }
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::{assemble, DynamicObjects};
    use crate::config::SceneConfig;
    use crate::layout::build_layout;
    use crate::placement::PlacementStats;
    use shape_models::{instantiate, CurvedBarrier, PointCloud, StraightBarrier};

    fn scene_with(vehicles: Vec<PlacedObject>) -> Scene {
        let layout = build_layout(&SceneConfig::default()).unwrap();
        let mut vehicle_stats = PlacementStats::empty(ObjectKind::Vehicle);
        vehicle_stats.requested = vehicles.len();
        vehicle_stats.placed = vehicles.len();
        assemble(
            layout,
            DynamicObjects {
                seed: 0,
                safety_buffer: 0.5,
                vehicles,
                pedestrians: Vec::new(),
                vehicle_stats,
                pedestrian_stats: PlacementStats::empty(ObjectKind::Pedestrian),
            },
        )
    }

    #[test]
    fn derived_center_matches_footprint() {
        for dir in [0.0, 180.0, 70.0] {
            let obj = instantiate(ObjectKind::Vehicle, [8.0, 9.0], dir, 10.0, 3.5);
            let derived = derive_center(&obj).unwrap();
            let eff = obj.effective_center().unwrap();
            assert!((derived[0] - eff[0]).abs() < AUDIT_TOLERANCE);
            assert!((derived[1] - eff[1]).abs() < AUDIT_TOLERANCE);
        }
    }

    #[test]
    fn derived_spine_matches_recorded_discs() {
        for (length, dir) in [(28.0, 0.0), (27.3, 0.0), (12.0, 90.0), (10.0, 30.0)] {
            let barrier = StraightBarrier {
                start: [3.0, 4.0],
                direction_deg: dir,
                length,
                station_spacing: 0.5,
                disc_radius: 0.75,
                segments: 20,
            }
            .instantiate();
            let derived = derive_spine(&barrier);
            let recorded = barrier.footprint.discs();
            assert_eq!(derived.len(), recorded.len());
            for (d, r) in derived.iter().zip(recorded) {
                assert!(d.distance_to(r) < 1e-9, "len {length} dir {dir}: {d:?} vs {r:?}");
                assert_eq!(d.radius, r.radius);
            }
        }
    }

    #[test]
    fn clean_scene_has_no_violations() {
        let scene = scene_with(vec![
            instantiate(ObjectKind::Vehicle, [5.0, 8.0], 0.0, 10.0, 3.5),
            instantiate(ObjectKind::Vehicle, [22.0, 20.0], 180.0, -10.0, 3.5),
        ]);
        assert!(audit(&scene).is_empty());
    }

    #[test]
    fn overlapping_vehicles_reported() {
        let scene = scene_with(vec![
            instantiate(ObjectKind::Vehicle, [5.0, 8.0], 0.0, 10.0, 3.5),
            instantiate(ObjectKind::Vehicle, [5.0, 13.0], 0.0, 10.0, 3.5),
        ]);
        let violations = audit(&scene);
        assert_eq!(violations.len(), 1);
        match violations[0] {
            Violation::Overlap { a, b, distance, required } => {
                assert_eq!(a.kind, ObjectKind::Vehicle);
                assert_eq!((a.index, b.index), (0, 1));
                assert!((distance - 5.0).abs() < 1e-9);
                assert_eq!(required, 7.5);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn vehicle_on_barrier_reported() {
        let scene = scene_with(vec![instantiate(ObjectKind::Vehicle, [14.0, 10.0], 0.0, 10.0, 3.5)]);
        let violations = audit(&scene);
        assert!(!violations.is_empty());
        assert!(violations.iter().all(|v| matches!(
            v,
            Violation::Overlap { a, b, .. }
                if a.kind == ObjectKind::Barrier && b.kind == ObjectKind::Vehicle
        )));
    }

    #[test]
    fn out_of_bounds_reported() {
        let scene = scene_with(vec![instantiate(ObjectKind::Vehicle, [2.0, 8.0], 0.0, 10.0, 3.5)]);
        let violations = audit(&scene);
        assert!(violations
            .iter()
            .any(|v| matches!(v, Violation::OutOfBounds { object, .. } if object.kind == ObjectKind::Vehicle)));
    }

    #[test]
    fn audit_leaves_scene_untouched() {
        let scene = scene_with(vec![instantiate(ObjectKind::Vehicle, [5.0, 8.0], 0.0, 10.0, 3.5)]);
        let before = scene.clone();
        let _ = audit(&scene);
        assert_eq!(scene, before);
    }

    #[test]
    fn derived_arc_matches_recorded_discs() {
        for (start_deg, sweep_deg, radius) in [(90.0, 90.0, 20.0), (0.0, 180.0, 10.0), (200.0, -120.0, 12.0)] {
            let barrier = CurvedBarrier {
                center: [35.0, 5.0],
                radius,
                start_deg,
                sweep_deg,
                station_spacing: 0.5,
                disc_radius: 0.75,
                segments: 23,
            }
            .instantiate();
            let derived = derive_spine(&barrier);
            let recorded = barrier.footprint.discs();
            assert_eq!(derived.len(), 23);
            for (d, r) in derived.iter().zip(recorded) {
                assert!(d.distance_to(r) < 1e-9, "sweep {sweep_deg}: {d:?} vs {r:?}");
                assert_eq!(d.radius, r.radius);
            }
        }
    }

    #[test]
    fn drifted_cloud_is_caught() {
        let mut obj = instantiate(ObjectKind::Vehicle, [5.0, 8.0], 0.0, 10.0, 3.5);
        obj.points = PointCloud::new(
            obj.points
                .rows()
                .iter()
                .map(|r| [r[0] - 4.0, r[1], r[2], r[3]])
                .collect(),
        );
        let derived = derive_center(&obj).unwrap();
        let eff = obj.effective_center().unwrap();
        assert!((eff[0] - derived[0] - 4.0).abs() < 1e-9);

        let scene = scene_with(vec![obj]);
        assert!(audit(&scene)
            .iter()
            .any(|v| matches!(v, Violation::OutOfBounds { object, .. } if object.kind == ObjectKind::Vehicle)));
    }
}
