//! Rigid transform from local templates to world-space placed objects.
//!
//! # Anchoring
//! The rotated template is translated so its centroid lands on the requested
//! centre. Collision logic reasons about bounding circles, so the footprint is
//! centred on the bounding-box centre instead:
//!
//! effective = requested + (bbox_center(R·T) − centroid(R·T))
//!
//! The realized cloud's mean is therefore the requested centre, and its x/y
//! bounding-box centre is the effective centre.
//!
//! Barriers are swept rather than anchored: the segment template is repeated
//! at stations along a straight or circular spine.

use crate::cloud::{PointCloud, Scatterer};
use crate::footprint::{Disc, Footprint};
use crate::kind::ObjectKind;
use crate::template::BARRIER_SEGMENT;
use nalgebra::{Rotation3, Vector3};
use serde::{Deserialize, Serialize};

/// An object realized in world space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    pub kind: ObjectKind,
    /// Requested placement point (x, y); z is the ground plane.
    pub requested_center: [f64; 2],
    /// Heading in radians, CCW from +Y.
    pub direction: f64,
    /// Scalar velocity carried by every scatterer (m/s)
    pub velocity: f64,
    pub points: PointCloud,
    pub footprint: Footprint,
}

impl PlacedObject {
    /// Effective footprint centre for compact objects.
    pub fn effective_center(&self) -> Option<[f64; 2]> {
        self.footprint.center()
    }
}

/// Rotation about the vertical axis by `direction_deg` (CCW positive).
pub fn heading_rotation(direction_deg: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), direction_deg.to_radians())
}

fn rotated_template(kind: ObjectKind, direction_deg: f64) -> Vec<Vector3<f64>> {
    let rot = heading_rotation(direction_deg);
    kind.local_template()
        .iter()
        .map(|p| rot * Vector3::new(p[0], p[1], p[2]))
        .collect()
}

/// Centroid of the rotated template and its offset to the x/y bbox centre.
fn anchor_offsets(rotated: &[Vector3<f64>]) -> (Vector3<f64>, [f64; 2]) {
    let n = rotated.len() as f64;
    let centroid = rotated.iter().fold(Vector3::zeros(), |acc, p| acc + p) / n;

    let mut lo = [f64::INFINITY; 2];
    let mut hi = [f64::NEG_INFINITY; 2];
    for p in rotated {
        lo[0] = lo[0].min(p.x);
        lo[1] = lo[1].min(p.y);
        hi[0] = hi[0].max(p.x);
        hi[1] = hi[1].max(p.y);
    }
    let correction = [
        (lo[0] + hi[0]) / 2.0 - centroid.x,
        (lo[1] + hi[1]) / 2.0 - centroid.y,
    ];
    (centroid, correction)
}

/// bbox_center(R·T) − centroid(R·T) for `kind` at `direction_deg`.
///
/// Adding this to a cloud mean gives the effective footprint centre.
pub fn bbox_correction(kind: ObjectKind, direction_deg: f64) -> [f64; 2] {
    anchor_offsets(&rotated_template(kind, direction_deg)).1
}

/// Instantiate a compact object of `kind` at `requested_center`.
///
/// Pure: the template is read, never modified.
pub fn instantiate(
    kind: ObjectKind,
    requested_center: [f64; 2],
    direction_deg: f64,
    velocity: f64,
    radius: f64,
) -> PlacedObject {
    let rotated = rotated_template(kind, direction_deg);
    let (centroid, correction) = anchor_offsets(&rotated);

    let effective_center = [
        requested_center[0] + correction[0],
        requested_center[1] + correction[1],
    ];

    let rows: Vec<Scatterer> = rotated
        .iter()
        .map(|p| {
            [
                p.x - centroid.x + requested_center[0],
                p.y - centroid.y + requested_center[1],
                p.z,
                velocity,
            ]
        })
        .collect();

    PlacedObject {
        kind,
        requested_center,
        direction: direction_deg.to_radians(),
        velocity,
        points: PointCloud::new(rows),
        footprint: Footprint::Disc(Disc::new(effective_center, radius)),
    }
}

/// Arc-length stations from 0 to `length`, always including the end.
fn stations(length: f64, spacing: f64) -> Vec<f64> {
    let length = length.max(0.0);
    if spacing <= 0.0 {
        return vec![0.0];
    }
    let count = (length / spacing + 1e-9).floor() as usize + 1;
    let mut stations: Vec<f64> = (0..count).map(|i| i as f64 * spacing).collect();
    // The cloud always ends at the spine end so its extent equals the length.
    if let Some(&last) = stations.last() {
        if length - last > 1e-9 {
            stations.push(length);
        }
    }
    stations
}

/// Straight barrier: the segment template swept along a spine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StraightBarrier {
    /// Spine start (x, y)
    pub start: [f64; 2],
    /// Spine heading in degrees, CCW from +Y
    pub direction_deg: f64,
    /// Spine length (m)
    pub length: f64,
    /// Distance between scatterer stations along the spine (m)
    pub station_spacing: f64,
    /// Radius of each footprint disc (m)
    pub disc_radius: f64,
    /// Number of footprint discs approximating the spine
    pub segments: usize,
}

impl StraightBarrier {
    /// Footprint discs at (i + 0.5)·length/segments along the spine.
    /// Empty for a zero-length spine or zero segments.
    pub fn footprint_discs(&self) -> Vec<Disc> {
        if self.segments == 0 || self.length <= 0.0 {
            return Vec::new();
        }
        let rot = heading_rotation(self.direction_deg);
        let step = self.length / self.segments as f64;
        (0..self.segments)
            .map(|i| {
                let along = rot * Vector3::new(0.0, (i as f64 + 0.5) * step, 0.0);
                Disc::new(
                    [self.start[0] + along.x, self.start[1] + along.y],
                    self.disc_radius,
                )
            })
            .collect()
    }

    /// Realize the barrier: layer-major scatterers, zero velocity.
    pub fn instantiate(&self) -> PlacedObject {
        let rot = heading_rotation(self.direction_deg);
        let stations = stations(self.length, self.station_spacing);

        let mut rows = Vec::with_capacity(BARRIER_SEGMENT.len() * stations.len());
        for layer in &BARRIER_SEGMENT {
            for &s in &stations {
                let p = rot * Vector3::new(layer[0], layer[1] + s, layer[2]);
                rows.push([self.start[0] + p.x, self.start[1] + p.y, p.z, 0.0]);
            }
        }

        let mid = rot * Vector3::new(0.0, self.length.max(0.0) / 2.0, 0.0);
        PlacedObject {
            kind: ObjectKind::Barrier,
            requested_center: [self.start[0] + mid.x, self.start[1] + mid.y],
            direction: self.direction_deg.to_radians(),
            velocity: 0.0,
            points: PointCloud::new(rows),
            footprint: Footprint::Spine(self.footprint_discs()),
        }
    }
}

/// Curved barrier: the segment template swept along a circular arc.
///
/// Angles are polar, CCW from +X. The spine is the arc at `radius`; the
/// segment's lateral axis points away from the arc centre.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurvedBarrier {
    /// Arc centre (x, y)
    pub center: [f64; 2],
    /// Spine radius (m)
    pub radius: f64,
    /// Polar angle of the spine start (degrees)
    pub start_deg: f64,
    /// Signed sweep (degrees); negative runs clockwise
    pub sweep_deg: f64,
    /// Arc-length distance between scatterer stations (m)
    pub station_spacing: f64,
    /// Radius of each footprint disc (m)
    pub disc_radius: f64,
    /// Number of footprint discs approximating the spine
    pub segments: usize,
}

impl CurvedBarrier {
    /// Spine length along the arc.
    pub fn arc_length(&self) -> f64 {
        self.radius.max(0.0) * self.sweep_deg.to_radians().abs()
    }

    /// Polar angle (radians) of the spine point `s` metres from the start.
    fn angle_at(&self, s: f64) -> f64 {
        let turned = if self.radius > 0.0 { s / self.radius } else { 0.0 };
        self.start_deg.to_radians() + self.sweep_deg.signum() * turned
    }

    /// Point `s` metres along the spine, pushed `lateral` metres outward.
    pub fn point_at(&self, s: f64, lateral: f64) -> [f64; 2] {
        let (sin, cos) = self.angle_at(s).sin_cos();
        let r = self.radius + lateral;
        [self.center[0] + r * cos, self.center[1] + r * sin]
    }

    /// Footprint discs at (i + 0.5)·arc_length/segments along the spine.
    /// Empty for a zero-length arc or zero segments.
    pub fn footprint_discs(&self) -> Vec<Disc> {
        let length = self.arc_length();
        if self.segments == 0 || length <= 0.0 {
            return Vec::new();
        }
        let step = length / self.segments as f64;
        (0..self.segments)
            .map(|i| Disc::new(self.point_at((i as f64 + 0.5) * step, 0.0), self.disc_radius))
            .collect()
    }

    /// Realize the barrier: layer-major scatterers, zero velocity.
    ///
    /// The recorded heading is the spine tangent at the arc midpoint.
    pub fn instantiate(&self) -> PlacedObject {
        let length = self.arc_length();
        let stations = stations(length, self.station_spacing);

        let mut rows = Vec::with_capacity(BARRIER_SEGMENT.len() * stations.len());
        for layer in &BARRIER_SEGMENT {
            for &s in &stations {
                let p = self.point_at(s + layer[1], layer[0]);
                rows.push([p[0], p[1], layer[2], 0.0]);
            }
        }

        // Heading 0 is +Y, the CCW tangent at polar angle 0.
        let mid_angle = self.angle_at(length / 2.0);
        let direction = if self.sweep_deg < 0.0 {
            mid_angle + std::f64::consts::PI
        } else {
            mid_angle
        };
        PlacedObject {
            kind: ObjectKind::Barrier,
            requested_center: self.point_at(length / 2.0, 0.0),
            direction,
            velocity: 0.0,
            points: PointCloud::new(rows),
            footprint: Footprint::Spine(self.footprint_discs()),
        }
    }
}
