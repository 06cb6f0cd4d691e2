//! Canonical scatterer templates in each kind's local frame.
//!
//! Local frame: x lateral, y forward (heading 0° = +Y), z up, metres.
//! Templates are fixed data; transforms never mutate them.

/// Passenger car, ~2.4 m × 6 m × 2.2 m. Rows: side panels, roof line,
/// panel fill, centre line, wheels, mirrors.
pub const VEHICLE: [[f64; 3]; 114] = [
    [2.2, 0.0, 0.4], [2.2, 0.0, 1.3], [2.2, 0.6, 1.3], [2.2, 1.0, 1.8],
    [2.2, 4.5, 1.8], [2.2, 5.0, 1.3], [2.2, 6.0, 0.4], [0.2, 0.0, 0.4],
    [0.2, 0.0, 1.3], [0.2, 0.6, 1.3], [0.2, 1.0, 1.8], [0.2, 4.5, 1.8],
    [0.2, 5.0, 1.3], [0.2, 6.0, 0.4], [2.2, 0.0, 0.9], [2.2, 1.5, 2.1],
    [2.2, 2.0, 2.2], [2.2, 2.5, 2.2], [2.2, 3.0, 2.2], [2.2, 3.5, 2.2],
    [2.2, 4.0, 2.1], [2.2, 5.5, 1.2], [2.2, 6.0, 0.9], [0.2, 0.0, 0.9],
    [0.2, 1.5, 2.1], [0.2, 2.0, 2.2], [0.2, 2.5, 2.2], [0.2, 3.0, 2.2],
    [0.2, 3.5, 2.2], [0.2, 4.0, 2.1], [0.2, 5.5, 1.2], [0.2, 6.0, 0.9],
    [2.2, 3.0, 1.8], [2.2, 3.0, 1.0], [2.2, 3.0, 0.7], [2.2, 3.0, 0.4],
    [2.2, 1.0, 1.3], [2.2, 1.4, 1.3], [2.2, 1.8, 1.3], [2.2, 2.2, 1.3],
    [2.2, 2.6, 1.3], [2.2, 3.0, 1.3], [2.2, 3.4, 1.3], [2.2, 3.8, 1.3],
    [2.2, 4.2, 1.3], [2.2, 4.6, 1.3], [2.2, 1.0, 0.9], [2.2, 5.0, 0.8],
    [2.2, 0.6, 0.8], [2.2, 0.4, 0.4], [2.2, 1.4, 0.8], [2.2, 1.6, 0.4],
    [2.2, 5.4, 0.7], [2.2, 5.6, 0.4], [2.2, 4.6, 0.7], [2.2, 4.4, 0.4],
    [2.2, 2.1, 0.4], [2.2, 2.6, 0.4], [2.2, 3.5, 0.4], [2.2, 4.0, 0.4],
    [0.2, 3.0, 1.8], [0.2, 3.0, 1.0], [0.2, 3.0, 0.7], [0.2, 3.0, 0.4],
    [0.2, 1.0, 1.3], [0.2, 1.4, 1.3], [0.2, 1.8, 1.3], [0.2, 2.2, 1.3],
    [0.2, 2.6, 1.3], [0.2, 3.0, 1.3], [0.2, 3.4, 1.3], [0.2, 3.8, 1.3],
    [0.2, 4.2, 1.3], [0.2, 4.6, 1.3], [0.2, 1.0, 0.9], [0.2, 5.0, 0.8],
    [0.2, 0.6, 0.8], [0.2, 0.4, 0.4], [0.2, 1.4, 0.8], [0.2, 1.6, 0.4],
    [0.2, 5.4, 0.7], [0.2, 5.6, 0.4], [0.2, 4.6, 0.7], [0.2, 4.4, 0.4],
    [0.2, 2.1, 0.4], [0.2, 2.6, 0.4], [0.2, 3.5, 0.4], [0.2, 4.0, 0.4],
    [1.2, 0.0, 0.4], [1.2, 0.0, 1.3], [1.2, 0.6, 1.3], [1.2, 5.0, 1.3],
    [1.2, 6.0, 0.4], [1.2, 4.0, 2.1], [1.2, 1.5, 2.1], [1.7, 3.2, 2.2],
    [0.7, 3.2, 2.2], [1.7, 2.5, 2.2], [0.7, 2.5, 2.2], [1.2, 6.0, 0.9],
    [2.2, 1.0, 0.0], [2.2, 0.7, 0.1], [2.2, 1.3, 0.1], [2.2, 5.0, 0.0],
    [2.2, 4.7, 0.1], [2.2, 5.3, 0.1], [0.2, 1.0, 0.0], [0.2, 0.7, 0.1],
    [0.2, 1.3, 0.1], [0.2, 5.0, 0.0], [0.2, 4.7, 0.1], [0.2, 5.3, 0.1],
    [2.4, 4.6, 1.3], [0.0, 4.6, 1.3],
];

/// Pedestrian, ~0.5 m × 0.5 m × 1.8 m.
pub const PEDESTRIAN: [[f64; 3]; 12] = [
    [0.0, 0.0, 0.0], [0.5, 0.5, 0.0], [0.25, 0.3, 1.0], [0.25, 0.3, 1.5],
    [0.25, 0.3, 1.7], [0.4, 0.4, 0.5], [0.1, 0.2, 0.5], [0.25, 0.3, 1.8],
    [0.5, 0.3, 1.4], [0.0, 0.3, 1.4], [0.5, 0.5, 1.0], [0.0, 0.0, 0.9],
];

/// Street light: pole from 2 m to 10 m plus a cross-shaped head at 10 m.
pub const LIGHT: [[f64; 3]; 13] = [
    [0.0, 0.0, 2.0], [0.0, 0.0, 3.0], [0.0, 0.0, 4.0], [0.0, 0.0, 5.0],
    [0.0, 0.0, 6.0], [0.0, 0.0, 7.0], [0.0, 0.0, 8.0], [0.0, 0.0, 9.0],
    [0.0, 0.0, 10.0],
    [-1.0, 0.0, 10.0], [1.0, 0.0, 10.0], [0.0, -1.0, 10.0], [0.0, 1.0, 10.0],
];

/// Barrier segment: one station of the four-layer median (two lateral
/// rows at two heights). A full barrier sweeps it along the spine; the
/// spine is the segment's lateral midline.
pub const BARRIER_SEGMENT: [[f64; 3]; 4] = [
    [0.5, 0.0, 0.0], [-0.5, 0.0, 0.0], [-0.5, 0.0, 1.0], [0.5, 0.0, 1.0],
];

/// Default distance between barrier stations along the spine (m).
pub const BARRIER_STATION_SPACING: f64 = 0.5;
