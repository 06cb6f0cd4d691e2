//! Scene generation configuration.
//!
//! All geometry is in metres, velocities in m/s, directions in degrees
//! (0° = +Y, counter-clockwise positive).

use crate::error::{Result, SceneError};
use crate::world::World;
use rand::Rng;
use serde::{Deserialize, Serialize};
use shape_models::template::BARRIER_STATION_SPACING;
use shape_models::{CurvedBarrier, ObjectKind, PlacedObject, StraightBarrier};

/// Upper bound on barrier stations and footprint discs.
pub const MAX_BARRIER_STATIONS: usize = 100_000;

/// A kind may request at most this multiple of the world area in disc area.
pub const MAX_AREA_OVERSUBSCRIPTION: f64 = 4.0;

// ---------------------------------------------------------------------------
// Per-kind settings
// ---------------------------------------------------------------------------

/// Inclusive range of target counts; one value is drawn per scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: usize,
    pub max: usize,
}

impl CountRange {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn exactly(n: usize) -> Self {
        Self { min: n, max: n }
    }

    /// Draw a target count. Always consumes one value from `rng`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.gen_range(self.min..=self.max)
    }
}

/// Settings for one dynamically placed kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KindConfig {
    /// How many objects to request per scene
    pub count: CountRange,
    /// Collision radius of the footprint disc
    pub radius: f64,
    /// Discrete heading domain (degrees), drawn uniformly
    pub directions_deg: Vec<f64>,
    /// Discrete signed speed domain (m/s), drawn uniformly
    pub velocities: Vec<f64>,
}

impl KindConfig {
    /// Cars: measured circumradius ~3.2 m, padded to 3.5 m.
    pub fn vehicles() -> Self {
        Self {
            count: CountRange::exactly(3),
            radius: 3.5,
            directions_deg: vec![0.0, 180.0],
            velocities: vec![10.0, -10.0],
        }
    }

    pub fn pedestrians() -> Self {
        Self {
            count: CountRange::new(4, 5),
            radius: 0.6,
            directions_deg: vec![0.0, 180.0],
            velocities: vec![2.0, -2.0],
        }
    }

    /// Disc area requested at the upper end of the count range.
    pub fn max_requested_area(&self) -> f64 {
        self.count.max as f64 * std::f64::consts::PI * self.radius * self.radius
    }
}

// ---------------------------------------------------------------------------
// Static layout settings
// ---------------------------------------------------------------------------

/// Spine geometry of the barrier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BarrierShape {
    /// Straight along +Y on the world's x midline, from the world's y minimum
    #[default]
    Median,
    /// Circular arc; angles are polar degrees, CCW from +X
    Arc {
        center: [f64; 2],
        radius: f64,
        start_deg: f64,
        sweep_deg: f64,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarrierConfig {
    #[serde(default)]
    pub shape: BarrierShape,
    /// Radius of each footprint disc
    pub radius: f64,
    /// Number of discs approximating the barrier
    pub segments: usize,
    /// Scatterer station spacing along the barrier
    pub station_spacing: f64,
    /// Median length from the world's y minimum. `None` spans the whole
    /// world. Ignored for arcs.
    pub length: Option<f64>,
}

impl Default for BarrierConfig {
    fn default() -> Self {
        Self {
            shape: BarrierShape::Median,
            radius: 0.75,
            segments: 20,
            station_spacing: BARRIER_STATION_SPACING,
            length: None,
        }
    }
}

/// Light position relative to the barrier spine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightMount {
    /// Signed offset from the spine (positive = +X side of the median,
    /// outward for an arc)
    pub lateral_offset: f64,
    /// Distance along the spine from its start
    pub along: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightConfig {
    pub radius: f64,
    pub mounts: Vec<LightMount>,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            radius: 1.5,
            mounts: vec![
                LightMount {
                    lateral_offset: 1.0,
                    along: 3.0,
                },
                LightMount {
                    lateral_offset: -1.0,
                    along: 17.0,
                },
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// SceneConfig
// ---------------------------------------------------------------------------

/// Full configuration for generating one scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub world: World,
    pub barrier: BarrierConfig,
    pub lights: LightConfig,
    pub vehicles: KindConfig,
    pub pedestrians: KindConfig,
    /// Extra clearance beyond disc contact for every pair test
    pub safety_buffer: f64,
    /// Attempts per slot before the slot is given up
    pub max_attempts: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            world: World::default(),
            barrier: BarrierConfig::default(),
            lights: LightConfig::default(),
            vehicles: KindConfig::vehicles(),
            pedestrians: KindConfig::pedestrians(),
            safety_buffer: 0.5,
            max_attempts: 100,
        }
    }
}

impl SceneConfig {
    /// Parse a JSON configuration and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn kind(&self, kind: ObjectKind) -> Option<&KindConfig> {
        match kind {
            ObjectKind::Vehicle => Some(&self.vehicles),
            ObjectKind::Pedestrian => Some(&self.pedestrians),
            ObjectKind::Light | ObjectKind::Barrier => None,
        }
    }

    /// Median x position (world midline).
    pub fn barrier_x(&self) -> f64 {
        self.world.x.midpoint()
    }

    /// Effective spine length: the median length or the arc length.
    pub fn barrier_length(&self) -> f64 {
        match self.barrier.shape {
            BarrierShape::Median => self.barrier.length.unwrap_or_else(|| self.world.y.extent()),
            BarrierShape::Arc {
                radius, sweep_deg, ..
            } => radius * sweep_deg.to_radians().abs(),
        }
    }

    fn median_barrier(&self) -> StraightBarrier {
        StraightBarrier {
            start: [self.barrier_x(), self.world.y.min],
            direction_deg: 0.0,
            length: self.barrier_length(),
            station_spacing: self.barrier.station_spacing,
            disc_radius: self.barrier.radius,
            segments: self.barrier.segments,
        }
    }

    /// The arc barrier, when the shape is an arc.
    pub fn curved_barrier(&self) -> Option<CurvedBarrier> {
        match self.barrier.shape {
            BarrierShape::Median => None,
            BarrierShape::Arc {
                center,
                radius,
                start_deg,
                sweep_deg,
            } => Some(CurvedBarrier {
                center,
                radius,
                start_deg,
                sweep_deg,
                station_spacing: self.barrier.station_spacing,
                disc_radius: self.barrier.radius,
                segments: self.barrier.segments,
            }),
        }
    }

    /// Realize the configured barrier.
    pub fn barrier_object(&self) -> PlacedObject {
        match self.curved_barrier() {
            Some(arc) => arc.instantiate(),
            None => self.median_barrier().instantiate(),
        }
    }

    /// World point `along` metres down the spine, offset `lateral` metres.
    pub fn spine_point(&self, along: f64, lateral: f64) -> [f64; 2] {
        match self.curved_barrier() {
            Some(arc) => arc.point_at(along, lateral),
            None => [self.barrier_x() + lateral, self.world.y.min + along],
        }
    }

    /// World positions of the lights, in mount order.
    pub fn light_positions(&self) -> Vec<[f64; 2]> {
        self.lights
            .mounts
            .iter()
            .map(|m| self.spine_point(m.along, m.lateral_offset))
            .collect()
    }

    /// Free gap between consecutive barrier discs (negative when they overlap).
    /// `None` when the barrier has fewer than two discs.
    pub fn barrier_disc_gap(&self) -> Option<f64> {
        let length = self.barrier_length();
        if self.barrier.segments < 2 || length <= 0.0 {
            return None;
        }
        let step = length / self.barrier.segments as f64;
        let pitch = match self.barrier.shape {
            BarrierShape::Median => step,
            // Chord between neighbouring disc centres.
            BarrierShape::Arc { radius, .. } => 2.0 * radius * (step / (2.0 * radius)).sin(),
        };
        Some(pitch - 2.0 * self.barrier.radius)
    }

    /// True when an object could sit in a gap between barrier discs: the
    /// safety buffer is smaller than half the gap.
    pub fn barrier_gap_risk(&self) -> bool {
        self.barrier_disc_gap()
            .is_some_and(|gap| self.safety_buffer < gap / 2.0)
    }

    /// Sum of requested disc areas divided by world area, at maximum counts.
    pub fn requested_area_ratio(&self) -> f64 {
        (self.vehicles.max_requested_area() + self.pedestrians.max_requested_area())
            / self.world.area()
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    /// Check everything needed to build the static layout.
    pub fn validate_layout(&self) -> Result<()> {
        for (axis, range) in [("x", &self.world.x), ("y", &self.world.y), ("z", &self.world.z)] {
            if !range.is_valid() {
                return Err(SceneError::InvalidWorld {
                    axis,
                    min: range.min,
                    max: range.max,
                });
            }
        }

        let b = &self.barrier;
        if !(b.radius.is_finite() && b.radius >= 0.0) {
            return Err(SceneError::InvalidConfiguration(format!(
                "barrier radius {} must be non-negative",
                b.radius
            )));
        }
        check_fits(ObjectKind::Barrier, b.radius, &self.world)?;
        if !(b.station_spacing.is_finite() && b.station_spacing > 0.0) {
            return Err(SceneError::InvalidConfiguration(format!(
                "barrier station spacing {} must be positive",
                b.station_spacing
            )));
        }
        match self.barrier.shape {
            BarrierShape::Median => {
                let length = self.barrier_length();
                if !(length.is_finite() && length >= 0.0 && length <= self.world.y.extent()) {
                    return Err(SceneError::InvalidConfiguration(format!(
                        "barrier length {} must lie within [0, {}]",
                        length,
                        self.world.y.extent()
                    )));
                }
            }
            BarrierShape::Arc {
                center,
                radius,
                start_deg,
                sweep_deg,
            } => {
                if !(center.iter().all(|c| c.is_finite()) && start_deg.is_finite()) {
                    return Err(SceneError::InvalidConfiguration(
                        "barrier arc centre and start angle must be finite".into(),
                    ));
                }
                if !(radius.is_finite() && radius > 0.0) {
                    return Err(SceneError::InvalidConfiguration(format!(
                        "barrier arc radius {radius} must be positive"
                    )));
                }
                if !(sweep_deg.is_finite() && sweep_deg.abs() < 360.0) {
                    return Err(SceneError::InvalidConfiguration(format!(
                        "barrier arc sweep {sweep_deg}° must lie strictly within ±360°"
                    )));
                }
            }
        }

        let stations = self.barrier_length() / b.station_spacing;
        if stations > MAX_BARRIER_STATIONS as f64 || b.segments > MAX_BARRIER_STATIONS {
            return Err(SceneError::InvalidConfiguration(format!(
                "barrier needs {:.0} stations and {} discs; at most {} each are allowed",
                stations.ceil(),
                b.segments,
                MAX_BARRIER_STATIONS
            )));
        }
        if let Some((lo, hi)) = self.barrier_object().points.xy_bounds() {
            let slack = 1e-9;
            let inside = lo[0] >= self.world.x.min - slack
                && hi[0] <= self.world.x.max + slack
                && lo[1] >= self.world.y.min - slack
                && hi[1] <= self.world.y.max + slack;
            if !inside {
                return Err(SceneError::InvalidConfiguration(format!(
                    "barrier spans ({:.2}, {:.2})..({:.2}, {:.2}), outside the world",
                    lo[0], lo[1], hi[0], hi[1]
                )));
            }
        }

        if !(self.lights.radius.is_finite() && self.lights.radius > 0.0) {
            return Err(SceneError::InvalidConfiguration(format!(
                "light radius {} must be positive",
                self.lights.radius
            )));
        }
        check_fits(ObjectKind::Light, self.lights.radius, &self.world)?;
        for (index, p) in self.light_positions().into_iter().enumerate() {
            if !self.world.contains_point(p) {
                return Err(SceneError::LightOutsideWorld {
                    index,
                    x: p[0],
                    y: p[1],
                });
            }
        }
        Ok(())
    }

    /// Full fail-fast validation, run before any sampling.
    pub fn validate(&self) -> Result<()> {
        self.validate_layout()?;

        if !(self.safety_buffer.is_finite() && self.safety_buffer >= 0.0) {
            return Err(SceneError::InvalidConfiguration(format!(
                "safety buffer {} must be non-negative",
                self.safety_buffer
            )));
        }
        if self.max_attempts == 0 {
            return Err(SceneError::InvalidConfiguration(
                "max_attempts must be at least 1".into(),
            ));
        }

        for kind in ObjectKind::DYNAMIC {
            if let Some(cfg) = self.kind(kind) {
                validate_kind(kind, cfg, &self.world)?;
            }
        }
        Ok(())
    }
}

fn check_fits(kind: ObjectKind, radius: f64, world: &World) -> Result<()> {
    for (axis, range) in [("x", &world.x), ("y", &world.y)] {
        if 2.0 * radius >= range.extent() {
            return Err(SceneError::RadiusTooLarge {
                kind,
                radius,
                axis,
                extent: range.extent(),
            });
        }
    }
    Ok(())
}

/// Validate one dynamic kind against the world.
pub fn validate_kind(kind: ObjectKind, cfg: &KindConfig, world: &World) -> Result<()> {
    if cfg.count.min > cfg.count.max {
        return Err(SceneError::InvalidCountRange {
            kind,
            min: cfg.count.min,
            max: cfg.count.max,
        });
    }
    validate_geometry(
        kind,
        cfg.count.max,
        cfg.radius,
        &cfg.directions_deg,
        &cfg.velocities,
        world,
    )
}

/// Largest count of `radius` discs a kind may request in `world`.
pub fn max_count(radius: f64, world: &World) -> usize {
    let disc_area = std::f64::consts::PI * radius * radius;
    (MAX_AREA_OVERSUBSCRIPTION * world.area() / disc_area).ceil() as usize
}

/// Count, radius and domain checks shared by configuration and placement
/// requests.
pub(crate) fn validate_geometry(
    kind: ObjectKind,
    count: usize,
    radius: f64,
    directions_deg: &[f64],
    velocities: &[f64],
    world: &World,
) -> Result<()> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(SceneError::InvalidConfiguration(format!(
            "{kind} radius {radius} must be positive"
        )));
    }
    check_fits(kind, radius, world)?;
    let limit = max_count(radius, world);
    if count > limit {
        return Err(SceneError::CountTooLarge { kind, count, limit });
    }
    if directions_deg.is_empty() {
        return Err(SceneError::EmptyDomain {
            kind,
            domain: "direction",
        });
    }
    if velocities.is_empty() {
        return Err(SceneError::EmptyDomain {
            kind,
            domain: "velocity",
        });
    }
    if directions_deg.iter().chain(velocities).any(|v| !v.is_finite()) {
        return Err(SceneError::InvalidConfiguration(format!(
            "{kind} direction/velocity domains must be finite"
        )));
    }
    Ok(())
}
