//! Rejection-sampling placement of dynamic objects.
//!
//! # Per-slot state machine
//! ```text
//! ATTEMPT ──ok──▶ ACCEPT
//!    │ conflict
//!    ▼
//! RETRY (attempt < max_attempts) ──▶ ATTEMPT
//!    │ cap reached
//!    ▼
//!  FAIL (slot contributes nothing)
//! ```
//!
//! Each attempt draws, in order: x, y, direction index, velocity index.
//! The obstacle set is an explicit [`FootprintArena`] moved into each call and
//! handed back with the result, so kinds placed later see everything placed
//! earlier and nothing is ever evicted.

use crate::config::{validate_geometry, KindConfig};
use crate::error::{Result, SceneError};
use crate::world::World;
use rand::Rng;
use serde::{Deserialize, Serialize};
use shape_models::{instantiate, Disc, ObjectKind, PlacedObject};
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// Obstacle arena
// ---------------------------------------------------------------------------

/// Obstacle disc tagged with the kind that owns it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArenaEntry {
    pub kind: ObjectKind,
    pub disc: Disc,
}

/// Every footprint disc accepted so far, static ones first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FootprintArena {
    entries: Vec<ArenaEntry>,
}

impl FootprintArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: ObjectKind, disc: Disc) {
        self.entries.push(ArenaEntry { kind, disc });
    }

    pub fn extend<I: IntoIterator<Item = Disc>>(&mut self, kind: ObjectKind, discs: I) {
        self.entries
            .extend(discs.into_iter().map(|disc| ArenaEntry { kind, disc }));
    }

    pub fn entries(&self) -> &[ArenaEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First obstacle `disc` fails to clear, if any.
    pub fn first_conflict(&self, disc: &Disc, safety_buffer: f64) -> Option<&ArenaEntry> {
        self.entries
            .iter()
            .find(|e| !disc.clears(&e.disc, safety_buffer))
    }
}

// ---------------------------------------------------------------------------
// Request / limits / results
// ---------------------------------------------------------------------------

/// What to place for one kind.
#[derive(Clone, Copy, Debug)]
pub struct PlacementRequest<'a> {
    pub kind: ObjectKind,
    pub target_count: usize,
    pub radius: f64,
    pub directions_deg: &'a [f64],
    pub velocities: &'a [f64],
}

impl<'a> PlacementRequest<'a> {
    pub fn from_config(kind: ObjectKind, config: &'a KindConfig, target_count: usize) -> Self {
        Self {
            kind,
            target_count,
            radius: config.radius,
            directions_deg: &config.directions_deg,
            velocities: &config.velocities,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacementLimits {
    pub safety_buffer: f64,
    pub max_attempts: u32,
}

/// Result of one slot.
#[derive(Clone, Debug, PartialEq)]
pub enum SlotOutcome {
    Accepted { object: PlacedObject, attempts: u32 },
    Exhausted { attempts: u32 },
}

/// Per-kind placement counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementStats {
    pub kind: ObjectKind,
    /// Target count drawn for this scene
    pub requested: usize,
    pub placed: usize,
    /// Slots that hit the attempt cap
    pub failed_slots: usize,
    /// Attempts spent across all slots
    pub attempts: u64,
}

impl PlacementStats {
    pub fn empty(kind: ObjectKind) -> Self {
        Self {
            kind,
            requested: 0,
            placed: 0,
            failed_slots: 0,
            attempts: 0,
        }
    }

    /// placed / requested; 1.0 when nothing was requested.
    pub fn fulfillment(&self) -> f64 {
        if self.requested == 0 {
            1.0
        } else {
            self.placed as f64 / self.requested as f64
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    /// Accepted objects in slot order; never longer than the target count
    pub objects: Vec<PlacedObject>,
    /// Arena including the newly accepted discs
    pub arena: FootprintArena,
    pub stats: PlacementStats,
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

/// Place up to `request.target_count` objects of one kind.
///
/// A zero target count returns immediately without drawing from `rng` or
/// validating the request. Otherwise an infeasible request (radius too large
/// for the world, a count beyond
/// [`max_count`](crate::config::max_count), empty domain, zero attempt
/// cap) is an error and nothing is drawn. Exhausted slots are not errors.
pub fn place_objects<R: Rng + ?Sized>(
    rng: &mut R,
    request: &PlacementRequest<'_>,
    world: &World,
    limits: &PlacementLimits,
    arena: FootprintArena,
) -> Result<Placement> {
    let mut stats = PlacementStats::empty(request.kind);
    if request.target_count == 0 {
        return Ok(Placement {
            objects: Vec::new(),
            arena,
            stats,
        });
    }

    validate_geometry(
        request.kind,
        request.target_count,
        request.radius,
        request.directions_deg,
        request.velocities,
        world,
    )?;
    if limits.max_attempts == 0 {
        return Err(SceneError::InvalidConfiguration(
            "max_attempts must be at least 1".into(),
        ));
    }
    if !(limits.safety_buffer.is_finite() && limits.safety_buffer >= 0.0) {
        return Err(SceneError::InvalidConfiguration(format!(
            "safety buffer {} must be non-negative",
            limits.safety_buffer
        )));
    }

    let mut arena = arena;
    let mut objects = Vec::new();
    stats.requested = request.target_count;

    for slot in 0..request.target_count {
        match place_slot(rng, request, world, limits, &arena) {
            SlotOutcome::Accepted { object, attempts } => {
                stats.attempts += u64::from(attempts);
                for disc in object.footprint.discs() {
                    arena.push(request.kind, *disc);
                }
                debug!(
                    kind = %request.kind,
                    slot,
                    attempts,
                    x = object.requested_center[0],
                    y = object.requested_center[1],
                    "slot accepted"
                );
                objects.push(object);
            }
            SlotOutcome::Exhausted { attempts } => {
                stats.attempts += u64::from(attempts);
                stats.failed_slots += 1;
                warn!(
                    kind = %request.kind,
                    slot,
                    attempts,
                    obstacles = arena.len(),
                    "slot exhausted its attempt cap"
                );
            }
        }
    }
    stats.placed = objects.len();

    Ok(Placement {
        objects,
        arena,
        stats,
    })
}

/// Run one slot's attempts against a fixed arena.
pub fn place_slot<R: Rng + ?Sized>(
    rng: &mut R,
    request: &PlacementRequest<'_>,
    world: &World,
    limits: &PlacementLimits,
    arena: &FootprintArena,
) -> SlotOutcome {
    let (xs, ys) = world.sampling_box(request.radius);

    for attempt in 1..=limits.max_attempts {
        let x = xs.min + rng.gen::<f64>() * xs.extent();
        let y = ys.min + rng.gen::<f64>() * ys.extent();
        let direction = request.directions_deg[rng.gen_range(0..request.directions_deg.len())];
        let velocity = request.velocities[rng.gen_range(0..request.velocities.len())];

        let object = instantiate(request.kind, [x, y], direction, velocity, request.radius);
        // Centre correction can push the disc out of the pre-shrunk box.
        let fits = object
            .footprint
            .discs()
            .iter()
            .all(|d| world.contains_disc(d) && arena.first_conflict(d, limits.safety_buffer).is_none());
        if fits {
            return SlotOutcome::Accepted {
                object,
                attempts: attempt,
            };
        }
    }
    SlotOutcome::Exhausted {
        attempts: limits.max_attempts,
    }
}
