//! Batch metrics: per-kind placement counts, fulfillment, audit results.

use crate::assembly::Scene;
use crate::placement::PlacementStats;
use serde::{Deserialize, Serialize};
use shape_models::ObjectKind;

/// Placement totals for one kind across many scenes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KindTally {
    pub kind: ObjectKind,
    pub requested: u64,
    pub placed: u64,
    pub failed_slots: u64,
    pub attempts: u64,
    /// Fewest objects placed in a single scene
    pub min_placed: Option<usize>,
    /// Most objects placed in a single scene
    pub max_placed: Option<usize>,
}

impl KindTally {
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            requested: 0,
            placed: 0,
            failed_slots: 0,
            attempts: 0,
            min_placed: None,
            max_placed: None,
        }
    }

    pub fn record(&mut self, stats: &PlacementStats) {
        self.requested += stats.requested as u64;
        self.placed += stats.placed as u64;
        self.failed_slots += stats.failed_slots as u64;
        self.attempts += stats.attempts;
        self.min_placed = Some(self.min_placed.map_or(stats.placed, |m| m.min(stats.placed)));
        self.max_placed = Some(self.max_placed.map_or(stats.placed, |m| m.max(stats.placed)));
    }

    pub fn merge(&mut self, other: &KindTally) {
        self.requested += other.requested;
        self.placed += other.placed;
        self.failed_slots += other.failed_slots;
        self.attempts += other.attempts;
        self.min_placed = match (self.min_placed, other.min_placed) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self.max_placed = match (self.max_placed, other.max_placed) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
    }

    /// placed / requested; 1.0 when nothing was requested.
    pub fn fulfillment_rate(&self) -> f64 {
        if self.requested == 0 {
            return 1.0;
        }
        self.placed as f64 / self.requested as f64
    }

    /// Mean attempts per accepted object.
    pub fn attempts_per_placement(&self) -> f64 {
        if self.placed == 0 {
            return 0.0;
        }
        self.attempts as f64 / self.placed as f64
    }
}

/// Accumulated statistics over a batch of scenes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub scenes: u64,
    /// Scenes with at least one unfilled slot
    pub partial_scenes: u64,
    pub vehicles: KindTally,
    pub pedestrians: KindTally,
    pub total_scatterers: u64,
    /// Violations found by the auditor (should stay 0)
    pub violations: u64,
}

impl Default for BatchSummary {
    fn default() -> Self {
        Self {
            scenes: 0,
            partial_scenes: 0,
            vehicles: KindTally::new(ObjectKind::Vehicle),
            pedestrians: KindTally::new(ObjectKind::Pedestrian),
            total_scatterers: 0,
            violations: 0,
        }
    }
}

impl BatchSummary {
    /// Add one scene and the number of violations its audit reported.
    pub fn accumulate(&mut self, scene: &Scene, violations: usize) {
        self.scenes += 1;
        if !scene.fully_placed() {
            self.partial_scenes += 1;
        }
        self.vehicles.record(&scene.vehicle_stats);
        self.pedestrians.record(&scene.pedestrian_stats);
        self.total_scatterers += scene.point_count() as u64;
        self.violations += violations as u64;
    }

    pub fn merge(&mut self, other: &BatchSummary) {
        self.scenes += other.scenes;
        self.partial_scenes += other.partial_scenes;
        self.vehicles.merge(&other.vehicles);
        self.pedestrians.merge(&other.pedestrians);
        self.total_scatterers += other.total_scatterers;
        self.violations += other.violations;
    }

    pub fn tally(&self, kind: ObjectKind) -> Option<&KindTally> {
        match kind {
            ObjectKind::Vehicle => Some(&self.vehicles),
            ObjectKind::Pedestrian => Some(&self.pedestrians),
            ObjectKind::Light | ObjectKind::Barrier => None,
        }
    }

    /// Mean objects placed per scene for `kind`.
    pub fn mean_placed(&self, kind: ObjectKind) -> f64 {
        match self.tally(kind) {
            Some(t) if self.scenes > 0 => t.placed as f64 / self.scenes as f64,
            _ => 0.0,
        }
    }

    pub fn mean_scatterers(&self) -> f64 {
        if self.scenes == 0 {
            return 0.0;
        }
        self.total_scatterers as f64 / self.scenes as f64
    }

    /// Fulfillment over both dynamic kinds combined.
    pub fn fulfillment_rate(&self) -> f64 {
        let requested = self.vehicles.requested + self.pedestrians.requested;
        if requested == 0 {
            return 1.0;
        }
        (self.vehicles.placed + self.pedestrians.placed) as f64 / requested as f64
    }
}
