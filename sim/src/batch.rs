//! Batch generation across seeds.
//!
//! Scenes are independent, so each seed runs on its own rayon worker with a
//! private generator stream. Results are collected in seed order and merged
//! by plain concatenation, which makes the output identical to a sequential
//! loop over the same seeds.

use rayon::prelude::*;
use scene_core::{audit, BatchSummary, Scene, SceneConfig, SceneGenerator};
use serde::{Deserialize, Serialize};
use shape_models::ObjectKind;
use tracing::info;

/// Per-scene line of a batch report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneRecord {
    pub seed: u64,
    pub vehicles: usize,
    pub pedestrians: usize,
    pub failed_slots: usize,
    pub scatterers: usize,
    pub violations: usize,
}

impl SceneRecord {
    pub fn from_scene(scene: &Scene, violations: usize) -> Self {
        Self {
            seed: scene.seed,
            vehicles: scene.count(ObjectKind::Vehicle),
            pedestrians: scene.count(ObjectKind::Pedestrian),
            failed_slots: scene.vehicle_stats.failed_slots + scene.pedestrian_stats.failed_slots,
            scatterers: scene.point_count(),
            violations,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// One record per seed, in input order
    pub records: Vec<SceneRecord>,
    pub summary: BatchSummary,
}

/// Generate one scene per seed in parallel, in seed order.
pub fn generate_batch(generator: &SceneGenerator, seeds: &[u64]) -> scene_core::Result<Vec<Scene>> {
    seeds.par_iter().map(|&seed| generator.generate(seed)).collect()
}

/// Generate, audit and summarize one scene per seed.
pub fn run_batch(config: SceneConfig, seeds: &[u64]) -> scene_core::Result<BatchReport> {
    batch(config, seeds, false).map(|(report, _)| report)
}

/// Like [`run_batch`], also handing back the scenes in seed order so callers
/// can export them without generating twice.
pub fn run_batch_with_scenes(
    config: SceneConfig,
    seeds: &[u64],
) -> scene_core::Result<(BatchReport, Vec<Scene>)> {
    batch(config, seeds, true)
}

fn batch(
    config: SceneConfig,
    seeds: &[u64],
    keep_scenes: bool,
) -> scene_core::Result<(BatchReport, Vec<Scene>)> {
    let generator = SceneGenerator::new(config)?;

    let per_seed: Vec<(SceneRecord, BatchSummary, Option<Scene>)> = seeds
        .par_iter()
        .map(|&seed| {
            let scene = generator.generate(seed)?;
            let violations = audit(&scene).len();
            let mut summary = BatchSummary::default();
            summary.accumulate(&scene, violations);
            let record = SceneRecord::from_scene(&scene, violations);
            Ok::<_, scene_core::SceneError>((record, summary, keep_scenes.then_some(scene)))
        })
        .collect::<scene_core::Result<_>>()?;

    let mut records = Vec::with_capacity(per_seed.len());
    let mut scenes = Vec::new();
    let mut summary = BatchSummary::default();
    for (record, partial, scene) in per_seed {
        summary.merge(&partial);
        records.push(record);
        scenes.extend(scene);
    }

    info!(
        scenes = summary.scenes,
        partial = summary.partial_scenes,
        fulfillment = summary.fulfillment_rate(),
        violations = summary.violations,
        "batch finished"
    );
    Ok((BatchReport { records, summary }, scenes))
}
