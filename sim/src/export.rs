//! Scene export: a flat, language-neutral JSON record of one scene, plus
//! read-back inspection.

use scene_core::{
    audit_discs, ObjectRef, PlacementStats, Scene, SceneClouds, SceneConfig, Violation, World,
};
use serde::{Deserialize, Serialize};
use shape_models::{Disc, ObjectKind, PlacedObject};
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Columns for one kind of compact object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectTable {
    /// Effective footprint centres
    pub centers: Vec<[f64; 2]>,
    pub requested_centers: Vec<[f64; 2]>,
    /// Headings in radians
    pub directions: Vec<f64>,
    pub velocities: Vec<f64>,
    pub radius: f64,
}

impl ObjectTable {
    fn from_objects(objects: &[PlacedObject], radius: f64) -> Self {
        let mut table = ObjectTable {
            radius,
            ..Default::default()
        };
        for o in objects {
            if let Some(c) = o.effective_center() {
                table.centers.push(c);
            }
            table.requested_centers.push(o.requested_center);
            table.directions.push(o.direction);
            table.velocities.push(o.velocity);
        }
        table
    }

    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }
}

/// Barrier spine end points and footprint discs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarrierRecord {
    pub start: [f64; 2],
    pub end: [f64; 2],
    pub disc_centers: Vec<[f64; 2]>,
    pub radius: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectCounts {
    pub vehicles: usize,
    pub pedestrians: usize,
    pub lights: usize,
    pub barrier_discs: usize,
    pub scatterers: usize,
}

/// Everything a downstream consumer needs from one scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneExport {
    pub scene_id: u64,
    pub world: World,
    pub safety_buffer: f64,
    pub object_counts: ObjectCounts,
    pub vehicles: ObjectTable,
    pub pedestrians: ObjectTable,
    pub lights: ObjectTable,
    pub barrier: BarrierRecord,
    pub scatterers: SceneClouds,
    pub placement: Vec<PlacementStats>,
    pub config: SceneConfig,
}

impl SceneExport {
    pub fn from_scene(scene: &Scene, config: &SceneConfig) -> Self {
        let discs = scene.barrier.footprint.discs();
        SceneExport {
            scene_id: scene.seed,
            world: scene.world,
            safety_buffer: scene.safety_buffer,
            object_counts: ObjectCounts {
                vehicles: scene.vehicles.len(),
                pedestrians: scene.pedestrians.len(),
                lights: scene.lights.len(),
                barrier_discs: discs.len(),
                scatterers: scene.point_count(),
            },
            vehicles: ObjectTable::from_objects(&scene.vehicles, config.vehicles.radius),
            pedestrians: ObjectTable::from_objects(&scene.pedestrians, config.pedestrians.radius),
            lights: ObjectTable::from_objects(&scene.lights, config.lights.radius),
            barrier: BarrierRecord {
                start: config.spine_point(0.0, 0.0),
                end: config.spine_point(config.barrier_length(), 0.0),
                disc_centers: discs.iter().map(|d| d.center).collect(),
                radius: config.barrier.radius,
            },
            scatterers: scene.clouds.clone(),
            placement: vec![scene.vehicle_stats, scene.pedestrian_stats],
            config: config.clone(),
        }
    }
}

/// Save a scene export to a JSON file.
pub fn save_scene(export: &SceneExport, path: &Path) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, export)?;
    Ok(())
}

/// Load a scene export from a JSON file.
pub fn load_scene(path: &Path) -> anyhow::Result<SceneExport> {
    let file = std::fs::File::open(path)?;
    let reader = BufReader::new(file);
    let export: SceneExport = serde_json::from_reader(reader)?;
    Ok(export)
}

// ---------------------------------------------------------------------------
// Inspection
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InspectReport {
    pub scene_id: u64,
    pub counts: ObjectCounts,
    /// Row count per cloud group: vehicles, barrier, lights, pedestrians
    pub cloud_rows: [usize; 4],
    /// Disagreements between the recorded counts and the stored tables
    pub inconsistencies: Vec<String>,
    /// Collisions found from the recorded centres and radii
    pub violations: Vec<Violation>,
}

impl InspectReport {
    pub fn is_clean(&self) -> bool {
        self.inconsistencies.is_empty() && self.violations.is_empty()
    }
}

/// Re-check a loaded export using only its recorded centres and radii.
pub fn inspect(export: &SceneExport) -> InspectReport {
    let counts = export.object_counts;
    let clouds = &export.scatterers;
    let mut inconsistencies = Vec::new();

    let mut check = |what: &str, recorded: usize, actual: usize| {
        if recorded != actual {
            inconsistencies.push(format!("{what}: recorded {recorded}, found {actual}"));
        }
    };
    check("vehicles", counts.vehicles, export.vehicles.len());
    check("pedestrians", counts.pedestrians, export.pedestrians.len());
    check("lights", counts.lights, export.lights.len());
    check("barrier discs", counts.barrier_discs, export.barrier.disc_centers.len());
    check("scatterers", counts.scatterers, clouds.all.len());
    check(
        "aggregated cloud",
        clouds.all.len(),
        clouds.vehicles.len() + clouds.barrier.len() + clouds.lights.len() + clouds.pedestrians.len(),
    );

    let mut discs: Vec<(ObjectRef, Disc)> = Vec::new();
    for (disc, c) in export.barrier.disc_centers.iter().enumerate() {
        discs.push((
            ObjectRef {
                kind: ObjectKind::Barrier,
                index: 0,
                disc,
            },
            Disc::new(*c, export.barrier.radius),
        ));
    }
    for (kind, table) in [
        (ObjectKind::Light, &export.lights),
        (ObjectKind::Vehicle, &export.vehicles),
        (ObjectKind::Pedestrian, &export.pedestrians),
    ] {
        for (index, c) in table.centers.iter().enumerate() {
            discs.push((ObjectRef { kind, index, disc: 0 }, Disc::new(*c, table.radius)));
        }
    }

    InspectReport {
        scene_id: export.scene_id,
        counts,
        cloud_rows: [
            clouds.vehicles.len(),
            clouds.barrier.len(),
            clouds.lights.len(),
            clouds.pedestrians.len(),
        ],
        inconsistencies,
        violations: audit_discs(&discs, &export.world, export.safety_buffer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scene_core::SceneGenerator;

    fn export_for(seed: u64) -> SceneExport {
        let config = SceneConfig::default();
        let scene = SceneGenerator::new(config.clone())
            .unwrap()
            .generate(seed)
            .unwrap();
        SceneExport::from_scene(&scene, &config)
    }

    #[test]
    fn save_load_inspect() {
        let export = export_for(42);
        let path = std::env::temp_dir().join(format!("scene_export_{}.json", std::process::id()));
        save_scene(&export, &path).unwrap();
        let loaded = load_scene(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.scene_id, 42);
        assert_eq!(loaded.object_counts, export.object_counts);
        assert_eq!(loaded.config, export.config);
        let report = inspect(&loaded);
        assert!(report.is_clean(), "{report:?}");
        assert_eq!(report.counts.barrier_discs, 20);
        assert_eq!(report.counts.lights, 2);
        assert_eq!(report.cloud_rows.iter().sum::<usize>(), report.counts.scatterers);
    }

    #[test]
    fn tampered_export_is_flagged() {
        let mut export = export_for(3);
        export.object_counts.vehicles += 1;
        export.pedestrians.centers.push([14.0, 10.0]);
        let report = inspect(&export);
        assert!(!report.is_clean());
        assert!(report
            .inconsistencies
            .iter()
            .any(|s| s.starts_with("vehicles")));
        assert!(report.violations.iter().any(|v| matches!(
            v,
            Violation::Overlap { b, .. } if b.kind == ObjectKind::Pedestrian
        )));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_scene(Path::new("/nonexistent/scene.json")).is_err());
    }

    #[test]
    fn curved_barrier_endpoints_follow_the_arc() {
        let scenario = crate::scenarios::Scenario::build(crate::scenarios::ScenarioKind::Curved, 2);
        let scene = scenario.generate().unwrap();
        let export = SceneExport::from_scene(&scene, &scenario.config);
        let [sx, sy] = export.barrier.start;
        let [ex, ey] = export.barrier.end;
        assert!((sx - 40.0).abs() < 1e-9 && (sy - 20.0).abs() < 1e-9);
        assert!((ex - 20.0).abs() < 1e-9 && ey.abs() < 1e-9);
        assert_eq!(export.barrier.disc_centers.len(), 23);
        assert!(inspect(&export).is_clean());
    }
}
