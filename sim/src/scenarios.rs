//! Scenario definitions.
//!
//! Each scenario is a named scene configuration plus the seed to generate it
//! with. All scenarios are deterministic given the same seed; the fixed
//! scenario ignores the seed and places its objects by hand.

use scene_core::{
    assemble, build_layout, AxisRange, BarrierShape, CountRange, DynamicObjects, KindConfig,
    PlacementStats, Scene, SceneConfig, SceneGenerator,
};
use serde::{Deserialize, Serialize};
use shape_models::{instantiate, ObjectKind, PlacedObject};

/// Which pre-defined scenario to load.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// 28 m × 28 m road with a median, 3 cars, 4–5 pedestrians
    Standard,
    /// Same layout, one car and a couple of pedestrians in a wider world
    Sparse,
    /// Crowded road: 4–6 cars, 6–8 pedestrians
    Dense,
    /// More disc area requested than 1.5× the world area; slots will fail
    Overfull,
    /// 40 m × 40 m world with a quarter-circle barrier
    Curved,
    /// Hand-placed reference scene: 2 cars, 4 pedestrians. Batches draw
    /// random placements with the same counts.
    Fixed,
}

/// A fully configured generation scenario.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scenario {
    pub kind: ScenarioKind,
    pub name: String,
    pub seed: u64,
    pub config: SceneConfig,
}

impl Scenario {
    /// Build the named scenario. Uses `seed` for repeatability.
    pub fn build(kind: ScenarioKind, seed: u64) -> Self {
        let (name, config) = match kind {
            ScenarioKind::Standard => ("standard", SceneConfig::default()),
            ScenarioKind::Sparse => ("sparse", sparse()),
            ScenarioKind::Dense => ("dense", dense()),
            ScenarioKind::Overfull => ("overfull", overfull()),
            ScenarioKind::Curved => ("curved", curved()),
            ScenarioKind::Fixed => ("fixed", fixed()),
        };
        Scenario {
            kind,
            name: name.into(),
            seed,
            config,
        }
    }

    /// Same scenario, different configuration (e.g. loaded from a file).
    pub fn with_config(mut self, config: SceneConfig) -> Self {
        self.config = config;
        self
    }

    /// Produce this scenario's scene: sampled from the seed, or the
    /// hand-placed objects for [`ScenarioKind::Fixed`].
    pub fn generate(&self) -> scene_core::Result<Scene> {
        match self.kind {
            ScenarioKind::Fixed => fixed_scene(&self.config, self.seed),
            _ => SceneGenerator::new(self.config.clone())?.generate(self.seed),
        }
    }
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

fn sparse() -> SceneConfig {
    let mut config = SceneConfig::default();
    config.world.x = AxisRange::new(0.0, 40.0);
    config.world.y = AxisRange::new(0.0, 40.0);
    config.vehicles.count = CountRange::exactly(1);
    config.pedestrians.count = CountRange::new(2, 3);
    // Keep the barrier resolution of the standard road.
    config.barrier.segments = 29;
    config
}

fn dense() -> SceneConfig {
    SceneConfig {
        vehicles: KindConfig {
            count: CountRange::new(4, 6),
            ..KindConfig::vehicles()
        },
        pedestrians: KindConfig {
            count: CountRange::new(6, 8),
            ..KindConfig::pedestrians()
        },
        ..SceneConfig::default()
    }
}

fn curved() -> SceneConfig {
    let mut config = SceneConfig::default();
    config.world.x = AxisRange::new(0.0, 40.0);
    config.world.y = AxisRange::new(0.0, 40.0);
    // Quarter circle hugging the (40, 0) corner, from (40, 20) to (20, 0).
    config.barrier.shape = BarrierShape::Arc {
        center: [40.0, 0.0],
        radius: 20.0,
        start_deg: 90.0,
        sweep_deg: 90.0,
    };
    config.barrier.segments = 23;
    config
}

fn fixed() -> SceneConfig {
    let mut config = SceneConfig::default();
    config.vehicles.count = CountRange::exactly(FIXED_VEHICLES.len());
    config.pedestrians.count = CountRange::exactly(FIXED_PEDESTRIANS.len());
    config
}

fn overfull() -> SceneConfig {
    SceneConfig {
        vehicles: KindConfig {
            count: CountRange::exactly(32),
            ..KindConfig::vehicles()
        },
        pedestrians: KindConfig {
            count: CountRange::exactly(40),
            ..KindConfig::pedestrians()
        },
        max_attempts: 50,
        ..SceneConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Hand-placed scene
// ---------------------------------------------------------------------------

/// (requested centre, heading in degrees, velocity)
type Slot = ([f64; 2], f64, f64);

/// One car each side of the median, heading the same way.
const FIXED_VEHICLES: [Slot; 2] = [([8.0, 12.0], 0.0, 10.0), ([20.0, 6.0], 0.0, -10.0)];

/// Two walkers near each edge of the road.
const FIXED_PEDESTRIANS: [Slot; 4] = [
    ([1.0, 2.0], 0.0, 2.0),
    ([2.0, 13.0], 0.0, 2.0),
    ([27.0, 7.0], 0.0, -2.0),
    ([27.0, 18.0], 0.0, -2.0),
];

fn place_by_hand(
    kind: ObjectKind,
    slots: &[Slot],
    radius: f64,
) -> (Vec<PlacedObject>, PlacementStats) {
    let objects: Vec<PlacedObject> = slots
        .iter()
        .map(|&(center, dir, v)| instantiate(kind, center, dir, v, radius))
        .collect();
    let mut stats = PlacementStats::empty(kind);
    stats.requested = objects.len();
    stats.placed = objects.len();
    (objects, stats)
}

/// The hand-placed reference scene on `config`'s static layout.
///
/// Nothing is sampled, so `seed` only labels the scene. Positions are chosen
/// for the default 28 m world; audit the result when the layout differs.
pub fn fixed_scene(config: &SceneConfig, seed: u64) -> scene_core::Result<Scene> {
    config.validate()?;
    let layout = build_layout(config)?;
    let (vehicles, vehicle_stats) =
        place_by_hand(ObjectKind::Vehicle, &FIXED_VEHICLES, config.vehicles.radius);
    let (pedestrians, pedestrian_stats) =
        place_by_hand(ObjectKind::Pedestrian, &FIXED_PEDESTRIANS, config.pedestrians.radius);
    Ok(assemble(
        layout,
        DynamicObjects {
            seed,
            safety_buffer: config.safety_buffer,
            vehicles,
            pedestrians,
            vehicle_stats,
            pedestrian_stats,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;
    use scene_core::audit;

    #[test]
    fn every_preset_validates() {
        for kind in ScenarioKind::value_variants() {
            let scenario = Scenario::build(*kind, 1);
            scenario.config.validate().unwrap();
        }
    }

    #[test]
    fn overfull_exceeds_world_area() {
        let scenario = Scenario::build(ScenarioKind::Overfull, 0);
        assert!(scenario.config.requested_area_ratio() > 1.5);
    }

    #[test]
    fn sparse_keeps_barrier_tight() {
        let config = Scenario::build(ScenarioKind::Sparse, 0).config;
        assert!(!config.barrier_gap_risk());
    }

    #[test]
    fn cli_names() {
        let kind = ScenarioKind::from_str("overfull", true).unwrap();
        assert_eq!(kind, ScenarioKind::Overfull);
    }

    #[test]
    fn curved_preset_audits_clean() {
        let scenario = Scenario::build(ScenarioKind::Curved, 11);
        assert!(!scenario.config.barrier_gap_risk());
        for seed in 0..20 {
            let scene = Scenario::build(ScenarioKind::Curved, seed).generate().unwrap();
            assert_eq!(scene.barrier.footprint.discs().len(), 23);
            assert!(audit(&scene).is_empty(), "seed {seed}: {:?}", audit(&scene));
        }
    }

    #[test]
    fn fixed_scene_is_hand_placed_and_clean() {
        let scenario = Scenario::build(ScenarioKind::Fixed, 3);
        let scene = scenario.generate().unwrap();
        assert_eq!(scene.seed, 3);
        assert_eq!(scene.vehicles.len(), 2);
        assert_eq!(scene.pedestrians.len(), 4);
        assert!(scene.fully_placed());
        assert_eq!(scene.vehicles[1].requested_center, [20.0, 6.0]);
        assert_eq!(scene.vehicles[1].velocity, -10.0);
        assert_eq!(scene.pedestrians[2].requested_center, [27.0, 7.0]);
        assert!(audit(&scene).is_empty(), "{:?}", audit(&scene));

        // The seed does not move anything.
        let other = Scenario::build(ScenarioKind::Fixed, 4).generate().unwrap();
        assert_eq!(other.clouds.all, scene.clouds.all);
    }

    #[test]
    fn fixed_scene_on_a_small_world_is_flagged() {
        let mut config = fixed();
        config.world.x = AxisRange::new(0.0, 22.0);
        config.world.y = AxisRange::new(0.0, 22.0);
        let scene = fixed_scene(&config, 0).unwrap();
        assert!(audit(&scene).iter().any(|v| matches!(
            v,
            scene_core::Violation::OutOfBounds { object, .. } if object.kind == ObjectKind::Pedestrian
        )));
    }
}
