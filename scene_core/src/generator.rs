//! Generation orchestrator: one seed in, one scene out.
//!
//! # Steps per scene
//! 1. Build the static layout (barrier, lights) and seed the obstacle arena
//! 2. Seed a ChaCha8 stream from the scene seed
//! 3. Draw the vehicle target count, place vehicles
//! 4. Draw the pedestrian target count, place pedestrians against everything so far
//! 5. Assemble clouds and the immutable scene
//!
//! Every random draw comes from the single stream in step 2, in the order
//! above, so a seed fully determines the scene.

use crate::{
    assembly::{assemble, DynamicObjects, Scene},
    config::SceneConfig,
    error::Result,
    layout::{build_layout, StaticLayout},
    placement::{place_objects, PlacementLimits, PlacementRequest},
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use shape_models::ObjectKind;
use tracing::{info, warn};

/// Validated configuration plus the static layout it implies.
#[derive(Clone, Debug)]
pub struct SceneGenerator {
    config: SceneConfig,
    layout: StaticLayout,
}

impl SceneGenerator {
    /// Validate `config` and build its layout. Nothing random happens here.
    pub fn new(config: SceneConfig) -> Result<Self> {
        config.validate()?;
        let layout = build_layout(&config)?;
        let ratio = config.requested_area_ratio();
        if ratio > 1.0 / 3.0 {
            warn!(
                ratio,
                "requested footprint area is a large share of the world; expect unfilled slots"
            );
        }
        Ok(Self { config, layout })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn layout(&self) -> &StaticLayout {
        &self.layout
    }

    /// Generate the scene for `seed`.
    pub fn generate(&self, seed: u64) -> Result<Scene> {
        let config = &self.config;
        let limits = PlacementLimits {
            safety_buffer: config.safety_buffer,
            max_attempts: config.max_attempts,
        };

        // ----------------------------------------------------------------
        // Step 1–2: layout arena, random stream
        // ----------------------------------------------------------------
        let arena = self.layout.arena();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        // ----------------------------------------------------------------
        // Step 3: vehicles
        // ----------------------------------------------------------------
        let n_vehicles = config.vehicles.count.sample(&mut rng);
        let request = PlacementRequest::from_config(ObjectKind::Vehicle, &config.vehicles, n_vehicles);
        let vehicles = place_objects(&mut rng, &request, &config.world, &limits, arena)?;

        // ----------------------------------------------------------------
        // Step 4: pedestrians
        // ----------------------------------------------------------------
        let n_pedestrians = config.pedestrians.count.sample(&mut rng);
        let request =
            PlacementRequest::from_config(ObjectKind::Pedestrian, &config.pedestrians, n_pedestrians);
        let pedestrians = place_objects(&mut rng, &request, &config.world, &limits, vehicles.arena)?;

        for stats in [&vehicles.stats, &pedestrians.stats] {
            info!(
                seed,
                kind = %stats.kind,
                requested = stats.requested,
                placed = stats.placed,
                failed = stats.failed_slots,
                attempts = stats.attempts,
                "placement finished"
            );
        }

        // ----------------------------------------------------------------
        // Step 5: assembly
        // ----------------------------------------------------------------
        let scene = assemble(
            self.layout.clone(),
            DynamicObjects {
                seed,
                safety_buffer: config.safety_buffer,
                vehicles: vehicles.objects,
                pedestrians: pedestrians.objects,
                vehicle_stats: vehicles.stats,
                pedestrian_stats: pedestrians.stats,
            },
        );
        Ok(scene)
    }
}

/// One-shot helper: validate, build, and generate.
pub fn generate_scene(config: SceneConfig, seed: u64) -> Result<Scene> {
    SceneGenerator::new(config)?.generate(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::audit;
    use crate::config::{BarrierShape, CountRange};
    use crate::world::AxisRange;
    use shape_models::Disc;

    fn dynamic_discs(scene: &Scene) -> Vec<Disc> {
        scene
            .vehicles
            .iter()
            .chain(&scene.pedestrians)
            .flat_map(|o| o.footprint.discs().iter().copied())
            .collect()
    }

    #[test]
    fn same_seed_is_byte_identical() {
        let generator = SceneGenerator::new(SceneConfig::default()).unwrap();
        let a = serde_json::to_string(&generator.generate(7).unwrap()).unwrap();
        let b = serde_json::to_string(&generator.generate(7).unwrap()).unwrap();
        assert_eq!(a, b);
        let c = serde_json::to_string(&generator.generate(8).unwrap()).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn scenario_seed_42_places_three_vehicles() {
        let config = SceneConfig {
            pedestrians: crate::config::KindConfig {
                count: CountRange::exactly(0),
                ..crate::config::KindConfig::pedestrians()
            },
            ..Default::default()
        };
        let generator = SceneGenerator::new(config).unwrap();
        let scene = generator.generate(42).unwrap();
        assert_eq!(scene.vehicles.len(), 3);
        assert_eq!(scene.vehicle_stats.failed_slots, 0);
        assert!(audit(&scene).is_empty());

        let again = generator.generate(42).unwrap();
        for (a, b) in scene.vehicles.iter().zip(&again.vehicles) {
            assert_eq!(a.requested_center, b.requested_center);
            assert_eq!(a.direction, b.direction);
            assert_eq!(a.velocity, b.velocity);
        }
    }

    #[test]
    fn invariants_hold_over_seed_sweep() {
        let generator = SceneGenerator::new(SceneConfig::default()).unwrap();
        let static_discs: Vec<Disc> = generator.layout().arena().entries().iter().map(|e| e.disc).collect();

        for seed in 0..100 {
            let scene = generator.generate(seed).unwrap();
            assert!(scene.vehicles.len() <= scene.vehicle_stats.requested);
            assert!(scene.pedestrians.len() <= scene.pedestrian_stats.requested);
            assert!(audit(&scene).is_empty(), "seed {seed}: {:?}", audit(&scene));

            let discs = dynamic_discs(&scene);
            for (i, a) in discs.iter().enumerate() {
                assert!(scene.world.contains_disc(a), "seed {seed}");
                for b in discs[i + 1..].iter().chain(&static_discs) {
                    assert!(a.clears(b, scene.safety_buffer), "seed {seed}: {a:?} vs {b:?}");
                }
            }
        }
    }

    #[test]
    fn roomy_world_fills_every_slot() {
        let mut config = SceneConfig::default();
        config.world.x = AxisRange::new(0.0, 60.0);
        config.world.y = AxisRange::new(0.0, 60.0);
        let generator = SceneGenerator::new(config).unwrap();
        for seed in 0..20 {
            let scene = generator.generate(seed).unwrap();
            assert!(scene.fully_placed(), "seed {seed}");
            assert_eq!(scene.vehicles.len(), 3);
        }
    }

    #[test]
    fn overfull_request_degrades_gracefully() {
        let mut config = SceneConfig::default();
        config.vehicles.count = CountRange::exactly(32);
        config.max_attempts = 50;
        assert!(config.requested_area_ratio() > 1.5);
        let scene = generate_scene(config, 5).unwrap();
        assert!(scene.vehicle_stats.failed_slots > 0);
        assert!(scene.vehicles.len() < 32);
        assert!(audit(&scene).is_empty());
    }

    #[test]
    fn zero_counts_yield_static_only_scene() {
        let mut config = SceneConfig::default();
        config.vehicles.count = CountRange::exactly(0);
        config.pedestrians.count = CountRange::exactly(0);
        let scene = generate_scene(config, 1).unwrap();
        assert!(scene.vehicles.is_empty() && scene.pedestrians.is_empty());
        assert_eq!(scene.vehicle_stats.attempts, 0);
        assert_eq!(
            scene.point_count(),
            scene.clouds.barrier.len() + scene.clouds.lights.len()
        );
    }

    #[test]
    fn invalid_config_fails_before_sampling() {
        let mut config = SceneConfig::default();
        config.vehicles.radius = 15.0;
        let err = SceneGenerator::new(config).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn unbounded_count_rejected_by_generator() {
        let mut config = SceneConfig::default();
        config.vehicles.count = CountRange::exactly(usize::MAX / 2);
        config.max_attempts = 1;
        let err = SceneGenerator::new(config).unwrap_err();
        assert_eq!(err.code(), "COUNT_TOO_LARGE");
    }

    #[test]
    fn curved_barrier_scenes_audit_clean() {
        let mut config = SceneConfig::default();
        config.world.x = AxisRange::new(0.0, 40.0);
        config.world.y = AxisRange::new(0.0, 40.0);
        config.barrier.shape = BarrierShape::Arc {
            center: [40.0, 0.0],
            radius: 20.0,
            start_deg: 90.0,
            sweep_deg: 90.0,
        };
        config.barrier.segments = 23;
        let generator = SceneGenerator::new(config).unwrap();
        let static_discs: Vec<Disc> = generator.layout().arena().entries().iter().map(|e| e.disc).collect();
        assert_eq!(static_discs.len(), 25);

        for seed in 0..50 {
            let scene = generator.generate(seed).unwrap();
            assert!(audit(&scene).is_empty(), "seed {seed}: {:?}", audit(&scene));
            for a in dynamic_discs(&scene) {
                assert!(static_discs.iter().all(|b| a.clears(b, scene.safety_buffer)));
            }
        }
    }
}
