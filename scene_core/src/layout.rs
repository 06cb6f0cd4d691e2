//! Static layout: the barrier (straight median or arc) and the light posts.
//!
//! Built once per scene from the configuration and never touched again.
//! Placement starts from [`StaticLayout::arena`], which seeds the obstacle set
//! with every static footprint disc.

use crate::config::SceneConfig;
use crate::error::Result;
use crate::placement::FootprintArena;
use crate::world::World;
use serde::{Deserialize, Serialize};
use shape_models::{instantiate, Disc, ObjectKind, PlacedObject};
use tracing::{debug, warn};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StaticLayout {
    pub world: World,
    pub barrier: PlacedObject,
    pub lights: Vec<PlacedObject>,
}

impl StaticLayout {
    /// Barrier discs in spine order.
    pub fn barrier_footprints(&self) -> &[Disc] {
        self.barrier.footprint.discs()
    }

    /// One disc per light, in mount order.
    pub fn light_footprints(&self) -> Vec<Disc> {
        self.lights
            .iter()
            .flat_map(|l| l.footprint.discs().iter().copied())
            .collect()
    }

    /// Fresh obstacle arena holding every static disc.
    pub fn arena(&self) -> FootprintArena {
        let mut arena = FootprintArena::new();
        arena.extend(ObjectKind::Barrier, self.barrier_footprints().iter().copied());
        arena.extend(ObjectKind::Light, self.light_footprints());
        arena
    }
}

/// Build the barrier and lights for `config`.
///
/// Fails fast if the layout does not fit the world. A barrier whose disc
/// spacing leaves gaps wider than twice the safety buffer is logged but
/// accepted.
pub fn build_layout(config: &SceneConfig) -> Result<StaticLayout> {
    config.validate_layout()?;

    let barrier = config.barrier_object();

    if config.barrier_gap_risk() {
        warn!(
            gap = config.barrier_disc_gap().unwrap_or_default(),
            safety_buffer = config.safety_buffer,
            segments = config.barrier.segments,
            "barrier discs leave gaps an object could be accepted in"
        );
    }

    let lights: Vec<PlacedObject> = config
        .light_positions()
        .into_iter()
        .map(|p| instantiate(ObjectKind::Light, p, 0.0, 0.0, config.lights.radius))
        .collect();

    debug!(
        barrier_discs = barrier.footprint.discs().len(),
        lights = lights.len(),
        "static layout built"
    );

    Ok(StaticLayout {
        world: config.world,
        barrier,
        lights,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_matches_median() {
        let layout = build_layout(&SceneConfig::default()).unwrap();
        let discs = layout.barrier_footprints();
        assert_eq!(discs.len(), 20);
        assert!(discs.iter().all(|d| d.center[0] == 14.0 && d.radius == 0.75));
        assert!((discs[0].center[1] - 0.7).abs() < 1e-9);

        let lights = layout.light_footprints();
        assert_eq!(lights.len(), 2);
        assert!((lights[0].center[0] - 15.0).abs() < 1e-9);
        assert!((lights[0].center[1] - 3.0).abs() < 1e-9);
        assert!((lights[1].center[0] - 13.0).abs() < 1e-9);
        assert_eq!(lights[1].radius, 1.5);

        assert!(layout.lights.iter().all(|l| l.velocity == 0.0));
        assert_eq!(layout.arena().len(), 22);
    }

    #[test]
    fn zero_length_barrier_contributes_no_discs() {
        let mut config = SceneConfig::default();
        config.barrier.length = Some(0.0);
        let layout = build_layout(&config).unwrap();
        assert!(layout.barrier_footprints().is_empty());
        assert_eq!(layout.arena().len(), 2);
    }

    #[test]
    fn no_lights_is_valid() {
        let mut config = SceneConfig::default();
        config.lights.mounts.clear();
        let layout = build_layout(&config).unwrap();
        assert!(layout.lights.is_empty());
        assert_eq!(layout.arena().len(), 20);
    }

    #[test]
    fn oversized_light_rejected() {
        let mut config = SceneConfig::default();
        config.lights.radius = 20.0;
        assert!(build_layout(&config).is_err());
    }

    #[test]
    fn arc_layout_follows_the_curve() {
        let mut config = SceneConfig::default();
        config.world.x = crate::world::AxisRange::new(0.0, 40.0);
        config.world.y = crate::world::AxisRange::new(0.0, 40.0);
        config.barrier.shape = crate::config::BarrierShape::Arc {
            center: [40.0, 0.0],
            radius: 20.0,
            start_deg: 90.0,
            sweep_deg: 90.0,
        };
        config.barrier.segments = 23;
        let layout = build_layout(&config).unwrap();
        assert_eq!(layout.barrier_footprints().len(), 23);
        for d in layout.barrier_footprints() {
            let r = ((d.center[0] - 40.0).powi(2) + d.center[1].powi(2)).sqrt();
            assert!((r - 20.0).abs() < 1e-9);
        }
        // Lights sit one metre either side of the spine.
        for light in layout.light_footprints() {
            let r = ((light.center[0] - 40.0).powi(2) + light.center[1].powi(2)).sqrt();
            assert!((r - 21.0).abs() < 1e-9 || (r - 19.0).abs() < 1e-9);
        }
        assert_eq!(layout.arena().len(), 25);
    }
}
