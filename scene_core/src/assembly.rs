//! Scene assembly: merge the static layout and the placed objects into one
//! immutable [`Scene`] with per-group and aggregated point clouds.

use crate::layout::StaticLayout;
use crate::placement::PlacementStats;
use crate::world::World;
use serde::{Deserialize, Serialize};
use shape_models::{ObjectKind, PlacedObject, PointCloud};

/// Objects produced by the placement stage of one run.
#[derive(Clone, Debug, PartialEq)]
pub struct DynamicObjects {
    pub seed: u64,
    pub safety_buffer: f64,
    pub vehicles: Vec<PlacedObject>,
    pub pedestrians: Vec<PlacedObject>,
    pub vehicle_stats: PlacementStats,
    pub pedestrian_stats: PlacementStats,
}

/// Point clouds per group plus the overall concatenation
/// (vehicles, barrier, lights, pedestrians). Empty groups are zero-row clouds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneClouds {
    pub vehicles: PointCloud,
    pub barrier: PointCloud,
    pub lights: PointCloud,
    pub pedestrians: PointCloud,
    pub all: PointCloud,
}

/// One generated scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub seed: u64,
    pub world: World,
    pub safety_buffer: f64,
    pub barrier: PlacedObject,
    pub lights: Vec<PlacedObject>,
    pub vehicles: Vec<PlacedObject>,
    pub pedestrians: Vec<PlacedObject>,
    pub clouds: SceneClouds,
    pub vehicle_stats: PlacementStats,
    pub pedestrian_stats: PlacementStats,
}

impl Scene {
    /// Placed objects of one kind, in placement order.
    pub fn objects(&self, kind: ObjectKind) -> &[PlacedObject] {
        match kind {
            ObjectKind::Vehicle => &self.vehicles,
            ObjectKind::Pedestrian => &self.pedestrians,
            ObjectKind::Light => &self.lights,
            ObjectKind::Barrier => std::slice::from_ref(&self.barrier),
        }
    }

    pub fn stats(&self, kind: ObjectKind) -> Option<&PlacementStats> {
        match kind {
            ObjectKind::Vehicle => Some(&self.vehicle_stats),
            ObjectKind::Pedestrian => Some(&self.pedestrian_stats),
            ObjectKind::Light | ObjectKind::Barrier => None,
        }
    }

    pub fn count(&self, kind: ObjectKind) -> usize {
        self.objects(kind).len()
    }

    /// Total scatterers in the aggregated cloud.
    pub fn point_count(&self) -> usize {
        self.clouds.all.len()
    }

    /// True when every dynamic slot was filled.
    pub fn fully_placed(&self) -> bool {
        self.vehicle_stats.failed_slots == 0 && self.pedestrian_stats.failed_slots == 0
    }
}

fn group_cloud(objects: &[PlacedObject]) -> PointCloud {
    PointCloud::concat(objects.iter().map(|o| &o.points))
}

/// Build the scene. Pure: consumes its inputs, draws nothing.
pub fn assemble(layout: StaticLayout, dynamic: DynamicObjects) -> Scene {
    let vehicles = group_cloud(&dynamic.vehicles);
    let barrier = layout.barrier.points.clone();
    let lights = group_cloud(&layout.lights);
    let pedestrians = group_cloud(&dynamic.pedestrians);
    let all = PointCloud::concat([&vehicles, &barrier, &lights, &pedestrians]);

    Scene {
        seed: dynamic.seed,
        world: layout.world,
        safety_buffer: dynamic.safety_buffer,
        barrier: layout.barrier,
        lights: layout.lights,
        vehicles: dynamic.vehicles,
        pedestrians: dynamic.pedestrians,
        clouds: SceneClouds {
            vehicles,
            barrier,
            lights,
            pedestrians,
            all,
        },
        vehicle_stats: dynamic.vehicle_stats,
        pedestrian_stats: dynamic.pedestrian_stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use crate::layout::build_layout;
    use shape_models::instantiate;

    fn dynamic(vehicles: Vec<PlacedObject>, pedestrians: Vec<PlacedObject>) -> DynamicObjects {
        let mut vehicle_stats = PlacementStats::empty(ObjectKind::Vehicle);
        vehicle_stats.requested = vehicles.len();
        vehicle_stats.placed = vehicles.len();
        let mut pedestrian_stats = PlacementStats::empty(ObjectKind::Pedestrian);
        pedestrian_stats.requested = pedestrians.len();
        pedestrian_stats.placed = pedestrians.len();
        DynamicObjects {
            seed: 0,
            safety_buffer: 0.5,
            vehicles,
            pedestrians,
            vehicle_stats,
            pedestrian_stats,
        }
    }

    #[test]
    fn aggregate_follows_group_order() {
        let layout = build_layout(&SceneConfig::default()).unwrap();
        let car = instantiate(ObjectKind::Vehicle, [5.0, 5.0], 0.0, 10.0, 3.5);
        let walker = instantiate(ObjectKind::Pedestrian, [22.0, 22.0], 180.0, -2.0, 0.6);
        let barrier_rows = layout.barrier.points.len();

        let scene = assemble(layout, dynamic(vec![car.clone()], vec![walker.clone()]));
        let all = scene.clouds.all.rows();
        assert_eq!(all.len(), 114 + barrier_rows + 2 * 13 + 12);
        assert_eq!(&all[..114], car.points.rows());
        assert_eq!(all[114][3], 0.0);
        assert_eq!(&all[all.len() - 12..], walker.points.rows());
        assert_eq!(scene.point_count(), all.len());
        assert!(scene.fully_placed());
    }

    #[test]
    fn empty_groups_are_zero_row_clouds() {
        let layout = build_layout(&SceneConfig::default()).unwrap();
        let scene = assemble(layout, dynamic(Vec::new(), Vec::new()));
        assert!(scene.clouds.vehicles.is_empty());
        assert!(scene.clouds.pedestrians.is_empty());
        assert_eq!(scene.count(ObjectKind::Vehicle), 0);
        assert_eq!(scene.count(ObjectKind::Barrier), 1);

        let json = serde_json::to_value(&scene).unwrap();
        assert_eq!(json["clouds"]["vehicles"]["rows"], serde_json::json!([]));
    }
}
