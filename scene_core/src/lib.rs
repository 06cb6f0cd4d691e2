//! `scene_core` — Scene generation: layout, placement, assembly, auditing.
//!
//! # Module layout
//! - [`world`]     — World bounds and disc containment
//! - [`config`]    — Scene configuration, defaults and fail-fast validation
//! - [`error`]     — `SceneError` and the crate `Result`
//! - [`layout`]    — Static layout builder (barrier, lights)
//! - [`placement`] — Rejection-sampling placement against a footprint arena
//! - [`assembly`]  — Point-cloud concatenation into a `Scene`
//! - [`audit`]     — Independent pairwise collision check
//! - [`generator`] — Seeded orchestrator for one scene
//! - [`metrics`]   — Batch summary counters

pub mod assembly;
pub mod audit;
pub mod config;
pub mod error;
pub mod generator;
pub mod layout;
pub mod metrics;
pub mod placement;
pub mod world;

pub use assembly::{assemble, DynamicObjects, Scene, SceneClouds};
pub use audit::{audit, audit_discs, ObjectRef, Violation, AUDIT_TOLERANCE};
pub use config::{
    max_count, BarrierConfig, BarrierShape, CountRange, KindConfig, LightConfig, LightMount,
    SceneConfig, MAX_AREA_OVERSUBSCRIPTION, MAX_BARRIER_STATIONS,
};
pub use error::{Result, SceneError};
pub use generator::{generate_scene, SceneGenerator};
pub use layout::{build_layout, StaticLayout};
pub use metrics::{BatchSummary, KindTally};
pub use placement::{
    place_objects, FootprintArena, Placement, PlacementLimits, PlacementRequest, PlacementStats,
};
pub use world::{AxisRange, World};
