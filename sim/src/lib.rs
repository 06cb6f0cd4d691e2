//! `sim` — Scenario presets, batch runs across seeds, scene export/import.

pub mod batch;
pub mod export;
pub mod scenarios;

pub use batch::{generate_batch, run_batch, run_batch_with_scenes, BatchReport, SceneRecord};
pub use export::{inspect, load_scene, save_scene, InspectReport, SceneExport};
pub use scenarios::{fixed_scene, Scenario, ScenarioKind};
