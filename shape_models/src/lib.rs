//! `shape_models` — Scene object geometry: templates, rigid transforms, footprints.
//!
//! # Module layout
//! - [`kind`]      — Object kinds and their canonical templates
//! - [`template`]  — Local-frame scatterer point sets
//! - [`transform`] — Rotate/translate a template into a world-space object
//! - [`cloud`]     — `[x, y, z, velocity]` point clouds
//! - [`footprint`] — Collision discs and spines

pub mod cloud;
pub mod footprint;
pub mod kind;
pub mod template;
pub mod transform;

pub use cloud::{PointCloud, Scatterer};
pub use footprint::{Disc, Footprint};
pub use kind::ObjectKind;
pub use transform::{
    bbox_correction, heading_rotation, instantiate, CurvedBarrier, PlacedObject, StraightBarrier,
};
