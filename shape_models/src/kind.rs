//! Object kinds and their canonical geometry.

use crate::template;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which kind of scene object a placed object is.
///
/// Kind-specific geometry is data (the template), not behaviour: every kind
/// goes through the same rigid transform in [`crate::transform`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Vehicle,
    Pedestrian,
    Light,
    Barrier,
}

impl ObjectKind {
    /// Kinds placed by rejection sampling, in placement order.
    pub const DYNAMIC: [ObjectKind; 2] = [ObjectKind::Vehicle, ObjectKind::Pedestrian];

    /// Canonical local-frame point set. For [`ObjectKind::Barrier`] this is a
    /// single segment station; full barriers sweep it along their length.
    pub fn local_template(self) -> &'static [[f64; 3]] {
        match self {
            ObjectKind::Vehicle => &template::VEHICLE,
            ObjectKind::Pedestrian => &template::PEDESTRIAN,
            ObjectKind::Light => &template::LIGHT,
            ObjectKind::Barrier => &template::BARRIER_SEGMENT,
        }
    }

    /// Fixed infrastructure, built once by the layout and never sampled.
    pub fn is_static(self) -> bool {
        matches!(self, ObjectKind::Light | ObjectKind::Barrier)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Vehicle => "vehicle",
            ObjectKind::Pedestrian => "pedestrian",
            ObjectKind::Light => "light",
            ObjectKind::Barrier => "barrier",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
