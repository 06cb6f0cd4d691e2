//! Error types for scene generation.
//!
//! Every variant except [`SceneError::Parse`] is an invalid configuration:
//! it is raised before any sampling starts, since retrying cannot repair a
//! geometrically infeasible setup. Slots that exhaust their attempt cap are
//! not errors; they show up as reduced counts in the placement stats.

use shape_models::ObjectKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("invalid world: {axis} range [{min}, {max}] is empty or non-finite")]
    InvalidWorld { axis: &'static str, min: f64, max: f64 },

    #[error("{kind} radius {radius} m does not fit the world ({axis} extent {extent} m)")]
    RadiusTooLarge {
        kind: ObjectKind,
        radius: f64,
        axis: &'static str,
        extent: f64,
    },

    #[error("{kind} {domain} domain is empty")]
    EmptyDomain {
        kind: ObjectKind,
        domain: &'static str,
    },

    #[error("{kind} count range {min}..={max} is inverted")]
    InvalidCountRange {
        kind: ObjectKind,
        min: usize,
        max: usize,
    },

    #[error("{kind} count {count} exceeds the limit of {limit} for this world")]
    CountTooLarge {
        kind: ObjectKind,
        count: usize,
        limit: usize,
    },

    #[error("light {index} at ({x:.2}, {y:.2}) lies outside the world")]
    LightOutsideWorld { index: usize, x: f64, y: f64 },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("failed to parse scene configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SceneError {
    /// Short error code for logs and batch reports.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidWorld { .. } => "INVALID_WORLD",
            Self::RadiusTooLarge { .. } => "RADIUS_TOO_LARGE",
            Self::EmptyDomain { .. } => "EMPTY_DOMAIN",
            Self::InvalidCountRange { .. } => "INVALID_COUNT_RANGE",
            Self::CountTooLarge { .. } => "COUNT_TOO_LARGE",
            Self::LightOutsideWorld { .. } => "LIGHT_OUTSIDE_WORLD",
            Self::InvalidConfiguration(_) => "INVALID_CONFIGURATION",
            Self::Parse(_) => "PARSE",
        }
    }

    /// True for fail-fast configuration errors.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Self::Parse(_))
    }
}

pub type Result<T> = std::result::Result<T, SceneError>;
