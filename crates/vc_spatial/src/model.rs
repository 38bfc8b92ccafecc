//! crates/vc_spatial/src/model.rs
//! Points and positioned candidates.

use serde::{Deserialize, Serialize};

use vc_core::params::check_unit_range;
use vc_core::{Candidate, CandidateId, ParamError};

/// A position in the ideology plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Linear interpolation toward `target`; `t = 0` stays, `t = 1` arrives.
    #[inline]
    pub fn lerp(self, target: Point, t: f64) -> Point {
        Point::new(self.x + (target.x - self.x) * t, self.y + (target.y - self.y) * t)
    }

    /// Clamp both coordinates into `[0, 1]`.
    #[inline]
    pub fn clamp_unit(self) -> Point {
        Point::new(self.x.clamp(0.0, 1.0), self.y.clamp(0.0, 1.0))
    }
}

/// A candidate with an ideological position and a display color.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpatialCandidate {
    pub id: CandidateId,
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub color: String,
}

impl SpatialCandidate {
    pub fn new(id: CandidateId, name: impl Into<String>, x: f64, y: f64) -> Self {
        Self { id, name: name.into(), x, y, color: String::new() }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn to_candidate(&self) -> Candidate {
        Candidate::new(self.id.clone(), self.name.clone())
    }

    /// Position must lie in the unit square.
    pub fn validate(&self) -> Result<(), ParamError> {
        check_unit_range("candidate x", self.x, 0.0, 1.0)?;
        check_unit_range("candidate y", self.y, 0.0, 1.0)
    }
}

pub(crate) fn validate_field(candidates: &[SpatialCandidate]) -> Result<(), ParamError> {
    candidates.iter().try_for_each(SpatialCandidate::validate)
}
