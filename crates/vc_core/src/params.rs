//! params.rs: Typed method parameters with safe defaults and domain validation.
//!
//! Wire names are camelCase to match what callers already send
//! (`numWinners`, `seats`, `maxScore`, `approvalThreshold`). Every field has a
//! default so partial documents deserialize.

use serde::{Deserialize, Serialize};

use crate::errors::ParamError;

/// ------------ Defaults ------------

pub const DEFAULT_MAX_SCORE: f64 = 5.0;
pub const DEFAULT_APPROVAL_THRESHOLD: f64 = 0.1;
/// Sampling radius around a Yee cell centre, in normalized ideology space.
pub const DEFAULT_SAMPLING_RADIUS: f64 = 0.12;
/// Below this many sampled voters a Yee cell falls back to the closest candidate.
pub const DEFAULT_MIN_SAMPLE_VOTERS: usize = 3;
pub const DEFAULT_GRID_RESOLUTION: usize = 50;

/// ------------ Tally parameters ------------

/// Method-specific parameters shared by the tally engines.
///
/// - `num_winners`: RRV rounds (capped at the candidate count).
/// - `seats`: STV / Cumulative seats (capped at the candidate count).
/// - `max_score`: RRV reweighting denominator.
/// - `approval_threshold`: used when ballots are synthesized from positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TallyParams {
    pub num_winners: usize,
    pub seats: usize,
    pub max_score: f64,
    pub approval_threshold: f64,
}

impl Default for TallyParams {
    fn default() -> Self {
        Self {
            num_winners: 1,
            seats: 1,
            max_score: DEFAULT_MAX_SCORE,
            approval_threshold: DEFAULT_APPROVAL_THRESHOLD,
        }
    }
}

impl TallyParams {
    pub fn validate(&self) -> Result<(), ParamError> {
        check_max_score(self.max_score)?;
        check_threshold(self.approval_threshold)?;
        Ok(())
    }
}

/// ------------ Spatial parameters ------------

/// Grid and sampling configuration for spatial maps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpatialParams {
    pub grid_resolution: usize,
    pub sampling_radius: f64,
    pub min_sample_voters: usize,
    pub approval_threshold: f64,
    pub max_score: f64,
}

impl Default for SpatialParams {
    fn default() -> Self {
        Self {
            grid_resolution: DEFAULT_GRID_RESOLUTION,
            sampling_radius: DEFAULT_SAMPLING_RADIUS,
            min_sample_voters: DEFAULT_MIN_SAMPLE_VOTERS,
            approval_threshold: DEFAULT_APPROVAL_THRESHOLD,
            max_score: DEFAULT_MAX_SCORE,
        }
    }
}

impl SpatialParams {
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.grid_resolution == 0 {
            return Err(ParamError::GridResolution);
        }
        if !(self.sampling_radius.is_finite() && self.sampling_radius > 0.0) {
            return Err(ParamError::SamplingRadius(self.sampling_radius));
        }
        check_threshold(self.approval_threshold)?;
        check_max_score(self.max_score)?;
        Ok(())
    }

    /// Tally parameters for engines run over a sampled electorate.
    pub fn tally_params(&self) -> TallyParams {
        TallyParams {
            max_score: self.max_score,
            approval_threshold: self.approval_threshold,
            ..TallyParams::default()
        }
    }
}

/// ------------ Domain checks ------------

pub fn check_max_score(v: f64) -> Result<(), ParamError> {
    if v.is_finite() && v > 0.0 { Ok(()) } else { Err(ParamError::MaxScore(v)) }
}

pub fn check_threshold(v: f64) -> Result<(), ParamError> {
    if v.is_finite() && v >= 0.0 { Ok(()) } else { Err(ParamError::ApprovalThreshold(v)) }
}

/// Finite and inside `[min, max]`.
pub fn check_unit_range(name: &'static str, v: f64, min: f64, max: f64) -> Result<(), ParamError> {
    if v.is_finite() && (min..=max).contains(&v) {
        Ok(())
    } else {
        Err(ParamError::OutOfRange { name, min, max, got: v })
    }
}
