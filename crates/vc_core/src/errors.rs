//! crates/vc_core/src/errors.rs
//! Error types for ingestion (ballot validation) and parameter domains.

use thiserror::Error;

use crate::ids::CandidateId;
use crate::model::BallotField;

/// A ballot or candidate list that violates the election's reference invariants.
///
/// Raised once, at ingestion (`Election::new`). Tally engines only ever see
/// validated elections, so every id lookup inside them is total.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidBallotError {
    #[error("duplicate candidate id '{id}'")]
    DuplicateCandidate { id: CandidateId },

    #[error("ballot of '{voter}' references unknown candidate '{id}' in {field}")]
    UnknownCandidate {
        voter: String,
        field: BallotField,
        id: CandidateId,
    },

    #[error("ballot of '{voter}' ranks candidate '{id}' more than once")]
    DuplicateRanking { voter: String, id: CandidateId },

    #[error("ballot of '{voter}' gives a non-finite score to '{id}'")]
    NonFiniteScore { voter: String, id: CandidateId },
}

/// Parameter domain violations (`TallyParams`, `SpatialParams`, per-call arguments).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    #[error("max_score must be finite and > 0 (got {0})")]
    MaxScore(f64),

    #[error("approval_threshold must be finite and >= 0 (got {0})")]
    ApprovalThreshold(f64),

    #[error("grid_resolution must be >= 1")]
    GridResolution,

    #[error("sampling_radius must be finite and > 0 (got {0})")]
    SamplingRadius(f64),

    #[error("{name} must be finite and within [{min}, {max}] (got {got})")]
    OutOfRange {
        name: &'static str,
        min: f64,
        max: f64,
        got: f64,
    },
}
