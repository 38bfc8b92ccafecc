//! vc_spatial: Spatial voting over a normalized 2D ideology plane.
//!
//! Voters and candidates are points in `[0,1]²`. Ballots are synthesized
//! from distances (ascending = preferred) and fed to the `vc_algo` engines.
//! Grid computations (Yee, perturbation, distortion) are plain batch
//! functions; callers own scheduling and cancellation.

#![forbid(unsafe_code)]

use thiserror::Error;

use vc_algo::TallyError;
use vc_core::{CandidateId, InvalidBallotError, ParamError};
use vc_io::IoError;

/// Errors surfaced by the spatial layer.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("target candidate '{0}' is not in the field")]
    UnknownTarget(CandidateId),

    #[error(transparent)]
    Param(#[from] ParamError),

    #[error("synthetic ballot rejected: {0}")]
    Ballot(#[from] InvalidBallotError),

    #[error(transparent)]
    Tally(#[from] TallyError),

    #[error("cache key: {0}")]
    CacheKey(#[from] IoError),
}

pub type SpatialResult<T> = Result<T, SpatialError>;

pub mod adapter;
pub mod cache;
pub mod distortion;
pub mod model;
pub mod perturbation;
pub mod voters;
pub mod winner;
pub mod yee;

pub use adapter::{approval_by_absolute_distance, generate_scores_from_position, generate_vote_from_position};
pub use cache::{CandidateKey, GridCacheKey, ResultCache};
pub use distortion::{distortion, distortion_map, distortion_report, DistortionCell, DistortionMap, DistortionReport};
pub use model::{Point, SpatialCandidate};
pub use perturbation::{compute_perturbation_map, PerturbationCell, PerturbationMap};
pub use voters::{generate_bloc_voters, generate_uniform_voters, lattice_voters, Voter, VoterBloc};
pub use winner::{closest_candidate, spatial_election, spatial_winner};
pub use yee::{cell_centres, compute_yee_grid, YeeCell, YeeGrid};
