//! vc_core: Core types, ingestion validation, parameters, ordering helpers, and seedable RNG.
//!
//! This crate is **I/O-free**. It defines the stable types used across the
//! engine (`vc_io`, `vc_algo`, `vc_spatial`):
//!
//! - Candidate identity: `CandidateId`
//! - Ballot model: `Candidate`, `Vote`, validated `Election`
//! - Typed parameters: `TallyParams`, `SpatialParams`
//! - Deterministic ordering helpers (explicit stable merge sort, float ordering)
//! - Seedable RNG (ChaCha20) for synthetic electorates only

#![forbid(unsafe_code)]

pub mod determinism;
pub mod errors;
pub mod ids;
pub mod model;
pub mod params;
pub mod rng;

pub use errors::{InvalidBallotError, ParamError};
pub use ids::{CandidateId, IdError};
pub use model::{BallotField, Candidate, Election, Vote};
pub use params::{SpatialParams, TallyParams};
pub use rng::VoterRng;
