//! crates/vc_io/src/lib.rs
//! In-memory I/O helpers for the tally engine.
//!
//! - `canonical_json`: compact, key-sorted JSON bytes
//! - `hasher`: SHA-256 over raw or canonical bytes (cache keys, digests)
//! - `loader`: parse Firestore-shaped election documents into a validated `Election`
//!
//! Callers own every file, socket and database; this crate only sees strings
//! and values.

#![forbid(unsafe_code)]

use thiserror::Error;

use vc_core::InvalidBallotError;

/// Unified error for vc_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// JSON syntax or shape errors, with the parser's position.
    #[error("json error at line {line}, column {column}: {msg}")]
    Json { line: usize, column: usize, msg: String },

    /// A value could not be rendered as canonical JSON.
    #[error("canonicalization error: {0}")]
    Canonical(String),

    /// A document parsed but its ballots reference the election incorrectly.
    #[error(transparent)]
    Ballot(#[from] InvalidBallotError),
}

pub type IoResult<T> = Result<T, IoError>;

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        IoError::Json { line: e.line(), column: e.column(), msg: e.to_string() }
    }
}

pub mod canonical_json;
pub mod hasher;
pub mod loader;

pub use canonical_json::{to_canonical_bytes, to_canonical_json_bytes};
pub use hasher::{sha256_canonical, sha256_canonical_value, sha256_hex};
pub use loader::{parse_election_document, ElectionDocument};
