//! Loader: parse a stored election document (`{ title, candidates, votes,
//! createdAt, ... }`) from JSON text into a validated `Election`. Unknown
//! document fields are ignored. No filesystem or network I/O.

use serde::{Deserialize, Serialize};
use tracing::debug;

use vc_core::{Candidate, Election, Vote};

use crate::{IoError, IoResult};

// ----------------------------- Wire-facing types -----------------------------

/// Creation time as stored: epoch milliseconds or a `{seconds, nanoseconds}`
/// timestamp object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
enum CreatedAtWire {
    Millis(i64),
    Timestamp { seconds: i64, nanoseconds: u32 },
}

impl CreatedAtWire {
    fn to_millis(self) -> i64 {
        match self {
            CreatedAtWire::Millis(ms) => ms,
            CreatedAtWire::Timestamp { seconds, nanoseconds } => {
                seconds.saturating_mul(1000).saturating_add(i64::from(nanoseconds / 1_000_000))
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentWire {
    #[serde(default)]
    title: String,
    candidates: Vec<Candidate>,
    #[serde(default)]
    votes: Vec<Vote>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<CreatedAtWire>,
}

// ----------------------------- Public document -----------------------------

/// A stored election with its ballots validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DocumentWire", into = "DocumentWire")]
pub struct ElectionDocument {
    pub title: String,
    /// Epoch milliseconds, when the document carries one.
    pub created_at: Option<i64>,
    pub election: Election,
}

impl TryFrom<DocumentWire> for ElectionDocument {
    type Error = vc_core::InvalidBallotError;
    fn try_from(w: DocumentWire) -> Result<Self, Self::Error> {
        Ok(ElectionDocument {
            title: w.title,
            created_at: w.created_at.map(CreatedAtWire::to_millis),
            election: Election::new(w.candidates, w.votes)?,
        })
    }
}

impl From<ElectionDocument> for DocumentWire {
    fn from(d: ElectionDocument) -> Self {
        DocumentWire {
            title: d.title,
            candidates: d.election.candidates().to_vec(),
            votes: d.election.votes().to_vec(),
            created_at: d.created_at.map(CreatedAtWire::Millis),
        }
    }
}

/// Parse and validate. JSON syntax/shape errors come back as `IoError::Json`,
/// ballot reference errors as `IoError::Ballot`.
pub fn parse_election_document(text: &str) -> IoResult<ElectionDocument> {
    let wire: DocumentWire = serde_json::from_str(text)?;
    let doc = ElectionDocument::try_from(wire).map_err(IoError::from)?;
    debug!(
        title = %doc.title,
        candidates = doc.election.candidate_count(),
        votes = doc.election.vote_count(),
        "election document loaded"
    );
    Ok(doc)
}

/// Render a document back to its stored shape.
pub fn election_document_to_value(doc: &ElectionDocument) -> IoResult<serde_json::Value> {
    Ok(serde_json::to_value(doc)?)
}
