//! crates/vc_core/src/model.rs
//! Ballot & candidate model plus the validated `Election` every tally consumes.
//!
//! Candidates and votes are supplied wholesale by the caller for each tally
//! and never mutated. `Election::new` is the single ingestion point: it
//! rejects malformed references up front and precomputes dense index views so
//! the engines never perform fallible lookups.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::InvalidBallotError;
use crate::ids::CandidateId;

// ----------------------------- Wire-facing types -----------------------------

/// A registered candidate. Identity is by `id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
}

impl Candidate {
    pub fn new(id: CandidateId, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

/// One cast ballot.
///
/// `ranking` is most-preferred first; omitted candidates are unranked.
/// `scores` is only read by score-based methods; a missing map or key is 0.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    #[serde(default)]
    pub voter_name: String,
    #[serde(default)]
    pub ranking: Vec<CandidateId>,
    #[serde(default)]
    pub approved: BTreeSet<CandidateId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<BTreeMap<CandidateId, f64>>,
    /// Milliseconds since the Unix epoch, as recorded by the caller.
    #[serde(default)]
    pub timestamp: i64,
}

impl Vote {
    pub fn new(voter_name: impl Into<String>) -> Self {
        Self { voter_name: voter_name.into(), ..Self::default() }
    }

    pub fn with_ranking<I: IntoIterator<Item = CandidateId>>(mut self, ranking: I) -> Self {
        self.ranking = ranking.into_iter().collect();
        self
    }

    pub fn with_approved<I: IntoIterator<Item = CandidateId>>(mut self, approved: I) -> Self {
        self.approved = approved.into_iter().collect();
        self
    }

    pub fn with_scores<I: IntoIterator<Item = (CandidateId, f64)>>(mut self, scores: I) -> Self {
        self.scores = Some(scores.into_iter().collect());
        self
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Score given to `id`; missing ⇒ 0.
    #[inline]
    pub fn score_for(&self, id: &CandidateId) -> f64 {
        self.scores
            .as_ref()
            .and_then(|s| s.get(id))
            .copied()
            .unwrap_or(0.0)
    }
}

/// Which ballot field carried an offending reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BallotField {
    Ranking,
    Approved,
    Scores,
}

impl fmt::Display for BallotField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BallotField::Ranking => "ranking",
            BallotField::Approved => "approved",
            BallotField::Scores => "scores",
        })
    }
}

// ----------------------------- Validated election -----------------------------

/// Wire shape used for (de)serialization; converted through `Election::new`.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct ElectionParts {
    candidates: Vec<Candidate>,
    #[serde(default)]
    votes: Vec<Vote>,
}

/// Candidates + ballots, validated and indexed.
///
/// Candidate indices follow the caller's `candidates` order; that order is
/// the tie-break order of every engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ElectionParts", into = "ElectionParts")]
pub struct Election {
    candidates: Vec<Candidate>,
    votes: Vec<Vote>,
    index: BTreeMap<CandidateId, usize>,
    rankings: Vec<Vec<usize>>,
    approvals: Vec<Vec<usize>>,
    scores: Vec<Vec<f64>>,
}

impl Election {
    /// Validate and index. Fails fast on the first malformed reference.
    pub fn new(candidates: Vec<Candidate>, votes: Vec<Vote>) -> Result<Self, InvalidBallotError> {
        let mut index = BTreeMap::new();
        for (i, c) in candidates.iter().enumerate() {
            if index.insert(c.id.clone(), i).is_some() {
                return Err(InvalidBallotError::DuplicateCandidate { id: c.id.clone() });
            }
        }

        let n = candidates.len();
        let mut rankings = Vec::with_capacity(votes.len());
        let mut approvals = Vec::with_capacity(votes.len());
        let mut scores = Vec::with_capacity(votes.len());

        for vote in &votes {
            let unknown = |field: BallotField, id: &CandidateId| InvalidBallotError::UnknownCandidate {
                voter: vote.voter_name.clone(),
                field,
                id: id.clone(),
            };

            let mut seen = vec![false; n];
            let mut ranked = Vec::with_capacity(vote.ranking.len());
            for id in &vote.ranking {
                let i = *index.get(id).ok_or_else(|| unknown(BallotField::Ranking, id))?;
                if seen[i] {
                    return Err(InvalidBallotError::DuplicateRanking {
                        voter: vote.voter_name.clone(),
                        id: id.clone(),
                    });
                }
                seen[i] = true;
                ranked.push(i);
            }

            let mut approved = Vec::with_capacity(vote.approved.len());
            for id in &vote.approved {
                approved.push(*index.get(id).ok_or_else(|| unknown(BallotField::Approved, id))?);
            }
            approved.sort_unstable();

            let mut dense = vec![0.0; n];
            if let Some(map) = &vote.scores {
                for (id, &s) in map {
                    let i = *index.get(id).ok_or_else(|| unknown(BallotField::Scores, id))?;
                    if !s.is_finite() {
                        return Err(InvalidBallotError::NonFiniteScore {
                            voter: vote.voter_name.clone(),
                            id: id.clone(),
                        });
                    }
                    dense[i] = s;
                }
            }

            rankings.push(ranked);
            approvals.push(approved);
            scores.push(dense);
        }

        Ok(Self { candidates, votes, index, rankings, approvals, scores })
    }

    #[inline]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    #[inline]
    pub fn votes(&self) -> &[Vote] {
        &self.votes
    }

    #[inline]
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    #[inline]
    pub fn vote_count(&self) -> usize {
        self.votes.len()
    }

    /// Position of `id` in the caller's candidate order.
    #[inline]
    pub fn index_of(&self, id: &CandidateId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Id at candidate index `i`. Panics on out-of-range indices, which only
    /// arise from engine bugs (indices come from this election).
    #[inline]
    pub fn id(&self, i: usize) -> &CandidateId {
        &self.candidates[i].id
    }

    #[inline]
    pub fn name(&self, i: usize) -> &str {
        &self.candidates[i].name
    }

    /// Ballot `v`'s ranking as candidate indices, most-preferred first.
    #[inline]
    pub fn ranking(&self, v: usize) -> &[usize] {
        &self.rankings[v]
    }

    /// Ballot `v`'s approvals as ascending candidate indices.
    #[inline]
    pub fn approved(&self, v: usize) -> &[usize] {
        &self.approvals[v]
    }

    /// Ballot `v`'s dense score row (missing ⇒ 0), indexed by candidate.
    #[inline]
    pub fn scores(&self, v: usize) -> &[f64] {
        &self.scores[v]
    }

    /// Iterate ballot indices `0..vote_count()`.
    #[inline]
    pub fn ballots(&self) -> core::ops::Range<usize> {
        0..self.votes.len()
    }
}

impl TryFrom<ElectionParts> for Election {
    type Error = InvalidBallotError;
    fn try_from(p: ElectionParts) -> Result<Self, Self::Error> {
        Election::new(p.candidates, p.votes)
    }
}

impl From<Election> for ElectionParts {
    fn from(e: Election) -> Self {
        ElectionParts { candidates: e.candidates, votes: e.votes }
    }
}

// ----------------------------- Tests -----------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn cid(s: &str) -> CandidateId {
        s.parse().unwrap()
    }

    fn cands(ids: &[&str]) -> Vec<Candidate> {
        ids.iter().map(|i| Candidate::new(cid(i), format!("C{i}"))).collect()
    }

    #[test]
    fn indexes_rankings_approvals_scores() {
        let votes = vec![Vote::new("ann")
            .with_ranking([cid("2"), cid("1")])
            .with_approved([cid("2"), cid("3")])
            .with_scores([(cid("3"), 4.0)])];
        let e = Election::new(cands(&["1", "2", "3"]), votes).unwrap();
        assert_eq!(e.ranking(0), &[1, 0]);
        assert_eq!(e.approved(0), &[1, 2]);
        assert_eq!(e.scores(0), &[0.0, 0.0, 4.0]);
        assert_eq!(e.index_of(&cid("3")), Some(2));
    }

    #[test]
    fn rejects_unknown_reference() {
        let votes = vec![Vote::new("bob").with_approved([cid("9")])];
        let err = Election::new(cands(&["1"]), votes).unwrap_err();
        assert_eq!(
            err,
            InvalidBallotError::UnknownCandidate {
                voter: "bob".into(),
                field: BallotField::Approved,
                id: cid("9"),
            }
        );
    }

    #[test]
    fn rejects_duplicates() {
        let dup = Election::new(cands(&["1", "1"]), vec![]).unwrap_err();
        assert!(matches!(dup, InvalidBallotError::DuplicateCandidate { .. }));

        let votes = vec![Vote::new("cy").with_ranking([cid("1"), cid("1")])];
        let err = Election::new(cands(&["1"]), votes).unwrap_err();
        assert!(matches!(err, InvalidBallotError::DuplicateRanking { .. }));
    }

    #[test]
    fn rejects_non_finite_scores() {
        let votes = vec![Vote::new("di").with_scores([(cid("1"), f64::NAN)])];
        let err = Election::new(cands(&["1"]), votes).unwrap_err();
        assert!(matches!(err, InvalidBallotError::NonFiniteScore { .. }));
    }

    #[test]
    fn json_shape_is_camel_case_and_validated() {
        let json = r#"{
            "candidates": [{"id":"1","name":"C1"},{"id":"2","name":"C2"}],
            "votes": [{"voterName":"ann","ranking":["2","1"],"approved":["2"],"timestamp":5}]
        }"#;
        let e: Election = serde_json::from_str(json).unwrap();
        assert_eq!(e.vote_count(), 1);
        assert_eq!(e.votes()[0].voter_name, "ann");

        let bad = r#"{"candidates":[{"id":"1","name":"C1"}],"votes":[{"ranking":["x"]}]}"#;
        assert!(serde_json::from_str::<Election>(bad).is_err());
    }
}
