// crates/vc_algo/src/lib.rs
#![forbid(unsafe_code)]

//! Pure tally engines over a validated [`vc_core::Election`].
//!
//! Every function here is deterministic and side-effect free: same candidates
//! and votes (same order) ⇒ identical result. Exact ties resolve by the
//! caller's candidate order.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use vc_core::{CandidateId, Election, ParamError, TallyParams};

// ----------------------------- Shared result rows -----------------------------

/// Integer count for one candidate (plurality votes, approvals, Borda points).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tally {
    pub candidate: CandidateId,
    pub votes: u64,
}

/// Real-valued total for one candidate (score sums, weighted tallies).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreTally {
    pub candidate: CandidateId,
    pub score: f64,
}

/// A seat filled in a given (1-based) round of a multi-winner method.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundWinner {
    pub candidate: CandidateId,
    pub round: u32,
}

/// Single-winner count result: winner plus counts sorted descending.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountResult {
    pub winner: Option<CandidateId>,
    pub counts: Vec<Tally>,
}

/// Single-winner score result: winner plus scores sorted descending.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub winner: Option<CandidateId>,
    pub scores: Vec<ScoreTally>,
}

// ----------------------------- Errors -----------------------------

/// Errors surfaced by the engines. Only parameter domains can fail; every
/// engine is total over a validated election.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TallyError {
    #[error(transparent)]
    Param(#[from] ParamError),
}

// ----------------------------- Helpers shared by engines -----------------------------

/// Candidate subset as ascending, distinct, in-range indices (`< n`).
pub(crate) fn normalize_subset(subset: &[usize], n: usize) -> Vec<usize> {
    let mut idx: Vec<usize> = subset.iter().copied().filter(|&i| i < n).collect();
    idx.sort_unstable();
    idx.dedup();
    idx
}

/// Sort `values` (indexed by candidate) descending into `Tally` rows.
pub(crate) fn sorted_counts(election: &Election, values: &[u64]) -> Vec<Tally> {
    vc_core::determinism::indices_by_desc_u64(values)
        .into_iter()
        .map(|i| Tally { candidate: election.id(i).clone(), votes: values[i] })
        .collect()
}

/// Sort `values` (indexed by candidate) descending into `ScoreTally` rows.
pub(crate) fn sorted_scores(election: &Election, values: &[f64]) -> Vec<ScoreTally> {
    vc_core::determinism::indices_by_desc_f64(values)
        .into_iter()
        .map(|i| ScoreTally { candidate: election.id(i).clone(), score: values[i] })
        .collect()
}

// ----------------------------- Public surface -----------------------------

pub mod method;
pub mod pairwise;
pub mod results;
pub mod smith;
pub mod tiebreak;

pub mod tabulation {
    pub mod approval;
    pub mod borda;
    pub mod condorcet;
    pub mod cumulative;
    pub mod irv;
    pub mod majority_judgment;
    pub mod plurality;
    pub mod ranked_pairs;
    pub mod rrv;
    pub mod score;
    pub mod smith_approval;
    pub mod star;
    pub mod stv;

    pub use approval::{tally_approval, tally_approval_within};
    pub use borda::tally_borda;
    pub use condorcet::{tally_condorcet, tally_condorcet_raw, CondorcetRawResult, CondorcetResolution, CondorcetResult};
    pub use cumulative::{tally_cumulative, CumulativeResult};
    pub use irv::{tally_irv, IrvResult, IrvRound};
    pub use majority_judgment::{tally_majority_judgment, CandidateGrades, MajorityJudgmentResult};
    pub use plurality::tally_plurality;
    pub use ranked_pairs::{tally_ranked_pairs, RankedPair, RankedPairsResult};
    pub use rrv::{tally_rrv, RrvResult, RrvRound};
    pub use score::tally_score;
    pub use smith_approval::{tally_smith_approval, SmithApprovalResult};
    pub use star::{tally_star, Finalist, StarResult};
    pub use stv::{droop_quota, tally_stv, StvResult, StvRound};
}

pub use method::{run_method, Method, MethodResult};
pub use pairwise::{build_pairwise_matrix, PairwiseMatrix};
pub use results::{calculate_pairwise_results, calculate_smith_set, head_to_head_victories, PairwiseResult, Victory};
pub use smith::{condorcet_winner, smith_set};
pub use tiebreak::{select_winner, RankedCandidate, TieBreakLevel, WinnerSelection};
