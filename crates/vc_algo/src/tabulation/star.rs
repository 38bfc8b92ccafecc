// crates/vc_algo/src/tabulation/star.rs
//
// STAR (Score Then Automatic Runoff).
//
// Scoring round: sum scores per candidate; the top two are finalists.
// Runoff: each ballot counts for whichever finalist it scored higher; equal
// scores count for neither. The runoff leader wins; an exact runoff tie goes
// to the higher-scoring finalist (the first one).

use serde::{Deserialize, Serialize};
use tracing::debug;

use vc_core::determinism::indices_by_desc_f64;
use vc_core::{CandidateId, Election};

use crate::tabulation::score::score_sums;
use crate::{sorted_scores, ScoreTally};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finalist {
    pub candidate: CandidateId,
    pub score: f64,
    pub runoff_votes: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarResult {
    pub winner: Option<CandidateId>,
    /// Scoring round, descending.
    pub scores: Vec<ScoreTally>,
    /// Empty with fewer than two candidates.
    pub finalists: Vec<Finalist>,
}

pub fn tally_star(election: &Election) -> StarResult {
    let sums = score_sums(election);
    let order = indices_by_desc_f64(&sums);
    let scores = sorted_scores(election, &sums);

    let (ia, ib) = match order.as_slice() {
        [first, second, ..] => (*first, *second),
        [only] => {
            return StarResult { winner: Some(election.id(*only).clone()), scores, finalists: Vec::new() };
        }
        [] => return StarResult { winner: None, scores, finalists: Vec::new() },
    };

    let (mut va, mut vb) = (0u64, 0u64);
    for v in election.ballots() {
        let s = election.scores(v);
        if s[ia] > s[ib] {
            va += 1;
        } else if s[ib] > s[ia] {
            vb += 1;
        }
    }

    let (a, b) = (election.id(ia), election.id(ib));
    let winner = if vb > va { b.clone() } else { a.clone() };
    debug!(first = %a, second = %b, va, vb, winner = %winner, "star runoff");
    StarResult {
        winner: Some(winner),
        scores,
        finalists: vec![
            Finalist { candidate: a.clone(), score: sums[ia], runoff_votes: va },
            Finalist { candidate: b.clone(), score: sums[ib], runoff_votes: vb },
        ],
    }
}
