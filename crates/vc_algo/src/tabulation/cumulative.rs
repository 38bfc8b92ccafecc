// crates/vc_algo/src/tabulation/cumulative.rs
//
// Cumulative voting: per-candidate points summed straight from `scores`.
// Point budgets are the caller's concern and are not checked here.
// Winners are the top `seats` totals, capped at the candidate count.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use vc_core::{CandidateId, Election};

use crate::tabulation::score::score_sums;
use crate::{sorted_scores, ScoreTally};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CumulativeResult {
    pub winners: Vec<CandidateId>,
    pub totals: Vec<ScoreTally>,
}

pub fn tally_cumulative(election: &Election, seats: usize) -> CumulativeResult {
    let n = election.candidate_count();
    if seats > n {
        warn!(seats, candidates = n, "cumulative seats capped at candidate count");
    }
    let totals = sorted_scores(election, &score_sums(election));
    let winners = totals.iter().take(seats.min(n)).map(|t| t.candidate.clone()).collect();
    debug!(seats = seats.min(n), "cumulative tallied");
    CumulativeResult { winners, totals }
}
