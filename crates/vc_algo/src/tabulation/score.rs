// crates/vc_algo/src/tabulation/score.rs
//
// Score (range) voting: sum the given scores per candidate, highest wins.
// A ballot without a score map, or without a key, contributes 0.

use tracing::debug;

use vc_core::Election;

use crate::{sorted_scores, ScoreResult};

/// Raw per-candidate score sums in candidate order.
pub(crate) fn score_sums(election: &Election) -> Vec<f64> {
    let mut sums = vec![0.0f64; election.candidate_count()];
    for v in election.ballots() {
        for (c, s) in election.scores(v).iter().enumerate() {
            sums[c] += s;
        }
    }
    sums
}

pub fn tally_score(election: &Election) -> ScoreResult {
    let scores = sorted_scores(election, &score_sums(election));
    let winner = scores.first().map(|t| t.candidate.clone());
    debug!(ballots = election.vote_count(), winner = ?winner, "score tallied");
    ScoreResult { winner, scores }
}
