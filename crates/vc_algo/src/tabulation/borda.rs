// crates/vc_algo/src/tabulation/borda.rs
//
// Borda count: rank position i (0-based) earns n - 1 - i points, n being the
// number of candidates in the election. Unranked candidates earn nothing.

use tracing::debug;

use vc_core::Election;

use crate::{sorted_counts, CountResult};

pub fn tally_borda(election: &Election) -> CountResult {
    let n = election.candidate_count() as u64;
    let mut points = vec![0u64; election.candidate_count()];
    for v in election.ballots() {
        for (i, &c) in election.ranking(v).iter().enumerate() {
            points[c] += n - 1 - i as u64;
        }
    }

    let counts = sorted_counts(election, &points);
    let winner = counts.first().map(|t| t.candidate.clone());
    debug!(ballots = election.vote_count(), winner = ?winner, "borda tallied");
    CountResult { winner, counts }
}
