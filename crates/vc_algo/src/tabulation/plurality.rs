// crates/vc_algo/src/tabulation/plurality.rs
//
// One vote per ballot for its first-ranked candidate. Ballots with an empty
// ranking count for nobody. Highest count wins; ties go to candidate order.

use tracing::debug;

use vc_core::Election;

use crate::{sorted_counts, CountResult};

pub fn tally_plurality(election: &Election) -> CountResult {
    let mut counts = vec![0u64; election.candidate_count()];
    for v in election.ballots() {
        if let Some(&first) = election.ranking(v).first() {
            counts[first] += 1;
        }
    }

    let counts = sorted_counts(election, &counts);
    let winner = counts.first().map(|t| t.candidate.clone());
    debug!(ballots = election.vote_count(), winner = ?winner, "plurality tallied");
    CountResult { winner, counts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vc_core::{Candidate, CandidateId, Vote};

    fn cid(s: &str) -> CandidateId {
        s.parse().unwrap()
    }

    fn election(rankings: &[&[&str]]) -> Election {
        let cands = ["a", "b", "c"].iter().map(|s| Candidate::new(cid(s), s.to_uppercase())).collect();
        let votes = rankings
            .iter()
            .map(|r| Vote::new("v").with_ranking(r.iter().map(|s| cid(s))))
            .collect();
        Election::new(cands, votes).unwrap()
    }

    #[test]
    fn first_choices_counted() {
        let r = tally_plurality(&election(&[&["b", "a"], &["b"], &["c", "b"], &[]]));
        assert_eq!(r.winner, Some(cid("b")));
        let got: Vec<(&str, u64)> = r.counts.iter().map(|t| (t.candidate.as_str(), t.votes)).collect();
        assert_eq!(got, vec![("b", 2), ("c", 1), ("a", 0)]);
    }

    #[test]
    fn no_votes_picks_first_candidate() {
        let r = tally_plurality(&election(&[]));
        assert_eq!(r.winner, Some(cid("a")));
        assert!(r.counts.iter().all(|t| t.votes == 0));
    }

    #[test]
    fn tie_resolves_by_candidate_order() {
        let r = tally_plurality(&election(&[&["c"], &["b"]]));
        assert_eq!(r.winner, Some(cid("b")));
    }
}
