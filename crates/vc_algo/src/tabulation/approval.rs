// crates/vc_algo/src/tabulation/approval.rs
//
// Approval counting: each ballot adds one to every candidate in its
// `approved` set. Optional restriction to a candidate subset (used by
// Smith + Approval); counts for excluded candidates are dropped.

use tracing::debug;

use vc_core::Election;

use crate::{normalize_subset, sorted_counts, CountResult, Tally};

/// Per-candidate approval counts in candidate order.
pub(crate) fn approval_counts(election: &Election) -> Vec<u64> {
    let mut counts = vec![0u64; election.candidate_count()];
    for v in election.ballots() {
        for &c in election.approved(v) {
            counts[c] += 1;
        }
    }
    counts
}

pub fn tally_approval(election: &Election) -> CountResult {
    let counts = sorted_counts(election, &approval_counts(election));
    let winner = counts.first().map(|t| t.candidate.clone());
    debug!(ballots = election.vote_count(), winner = ?winner, "approval tallied");
    CountResult { winner, counts }
}

/// Approval restricted to `subset` (candidate indices). Duplicates and
/// out-of-range indices are ignored. Output rows follow descending count,
/// ties by candidate order.
pub fn tally_approval_within(election: &Election, subset: &[usize]) -> CountResult {
    let all = approval_counts(election);
    let mut idx = normalize_subset(subset, all.len());
    idx.sort_by(|&a, &b| all[b].cmp(&all[a]));

    let counts: Vec<Tally> = idx
        .into_iter()
        .map(|i| Tally { candidate: election.id(i).clone(), votes: all[i] })
        .collect();
    let winner = counts.first().map(|t| t.candidate.clone());
    CountResult { winner, counts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vc_core::{Candidate, CandidateId, Vote};

    fn cid(s: &str) -> CandidateId {
        s.parse().unwrap()
    }

    fn election(approvals: &[&[&str]]) -> Election {
        let cands = ["a", "b", "c"].iter().map(|s| Candidate::new(cid(s), *s)).collect();
        let votes = approvals
            .iter()
            .map(|a| Vote::new("v").with_approved(a.iter().map(|s| cid(s))))
            .collect();
        Election::new(cands, votes).unwrap()
    }

    #[test]
    fn counts_every_approval() {
        let r = tally_approval(&election(&[&["a", "c"], &["c"], &["b", "c"]]));
        assert_eq!(r.winner, Some(cid("c")));
        assert_eq!(r.counts[0].votes, 3);
        assert_eq!(r.counts[1].candidate, cid("a"));
    }

    #[test]
    fn restricted_to_subset() {
        let e = election(&[&["a", "c"], &["c"], &["b"], &["b"]]);
        let r = tally_approval_within(&e, &[2, 0]);
        assert_eq!(r.winner, Some(cid("c")));
        assert_eq!(r.counts.len(), 2);
        assert!(tally_approval_within(&e, &[]).winner.is_none());
    }

    #[test]
    fn subset_ignores_duplicates_and_unknown_indices() {
        let e = election(&[&["a", "c"], &["c"], &["b"]]);
        let r = tally_approval_within(&e, &[2, 2, 7, 0, 2]);
        let ids: Vec<&str> = r.counts.iter().map(|t| t.candidate.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
        assert!(tally_approval_within(&e, &[3, 99]).counts.is_empty());
    }
}
