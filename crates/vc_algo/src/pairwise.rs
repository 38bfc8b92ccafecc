//! Pairwise preference matrix built from rankings.
//!
//! `counts[a][b]` = number of ballots ranking `a` strictly ahead of `b`.
//! A ranked candidate is ahead of every unranked one on that ballot; two
//! unranked candidates contribute nothing. The diagonal is fixed at 0.
//!
//! Feeds Condorcet, the Smith set and Ranked Pairs. O(ballots × candidates²).

use serde::{Deserialize, Serialize};
use tracing::trace;

use vc_core::{CandidateId, Election};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairwiseMatrix {
    /// Row/column labels, in the election's candidate order.
    candidates: Vec<CandidateId>,
    counts: Vec<Vec<u64>>,
}

impl PairwiseMatrix {
    pub fn build(election: &Election) -> Self {
        let n = election.candidate_count();
        let mut counts = vec![vec![0u64; n]; n];
        let mut pos: Vec<Option<usize>> = vec![None; n];

        for v in election.ballots() {
            pos.iter_mut().for_each(|p| *p = None);
            for (rank, &c) in election.ranking(v).iter().enumerate() {
                pos[c] = Some(rank);
            }
            for a in 0..n {
                for b in 0..n {
                    if a == b {
                        continue;
                    }
                    let ahead = match (pos[a], pos[b]) {
                        (Some(pa), Some(pb)) => pa < pb,
                        (Some(_), None) => true,
                        _ => false,
                    };
                    if ahead {
                        counts[a][b] += 1;
                    }
                }
            }
        }
        trace!(candidates = n, ballots = election.vote_count(), "pairwise matrix built");

        Self {
            candidates: election.candidates().iter().map(|c| c.id.clone()).collect(),
            counts,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    #[inline]
    pub fn candidates(&self) -> &[CandidateId] {
        &self.candidates
    }

    /// Ballots preferring candidate index `a` over `b`.
    #[inline]
    pub fn get(&self, a: usize, b: usize) -> u64 {
        self.counts[a][b]
    }

    /// `a` beats `b` head-to-head (strictly more ballots). Ties are no win.
    #[inline]
    pub fn beats(&self, a: usize, b: usize) -> bool {
        self.counts[a][b] > self.counts[b][a]
    }

    /// Signed margin of `a` over `b`.
    #[inline]
    pub fn margin(&self, a: usize, b: usize) -> i64 {
        self.counts[a][b] as i64 - self.counts[b][a] as i64
    }

    /// Lookup by id; `None` for unknown ids or the diagonal.
    pub fn count(&self, a: &CandidateId, b: &CandidateId) -> Option<u64> {
        let ia = self.candidates.iter().position(|c| c == a)?;
        let ib = self.candidates.iter().position(|c| c == b)?;
        (ia != ib).then(|| self.counts[ia][ib])
    }

    /// True when no ordered pair has a strict winner.
    pub fn has_no_victories(&self) -> bool {
        let n = self.len();
        (0..n).all(|a| (0..n).all(|b| !self.beats(a, b)))
    }
}

/// Build the head-to-head matrix for `election`.
#[inline]
pub fn build_pairwise_matrix(election: &Election) -> PairwiseMatrix {
    PairwiseMatrix::build(election)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vc_core::{Candidate, Vote};

    fn cid(s: &str) -> CandidateId {
        s.parse().unwrap()
    }

    fn election(n: usize, rankings: &[&[&str]]) -> Election {
        let cands = (1..=n).map(|i| Candidate::new(cid(&i.to_string()), format!("C{i}"))).collect();
        let votes = rankings
            .iter()
            .enumerate()
            .map(|(k, r)| Vote::new(format!("v{k}")).with_ranking(r.iter().map(|s| cid(s))))
            .collect();
        Election::new(cands, votes).unwrap()
    }

    #[test]
    fn three_candidate_counts() {
        let e = election(3, &[&["1", "2", "3"], &["1", "2", "3"], &["2", "3", "1"], &["3", "1", "2"]]);
        let m = build_pairwise_matrix(&e);
        assert_eq!((m.get(0, 1), m.get(1, 0)), (3, 1));
        assert_eq!((m.get(0, 2), m.get(2, 0)), (2, 2));
        assert_eq!((m.get(1, 2), m.get(2, 1)), (3, 1));
        assert_eq!(m.get(0, 0), 0);
        assert!(m.beats(0, 1) && !m.beats(0, 2) && !m.beats(2, 0));
    }

    #[test]
    fn unranked_pairs_are_skipped() {
        // Ballot ranks only candidate 1: 1 > 2 and 1 > 3, nothing between 2 and 3.
        let e = election(3, &[&["1"]]);
        let m = build_pairwise_matrix(&e);
        assert_eq!(m.get(0, 1), 1);
        assert_eq!(m.get(0, 2), 1);
        assert_eq!(m.get(1, 2), 0);
        assert_eq!(m.get(2, 1), 0);
    }

    #[test]
    fn lookup_by_id() {
        let e = election(2, &[&["2", "1"]]);
        let m = build_pairwise_matrix(&e);
        assert_eq!(m.count(&cid("2"), &cid("1")), Some(1));
        assert_eq!(m.count(&cid("1"), &cid("1")), None);
        assert_eq!(m.count(&cid("9"), &cid("1")), None);
    }
}
