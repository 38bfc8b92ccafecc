// crates/vc_algo/src/tiebreak.rs
//
// Ranks a candidate subset (normally the Smith set) with a 4-level waterfall:
//   1) approval count, descending
//   2) direct head-to-head between the two compared candidates
//   3) net head-to-head record (wins - losses over all victories), descending
//   4) average signed victory margin, descending
//
// Level 2 makes the comparator non-transitive in cycles, so ordering goes
// through the explicit stable merge sort. Ranks share the value of the
// preceding candidate when the comparator reports Equal; `is_tied` is a local
// check against the immediate neighbours only.

use core::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use vc_core::determinism::{cmp_f64_desc, merge_sort_by};
use vc_core::{CandidateId, Election};

use crate::normalize_subset;
use crate::pairwise::PairwiseMatrix;

/// Which comparator level separated first place from second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreakLevel {
    /// Zero or one candidate: nothing to break.
    Unopposed,
    Approval,
    DirectMatchup,
    HeadToHead,
    AverageMargin,
    /// All four levels equal; first place went to candidate order.
    Unresolved,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCandidate {
    pub candidate: CandidateId,
    pub name: String,
    /// 1-based.
    pub rank: usize,
    pub approvals: u64,
    pub net_head_to_head: i64,
    pub average_margin: f64,
    pub is_tied: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnerSelection {
    pub winner: Option<CandidateId>,
    pub ranking: Vec<RankedCandidate>,
    pub decided_by: TieBreakLevel,
}

#[derive(Clone, Copy)]
struct Stats {
    idx: usize,
    approvals: u64,
    net: i64,
    avg_margin: f64,
}

struct Waterfall<'a> {
    m: &'a PairwiseMatrix,
}

impl Waterfall<'_> {
    /// `Less` ⇒ `a` ranks above `b`, plus the level that decided it.
    fn compare(&self, a: &Stats, b: &Stats) -> (Ordering, TieBreakLevel) {
        if a.approvals != b.approvals {
            return (b.approvals.cmp(&a.approvals), TieBreakLevel::Approval);
        }
        if self.m.beats(a.idx, b.idx) {
            return (Ordering::Less, TieBreakLevel::DirectMatchup);
        }
        if self.m.beats(b.idx, a.idx) {
            return (Ordering::Greater, TieBreakLevel::DirectMatchup);
        }
        if a.net != b.net {
            return (b.net.cmp(&a.net), TieBreakLevel::HeadToHead);
        }
        match cmp_f64_desc(a.avg_margin, b.avg_margin) {
            Ordering::Equal => (Ordering::Equal, TieBreakLevel::Unresolved),
            o => (o, TieBreakLevel::AverageMargin),
        }
    }

    /// Equal approval, no direct winner between them, equal net record.
    fn locally_tied(&self, a: &Stats, b: &Stats) -> bool {
        a.approvals == b.approvals
            && !self.m.beats(a.idx, b.idx)
            && !self.m.beats(b.idx, a.idx)
            && a.net == b.net
    }
}

fn stats_for(m: &PairwiseMatrix, approvals: &[u64], idx: usize) -> Stats {
    let n = m.len();
    let (mut wins, mut losses, mut margin_sum, mut decided) = (0i64, 0i64, 0i64, 0i64);
    for o in 0..n {
        if o == idx {
            continue;
        }
        let margin = m.margin(idx, o);
        if margin > 0 {
            wins += 1;
        } else if margin < 0 {
            losses += 1;
        } else {
            continue;
        }
        margin_sum += margin;
        decided += 1;
    }
    Stats {
        idx,
        approvals: approvals[idx],
        net: wins - losses,
        avg_margin: if decided == 0 { 0.0 } else { margin_sum as f64 / decided as f64 },
    }
}

/// Rank `subset` (candidate indices) and pick the first as winner.
///
/// Net record and average margin are taken over every victory in the
/// election, not only those inside the subset. The subset is read in
/// candidate order; duplicates and indices outside the field are ignored.
pub fn select_winner(election: &Election, subset: &[usize], m: &PairwiseMatrix) -> WinnerSelection {
    let mut approvals = vec![0u64; election.candidate_count()];
    for v in election.ballots() {
        for &c in election.approved(v) {
            approvals[c] += 1;
        }
    }

    let members = normalize_subset(subset, election.candidate_count().min(m.len()));
    let mut stats: Vec<Stats> = members.iter().map(|&i| stats_for(m, &approvals, i)).collect();
    let wf = Waterfall { m };
    merge_sort_by(&mut stats, |a, b| wf.compare(a, b).0);

    let decided_by = match stats.as_slice() {
        [a, b, ..] => wf.compare(a, b).1,
        _ => TieBreakLevel::Unopposed,
    };

    let mut ranking: Vec<RankedCandidate> = Vec::with_capacity(stats.len());
    for (i, s) in stats.iter().enumerate() {
        let rank = match ranking.last() {
            Some(prev) if wf.compare(&stats[i - 1], s).0 == Ordering::Equal => prev.rank,
            _ => i + 1,
        };
        let tied_prev = i > 0 && wf.locally_tied(&stats[i - 1], s);
        let tied_next = stats.get(i + 1).is_some_and(|n| wf.locally_tied(s, n));
        ranking.push(RankedCandidate {
            candidate: election.id(s.idx).clone(),
            name: election.name(s.idx).to_owned(),
            rank,
            approvals: s.approvals,
            net_head_to_head: s.net,
            average_margin: s.avg_margin,
            is_tied: tied_prev || tied_next,
        });
    }

    let winner = ranking.first().map(|r| r.candidate.clone());
    debug!(subset = members.len(), ?decided_by, "waterfall ranking complete");
    WinnerSelection { winner, ranking, decided_by }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vc_core::{Candidate, Vote};

    fn cid(s: &str) -> CandidateId {
        s.parse().unwrap()
    }

    fn election(n: usize, ballots: &[(&[&str], &[&str])]) -> Election {
        let cands = (1..=n).map(|i| Candidate::new(cid(&i.to_string()), format!("C{i}"))).collect();
        let votes = ballots
            .iter()
            .map(|(r, a)| {
                Vote::new("v")
                    .with_ranking(r.iter().map(|s| cid(s)))
                    .with_approved(a.iter().map(|s| cid(s)))
            })
            .collect();
        Election::new(cands, votes).unwrap()
    }

    #[test]
    fn approval_decides_first() {
        let e = election(
            3,
            &[
                (&["1", "2", "3"], &["2"]),
                (&["2", "3", "1"], &["2"]),
                (&["3", "1", "2"], &["1"]),
            ],
        );
        let m = PairwiseMatrix::build(&e);
        let sel = select_winner(&e, &[0, 1, 2], &m);
        assert_eq!(sel.winner, Some(cid("2")));
        assert_eq!(sel.decided_by, TieBreakLevel::Approval);
        assert_eq!(sel.ranking[0].rank, 1);
    }

    #[test]
    fn direct_matchup_breaks_equal_approval() {
        // 2 beats 1 head-to-head, both approved once.
        let e = election(2, &[(&["2", "1"], &["1"]), (&["2", "1"], &["2"])]);
        let m = PairwiseMatrix::build(&e);
        let sel = select_winner(&e, &[0, 1], &m);
        assert_eq!(sel.winner, Some(cid("2")));
        assert_eq!(sel.decided_by, TieBreakLevel::DirectMatchup);
        assert!(!sel.ranking[0].is_tied);
        assert_eq!(sel.ranking[1].rank, 2);
    }

    #[test]
    fn full_tie_shares_rank_and_keeps_order() {
        let e = election(2, &[(&["1", "2"], &[]), (&["2", "1"], &[])]);
        let m = PairwiseMatrix::build(&e);
        let sel = select_winner(&e, &[0, 1], &m);
        assert_eq!(sel.winner, Some(cid("1")));
        assert_eq!(sel.decided_by, TieBreakLevel::Unresolved);
        assert_eq!(sel.ranking.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 1]);
        assert!(sel.ranking.iter().all(|r| r.is_tied));
    }

    #[test]
    fn subset_is_deduplicated_and_bounded() {
        let e = election(2, &[(&["2", "1"], &["1"]), (&["2", "1"], &["2"])]);
        let m = PairwiseMatrix::build(&e);
        let sel = select_winner(&e, &[1, 0, 1, 5], &m);
        assert_eq!(sel.ranking.len(), 2);
        assert_eq!(sel.winner, Some(cid("2")));
        assert_eq!(select_winner(&e, &[9], &m).winner, None);
    }

    #[test]
    fn empty_and_single_subsets() {
        let e = election(1, &[]);
        let m = PairwiseMatrix::build(&e);
        assert_eq!(select_winner(&e, &[], &m).winner, None);
        let one = select_winner(&e, &[0], &m);
        assert_eq!(one.winner, Some(cid("1")));
        assert_eq!(one.decided_by, TieBreakLevel::Unopposed);
    }
}
