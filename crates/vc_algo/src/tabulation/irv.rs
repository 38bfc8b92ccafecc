// crates/vc_algo/src/tabulation/irv.rs
//
// Instant-runoff voting.
//
// Each round counts every ballot for its highest-ranked continuing
// candidate; exhausted ballots count for nobody. The leader wins on a strict
// majority of all cast ballots (2 * count > votes, exhausted ones included).
// The count also stops once a single candidate remains or no ballot is active.
// Otherwise the candidate with the fewest votes is eliminated, the first
// found in candidate order on ties.

use serde::{Deserialize, Serialize};
use tracing::debug;

use vc_core::determinism::{first_max_by, first_min_by};
use vc_core::{CandidateId, Election};

use crate::Tally;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IrvRound {
    /// 1-based.
    pub round: u32,
    /// Continuing candidates only, in candidate order.
    pub counts: Vec<Tally>,
    /// `None` on the deciding round.
    pub eliminated: Option<CandidateId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IrvResult {
    pub winner: Option<CandidateId>,
    pub rounds: Vec<IrvRound>,
}

/// Highest-ranked continuing candidate on ballot `v`.
#[inline]
fn next_active_pref(election: &Election, v: usize, continuing: &[bool]) -> Option<usize> {
    election.ranking(v).iter().copied().find(|&c| continuing[c])
}

pub fn tally_irv(election: &Election) -> IrvResult {
    let n = election.candidate_count();
    let mut continuing = vec![true; n];
    let mut rounds = Vec::new();
    let cast = election.vote_count() as u64;

    loop {
        let mut counts = vec![0u64; n];
        let mut active = 0u64;
        for v in election.ballots() {
            if let Some(c) = next_active_pref(election, v, &continuing) {
                counts[c] += 1;
                active += 1;
            }
        }

        let alive: Vec<usize> = (0..n).filter(|&c| continuing[c]).collect();
        let Some(lead_pos) = first_max_by(&alive, |&a, &b| counts[a].cmp(&counts[b])) else {
            return IrvResult { winner: None, rounds };
        };
        let leader = alive[lead_pos];
        let row: Vec<Tally> = alive
            .iter()
            .map(|&c| Tally { candidate: election.id(c).clone(), votes: counts[c] })
            .collect();
        let round = rounds.len() as u32 + 1;

        let majority = 2 * counts[leader] > cast;
        if majority || alive.len() == 1 || active == 0 {
            debug!(round, leader = %election.id(leader), votes = counts[leader], active, "irv winner");
            rounds.push(IrvRound { round, counts: row, eliminated: None });
            return IrvResult { winner: Some(election.id(leader).clone()), rounds };
        }

        // `alive` has at least two entries here.
        let low_pos = first_min_by(&alive, |&a, &b| counts[a].cmp(&counts[b])).unwrap_or(0);
        let loser = alive[low_pos];
        continuing[loser] = false;
        debug!(round, eliminated = %election.id(loser), votes = counts[loser], "irv elimination");
        rounds.push(IrvRound { round, counts: row, eliminated: Some(election.id(loser).clone()) });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vc_core::{Candidate, Vote};

    fn cid(s: &str) -> CandidateId {
        s.parse().unwrap()
    }

    fn election(rankings: &[&[&str]]) -> Election {
        let cands = ["a", "b", "c"].iter().map(|s| Candidate::new(cid(s), *s)).collect();
        let votes = rankings
            .iter()
            .map(|r| Vote::new("v").with_ranking(r.iter().map(|s| cid(s))))
            .collect();
        Election::new(cands, votes).unwrap()
    }

    #[test]
    fn majority_in_first_round() {
        let r = tally_irv(&election(&[&["a"], &["a"], &["b"]]));
        assert_eq!(r.winner, Some(cid("a")));
        assert_eq!(r.rounds.len(), 1);
        assert_eq!(r.rounds[0].eliminated, None);
    }

    #[test]
    fn transfers_after_elimination() {
        // a 2, b 2, c 1 -> c out, its ballot moves to b.
        let r = tally_irv(&election(&[&["a"], &["a"], &["b"], &["b"], &["c", "b"]]));
        assert_eq!(r.rounds[0].eliminated, Some(cid("c")));
        assert_eq!(r.winner, Some(cid("b")));
        assert_eq!(r.rounds.len(), 2);
        assert_eq!(r.rounds[1].counts.len(), 2);
    }

    #[test]
    fn lowest_tie_eliminates_first_found() {
        // a 2, b 1, c 1 (no majority: 2 of 4) -> b eliminated before c.
        let r = tally_irv(&election(&[&["a"], &["a"], &["b"], &["c"]]));
        assert_eq!(r.rounds[0].eliminated, Some(cid("b")));
    }

    #[test]
    fn exhausted_ballots_still_count_toward_the_majority_bar() {
        // 7 cast: a 3, b 2, c 2. After b is out, a holds 3 of 5 continuing
        // ballots, which is still short of 4 of 7.
        let r = tally_irv(&election(&[&["a"], &["a"], &["a"], &["b"], &["b"], &["c"], &["c"]]));
        assert_eq!(r.rounds.len(), 3);
        assert_eq!(r.rounds[0].eliminated, Some(cid("b")));
        assert_eq!(r.rounds[1].eliminated, Some(cid("c")));
        assert_eq!(r.rounds[2].counts, vec![Tally { candidate: cid("a"), votes: 3 }]);
        assert_eq!(r.winner, Some(cid("a")));
    }

    #[test]
    fn no_ballots_leader_wins() {
        let r = tally_irv(&election(&[]));
        assert_eq!(r.winner, Some(cid("a")));
        assert_eq!(r.rounds.len(), 1);
    }

    #[test]
    fn no_candidates() {
        let e = Election::new(vec![], vec![]).unwrap();
        assert_eq!(tally_irv(&e), IrvResult { winner: None, rounds: vec![] });
    }
}
