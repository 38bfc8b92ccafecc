// crates/vc_algo/src/tabulation/stv.rs
//
// Single transferable vote with a Droop quota and fractional surplus
// transfer.
//
// Round order:
//   1. If the continuing candidates fit in the open seats, all are elected.
//   2. Otherwise weighted first preferences are counted. Every candidate at
//      or above quota is elected (candidate order, up to the open seats) and
//      each ballot currently supporting them keeps (count - quota) / count of
//      its weight.
//   3. If nobody reached quota, the lowest candidate (first found) is
//      eliminated; its ballots move on at unchanged weight.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use vc_core::determinism::first_min_by;
use vc_core::{CandidateId, Election};

use crate::{RoundWinner, ScoreTally};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StvRound {
    pub round: u32,
    /// Weighted first preferences of the continuing candidates, candidate order.
    /// Empty when the round elected the remaining field outright.
    pub counts: Vec<ScoreTally>,
    pub elected: Vec<CandidateId>,
    pub eliminated: Option<CandidateId>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StvResult {
    pub winners: Vec<RoundWinner>,
    pub rounds: Vec<StvRound>,
    pub quota: u64,
    pub seats: usize,
}

/// Droop quota: `floor(votes / (seats + 1)) + 1`.
#[inline]
pub fn droop_quota(votes: u64, seats: usize) -> u64 {
    votes / (seats as u64 + 1) + 1
}

pub fn tally_stv(election: &Election, seats: usize) -> StvResult {
    let n = election.candidate_count();
    if seats > n {
        warn!(seats, candidates = n, "stv seats capped at candidate count");
    }
    let seats = seats.min(n);
    let quota = droop_quota(election.vote_count() as u64, seats);
    let q = quota as f64;

    let mut continuing = vec![true; n];
    let mut weights = vec![1.0f64; election.vote_count()];
    let mut winners: Vec<RoundWinner> = Vec::new();
    let mut rounds: Vec<StvRound> = Vec::new();

    while winners.len() < seats {
        let round = rounds.len() as u32 + 1;
        let open = seats - winners.len();
        let alive: Vec<usize> = (0..n).filter(|&c| continuing[c]).collect();

        if alive.len() <= open {
            let elected: Vec<CandidateId> = alive.iter().map(|&c| election.id(c).clone()).collect();
            winners.extend(elected.iter().map(|c| RoundWinner { candidate: c.clone(), round }));
            debug!(round, elected = elected.len(), "stv elects remaining field");
            rounds.push(StvRound { round, counts: Vec::new(), elected, eliminated: None });
            break;
        }

        // Current holder of each ballot, and weighted counts.
        let mut holder: Vec<Option<usize>> = Vec::with_capacity(weights.len());
        let mut counts = vec![0.0f64; n];
        for v in election.ballots() {
            let top = election.ranking(v).iter().copied().find(|&c| continuing[c]);
            if let Some(c) = top {
                counts[c] += weights[v];
            }
            holder.push(top);
        }
        let row: Vec<ScoreTally> = alive
            .iter()
            .map(|&c| ScoreTally { candidate: election.id(c).clone(), score: counts[c] })
            .collect();

        let reached: Vec<usize> = alive.iter().copied().filter(|&c| counts[c] >= q).take(open).collect();
        if !reached.is_empty() {
            for &c in &reached {
                let keep = (counts[c] - q) / counts[c];
                for (v, h) in holder.iter().enumerate() {
                    if *h == Some(c) {
                        weights[v] *= keep;
                    }
                }
                continuing[c] = false;
                winners.push(RoundWinner { candidate: election.id(c).clone(), round });
            }
            debug!(round, elected = reached.len(), quota, "stv quota reached");
            rounds.push(StvRound {
                round,
                counts: row,
                elected: reached.iter().map(|&c| election.id(c).clone()).collect(),
                eliminated: None,
            });
            continue;
        }

        // `alive.len() > open >= 1` here.
        let low = alive[first_min_by(&alive, |&a, &b| counts[a].total_cmp(&counts[b])).unwrap_or(0)];
        continuing[low] = false;
        debug!(round, eliminated = %election.id(low), votes = counts[low], "stv elimination");
        rounds.push(StvRound {
            round,
            counts: row,
            elected: Vec::new(),
            eliminated: Some(election.id(low).clone()),
        });
    }

    StvResult { winners, rounds, quota, seats }
}
