// crates/vc_algo/src/tabulation/rrv.rs
//
// Reweighted range voting (sequential proportional score voting).
//
// Each round elects the unelected candidate with the highest weighted score
// total, then divides every ballot's weight by 1 + s / max_score, where s is
// the score that ballot gave the round's winner. Missing scores are 0; every
// score is clamped into [0, max_score] so weights stay positive and finite.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use vc_core::params::check_max_score;
use vc_core::{CandidateId, Election};
use vc_core::determinism::indices_by_desc_f64;

use crate::{RoundWinner, ScoreTally, TallyError};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RrvRound {
    pub round: u32,
    pub winner: CandidateId,
    /// Weighted totals of the candidates still unelected, descending.
    pub scores: Vec<ScoreTally>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RrvResult {
    pub winners: Vec<RoundWinner>,
    pub rounds: Vec<RrvRound>,
}

#[inline]
fn clamped(s: f64, max_score: f64) -> f64 {
    s.clamp(0.0, max_score)
}

pub fn tally_rrv(election: &Election, num_winners: usize, max_score: f64) -> Result<RrvResult, TallyError> {
    check_max_score(max_score)?;

    let n = election.candidate_count();
    if num_winners > n {
        warn!(num_winners, candidates = n, "rrv winners capped at candidate count");
    }
    let target = num_winners.min(n);

    let mut weights = vec![1.0f64; election.vote_count()];
    let mut elected = vec![false; n];
    let mut winners = Vec::with_capacity(target);
    let mut rounds = Vec::with_capacity(target);

    for r in 0..target {
        let round = r as u32 + 1;
        let mut totals = vec![0.0f64; n];
        for v in election.ballots() {
            for (c, s) in election.scores(v).iter().enumerate() {
                totals[c] += weights[v] * clamped(*s, max_score);
            }
        }

        // Elected candidates are dropped from the ranking for this round.
        let open: Vec<usize> = (0..n).filter(|&c| !elected[c]).collect();
        let open_totals: Vec<f64> = open.iter().map(|&c| totals[c]).collect();
        let order = indices_by_desc_f64(&open_totals);
        let Some(best) = order.first().map(|&k| open[k]) else {
            break;
        };
        let ranked: Vec<ScoreTally> = order
            .into_iter()
            .map(|k| ScoreTally { candidate: election.id(open[k]).clone(), score: open_totals[k] })
            .collect();

        elected[best] = true;
        for v in election.ballots() {
            weights[v] /= 1.0 + clamped(election.scores(v)[best], max_score) / max_score;
        }
        debug!(round, winner = %election.id(best), score = totals[best], "rrv round");

        winners.push(RoundWinner { candidate: election.id(best).clone(), round });
        rounds.push(RrvRound { round, winner: election.id(best).clone(), scores: ranked });
    }

    Ok(RrvResult { winners, rounds })
}

#[cfg(test)]
mod tests {
    use super::*;
    use vc_core::{Candidate, ParamError, Vote};

    fn cid(s: &str) -> CandidateId {
        s.parse().unwrap()
    }

    fn election(groups: &[(&[(&str, f64)], usize)]) -> Election {
        let cands = ["a", "b", "c"].iter().map(|s| Candidate::new(cid(s), *s)).collect();
        let mut votes = Vec::new();
        for (scores, times) in groups {
            for _ in 0..*times {
                votes.push(Vote::new("v").with_scores(scores.iter().map(|(c, s)| (cid(c), *s))));
            }
        }
        Election::new(cands, votes).unwrap()
    }

    #[test]
    fn proportional_second_seat() {
        let e = election(&[(&[("a", 10.0), ("b", 0.0)], 5), (&[("a", 0.0), ("b", 10.0)], 5)]);
        let r = tally_rrv(&e, 2, 10.0).unwrap();
        assert_eq!(r.winners[0].candidate, cid("a"));
        assert_eq!(r.winners[1].candidate, cid("b"));
        assert_eq!(r.rounds[1].scores[0].score, 50.0);
    }

    #[test]
    fn reweighting_changes_second_winner() {
        // Unweighted: a 60, b 54, c 30. After a wins, group 1 halves.
        //   b = 6 * 9 / 2 = 27, c = 3 * 10 = 30 -> c wins round 2.
        let e = election(&[(&[("a", 10.0), ("b", 9.0)], 6), (&[("c", 10.0)], 3)]);
        let r = tally_rrv(&e, 2, 10.0).unwrap();
        let ids: Vec<&str> = r.winners.iter().map(|w| w.candidate.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn out_of_range_scores_are_clamped() {
        // With max 5 the -5 counts as 0 and the 10s as 5.
        let e = election(&[
            (&[("a", -5.0), ("b", 4.0)], 1),
            (&[("a", 10.0)], 2),
        ]);
        let r = tally_rrv(&e, 2, 5.0).unwrap();
        assert_eq!(r.rounds[0].winner, cid("a"));
        assert_eq!(r.rounds[0].scores[0].score, 10.0);
        assert_eq!(r.rounds[1].winner, cid("b"));
        assert_eq!(r.rounds[1].scores[0].score, 4.0);
        assert!(r.rounds.iter().flat_map(|x| &x.scores).all(|t| t.score.is_finite()));

        let json = serde_json::to_string(&r).unwrap();
        let back: RrvResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn capped_and_validated() {
        let e = election(&[(&[("a", 1.0)], 1)]);
        assert_eq!(tally_rrv(&e, 9, 5.0).unwrap().winners.len(), 3);
        assert_eq!(
            tally_rrv(&e, 1, 0.0),
            Err(TallyError::Param(ParamError::MaxScore(0.0)))
        );
    }
}
