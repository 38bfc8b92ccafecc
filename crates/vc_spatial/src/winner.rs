// crates/vc_spatial/src/winner.rs
//
// Per-method spatial winner: synthesize one ballot per voter, run the chosen
// engine through `vc_algo::run_method`, report the (first) winner. Approval
// uses the absolute-distance approval rule; every other method gets the
// relative rule. Scores are always attached so score-based engines work.

use tracing::trace;

use vc_algo::{run_method, Method};
use vc_core::{Candidate, CandidateId, Election, SpatialParams, Vote};

use crate::adapter::{
    approval_by_absolute_distance, generate_scores_from_position, generate_vote_from_position, nearest,
};
use crate::model::{validate_field, Point, SpatialCandidate};
use crate::SpatialResult;

fn ballot_for(i: usize, voter: Point, candidates: &[SpatialCandidate], method: Method, params: &SpatialParams) -> Vote {
    let mut vote = generate_vote_from_position(voter, candidates, params.approval_threshold);
    if method == Method::Approval {
        vote.approved = approval_by_absolute_distance(voter, candidates, params.approval_threshold);
    }
    vote.scores = Some(generate_scores_from_position(voter, candidates, params.max_score));
    vote.voter_name = format!("voter-{i}");
    vote
}

pub(crate) fn build_election(
    voters: &[Point],
    candidates: &[SpatialCandidate],
    method: Method,
    params: &SpatialParams,
) -> SpatialResult<Election> {
    let cands: Vec<Candidate> = candidates.iter().map(SpatialCandidate::to_candidate).collect();
    let votes = voters
        .iter()
        .enumerate()
        .map(|(i, &v)| ballot_for(i, v, candidates, method, params))
        .collect();
    Ok(Election::new(cands, votes)?)
}

/// Winner without re-validating `params` or the field.
pub(crate) fn tally_winner(
    voters: &[Point],
    candidates: &[SpatialCandidate],
    method: Method,
    params: &SpatialParams,
) -> SpatialResult<Option<CandidateId>> {
    let election = build_election(voters, candidates, method, params)?;
    let result = run_method(method, &election, &params.tally_params())?;
    trace!(%method, voters = voters.len(), winner = ?result.winner(), "spatial tally");
    Ok(result.winner())
}

/// Election synthesized from positions, as `method` would see it.
pub fn spatial_election(
    voters: &[Point],
    candidates: &[SpatialCandidate],
    method: Method,
    params: &SpatialParams,
) -> SpatialResult<Election> {
    params.validate()?;
    validate_field(candidates)?;
    build_election(voters, candidates, method, params)
}

/// Winner of `method` over a positioned electorate.
pub fn spatial_winner(
    voters: &[Point],
    candidates: &[SpatialCandidate],
    method: Method,
    params: &SpatialParams,
) -> SpatialResult<Option<CandidateId>> {
    params.validate()?;
    validate_field(candidates)?;
    tally_winner(voters, candidates, method, params)
}

/// Nearest candidate to `point` (first in field order on ties).
pub fn closest_candidate(point: Point, candidates: &[SpatialCandidate]) -> Option<&SpatialCandidate> {
    nearest(point, candidates).map(|i| &candidates[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SpatialError;

    fn cand(id: &str, x: f64, y: f64) -> SpatialCandidate {
        SpatialCandidate::new(id.parse().unwrap(), id.to_uppercase(), x, y)
    }

    fn cid(s: &str) -> CandidateId {
        s.parse().unwrap()
    }

    #[test]
    fn approval_uses_absolute_distance() {
        let field = vec![cand("a", 0.25, 0.5), cand("b", 0.75, 0.5)];
        let voters = [Point::new(0.5, 0.5)];
        let params = SpatialParams { approval_threshold: 0.125, ..SpatialParams::default() };
        let e = spatial_election(&voters, &field, Method::Approval, &params).unwrap();
        assert!(e.votes()[0].approved.is_empty());
        let e = spatial_election(&voters, &field, Method::SmithApproval, &params).unwrap();
        assert_eq!(e.votes()[0].approved.len(), 2);
        assert_eq!(e.votes()[0].voter_name, "voter-0");
    }

    #[test]
    fn clustered_electorate_elects_the_local_candidate() {
        let field = vec![cand("a", 0.25, 0.25), cand("b", 0.75, 0.75)];
        let voters = vec![Point::new(0.2, 0.3); 5];
        for &m in Method::ALL {
            assert_eq!(
                spatial_winner(&voters, &field, m, &SpatialParams::default()).unwrap(),
                Some(cid("a")),
                "{m}"
            );
        }
    }

    #[test]
    fn out_of_square_candidate_rejected() {
        let field = vec![cand("a", 1.5, 0.5)];
        assert!(matches!(
            spatial_winner(&[], &field, Method::Plurality, &SpatialParams::default()),
            Err(SpatialError::Param(_))
        ));
    }

    #[test]
    fn closest_candidate_breaks_ties_by_order() {
        let field = vec![cand("a", 0.25, 0.5), cand("b", 0.75, 0.5)];
        assert_eq!(closest_candidate(Point::new(0.5, 0.5), &field).map(|c| c.id.as_str()), Some("a"));
        assert_eq!(closest_candidate(Point::new(0.9, 0.5), &field).map(|c| c.id.as_str()), Some("b"));
        assert!(closest_candidate(Point::new(0.5, 0.5), &[]).is_none());
    }
}
