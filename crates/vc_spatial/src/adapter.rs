//! crates/vc_spatial/src/adapter.rs
//! Distance-derived ballots.
//!
//! Rankings are ascending Euclidean distance; equal distances keep candidate
//! order. Two approval rules coexist and are deliberately separate:
//! - [`generate_vote_from_position`] approves candidates within the threshold
//!   of the voter's *closest* candidate distance (relative);
//! - [`approval_by_absolute_distance`] approves candidates within the
//!   threshold of the voter's own position (absolute).

use std::collections::{BTreeMap, BTreeSet};

use vc_core::{CandidateId, Vote};

use crate::model::{Point, SpatialCandidate};

pub(crate) fn distances(voter: Point, candidates: &[SpatialCandidate]) -> Vec<f64> {
    candidates.iter().map(|c| voter.distance(c.position())).collect()
}

/// Candidate indices, nearest first.
pub(crate) fn order_by_distance(d: &[f64]) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..d.len()).collect();
    idx.sort_by(|&a, &b| d[a].total_cmp(&d[b]));
    idx
}

/// Index of the nearest candidate (first on ties).
pub(crate) fn nearest(voter: Point, candidates: &[SpatialCandidate]) -> Option<usize> {
    let d = distances(voter, candidates);
    vc_core::determinism::first_min_by(&d, |a, b| a.total_cmp(b))
}

/// Ranking by distance plus the relative approval set. `voterName` is empty.
pub fn generate_vote_from_position(voter: Point, candidates: &[SpatialCandidate], approval_threshold: f64) -> Vote {
    let d = distances(voter, candidates);
    let order = order_by_distance(&d);
    let closest = order.first().map_or(0.0, |&i| d[i]);

    let approved: BTreeSet<CandidateId> = order
        .iter()
        .filter(|&&i| d[i] - closest <= approval_threshold)
        .map(|&i| candidates[i].id.clone())
        .collect();

    Vote::default()
        .with_ranking(order.iter().map(|&i| candidates[i].id.clone()))
        .with_approved(approved)
}

/// Candidates no farther than `threshold` from the voter.
pub fn approval_by_absolute_distance(
    voter: Point,
    candidates: &[SpatialCandidate],
    threshold: f64,
) -> BTreeSet<CandidateId> {
    candidates
        .iter()
        .filter(|c| voter.distance(c.position()) <= threshold)
        .map(|c| c.id.clone())
        .collect()
}

/// Integer scores linear in distance: `max_score` for the nearest candidate,
/// 0 for the farthest. All equidistant ⇒ everyone gets `max_score`.
pub fn generate_scores_from_position(
    voter: Point,
    candidates: &[SpatialCandidate],
    max_score: f64,
) -> BTreeMap<CandidateId, f64> {
    let d = distances(voter, candidates);
    let lo = d.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = d.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = hi - lo;

    candidates
        .iter()
        .zip(&d)
        .map(|(c, &di)| {
            let s = if span > 0.0 { (max_score * (hi - di) / span).round() } else { max_score };
            (c.id.clone(), s)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cand(id: &str, x: f64, y: f64) -> SpatialCandidate {
        SpatialCandidate::new(id.parse().unwrap(), id.to_uppercase(), x, y)
    }

    fn ids(v: &[CandidateId]) -> Vec<&str> {
        v.iter().map(CandidateId::as_str).collect()
    }

    fn field() -> Vec<SpatialCandidate> {
        vec![cand("a", 0.2, 0.5), cand("b", 0.5, 0.5), cand("c", 0.9, 0.5)]
    }

    #[test]
    fn ranking_is_ascending_distance() {
        let v = generate_vote_from_position(Point::new(0.45, 0.5), &field(), 0.0);
        assert_eq!(ids(&v.ranking), vec!["b", "a", "c"]);
        assert_eq!(v.approved.len(), 1);
        assert!(v.scores.is_none());
    }

    #[test]
    fn equal_distances_keep_candidate_order() {
        let f = vec![cand("a", 0.25, 0.5), cand("b", 0.75, 0.5), cand("c", 0.5, 0.0)];
        let v = generate_vote_from_position(Point::new(0.5, 0.5), &f, 0.0);
        assert_eq!(ids(&v.ranking), vec!["a", "b", "c"]);
        // Both a and b sit at the closest distance.
        assert_eq!(v.approved.len(), 2);
    }

    #[test]
    fn relative_and_absolute_approval_differ() {
        // Voter far from everyone: nearest is b at 0.4.
        let voter = Point::new(0.5, 0.9);
        let rel = generate_vote_from_position(voter, &field(), 0.05);
        assert_eq!(rel.approved.iter().map(CandidateId::as_str).collect::<Vec<_>>(), vec!["b"]);
        assert!(approval_by_absolute_distance(voter, &field(), 0.1).is_empty());
        assert_eq!(approval_by_absolute_distance(voter, &field(), 0.45).len(), 1);
    }

    #[test]
    fn scores_are_linear_and_rounded() {
        let s = generate_scores_from_position(Point::new(0.2, 0.5), &field(), 5.0);
        // distances 0.0, 0.3, 0.7
        assert_eq!(s[&"a".parse::<CandidateId>().unwrap()], 5.0);
        assert_eq!(s[&"b".parse::<CandidateId>().unwrap()], 3.0);
        assert_eq!(s[&"c".parse::<CandidateId>().unwrap()], 0.0);
    }

    #[test]
    fn equidistant_field_gets_max_score() {
        let f = vec![cand("a", 0.4, 0.5), cand("b", 0.6, 0.5)];
        let s = generate_scores_from_position(Point::new(0.5, 0.5), &f, 10.0);
        assert!(s.values().all(|&v| v == 10.0));
    }

    #[test]
    fn empty_field() {
        let v = generate_vote_from_position(Point::new(0.5, 0.5), &[], 0.1);
        assert!(v.ranking.is_empty() && v.approved.is_empty());
        assert!(generate_scores_from_position(Point::new(0.5, 0.5), &[], 5.0).is_empty());
        assert_eq!(nearest(Point::new(0.5, 0.5), &[]), None);
    }
}
