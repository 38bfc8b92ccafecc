//! crates/vc_spatial/src/distortion.rs
//! Distortion: how much farther voters are, on average, from the elected
//! candidate than from the best-placed one.
//!
//! `distortion = mean d(voter, winner) / min over c of mean d(voter, c)`.
//! Always ≥ 1 when defined. Undefined (`None`) for an empty electorate, an
//! unknown winner, or a zero denominator with a non-zero numerator.

use serde::{Deserialize, Serialize};
use tracing::debug;

use vc_algo::Method;
use vc_core::{CandidateId, SpatialParams};

use crate::model::{validate_field, Point, SpatialCandidate};
use crate::winner::tally_winner;
use crate::yee::{compute_yee_grid, sample_near};
use crate::SpatialResult;

fn mean_distance(voters: &[Point], at: Point) -> f64 {
    voters.iter().map(|v| v.distance(at)).sum::<f64>() / voters.len() as f64
}

/// Index and mean distance of the candidate closest to the electorate on average.
fn best_placed(voters: &[Point], candidates: &[SpatialCandidate]) -> Option<(usize, f64)> {
    let means: Vec<f64> = candidates.iter().map(|c| mean_distance(voters, c.position())).collect();
    let i = vc_core::determinism::first_min_by(&means, |a, b| a.total_cmp(b))?;
    Some((i, means[i]))
}

fn ratio(winner_mean: f64, best_mean: f64) -> Option<f64> {
    if best_mean > 0.0 {
        Some(winner_mean / best_mean)
    } else if winner_mean == 0.0 {
        Some(1.0)
    } else {
        None
    }
}

pub fn distortion(voters: &[Point], candidates: &[SpatialCandidate], winner: &CandidateId) -> Option<f64> {
    if voters.is_empty() {
        return None;
    }
    let w = candidates.iter().find(|c| &c.id == winner)?;
    let (_, best) = best_placed(voters, candidates)?;
    ratio(mean_distance(voters, w.position()), best)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistortionReport {
    pub method: Method,
    pub winner: Option<CandidateId>,
    pub winner_mean_distance: Option<f64>,
    /// Candidate with the smallest mean voter distance.
    pub best: Option<CandidateId>,
    pub best_mean_distance: Option<f64>,
    pub distortion: Option<f64>,
}

/// Elect with `method`, then measure the result against the best-placed candidate.
pub fn distortion_report(
    voters: &[Point],
    candidates: &[SpatialCandidate],
    method: Method,
    params: &SpatialParams,
) -> SpatialResult<DistortionReport> {
    params.validate()?;
    validate_field(candidates)?;

    let winner = tally_winner(voters, candidates, method, params)?;
    let best = if voters.is_empty() { None } else { best_placed(voters, candidates) };
    let winner_mean_distance = match (&winner, voters.is_empty()) {
        (Some(id), false) => candidates
            .iter()
            .find(|c| &c.id == id)
            .map(|c| mean_distance(voters, c.position())),
        _ => None,
    };
    let distortion = match (winner_mean_distance, best) {
        (Some(w), Some((_, b))) => ratio(w, b),
        _ => None,
    };

    debug!(%method, ?distortion, "distortion report");
    Ok(DistortionReport {
        method,
        winner,
        winner_mean_distance,
        best: best.map(|(i, _)| candidates[i].id.clone()),
        best_mean_distance: best.map(|(_, m)| m),
        distortion,
    })
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistortionCell {
    pub x: f64,
    pub y: f64,
    pub winner: Option<CandidateId>,
    /// Over the cell's sampled voters; `None` when nobody was sampled.
    pub distortion: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistortionMap {
    pub method: Method,
    pub resolution: usize,
    pub cells: Vec<DistortionCell>,
}

impl DistortionMap {
    /// Mean over cells where distortion is defined.
    pub fn mean_distortion(&self) -> Option<f64> {
        let defined: Vec<f64> = self.cells.iter().filter_map(|c| c.distortion).collect();
        (!defined.is_empty()).then(|| defined.iter().sum::<f64>() / defined.len() as f64)
    }

    pub fn max_distortion(&self) -> Option<f64> {
        self.cells.iter().filter_map(|c| c.distortion).reduce(f64::max)
    }
}

/// Yee grid, then distortion of each cell's winner on that cell's local electorate.
pub fn distortion_map(
    voters: &[Point],
    candidates: &[SpatialCandidate],
    method: Method,
    params: &SpatialParams,
) -> SpatialResult<DistortionMap> {
    let grid = compute_yee_grid(voters, candidates, method, params)?;
    let cells = grid
        .cells
        .into_iter()
        .map(|cell| {
            let local = sample_near(voters, Point::new(cell.x, cell.y), params.sampling_radius);
            let distortion = cell.winner.as_ref().and_then(|w| distortion(&local, candidates, w));
            DistortionCell { x: cell.x, y: cell.y, winner: cell.winner, distortion }
        })
        .collect();
    Ok(DistortionMap { method, resolution: grid.resolution, cells })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voters::lattice_voters;

    fn cand(id: &str, x: f64, y: f64) -> SpatialCandidate {
        SpatialCandidate::new(id.parse().unwrap(), id.to_uppercase(), x, y)
    }

    fn cid(s: &str) -> CandidateId {
        s.parse().unwrap()
    }

    #[test]
    fn best_placed_winner_has_unit_distortion() {
        let field = vec![cand("a", 0.5, 0.5), cand("b", 1.0, 0.5)];
        let voters = vec![Point::new(0.25, 0.5), Point::new(0.75, 0.5)];
        // a: mean 0.25; b: mean 0.5.
        assert_eq!(distortion(&voters, &field, &cid("a")), Some(1.0));
        assert_eq!(distortion(&voters, &field, &cid("b")), Some(2.0));
        assert_eq!(distortion(&voters, &field, &cid("z")), None);
        assert_eq!(distortion(&[], &field, &cid("a")), None);
    }

    #[test]
    fn zero_denominator() {
        let field = vec![cand("a", 0.5, 0.5), cand("b", 1.0, 0.5)];
        let voters = vec![Point::new(0.5, 0.5)];
        assert_eq!(distortion(&voters, &field, &cid("a")), Some(1.0));
        assert_eq!(distortion(&voters, &field, &cid("b")), None);
    }

    #[test]
    fn report_for_a_plurality_split() {
        // a is central but squeezed out of first preferences.
        let field = vec![cand("l", 0.0, 0.5), cand("a", 0.5, 0.5), cand("r", 1.0, 0.5)];
        let mut voters = vec![Point::new(0.125, 0.5); 4];
        voters.extend(vec![Point::new(0.875, 0.5); 3]);
        voters.extend(vec![Point::new(0.5, 0.5); 2]);
        let r = distortion_report(&voters, &field, Method::Plurality, &SpatialParams::default()).unwrap();
        assert_eq!(r.winner, Some(cid("l")));
        assert_eq!(r.best, Some(cid("a")));
        assert!(r.distortion.unwrap() > 1.0);

        let c = distortion_report(&voters, &field, Method::Condorcet, &SpatialParams::default()).unwrap();
        assert_eq!(c.winner, Some(cid("a")));
        assert_eq!(c.distortion, Some(1.0));
    }

    #[test]
    fn map_is_defined_where_voters_were_sampled() {
        let field = vec![cand("a", 0.25, 0.5), cand("b", 0.75, 0.5)];
        let params = SpatialParams { grid_resolution: 4, ..SpatialParams::default() };
        let dense = distortion_map(&lattice_voters(40), &field, Method::Plurality, &params).unwrap();
        assert_eq!(dense.cells.len(), 16);
        assert!(dense.cells.iter().all(|c| c.distortion.is_some_and(|d| d >= 1.0)));
        assert!(dense.max_distortion().unwrap() >= dense.mean_distortion().unwrap());

        let empty = distortion_map(&[], &field, Method::Plurality, &params).unwrap();
        assert!(empty.cells.iter().all(|c| c.distortion.is_none()));
        assert_eq!(empty.mean_distortion(), None);
    }
}
