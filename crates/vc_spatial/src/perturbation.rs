// crates/vc_spatial/src/perturbation.rs
//
// Perturbation map for one target candidate.
//
// Persuadable voters are those whose nearest candidate is not the target,
// ordered by distance to the target (nearest first, stable). Cell (i, j) of an
// R × R grid shifts the first round(fraction · P) persuadable voters a
// `shift` share of the way toward the target, with
//   fraction = i / (R - 1),  shift = j / (R - 1)   (both 0 when R = 1),
// then reruns the method over the whole electorate. Cells are row-major.

use serde::{Deserialize, Serialize};
use tracing::debug;

use vc_algo::Method;
use vc_core::{CandidateId, SpatialParams};

use crate::adapter::nearest;
use crate::model::{validate_field, Point, SpatialCandidate};
use crate::winner::tally_winner;
use crate::{SpatialError, SpatialResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerturbationCell {
    /// Share of persuadable voters moved (x axis).
    pub fraction: f64,
    /// How far they moved toward the target (y axis); 1 = onto the target.
    pub shift: f64,
    pub shifted: usize,
    pub winner: Option<CandidateId>,
    pub target_wins: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerturbationMap {
    pub target: CandidateId,
    pub method: Method,
    pub resolution: usize,
    pub persuadable: usize,
    pub baseline_winner: Option<CandidateId>,
    pub cells: Vec<PerturbationCell>,
}

impl PerturbationMap {
    pub fn cell(&self, i: usize, j: usize) -> Option<&PerturbationCell> {
        if i >= self.resolution || j >= self.resolution {
            return None;
        }
        self.cells.get(j * self.resolution + i)
    }

    /// Cheapest cell (fewest voters moved, then smallest shift) where the target wins.
    pub fn minimal_win(&self) -> Option<&PerturbationCell> {
        self.cells
            .iter()
            .filter(|c| c.target_wins)
            .min_by(|a, b| a.shifted.cmp(&b.shifted).then(a.shift.total_cmp(&b.shift)))
    }
}

fn axis(k: usize, resolution: usize) -> f64 {
    if resolution <= 1 { 0.0 } else { k as f64 / (resolution - 1) as f64 }
}

/// Persuadable voter indices, nearest to `target` first.
pub(crate) fn persuadable_order(voters: &[Point], candidates: &[SpatialCandidate], target: usize) -> Vec<usize> {
    let goal = candidates[target].position();
    let mut idx: Vec<usize> = (0..voters.len())
        .filter(|&v| nearest(voters[v], candidates) != Some(target))
        .collect();
    idx.sort_by(|&a, &b| voters[a].distance(goal).total_cmp(&voters[b].distance(goal)));
    idx
}

pub fn compute_perturbation_map(
    voters: &[Point],
    candidates: &[SpatialCandidate],
    target: &CandidateId,
    method: Method,
    params: &SpatialParams,
) -> SpatialResult<PerturbationMap> {
    params.validate()?;
    validate_field(candidates)?;
    let t = candidates
        .iter()
        .position(|c| &c.id == target)
        .ok_or_else(|| SpatialError::UnknownTarget(target.clone()))?;

    let goal = candidates[t].position();
    let order = persuadable_order(voters, candidates, t);
    let r = params.grid_resolution;
    let baseline_winner = tally_winner(voters, candidates, method, params)?;

    let mut cells = Vec::with_capacity(r * r);
    let mut moved = voters.to_vec();
    for j in 0..r {
        let shift = axis(j, r);
        for i in 0..r {
            let fraction = axis(i, r);
            let k = ((fraction * order.len() as f64).round() as usize).min(order.len());

            moved.copy_from_slice(voters);
            for &v in &order[..k] {
                moved[v] = voters[v].lerp(goal, shift);
            }
            let winner = tally_winner(&moved, candidates, method, params)?;
            let target_wins = winner.as_ref() == Some(target);
            cells.push(PerturbationCell { fraction, shift, shifted: k, winner, target_wins });
        }
    }

    debug!(%method, %target, persuadable = order.len(), resolution = r, "perturbation map computed");
    Ok(PerturbationMap {
        target: target.clone(),
        method,
        resolution: r,
        persuadable: order.len(),
        baseline_winner,
        cells,
    })
}
