//! crates/vc_spatial/src/yee.rs
//! Yee diagrams: one local election per grid cell.
//!
//! Cell `(i, j)` is centred at `((i + 0.5) / R, (j + 0.5) / R)`; cells are
//! stored row-major (`j` outer). Voters within `sampling_radius` of the centre
//! (inclusive) form the cell's electorate. Fewer than `min_sample_voters`
//! sampled ⇒ the cell takes the candidate nearest to its centre instead.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use vc_algo::Method;
use vc_core::{CandidateId, SpatialParams};

use crate::adapter::nearest;
use crate::model::{validate_field, Point, SpatialCandidate};
use crate::winner::tally_winner;
use crate::SpatialResult;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YeeCell {
    pub x: f64,
    pub y: f64,
    pub winner: Option<CandidateId>,
    /// Voters inside the sampling radius.
    pub sampled: usize,
    /// Winner came from the nearest-candidate fallback.
    pub fallback: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YeeGrid {
    pub method: Method,
    pub resolution: usize,
    pub cells: Vec<YeeCell>,
}

impl YeeGrid {
    /// Cell at column `i`, row `j`.
    pub fn cell(&self, i: usize, j: usize) -> Option<&YeeCell> {
        if i >= self.resolution || j >= self.resolution {
            return None;
        }
        self.cells.get(j * self.resolution + i)
    }

    /// Fraction of cells won by `id`.
    pub fn winner_share(&self, id: &CandidateId) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        let won = self.cells.iter().filter(|c| c.winner.as_ref() == Some(id)).count();
        won as f64 / self.cells.len() as f64
    }

    pub fn fallback_count(&self) -> usize {
        self.cells.iter().filter(|c| c.fallback).count()
    }
}

/// Centres of an `R × R` grid, row-major.
pub fn cell_centres(resolution: usize) -> Vec<Point> {
    let r = resolution as f64;
    let mut out = Vec::with_capacity(resolution * resolution);
    for j in 0..resolution {
        for i in 0..resolution {
            out.push(Point::new((i as f64 + 0.5) / r, (j as f64 + 0.5) / r));
        }
    }
    out
}

pub(crate) fn sample_near(voters: &[Point], centre: Point, radius: f64) -> Vec<Point> {
    voters.iter().copied().filter(|v| v.distance(centre) <= radius).collect()
}

/// Yee grid for `method` over a positioned electorate.
pub fn compute_yee_grid(
    voters: &[Point],
    candidates: &[SpatialCandidate],
    method: Method,
    params: &SpatialParams,
) -> SpatialResult<YeeGrid> {
    params.validate()?;
    validate_field(candidates)?;

    let mut cells = Vec::with_capacity(params.grid_resolution * params.grid_resolution);
    for centre in cell_centres(params.grid_resolution) {
        let local = sample_near(voters, centre, params.sampling_radius);
        let fallback = local.len() < params.min_sample_voters;
        let winner = if fallback {
            nearest(centre, candidates).map(|i| candidates[i].id.clone())
        } else {
            tally_winner(&local, candidates, method, params)?
        };
        cells.push(YeeCell { x: centre.x, y: centre.y, winner, sampled: local.len(), fallback });
    }

    let grid = YeeGrid { method, resolution: params.grid_resolution, cells };
    let fallbacks = grid.fallback_count();
    if fallbacks > 0 {
        warn!(%method, fallbacks, min = params.min_sample_voters, "yee cells fell back to nearest candidate");
    }
    debug!(%method, resolution = grid.resolution, voters = voters.len(), "yee grid computed");
    Ok(grid)
}
