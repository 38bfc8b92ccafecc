// crates/vc_spatial/src/voters.rs
//
// Synthetic electorates. A voter is just a `Point`; blocs are generator specs
// drawn through the seedable `VoterRng` and clamped into the unit square.

use serde::{Deserialize, Serialize};
use tracing::debug;

use vc_core::params::check_unit_range;
use vc_core::{ParamError, VoterRng};

use crate::model::Point;

/// A voter's ideological position.
pub type Voter = Point;

/// `count` voters normally distributed around `position` with standard deviation `spread`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoterBloc {
    pub position: Point,
    pub count: usize,
    pub spread: f64,
}

impl VoterBloc {
    pub fn validate(&self) -> Result<(), ParamError> {
        check_unit_range("bloc x", self.position.x, 0.0, 1.0)?;
        check_unit_range("bloc y", self.position.y, 0.0, 1.0)?;
        check_unit_range("bloc spread", self.spread, 0.0, f64::MAX)
    }

    fn draw(&self, rng: &mut VoterRng, out: &mut Vec<Voter>) {
        for _ in 0..self.count {
            let x = rng.next_normal(self.position.x, self.spread);
            let y = rng.next_normal(self.position.y, self.spread);
            out.push(Point::new(x, y).clamp_unit());
        }
    }
}

/// Expand every bloc in order. Same seed and blocs, same electorate.
pub fn generate_bloc_voters(blocs: &[VoterBloc], rng: &mut VoterRng) -> Result<Vec<Voter>, ParamError> {
    blocs.iter().try_for_each(VoterBloc::validate)?;
    let total: usize = blocs.iter().map(|b| b.count).sum();
    let mut out = Vec::with_capacity(total);
    for b in blocs {
        b.draw(rng, &mut out);
    }
    debug!(blocs = blocs.len(), voters = out.len(), "bloc electorate generated");
    Ok(out)
}

/// `count` voters uniform over the unit square.
pub fn generate_uniform_voters(count: usize, rng: &mut VoterRng) -> Vec<Voter> {
    (0..count).map(|_| Point::new(rng.next_f64(), rng.next_f64())).collect()
}

/// `per_axis²` voters on an evenly spaced lattice of cell centres, row-major.
pub fn lattice_voters(per_axis: usize) -> Vec<Voter> {
    let step = 1.0 / per_axis as f64;
    let mut out = Vec::with_capacity(per_axis * per_axis);
    for j in 0..per_axis {
        for i in 0..per_axis {
            out.push(Point::new((i as f64 + 0.5) * step, (j as f64 + 0.5) * step));
        }
    }
    out
}
