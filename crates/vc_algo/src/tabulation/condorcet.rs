// crates/vc_algo/src/tabulation/condorcet.rs
//
// Condorcet: the candidate beating every other head-to-head wins. Two
// entry points:
// - `tally_condorcet_raw`: matrix plus nullable winner, no fallback.
// - `tally_condorcet`: same matrix, but when no Condorcet winner exists the
//   winner is the IRV winner over the same ballots.

use serde::{Deserialize, Serialize};
use tracing::warn;

use vc_core::{CandidateId, Election};

use crate::pairwise::PairwiseMatrix;
use crate::smith::condorcet_winner;
use crate::tabulation::irv::{tally_irv, IrvResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CondorcetResolution {
    CondorcetWinner,
    IrvFallback,
    /// No candidates at all.
    NoCandidates,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CondorcetRawResult {
    pub winner: Option<CandidateId>,
    pub matrix: PairwiseMatrix,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CondorcetResult {
    pub winner: Option<CandidateId>,
    pub condorcet_winner: Option<CandidateId>,
    pub resolution: CondorcetResolution,
    pub matrix: PairwiseMatrix,
    /// Present only when the IRV fallback ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub irv: Option<IrvResult>,
}

pub fn tally_condorcet_raw(election: &Election) -> CondorcetRawResult {
    let matrix = PairwiseMatrix::build(election);
    let winner = condorcet_winner(&matrix).map(|i| election.id(i).clone());
    CondorcetRawResult { winner, matrix }
}

pub fn tally_condorcet(election: &Election) -> CondorcetResult {
    let CondorcetRawResult { winner: cw, matrix } = tally_condorcet_raw(election);

    if let Some(w) = cw {
        return CondorcetResult {
            winner: Some(w.clone()),
            condorcet_winner: Some(w),
            resolution: CondorcetResolution::CondorcetWinner,
            matrix,
            irv: None,
        };
    }
    if election.candidate_count() == 0 {
        return CondorcetResult {
            winner: None,
            condorcet_winner: None,
            resolution: CondorcetResolution::NoCandidates,
            matrix,
            irv: None,
        };
    }

    let irv = tally_irv(election);
    warn!(fallback = ?irv.winner, "no condorcet winner; resolved by irv");
    CondorcetResult {
        winner: irv.winner.clone(),
        condorcet_winner: None,
        resolution: CondorcetResolution::IrvFallback,
        matrix,
        irv: Some(irv),
    }
}
