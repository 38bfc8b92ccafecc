// crates/vc_algo/src/tabulation/smith_approval.rs
//
// Smith set + Approval: restrict the field to the Smith set, then rank it by
// approval through the tie-break waterfall (approval, direct matchup, net
// head-to-head, average margin). The waterfall's first entry is the winner.

use serde::{Deserialize, Serialize};
use tracing::debug;

use vc_core::{CandidateId, Election};

use crate::pairwise::PairwiseMatrix;
use crate::smith::smith_set;
use crate::tabulation::approval::tally_approval_within;
use crate::tiebreak::{select_winner, WinnerSelection};
use crate::Tally;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmithApprovalResult {
    pub winner: Option<CandidateId>,
    /// Smith set members in candidate order.
    pub smith_set: Vec<CandidateId>,
    /// Approval counts within the Smith set, descending.
    pub approvals: Vec<Tally>,
    pub selection: WinnerSelection,
}

pub fn tally_smith_approval(election: &Election) -> SmithApprovalResult {
    let matrix = PairwiseMatrix::build(election);
    let members = smith_set(&matrix);
    let approvals = tally_approval_within(election, &members).counts;
    let selection = select_winner(election, &members, &matrix);

    debug!(smith = members.len(), winner = ?selection.winner, "smith + approval tallied");
    SmithApprovalResult {
        winner: selection.winner.clone(),
        smith_set: members.iter().map(|&i| election.id(i).clone()).collect(),
        approvals,
        selection,
    }
}
