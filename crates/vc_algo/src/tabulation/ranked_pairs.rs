// crates/vc_algo/src/tabulation/ranked_pairs.rs
//
// Ranked Pairs (Tideman).
//
// Every ordered pair with a strict winner becomes a candidate edge
// winner -> loser weighted by its margin. Edges are enumerated row-major in
// candidate order and stable-sorted by margin, descending. Each edge is locked
// unless the loser already reaches the winner through locked edges (which
// would close a cycle). The winner is the first candidate, in candidate
// order, with no incoming locked edge.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use vc_core::{CandidateId, Election};

use crate::pairwise::PairwiseMatrix;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedPair {
    pub winner: CandidateId,
    pub loser: CandidateId,
    pub margin: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedPairsResult {
    pub winner: Option<CandidateId>,
    pub matrix: PairwiseMatrix,
    /// Locked edges, in locking order.
    pub locked: Vec<RankedPair>,
    /// Edges rejected because they would close a cycle.
    pub skipped: Vec<RankedPair>,
}

/// Depth-first reachability over the locked adjacency matrix.
fn reaches(locked: &[Vec<bool>], from: usize, to: usize) -> bool {
    let mut seen = vec![false; locked.len()];
    let mut stack = vec![from];
    while let Some(v) = stack.pop() {
        if v == to {
            return true;
        }
        if std::mem::replace(&mut seen[v], true) {
            continue;
        }
        stack.extend((0..locked.len()).filter(|&w| locked[v][w] && !seen[w]));
    }
    false
}

pub fn tally_ranked_pairs(election: &Election) -> RankedPairsResult {
    let matrix = PairwiseMatrix::build(election);
    let n = matrix.len();

    let mut edges: Vec<(usize, usize, u64)> = Vec::new();
    for i in 0..n {
        for j in 0..n {
            if i != j && matrix.beats(i, j) {
                edges.push((i, j, matrix.get(i, j) - matrix.get(j, i)));
            }
        }
    }
    edges.sort_by(|a, b| b.2.cmp(&a.2));

    let mut graph = vec![vec![false; n]; n];
    let mut locked = Vec::new();
    let mut skipped = Vec::new();
    for (w, l, margin) in edges {
        let pair = RankedPair { winner: election.id(w).clone(), loser: election.id(l).clone(), margin };
        if reaches(&graph, l, w) {
            trace!(winner = %pair.winner, loser = %pair.loser, margin, "pair skipped (cycle)");
            skipped.push(pair);
        } else {
            graph[w][l] = true;
            locked.push(pair);
        }
    }

    let winner = (0..n)
        .find(|&c| (0..n).all(|o| !graph[o][c]))
        .map(|c| election.id(c).clone());
    debug!(locked = locked.len(), skipped = skipped.len(), winner = ?winner, "ranked pairs tallied");
    RankedPairsResult { winner, matrix, locked, skipped }
}
