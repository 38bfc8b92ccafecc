//! Named head-to-head results, as shown on an election's result page.
//!
//! Works on candidate *names* rather than ids. The Smith set here uses the
//! reachability formulation: `x` is a member iff, for every `y` it cannot
//! reach through a chain of victories, `x` does not lose to `y` directly.
//! On tournaments (no tied pairs) it agrees with the component formulation
//! in [`crate::smith`]; with ties it can keep extra candidates.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use vc_core::Election;

use crate::pairwise::PairwiseMatrix;

/// Head-to-head tally for one unordered pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairwiseResult {
    pub candidate1: String,
    pub candidate2: String,
    pub votes1: u64,
    pub votes2: u64,
}

/// A strict head-to-head win. Ties never produce one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Victory {
    pub winner: String,
    pub loser: String,
    pub margin: u64,
}

/// One entry per unordered pair `(i, j)`, `i < j` in candidate order.
pub fn calculate_pairwise_results(election: &Election) -> Vec<PairwiseResult> {
    let m = PairwiseMatrix::build(election);
    let n = m.len();
    let mut out = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            out.push(PairwiseResult {
                candidate1: election.name(i).to_owned(),
                candidate2: election.name(j).to_owned(),
                votes1: m.get(i, j),
                votes2: m.get(j, i),
            });
        }
    }
    out
}

pub fn head_to_head_victories(results: &[PairwiseResult]) -> Vec<Victory> {
    results
        .iter()
        .filter_map(|r| {
            if r.votes1 > r.votes2 {
                Some(Victory {
                    winner: r.candidate1.clone(),
                    loser: r.candidate2.clone(),
                    margin: r.votes1 - r.votes2,
                })
            } else if r.votes2 > r.votes1 {
                Some(Victory {
                    winner: r.candidate2.clone(),
                    loser: r.candidate1.clone(),
                    margin: r.votes2 - r.votes1,
                })
            } else {
                None
            }
        })
        .collect()
}

/// Smith set by reachability over `victories`, restricted to `names`.
pub fn calculate_smith_set<S: AsRef<str>>(victories: &[Victory], names: &[S]) -> BTreeSet<String> {
    let names: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
    if victories.is_empty() {
        return names.iter().map(|s| (*s).to_owned()).collect();
    }

    let mut beats: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for v in victories {
        beats.entry(v.winner.as_str()).or_default().insert(v.loser.as_str());
    }
    let loses_to = |x: &str, y: &str| beats.get(y).is_some_and(|s| s.contains(x));

    let reachable_from = |start: &str| -> BTreeSet<&str> {
        let mut seen = BTreeSet::new();
        let mut stack = vec![start];
        while let Some(cur) = stack.pop() {
            if let Some(next) = beats.get(cur) {
                for &w in next {
                    if seen.insert(w) {
                        stack.push(w);
                    }
                }
            }
        }
        seen
    };

    names
        .iter()
        .filter(|&&x| {
            let reach = reachable_from(x);
            names
                .iter()
                .filter(|&&y| y != x && !reach.contains(y))
                .all(|&y| !loses_to(x, y))
        })
        .map(|s| (*s).to_owned())
        .collect()
}
