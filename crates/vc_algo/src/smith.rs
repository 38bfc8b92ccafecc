// crates/vc_algo/src/smith.rs
//
// Condorcet winner and Smith set over a pairwise matrix.
//
// The "defeats" graph has an edge a -> b iff a beats b head-to-head; ties add
// no edge. Components come from a two-pass (Kosaraju) DFS: finish order on the
// forward graph, then componentization on the reversed graph in reverse
// finish order. The Smith set is the union of every component that no
// outside candidate defeats (the source components of the condensation).
// With zero victories every candidate is its own unbeaten component, so the
// whole field is returned.

use tracing::debug;

use crate::pairwise::PairwiseMatrix;

/// Index of the candidate beating every other candidate, if one exists.
/// A lone candidate wins vacuously; an empty field has no winner.
pub fn condorcet_winner(m: &PairwiseMatrix) -> Option<usize> {
    let n = m.len();
    (0..n).find(|&c| (0..n).all(|d| d == c || m.beats(c, d)))
}

/// Strongly connected components of the defeats graph, in the order the
/// second DFS pass discovers them. Members of each component are ascending.
pub fn defeat_components(m: &PairwiseMatrix) -> Vec<Vec<usize>> {
    let n = m.len();

    // ---- pass 1: finish order on the forward graph ----
    let mut visited = vec![false; n];
    let mut finish = Vec::with_capacity(n);
    for start in 0..n {
        if !visited[start] {
            finish_order(m, start, &mut visited, &mut finish);
        }
    }

    // ---- pass 2: reverse graph, latest finisher first ----
    let mut assigned = vec![false; n];
    let mut components = Vec::new();
    for &root in finish.iter().rev() {
        if assigned[root] {
            continue;
        }
        let mut comp = Vec::new();
        collect_reverse(m, root, &mut assigned, &mut comp);
        comp.sort_unstable();
        components.push(comp);
    }
    components
}

fn finish_order(m: &PairwiseMatrix, v: usize, visited: &mut [bool], out: &mut Vec<usize>) {
    visited[v] = true;
    for w in 0..m.len() {
        if w != v && !visited[w] && m.beats(v, w) {
            finish_order(m, w, visited, out);
        }
    }
    out.push(v);
}

fn collect_reverse(m: &PairwiseMatrix, v: usize, assigned: &mut [bool], comp: &mut Vec<usize>) {
    assigned[v] = true;
    comp.push(v);
    for w in 0..m.len() {
        // reversed edge v <- w
        if w != v && !assigned[w] && m.beats(w, v) {
            collect_reverse(m, w, assigned, comp);
        }
    }
}

/// Smith set as ascending candidate indices. Empty only for an empty field.
pub fn smith_set(m: &PairwiseMatrix) -> Vec<usize> {
    let n = m.len();
    if m.has_no_victories() {
        return (0..n).collect();
    }

    let components = defeat_components(m);
    let mut members: Vec<usize> = Vec::new();
    for comp in &components {
        let unbeaten = (0..n)
            .filter(|o| !comp.contains(o))
            .all(|o| comp.iter().all(|&c| !m.beats(o, c)));
        if unbeaten {
            members.extend_from_slice(comp);
        }
    }
    members.sort_unstable();
    debug!(components = components.len(), size = members.len(), "smith set resolved");
    members
}

#[cfg(test)]
mod tests {
    use super::*;
    use vc_core::{Candidate, CandidateId, Election, Vote};

    fn cid(s: &str) -> CandidateId {
        s.parse().unwrap()
    }

    fn matrix(n: usize, rankings: &[&[&str]]) -> PairwiseMatrix {
        let cands = (1..=n).map(|i| Candidate::new(cid(&i.to_string()), format!("C{i}"))).collect();
        let votes = rankings
            .iter()
            .map(|r| Vote::new("v").with_ranking(r.iter().map(|s| cid(s))))
            .collect();
        PairwiseMatrix::build(&Election::new(cands, votes).unwrap())
    }

    #[test]
    fn clear_winner_is_singleton() {
        let m = matrix(3, &[&["1", "2", "3"], &["1", "2", "3"], &["2", "3", "1"], &["3", "1", "2"]]);
        assert_eq!(condorcet_winner(&m), None);
        assert_eq!(smith_set(&m), vec![0]);
    }

    #[test]
    fn cycle_takes_everyone() {
        let m = matrix(3, &[&["1", "2", "3"], &["2", "3", "1"], &["3", "1", "2"]]);
        assert_eq!(defeat_components(&m), vec![vec![0, 1, 2]]);
        assert_eq!(smith_set(&m), vec![0, 1, 2]);
    }

    #[test]
    fn full_tie_takes_everyone() {
        let m = matrix(2, &[&["1", "2"], &["2", "1"]]);
        assert!(m.has_no_victories());
        assert_eq!(smith_set(&m), vec![0, 1]);
        assert_eq!(condorcet_winner(&m), None);
    }

    #[test]
    fn condorcet_winner_found() {
        let m = matrix(3, &[&["2", "1", "3"], &["2", "3", "1"], &["1", "2", "3"]]);
        assert_eq!(condorcet_winner(&m), Some(1));
        assert_eq!(smith_set(&m), vec![1]);
    }

    #[test]
    fn tied_top_pair_above_a_loser() {
        // 1 ~ 2 tie, both beat 3.
        let m = matrix(3, &[&["1", "2", "3"], &["2", "1", "3"]]);
        assert_eq!(smith_set(&m), vec![0, 1]);
    }

    #[test]
    fn degenerate_fields() {
        let empty = matrix(0, &[]);
        assert!(smith_set(&empty).is_empty());
        assert_eq!(condorcet_winner(&empty), None);

        let one = matrix(1, &[]);
        assert_eq!(smith_set(&one), vec![0]);
        assert_eq!(condorcet_winner(&one), Some(0));
    }
}
