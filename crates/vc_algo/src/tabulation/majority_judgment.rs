// crates/vc_algo/src/tabulation/majority_judgment.rs
//
// Majority Judgment over integer grades 0..=5.
//
// Each ballot grades every candidate: score rounded to the nearest integer
// and clamped into 0..=5, missing scores grade 0. Candidates are ordered by
// comparing their (lower) median grades; on equal medians the median element
// is removed from both grade lists and the comparison repeats, until the
// medians differ or the lists are exhausted. Exhausted-equal candidates keep
// candidate order.
//
// Removal is an index window over the sorted grades rather than a copied
// list: removed elements always form one contiguous block [lo, hi).

use core::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use vc_core::{CandidateId, Election};

pub const MAX_GRADE: u8 = 5;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateGrades {
    pub candidate: CandidateId,
    /// Lower median; `None` with no ballots.
    pub median: Option<u8>,
    /// `grade_counts[g]` = ballots giving grade `g`.
    pub grade_counts: [u64; 6],
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MajorityJudgmentResult {
    pub winner: Option<CandidateId>,
    /// Best first.
    pub ranking: Vec<CandidateGrades>,
}

#[inline]
fn grade_of(score: f64) -> u8 {
    score.round().clamp(0.0, f64::from(MAX_GRADE)) as u8
}

/// Sorted grades with a shrinking view of what is left.
#[derive(Clone, Copy)]
struct GradeWindow<'a> {
    grades: &'a [u8],
    lo: usize,
    hi: usize,
}

impl<'a> GradeWindow<'a> {
    fn new(grades: &'a [u8]) -> Self {
        let mid = grades.len() / 2;
        Self { grades, lo: mid, hi: mid }
    }

    #[inline]
    fn right(&self) -> usize {
        self.grades.len() - self.hi
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.lo == 0 && self.right() == 0
    }

    /// Lower median of the remaining grades.
    fn median(&self) -> Option<u8> {
        if self.is_empty() {
            None
        } else if self.right() == self.lo {
            Some(self.grades[self.lo - 1])
        } else {
            Some(self.grades[self.hi])
        }
    }

    fn pop_median(&mut self) {
        if self.is_empty() {
            return;
        }
        if self.right() == self.lo {
            self.lo -= 1;
        } else {
            self.hi += 1;
        }
    }
}

/// `Greater` ⇒ `a` ranks above `b`.
fn compare_grades(a: &[u8], b: &[u8]) -> Ordering {
    let (mut wa, mut wb) = (GradeWindow::new(a), GradeWindow::new(b));
    loop {
        match (wa.median(), wb.median()) {
            (None, None) => return Ordering::Equal,
            (Some(_), None) => return Ordering::Greater,
            (None, Some(_)) => return Ordering::Less,
            (Some(x), Some(y)) if x != y => return x.cmp(&y),
            _ => {
                wa.pop_median();
                wb.pop_median();
            }
        }
    }
}

pub fn tally_majority_judgment(election: &Election) -> MajorityJudgmentResult {
    let n = election.candidate_count();
    let mut grades: Vec<Vec<u8>> = vec![Vec::with_capacity(election.vote_count()); n];
    for v in election.ballots() {
        for (c, &s) in election.scores(v).iter().enumerate() {
            grades[c].push(grade_of(s));
        }
    }
    grades.iter_mut().for_each(|g| g.sort_unstable());

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| compare_grades(&grades[b], &grades[a]));

    let ranking: Vec<CandidateGrades> = order
        .iter()
        .map(|&c| {
            let mut grade_counts = [0u64; 6];
            for &g in &grades[c] {
                grade_counts[usize::from(g)] += 1;
            }
            CandidateGrades {
                candidate: election.id(c).clone(),
                median: GradeWindow::new(&grades[c]).median(),
                grade_counts,
            }
        })
        .collect();

    let winner = ranking.first().map(|g| g.candidate.clone());
    debug!(ballots = election.vote_count(), winner = ?winner, "majority judgment tallied");
    MajorityJudgmentResult { winner, ranking }
}
