//! Shared fixtures for the vc_algo integration tests.

#![allow(dead_code)]

use proptest::prelude::*;
use vc_core::{Candidate, CandidateId, Election, Vote};

pub fn cid(s: &str) -> CandidateId {
    s.parse().unwrap()
}

/// Candidates "1".."n" named "C1".."Cn".
pub fn numbered(n: usize) -> Vec<Candidate> {
    (1..=n).map(|i| Candidate::new(cid(&i.to_string()), format!("C{i}"))).collect()
}

pub fn ranked(voter: &str, ranking: &[&str]) -> Vote {
    Vote::new(voter).with_ranking(ranking.iter().map(|s| cid(s)))
}

pub fn ranked_election(n: usize, rankings: &[&[&str]]) -> Election {
    let votes = rankings
        .iter()
        .enumerate()
        .map(|(k, r)| ranked(&format!("v{k}"), r))
        .collect();
    Election::new(numbered(n), votes).unwrap()
}

/// Raw ballot over `n` numbered candidates: shuffled order, ranked prefix
/// length, approval flags, integer scores 0..=5.
pub type RawBallot = (Vec<usize>, usize, Vec<bool>, Vec<u8>);

pub fn raw_ballot(n: usize) -> impl Strategy<Value = RawBallot> {
    (
        Just((0..n).collect::<Vec<usize>>()).prop_shuffle(),
        0..=n,
        proptest::collection::vec(any::<bool>(), n),
        proptest::collection::vec(0u8..=5, n),
    )
}

pub fn to_vote(k: usize, b: &RawBallot) -> Vote {
    let (order, len, approve, scores) = b;
    let id = |i: usize| cid(&(i + 1).to_string());
    Vote::new(format!("v{k}"))
        .with_ranking(order.iter().take(*len).map(|&i| id(i)))
        .with_approved((0..order.len()).filter(|&i| approve[i]).map(id))
        .with_scores((0..order.len()).map(|i| (id(i), f64::from(scores[i]))))
}

pub fn build(n: usize, ballots: &[RawBallot]) -> Election {
    let votes = ballots.iter().enumerate().map(|(k, b)| to_vote(k, b)).collect();
    Election::new(numbered(n), votes).unwrap()
}

/// Elections with 1..=max_candidates candidates and up to 15 ballots.
pub fn election(max_candidates: usize) -> impl Strategy<Value = Election> {
    (1..=max_candidates)
        .prop_flat_map(|n| (Just(n), proptest::collection::vec(raw_ballot(n), 0..15)))
        .prop_map(|(n, ballots)| build(n, &ballots))
}

/// Two independent ballot sets over the same candidates.
pub fn split_electorate(max_candidates: usize) -> impl Strategy<Value = (usize, Vec<RawBallot>, Vec<RawBallot>)> {
    (1..=max_candidates).prop_flat_map(|n| {
        (
            Just(n),
            proptest::collection::vec(raw_ballot(n), 0..10),
            proptest::collection::vec(raw_ballot(n), 0..10),
        )
    })
}
