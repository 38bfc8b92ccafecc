//! crates/vc_algo/src/method.rs
//! Method registry: one enum over every tally engine, one match for dispatch.
//!
//! Wire tokens are explicit kebab-case strings; `FromStr` accepts exactly
//! those tokens (ASCII case-insensitive).

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use vc_core::{CandidateId, Election, TallyParams};

use crate::tabulation::{
    tally_approval, tally_borda, tally_condorcet, tally_cumulative, tally_irv, tally_majority_judgment,
    tally_plurality, tally_ranked_pairs, tally_rrv, tally_score, tally_smith_approval, tally_star, tally_stv,
    CondorcetResult, CumulativeResult, IrvResult, MajorityJudgmentResult, RankedPairsResult, RrvResult,
    SmithApprovalResult, StarResult, StvResult,
};
use crate::{CountResult, ScoreResult, TallyError};

/// ------------ Macro ------------

/// Enum with explicit wire tokens, an `ALL` list in declaration order, and
/// token round-tripping.
macro_rules! method_enum {
    ($name:ident => { $($variant:ident = $token:expr),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $token)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $token,)+
                }
            }
        }
    };
}

method_enum!(Method => {
    Plurality = "plurality",
    Approval = "approval",
    Borda = "borda",
    Irv = "irv",
    Condorcet = "condorcet",
    SmithApproval = "smith-approval",
    RankedPairs = "ranked-pairs",
    Stv = "stv",
    Rrv = "rrv",
    Star = "star",
    Score = "score",
    MajorityJudgment = "majority-judgment",
    Cumulative = "cumulative",
});

impl Method {
    /// Methods electing more than one candidate.
    pub const fn is_multi_winner(self) -> bool {
        matches!(self, Method::Stv | Method::Rrv | Method::Cumulative)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown voting method '{0}'")]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownMethod(s.to_owned()))
    }
}

/// ------------ Tagged result ------------

/// Result of any engine, tagged by method token under `"method"`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum MethodResult {
    #[serde(rename = "plurality")]
    Plurality(CountResult),
    #[serde(rename = "approval")]
    Approval(CountResult),
    #[serde(rename = "borda")]
    Borda(CountResult),
    #[serde(rename = "irv")]
    Irv(IrvResult),
    #[serde(rename = "condorcet")]
    Condorcet(CondorcetResult),
    #[serde(rename = "smith-approval")]
    SmithApproval(SmithApprovalResult),
    #[serde(rename = "ranked-pairs")]
    RankedPairs(RankedPairsResult),
    #[serde(rename = "stv")]
    Stv(StvResult),
    #[serde(rename = "rrv")]
    Rrv(RrvResult),
    #[serde(rename = "star")]
    Star(StarResult),
    #[serde(rename = "score")]
    Score(ScoreResult),
    #[serde(rename = "majority-judgment")]
    MajorityJudgment(MajorityJudgmentResult),
    #[serde(rename = "cumulative")]
    Cumulative(CumulativeResult),
}

impl MethodResult {
    pub fn method(&self) -> Method {
        match self {
            MethodResult::Plurality(_) => Method::Plurality,
            MethodResult::Approval(_) => Method::Approval,
            MethodResult::Borda(_) => Method::Borda,
            MethodResult::Irv(_) => Method::Irv,
            MethodResult::Condorcet(_) => Method::Condorcet,
            MethodResult::SmithApproval(_) => Method::SmithApproval,
            MethodResult::RankedPairs(_) => Method::RankedPairs,
            MethodResult::Stv(_) => Method::Stv,
            MethodResult::Rrv(_) => Method::Rrv,
            MethodResult::Star(_) => Method::Star,
            MethodResult::Score(_) => Method::Score,
            MethodResult::MajorityJudgment(_) => Method::MajorityJudgment,
            MethodResult::Cumulative(_) => Method::Cumulative,
        }
    }

    /// Elected candidates in election order (one entry for single-winner methods).
    pub fn winners(&self) -> Vec<CandidateId> {
        let single = |w: &Option<CandidateId>| -> Vec<CandidateId> { w.iter().cloned().collect() };
        match self {
            MethodResult::Plurality(r) | MethodResult::Approval(r) | MethodResult::Borda(r) => single(&r.winner),
            MethodResult::Irv(r) => single(&r.winner),
            MethodResult::Condorcet(r) => single(&r.winner),
            MethodResult::SmithApproval(r) => single(&r.winner),
            MethodResult::RankedPairs(r) => single(&r.winner),
            MethodResult::Star(r) => single(&r.winner),
            MethodResult::Score(r) => single(&r.winner),
            MethodResult::MajorityJudgment(r) => single(&r.winner),
            MethodResult::Stv(r) => r.winners.iter().map(|w| w.candidate.clone()).collect(),
            MethodResult::Rrv(r) => r.winners.iter().map(|w| w.candidate.clone()).collect(),
            MethodResult::Cumulative(r) => r.winners.clone(),
        }
    }

    /// First elected candidate, if any.
    pub fn winner(&self) -> Option<CandidateId> {
        self.winners().into_iter().next()
    }
}

/// ------------ Dispatch ------------

/// Run `method` over `election`. Parameters are validated first.
pub fn run_method(method: Method, election: &Election, params: &TallyParams) -> Result<MethodResult, TallyError> {
    params.validate()?;
    debug!(%method, candidates = election.candidate_count(), ballots = election.vote_count(), "run method");

    Ok(match method {
        Method::Plurality => MethodResult::Plurality(tally_plurality(election)),
        Method::Approval => MethodResult::Approval(tally_approval(election)),
        Method::Borda => MethodResult::Borda(tally_borda(election)),
        Method::Irv => MethodResult::Irv(tally_irv(election)),
        Method::Condorcet => MethodResult::Condorcet(tally_condorcet(election)),
        Method::SmithApproval => MethodResult::SmithApproval(tally_smith_approval(election)),
        Method::RankedPairs => MethodResult::RankedPairs(tally_ranked_pairs(election)),
        Method::Stv => MethodResult::Stv(tally_stv(election, params.seats)),
        Method::Rrv => MethodResult::Rrv(tally_rrv(election, params.num_winners, params.max_score)?),
        Method::Star => MethodResult::Star(tally_star(election)),
        Method::Score => MethodResult::Score(tally_score(election)),
        Method::MajorityJudgment => MethodResult::MajorityJudgment(tally_majority_judgment(election)),
        Method::Cumulative => MethodResult::Cumulative(tally_cumulative(election, params.seats)),
    })
}
