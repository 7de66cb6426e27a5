use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Clause, Symbol};

mod oracle;
mod proof;
mod resolver;
mod scheduler;
mod search;
mod trace;

pub use oracle::{is_resolvable, resolvable_props};
pub use proof::{build_from, build_proof_tree, ProofTree};
pub use resolver::resolve;
pub use scheduler::{Candidate, Scheduler};
pub use search::{Prover, SearchState};
pub use trace::{Fate, ResolventRecord, Step, TraceSink};

/// How candidates of equal cost are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TieBreak {
    /// Lexicographically by the ids of the pair.
    Ids,
    /// First scheduled, first served.
    Insertion,
}

impl Default for TieBreak {
    fn default() -> Self {
        Self::Ids
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TieBreak::Ids => write!(f, "IDS"),
            TieBreak::Insertion => write!(f, "INSERTION"),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct Params {
    pub tie_break: TieBreak,
}

#[derive(Debug)]
pub enum ResolutionErr {
    InvalidClauseId(usize),
    NotResolvableOn(Clause, Clause, Symbol),
}

impl fmt::Display for ResolutionErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionErr::InvalidClauseId(c) => write!(f, "There is no clause with id {c}"),
            ResolutionErr::NotResolvableOn(c1, c2, l) => write!(
                f,
                "Clauses '{c1}' and '{c2}' do not contain '{l}' in both positive and negated form"
            ),
        }
    }
}

impl std::error::Error for ResolutionErr {}

pub type ResolutionResult<T> = Result<T, ResolutionErr>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub iterations: usize,
    pub max_queue_size: usize,
    /// Clauses in the store when the search ended.
    pub clauses: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Refutation {
    /// The derived empty clause.
    pub witness: Clause,
    pub proof: ProofTree,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE", tag = "result")]
pub enum Outcome {
    Refuted(Refutation),
    Exhausted,
}

impl Outcome {
    pub fn is_refuted(&self) -> bool {
        matches!(self, Outcome::Refuted(_))
    }

    pub fn refutation(&self) -> Option<&Refutation> {
        match self {
            Outcome::Refuted(r) => Some(r),
            Outcome::Exhausted => None,
        }
    }
}

/// Everything a finished search has to say: the outcome, its statistics and
/// optionally the recorded iterations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub outcome: Outcome,
    pub summary: Summary,
    pub trace: Vec<Step>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_clause_set;
    use crate::session;

    mod params {
        use super::*;

        #[test]
        fn defaults() {
            let p: Params = serde_json::from_str("{}").unwrap();
            assert_eq!(TieBreak::Ids, p.tie_break);
        }

        #[test]
        fn camel_case() {
            let p: Params = serde_json::from_str(r#"{"tieBreak": "INSERTION"}"#).unwrap();
            assert_eq!(TieBreak::Insertion, p.tie_break);
            assert!(serde_json::from_str::<Params>(r#"{"tieBreak": "RANDOM"}"#).is_err());
        }
    }

    mod report {
        use super::*;

        #[test]
        fn refuted_json() {
            session(|| {
                let report =
                    Prover::prove(parse_clause_set("P\n-P").unwrap(), Params::default()).unwrap();
                let json = serde_json::to_value(&report).unwrap();

                assert_eq!("REFUTED", json["outcome"]["result"]);
                assert_eq!(2, json["outcome"]["witness"]["id"]);
                assert_eq!(0, json["outcome"]["proof"]["children"][0]["clause"]["id"]);
                assert_eq!(1, json["summary"]["maxQueueSize"]);
                assert_eq!(1, json["trace"][0]["queueSize"]);
            })
        }

        #[test]
        fn exhausted_json() {
            session(|| {
                let report =
                    Prover::prove(parse_clause_set("P\nQ").unwrap(), Params::default()).unwrap();
                let json = serde_json::to_value(&report).unwrap();
                assert_eq!("EXHAUSTED", json["outcome"]["result"]);
                assert_eq!(0, json["summary"]["iterations"]);
            })
        }

        #[test]
        fn errors_render() {
            session(|| {
                let e = ResolutionErr::InvalidClauseId(4);
                assert_eq!("There is no clause with id 4", e.to_string());
            })
        }
    }
}
