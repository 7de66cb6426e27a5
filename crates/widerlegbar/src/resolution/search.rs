use log::{debug, info};

use crate::clause::{ClauseStore, IdAllocator};
use crate::{targets, Clause, Literal};

use super::{
    build_from, is_resolvable, resolvable_props, resolve, Candidate, Fate, Outcome, Params,
    Refutation, Report, ResolutionErr, ResolutionResult, ResolventRecord, Scheduler, Step,
    Summary, TraceSink,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    Seeding,
    Running,
    /// Holds the derived empty clause.
    Succeeded(Clause),
    Exhausted,
}

impl SearchState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SearchState::Succeeded(_) | SearchState::Exhausted)
    }
}

/// Best-first refutation search over a propositional knowledge base.
pub struct Prover {
    store: ClauseStore,
    ids: IdAllocator,
    scheduler: Scheduler,
    iteration: usize,
    state: SearchState,
}

impl Prover {
    /// Takes the initial clauses, numbering them from 0 in input order.
    pub fn new<I, C>(input: I, params: Params) -> Self
    where
        I: IntoIterator<Item = C>,
        C: IntoIterator<Item = Literal>,
    {
        let mut ids = IdAllocator::new();
        let store = ClauseStore::from_input(input, &mut ids);
        Self {
            store,
            ids,
            scheduler: Scheduler::new(params.tie_break),
            iteration: 0,
            state: SearchState::Seeding,
        }
    }

    /// Runs a complete search, recording every iteration.
    pub fn prove<I, C>(input: I, params: Params) -> ResolutionResult<Report>
    where
        I: IntoIterator<Item = C>,
        C: IntoIterator<Item = Literal>,
    {
        let mut prover = Self::new(input, params);
        let mut trace = Vec::new();
        let outcome = prover.run(&mut trace)?;
        Ok(Report {
            outcome,
            summary: prover.summary(),
            trace,
        })
    }

    pub fn store(&self) -> &ClauseStore {
        &self.store
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn iterations(&self) -> usize {
        self.iteration
    }

    pub fn queue_size(&self) -> usize {
        self.scheduler.len()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            iterations: self.iteration,
            max_queue_size: self.scheduler.max_size(),
            clauses: self.store.size(),
        }
    }

    /// Steps until the search ends and builds the proof if one was found.
    pub fn run<S: TraceSink>(&mut self, mut sink: S) -> ResolutionResult<Outcome> {
        while !self.state.is_terminal() {
            self.step(&mut sink)?;
        }

        let outcome = match &self.state {
            SearchState::Succeeded(witness) => Outcome::Refuted(Refutation {
                proof: build_from(&self.store, witness.clone())?,
                witness: witness.clone(),
            }),
            _ => Outcome::Exhausted,
        };

        let summary = self.summary();
        info!(
            target: targets::SEARCH,
            "{} after {} iterations (max queue size {}, {} clauses)",
            if outcome.is_refuted() { "refuted" } else { "exhausted" },
            summary.iterations,
            summary.max_queue_size,
            summary.clauses
        );

        Ok(outcome)
    }

    /// Performs one iteration. Seeding happens on the first call. In a
    /// terminal state this does nothing.
    pub fn step<S: TraceSink>(&mut self, mut sink: S) -> ResolutionResult<&SearchState> {
        match self.state {
            SearchState::Seeding => {
                self.seed();
                self.state = SearchState::Running;
                self.iterate(&mut sink)?;
            }
            SearchState::Running => self.iterate(&mut sink)?,
            SearchState::Succeeded(_) | SearchState::Exhausted => {}
        }
        Ok(&self.state)
    }

    fn seed(&mut self) {
        let clauses = self.store.clauses();
        for (i, c1) in clauses.iter().enumerate() {
            for c2 in &clauses[i + 1..] {
                if is_resolvable(c1, c2) {
                    self.scheduler.push(Candidate::new(c1, c2));
                }
            }
        }
        debug!(
            target: targets::SEARCH,
            "seeded {} candidates from {} input clauses",
            self.scheduler.len(),
            self.store.size()
        );
    }

    fn iterate<S: TraceSink>(&mut self, sink: &mut S) -> ResolutionResult<()> {
        let queue_size = self.scheduler.len();
        let cand = match self.scheduler.pop_min() {
            Some(c) => c,
            None => {
                self.state = SearchState::Exhausted;
                return Ok(());
            }
        };
        self.iteration += 1;

        let c1 = self.clause(cand.c1)?;
        let c2 = self.clause(cand.c2)?;
        debug!(
            target: targets::SEARCH,
            "iteration {}, queue size {}, resolving {}: {} and {}: {}",
            self.iteration,
            queue_size,
            c1.id(),
            c1,
            c2.id(),
            c2
        );

        let mut step = Step {
            iteration: self.iteration,
            queue_size,
            c1: c1.id(),
            c2: c2.id(),
            resolvents: vec![],
        };

        for prop in resolvable_props(&c1, &c2) {
            let r = resolve(&c1, &c2, prop, &mut self.ids)?;

            let fate = if r.is_empty() {
                Fate::Empty
            } else if self.store.contains_literals(r.literals()) {
                Fate::Duplicate
            } else {
                Fate::Added
            };
            debug!(target: targets::SEARCH, "{}: {} on {} ({:?})", r.id(), r, prop, fate);

            step.resolvents.push(ResolventRecord {
                id: r.id(),
                literals: r.literals().clone(),
                parents: (c1.id(), c2.id()),
                fate,
            });

            match fate {
                Fate::Empty => {
                    self.state = SearchState::Succeeded(r);
                    break;
                }
                Fate::Duplicate => {}
                Fate::Added => {
                    for other in self.store.iter() {
                        if is_resolvable(other, &r) {
                            self.scheduler.push(Candidate::new(other, &r));
                        }
                    }
                    self.store.add(r);
                }
            }
        }

        sink.record(&step, &self.store);
        Ok(())
    }

    fn clause(&self, id: usize) -> ResolutionResult<Clause> {
        self.store
            .get(id)
            .cloned()
            .ok_or(ResolutionErr::InvalidClauseId(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_clause_set;
    use crate::resolution::TieBreak;
    use crate::{session, ClauseId};

    fn prover(kb: &str) -> Prover {
        Prover::new(parse_clause_set(kb).unwrap(), Params::default())
    }

    fn prove(kb: &str) -> Report {
        Prover::prove(parse_clause_set(kb).unwrap(), Params::default()).unwrap()
    }

    const PIGEONHOLE_3_2: &str = "
        # three pigeons, two holes
        p11 p12
        p21 p22
        p31 p32
        -p11 -p21
        -p11 -p31
        -p21 -p31
        -p12 -p22
        -p12 -p32
        -p22 -p32
    ";

    mod examples {
        use super::*;

        #[test]
        fn contradiction() {
            session(|| {
                let report = prove("P\n-P");
                assert_eq!(1, report.summary.iterations);
                assert_eq!(1, report.summary.max_queue_size);

                let r = report.outcome.refutation().unwrap();
                assert!(r.witness.is_empty());
                assert_eq!(2, r.witness.id());

                let proof = &r.proof;
                assert!(proof.clause.is_empty());
                let children = proof.children.as_ref().unwrap();
                assert_eq!("{P}", children.0.clause.to_string());
                assert_eq!("{-P}", children.1.clause.to_string());
                assert!(children.0.is_leaf() && children.1.is_leaf());
            })
        }

        #[test]
        fn chain() {
            session(|| {
                let report = prove("P Q\n-P R\n-Q\n-R");
                assert!(report.outcome.is_refuted());
                assert_eq!(3, report.summary.iterations);
                assert_eq!(4, report.summary.max_queue_size);

                let first = &report.trace[0];
                assert_eq!((1, 3, 0, 2), (first.iteration, first.queue_size, first.c1, first.c2));

                let proof = &report.outcome.refutation().unwrap().proof;
                assert_eq!(
                    "6: {} (4,5)\n 4: {P} (0,2)\n  0: {P, Q} (input)\n  2: {-Q} (input)\n 5: {-P} (1,3)\n  1: {-P, R} (input)\n  3: {-R} (input)\n",
                    proof.to_string()
                );
            })
        }

        #[test]
        fn nothing_to_resolve() {
            session(|| {
                let report = prove("P\nQ");
                assert_eq!(Outcome::Exhausted, report.outcome);
                assert_eq!(0, report.summary.iterations);
                assert_eq!(0, report.summary.max_queue_size);
                assert!(report.trace.is_empty());
            })
        }
    }

    mod search {
        use super::*;

        #[test]
        fn empty_knowledge_base() {
            session(|| {
                let report = prove("");
                assert_eq!(Outcome::Exhausted, report.outcome);
                assert_eq!(0, report.summary.clauses);
            })
        }

        #[test]
        fn duplicates_are_dropped() {
            session(|| {
                let mut p = prover("P Q\n-P Q\nQ");
                let mut trace: Vec<Step> = vec![];
                let outcome = p.run(&mut trace).unwrap();

                assert_eq!(Outcome::Exhausted, outcome);
                assert_eq!(3, p.store().size());
                assert_eq!(1, trace.len());
                let r = &trace[0].resolvents[0];
                assert_eq!(Fate::Duplicate, r.fate);
                assert_eq!(3, r.id);
                assert_eq!((0, 1), r.parents);
            })
        }

        #[test]
        fn satisfiable_is_exhausted() {
            session(|| {
                let report = prove("P Q\n-P Q\n-Q R\n-R S");
                assert_eq!(Outcome::Exhausted, report.outcome);
                assert!(report.summary.iterations > 0);
                assert!(report
                    .trace
                    .iter()
                    .flat_map(|s| &s.resolvents)
                    .all(|r| r.fate != Fate::Empty));
            })
        }

        #[test]
        fn pigeonhole() {
            session(|| {
                let report = prove(PIGEONHOLE_3_2);
                let r = report.outcome.refutation().unwrap();
                let leaves: Vec<ClauseId> = r.proof.leaves().iter().map(|c| c.id()).collect();
                assert!(leaves.iter().all(|id| *id < 9));
            })
        }

        #[test]
        fn insertion_tie_break_also_refutes() {
            session(|| {
                let params = Params {
                    tie_break: TieBreak::Insertion,
                };
                let report =
                    Prover::prove(parse_clause_set(PIGEONHOLE_3_2).unwrap(), params).unwrap();
                assert!(report.outcome.is_refuted());
            })
        }

        #[test]
        fn deterministic() {
            let run = || session(|| serde_json::to_string(&prove(PIGEONHOLE_3_2)).unwrap());
            assert_eq!(run(), run());
        }

        #[test]
        fn several_props_in_one_iteration() {
            session(|| {
                let mut p = prover("P Q\n-P -Q");
                let mut trace: Vec<Step> = vec![];
                p.step(&mut trace).unwrap();

                assert_eq!(1, trace.len());
                let fates: Vec<Fate> = trace[0].resolvents.iter().map(|r| r.fate).collect();
                assert_eq!(vec![Fate::Added, Fate::Added], fates);
                assert_eq!(4, p.store().size());
            })
        }

        #[test]
        fn siblings_are_paired() {
            session(|| {
                let mut p = prover("P Q R\n-P -Q -R");
                p.step(()).unwrap();

                // {Q, R, -Q, -R}, {P, R, -P, -R}, {P, Q, -P, -Q}
                assert_eq!(5, p.store().size());
                // Each pairs with both inputs and every earlier sibling.
                assert_eq!(2 + 3 + 4, p.queue_size());
            })
        }

        #[test]
        fn provenance_points_backwards() {
            session(|| {
                let mut p = prover(PIGEONHOLE_3_2);
                p.run(()).unwrap();
                for c in p.store().iter() {
                    if let Some((a, b)) = c.provenance().parents() {
                        assert!(a < b && b < c.id());
                    }
                }
            })
        }
    }

    mod stepping {
        use super::*;

        #[test]
        fn states() {
            session(|| {
                let mut p = prover("P Q\n-Q\n-P");
                assert_eq!(&SearchState::Seeding, p.state());

                assert_eq!(&SearchState::Running, p.step(()).unwrap());
                assert_eq!(1, p.iterations());

                while !p.state().is_terminal() {
                    p.step(()).unwrap();
                }
                assert!(matches!(p.state(), SearchState::Succeeded(c) if c.is_empty()));

                let iterations = p.iterations();
                p.step(()).unwrap();
                assert_eq!(iterations, p.iterations());
            })
        }

        #[test]
        fn queue_size_is_before_pop() {
            session(|| {
                let mut p = prover("P Q\n-P\n-Q R");
                let mut trace: Vec<Step> = vec![];
                p.step(&mut trace).unwrap();
                assert_eq!(2, trace[0].queue_size);
            })
        }
    }
}
