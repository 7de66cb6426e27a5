use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::hash::BuildHasher;

use log::trace;

use super::{Clause, ClauseId, IdAllocator, Literal, LiteralSet};
use crate::targets;

/// Append-only arena of every clause created during a search.
///
/// Ids are strictly increasing but may have gaps: resolvents that turn out
/// to be duplicates consume an id without ever being stored.
///
/// Duplicates are found through a table from literal-set hashes to the ids
/// in `clauses`; the sets themselves are only held by the clauses.
#[derive(Debug, Default, Clone)]
pub struct ClauseStore {
    clauses: Vec<Clause>,
    by_hash: HashMap<u64, Vec<ClauseId>>,
    hasher: RandomState,
}

impl ClauseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the initial knowledge base, numbering clauses in input order.
    pub fn from_input<I, C>(input: I, ids: &mut IdAllocator) -> Self
    where
        I: IntoIterator<Item = C>,
        C: IntoIterator<Item = Literal>,
    {
        let mut store = Self::new();
        for lits in input {
            store.add(Clause::input(ids.next_id(), lits));
        }
        store
    }

    /// Appends `c`. Its id must be larger than every id already stored.
    pub fn add(&mut self, c: Clause) {
        debug_assert!(self.clauses.last().map_or(true, |l| l.id() < c.id()));
        trace!(target: targets::STORE, "{}: {} stored", c.id(), c);
        let hash = self.hasher.hash_one(c.literals());
        if self.find(c.literals()).is_none() {
            self.by_hash.entry(hash).or_default().push(c.id());
        }
        self.clauses.push(c);
    }

    pub fn get(&self, id: ClauseId) -> Option<&Clause> {
        self.clauses
            .binary_search_by_key(&id, |c| c.id())
            .ok()
            .map(|idx| &self.clauses[idx])
    }

    /// Whether some stored clause has exactly the literal set `lits`.
    pub fn contains_literals(&self, lits: &LiteralSet) -> bool {
        self.find(lits).is_some()
    }

    /// Id of the oldest stored clause with literal set `lits`.
    pub fn find(&self, lits: &LiteralSet) -> Option<ClauseId> {
        self.by_hash
            .get(&self.hasher.hash_one(lits))?
            .iter()
            .copied()
            .find(|id| self.get(*id).is_some_and(|c| c.literals() == lits))
    }

    pub fn size(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{session, Provenance};

    fn lits(ls: &[(&str, bool)]) -> Vec<Literal> {
        ls.iter()
            .map(|(n, neg)| Literal::new((*n).into(), *neg))
            .collect()
    }

    #[test]
    fn input_ids_are_sequential() {
        session(|| {
            let mut ids = IdAllocator::new();
            let store = ClauseStore::from_input(
                vec![lits(&[("P", false)]), lits(&[("P", true), ("Q", false)])],
                &mut ids,
            );
            assert_eq!(2, store.size());
            assert_eq!(2, ids.issued());
            assert_eq!(0, store.clauses()[0].id());
            assert_eq!(1, store.clauses()[1].id());
            assert!(store.iter().all(|c| c.provenance().is_input()));
        })
    }

    #[test]
    fn lookup_with_gaps() {
        session(|| {
            let mut store = ClauseStore::new();
            store.add(Clause::input(0, lits(&[("a", false)])));
            store.add(Clause::new(
                3,
                lits(&[("b", false)]).into_iter().collect(),
                Provenance::Resolved(0, 1),
            ));
            assert_eq!(Some(3), store.get(3).map(|c| c.id()));
            assert!(store.get(1).is_none());
            assert!(store.get(4).is_none());
        })
    }

    #[test]
    fn duplicate_lookup_ignores_order() {
        session(|| {
            let mut store = ClauseStore::new();
            store.add(Clause::input(0, lits(&[("P", false), ("Q", true)])));
            let same: LiteralSet = lits(&[("Q", true), ("P", false)]).into_iter().collect();
            let other: LiteralSet = lits(&[("Q", false), ("P", false)]).into_iter().collect();
            assert!(store.contains_literals(&same));
            assert_eq!(Some(0), store.find(&same));
            assert!(!store.contains_literals(&other));
        })
    }

    #[test]
    fn repeated_input_keeps_oldest() {
        session(|| {
            let mut ids = IdAllocator::new();
            let store = ClauseStore::from_input(
                vec![
                    lits(&[("P", false)]),
                    lits(&[("Q", false)]),
                    lits(&[("P", false)]),
                ],
                &mut ids,
            );
            let p: LiteralSet = lits(&[("P", false)]).into_iter().collect();
            assert_eq!(3, store.size());
            assert_eq!(Some(0), store.find(&p));
            assert_eq!(Some(1), store.find(store.clauses()[1].literals()));
        })
    }
}
