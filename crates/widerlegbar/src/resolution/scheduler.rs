use std::cmp::Reverse;
use std::collections::BinaryHeap;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::{targets, Clause, ClauseId};

use super::TieBreak;

/// An unordered pair of distinct, resolvable clauses. The older clause (the
/// smaller id) always comes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Candidate {
    pub c1: ClauseId,
    pub c2: ClauseId,
    pub cost: usize,
}

impl Candidate {
    pub fn new(c1: &Clause, c2: &Clause) -> Self {
        debug_assert_ne!(c1.id(), c2.id());
        let (c1, c2) = if c1.id() < c2.id() { (c1, c2) } else { (c2, c1) };
        Self {
            c1: c1.id(),
            c2: c2.id(),
            cost: c1.size() + c2.size(),
        }
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    cost: usize,
    rank: (usize, usize),
    candidate: Candidate,
}

/// Best-first queue of resolution candidates, cheapest first.
#[derive(Debug)]
pub struct Scheduler {
    heap: BinaryHeap<Reverse<Entry>>,
    tie_break: TieBreak,
    pushed: usize,
    max_size: usize,
}

impl Scheduler {
    pub fn new(tie_break: TieBreak) -> Self {
        Self {
            heap: BinaryHeap::new(),
            tie_break,
            pushed: 0,
            max_size: 0,
        }
    }

    pub fn push(&mut self, candidate: Candidate) {
        let rank = match self.tie_break {
            TieBreak::Ids => (candidate.c1, candidate.c2),
            TieBreak::Insertion => (self.pushed, 0),
        };
        self.pushed += 1;
        self.heap.push(Reverse(Entry {
            cost: candidate.cost,
            rank,
            candidate,
        }));
        self.max_size = self.max_size.max(self.heap.len());
        trace!(
            target: targets::SCHEDULE,
            "scheduled {} and {} at cost {}",
            candidate.c1,
            candidate.c2,
            candidate.cost
        );
    }

    pub fn pop_min(&mut self) -> Option<Candidate> {
        self.heap.pop().map(|Reverse(e)| e.candidate)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Largest number of candidates queued at any point so far.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Total number of candidates ever scheduled.
    pub fn pushed(&self) -> usize {
        self.pushed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cand(c1: ClauseId, c2: ClauseId, cost: usize) -> Candidate {
        Candidate { c1, c2, cost }
    }

    #[test]
    fn cheapest_first() {
        let mut s = Scheduler::new(TieBreak::Ids);
        s.push(cand(0, 1, 5));
        s.push(cand(2, 3, 2));
        s.push(cand(1, 2, 3));
        assert_eq!(Some(cand(2, 3, 2)), s.pop_min());
        assert_eq!(Some(cand(1, 2, 3)), s.pop_min());
        assert_eq!(Some(cand(0, 1, 5)), s.pop_min());
        assert_eq!(None, s.pop_min());
    }

    #[test]
    fn ties_by_ids() {
        let mut s = Scheduler::new(TieBreak::Ids);
        s.push(cand(3, 4, 2));
        s.push(cand(0, 7, 2));
        s.push(cand(0, 5, 2));
        assert_eq!(Some(cand(0, 5, 2)), s.pop_min());
        assert_eq!(Some(cand(0, 7, 2)), s.pop_min());
        assert_eq!(Some(cand(3, 4, 2)), s.pop_min());
    }

    #[test]
    fn ties_by_insertion() {
        let mut s = Scheduler::new(TieBreak::Insertion);
        s.push(cand(3, 4, 2));
        s.push(cand(0, 7, 2));
        s.push(cand(0, 5, 1));
        assert_eq!(Some(cand(0, 5, 1)), s.pop_min());
        assert_eq!(Some(cand(3, 4, 2)), s.pop_min());
        assert_eq!(Some(cand(0, 7, 2)), s.pop_min());
    }

    #[test]
    fn tracks_max_size() {
        let mut s = Scheduler::new(TieBreak::Ids);
        assert_eq!(0, s.max_size());
        s.push(cand(0, 1, 2));
        s.push(cand(0, 2, 2));
        s.pop_min();
        s.pop_min();
        s.push(cand(1, 2, 2));
        assert_eq!(2, s.max_size());
        assert_eq!(1, s.len());
        assert_eq!(3, s.pushed());
    }
}
