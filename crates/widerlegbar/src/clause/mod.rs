use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Symbol;

mod store;

pub use store::ClauseStore;

pub type ClauseId = usize;

/// Canonically ordered, duplicate free literal set.
pub type LiteralSet = BTreeSet<Literal>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct Literal {
    lit: Symbol,
    negated: bool,
}

impl Literal {
    pub fn new(lit: Symbol, negated: bool) -> Self {
        Literal { lit, negated }
    }

    pub fn pos(lit: Symbol) -> Self {
        Self::new(lit, false)
    }

    pub fn neg(lit: Symbol) -> Self {
        Self::new(lit, true)
    }

    pub fn lit(&self) -> Symbol {
        self.lit
    }

    pub fn negated(&self) -> bool {
        self.negated
    }

    pub fn not(&self) -> Literal {
        Literal {
            lit: self.lit,
            negated: !self.negated,
        }
    }

    pub fn is_complement_of(&self, other: &Literal) -> bool {
        self.lit == other.lit && self.negated != other.negated
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", if self.negated { "-" } else { "" }, self.lit)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Provenance {
    Input,
    Resolved(ClauseId, ClauseId),
}

impl Provenance {
    pub fn parents(&self) -> Option<(ClauseId, ClauseId)> {
        match self {
            Provenance::Input => None,
            Provenance::Resolved(a, b) => Some((*a, *b)),
        }
    }

    pub fn is_input(&self) -> bool {
        matches!(self, Provenance::Input)
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Input => write!(f, "input"),
            Provenance::Resolved(a, b) => write!(f, "{a},{b}"),
        }
    }
}

/// A clause as held by the [`ClauseStore`]. Clauses are immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Clause {
    id: ClauseId,
    literals: LiteralSet,
    provenance: Provenance,
}

impl Clause {
    pub fn new(id: ClauseId, literals: LiteralSet, provenance: Provenance) -> Self {
        Clause {
            id,
            literals,
            provenance,
        }
    }

    pub fn input<I>(id: ClauseId, literals: I) -> Self
    where
        I: IntoIterator<Item = Literal>,
    {
        Self::new(id, literals.into_iter().collect(), Provenance::Input)
    }

    pub fn id(&self) -> ClauseId {
        self.id
    }

    pub fn literals(&self) -> &LiteralSet {
        &self.literals
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn size(&self) -> usize {
        self.literals.len()
    }

    pub fn contains(&self, l: &Literal) -> bool {
        self.literals.contains(l)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Literal;

    type IntoIter = std::collections::btree_set::Iter<'a, Literal>;

    fn into_iter(self) -> Self::IntoIter {
        self.literals.iter()
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&DisplayLiterals(&self.literals), f)
    }
}

/// Shows a bare literal set the way a clause is shown, e.g. `{P, -Q}`.
pub struct DisplayLiterals<'a>(pub &'a LiteralSet);

impl fmt::Display for DisplayLiterals<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, l) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{l}")?;
        }
        write!(f, "}}")
    }
}

/// Hands out clause ids. Ids are strictly increasing and never reused, which
/// keeps provenance links acyclic.
#[derive(Debug, Default, Clone)]
pub struct IdAllocator {
    next: ClauseId,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> ClauseId {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> usize {
        self.next
    }
}
