use crate::clause::{IdAllocator, LiteralSet};
use crate::{Clause, Literal, Provenance, Symbol};

use super::{ResolutionErr, ResolutionResult};

/// Resolves `c1` and `c2` on `prop`.
///
/// One occurrence of `prop` and one of its negation are dropped from the
/// combined literals of both clauses, the rest is collected into a set. The
/// allocator advances exactly once on success and not at all on error.
pub fn resolve(
    c1: &Clause,
    c2: &Clause,
    prop: Symbol,
    ids: &mut IdAllocator,
) -> ResolutionResult<Clause> {
    let pos = Literal::pos(prop);
    let neg = Literal::neg(prop);

    let complementary = (c1.contains(&pos) && c2.contains(&neg))
        || (c1.contains(&neg) && c2.contains(&pos));
    if !complementary {
        return Err(ResolutionErr::NotResolvableOn(
            c1.clone(),
            c2.clone(),
            prop,
        ));
    }

    let mut lits: Vec<Literal> = c1.iter().chain(c2.iter()).copied().collect();
    remove_first(&mut lits, &pos);
    remove_first(&mut lits, &neg);
    let literals: LiteralSet = lits.into_iter().collect();

    Ok(Clause::new(
        ids.next_id(),
        literals,
        Provenance::Resolved(c1.id(), c2.id()),
    ))
}

fn remove_first(lits: &mut Vec<Literal>, l: &Literal) {
    if let Some(idx) = lits.iter().position(|x| x == l) {
        lits.remove(idx);
    }
}
