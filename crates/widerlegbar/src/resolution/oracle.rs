use crate::{Clause, Symbol};

/// Whether some literal of `c1` has its complement in `c2`.
pub fn is_resolvable(c1: &Clause, c2: &Clause) -> bool {
    c1.iter().any(|l| c2.contains(&l.not()))
}

/// Every proposition on which `c1` and `c2` can be resolved, in the
/// canonical literal order of `c1`, without duplicates.
pub fn resolvable_props(c1: &Clause, c2: &Clause) -> Vec<Symbol> {
    let mut props: Vec<Symbol> = Vec::new();

    for l in c1 {
        if c2.contains(&l.not()) && !props.contains(&l.lit()) {
            props.push(l.lit());
        }
    }

    props
}
