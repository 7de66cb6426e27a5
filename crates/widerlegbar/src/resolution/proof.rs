use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::clause::ClauseStore;
use crate::{targets, Clause, ClauseId};

use super::{ResolutionErr, ResolutionResult};

/// Derivation of a clause: input clauses are leaves, resolvents have their
/// two parents as children.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProofTree {
    pub clause: Clause,
    pub children: Option<Box<(ProofTree, ProofTree)>>,
}

impl ProofTree {
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn size(&self) -> usize {
        1 + match &self.children {
            Some(c) => c.0.size() + c.1.size(),
            None => 0,
        }
    }

    pub fn depth(&self) -> usize {
        match &self.children {
            Some(c) => 1 + c.0.depth().max(c.1.depth()),
            None => 0,
        }
    }

    /// Nodes in rendering order: node, then the first subtree, then the second.
    pub fn pre_order(&self) -> Vec<(usize, &Clause)> {
        let mut nodes = vec![];
        self.collect(0, &mut nodes);
        nodes
    }

    fn collect<'a>(&'a self, depth: usize, nodes: &mut Vec<(usize, &'a Clause)>) {
        nodes.push((depth, &self.clause));
        if let Some(c) = &self.children {
            c.0.collect(depth + 1, nodes);
            c.1.collect(depth + 1, nodes);
        }
    }

    pub fn leaves(&self) -> Vec<&Clause> {
        self.pre_order()
            .into_iter()
            .map(|(_, c)| c)
            .filter(|c| c.provenance().is_input())
            .collect()
    }
}

impl fmt::Display for ProofTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, c) in self.pre_order() {
            writeln!(
                f,
                "{:indent$}{}: {} ({})",
                "",
                c.id(),
                c,
                c.provenance(),
                indent = depth
            )?;
        }
        Ok(())
    }
}

/// Walks the provenance of `id` back to the input clauses.
pub fn build_proof_tree(store: &ClauseStore, id: ClauseId) -> ResolutionResult<ProofTree> {
    let clause = store.get(id).ok_or(ResolutionErr::InvalidClauseId(id))?;
    build_from(store, clause.clone())
}

/// Like [`build_proof_tree`] for a clause that need not be stored itself,
/// e.g. the empty clause ending a search.
pub fn build_from(store: &ClauseStore, clause: Clause) -> ResolutionResult<ProofTree> {
    debug!(target: targets::PROOF, "reconstructing {}: {}", clause.id(), clause);
    let children = match clause.provenance().parents() {
        None => None,
        Some((a, b)) => {
            debug_assert!(a < clause.id() && b < clause.id());
            Some(Box::new((
                build_proof_tree(store, a)?,
                build_proof_tree(store, b)?,
            )))
        }
    };
    Ok(ProofTree { clause, children })
}
