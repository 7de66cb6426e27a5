use serde::{Deserialize, Serialize};

use crate::clause::{ClauseStore, LiteralSet};
use crate::ClauseId;

/// What became of a freshly built resolvent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Fate {
    /// The empty clause; the search ends here.
    Empty,
    /// Same literals as a stored clause, dropped.
    Duplicate,
    /// Stored and paired with the rest of the store.
    Added,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolventRecord {
    pub id: ClauseId,
    pub literals: LiteralSet,
    pub parents: (ClauseId, ClauseId),
    pub fate: Fate,
}

/// One iteration of the search loop.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub iteration: usize,
    /// Queue length before the candidate was taken off.
    pub queue_size: usize,
    pub c1: ClauseId,
    pub c2: ClauseId,
    pub resolvents: Vec<ResolventRecord>,
}

/// Receives a [`Step`] after every iteration, together with the store as it
/// is once the step's resolvents have been added.
pub trait TraceSink {
    fn record(&mut self, step: &Step, store: &ClauseStore);
}

impl TraceSink for () {
    fn record(&mut self, _step: &Step, _store: &ClauseStore) {}
}

impl TraceSink for Vec<Step> {
    fn record(&mut self, step: &Step, _store: &ClauseStore) {
        self.push(step.clone());
    }
}

impl<T> TraceSink for &mut T
where
    T: TraceSink + ?Sized,
{
    fn record(&mut self, step: &Step, store: &ClauseStore) {
        (**self).record(step, store)
    }
}
