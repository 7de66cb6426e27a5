pub mod clause;
pub mod parse;
pub mod resolution;
mod symbol;
mod targets;

pub use clause::{Clause, ClauseId, Literal, Provenance};
pub use resolution::{Outcome, Params, Prover, Report, TieBreak};
pub use symbol::Symbol;

use symbol::Interner;

scoped_tls::scoped_thread_local!(static SESSION_GLOBALS: SessionGlobals);

pub struct SessionGlobals {
    symbol_interner: Interner,
}

impl SessionGlobals {
    fn new() -> Self {
        Self {
            symbol_interner: Interner::fresh(),
        }
    }
}

/// Runs `f` with a fresh symbol interner. Every symbol created inside the
/// closure is only valid until it returns.
pub fn session<R>(f: impl FnOnce() -> R) -> R {
    let session_globals = SessionGlobals::new();
    SESSION_GLOBALS.set(&session_globals, f)
}

pub(crate) fn with_session_globals<R, F>(f: F) -> R
where
    F: FnOnce(&SessionGlobals) -> R,
{
    SESSION_GLOBALS.with(f)
}
