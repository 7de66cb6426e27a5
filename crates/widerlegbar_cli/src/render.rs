use std::io::{self, Write};

use widerlegbar::{
    clause::{ClauseStore, DisplayLiterals},
    resolution::{Step, Summary, TraceSink},
    ClauseId, Outcome,
};

/// Writes every iteration as soon as the search reports it. The first write
/// error stops output and is handed back by [`Printer::finish`].
pub struct Printer<W: Write> {
    out: W,
    err: Option<io::Error>,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W) -> Self {
        Self { out, err: None }
    }

    pub fn finish(self) -> io::Result<()> {
        match self.err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl<W: Write> TraceSink for Printer<W> {
    fn record(&mut self, s: &Step, store: &ClauseStore) {
        if self.err.is_none() {
            if let Err(e) = step(&mut self.out, store, s) {
                self.err = Some(e);
            }
        }
    }
}

pub fn outcome<W: Write>(out: &mut W, outcome: &Outcome, summary: &Summary) -> io::Result<()> {
    match outcome {
        Outcome::Refuted(r) => {
            writeln!(out, "Success!")?;
            write!(out, "{}", r.proof)?;
            writeln!(out, "Number of iterations = {}", summary.iterations)?;
            writeln!(out, "Maximum Queue Size = {}", summary.max_queue_size)?;
        }
        Outcome::Exhausted => writeln!(out, "No solution found")?,
    }

    Ok(())
}

fn step<W: Write>(out: &mut W, store: &ClauseStore, s: &Step) -> io::Result<()> {
    writeln!(
        out,
        "Iteration {}, queue size {}, resolution on {} and {}",
        s.iteration, s.queue_size, s.c1, s.c2
    )?;

    for r in &s.resolvents {
        writeln!(
            out,
            "Resolving {} and {}",
            stored(store, r.parents.0),
            stored(store, r.parents.1)
        )?;
        writeln!(
            out,
            "{}: {} generated from {} and {}",
            r.id,
            DisplayLiterals(&r.literals),
            r.parents.0,
            r.parents.1
        )?;
    }

    Ok(())
}

fn stored(store: &ClauseStore, id: ClauseId) -> String {
    match store.get(id) {
        Some(c) => c.to_string(),
        None => format!("#{id}"),
    }
}
