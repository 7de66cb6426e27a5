use std::{
    fmt, fs,
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::{Parser, ValueEnum};
use log::debug;
use widerlegbar::{
    parse::{parse_clause_set, ParseErr},
    resolution::ResolutionErr,
    session, Params, Prover, Report, TieBreak,
};

mod render;

/// Searches a propositional knowledge base for a resolution refutation
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Knowledge base file. Asked for on stdin when omitted
    file: Option<PathBuf>,

    /// Order of candidates with equal cost
    #[arg(long, value_enum, default_value_t = TieBreakArg::Ids)]
    tie_break: TieBreakArg,

    /// Print the whole report as JSON
    #[arg(long)]
    json: bool,

    /// Only print the outcome, not every iteration
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TieBreakArg {
    Ids,
    Insertion,
}

impl From<TieBreakArg> for TieBreak {
    fn from(t: TieBreakArg) -> Self {
        match t {
            TieBreakArg::Ids => TieBreak::Ids,
            TieBreakArg::Insertion => TieBreak::Insertion,
        }
    }
}

#[derive(Debug)]
enum CliErr {
    Io(io::Error),
    File(PathBuf, io::Error),
    Parse(ParseErr),
    /// Rendered while the symbols are still interned.
    Resolution(String),
    Json(serde_json::Error),
}

impl From<io::Error> for CliErr {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ParseErr> for CliErr {
    fn from(e: ParseErr) -> Self {
        Self::Parse(e)
    }
}

impl From<ResolutionErr> for CliErr {
    fn from(e: ResolutionErr) -> Self {
        Self::Resolution(e.to_string())
    }
}

impl From<serde_json::Error> for CliErr {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl fmt::Display for CliErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliErr::Io(e) => write!(f, "I/O error: {e}"),
            CliErr::File(p, e) => write!(f, "Cannot read knowledge base '{}': {e}", p.display()),
            CliErr::Parse(e) => write!(f, "Invalid knowledge base: {e}"),
            CliErr::Resolution(e) => write!(f, "{e}"),
            CliErr::Json(e) => write!(f, "Cannot serialize report: {e}"),
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), CliErr> {
    let path = match args.file {
        Some(p) => p,
        None => ask_for_file()?,
    };
    debug!("reading knowledge base from {}", path.display());
    let kb = fs::read_to_string(&path).map_err(|e| CliErr::File(path.clone(), e))?;

    let params = Params {
        tie_break: args.tie_break.into(),
    };

    session(|| {
        let input = parse_clause_set(&kb)?;
        let mut prover = Prover::new(input, params);

        let stdout = io::stdout();
        let mut out = stdout.lock();
        if args.json {
            let mut trace = vec![];
            let outcome = prover.run(&mut trace)?;
            let report = Report {
                outcome,
                summary: prover.summary(),
                trace,
            };
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
        } else {
            let outcome = if args.quiet {
                prover.run(())?
            } else {
                let mut printer = render::Printer::new(&mut out);
                let outcome = prover.run(&mut printer)?;
                printer.finish()?;
                outcome
            };
            render::outcome(&mut out, &outcome, &prover.summary())?;
        }
        Ok(())
    })
}

fn ask_for_file() -> Result<PathBuf, CliErr> {
    println!("Enter the name of the knowledge base file:");
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(PathBuf::from(line.trim()))
}
