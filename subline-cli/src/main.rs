use clap::Parser;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use subline::{compile, CompileError, Matcher};
use thiserror::Error;

/// Searches standard input for a pattern and underlines each match.
///
/// Every line that contains a match is printed, followed by a second line
/// underlining the matched span with '-'. Lines without a match produce no
/// output.
#[derive(Debug, Parser)]
#[command(name = "subline", version, about)]
struct Args {
    /// Pattern built from literal bytes, '|', '*', '+' and '(' ')'
    pattern: String,
    /// Print the Thompson NFA to stderr before matching
    #[arg(long)]
    dump_nfa: bool,
    /// Print the subset-constructed DFA to stderr before matching
    #[arg(long)]
    dump_dfa: bool,
}

#[derive(Debug, Error)]
enum Error {
    #[error("{0}")]
    Compile(#[from] CompileError),
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    fn exit_code(&self) -> ExitCode {
        match self {
            Error::Compile(CompileError::Syntax(_)) => ExitCode::from(1),
            Error::Compile(CompileError::Capacity(_)) | Error::Io(_) => ExitCode::from(2),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("subline: {error}");
            error.exit_code()
        }
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let matcher = compile(&args.pattern)?;
    if args.dump_nfa {
        eprintln!("--- NFA ---\n{}", matcher.nfa().to_table());
    }
    if args.dump_dfa {
        eprintln!("--- DFA ---\n{}", matcher.dfa().to_table());
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut output = stdout.lock();

    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }
        strip_line_ending(&mut line);
        print_match(&mut output, &matcher, &line)?;
    }
}

fn strip_line_ending(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}

fn print_match(output: &mut impl Write, matcher: &Matcher, line: &str) -> io::Result<()> {
    let Some(m) = matcher.search(line) else {
        return Ok(());
    };
    writeln!(output, "{line}")?;
    writeln!(output, "{}{}", " ".repeat(m.start), "-".repeat(m.len()))
}
