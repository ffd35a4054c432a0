//! Command-line front end for the `json-tree` library.
//!
//! Reads a JSON file, then prints either its token list or the parsed value
//! tree. On failure the error is printed to stderr and the exit code is 1.
//!
//! You can run it with: `cargo run -- path/to/file.json`

use clap::Parser;
use json_tree::{tokenize_with_limits, Error, Limits, Value, MAX_SUPPORTED_DEPTH};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{info, warn, Level};

#[derive(Parser)]
#[command(name = "json-tree")]
#[command(about = "Tokenize and parse a JSON document into a value tree", long_about = None)]
#[command(version)]
struct Cli {
    /// The JSON file to read
    file: PathBuf,

    /// Print the token list instead of the value tree
    #[arg(long)]
    tokens: bool,

    /// Maximum nesting depth of objects and arrays (at most 256)
    #[arg(long, value_name = "N", default_value_t = json_tree::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Maximum input size in bytes
    #[arg(long, value_name = "BYTES", default_value_t = json_tree::DEFAULT_MAX_INPUT_SIZE)]
    max_input_size: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn limits(&self) -> Limits {
        if self.max_depth > MAX_SUPPORTED_DEPTH {
            warn!(
                requested = self.max_depth,
                limit = MAX_SUPPORTED_DEPTH,
                "--max-depth clamped"
            );
        }
        Limits::default()
            .with_max_depth(self.max_depth)
            .with_max_input_size(self.max_input_size)
    }

    fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

fn run(cli: &Cli, text: &str) -> Result<(), Error> {
    let limits = cli.limits();
    let started = Instant::now();

    if cli.tokens {
        let tokens = tokenize_with_limits(text, limits)?;
        info!(tokens = tokens.len(), elapsed = ?started.elapsed(), "tokenized");
        for token in &tokens {
            println!("{}:{}\t{}", token.position.line, token.position.column, token.kind);
        }
    } else {
        let value = Value::parse_with_limits(text, limits)?;
        info!(root = value.type_name(), elapsed = ?started.elapsed(), "parsed");
        println!("{value:#?}");
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _ = tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .try_init();

    let text = match fs::read_to_string(&cli.file) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: cannot read {}: {e}", cli.file.display());
            return ExitCode::FAILURE;
        }
    };
    info!(path = %cli.file.display(), bytes = text.len(), "read input");

    match run(&cli, &text) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
