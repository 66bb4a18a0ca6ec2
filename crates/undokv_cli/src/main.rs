//! UndoKV CLI
//!
//! Line-oriented shell over an in-memory UndoKV engine.
//!
//! # Modes
//!
//! - **Interactive**: stdin is a terminal; a prompt is printed before each line
//! - **Pipe**: `printf 'SET a 1\nGET a\n' | undokv`
//! - **Script**: `undokv --file commands.txt`
//!
//! # Commands
//!
//! `SET key value`, `GET key`, `DELETE key`, `COUNT value`, `BEGIN`,
//! `ROLLBACK`, `COMMIT`. Keywords are case-insensitive.

mod format;
mod parse;
mod session;

use clap::Parser;
use format::{render_stats, OutputFormat};
use session::{Session, SessionSummary};
use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;
use undokv_core::{Config, Storage};

/// In-memory key-value shell with nested transactions.
#[derive(Parser)]
#[command(name = "undokv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Read commands from this file instead of stdin
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Prompt printed before each line in interactive mode
    #[arg(long, default_value = ">>> ")]
    prompt: String,

    /// Never print a prompt
    #[arg(long)]
    no_prompt: bool,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print engine statistics at end of input
    #[arg(long)]
    stats: bool,

    /// Number of table entries to pre-allocate
    #[arg(long, default_value_t = 0)]
    capacity: usize,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging; results own stdout, so logs go to stderr
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let storage = Storage::with_config(Config::new().initial_capacity(cli.capacity));
    let mut out = io::stdout().lock();
    let mut err = io::stderr();

    let (summary, interactive) = match &cli.file {
        Some(path) => {
            let input = open_script(path)?;
            let session = Session::new(&storage, cli.format);
            (session.run(input, &mut out, &mut err)?, false)
        }
        None => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            let prompt = (interactive && !cli.no_prompt).then(|| cli.prompt.clone());
            let session = Session::new(&storage, cli.format).with_prompt(prompt);
            (session.run(stdin.lock(), &mut out, &mut err)?, interactive)
        }
    };

    tracing::debug!(
        lines = summary.lines,
        executed = summary.executed,
        errors = summary.errors,
        "end of input"
    );

    if cli.stats {
        writeln!(out, "{}", render_stats(&storage.stats().snapshot(), cli.format)?)?;
    }
    out.flush()?;

    process::exit(exit_code(&summary, interactive));
}

fn open_script(path: &Path) -> io::Result<impl BufRead> {
    let file = File::open(path).map_err(|e| {
        io::Error::new(e.kind(), format!("cannot open {}: {e}", path.display()))
    })?;
    Ok(BufReader::new(file))
}

/// Non-interactive runs fail if any line failed.
fn exit_code(summary: &SessionSummary, interactive: bool) -> i32 {
    if !interactive && summary.errors > 0 {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::parse_from([
            "undokv", "--file", "in.txt", "-o", "json", "--stats", "--no-prompt",
        ]);
        assert_eq!(cli.file, Some(PathBuf::from("in.txt")));
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.stats);
        assert!(cli.no_prompt);
        assert_eq!(cli.prompt, ">>> ");
    }

    #[test]
    fn script_file_runs_to_completion() {
        let mut script = tempfile::NamedTempFile::new().unwrap();
        writeln!(script, "SET a 10\nBEGIN\nSET a 20\nROLLBACK\nGET a").unwrap();

        let storage = Storage::new();
        let input = open_script(script.path()).unwrap();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let summary = Session::new(&storage, OutputFormat::Text)
            .run(input, &mut out, &mut err)
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "10\n");
        assert_eq!(summary.executed, 5);
        assert_eq!(exit_code(&summary, false), 0);
    }

    #[test]
    fn missing_script_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_script(&dir.path().join("missing.txt")).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().starts_with("cannot open"));
    }

    #[test]
    fn parse_errors_fail_non_interactive_runs() {
        let summary = SessionSummary {
            lines: 2,
            executed: 1,
            errors: 1,
        };
        assert_eq!(exit_code(&summary, false), 1);
        assert_eq!(exit_code(&summary, true), 0);
    }
}
