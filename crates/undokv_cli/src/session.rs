//! Line-at-a-time command session.

use crate::format::{render_output, OutputFormat};
use crate::parse::parse_line;
use std::io::{self, BufRead, Write};
use tracing::debug;
use undokv_core::Storage;

/// Counters for one session run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Lines read from input.
    pub lines: usize,
    /// Commands dispatched to the engine.
    pub executed: usize,
    /// Lines that failed to parse or execute.
    pub errors: usize,
}

/// Drives a [`Storage`] from textual input.
pub struct Session<'a> {
    storage: &'a Storage,
    format: OutputFormat,
    prompt: Option<String>,
}

impl<'a> Session<'a> {
    /// Creates a session without a prompt.
    pub fn new(storage: &'a Storage, format: OutputFormat) -> Self {
        Self {
            storage,
            format,
            prompt: None,
        }
    }

    /// Prints `prompt` before every line is read.
    #[must_use]
    pub fn with_prompt(mut self, prompt: Option<String>) -> Self {
        self.prompt = prompt;
        self
    }

    /// Reads `input` to end-of-stream, executing each line.
    ///
    /// Reported outputs go to `out`; parse and engine errors go to `err`
    /// as `(error) <message>` and do not stop the session.
    pub fn run<R, W, E>(&self, input: R, out: &mut W, err: &mut E) -> io::Result<SessionSummary>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        let mut summary = SessionSummary::default();
        self.print_prompt(out)?;

        for line in input.lines() {
            let line = line?;
            summary.lines += 1;
            match self.execute_line(&line) {
                Ok(LineOutcome::Skipped) => {}
                Ok(LineOutcome::Executed(rendered)) => {
                    summary.executed += 1;
                    if let Some(rendered) = rendered {
                        writeln!(out, "{rendered}")?;
                    }
                }
                Err(message) => {
                    summary.errors += 1;
                    writeln!(err, "(error) {message}")?;
                }
            }
            self.print_prompt(out)?;
        }

        if self.prompt.is_some() {
            writeln!(out)?;
        }
        debug!(?summary, "session finished");
        Ok(summary)
    }

    fn execute_line(&self, line: &str) -> Result<LineOutcome, String> {
        let Some(command) = parse_line(line).map_err(|e| e.to_string())? else {
            return Ok(LineOutcome::Skipped);
        };
        let output = self.storage.execute(command).map_err(|e| e.to_string())?;
        let rendered = render_output(&output, self.format).map_err(|e| e.to_string())?;
        Ok(LineOutcome::Executed(rendered))
    }

    fn print_prompt<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if let Some(prompt) = &self.prompt {
            write!(out, "{prompt}")?;
            out.flush()?;
        }
        Ok(())
    }
}

/// What happened to one input line.
enum LineOutcome {
    /// Blank line or comment.
    Skipped,
    /// Dispatched; carries the rendered output, if any was reported.
    Executed(Option<String>),
}
