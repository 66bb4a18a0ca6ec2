//! Parsing of input lines into structured commands.
//!
//! A line holds whitespace-separated tokens: the keyword (any case), then
//! the key, then the value. `COUNT` takes its value where other commands
//! take a key. Blank lines and lines starting with `#` carry no command.

use std::str::SplitWhitespace;
use thiserror::Error;
use undokv_core::{Command, CommandKind};

/// Errors produced while parsing a line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The keyword does not name a command.
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// A required argument is missing.
    #[error("{kind} requires a {argument}")]
    MissingArgument {
        /// The command being parsed.
        kind: CommandKind,
        /// Name of the missing argument.
        argument: &'static str,
    },

    /// More tokens were given than the command takes.
    #[error("unexpected argument '{token}' for {kind}")]
    UnexpectedArgument {
        /// The command being parsed.
        kind: CommandKind,
        /// The first surplus token.
        token: String,
    },
}

/// Parses one input line.
///
/// Returns `Ok(None)` for blank lines and comments.
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut tokens = line.split_whitespace();
    let Some(keyword) = tokens.next() else {
        return Ok(None);
    };
    let kind: CommandKind = keyword
        .parse()
        .map_err(|_| ParseError::UnknownCommand(keyword.to_owned()))?;

    let mut args = Args { kind, tokens };
    let command = match kind {
        CommandKind::Set => {
            let key = args.required("key")?;
            let value = args.required("value")?;
            Command::set(key, value)
        }
        CommandKind::Get => Command::get(args.required("key")?),
        CommandKind::Delete => Command::delete(args.required("key")?),
        CommandKind::Count => Command::count(args.required("value")?),
        CommandKind::Begin => Command::Begin,
        CommandKind::Rollback => Command::Rollback,
        CommandKind::Commit => Command::Commit,
    };
    args.finish()?;

    Ok(Some(command))
}

struct Args<'a> {
    kind: CommandKind,
    tokens: SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    fn required(&mut self, argument: &'static str) -> Result<&'a str, ParseError> {
        self.tokens.next().ok_or(ParseError::MissingArgument {
            kind: self.kind,
            argument,
        })
    }

    fn finish(mut self) -> Result<(), ParseError> {
        match self.tokens.next() {
            Some(token) => Err(ParseError::UnexpectedArgument {
                kind: self.kind,
                token: token.to_owned(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        parse_line(line).unwrap().unwrap()
    }

    #[test]
    fn parses_every_command() {
        assert_eq!(parse("SET a 10"), Command::set("a", "10"));
        assert_eq!(parse("GET a"), Command::get("a"));
        assert_eq!(parse("DELETE a"), Command::delete("a"));
        assert_eq!(parse("COUNT 10"), Command::count("10"));
        assert_eq!(parse("BEGIN"), Command::Begin);
        assert_eq!(parse("ROLLBACK"), Command::Rollback);
        assert_eq!(parse("COMMIT"), Command::Commit);
    }

    #[test]
    fn keyword_is_case_insensitive() {
        assert_eq!(parse("set a 10"), Command::set("a", "10"));
        assert_eq!(parse("Begin"), Command::Begin);
    }

    #[test]
    fn keys_and_values_keep_their_case() {
        assert_eq!(parse("SET Key VALUE"), Command::set("Key", "VALUE"));
    }

    #[test]
    fn extra_whitespace_is_ignored() {
        assert_eq!(parse("   SET\ta    10  "), Command::set("a", "10"));
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        assert_eq!(parse_line(""), Ok(None));
        assert_eq!(parse_line("   \t"), Ok(None));
        assert_eq!(parse_line("# SET a 10"), Ok(None));
    }

    #[test]
    fn unknown_keyword_is_rejected() {
        assert_eq!(
            parse_line("PUT a 10"),
            Err(ParseError::UnknownCommand("PUT".into()))
        );
    }

    #[test]
    fn missing_arguments_are_rejected() {
        assert_eq!(
            parse_line("SET a"),
            Err(ParseError::MissingArgument {
                kind: CommandKind::Set,
                argument: "value",
            })
        );
        assert_eq!(
            parse_line("GET"),
            Err(ParseError::MissingArgument {
                kind: CommandKind::Get,
                argument: "key",
            })
        );
        assert_eq!(
            parse_line("COUNT").unwrap_err().to_string(),
            "COUNT requires a value"
        );
    }

    #[test]
    fn surplus_arguments_are_rejected() {
        assert_eq!(
            parse_line("BEGIN now"),
            Err(ParseError::UnexpectedArgument {
                kind: CommandKind::Begin,
                token: "now".into(),
            })
        );
        assert_eq!(
            parse_line("SET a 10 20").unwrap_err().to_string(),
            "unexpected argument '20' for SET"
        );
    }
}
