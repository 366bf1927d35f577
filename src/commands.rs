//! Command parsing.
//!
//! Commands arrive as ordinary chat lines starting with the configured prefix.
//! Each command takes at most one argument: a bare token, or a double-quoted
//! phrase when the value contains spaces. Text after the argument is ignored.
//! Parse failures are values the dispatcher turns into notices; nothing here
//! panics on user input.

use thiserror::Error;

pub const START: &str = "order_start";
pub const PLACE: &str = "order";
pub const LIST: &str = "order_list";
pub const TAG: &str = "order_tag";
pub const LEAVE: &str = "order_leave";
pub const HELP: &str = "help";

/// A parsed bot command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start { restaurant: String },
    Place { content: String },
    List,
    Tag { message: String },
    Leave,
    Help { topic: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line does not carry the command prefix; not addressed to the bot.
    #[error("not a command")]
    NotACommand,
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("missing required argument for {command}")]
    MissingArgument { command: &'static str },
    #[error("unbalanced quotes in argument")]
    UnbalancedQuotes,
}

pub fn parse(prefix: &str, line: &str) -> Result<Command, ParseError> {
    let Some(rest) = line.strip_prefix(prefix) else {
        return Err(ParseError::NotACommand);
    };
    let rest = rest.trim();
    let (name, tail) = match rest.split_once(char::is_whitespace) {
        Some((name, tail)) => (name, tail.trim_start()),
        None => (rest, ""),
    };
    match name {
        START => Ok(Command::Start {
            restaurant: required_arg(START, tail)?,
        }),
        PLACE => Ok(Command::Place {
            content: required_arg(PLACE, tail)?,
        }),
        LIST => Ok(Command::List),
        TAG => Ok(Command::Tag {
            message: required_arg(TAG, tail)?,
        }),
        LEAVE => Ok(Command::Leave),
        HELP => Ok(Command::Help {
            topic: single_arg(tail)?,
        }),
        "" => Err(ParseError::NotACommand),
        other => Err(ParseError::Unknown(other.to_string())),
    }
}

fn required_arg(command: &'static str, tail: &str) -> Result<String, ParseError> {
    single_arg(tail)?.ok_or(ParseError::MissingArgument { command })
}

/// One bare or double-quoted token; `None` when `tail` holds no argument.
fn single_arg(tail: &str) -> Result<Option<String>, ParseError> {
    if tail.is_empty() {
        return Ok(None);
    }
    if let Some(rest) = tail.strip_prefix('"') {
        let Some(end) = rest.find('"') else {
            return Err(ParseError::UnbalancedQuotes);
        };
        let value = &rest[..end];
        if value.is_empty() {
            return Ok(None);
        }
        return Ok(Some(value.to_string()));
    }
    Ok(tail.split_whitespace().next().map(str::to_string))
}
