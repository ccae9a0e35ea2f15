//! Parsing of interactive commands.

use thiserror::Error;

/// A user action in the terminal widget. Item numbers are 1-based positions
/// in the rendered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Done(usize),
    Remove(usize),
    Refresh(usize),
    List,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("`{0}` needs an item number")]
    MissingNumber(&'static str),
    #[error("`{0}` is not an item number")]
    BadNumber(String),
}

pub const HELP: &str = "\
commands:
  add <name>     add an item
  done <n>       toggle item n done / not done
  rm <n>         delete item n (asks first)
  refresh <n>    re-read item n from the server
  ls             reload the whole list
  help           show this text
  quit           leave";

impl Command {
    /// Parse one input line. Blank `add` input yields `Add("")`; the caller
    /// decides whether it may be submitted.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        match word {
            "add" | "a" => Ok(Command::Add(rest.to_string())),
            "done" | "d" => number("done", rest).map(Command::Done),
            "rm" | "delete" => number("rm", rest).map(Command::Remove),
            "refresh" => number("refresh", rest).map(Command::Refresh),
            "ls" | "list" => Ok(Command::List),
            "help" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn number(command: &'static str, arg: &str) -> Result<usize, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingNumber(command));
    }
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::BadNumber(arg.to_string())),
    }
}
