//! Interactive session commands
//!
//! One command per line: `city <name>`, `units`, `units <metric|imperial>`,
//! `hour <n>`, `refresh`, `help`, `quit`.

use std::fmt;

use domain::Units;

/// Help text listing session commands
pub const HELP: &str = "\
Commands:
  city <name>                 search for a city
  units                       toggle between metric and imperial
  units <metric|imperial>     switch to a unit system
  hour <n>                    select today's n-th forecast hour (0-based)
  refresh                     fetch again
  help                        show this help
  quit                        leave the session";

/// A parsed session command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    City(String),
    ToggleUnits,
    Units(Units),
    Hour(usize),
    Refresh,
    Help,
    Quit,
}

/// Why a line could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    Unknown(String),
    MissingArgument(&'static str),
    InvalidArgument(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty command"),
            Self::Unknown(word) => write!(f, "unknown command '{word}', try 'help'"),
            Self::MissingArgument(command) => write!(f, "'{command}' needs an argument"),
            Self::InvalidArgument(detail) => f.write_str(detail),
        }
    }
}

impl std::error::Error for ParseError {}

impl SessionCommand {
    /// Parse one input line
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(w, r)| (w, r.trim()));

        match word.to_ascii_lowercase().as_str() {
            "" => Err(ParseError::Empty),
            "city" | "c" => {
                if rest.is_empty() {
                    Err(ParseError::MissingArgument("city"))
                } else {
                    Ok(Self::City(rest.to_string()))
                }
            },
            "units" | "u" => {
                if rest.is_empty() {
                    Ok(Self::ToggleUnits)
                } else {
                    rest.parse()
                        .map(Self::Units)
                        .map_err(|e: domain::DomainError| ParseError::InvalidArgument(e.to_string()))
                }
            },
            "hour" | "h" => rest
                .parse()
                .map(Self::Hour)
                .map_err(|_| match rest {
                    "" => ParseError::MissingArgument("hour"),
                    other => ParseError::InvalidArgument(format!("not an hour index: {other}")),
                }),
            "refresh" | "r" => Ok(Self::Refresh),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(ParseError::Unknown(other.to_string())),
        }
    }
}
