//! Line commands accepted by the terminal dashboard.

use std::str::FromStr;

use investor_dashboard_core::AssetClassFilter;
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  select <id>            show the commitments of an investor
  filter <asset class>   show only one asset class (`filter All` clears it)
  page <n>               show page n of the commitments grid
  refresh                reload the investors list
  help                   show this message
  quit                   exit";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Select(i64),
    Filter(AssetClassFilter),
    Page(usize),
    Refresh,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type `help` for the list of commands.")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),
}

impl FromStr for ShellCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, argument) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name.to_ascii_lowercase().as_str() {
            "select" => argument
                .parse()
                .map(ShellCommand::Select)
                .map_err(|_| CommandError::Usage("select <investor id>")),
            "filter" if !argument.is_empty() => {
                Ok(ShellCommand::Filter(AssetClassFilter::from_name(argument)))
            }
            "filter" => Err(CommandError::Usage("filter <asset class|All>")),
            "page" => match argument.parse() {
                Ok(page) if page > 0 => Ok(ShellCommand::Page(page)),
                _ => Err(CommandError::Usage("page <n>, n starting at 1")),
            },
            "refresh" => Ok(ShellCommand::Refresh),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
            _ => Err(CommandError::Unknown(line.to_string())),
        }
    }
}
