use std::path::PathBuf;

use clap::Parser;
use lookahead_config::Overrides;
use thiserror::Error;


#[derive(Parser, Debug)]
#[command(name = "lookahead")]
#[command(about = "Search a product catalog as you type")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Configuration file (defaults to <config dir>/lookahead/config.toml)
	#[arg(long, short = 'c', value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Catalog base URL, overriding the configuration file
	#[arg(long, value_name = "URL")]
	pub base_url: Option<String>,

	/// Quiet interval in milliseconds before a query is searched
	#[arg(long, value_name = "MS")]
	pub debounce_ms: Option<u64>,

	/// Verbose logging
	#[arg(short, long)]
	pub verbose: bool,
}

impl Cli {
	pub fn overrides(&self) -> Overrides {
		Overrides {
			base_url: self.base_url.clone(),
			debounce_ms: self.debounce_ms,
		}
	}
}

/// One line read from the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
	/// New query text, exactly as typed.
	Query(String),
	/// Pick a listed suggestion. 0-indexed.
	Pick(usize),
	/// Drop the current selection.
	Clear,
	Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
	#[error("unknown command :{0} (try :pick N, :clear, :quit)")]
	UnknownCommand(String),

	#[error("expected a suggestion number starting at 1, got {0:?}")]
	InvalidIndex(String),
}

impl Input {
	/// Parses one input line.
	///
	/// Lines starting with `:` are commands. A doubled `::` enters a query
	/// that itself starts with a colon. `:pick N` is 1-indexed.
	pub fn parse(line: &str) -> Result<Self, InputError> {
		let Some(command) = line.strip_prefix(':') else {
			return Ok(Self::Query(line.to_string()));
		};
		if let Some(literal) = command.strip_prefix(':') {
			return Ok(Self::Query(format!(":{literal}")));
		}

		let mut words = command.split_whitespace();
		match (words.next(), words.next(), words.next()) {
			(Some("quit" | "q"), None, None) => Ok(Self::Quit),
			(Some("clear"), None, None) => Ok(Self::Clear),
			(Some("pick" | "p"), Some(number), None) => number
				.parse::<usize>()
				.ok()
				.and_then(|n| n.checked_sub(1))
				.map(Self::Pick)
				.ok_or_else(|| InputError::InvalidIndex(number.to_string())),
			_ => Err(InputError::UnknownCommand(command.trim().to_string())),
		}
	}
}
