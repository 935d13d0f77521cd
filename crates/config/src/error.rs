//! Error types for configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or shape.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The catalog base URL is unusable.
	#[error("invalid catalog base URL {value:?}: {reason}")]
	InvalidBaseUrl { value: String, reason: String },

	/// The debounce interval is out of range.
	#[error("debounce must be between 1 and {max} ms, got {value}")]
	InvalidDebounce { value: u64, max: u64 },

	/// The request timeout is zero.
	#[error("request timeout must be greater than 0 ms")]
	InvalidTimeout,
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
