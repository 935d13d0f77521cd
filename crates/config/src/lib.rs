//! Configuration for lookahead.
//!
//! Configuration is written in TOML:
//!
//! ```toml
//! [catalog]
//! base_url = "http://127.0.0.1:3000"
//! request_timeout_ms = 5000
//!
//! [search]
//! debounce_ms = 300
//! ```
//!
//! # Configuration Files
//!
//! 1. The path passed explicitly (for example `--config`), which must exist.
//! 2. Otherwise `$XDG_CONFIG_HOME/lookahead/config.toml` (or the platform
//!    equivalent) when present.
//! 3. Otherwise built-in defaults.
//!
//! Every key is optional. [`Config::settings`] validates the merged result.

pub mod error;

use std::path::{Path, PathBuf};
use std::time::Duration;

pub use error::{ConfigError, Result};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const MAX_DEBOUNCE_MS: u64 = 10_000;

/// Raw configuration as written in the file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	pub catalog: CatalogConfig,
	pub search: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
	pub base_url: String,
	pub request_timeout_ms: Option<u64>,
}

impl Default for CatalogConfig {
	fn default() -> Self {
		Self {
			base_url: DEFAULT_BASE_URL.to_string(),
			request_timeout_ms: None,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
	pub debounce_ms: u64,
}

impl Default for SearchConfig {
	fn default() -> Self {
		Self {
			debounce_ms: DEFAULT_DEBOUNCE_MS,
		}
	}
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
	pub base_url: Option<String>,
	pub debounce_ms: Option<u64>,
}

/// Validated configuration ready for use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
	pub base_url: Url,
	pub request_timeout: Option<Duration>,
	pub debounce: Duration,
}

impl Config {
	/// Parse a TOML string into a [`Config`].
	pub fn parse(input: &str) -> Result<Self> {
		Ok(toml::from_str(input)?)
	}

	/// Load configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		Self::parse(&content)
	}

	/// Loads `explicit` if given, else the default file if it exists, else defaults.
	pub fn discover(explicit: Option<&Path>) -> Result<Self> {
		if let Some(path) = explicit {
			return Self::load(path);
		}
		match default_path() {
			Some(path) if path.is_file() => Self::load(path),
			_ => Ok(Self::default()),
		}
	}

	/// Applies command-line overrides.
	pub fn apply(&mut self, overrides: &Overrides) {
		if let Some(base_url) = &overrides.base_url {
			self.catalog.base_url = base_url.clone();
		}
		if let Some(debounce_ms) = overrides.debounce_ms {
			self.search.debounce_ms = debounce_ms;
		}
	}

	/// Validates and converts into [`Settings`].
	pub fn settings(&self) -> Result<Settings> {
		let base_url = Url::parse(&self.catalog.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
			value: self.catalog.base_url.clone(),
			reason: e.to_string(),
		})?;
		if !matches!(base_url.scheme(), "http" | "https") {
			return Err(ConfigError::InvalidBaseUrl {
				value: self.catalog.base_url.clone(),
				reason: format!("unsupported scheme {:?}", base_url.scheme()),
			});
		}

		let debounce_ms = self.search.debounce_ms;
		if debounce_ms == 0 || debounce_ms > MAX_DEBOUNCE_MS {
			return Err(ConfigError::InvalidDebounce {
				value: debounce_ms,
				max: MAX_DEBOUNCE_MS,
			});
		}

		let request_timeout = match self.catalog.request_timeout_ms {
			Some(0) => return Err(ConfigError::InvalidTimeout),
			Some(ms) => Some(Duration::from_millis(ms)),
			None => None,
		};

		Ok(Settings {
			base_url,
			request_timeout,
			debounce: Duration::from_millis(debounce_ms),
		})
	}
}

/// `<config dir>/lookahead/config.toml`, if the platform has a config dir.
pub fn default_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("lookahead").join("config.toml"))
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn empty_input_yields_defaults() {
		let config = Config::parse("").expect("empty config parses");
		assert_eq!(config, Config::default());

		let settings = config.settings().expect("defaults are valid");
		assert_eq!(settings.base_url.as_str(), "http://127.0.0.1:3000/");
		assert_eq!(settings.debounce, Duration::from_millis(300));
		assert_eq!(settings.request_timeout, None);
	}

	#[test]
	fn partial_sections_keep_other_defaults() {
		let config = Config::parse("[search]\ndebounce_ms = 150\n").expect("parses");
		assert_eq!(config.search.debounce_ms, 150);
		assert_eq!(config.catalog, CatalogConfig::default());
	}

	#[test]
	fn unknown_keys_are_rejected() {
		let result = Config::parse("[search]\ndelay = 1\n");
		assert!(matches!(result, Err(ConfigError::Toml(_))));
	}

	#[test]
	fn overrides_take_precedence() {
		let mut config = Config::parse("[catalog]\nbase_url = \"http://a.test\"\n").expect("parses");
		config.apply(&Overrides {
			base_url: Some("https://b.test/api/".into()),
			debounce_ms: Some(50),
		});

		let settings = config.settings().expect("valid");
		assert_eq!(settings.base_url.as_str(), "https://b.test/api/");
		assert_eq!(settings.debounce, Duration::from_millis(50));
	}

	#[test]
	fn invalid_values_are_reported() {
		let mut config = Config::default();
		config.search.debounce_ms = 0;
		assert!(matches!(config.settings(), Err(ConfigError::InvalidDebounce { value: 0, .. })));

		let mut config = Config::default();
		config.catalog.base_url = "ftp://files.test".into();
		assert!(matches!(config.settings(), Err(ConfigError::InvalidBaseUrl { .. })));

		let mut config = Config::default();
		config.catalog.base_url = "not a url".into();
		assert!(matches!(config.settings(), Err(ConfigError::InvalidBaseUrl { .. })));

		let mut config = Config::default();
		config.catalog.request_timeout_ms = Some(0);
		assert!(matches!(config.settings(), Err(ConfigError::InvalidTimeout)));
	}

	#[test]
	fn load_reads_file_and_reports_missing() {
		let dir = tempfile::tempdir().expect("must create tempdir");
		let path = dir.path().join("config.toml");
		std::fs::write(&path, "[catalog]\nrequest_timeout_ms = 2500\n").expect("must write config");

		let config = Config::discover(Some(&path)).expect("loads");
		assert_eq!(config.catalog.request_timeout_ms, Some(2500));

		let missing = dir.path().join("missing.toml");
		assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));
	}
}
