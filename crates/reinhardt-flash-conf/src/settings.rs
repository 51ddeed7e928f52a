//! Flash message settings
//!
//! Modelled on the framework settings: every field has a default, so a
//! settings file only needs the keys it changes.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Minimum length of a signing key
pub const MIN_SECRET_KEY_LEN: usize = 32;

const ENV_PREFIX: &str = "REINHARDT_FLASH_";

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
	/// The settings file could not be read.
	#[error("File error: {0}")]
	FileError(String),

	/// The settings file or an environment value could not be parsed.
	#[error("Parse error: {0}")]
	ParseError(String),

	/// The settings file has an unknown extension.
	#[error("Unsupported format: {0}")]
	UnsupportedFormat(String),

	/// A setting has an invalid value.
	#[error("Validation error: {0}")]
	ValidationError(String),
}

/// Flash message settings
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashSettings {
	/// Debug mode; relaxes production checks
	#[serde(default)]
	pub debug: bool,

	/// Key for signing the flash cookie; unsigned when absent
	#[serde(default)]
	pub secret_key: Option<String>,

	/// Cookie name
	#[serde(default = "default_cookie_name")]
	pub cookie_name: String,

	/// Cookie path
	#[serde(default = "default_cookie_path")]
	pub cookie_path: String,

	/// Cookie domain
	#[serde(default)]
	pub cookie_domain: Option<String>,

	/// HTTPS-only cookie
	#[serde(default)]
	pub cookie_secure: bool,

	/// HttpOnly flag
	#[serde(default = "default_true")]
	pub cookie_http_only: bool,

	/// SameSite attribute (`Strict`, `Lax` or `None`)
	#[serde(default = "default_same_site")]
	pub cookie_same_site: Option<String>,

	/// Max-Age in seconds; a browser-session cookie when absent
	#[serde(default)]
	pub cookie_max_age: Option<u64>,
}

fn default_cookie_name() -> String {
	"flash_messages".to_string()
}

fn default_cookie_path() -> String {
	"/".to_string()
}

fn default_true() -> bool {
	true
}

fn default_same_site() -> Option<String> {
	Some("Lax".to_string())
}

impl Default for FlashSettings {
	fn default() -> Self {
		Self {
			debug: false,
			secret_key: None,
			cookie_name: default_cookie_name(),
			cookie_path: default_cookie_path(),
			cookie_domain: None,
			cookie_secure: false,
			cookie_http_only: true,
			cookie_same_site: default_same_site(),
			cookie_max_age: None,
		}
	}
}

impl FlashSettings {
	/// Create new settings with defaults
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the signing key
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_flash_conf::FlashSettings;
	///
	/// let settings = FlashSettings::new().with_secret_key("0123456789abcdef0123456789abcdef");
	/// assert!(settings.is_signed());
	/// ```
	pub fn with_secret_key(mut self, key: impl Into<String>) -> Self {
		self.secret_key = Some(key.into());
		self
	}

	/// Set the cookie name
	pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
		self.cookie_name = name.into();
		self
	}

	/// Enable or disable debug mode
	pub fn with_debug(mut self, debug: bool) -> Self {
		self.debug = debug;
		self
	}

	/// Whether cookies will carry a signature
	pub fn is_signed(&self) -> bool {
		self.secret_key.is_some()
	}

	/// Validate settings
	pub fn validate(&self) -> Result<(), SettingsError> {
		if self.cookie_name.is_empty() {
			return Err(SettingsError::ValidationError(
				"cookie_name must not be empty".to_string(),
			));
		}

		if self
			.cookie_name
			.chars()
			.any(|c| c.is_whitespace() || c.is_control() || "=;,\"\\".contains(c))
		{
			return Err(SettingsError::ValidationError(format!(
				"cookie_name contains invalid characters: {}",
				self.cookie_name
			)));
		}

		check_attribute("cookie_path", &self.cookie_path)?;
		if let Some(domain) = &self.cookie_domain {
			check_attribute("cookie_domain", domain)?;
		}

		if let Some(key) = &self.secret_key
			&& key.len() < MIN_SECRET_KEY_LEN
		{
			return Err(SettingsError::ValidationError(format!(
				"secret_key must be at least {} characters",
				MIN_SECRET_KEY_LEN
			)));
		}

		if let Some(same_site) = &self.cookie_same_site {
			match same_site.to_ascii_lowercase().as_str() {
				"strict" | "lax" => {}
				"none" if self.cookie_secure => {}
				"none" => {
					return Err(SettingsError::ValidationError(
						"cookie_same_site None requires cookie_secure".to_string(),
					));
				}
				_ => {
					return Err(SettingsError::ValidationError(format!(
						"cookie_same_site must be Strict, Lax or None, got {}",
						same_site
					)));
				}
			}
		}

		Ok(())
	}

	/// Load settings from environment variables
	///
	/// Reads `REINHARDT_FLASH_DEBUG`, `REINHARDT_FLASH_SECRET_KEY` (falling
	/// back to `REINHARDT_SECRET_KEY`), `REINHARDT_FLASH_COOKIE_NAME`,
	/// `REINHARDT_FLASH_COOKIE_PATH`, `REINHARDT_FLASH_COOKIE_DOMAIN`,
	/// `REINHARDT_FLASH_COOKIE_SECURE`, `REINHARDT_FLASH_COOKIE_HTTPONLY`,
	/// `REINHARDT_FLASH_COOKIE_SAMESITE` and `REINHARDT_FLASH_COOKIE_MAX_AGE`.
	pub fn from_env() -> Result<Self, SettingsError> {
		let mut settings = Self::default();

		if let Some(debug) = env_var("DEBUG") {
			settings.debug = parse_bool(&debug);
		}

		if let Some(secret) = env_var("SECRET_KEY").or_else(|| std::env::var("REINHARDT_SECRET_KEY").ok())
		{
			settings.secret_key = Some(secret);
		}

		if let Some(name) = env_var("COOKIE_NAME") {
			settings.cookie_name = name;
		}

		if let Some(path) = env_var("COOKIE_PATH") {
			settings.cookie_path = path;
		}

		if let Some(domain) = env_var("COOKIE_DOMAIN") {
			settings.cookie_domain = Some(domain).filter(|d| !d.is_empty());
		}

		if let Some(secure) = env_var("COOKIE_SECURE") {
			settings.cookie_secure = parse_bool(&secure);
		}

		if let Some(http_only) = env_var("COOKIE_HTTPONLY") {
			settings.cookie_http_only = parse_bool(&http_only);
		}

		if let Some(same_site) = env_var("COOKIE_SAMESITE") {
			settings.cookie_same_site = Some(same_site).filter(|s| !s.is_empty());
		}

		if let Some(max_age) = env_var("COOKIE_MAX_AGE") {
			let seconds = max_age.parse::<u64>().map_err(|e| {
				SettingsError::ParseError(format!(
					"{}COOKIE_MAX_AGE must be a number of seconds: {}",
					ENV_PREFIX, e
				))
			})?;
			settings.cookie_max_age = Some(seconds);
		}

		Ok(settings)
	}

	/// Load settings from a `.toml` or `.json` file
	pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
		let path = path.into();
		let contents = std::fs::read_to_string(&path).map_err(|e| {
			SettingsError::FileError(format!("Failed to read {}: {}", path.display(), e))
		})?;

		match path.extension().and_then(|s| s.to_str()) {
			Some("toml") => toml::from_str(&contents)
				.map_err(|e| SettingsError::ParseError(format!("TOML parse error: {}", e))),
			Some("json") => serde_json::from_str(&contents)
				.map_err(|e| SettingsError::ParseError(format!("JSON parse error: {}", e))),
			_ => Err(SettingsError::UnsupportedFormat(
				"Supported formats: .toml, .json".to_string(),
			)),
		}
	}
}

/// Attribute values are written verbatim into `Set-Cookie`
fn check_attribute(field: &str, value: &str) -> Result<(), SettingsError> {
	if value.chars().any(|c| c.is_control() || c == ';') {
		return Err(SettingsError::ValidationError(format!(
			"{} contains invalid characters: {:?}",
			field, value
		)));
	}
	Ok(())
}

fn env_var(suffix: &str) -> Option<String> {
	std::env::var(format!("{}{}", ENV_PREFIX, suffix)).ok()
}

fn parse_bool(value: &str) -> bool {
	matches!(value.to_ascii_lowercase().as_str(), "true" | "1" | "yes" | "on")
}
