//! Flash cookie configuration

use crate::signing::{CookieSigner, SignatureError};
#[cfg(feature = "conf")]
use reinhardt_flash_conf::{FlashSettings, SettingsError};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Expiry date sent when removing a cookie
const EPOCH_EXPIRES: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// SameSite cookie attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
	Strict,
	Lax,
	None,
}

impl SameSite {
	pub fn as_str(&self) -> &'static str {
		match self {
			SameSite::Strict => "Strict",
			SameSite::Lax => "Lax",
			SameSite::None => "None",
		}
	}
}

impl FromStr for SameSite {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"strict" => Ok(SameSite::Strict),
			"lax" => Ok(SameSite::Lax),
			"none" => Ok(SameSite::None),
			_ => Err(format!("invalid SameSite value: {}", s)),
		}
	}
}

impl fmt::Display for SameSite {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Flash cookie configuration
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct FlashCookieConfig {
	/// Cookie name
	pub cookie_name: String,
	/// Path
	pub path: String,
	/// Domain
	pub domain: Option<String>,
	/// HTTPS-only cookie
	pub secure: bool,
	/// HttpOnly flag
	pub http_only: bool,
	/// SameSite attribute
	pub same_site: Option<SameSite>,
	/// Max-Age; a browser-session cookie when absent
	pub max_age: Option<Duration>,
	/// Signs cookie values when present
	pub signer: Option<CookieSigner>,
}

impl FlashCookieConfig {
	/// Create a new configuration
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_flash_http::{FlashCookieConfig, SameSite};
	///
	/// let config = FlashCookieConfig::new("notices");
	/// assert_eq!(config.cookie_name, "notices");
	/// assert_eq!(config.path, "/");
	/// assert_eq!(config.same_site, Some(SameSite::Lax));
	/// assert!(config.signer.is_none());
	/// ```
	pub fn new(cookie_name: impl Into<String>) -> Self {
		Self {
			cookie_name: cookie_name.into(),
			path: "/".to_string(),
			domain: None,
			secure: true,
			http_only: true,
			same_site: Some(SameSite::Lax),
			max_age: None,
			signer: None,
		}
	}

	/// Enable or disable the Secure flag
	pub fn with_secure(mut self, secure: bool) -> Self {
		self.secure = secure;
		self
	}

	/// Set HttpOnly flag
	pub fn with_http_only(mut self, http_only: bool) -> Self {
		self.http_only = http_only;
		self
	}

	/// Set SameSite attribute
	pub fn with_same_site(mut self, same_site: Option<SameSite>) -> Self {
		self.same_site = same_site;
		self
	}

	/// Set domain
	pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
		self.domain = Some(domain.into());
		self
	}

	/// Set path
	pub fn with_path(mut self, path: impl Into<String>) -> Self {
		self.path = path.into();
		self
	}

	/// Set Max-Age
	pub fn with_max_age(mut self, max_age: Duration) -> Self {
		self.max_age = Some(max_age);
		self
	}

	/// Sign cookie values with `key`
	///
	/// The key must be at least [`MIN_KEY_LEN`](crate::signing::MIN_KEY_LEN)
	/// bytes long.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_flash_http::FlashCookieConfig;
	///
	/// let config = FlashCookieConfig::default()
	///     .with_secret_key(b"0123456789abcdef0123456789abcdef")
	///     .unwrap();
	/// assert!(config.signer.is_some());
	///
	/// assert!(FlashCookieConfig::default().with_secret_key(b"short").is_err());
	/// ```
	pub fn with_secret_key(mut self, key: impl AsRef<[u8]>) -> Result<Self, SignatureError> {
		self.signer = Some(CookieSigner::new(key)?);
		Ok(self)
	}

	/// Create a configuration from validated [`FlashSettings`]
	///
	/// Settings without a secret key produce unsigned cookies; outside debug
	/// mode this is logged as a warning.
	#[cfg(feature = "conf")]
	pub fn from_settings(settings: &FlashSettings) -> Result<Self, SettingsError> {
		settings.validate()?;

		let same_site = settings
			.cookie_same_site
			.as_deref()
			.map(SameSite::from_str)
			.transpose()
			.map_err(SettingsError::ValidationError)?;

		if !settings.is_signed() && !settings.debug {
			tracing::warn!(
				cookie = %settings.cookie_name,
				"Flash cookie is unsigned; configure a secret key to detect tampering"
			);
		}

		let signer = settings
			.secret_key
			.as_deref()
			.map(CookieSigner::new)
			.transpose()
			.map_err(|e| SettingsError::ValidationError(e.to_string()))?;

		Ok(Self {
			cookie_name: settings.cookie_name.clone(),
			path: settings.cookie_path.clone(),
			domain: settings.cookie_domain.clone(),
			secure: settings.cookie_secure,
			http_only: settings.cookie_http_only,
			same_site,
			max_age: settings.cookie_max_age.map(Duration::from_secs),
			signer,
		})
	}

	/// Build the Set-Cookie header that stores `value`
	pub fn build_set_cookie(&self, value: &str) -> String {
		let mut parts = vec![format!("{}={}", self.cookie_name, value)];
		self.push_attributes(&mut parts);
		if let Some(max_age) = self.max_age {
			parts.push(format!("Max-Age={}", max_age.as_secs()));
		}
		parts.join("; ")
	}

	/// Build the Set-Cookie header that expires the cookie
	pub fn build_removal_cookie(&self) -> String {
		let mut parts = vec![format!("{}=", self.cookie_name)];
		self.push_attributes(&mut parts);
		parts.push("Max-Age=0".to_string());
		parts.push(format!("Expires={}", EPOCH_EXPIRES));
		parts.join("; ")
	}

	fn push_attributes(&self, parts: &mut Vec<String>) {
		parts.push(format!("Path={}", self.path));

		if let Some(domain) = &self.domain {
			parts.push(format!("Domain={}", domain));
		}

		if self.http_only {
			parts.push("HttpOnly".to_string());
		}

		if self.secure {
			parts.push("Secure".to_string());
		}

		if let Some(same_site) = self.same_site {
			parts.push(format!("SameSite={}", same_site));
		}
	}
}

impl Default for FlashCookieConfig {
	fn default() -> Self {
		Self::new("flash_messages")
	}
}
