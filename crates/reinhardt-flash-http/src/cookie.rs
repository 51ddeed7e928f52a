//! Per-request cookie state
//!
//! A [`CookieExchange`] holds the cookies a request arrived with and the
//! changes the response should carry. Reads see earlier writes from the same
//! request, so queueing twice and then peeking returns both messages.

use hyper::HeaderMap;
use hyper::header::COOKIE;
use parking_lot::Mutex;
use std::collections::HashMap;

/// A pending change to a cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutgoingCookie {
	/// Set the cookie to this value
	Set(String),
	/// Expire the cookie on the client
	Removed,
}

/// Cookie state of one request/response pair
#[derive(Debug, Default)]
pub struct CookieExchange {
	incoming: HashMap<String, String>,
	outgoing: Mutex<Vec<(String, OutgoingCookie)>>,
}

impl CookieExchange {
	/// Create an exchange with no incoming cookies
	pub fn new() -> Self {
		Self::default()
	}

	/// Create an exchange from request headers
	///
	/// Every `Cookie` header is read; when a name repeats, the first value
	/// wins.
	///
	/// # Examples
	///
	/// ```
	/// use hyper::HeaderMap;
	/// use hyper::header::{COOKIE, HeaderValue};
	/// use reinhardt_flash_http::CookieExchange;
	///
	/// let mut headers = HeaderMap::new();
	/// headers.insert(COOKIE, HeaderValue::from_static("sessionid=abc; theme=dark"));
	///
	/// let exchange = CookieExchange::from_headers(&headers);
	/// assert_eq!(exchange.incoming("theme"), Some("dark"));
	/// assert_eq!(exchange.incoming("missing"), None);
	/// ```
	pub fn from_headers(headers: &HeaderMap) -> Self {
		let mut incoming = HashMap::new();
		for value in headers.get_all(COOKIE) {
			let Ok(cookie_str) = value.to_str() else {
				continue;
			};
			for (name, value) in parse_cookie_header(cookie_str) {
				incoming.entry(name).or_insert(value);
			}
		}
		Self {
			incoming,
			outgoing: Mutex::new(Vec::new()),
		}
	}

	/// Add an incoming cookie
	pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.incoming.insert(name.into(), value.into());
		self
	}

	/// Value the request arrived with, ignoring changes
	pub fn incoming(&self, name: &str) -> Option<&str> {
		self.incoming.get(name).map(String::as_str)
	}

	/// Current value, taking changes made during this request into account
	pub fn get(&self, name: &str) -> Option<String> {
		match self.outgoing(name) {
			Some(OutgoingCookie::Set(value)) => Some(value),
			Some(OutgoingCookie::Removed) => None,
			None => self.incoming.get(name).cloned(),
		}
	}

	/// Set a cookie on the response
	pub fn set(&self, name: &str, value: impl Into<String>) {
		self.record(name, OutgoingCookie::Set(value.into()));
	}

	/// Expire a cookie on the response
	pub fn remove(&self, name: &str) {
		self.record(name, OutgoingCookie::Removed);
	}

	/// Pending change for `name`
	pub fn outgoing(&self, name: &str) -> Option<OutgoingCookie> {
		self.outgoing
			.lock()
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, change)| change.clone())
	}

	/// All pending changes in the order they were first made
	pub fn changes(&self) -> Vec<(String, OutgoingCookie)> {
		self.outgoing.lock().clone()
	}

	fn record(&self, name: &str, change: OutgoingCookie) {
		let mut outgoing = self.outgoing.lock();
		match outgoing.iter_mut().find(|(n, _)| n == name) {
			Some((_, existing)) => *existing = change,
			None => outgoing.push((name.to_string(), change)),
		}
	}
}

/// Split a `Cookie` header value into name/value pairs
///
/// Surrounding double quotes are stripped from values; pairs without `=` or
/// with an empty name are skipped.
pub fn parse_cookie_header(header: &str) -> impl Iterator<Item = (String, String)> + '_ {
	header.split(';').filter_map(|pair| {
		let (name, value) = pair.trim().split_once('=')?;
		let name = name.trim();
		if name.is_empty() {
			return None;
		}
		let value = value.trim();
		let value = value
			.strip_prefix('"')
			.and_then(|v| v.strip_suffix('"'))
			.unwrap_or(value);
		Some((name.to_string(), value.to_string()))
	})
}
