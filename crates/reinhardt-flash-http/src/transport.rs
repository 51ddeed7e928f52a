//! Cookie-backed flash transport

use crate::config::FlashCookieConfig;
use crate::cookie::{CookieExchange, OutgoingCookie};
use crate::middleware::Request;
use crate::signing::SignatureError;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hyper::HeaderMap;
use hyper::header::{HeaderValue, SET_COOKIE};
use reinhardt_flash_core::{
	DecodeError, FlashError, FlashMessage, FlashResult, FlashTransport, codec,
};
use std::sync::Arc;
use thiserror::Error;

/// Browsers commonly drop cookies larger than this
pub const COOKIE_SIZE_WARNING: usize = 4096;

/// Reasons a flash cookie value is rejected
#[derive(Debug, Error)]
pub enum CookieValueError {
	#[error("Invalid signature: {0}")]
	Signature(#[from] SignatureError),

	#[error("Invalid base64: {0}")]
	Base64(#[from] base64::DecodeError),

	#[error("Invalid batch: {0}")]
	Decode(#[from] DecodeError),
}

/// Flash transport storing the batch in a cookie
///
/// Cheap to clone; clones share the same exchange.
///
/// # Examples
///
/// ```
/// use reinhardt_flash_http::{CookieExchange, CookieTransport, FlashCookieConfig};
/// use reinhardt_flash_core::{FlashMessage, FlashTransport};
/// use std::sync::Arc;
///
/// let config = Arc::new(FlashCookieConfig::default());
///
/// // Request 1 queues a message
/// let first = CookieTransport::new(config.clone(), Arc::new(CookieExchange::new()));
/// first.queue(&[FlashMessage::success("Saved")]).unwrap();
/// let value = first.encoded_value().unwrap();
///
/// // Request 2 arrives with the cookie and consumes it
/// let exchange = CookieExchange::new().with_cookie("flash_messages", value);
/// let second = CookieTransport::new(config, Arc::new(exchange));
/// assert_eq!(second.retrieve().unwrap()[0].message, "Saved");
/// assert!(second.set_cookie_header().unwrap().contains("Max-Age=0"));
/// ```
#[derive(Debug, Clone)]
pub struct CookieTransport {
	config: Arc<FlashCookieConfig>,
	exchange: Arc<CookieExchange>,
}

impl CookieTransport {
	/// Bind a configuration to the cookie state of one request
	pub fn new(config: Arc<FlashCookieConfig>, exchange: Arc<CookieExchange>) -> Self {
		Self { config, exchange }
	}

	/// Fetch the transport installed by
	/// [`FlashMessageMiddleware`](crate::FlashMessageMiddleware)
	pub fn from_request(request: &Request) -> FlashResult<Self> {
		request.extensions().get::<Self>().cloned().ok_or_else(|| {
			FlashError::TransportUnavailable(
				"no flash cookie exchange on this request; is FlashMessageMiddleware installed?"
					.to_string(),
			)
		})
	}

	pub fn config(&self) -> &FlashCookieConfig {
		&self.config
	}

	pub fn exchange(&self) -> &Arc<CookieExchange> {
		&self.exchange
	}

	/// Encode a batch into a cookie value
	pub fn encode(&self, messages: &[FlashMessage]) -> FlashResult<String> {
		let encoded = URL_SAFE_NO_PAD.encode(codec::serialize(messages)?);
		Ok(match &self.config.signer {
			Some(signer) => signer.sign(&encoded),
			None => encoded,
		})
	}

	/// Decode a cookie value into a batch
	pub fn decode(&self, value: &str) -> Result<Vec<FlashMessage>, CookieValueError> {
		let payload = match &self.config.signer {
			Some(signer) => signer.unsign(value)?,
			None => value,
		};
		let bytes = URL_SAFE_NO_PAD.decode(payload)?;
		Ok(codec::deserialize(&bytes)?)
	}

	/// Cookie value currently held for this request, if any
	pub fn encoded_value(&self) -> Option<String> {
		self.exchange.get(&self.config.cookie_name)
	}

	/// Set-Cookie header for the pending change, if any
	pub fn set_cookie_header(&self) -> Option<String> {
		match self.exchange.outgoing(&self.config.cookie_name)? {
			OutgoingCookie::Set(value) => Some(self.config.build_set_cookie(&value)),
			OutgoingCookie::Removed => Some(self.config.build_removal_cookie()),
		}
	}

	/// Append the pending Set-Cookie header to `headers`
	pub fn apply_to_headers(&self, headers: &mut HeaderMap) -> FlashResult<()> {
		if let Some(cookie) = self.set_cookie_header() {
			let value = HeaderValue::from_str(&cookie).map_err(|e| {
				FlashError::Transport(format!("Failed to create cookie header: {}", e))
			})?;
			headers.append(SET_COOKIE, value);
		}
		Ok(())
	}

	fn decode_or_discard(&self, value: &str) -> Vec<FlashMessage> {
		self.decode(value).unwrap_or_else(|e| {
			tracing::warn!(
				cookie = %self.config.cookie_name,
				error = %e,
				"Discarding invalid flash cookie"
			);
			Vec::new()
		})
	}
}

impl FlashTransport for CookieTransport {
	fn queue(&self, messages: &[FlashMessage]) -> FlashResult<()> {
		let value = self.encode(messages)?;
		if value.len() > COOKIE_SIZE_WARNING {
			tracing::warn!(
				cookie = %self.config.cookie_name,
				size = value.len(),
				"Flash cookie exceeds {} bytes and may be dropped by the client",
				COOKIE_SIZE_WARNING
			);
		}
		self.exchange.set(&self.config.cookie_name, value);
		tracing::debug!(
			cookie = %self.config.cookie_name,
			count = messages.len(),
			"Queued flash messages"
		);
		Ok(())
	}

	fn get_queued(&self) -> FlashResult<Vec<FlashMessage>> {
		Ok(self
			.encoded_value()
			.map(|value| self.decode_or_discard(&value))
			.unwrap_or_default())
	}

	fn retrieve(&self) -> FlashResult<Vec<FlashMessage>> {
		let Some(value) = self.encoded_value() else {
			return Ok(Vec::new());
		};
		let messages = self.decode_or_discard(&value);
		self.exchange.remove(&self.config.cookie_name);
		tracing::debug!(
			cookie = %self.config.cookie_name,
			count = messages.len(),
			"Retrieved flash messages"
		);
		Ok(messages)
	}
}
