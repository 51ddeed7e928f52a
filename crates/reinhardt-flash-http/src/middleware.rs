//! Flash message middleware
//!
//! [`FlashMessageMiddleware`] gives every request its own
//! [`CookieTransport`]. Handlers reach it through [`flash_messages`]:
//!
//! ```rust
//! use reinhardt_flash_http::{Handler, Request, Response, flash_messages};
//! use reinhardt_flash_core::FlashResult;
//! use async_trait::async_trait;
//! use bytes::Bytes;
//!
//! struct SaveProfile;
//!
//! #[async_trait]
//! impl Handler for SaveProfile {
//!     async fn handle(&self, request: Request) -> FlashResult<Response> {
//!         flash_messages(&request)?.queue("Profile saved")?;
//!         Ok(Response::new(Bytes::new()))
//!     }
//! }
//! ```

use crate::config::FlashCookieConfig;
use crate::cookie::CookieExchange;
use crate::transport::CookieTransport;
use async_trait::async_trait;
use bytes::Bytes;
#[cfg(feature = "conf")]
use reinhardt_flash_conf::{FlashSettings, SettingsError};
use reinhardt_flash_core::{FlashMessages, FlashResult};
use std::sync::Arc;

/// HTTP request handled by the middleware
pub type Request = hyper::Request<Bytes>;

/// HTTP response produced by handlers
pub type Response = hyper::Response<Bytes>;

/// Handler trait for processing requests.
#[async_trait]
pub trait Handler: Send + Sync {
	/// Handles an HTTP request and produces a response.
	async fn handle(&self, request: Request) -> FlashResult<Response>;
}

#[async_trait]
impl<T: Handler + ?Sized> Handler for Arc<T> {
	async fn handle(&self, request: Request) -> FlashResult<Response> {
		(**self).handle(request).await
	}
}

/// Middleware trait for request/response processing.
#[async_trait]
pub trait Middleware: Send + Sync {
	/// Processes a request through this middleware.
	///
	/// # Arguments
	///
	/// * `request` - The incoming HTTP request
	/// * `next` - The next handler in the chain to call
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> FlashResult<Response>;
}

/// Flash messages for the current request
///
/// Fails with `TransportUnavailable` when [`FlashMessageMiddleware`] did not
/// run for this request.
pub fn flash_messages(request: &Request) -> FlashResult<FlashMessages<CookieTransport>> {
	CookieTransport::from_request(request).map(FlashMessages::new)
}

/// Flash message middleware
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use reinhardt_flash_http::{
///     FlashMessageMiddleware, Handler, Middleware, Request, Response, flash_messages,
/// };
/// use reinhardt_flash_core::FlashResult;
/// use bytes::Bytes;
///
/// struct TestHandler;
///
/// #[async_trait::async_trait]
/// impl Handler for TestHandler {
///     async fn handle(&self, request: Request) -> FlashResult<Response> {
///         flash_messages(&request)?.queue("Saved")?;
///         Ok(Response::new(Bytes::from("OK")))
///     }
/// }
///
/// # tokio_test::block_on(async {
/// let middleware = FlashMessageMiddleware::with_defaults();
/// let request = Request::new(Bytes::new());
///
/// let response = middleware.process(request, Arc::new(TestHandler)).await.unwrap();
/// let cookie = response.headers().get(hyper::header::SET_COOKIE).unwrap();
/// assert!(cookie.to_str().unwrap().starts_with("flash_messages="));
/// # });
/// ```
pub struct FlashMessageMiddleware {
	config: Arc<FlashCookieConfig>,
}

impl FlashMessageMiddleware {
	/// Create a new flash message middleware
	pub fn new(config: FlashCookieConfig) -> Self {
		Self {
			config: Arc::new(config),
		}
	}

	/// Create with default configuration
	pub fn with_defaults() -> Self {
		Self::new(FlashCookieConfig::default())
	}

	/// Create from application settings
	#[cfg(feature = "conf")]
	pub fn from_settings(settings: &FlashSettings) -> Result<Self, SettingsError> {
		Ok(Self::new(FlashCookieConfig::from_settings(settings)?))
	}

	/// Get the cookie configuration
	pub fn config(&self) -> &FlashCookieConfig {
		&self.config
	}
}

impl Default for FlashMessageMiddleware {
	fn default() -> Self {
		Self::with_defaults()
	}
}

#[async_trait]
impl Middleware for FlashMessageMiddleware {
	async fn process(&self, mut request: Request, next: Arc<dyn Handler>) -> FlashResult<Response> {
		let exchange = Arc::new(CookieExchange::from_headers(request.headers()));
		let transport = CookieTransport::new(Arc::clone(&self.config), exchange);
		request.extensions_mut().insert(transport.clone());

		let mut response = next.handle(request).await?;

		transport.apply_to_headers(response.headers_mut())?;
		Ok(response)
	}
}
