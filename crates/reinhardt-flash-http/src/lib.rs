//! HTTP integration for Reinhardt flash messages
//!
//! The batch travels in a single cookie: encoded with the binary codec,
//! wrapped in URL-safe base64 and, when a key is configured, signed with
//! HMAC-SHA256. [`FlashMessageMiddleware`] parses the incoming cookie,
//! hands handlers a [`CookieTransport`] through the request extensions and
//! writes the resulting `Set-Cookie` header on the way out.
//!
//! ## Example
//!
//! ```rust
//! use reinhardt_flash_http::{CookieExchange, CookieTransport, FlashCookieConfig};
//! use reinhardt_flash_core::FlashMessages;
//! use std::sync::Arc;
//!
//! let exchange = Arc::new(CookieExchange::new());
//! let transport = CookieTransport::new(Arc::new(FlashCookieConfig::default()), exchange);
//! let flash = FlashMessages::new(transport.clone());
//!
//! flash.queue("Saved").unwrap();
//! let header = transport.set_cookie_header().unwrap();
//! assert!(header.starts_with("flash_messages="));
//! ```

pub mod config;
pub mod cookie;
pub mod middleware;
pub mod signing;
pub mod transport;

pub use config::{FlashCookieConfig, SameSite};
pub use cookie::{CookieExchange, OutgoingCookie};
pub use middleware::{
	FlashMessageMiddleware, Handler, Middleware, Request, Response, flash_messages,
};
pub use signing::{CookieSigner, SignatureError};
pub use transport::{CookieTransport, CookieValueError};
