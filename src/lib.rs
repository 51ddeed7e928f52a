//! # Reinhardt Flash
//!
//! One-time notifications that survive exactly one redirect.
//!
//! A handler queues messages ("Saved successfully"), the response carries
//! them to the client in a cookie, and the next request consumes them. Once
//! retrieved, a message is gone.
//!
//! ## Feature Flags
//!
//! The message model, binary codec and transport abstraction are always
//! available; `default-features = false` builds nothing else.
//!
//! - `http` - Cookie transport, signing and [`http::FlashMessageMiddleware`]
//! - `conf` - [`conf::FlashSettings`] loaded from the environment or a file;
//!   together with `http`, adds the `from_settings` constructors
//! - `full` (default) - Everything above
//!
//! ## Quick Example
//!
//! ```rust
//! use reinhardt_flash::prelude::*;
//!
//! let flash = FlashMessages::new(MemoryTransport::new());
//! flash.queue_with_type("Saved successfully", MessageType::Success).unwrap();
//!
//! let pending = flash.get_queued().unwrap();
//! assert_eq!(pending[0].message, "Saved successfully");
//!
//! let consumed = flash.retrieve().unwrap();
//! assert_eq!(consumed, pending);
//! assert!(flash.retrieve().unwrap().is_empty());
//! ```

#[cfg(feature = "conf")]
pub mod conf;
#[cfg(feature = "http")]
pub mod http;

pub use reinhardt_flash_core::*;

/// Re-export commonly used types
pub mod prelude {
	pub use reinhardt_flash_core::prelude::*;

	#[cfg(feature = "conf")]
	pub use reinhardt_flash_conf::FlashSettings;

	#[cfg(feature = "http")]
	pub use reinhardt_flash_http::{
		CookieTransport, FlashCookieConfig, FlashMessageMiddleware, Handler, Middleware,
		flash_messages,
	};
}
