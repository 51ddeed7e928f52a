//! Flash messages for Reinhardt
//!
//! Flash messages are one-time notifications queued while handling one
//! request and shown on a later one, usually after a redirect.
//!
//! ## Features
//!
//! - **Message model**: [`FlashMessage`] with a title, a [`MessageType`] and an HTML flag
//! - **Binary codec**: compact, versioned-by-layout encoding of a message batch
//! - **Pluggable transports**: anything implementing [`FlashTransport`]
//! - **Facade**: [`FlashMessages`] queues, peeks and consumes through an injected transport
//!
//! HTTP cookie integration lives in `reinhardt-flash-http`.
//!
//! ## Example
//!
//! ```rust
//! use reinhardt_flash_core::{FlashMessages, MemoryTransport, MessageType};
//!
//! let flash = FlashMessages::new(MemoryTransport::new());
//! flash.queue("Profile updated").unwrap();
//! flash.queue_with_type("Disk almost full", MessageType::Warning).unwrap();
//!
//! let messages = flash.retrieve().unwrap();
//! assert_eq!(messages.len(), 2);
//! assert!(flash.retrieve().unwrap().is_empty());
//! ```

pub mod codec;
pub mod error;
pub mod message;
pub mod store;
pub mod transport;

pub use codec::{deserialize, serialize};
pub use error::{DecodeError, EncodeError, FlashError, FlashResult};
pub use message::{FlashMessage, MessageType};
pub use store::FlashMessages;
pub use transport::{FlashTransport, MemoryTransport};

/// Re-export commonly used types
pub mod prelude {
	pub use crate::error::*;
	pub use crate::message::*;
	pub use crate::store::*;
	pub use crate::transport::*;
}
