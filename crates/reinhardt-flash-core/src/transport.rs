//! Flash message transports
//!
//! A transport carries the encoded batch across the request boundary. The
//! cookie transport in `reinhardt-flash-http` is the usual choice;
//! [`MemoryTransport`] keeps the batch in process memory.

use crate::codec;
use crate::error::FlashResult;
use crate::message::FlashMessage;
use parking_lot::Mutex;
use std::sync::Arc;

/// Trait for flash message transports
///
/// Stored data that fails to decode is treated as untrusted input: reads log
/// it and return an empty batch. `Err` is reserved for a missing or broken
/// backing store.
pub trait FlashTransport: Send + Sync {
	/// Persist `messages`, replacing whatever was stored before
	fn queue(&self, messages: &[FlashMessage]) -> FlashResult<()>;

	/// Read the stored batch without consuming it
	fn get_queued(&self) -> FlashResult<Vec<FlashMessage>>;

	/// Read the stored batch and clear it
	///
	/// Calling this with nothing stored returns an empty batch and leaves the
	/// store untouched.
	fn retrieve(&self) -> FlashResult<Vec<FlashMessage>>;
}

impl<T: FlashTransport + ?Sized> FlashTransport for &T {
	fn queue(&self, messages: &[FlashMessage]) -> FlashResult<()> {
		(**self).queue(messages)
	}

	fn get_queued(&self) -> FlashResult<Vec<FlashMessage>> {
		(**self).get_queued()
	}

	fn retrieve(&self) -> FlashResult<Vec<FlashMessage>> {
		(**self).retrieve()
	}
}

impl<T: FlashTransport + ?Sized> FlashTransport for Arc<T> {
	fn queue(&self, messages: &[FlashMessage]) -> FlashResult<()> {
		(**self).queue(messages)
	}

	fn get_queued(&self) -> FlashResult<Vec<FlashMessage>> {
		(**self).get_queued()
	}

	fn retrieve(&self) -> FlashResult<Vec<FlashMessage>> {
		(**self).retrieve()
	}
}

impl<T: FlashTransport + ?Sized> FlashTransport for Box<T> {
	fn queue(&self, messages: &[FlashMessage]) -> FlashResult<()> {
		(**self).queue(messages)
	}

	fn get_queued(&self) -> FlashResult<Vec<FlashMessage>> {
		(**self).get_queued()
	}

	fn retrieve(&self) -> FlashResult<Vec<FlashMessage>> {
		(**self).retrieve()
	}
}

/// In-memory transport
///
/// Holds the encoded batch exactly as a cookie would, so reads go through the
/// same decoder. Useful in tests and for callers without an HTTP exchange.
///
/// # Examples
///
/// ```
/// use reinhardt_flash_core::{FlashMessage, FlashTransport, MemoryTransport};
///
/// let transport = MemoryTransport::new();
/// transport.queue(&[FlashMessage::new("Hello")]).unwrap();
/// assert_eq!(transport.get_queued().unwrap().len(), 1);
/// assert_eq!(transport.retrieve().unwrap().len(), 1);
/// assert!(transport.retrieve().unwrap().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct MemoryTransport {
	data: Mutex<Option<Vec<u8>>>,
}

impl MemoryTransport {
	/// Create an empty transport
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a transport preloaded with raw encoded bytes
	pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
		Self {
			data: Mutex::new(Some(data.into())),
		}
	}

	/// Raw bytes currently stored
	pub fn raw(&self) -> Option<Vec<u8>> {
		self.data.lock().clone()
	}

	/// Whether anything is stored
	pub fn is_empty(&self) -> bool {
		self.data.lock().is_none()
	}

	fn decode_or_discard(data: &[u8]) -> Vec<FlashMessage> {
		codec::deserialize(data).unwrap_or_else(|e| {
			tracing::warn!(error = %e, "Discarding undecodable flash messages");
			Vec::new()
		})
	}
}

impl FlashTransport for MemoryTransport {
	fn queue(&self, messages: &[FlashMessage]) -> FlashResult<()> {
		let encoded = codec::serialize(messages)?;
		*self.data.lock() = Some(encoded);
		Ok(())
	}

	fn get_queued(&self) -> FlashResult<Vec<FlashMessage>> {
		let data = self.data.lock();
		Ok(data
			.as_deref()
			.map(Self::decode_or_discard)
			.unwrap_or_default())
	}

	fn retrieve(&self) -> FlashResult<Vec<FlashMessage>> {
		let taken = self.data.lock().take();
		Ok(taken
			.as_deref()
			.map(Self::decode_or_discard)
			.unwrap_or_default())
	}
}
