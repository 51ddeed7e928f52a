//! Flash message facade
//!
//! [`FlashMessages`] is bound to one transport for its whole life. There is
//! no process-wide transport: swap backends by constructing the facade with
//! a different transport.
//!
//! ## Concurrency
//!
//! Queueing reads the stored batch, appends and writes the batch back. Two
//! `queue*` calls racing on the same exchange can lose a message, so callers
//! must issue them one after another within a request.

use crate::error::FlashResult;
use crate::message::{FlashMessage, MessageType};
use crate::transport::FlashTransport;

/// Queues and consumes flash messages through a transport
///
/// # Examples
///
/// ```
/// use reinhardt_flash_core::{FlashMessages, MemoryTransport, MessageType};
///
/// let flash = FlashMessages::new(MemoryTransport::new());
/// flash.queue_with("Saved successfully", "", MessageType::Success, false).unwrap();
///
/// let pending = flash.get_queued().unwrap();
/// assert_eq!(pending[0].message_type, MessageType::Success);
///
/// let shown = flash.retrieve().unwrap();
/// assert_eq!(shown, pending);
/// assert!(flash.retrieve().unwrap().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct FlashMessages<T> {
	transport: T,
}

impl<T: FlashTransport> FlashMessages<T> {
	/// Create a facade over `transport`
	pub fn new(transport: T) -> Self {
		Self { transport }
	}

	/// The bound transport
	pub fn transport(&self) -> &T {
		&self.transport
	}

	/// Unwrap the bound transport
	pub fn into_transport(self) -> T {
		self.transport
	}

	/// Queue an informational plain-text message
	pub fn queue(&self, message: impl Into<String>) -> FlashResult<()> {
		self.queue_message(FlashMessage::new(message))
	}

	/// Queue a plain-text message of the given type
	pub fn queue_with_type(
		&self,
		message: impl Into<String>,
		message_type: MessageType,
	) -> FlashResult<()> {
		self.queue_message(FlashMessage::with_type(message, message_type))
	}

	/// Queue a message with every field set
	pub fn queue_with(
		&self,
		message: impl Into<String>,
		title: impl Into<String>,
		message_type: MessageType,
		is_html: bool,
	) -> FlashResult<()> {
		self.queue_message(FlashMessage::full(message, title, message_type, is_html))
	}

	/// Append `message` to the pending batch
	pub fn queue_message(&self, message: FlashMessage) -> FlashResult<()> {
		let mut messages = self.transport.get_queued()?;
		let message_type = message.message_type;
		messages.push(message);
		tracing::debug!(
			pending = messages.len(),
			message_type = %message_type,
			"Queued flash message"
		);
		self.transport.queue(&messages)
	}

	/// Pending messages, left in place
	pub fn get_queued(&self) -> FlashResult<Vec<FlashMessage>> {
		self.transport.get_queued()
	}

	/// Pending messages, cleared from the transport
	pub fn retrieve(&self) -> FlashResult<Vec<FlashMessage>> {
		self.transport.retrieve()
	}
}
