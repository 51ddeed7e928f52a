//! Flash message model

use crate::error::DecodeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Message categories
///
/// The discriminants are part of the binary format and must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum MessageType {
	#[default]
	Info = 0,
	Success = 1,
	Warning = 2,
	Error = 3,
}

impl MessageType {
	/// All categories in ordinal order
	pub const ALL: [MessageType; 4] = [
		MessageType::Info,
		MessageType::Success,
		MessageType::Warning,
		MessageType::Error,
	];

	/// Returns the tag used by templates and stylesheets
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_flash_core::MessageType;
	///
	/// assert_eq!(MessageType::Info.as_str(), "info");
	/// assert_eq!(MessageType::Error.as_str(), "error");
	/// ```
	pub fn as_str(&self) -> &'static str {
		match self {
			MessageType::Info => "info",
			MessageType::Success => "success",
			MessageType::Warning => "warning",
			MessageType::Error => "error",
		}
	}

	/// Returns the one-byte wire value
	pub fn as_u8(self) -> u8 {
		self as u8
	}
}

impl TryFrom<u8> for MessageType {
	type Error = DecodeError;

	fn try_from(value: u8) -> Result<Self, DecodeError> {
		match value {
			0 => Ok(MessageType::Info),
			1 => Ok(MessageType::Success),
			2 => Ok(MessageType::Warning),
			3 => Ok(MessageType::Error),
			other => Err(DecodeError::UnrecognizedMessageType(other)),
		}
	}
}

impl FromStr for MessageType {
	type Err = String;

	/// Parses a tag case-insensitively
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_flash_core::MessageType;
	///
	/// assert_eq!("SUCCESS".parse::<MessageType>(), Ok(MessageType::Success));
	/// assert!("debug".parse::<MessageType>().is_err());
	/// ```
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"info" => Ok(MessageType::Info),
			"success" => Ok(MessageType::Success),
			"warning" => Ok(MessageType::Warning),
			"error" => Ok(MessageType::Error),
			_ => Err(format!("unknown message type: {}", s)),
		}
	}
}

impl fmt::Display for MessageType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A single flash message
///
/// When `is_html` is set, `message` and `title` are rendered verbatim and
/// must not be escaped by the consumer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlashMessage {
	pub message: String,
	pub title: String,
	pub message_type: MessageType,
	pub is_html: bool,
}

impl FlashMessage {
	/// Create an informational plain-text message without a title
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_flash_core::{FlashMessage, MessageType};
	///
	/// let msg = FlashMessage::new("Saved");
	/// assert_eq!(msg.message_type, MessageType::Info);
	/// assert!(msg.title.is_empty());
	/// assert!(!msg.is_html);
	/// ```
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
			..Self::default()
		}
	}

	/// Create a message of the given type
	pub fn with_type(message: impl Into<String>, message_type: MessageType) -> Self {
		Self::new(message).with_message_type(message_type)
	}

	/// Create a message with every field set
	pub fn full(
		message: impl Into<String>,
		title: impl Into<String>,
		message_type: MessageType,
		is_html: bool,
	) -> Self {
		Self {
			message: message.into(),
			title: title.into(),
			message_type,
			is_html,
		}
	}

	/// Create an info message
	pub fn info(message: impl Into<String>) -> Self {
		Self::with_type(message, MessageType::Info)
	}

	/// Create a success message
	pub fn success(message: impl Into<String>) -> Self {
		Self::with_type(message, MessageType::Success)
	}

	/// Create a warning message
	pub fn warning(message: impl Into<String>) -> Self {
		Self::with_type(message, MessageType::Warning)
	}

	/// Create an error message
	pub fn error(message: impl Into<String>) -> Self {
		Self::with_type(message, MessageType::Error)
	}

	/// Set the title
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_flash_core::FlashMessage;
	///
	/// let msg = FlashMessage::error("Payment declined").with_title("Checkout");
	/// assert_eq!(msg.title, "Checkout");
	/// ```
	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = title.into();
		self
	}

	/// Set the message type
	pub fn with_message_type(mut self, message_type: MessageType) -> Self {
		self.message_type = message_type;
		self
	}

	/// Mark the message and title as trusted HTML
	pub fn with_html(mut self, is_html: bool) -> Self {
		self.is_html = is_html;
		self
	}

	/// Whether a title was given
	pub fn has_title(&self) -> bool {
		!self.title.is_empty()
	}
}
