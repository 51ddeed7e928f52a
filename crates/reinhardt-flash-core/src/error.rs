//! Error types for flash message handling.

use thiserror::Error;

/// Errors raised while decoding a serialized message batch.
///
/// Decoding is all-or-nothing: any of these aborts the whole batch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
	/// Input ended before a field could be read.
	#[error("Truncated input: need {needed} bytes for {context}, {remaining} remaining")]
	Truncated {
		context: &'static str,
		needed: usize,
		remaining: usize,
	},

	/// The message count is negative.
	#[error("Negative message count: {0}")]
	NegativeCount(i32),

	/// The message count cannot possibly fit in the remaining input.
	#[error("Message count {count} exceeds what {remaining} remaining bytes can hold")]
	CountExceedsInput { count: usize, remaining: usize },

	/// A string length prefix is longer than five bytes or exceeds `i32::MAX`.
	#[error("Invalid length prefix for {context}")]
	InvalidLengthPrefix { context: &'static str },

	/// String bytes are not valid UTF-8.
	#[error("Invalid UTF-8 in {context}")]
	InvalidUtf8 { context: &'static str },

	/// The type byte is outside the known categories.
	#[error("Unrecognized message type: {0}")]
	UnrecognizedMessageType(u8),

	/// Bytes remain after the declared number of messages.
	#[error("{0} trailing bytes after last message")]
	TrailingBytes(usize),
}

/// Errors raised while encoding a message batch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
	/// A count or string length does not fit the 32-bit signed wire field.
	#[error("{what} too large to encode: {len}")]
	TooLarge { what: &'static str, len: usize },
}

/// Errors surfaced by the flash message facade and transports.
#[derive(Debug, Error)]
pub enum FlashError {
	/// Stored data could not be decoded.
	#[error("Decode error: {0}")]
	Decode(#[from] DecodeError),

	/// A batch could not be encoded.
	#[error("Encode error: {0}")]
	Encode(#[from] EncodeError),

	/// The backing store is missing from the current context.
	#[error("Flash transport unavailable: {0}")]
	TransportUnavailable(String),

	/// The backing store rejected an operation.
	#[error("Flash transport error: {0}")]
	Transport(String),
}

/// Result type alias for flash message operations.
pub type FlashResult<T> = Result<T, FlashError>;
