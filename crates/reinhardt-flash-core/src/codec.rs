//! Binary encoding of flash message batches
//!
//! Layout (little-endian):
//!
//! ```text
//! i32                      message count N
//! N times:
//!   u8                     is_html (0 = false, anything else = true)
//!   varint + UTF-8 bytes   message
//!   varint + UTF-8 bytes   title
//!   u8                     message type ordinal
//! ```
//!
//! String lengths are unsigned 7-bit groups, least significant first, with
//! the high bit marking continuation (at most five bytes, value at most
//! `i32::MAX`).

use crate::error::{DecodeError, EncodeError};
use crate::message::{FlashMessage, MessageType};
use bytes::{Buf, BufMut};

const COUNT_LEN: usize = 4;

/// Smallest possible record: flag, two empty strings, type.
const MIN_RECORD_LEN: usize = 4;

const MAX_PREFIX_LEN: usize = 5;

/// Serializes a batch of messages
///
/// # Examples
///
/// ```
/// use reinhardt_flash_core::{serialize, FlashMessage};
///
/// assert_eq!(serialize(&[]).unwrap(), vec![0, 0, 0, 0]);
///
/// let bytes = serialize(&[FlashMessage::new("Hi")]).unwrap();
/// assert_eq!(bytes, vec![1, 0, 0, 0, 0, 2, b'H', b'i', 0, 0]);
/// ```
pub fn serialize(messages: &[FlashMessage]) -> Result<Vec<u8>, EncodeError> {
	let count = i32::try_from(messages.len()).map_err(|_| EncodeError::TooLarge {
		what: "message count",
		len: messages.len(),
	})?;

	let capacity = messages.iter().fold(COUNT_LEN, |acc, m| {
		acc + MIN_RECORD_LEN + m.message.len() + m.title.len() + 2 * (MAX_PREFIX_LEN - 1)
	});
	let mut buf = Vec::with_capacity(capacity);

	buf.put_i32_le(count);
	for message in messages {
		buf.put_u8(u8::from(message.is_html));
		put_string(&mut buf, &message.message, "message")?;
		put_string(&mut buf, &message.title, "title")?;
		buf.put_u8(message.message_type.as_u8());
	}

	Ok(buf)
}

/// Deserializes a batch produced by [`serialize`]
///
/// An empty slice is an empty batch. Anything malformed is an error; no
/// partial batch is ever returned.
///
/// # Examples
///
/// ```
/// use reinhardt_flash_core::{deserialize, serialize, FlashMessage, MessageType};
///
/// assert!(deserialize(&[]).unwrap().is_empty());
///
/// let batch = vec![FlashMessage::with_type("Saved", MessageType::Success)];
/// let bytes = serialize(&batch).unwrap();
/// assert_eq!(deserialize(&bytes).unwrap(), batch);
/// assert!(deserialize(&bytes[..bytes.len() - 1]).is_err());
/// ```
pub fn deserialize(data: &[u8]) -> Result<Vec<FlashMessage>, DecodeError> {
	if data.is_empty() {
		return Ok(Vec::new());
	}

	let mut buf = data;

	ensure(buf.remaining(), COUNT_LEN, "message count")?;
	let count = buf.get_i32_le();
	if count < 0 {
		return Err(DecodeError::NegativeCount(count));
	}
	let count = count as usize;
	if count > buf.remaining() / MIN_RECORD_LEN {
		return Err(DecodeError::CountExceedsInput {
			count,
			remaining: buf.remaining(),
		});
	}

	let mut messages = Vec::with_capacity(count);
	for _ in 0..count {
		ensure(buf.remaining(), 1, "html flag")?;
		let is_html = buf.get_u8() != 0;
		let message = get_string(&mut buf, "message")?;
		let title = get_string(&mut buf, "title")?;
		ensure(buf.remaining(), 1, "message type")?;
		let message_type = MessageType::try_from(buf.get_u8())?;

		messages.push(FlashMessage {
			message,
			title,
			message_type,
			is_html,
		});
	}

	if buf.has_remaining() {
		return Err(DecodeError::TrailingBytes(buf.remaining()));
	}

	Ok(messages)
}

fn ensure(remaining: usize, needed: usize, context: &'static str) -> Result<(), DecodeError> {
	if remaining < needed {
		return Err(DecodeError::Truncated {
			context,
			needed,
			remaining,
		});
	}
	Ok(())
}

fn put_string(buf: &mut Vec<u8>, value: &str, what: &'static str) -> Result<(), EncodeError> {
	let len = u32::try_from(value.len())
		.ok()
		.filter(|len| *len <= i32::MAX as u32)
		.ok_or(EncodeError::TooLarge {
			what,
			len: value.len(),
		})?;
	put_length_prefix(buf, len);
	buf.put_slice(value.as_bytes());
	Ok(())
}

fn put_length_prefix(buf: &mut impl BufMut, mut value: u32) {
	while value >= 0x80 {
		buf.put_u8((value & 0x7F) as u8 | 0x80);
		value >>= 7;
	}
	buf.put_u8(value as u8);
}

fn get_length_prefix(buf: &mut &[u8], context: &'static str) -> Result<usize, DecodeError> {
	let mut value: u32 = 0;
	for index in 0..MAX_PREFIX_LEN {
		ensure(buf.remaining(), 1, context)?;
		let byte = buf.get_u8();
		// Fifth byte carries the top four bits; anything above 0x07 overflows i32.
		if index == MAX_PREFIX_LEN - 1 && byte > 0x07 {
			return Err(DecodeError::InvalidLengthPrefix { context });
		}
		value |= u32::from(byte & 0x7F) << (7 * index);
		if byte & 0x80 == 0 {
			return Ok(value as usize);
		}
	}
	Err(DecodeError::InvalidLengthPrefix { context })
}

fn get_string(buf: &mut &[u8], context: &'static str) -> Result<String, DecodeError> {
	let len = get_length_prefix(buf, context)?;
	ensure(buf.remaining(), len, context)?;
	let (bytes, rest) = buf.split_at(len);
	let value = std::str::from_utf8(bytes)
		.map_err(|_| DecodeError::InvalidUtf8 { context })?
		.to_owned();
	*buf = rest;
	Ok(value)
}
