//! HMAC signing for cookie values
//!
//! A signed value is `<value>.<hex HMAC-SHA256(value)>`. The payload alphabet
//! (URL-safe base64) never contains `.`, so the last dot always separates the
//! signature.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

const SEPARATOR: char = '.';

/// Minimum length of a signing key in bytes
pub const MIN_KEY_LEN: usize = 32;

/// Errors raised when verifying a signed value
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignatureError {
	/// The value carries no signature.
	#[error("Signature missing")]
	Missing,

	/// The signature is not valid hex.
	#[error("Signature malformed")]
	Malformed,

	/// The signature does not match the value.
	#[error("Signature mismatch")]
	Mismatch,

	/// The signing key is shorter than [`MIN_KEY_LEN`].
	#[error("Signing key too short: {len} bytes, at least {min} required")]
	KeyTooShort { len: usize, min: usize },
}

/// Signs and verifies cookie values with HMAC-SHA256
///
/// # Examples
///
/// ```
/// use reinhardt_flash_http::CookieSigner;
///
/// let signer = CookieSigner::new(b"0123456789abcdef0123456789abcdef").unwrap();
/// let signed = signer.sign("payload");
/// assert_eq!(signer.unsign(&signed), Ok("payload"));
/// assert!(signer.unsign("payload.00").is_err());
/// ```
#[derive(Clone)]
pub struct CookieSigner {
	key: Vec<u8>,
}

impl CookieSigner {
	/// Create a signer from a secret key
	///
	/// Keys shorter than [`MIN_KEY_LEN`] bytes are rejected.
	pub fn new(key: impl AsRef<[u8]>) -> Result<Self, SignatureError> {
		let key = key.as_ref();
		if key.len() < MIN_KEY_LEN {
			return Err(SignatureError::KeyTooShort {
				len: key.len(),
				min: MIN_KEY_LEN,
			});
		}
		Ok(Self { key: key.to_vec() })
	}

	/// Append a signature to `value`
	pub fn sign(&self, value: &str) -> String {
		let mac = self.mac(value.as_bytes()).finalize().into_bytes();
		format!("{}{}{}", value, SEPARATOR, hex::encode(mac))
	}

	/// Verify `signed` and return the value without its signature
	pub fn unsign<'a>(&self, signed: &'a str) -> Result<&'a str, SignatureError> {
		let (value, signature) = signed
			.rsplit_once(SEPARATOR)
			.ok_or(SignatureError::Missing)?;
		let provided = hex::decode(signature).map_err(|_| SignatureError::Malformed)?;
		self.mac(value.as_bytes())
			.verify_slice(&provided)
			.map_err(|_| SignatureError::Mismatch)?;
		Ok(value)
	}

	fn mac(&self, message: &[u8]) -> HmacSha256 {
		let mut mac = HmacSha256::new_from_slice(&self.key).expect("HMAC accepts any key length");
		mac.update(message);
		mac
	}
}

impl fmt::Debug for CookieSigner {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CookieSigner")
			.field("key", &"<redacted>")
			.finish()
	}
}
