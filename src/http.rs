//! Cookie transport and middleware module.
//!
//! # Examples
//!
//! ```rust,no_run
//! # #[cfg(feature = "http")]
//! use reinhardt_flash::http::{FlashMessageMiddleware, flash_messages};
//! ```

pub use reinhardt_flash_http::*;
