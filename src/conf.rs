//! Settings module.
//!
//! # Examples
//!
//! ```rust,no_run
//! # #[cfg(feature = "conf")]
//! use reinhardt_flash::conf::FlashSettings;
//! ```

pub use reinhardt_flash_conf::*;
