//! Configuration for Reinhardt flash messages
//!
//! [`FlashSettings`] describes the flash cookie and the key used to sign it.
//! Settings can be built in code, read from `REINHARDT_FLASH_*` environment
//! variables, or loaded from a TOML or JSON file.
//!
//! ## Example
//!
//! ```rust
//! use reinhardt_flash_conf::FlashSettings;
//!
//! let settings = FlashSettings::default();
//! assert_eq!(settings.cookie_name, "flash_messages");
//! assert!(settings.validate().is_ok());
//! ```

pub mod settings;

pub use settings::{FlashSettings, SettingsError};
