//! Layered settings.
//!
//! # Examples
//!
//! ```rust,no_run
//! # #[cfg(feature = "conf")]
//! use schemabridge::conf::BridgeSettings;
//!
//! # #[cfg(feature = "conf")]
//! let settings = BridgeSettings::load("schemabridge.toml").unwrap();
//! ```

#[cfg(feature = "conf")]
pub use schemabridge_conf::*;
