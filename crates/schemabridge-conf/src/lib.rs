//! Layered settings for schemabridge
//!
//! Settings are merged from defaults, an optional TOML file and environment
//! variables, highest priority last, and deserialized into [`BridgeSettings`].
//!
//! ```toml
//! [query]
//! max_field_depth = 4
//! log_warnings = false
//!
//! [defaults]
//! strip_sensitive = true
//!
//! [codegen]
//! flavor = "plain"
//! ```
//!
//! The same keys can be set from the environment, e.g.
//! `SCHEMABRIDGE_QUERY__MAX_FIELD_DEPTH=4`.

pub mod builder;
pub mod settings;
pub mod sources;

pub use builder::{MergedSettings, SettingsBuilder, SettingsError, SettingsResult, deep_merge};
pub use settings::{
	BridgeSettings, CodegenSettings, DefaultsSettings, ENV_PREFIX, QuerySettings, SETTINGS_FILE,
};
pub use sources::{ConfigSource, DefaultSource, EnvSource, SourceError, TomlFileSource};
