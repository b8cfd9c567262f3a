//! Typed schemabridge settings

use crate::builder::{SettingsBuilder, SettingsResult};
use crate::sources::{DefaultSource, EnvSource, TomlFileSource};
use schemabridge_core::{ApplyDefaultsOptions, SchemaNode, SourceFlavor};
use schemabridge_graphql::{DEFAULT_MAX_FIELD_DEPTH, DataBridgeBuilder, RenderQueryOptions};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix of environment variables read by [`BridgeSettings::load`].
pub const ENV_PREFIX: &str = "SCHEMABRIDGE_";

/// Default settings file name.
pub const SETTINGS_FILE: &str = "schemabridge.toml";

/// Query synthesis settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySettings {
	pub max_field_depth: usize,
	pub log_warnings: bool,
}

impl Default for QuerySettings {
	fn default() -> Self {
		Self {
			max_field_depth: DEFAULT_MAX_FIELD_DEPTH,
			log_warnings: true,
		}
	}
}

impl QuerySettings {
	/// Renderer options for a query resolver using these settings.
	pub fn render_options(
		&self,
		resolver_name: impl Into<String>,
		input_schema: impl Into<SchemaNode>,
		output_schema: impl Into<SchemaNode>,
	) -> RenderQueryOptions {
		RenderQueryOptions::new(resolver_name, input_schema, output_schema)
			.max_field_depth(self.max_field_depth)
			.log_warnings(self.log_warnings)
	}

	/// Applies the depth limit and warning switch to a bridge builder.
	pub fn configure_bridge(&self, builder: DataBridgeBuilder) -> DataBridgeBuilder {
		builder
			.max_field_depth(self.max_field_depth)
			.log_warnings(self.log_warnings)
	}
}

/// Defaults application settings. Everything is off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsSettings {
	pub log_errors: bool,
	pub strip_unknown: bool,
	pub strip_sensitive: bool,
	pub apply_examples: bool,
}

impl From<DefaultsSettings> for ApplyDefaultsOptions {
	fn from(settings: DefaultsSettings) -> Self {
		ApplyDefaultsOptions::new()
			.log_errors(settings.log_errors)
			.strip_unknown(settings.strip_unknown)
			.strip_sensitive(settings.strip_sensitive)
			.apply_examples(settings.apply_examples)
	}
}

/// Source regeneration settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenSettings {
	pub flavor: SourceFlavor,
}

/// All schemabridge settings.
///
/// # Examples
///
/// ```
/// use schemabridge_conf::BridgeSettings;
/// use schemabridge_core::SourceFlavor;
///
/// let settings = BridgeSettings::default();
/// assert_eq!(settings.query.max_field_depth, 5);
/// assert!(settings.query.log_warnings);
/// assert!(!settings.defaults.strip_sensitive);
/// assert_eq!(settings.codegen.flavor, SourceFlavor::Named);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeSettings {
	pub query: QuerySettings,
	pub defaults: DefaultsSettings,
	pub codegen: CodegenSettings,
}

impl BridgeSettings {
	/// Loads defaults, then `toml_path` (if it exists), then `SCHEMABRIDGE_*`
	/// environment variables.
	pub fn load(toml_path: impl AsRef<Path>) -> SettingsResult<Self> {
		Self::builder(toml_path)
			.add_source(EnvSource::new().with_prefix(ENV_PREFIX))
			.build()?
			.into_typed()
	}

	/// A builder holding the defaults and the TOML file source, for callers
	/// adding their own sources.
	pub fn builder(toml_path: impl AsRef<Path>) -> SettingsBuilder {
		let defaults = match serde_json::to_value(Self::default()) {
			Ok(serde_json::Value::Object(map)) => map,
			_ => serde_json::Map::new(),
		};
		SettingsBuilder::new()
			.add_source(DefaultSource::new().with_defaults(defaults))
			.add_source(TomlFileSource::new(toml_path.as_ref()))
	}

	pub fn apply_defaults_options(&self) -> ApplyDefaultsOptions {
		self.defaults.into()
	}
}
