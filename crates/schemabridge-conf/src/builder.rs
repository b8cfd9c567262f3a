//! Settings builder merging configuration sources by priority

use crate::sources::{ConfigSource, SourceError};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Errors raised while building settings.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("Source error in {description}: {error}")]
	Source {
		description: String,
		#[source]
		error: SourceError,
	},

	#[error("Key not found: {0}")]
	NotFound(String),

	#[error("Parse error for '{key}': {error}")]
	Parse {
		key: String,
		#[source]
		error: serde_json::Error,
	},
}

/// Collects sources and merges them, higher priority last.
///
/// # Examples
///
/// ```
/// use schemabridge_conf::builder::SettingsBuilder;
/// use schemabridge_conf::sources::{DefaultSource, EnvSource};
/// use serde_json::json;
///
/// let merged = SettingsBuilder::new()
///     .add_source(DefaultSource::new().with_value("query", json!({ "max_field_depth": 5 })))
///     .add_source(EnvSource::new().with_prefix("SB_").with_vars([("SB_QUERY__MAX_FIELD_DEPTH", "7")]))
///     .build()
///     .unwrap();
///
/// assert_eq!(merged.get::<usize>("query.max_field_depth").unwrap(), 7);
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl SettingsBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_source(mut self, source: impl ConfigSource + 'static) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	/// Loads every source and deep merges them in priority order.
	///
	/// Sources with equal priority are applied in the order they were added.
	pub fn build(mut self) -> SettingsResult<MergedSettings> {
		self.sources.sort_by_key(|source| source.priority());

		let mut values = IndexMap::new();
		for source in &self.sources {
			let loaded = source.load().map_err(|error| SettingsError::Source {
				description: source.description(),
				error,
			})?;
			tracing::debug!(
				source = %source.description(),
				keys = loaded.len(),
				"merging settings source"
			);
			for (key, value) in loaded {
				match values.get_mut(&key) {
					Some(existing) => deep_merge(existing, value),
					None => {
						values.insert(key, value);
					}
				}
			}
		}

		Ok(MergedSettings { values })
	}
}

/// Merges `overlay` into `base`. Objects merge key by key; anything else is
/// replaced.
pub fn deep_merge(base: &mut Value, overlay: Value) {
	match (base, overlay) {
		(Value::Object(base_map), Value::Object(overlay_map)) => {
			for (key, value) in overlay_map {
				match base_map.get_mut(&key) {
					Some(existing) => deep_merge(existing, value),
					None => {
						base_map.insert(key, value);
					}
				}
			}
		}
		(base, overlay) => *base = overlay,
	}
}

/// The merged result of all sources.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedSettings {
	values: IndexMap<String, Value>,
}

impl MergedSettings {
	/// Raw value at a dotted key such as `query.max_field_depth`.
	pub fn get_raw(&self, key: &str) -> Option<&Value> {
		let mut segments = key.split('.');
		let first = segments.next()?;
		segments.try_fold(self.values.get(first)?, |current, segment| {
			current.as_object()?.get(segment)
		})
	}

	/// Deserializes the value at a dotted key.
	pub fn get<T: DeserializeOwned>(&self, key: &str) -> SettingsResult<T> {
		let value = self
			.get_raw(key)
			.ok_or_else(|| SettingsError::NotFound(key.to_string()))?;
		serde_json::from_value(value.clone()).map_err(|error| SettingsError::Parse {
			key: key.to_string(),
			error,
		})
	}

	/// Deserializes the whole merged tree.
	pub fn into_typed<T: DeserializeOwned>(self) -> SettingsResult<T> {
		let object = self.values.into_iter().collect::<serde_json::Map<_, _>>();
		serde_json::from_value(Value::Object(object)).map_err(|error| SettingsError::Parse {
			key: "<root>".to_string(),
			error,
		})
	}

	pub fn as_map(&self) -> &IndexMap<String, Value> {
		&self.values
	}
}
