//! Configuration sources for layered settings
//!
//! Sources are merged in priority order:
//! environment variables > TOML file > defaults.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;

/// Separator between nesting levels in environment variable names.
pub const ENV_NESTING_SEPARATOR: &str = "__";

/// Trait for configuration sources
pub trait ConfigSource: Send + Sync {
	/// Load configuration from this source
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError>;

	/// Get the priority of this source (higher = more important)
	fn priority(&self) -> u8;

	/// Get a description of this source
	fn description(&self) -> String;
}

/// Error type for configuration sources
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Parse error: {0}")]
	Parse(String),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

/// Default values configuration source
#[derive(Debug, Clone, Default)]
pub struct DefaultSource {
	values: IndexMap<String, Value>,
}

impl DefaultSource {
	/// Create an empty default values source
	///
	/// # Examples
	///
	/// ```
	/// use schemabridge_conf::sources::DefaultSource;
	/// use serde_json::json;
	///
	/// let source = DefaultSource::new()
	///     .with_value("query", json!({ "max_field_depth": 4 }));
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
		self.values.insert(key.into(), value);
		self
	}

	/// Adds every top-level key of a JSON object.
	pub fn with_defaults(mut self, defaults: Map<String, Value>) -> Self {
		self.values.extend(defaults);
		self
	}
}

impl ConfigSource for DefaultSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		Ok(self.values.clone())
	}

	fn priority(&self) -> u8 {
		0
	}

	fn description(&self) -> String {
		"Default values".to_string()
	}
}

/// TOML file configuration source
#[derive(Debug, Clone)]
pub struct TomlFileSource {
	path: PathBuf,
}

impl TomlFileSource {
	/// Create a TOML file source. A missing file loads as empty.
	///
	/// # Examples
	///
	/// ```
	/// use schemabridge_conf::sources::TomlFileSource;
	///
	/// let source = TomlFileSource::new("schemabridge.toml");
	/// ```
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for TomlFileSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		if !self.path.exists() {
			tracing::debug!(path = %self.path.display(), "settings file not found, skipping");
			return Ok(IndexMap::new());
		}

		let content = fs::read_to_string(&self.path)?;
		let toml_value: toml::Table = toml::from_str(&content)?;

		// TOML to JSON through serde keeps nested tables as objects
		let json_value = serde_json::to_value(&toml_value)?;
		let map = json_value
			.as_object()
			.ok_or_else(|| SourceError::Parse("Expected table at root".to_string()))?;

		Ok(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
	}

	fn priority(&self) -> u8 {
		50
	}

	fn description(&self) -> String {
		format!("TOML file: {}", self.path.display())
	}
}

/// Environment variable configuration source
///
/// Variable names are lowercased after the prefix is removed, and `__`
/// separates nesting levels, so `SCHEMABRIDGE_QUERY__MAX_FIELD_DEPTH=8`
/// loads as `{ "query": { "max_field_depth": 8 } }`.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
	prefix: Option<String>,
	vars: Option<Vec<(String, String)>>,
}

impl EnvSource {
	/// Create a source reading the process environment
	///
	/// # Examples
	///
	/// ```
	/// use schemabridge_conf::sources::EnvSource;
	///
	/// let source = EnvSource::new().with_prefix("SCHEMABRIDGE_");
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Only load variables starting with `prefix`
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = Some(prefix.into());
		self
	}

	/// Read from the given pairs instead of the process environment
	pub fn with_vars<I, K, V>(mut self, vars: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.vars = Some(
			vars.into_iter()
				.map(|(key, value)| (key.into(), value.into()))
				.collect(),
		);
		self
	}

	fn vars(&self) -> Vec<(String, String)> {
		match &self.vars {
			Some(vars) => vars.clone(),
			None => std::env::vars().collect(),
		}
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		let mut config = IndexMap::new();

		for (key, value) in self.vars() {
			let clean_key = match &self.prefix {
				Some(prefix) => match key.strip_prefix(prefix.as_str()) {
					Some(stripped) => stripped,
					None => continue,
				},
				None => key.as_str(),
			};

			let path: Vec<String> = clean_key
				.split(ENV_NESTING_SEPARATOR)
				.map(str::to_lowercase)
				.collect();
			if path.iter().any(String::is_empty) {
				tracing::debug!(variable = %key, "ignoring environment variable with empty key segment");
				continue;
			}

			insert_path(&mut config, &path, parse_env_value(&value));
		}

		Ok(config)
	}

	fn priority(&self) -> u8 {
		100
	}

	fn description(&self) -> String {
		match &self.prefix {
			Some(prefix) => format!("Environment variables (prefix: {})", prefix),
			None => "Environment variables".to_string(),
		}
	}
}

/// Parses an environment value as an integer, float or boolean, falling back
/// to a string.
pub fn parse_env_value(value: &str) -> Value {
	let trimmed = value.trim();
	if let Ok(num) = trimmed.parse::<i64>() {
		Value::Number(num.into())
	} else if let Some(num) = trimmed
		.parse::<f64>()
		.ok()
		.and_then(serde_json::Number::from_f64)
	{
		Value::Number(num)
	} else {
		match trimmed.to_lowercase().as_str() {
			"true" | "yes" | "on" => Value::Bool(true),
			"false" | "no" | "off" => Value::Bool(false),
			_ => Value::String(value.to_string()),
		}
	}
}

fn insert_path(config: &mut IndexMap<String, Value>, path: &[String], value: Value) {
	let Some((first, rest)) = path.split_first() else {
		return;
	};
	if rest.is_empty() {
		config.insert(first.clone(), value);
		return;
	}

	let entry = config
		.entry(first.clone())
		.or_insert_with(|| Value::Object(Map::new()));
	insert_nested(entry, rest, value);
}

fn insert_nested(target: &mut Value, path: &[String], value: Value) {
	if !target.is_object() {
		*target = Value::Object(Map::new());
	}
	let (Value::Object(map), Some((first, rest))) = (target, path.split_first()) else {
		return;
	};
	if rest.is_empty() {
		map.insert(first.clone(), value);
		return;
	}

	let entry = map
		.entry(first.clone())
		.or_insert_with(|| Value::Object(Map::new()));
	insert_nested(entry, rest, value);
}
