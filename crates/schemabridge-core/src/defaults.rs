//! Defaults application
//!
//! Merges caller data over a schema's default (or example) values so the
//! result is complete enough to render, even when the data is partial or
//! invalid.

use crate::kind::SchemaKind;
use crate::metadata::Metadata;
use crate::node::SchemaNode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Options for [`SchemaNode::apply_defaults`]. Everything is off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplyDefaultsOptions {
	/// Log validation failures instead of ignoring them.
	pub log_errors: bool,
	/// Drop keys the schema does not declare, at every depth.
	pub strip_unknown: bool,
	/// Drop fields marked sensitive, at every depth.
	pub strip_sensitive: bool,
	/// Fill from example values instead of default values.
	pub apply_examples: bool,
}

impl ApplyDefaultsOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn log_errors(mut self, enabled: bool) -> Self {
		self.log_errors = enabled;
		self
	}

	pub fn strip_unknown(mut self, enabled: bool) -> Self {
		self.strip_unknown = enabled;
		self
	}

	pub fn strip_sensitive(mut self, enabled: bool) -> Self {
		self.strip_sensitive = enabled;
		self
	}

	pub fn apply_examples(mut self, enabled: bool) -> Self {
		self.apply_examples = enabled;
		self
	}

	fn strips(&self) -> bool {
		self.strip_unknown || self.strip_sensitive
	}
}

impl SchemaNode {
	/// Fills `data` with the defaults of this object schema.
	///
	/// Precedence, lowest first: default (or example) values, the raw caller
	/// data, then the validated output of the caller data. Validation output
	/// is skipped when filling from examples, and when validation fails.
	///
	/// Nodes that are not objects return `data` unchanged.
	///
	/// # Examples
	///
	/// ```
	/// use schemabridge_core::{ApplyDefaultsOptions, ObjectShape, Schema, SchemaNode};
	/// use serde_json::json;
	///
	/// let user = Schema::new(
	///     "User",
	///     ObjectShape::new()
	///         .field("name", SchemaNode::string())
	///         .field("role", SchemaNode::string().default_value("member"))
	///         .field("password", SchemaNode::string().sensitive()),
	/// )
	/// .unwrap();
	///
	/// let data = json!({ "name": "Ada", "password": "hunter2", "extra": 1 });
	/// let options = ApplyDefaultsOptions::new().strip_sensitive(true).strip_unknown(true);
	///
	/// assert_eq!(
	///     user.apply_defaults(&data, options),
	///     json!({ "role": "member", "name": "Ada" })
	/// );
	/// ```
	pub fn apply_defaults(&self, data: &Value, options: ApplyDefaultsOptions) -> Value {
		let meta = self.introspect_with(options.strips());
		let Some(fields) = meta.fields() else {
			tracing::debug!(kind = %meta.kind, "apply_defaults called on a non-object node");
			return data.clone();
		};
		let empty = Map::new();
		let provided = data.as_object().unwrap_or(&empty);
		let parsed = self.parse(data);

		let mut values: Map<String, Value> = fields
			.iter()
			.filter_map(|(key, field)| {
				let fill = if options.apply_examples {
					&field.example_value
				} else {
					&field.default_value
				};
				fill.clone().map(|value| (key.clone(), value))
			})
			.collect();
		values.extend(provided.clone());
		if !options.apply_examples {
			if let Ok(Value::Object(validated)) = &parsed {
				values.extend(validated.clone());
			}
		}

		if options.strips() {
			for (key, field) in fields {
				if let Some(value) = values.get_mut(key) {
					apply_nested(field, value, options);
				}
			}
		}

		if options.strip_sensitive {
			for (key, field) in fields {
				if field.is_sensitive {
					values.shift_remove(key);
				}
			}
		}

		if options.log_errors {
			if let Err(error) = &parsed {
				tracing::warn!(
					schema = meta.name.as_deref().unwrap_or("<unnamed>"),
					issues = %serde_json::to_string_pretty(error).unwrap_or_default(),
					"validation failed while applying defaults"
				);
			}
		}

		if options.strip_unknown {
			values.retain(|key, _| fields.contains_key(key));
		}

		Value::Object(values)
	}
}

/// Re-applies the options to a nested object value, or to every object in an
/// array of objects.
fn apply_nested(field: &Metadata, value: &mut Value, options: ApplyDefaultsOptions) {
	match field.kind {
		SchemaKind::Object if value.is_object() => {
			if let Some(schema) = field.raw_inner() {
				*value = schema.apply_defaults(value, options);
			}
		}
		SchemaKind::Array | SchemaKind::Set => {
			let Value::Array(items) = value else {
				return;
			};
			let Some(schema) = field
				.element()
				.filter(|element| element.kind == SchemaKind::Object)
				.and_then(Metadata::raw_inner)
			else {
				return;
			};
			for item in items.iter_mut().filter(|item| item.is_object()) {
				*item = schema.apply_defaults(item, options);
			}
		}
		_ => {}
	}
}
