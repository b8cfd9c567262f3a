//! Component documentation props

use crate::defaults::ApplyDefaultsOptions;
use crate::metadata::Metadata;
use crate::schema::Schema;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Everything a component docs page needs to describe and preview a
/// component whose props are described by a schema.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentationProps {
	pub component_name: String,
	#[serde(skip)]
	pub prop_schema: Schema,
	/// Introspected metadata of every prop, in declaration order.
	pub prop_meta: IndexMap<String, Metadata>,
	/// Example props completed with each prop's example value.
	pub preview_props: Value,
}

impl Schema {
	/// Builds docs props for `component_name` from this props schema.
	///
	/// # Examples
	///
	/// ```
	/// use schemabridge_core::{ObjectShape, Schema, SchemaNode};
	/// use serde_json::json;
	///
	/// let props = Schema::new(
	///     "ButtonProps",
	///     ObjectShape::new()
	///         .field("label", SchemaNode::string().example("Press me"))
	///         .field("disabled", SchemaNode::boolean().default_value(false).example(true)),
	/// )
	/// .unwrap();
	///
	/// let docs = props.documentation_props("Button", &json!({ "label": "Go" }));
	/// assert_eq!(docs.preview_props, json!({ "label": "Go", "disabled": true }));
	/// ```
	pub fn documentation_props(&self, component_name: impl Into<String>, example_props: &Value) -> DocumentationProps {
		let prop_meta = self.introspect().fields().cloned().unwrap_or_default();
		DocumentationProps {
			component_name: component_name.into(),
			prop_schema: self.clone(),
			prop_meta,
			preview_props: self.apply_defaults(example_props, ApplyDefaultsOptions::new().apply_examples(true)),
		}
	}
}
