//! Introspected metadata model
//!
//! [`Metadata`] is the flattened description of one schema node. It is a
//! plain value: every call to [`introspect`](crate::introspect) produces a
//! fresh tree, and nothing in it points back at live schema nodes unless raw
//! node retention was requested.

use crate::kind::{BaseType, SchemaKind};
use crate::node::SchemaNode;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

fn is_false(value: &bool) -> bool {
	!*value
}

/// Serialized names of the built-in [`Metadata`] attributes.
///
/// Annotations may not use these keys, since they share one JSON object with
/// the built-in attributes.
pub const RESERVED_KEYS: &[&str] = &[
	"kind",
	"baseType",
	"name",
	"isOptional",
	"isNullable",
	"defaultValue",
	"exampleValue",
	"description",
	"minLength",
	"maxLength",
	"exactLength",
	"minValue",
	"maxValue",
	"isInt",
	"isEmail",
	"isURL",
	"isUUID",
	"isBase64",
	"isDate",
	"isDatetime",
	"isTime",
	"isIP",
	"literalValue",
	"literalType",
	"schema",
	"isSensitive",
	"isID",
	"isIndex",
	"isUnique",
	"isSparse",
];

/// Whether `key` names a built-in metadata attribute.
pub fn is_reserved_key(key: &str) -> bool {
	RESERVED_KEYS.contains(&key)
}

/// Runtime category of a literal node's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteralType {
	String,
	Number,
	Boolean,
	Null,
	Object,
}

impl LiteralType {
	pub fn of(value: &Value) -> Self {
		match value {
			Value::String(_) => LiteralType::String,
			Value::Number(_) => LiteralType::Number,
			Value::Bool(_) => LiteralType::Boolean,
			Value::Null => LiteralType::Null,
			Value::Array(_) | Value::Object(_) => LiteralType::Object,
		}
	}

	/// Base type a literal of this category narrows to, if any.
	pub fn narrowed_base_type(self) -> Option<BaseType> {
		match self {
			LiteralType::String => Some(BaseType::String),
			LiteralType::Number => Some(BaseType::Number),
			LiteralType::Boolean => Some(BaseType::Boolean),
			LiteralType::Null | LiteralType::Object => None,
		}
	}
}

/// Live nodes retained by [`introspect_with`](crate::SchemaNode::introspect_with).
#[derive(Debug, Clone)]
pub struct RawNodes {
	/// The node introspection started from, wrappers included.
	pub outer: SchemaNode,
	/// The node left once every wrapping layer is peeled off.
	pub inner: SchemaNode,
}

impl PartialEq for RawNodes {
	fn eq(&self, other: &Self) -> bool {
		self.outer.ptr_eq(&other.outer) && self.inner.ptr_eq(&other.inner)
	}
}

/// Metadata of the nodes nested inside a composite node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NestedMetadata {
	/// Object fields, in declaration order.
	Fields(IndexMap<String, Metadata>),
	/// Element of an array, set or record, or the resolved type of a promise.
	Element(Box<Metadata>),
	/// Tuple items or union alternatives, in order.
	Sequence(Vec<Metadata>),
	Intersection {
		left: Box<Metadata>,
		right: Box<Metadata>,
	},
	Discriminated {
		discriminator: String,
		types: Vec<Metadata>,
	},
	KeyValue {
		key: Box<Metadata>,
		value: Box<Metadata>,
	},
	Signature {
		input: Box<Metadata>,
		output: Box<Metadata>,
	},
	/// Enum options keyed by name.
	Entries(IndexMap<String, Value>),
}

/// Flattened description of one schema node.
///
/// Serializes to camelCase JSON with unset attributes left out.
///
/// # Examples
///
/// ```
/// use schemabridge_core::{BaseType, SchemaNode};
///
/// let meta = SchemaNode::literal("admin").optional().introspect();
/// assert_eq!(meta.base_type, BaseType::String);
///
/// let json = serde_json::to_value(&meta).unwrap();
/// assert_eq!(json["kind"], "Literal");
/// assert_eq!(json["isOptional"], true);
/// assert!(json.get("isNullable").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
	pub kind: SchemaKind,
	pub base_type: BaseType,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(skip_serializing_if = "is_false")]
	pub is_optional: bool,
	#[serde(skip_serializing_if = "is_false")]
	pub is_nullable: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub default_value: Option<Value>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub example_value: Option<Value>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,

	// Bounds
	#[serde(skip_serializing_if = "Option::is_none")]
	pub min_length: Option<usize>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max_length: Option<usize>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub exact_length: Option<usize>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub min_value: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max_value: Option<f64>,

	// Formats
	#[serde(skip_serializing_if = "is_false")]
	pub is_int: bool,
	#[serde(skip_serializing_if = "is_false")]
	pub is_email: bool,
	#[serde(rename = "isURL", skip_serializing_if = "is_false")]
	pub is_url: bool,
	#[serde(rename = "isUUID", skip_serializing_if = "is_false")]
	pub is_uuid: bool,
	#[serde(skip_serializing_if = "is_false")]
	pub is_base64: bool,
	#[serde(skip_serializing_if = "is_false")]
	pub is_date: bool,
	#[serde(skip_serializing_if = "is_false")]
	pub is_datetime: bool,
	#[serde(skip_serializing_if = "is_false")]
	pub is_time: bool,
	#[serde(rename = "isIP", skip_serializing_if = "is_false")]
	pub is_ip: bool,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub literal_value: Option<Value>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub literal_type: Option<LiteralType>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub schema: Option<NestedMetadata>,

	#[serde(skip_serializing_if = "is_false")]
	pub is_sensitive: bool,
	#[serde(rename = "isID", skip_serializing_if = "is_false")]
	pub is_id: bool,
	#[serde(skip_serializing_if = "is_false")]
	pub is_index: bool,
	#[serde(skip_serializing_if = "is_false")]
	pub is_unique: bool,
	#[serde(skip_serializing_if = "is_false")]
	pub is_sparse: bool,

	/// Free-form annotations attached with [`SchemaNode::annotate`]. Keys in
	/// [`RESERVED_KEYS`] are never serialized.
	#[serde(flatten, serialize_with = "serialize_annotations")]
	pub extra: IndexMap<String, Value>,

	#[serde(skip)]
	pub raw: Option<RawNodes>,
}

fn serialize_annotations<S>(extra: &IndexMap<String, Value>, serializer: S) -> Result<S::Ok, S::Error>
where
	S: serde::Serializer,
{
	serializer.collect_map(extra.iter().filter(|(key, _)| !is_reserved_key(key)))
}

fn overlay_option<T>(target: &mut Option<T>, outer: Option<T>) {
	if outer.is_some() {
		*target = outer;
	}
}

impl Metadata {
	/// Applies an outer fragment on top of this one.
	///
	/// Attributes the outer fragment defines win; flags accumulate.
	pub fn overlay(&mut self, outer: Metadata) {
		overlay_option(&mut self.name, outer.name);
		self.is_optional |= outer.is_optional;
		self.is_nullable |= outer.is_nullable;
		overlay_option(&mut self.default_value, outer.default_value);
		overlay_option(&mut self.example_value, outer.example_value);
		overlay_option(&mut self.description, outer.description);
		overlay_option(&mut self.min_length, outer.min_length);
		overlay_option(&mut self.max_length, outer.max_length);
		overlay_option(&mut self.exact_length, outer.exact_length);
		overlay_option(&mut self.min_value, outer.min_value);
		overlay_option(&mut self.max_value, outer.max_value);
		self.is_int |= outer.is_int;
		self.is_email |= outer.is_email;
		self.is_url |= outer.is_url;
		self.is_uuid |= outer.is_uuid;
		self.is_base64 |= outer.is_base64;
		self.is_date |= outer.is_date;
		self.is_datetime |= outer.is_datetime;
		self.is_time |= outer.is_time;
		self.is_ip |= outer.is_ip;
		overlay_option(&mut self.literal_value, outer.literal_value);
		overlay_option(&mut self.literal_type, outer.literal_type);
		overlay_option(&mut self.schema, outer.schema);
		self.is_sensitive |= outer.is_sensitive;
		self.is_id |= outer.is_id;
		self.is_index |= outer.is_index;
		self.is_unique |= outer.is_unique;
		self.is_sparse |= outer.is_sparse;
		self.extra.extend(outer.extra);
		overlay_option(&mut self.raw, outer.raw);
	}

	/// Neither optional nor nullable.
	pub fn is_required(&self) -> bool {
		!self.is_optional && !self.is_nullable
	}

	/// Per-field metadata of an object node.
	pub fn fields(&self) -> Option<&IndexMap<String, Metadata>> {
		match &self.schema {
			Some(NestedMetadata::Fields(fields)) => Some(fields),
			_ => None,
		}
	}

	/// Element metadata of an array, set, record or promise node.
	pub fn element(&self) -> Option<&Metadata> {
		match &self.schema {
			Some(NestedMetadata::Element(element)) => Some(element),
			_ => None,
		}
	}

	/// The innermost live node, when raw nodes were retained.
	pub fn raw_inner(&self) -> Option<&SchemaNode> {
		self.raw.as_ref().map(|raw| &raw.inner)
	}

	/// The outermost live node, when raw nodes were retained.
	pub fn raw_outer(&self) -> Option<&SchemaNode> {
		self.raw.as_ref().map(|raw| &raw.outer)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_overlay_prefers_outer_values() {
		let mut inner = Metadata {
			description: Some("inner".into()),
			min_length: Some(2),
			is_email: true,
			..Default::default()
		};
		let outer = Metadata {
			description: Some("outer".into()),
			is_optional: true,
			..Default::default()
		};

		inner.overlay(outer);

		assert_eq!(inner.description.as_deref(), Some("outer"));
		assert_eq!(inner.min_length, Some(2));
		assert!(inner.is_email && inner.is_optional);
	}

	#[rstest]
	fn test_serializes_only_set_attributes() {
		let meta = Metadata {
			kind: SchemaKind::String,
			base_type: BaseType::String,
			is_uuid: true,
			is_id: true,
			..Default::default()
		};

		let json = serde_json::to_value(&meta).unwrap();
		assert_eq!(
			json,
			json!({
				"kind": "String",
				"baseType": "String",
				"isUUID": true,
				"isID": true,
			})
		);
	}

	#[rstest]
	fn test_extra_is_flattened() {
		let mut meta = Metadata::default();
		meta.extra.insert("widget".into(), json!("select"));
		let json = serde_json::to_value(&meta).unwrap();
		assert_eq!(json["widget"], "select");
	}

	#[rstest]
	fn test_annotations_cannot_shadow_builtin_keys() {
		let mut meta = Metadata {
			kind: SchemaKind::String,
			base_type: BaseType::String,
			..Default::default()
		};
		meta.extra.insert("kind".into(), json!("Object"));
		meta.extra.insert("baseType".into(), json!("Number"));
		meta.extra.insert("isSensitive".into(), json!(true));
		meta.extra.insert("widget".into(), json!("select"));

		let json = serde_json::to_value(&meta).unwrap();
		assert_eq!(
			json,
			json!({ "kind": "String", "baseType": "String", "widget": "select" })
		);
	}

	#[rstest]
	fn test_reserved_keys_cover_every_builtin_attribute() {
		let meta = Metadata {
			name: Some("User".into()),
			is_optional: true,
			is_nullable: true,
			default_value: Some(json!(1)),
			example_value: Some(json!(1)),
			description: Some("d".into()),
			min_length: Some(1),
			max_length: Some(1),
			exact_length: Some(1),
			min_value: Some(1.0),
			max_value: Some(1.0),
			is_int: true,
			is_email: true,
			is_url: true,
			is_uuid: true,
			is_base64: true,
			is_date: true,
			is_datetime: true,
			is_time: true,
			is_ip: true,
			literal_value: Some(json!(1)),
			literal_type: Some(LiteralType::Number),
			schema: Some(NestedMetadata::Sequence(Vec::new())),
			is_sensitive: true,
			is_id: true,
			is_index: true,
			is_unique: true,
			is_sparse: true,
			..Default::default()
		};

		let json = serde_json::to_value(&meta).unwrap();
		let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
		assert_eq!(keys, RESERVED_KEYS);
	}

	#[rstest]
	#[case(json!("a"), Some(BaseType::String))]
	#[case(json!(1), Some(BaseType::Number))]
	#[case(json!(false), Some(BaseType::Boolean))]
	#[case(json!(null), None)]
	fn test_literal_narrowing(#[case] value: Value, #[case] expected: Option<BaseType>) {
		assert_eq!(LiteralType::of(&value).narrowed_base_type(), expected);
	}
}
