//! Schema source regeneration
//!
//! Introspected metadata is first lowered into a small IR of field
//! definitions ([`SchemaDefinition`]) and then printed as constructor call
//! chains, one field per entry, with modifiers in a fixed order.

use crate::kind::SchemaKind;
use crate::metadata::{Metadata, NestedMetadata};
use crate::schema::Schema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const TAB: &str = "    ";
const SENSITIVE_NOTE: &str = "// = stripped in API responses, serverside only";

/// Declaration style of regenerated sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFlavor {
	/// `const User = schema('User', {`
	#[default]
	Named,
	/// `const User = z.object({`
	Plain,
}

/// Argument of a constructor call.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
	/// Printed verbatim, e.g. a JSON literal.
	Raw(String),
	Call(BaseCall),
	/// `[a, b]`
	List(Vec<Arg>),
	/// Inline object shape.
	Shape(Vec<FieldDefinition>),
}

/// What a field is built from.
#[derive(Debug, Clone, PartialEq)]
pub enum BaseCall {
	/// `z.<method>(<args>)`
	Call { method: &'static str, args: Vec<Arg> },
	/// Another named schema.
	Reference(String),
}

impl BaseCall {
	fn call(method: &'static str) -> Self {
		BaseCall::Call {
			method,
			args: Vec::new(),
		}
	}

	fn with_args(method: &'static str, args: Vec<Arg>) -> Self {
		BaseCall::Call { method, args }
	}

	/// Named objects are referenced by name, everything else is rebuilt.
	pub fn from_metadata(meta: &Metadata) -> Self {
		let nested = |meta: &Metadata| Arg::Call(BaseCall::from_metadata(meta));
		let sequence = |items: &[Metadata]| Arg::List(items.iter().map(nested).collect());

		match (meta.kind, &meta.schema) {
			(SchemaKind::Object, _) if meta.name.is_some() => {
				BaseCall::Reference(meta.name.clone().unwrap_or_default())
			}
			(SchemaKind::Object, Some(NestedMetadata::Fields(fields))) => BaseCall::with_args(
				"object",
				vec![Arg::Shape(
					fields
						.iter()
						.map(|(key, field)| FieldDefinition::from_metadata(key, field))
						.collect(),
				)],
			),
			(SchemaKind::Enum, Some(NestedMetadata::Entries(entries))) => BaseCall::with_args(
				"enum",
				vec![Arg::List(
					entries.keys().map(|key| Arg::Raw(json_literal(&Value::from(key.as_str())))).collect(),
				)],
			),
			(SchemaKind::NativeEnum, Some(NestedMetadata::Entries(entries))) => {
				let object: serde_json::Map<String, Value> =
					entries.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
				BaseCall::with_args("nativeEnum", vec![Arg::Raw(json_literal(&Value::Object(object)))])
			}
			(SchemaKind::Literal, _) => BaseCall::with_args(
				"literal",
				vec![Arg::Raw(json_literal(meta.literal_value.as_ref().unwrap_or(&Value::Null)))],
			),
			(SchemaKind::Array, Some(NestedMetadata::Element(element))) => {
				BaseCall::with_args("array", vec![nested(element)])
			}
			(SchemaKind::Set, Some(NestedMetadata::Element(element))) => {
				BaseCall::with_args("set", vec![nested(element)])
			}
			(SchemaKind::Record, Some(NestedMetadata::Element(element))) => BaseCall::with_args(
				"record",
				vec![Arg::Call(BaseCall::call("string")), nested(element)],
			),
			(SchemaKind::Tuple, Some(NestedMetadata::Sequence(items))) => {
				BaseCall::with_args("tuple", vec![sequence(items)])
			}
			(SchemaKind::Union, Some(NestedMetadata::Sequence(items))) => {
				BaseCall::with_args("union", vec![sequence(items)])
			}
			(SchemaKind::Intersection, Some(NestedMetadata::Intersection { left, right })) => {
				BaseCall::with_args("intersection", vec![nested(left), nested(right)])
			}
			(
				SchemaKind::DiscriminatedUnion,
				Some(NestedMetadata::Discriminated {
					discriminator,
					types,
				}),
			) => BaseCall::with_args(
				"discriminatedUnion",
				vec![
					Arg::Raw(json_literal(&Value::from(discriminator.as_str()))),
					sequence(types),
				],
			),
			(SchemaKind::Map, Some(NestedMetadata::KeyValue { key, value })) => {
				BaseCall::with_args("map", vec![nested(key), nested(value)])
			}
			(SchemaKind::String, _) => BaseCall::call("string"),
			(SchemaKind::Number, _) => BaseCall::call("number"),
			(SchemaKind::Boolean, _) => BaseCall::call("boolean"),
			(SchemaKind::Date, _) => BaseCall::call("date"),
			(SchemaKind::Null, _) => BaseCall::call("null"),
			(SchemaKind::Undefined, _) => BaseCall::call("undefined"),
			(SchemaKind::BigInt, _) => BaseCall::call("bigint"),
			(SchemaKind::Symbol, _) => BaseCall::call("symbol"),
			(SchemaKind::Void, _) => BaseCall::call("void"),
			(SchemaKind::Function, _) => BaseCall::call("function"),
			(SchemaKind::Promise, _) => BaseCall::call("promise"),
			(SchemaKind::Any, _) => BaseCall::call("any"),
			// Lazy getters and refinements cannot be rebuilt from metadata
			_ => BaseCall::call("unknown"),
		}
	}
}

/// Chained call applied after the base call.
#[derive(Debug, Clone, PartialEq)]
pub enum Modifier {
	Index,
	Unique,
	Sparse,
	Int,
	Email,
	Url,
	Uuid,
	Base64,
	Date,
	Datetime,
	Time,
	Ip,
	MinLength(usize),
	MaxLength(usize),
	Length(usize),
	MinValue(f64),
	MaxValue(f64),
	Optional,
	Nullable,
	Nullish,
	Default(Value),
	Example(Value),
	Describe(String),
	Sensitive,
}

impl Modifier {
	fn render(&self) -> String {
		match self {
			Modifier::Index => ".index()".into(),
			Modifier::Unique => ".unique()".into(),
			Modifier::Sparse => ".sparse()".into(),
			Modifier::Int => ".int()".into(),
			Modifier::Email => ".email()".into(),
			Modifier::Url => ".url()".into(),
			Modifier::Uuid => ".uuid()".into(),
			Modifier::Base64 => ".base64()".into(),
			Modifier::Date => ".date()".into(),
			Modifier::Datetime => ".datetime()".into(),
			Modifier::Time => ".time()".into(),
			Modifier::Ip => ".ip()".into(),
			Modifier::MinLength(length) => format!(".min({length})"),
			Modifier::MaxLength(length) => format!(".max({length})"),
			Modifier::Length(length) => format!(".length({length})"),
			Modifier::MinValue(value) => format!(".min({})", js_number(*value)),
			Modifier::MaxValue(value) => format!(".max({})", js_number(*value)),
			Modifier::Optional => ".optional()".into(),
			Modifier::Nullable => ".nullable()".into(),
			Modifier::Nullish => ".nullish()".into(),
			Modifier::Default(value) => format!(".default({})", json_literal(value)),
			Modifier::Example(value) => format!(".example({})", json_literal(value)),
			Modifier::Describe(text) => format!(".describe({})", json_literal(&Value::from(text.as_str()))),
			Modifier::Sensitive => ".sensitive()".into(),
		}
	}
}

/// One field of a regenerated schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
	pub key: String,
	pub base: BaseCall,
	pub modifiers: Vec<Modifier>,
}

impl FieldDefinition {
	pub fn from_metadata(key: impl Into<String>, meta: &Metadata) -> Self {
		let flags = [
			(meta.is_index, Modifier::Index),
			(meta.is_unique, Modifier::Unique),
			(meta.is_sparse, Modifier::Sparse),
			(meta.is_int, Modifier::Int),
			(meta.is_email, Modifier::Email),
			(meta.is_url, Modifier::Url),
			(meta.is_uuid, Modifier::Uuid),
			(meta.is_base64, Modifier::Base64),
			(meta.is_date, Modifier::Date),
			(meta.is_datetime, Modifier::Datetime),
			(meta.is_time, Modifier::Time),
			(meta.is_ip, Modifier::Ip),
		];
		let mut modifiers: Vec<Modifier> = flags
			.into_iter()
			.filter_map(|(set, modifier)| set.then_some(modifier))
			.collect();

		modifiers.extend(meta.min_length.map(Modifier::MinLength));
		modifiers.extend(meta.max_length.map(Modifier::MaxLength));
		modifiers.extend(meta.exact_length.map(Modifier::Length));
		modifiers.extend(meta.min_value.map(Modifier::MinValue));
		modifiers.extend(meta.max_value.map(Modifier::MaxValue));

		let optionality = match (&meta.default_value, meta.is_optional, meta.is_nullable) {
			(Some(value), _, _) => Some(Modifier::Default(value.clone())),
			(None, true, true) => Some(Modifier::Nullish),
			(None, true, false) => Some(Modifier::Optional),
			(None, false, true) => Some(Modifier::Nullable),
			(None, false, false) => None,
		};
		modifiers.extend(optionality);
		modifiers.extend(meta.example_value.clone().map(Modifier::Example));
		modifiers.extend(meta.description.clone().map(Modifier::Describe));
		if meta.is_sensitive {
			modifiers.push(Modifier::Sensitive);
		}

		Self {
			key: key.into(),
			base: BaseCall::from_metadata(meta),
			modifiers,
		}
	}

	fn render(&self, out: &mut String, level: usize) {
		let pad = TAB.repeat(level);
		let chain = TAB.repeat(level + 1);
		match &self.base {
			BaseCall::Reference(name) => {
				out.push_str(&format!("{pad}{}: {name}", self.key));
			}
			BaseCall::Call { method, args } => {
				out.push_str(&format!(
					"{pad}{}: z\n{chain}.{method}({})",
					self.key,
					render_args(args, level + 1)
				));
			}
		}
		for modifier in &self.modifiers {
			out.push_str(&format!("\n{chain}{}", modifier.render()));
		}
		out.push(',');
		if self.modifiers.last() == Some(&Modifier::Sensitive) {
			out.push(' ');
			out.push_str(SENSITIVE_NOTE);
		}
	}
}

/// Regenerated source of one named schema.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDefinition {
	pub name: String,
	pub fields: Vec<FieldDefinition>,
}

impl SchemaDefinition {
	/// Lowers object metadata into field definitions.
	///
	/// Returns `None` when the metadata has no fields.
	pub fn from_metadata(meta: &Metadata) -> Option<Self> {
		let name = meta.name.clone().unwrap_or_default();
		match meta.fields() {
			Some(fields) if !fields.is_empty() => Some(Self {
				name,
				fields: fields
					.iter()
					.map(|(key, field)| FieldDefinition::from_metadata(key, field))
					.collect(),
			}),
			_ => {
				tracing::debug!(schema = %name, kind = %meta.kind, "schema has no fields defined");
				None
			}
		}
	}

	pub fn render(&self, flavor: SourceFlavor) -> String {
		let mut out = match flavor {
			SourceFlavor::Named => format!("const {0} = schema('{0}', {{", self.name),
			SourceFlavor::Plain => format!("const {} = z.object({{", self.name),
		};
		for field in &self.fields {
			out.push('\n');
			field.render(&mut out, 1);
		}
		out.push_str("\n})");
		out
	}
}

/// Regenerates the source of the schema described by `meta`.
///
/// Metadata without fields renders to an empty string.
pub fn render_schema_source(meta: &Metadata, flavor: SourceFlavor) -> String {
	SchemaDefinition::from_metadata(meta)
		.map(|definition| definition.render(flavor))
		.unwrap_or_default()
}

impl Schema {
	/// Regenerates this schema's source.
	///
	/// # Examples
	///
	/// ```
	/// use schemabridge_core::{ObjectShape, Schema, SchemaNode, SourceFlavor};
	///
	/// let tag = Schema::new(
	///     "Tag",
	///     ObjectShape::new().field("label", SchemaNode::string().max_length(20).optional()),
	/// )
	/// .unwrap();
	///
	/// assert_eq!(
	///     tag.to_source(SourceFlavor::Plain),
	///     "const Tag = z.object({\n    label: z\n        .string()\n        .max(20)\n        .optional(),\n})"
	/// );
	/// ```
	pub fn to_source(&self, flavor: SourceFlavor) -> String {
		render_schema_source(&self.introspect(), flavor)
	}
}

fn render_args(args: &[Arg], level: usize) -> String {
	args.iter()
		.map(|arg| render_arg(arg, level))
		.collect::<Vec<_>>()
		.join(", ")
}

fn render_arg(arg: &Arg, level: usize) -> String {
	match arg {
		Arg::Raw(text) => text.clone(),
		Arg::Call(BaseCall::Reference(name)) => name.clone(),
		Arg::Call(BaseCall::Call { method, args }) => {
			format!("z.{method}({})", render_args(args, level))
		}
		Arg::List(items) => format!("[{}]", render_args(items, level)),
		Arg::Shape(fields) => {
			let mut out = String::from("{");
			for field in fields {
				out.push('\n');
				field.render(&mut out, level + 1);
			}
			out.push('\n');
			out.push_str(&TAB.repeat(level));
			out.push('}');
			out
		}
	}
}

fn json_literal(value: &Value) -> String {
	serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

/// Whole numbers print without a fractional part.
fn js_number(value: f64) -> String {
	if value.fract() == 0.0 && value.abs() < 1e15 {
		format!("{}", value as i64)
	} else {
		format!("{value}")
	}
}
