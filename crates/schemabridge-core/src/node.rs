//! Owned schema node wrapper
//!
//! A [`SchemaNode`] is an immutable, cheaply clonable handle to a node
//! definition plus the metadata a user attached to it. Every builder method
//! returns a new node and leaves the receiver untouched, so derived schemas
//! never alias mutable state.

use crate::kind::SchemaKind;
use crate::metadata::is_reserved_key;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Length and format constraints on string nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringChecks {
	pub min_length: Option<usize>,
	pub max_length: Option<usize>,
	pub exact_length: Option<usize>,
	pub email: bool,
	pub url: bool,
	pub uuid: bool,
	pub base64: bool,
	pub date: bool,
	pub datetime: bool,
	pub time: bool,
	pub ip: bool,
}

/// Bounds on number nodes. Bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberChecks {
	pub min_value: Option<f64>,
	pub max_value: Option<f64>,
	pub int: bool,
}

/// Element count constraints on array and set nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LengthChecks {
	pub min_length: Option<usize>,
	pub max_length: Option<usize>,
	pub exact_length: Option<usize>,
}

/// Metadata a user attached to a node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttachedMeta {
	/// Canonical schema name, only set on named object schemas
	pub name: Option<String>,
	pub description: Option<String>,
	pub example_value: Option<Value>,
	/// Server-side only, stripped from API responses and generated queries
	pub is_sensitive: bool,
	pub is_id: bool,
	pub is_index: bool,
	pub is_unique: bool,
	pub is_sparse: bool,
	/// Free-form annotations
	pub extra: IndexMap<String, Value>,
}

/// Ordered field declarations of an object node.
///
/// # Examples
///
/// ```
/// use schemabridge_core::{ObjectShape, SchemaNode};
///
/// let shape = ObjectShape::new()
///     .field("id", SchemaNode::string())
///     .field("age", SchemaNode::number().optional());
/// assert_eq!(shape.keys().collect::<Vec<_>>(), vec!["id", "age"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ObjectShape {
	fields: IndexMap<String, SchemaNode>,
}

impl ObjectShape {
	/// Creates an empty shape.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a field, replacing the node of an existing key in place.
	pub fn field(mut self, key: impl Into<String>, node: impl Into<SchemaNode>) -> Self {
		self.insert(key, node);
		self
	}

	pub fn insert(&mut self, key: impl Into<String>, node: impl Into<SchemaNode>) {
		self.fields.insert(key.into(), node.into());
	}

	pub fn get(&self, key: &str) -> Option<&SchemaNode> {
		self.fields.get(key)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.fields.contains_key(key)
	}

	/// Field names in declaration order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.fields.keys().map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
		self.fields.iter().map(|(key, node)| (key.as_str(), node))
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Appends the fields of `other`, later declarations winning.
	pub fn merged(mut self, other: &ObjectShape) -> Self {
		for (key, node) in other.iter() {
			self.insert(key, node.clone());
		}
		self
	}

	pub(crate) fn retain(mut self, keep: impl Fn(&str) -> bool) -> Self {
		self.fields.retain(|key, _| keep(key));
		self
	}
}

impl<K: Into<String>, N: Into<SchemaNode>> FromIterator<(K, N)> for ObjectShape {
	fn from_iter<I: IntoIterator<Item = (K, N)>>(iter: I) -> Self {
		let mut shape = ObjectShape::new();
		for (key, node) in iter {
			shape.insert(key, node);
		}
		shape
	}
}

/// Deferred node construction, used for recursive schemas.
#[derive(Clone)]
pub struct LazyGetter(Arc<dyn Fn() -> SchemaNode + Send + Sync>);

impl LazyGetter {
	pub fn resolve(&self) -> SchemaNode {
		(self.0)()
	}
}

impl fmt::Debug for LazyGetter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("LazyGetter(..)")
	}
}

/// A predicate attached through [`SchemaNode::refine`].
#[derive(Clone)]
pub struct Refinement {
	pub message: String,
	check: Arc<dyn Fn(&Value) -> bool + Send + Sync>,
}

impl Refinement {
	pub fn accepts(&self, value: &Value) -> bool {
		(self.check)(value)
	}
}

impl fmt::Debug for Refinement {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Refinement")
			.field("message", &self.message)
			.finish_non_exhaustive()
	}
}

/// Structural definition of a node.
#[derive(Debug, Clone)]
pub enum NodeKind {
	String(StringChecks),
	Number(NumberChecks),
	Boolean,
	Date,
	Enum(Vec<String>),
	Array {
		element: SchemaNode,
		checks: LengthChecks,
	},
	Object(ObjectShape),
	Null,
	Undefined,
	Tuple(Vec<SchemaNode>),
	Union(Vec<SchemaNode>),
	Literal(Value),
	NativeEnum(IndexMap<String, Value>),
	Any,
	Record(SchemaNode),
	Unknown,
	BigInt,
	Symbol,
	Intersection {
		left: SchemaNode,
		right: SchemaNode,
	},
	DiscriminatedUnion {
		discriminator: String,
		options: Vec<SchemaNode>,
	},
	Map {
		key: SchemaNode,
		value: SchemaNode,
	},
	Set {
		element: SchemaNode,
		checks: LengthChecks,
	},
	Void,
	Function {
		args: SchemaNode,
		returns: SchemaNode,
	},
	Promise(SchemaNode),
	Lazy(LazyGetter),
	Effects {
		inner: SchemaNode,
		refinement: Refinement,
	},
	Optional(SchemaNode),
	Nullable(SchemaNode),
	Default {
		inner: SchemaNode,
		value: Value,
	},
}

impl NodeKind {
	pub fn tag(&self) -> SchemaKind {
		match self {
			NodeKind::String(_) => SchemaKind::String,
			NodeKind::Number(_) => SchemaKind::Number,
			NodeKind::Boolean => SchemaKind::Boolean,
			NodeKind::Date => SchemaKind::Date,
			NodeKind::Enum(_) => SchemaKind::Enum,
			NodeKind::Array { .. } => SchemaKind::Array,
			NodeKind::Object(_) => SchemaKind::Object,
			NodeKind::Null => SchemaKind::Null,
			NodeKind::Undefined => SchemaKind::Undefined,
			NodeKind::Tuple(_) => SchemaKind::Tuple,
			NodeKind::Union(_) => SchemaKind::Union,
			NodeKind::Literal(_) => SchemaKind::Literal,
			NodeKind::NativeEnum(_) => SchemaKind::NativeEnum,
			NodeKind::Any => SchemaKind::Any,
			NodeKind::Record(_) => SchemaKind::Record,
			NodeKind::Unknown => SchemaKind::Unknown,
			NodeKind::BigInt => SchemaKind::BigInt,
			NodeKind::Symbol => SchemaKind::Symbol,
			NodeKind::Intersection { .. } => SchemaKind::Intersection,
			NodeKind::DiscriminatedUnion { .. } => SchemaKind::DiscriminatedUnion,
			NodeKind::Map { .. } => SchemaKind::Map,
			NodeKind::Set { .. } => SchemaKind::Set,
			NodeKind::Void => SchemaKind::Void,
			NodeKind::Function { .. } => SchemaKind::Function,
			NodeKind::Promise(_) => SchemaKind::Promise,
			NodeKind::Lazy(_) => SchemaKind::Lazy,
			NodeKind::Effects { .. } => SchemaKind::Effects,
			NodeKind::Optional(_) => SchemaKind::Optional,
			NodeKind::Nullable(_) => SchemaKind::Nullable,
			NodeKind::Default { .. } => SchemaKind::Default,
		}
	}
}

#[derive(Debug, Clone)]
struct NodeDef {
	kind: NodeKind,
	meta: AttachedMeta,
}

/// Immutable handle to a schema node.
///
/// # Examples
///
/// ```
/// use schemabridge_core::{SchemaKind, SchemaNode};
///
/// let email = SchemaNode::string().email().unique().optional();
/// assert_eq!(email.kind(), SchemaKind::Optional);
///
/// let meta = email.introspect();
/// assert_eq!(meta.kind, SchemaKind::String);
/// assert!(meta.is_email && meta.is_unique && meta.is_index && meta.is_optional);
/// ```
#[derive(Clone)]
pub struct SchemaNode(Arc<NodeDef>);

impl fmt::Debug for SchemaNode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SchemaNode")
			.field("kind", &self.0.kind)
			.field("meta", &self.0.meta)
			.finish()
	}
}

impl From<NodeKind> for SchemaNode {
	fn from(kind: NodeKind) -> Self {
		SchemaNode(Arc::new(NodeDef {
			kind,
			meta: AttachedMeta::default(),
		}))
	}
}

impl SchemaNode {
	// -- Constructors --

	pub fn string() -> Self {
		NodeKind::String(StringChecks::default()).into()
	}

	pub fn number() -> Self {
		NodeKind::Number(NumberChecks::default()).into()
	}

	pub fn boolean() -> Self {
		NodeKind::Boolean.into()
	}

	pub fn date() -> Self {
		NodeKind::Date.into()
	}

	pub fn bigint() -> Self {
		NodeKind::BigInt.into()
	}

	pub fn symbol() -> Self {
		NodeKind::Symbol.into()
	}

	pub fn null() -> Self {
		NodeKind::Null.into()
	}

	pub fn undefined() -> Self {
		NodeKind::Undefined.into()
	}

	pub fn void() -> Self {
		NodeKind::Void.into()
	}

	pub fn any() -> Self {
		NodeKind::Any.into()
	}

	pub fn unknown() -> Self {
		NodeKind::Unknown.into()
	}

	pub fn literal(value: impl Into<Value>) -> Self {
		NodeKind::Literal(value.into()).into()
	}

	/// String enumeration of the given options, in order.
	pub fn enumeration<I, S>(options: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		NodeKind::Enum(options.into_iter().map(Into::into).collect()).into()
	}

	/// Enumeration over named constant values.
	pub fn native_enum<I, S>(entries: I) -> Self
	where
		I: IntoIterator<Item = (S, Value)>,
		S: Into<String>,
	{
		NodeKind::NativeEnum(
			entries
				.into_iter()
				.map(|(name, value)| (name.into(), value))
				.collect(),
		)
		.into()
	}

	pub fn array(element: impl Into<SchemaNode>) -> Self {
		NodeKind::Array {
			element: element.into(),
			checks: LengthChecks::default(),
		}
		.into()
	}

	pub fn set(element: impl Into<SchemaNode>) -> Self {
		NodeKind::Set {
			element: element.into(),
			checks: LengthChecks::default(),
		}
		.into()
	}

	/// String-keyed record with values of one type.
	pub fn record(value: impl Into<SchemaNode>) -> Self {
		NodeKind::Record(value.into()).into()
	}

	pub fn map(key: impl Into<SchemaNode>, value: impl Into<SchemaNode>) -> Self {
		NodeKind::Map {
			key: key.into(),
			value: value.into(),
		}
		.into()
	}

	pub fn tuple<I: IntoIterator<Item = SchemaNode>>(items: I) -> Self {
		NodeKind::Tuple(items.into_iter().collect()).into()
	}

	pub fn union<I: IntoIterator<Item = SchemaNode>>(options: I) -> Self {
		NodeKind::Union(options.into_iter().collect()).into()
	}

	/// Union of object nodes told apart by the literal value of one field.
	pub fn discriminated_union<I>(discriminator: impl Into<String>, options: I) -> Self
	where
		I: IntoIterator<Item = SchemaNode>,
	{
		NodeKind::DiscriminatedUnion {
			discriminator: discriminator.into(),
			options: options.into_iter().collect(),
		}
		.into()
	}

	pub fn intersection(left: impl Into<SchemaNode>, right: impl Into<SchemaNode>) -> Self {
		NodeKind::Intersection {
			left: left.into(),
			right: right.into(),
		}
		.into()
	}

	pub fn function<I>(args: I, returns: impl Into<SchemaNode>) -> Self
	where
		I: IntoIterator<Item = SchemaNode>,
	{
		NodeKind::Function {
			args: SchemaNode::tuple(args),
			returns: returns.into(),
		}
		.into()
	}

	pub fn promise(resolved: impl Into<SchemaNode>) -> Self {
		NodeKind::Promise(resolved.into()).into()
	}

	pub fn lazy(getter: impl Fn() -> SchemaNode + Send + Sync + 'static) -> Self {
		NodeKind::Lazy(LazyGetter(Arc::new(getter))).into()
	}

	/// Unnamed object node. Use [`Schema::new`](crate::Schema::new) for named schemas.
	pub fn object(shape: ObjectShape) -> Self {
		NodeKind::Object(shape).into()
	}

	// -- Accessors --

	pub fn kind(&self) -> SchemaKind {
		self.0.kind.tag()
	}

	pub fn node_kind(&self) -> &NodeKind {
		&self.0.kind
	}

	pub fn meta(&self) -> &AttachedMeta {
		&self.0.meta
	}

	/// The node wrapped by an optional, nullable or default layer.
	pub fn inner_type(&self) -> Option<&SchemaNode> {
		match &self.0.kind {
			NodeKind::Optional(inner) | NodeKind::Nullable(inner) => Some(inner),
			NodeKind::Default { inner, .. } => Some(inner),
			_ => None,
		}
	}

	/// Follows [`inner_type`](Self::inner_type) until no wrapping layer is left.
	pub fn innermost(&self) -> &SchemaNode {
		let mut current = self;
		while let Some(inner) = current.inner_type() {
			current = inner;
		}
		current
	}

	/// Object fields of the innermost node, if it is an object.
	pub fn shape(&self) -> Option<&ObjectShape> {
		match self.innermost().node_kind() {
			NodeKind::Object(shape) => Some(shape),
			_ => None,
		}
	}

	pub fn ptr_eq(&self, other: &SchemaNode) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}

	/// A node with a new definition and this node's attached metadata.
	pub(crate) fn with_kind(&self, kind: NodeKind) -> Self {
		SchemaNode(Arc::new(NodeDef {
			kind,
			meta: self.0.meta.clone(),
		}))
	}

	// -- Wrappers --

	pub fn optional(&self) -> Self {
		NodeKind::Optional(self.clone()).into()
	}

	pub fn nullable(&self) -> Self {
		NodeKind::Nullable(self.clone()).into()
	}

	/// Shorthand for `.nullable().optional()`.
	pub fn nullish(&self) -> Self {
		self.nullable().optional()
	}

	pub fn default_value(&self, value: impl Into<Value>) -> Self {
		NodeKind::Default {
			inner: self.clone(),
			value: value.into(),
		}
		.into()
	}

	/// Wraps the node with an extra check run after it validates.
	pub fn refine(
		&self,
		message: impl Into<String>,
		check: impl Fn(&Value) -> bool + Send + Sync + 'static,
	) -> Self {
		NodeKind::Effects {
			inner: self.clone(),
			refinement: Refinement {
				message: message.into(),
				check: Arc::new(check),
			},
		}
		.into()
	}

	// -- Metadata --

	/// Returns a copy of this node with `update` applied to its attached metadata.
	pub fn add_meta(&self, update: impl FnOnce(&mut AttachedMeta)) -> Self {
		let mut def = (*self.0).clone();
		update(&mut def.meta);
		SchemaNode(Arc::new(def))
	}

	/// Attaches a free-form annotation.
	///
	/// Keys naming a built-in metadata attribute (`kind`, `baseType`,
	/// `isSensitive`, ...) are ignored and the node is returned unchanged.
	pub fn annotate(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		let (key, value) = (key.into(), value.into());
		if is_reserved_key(&key) {
			tracing::warn!(key = %key, "annotation key is reserved for built-in metadata, ignoring");
			return self.clone();
		}
		self.add_meta(|meta| {
			meta.extra.insert(key, value);
		})
	}

	pub fn describe(&self, description: impl Into<String>) -> Self {
		let description = description.into();
		self.add_meta(|meta| meta.description = Some(description))
	}

	/// Attaches the canonical name used for codegen and query naming.
	pub fn name_schema(&self, name: impl Into<String>) -> Self {
		let name = name.into();
		self.add_meta(|meta| meta.name = Some(name))
	}

	pub fn sensitive(&self) -> Self {
		self.add_meta(|meta| meta.is_sensitive = true)
	}

	/// Marks the node as the record identifier.
	pub fn id(&self) -> Self {
		self.add_meta(|meta| meta.is_id = true)
	}

	pub fn index(&self) -> Self {
		self.add_meta(|meta| meta.is_index = true)
	}

	pub fn unique(&self) -> Self {
		self.add_meta(|meta| {
			meta.is_unique = true;
			meta.is_index = true;
		})
	}

	pub fn sparse(&self) -> Self {
		self.add_meta(|meta| {
			meta.is_sparse = true;
			meta.is_index = true;
		})
	}

	pub fn example(&self, value: impl Into<Value>) -> Self {
		let value = value.into();
		self.add_meta(|meta| meta.example_value = Some(value))
	}

	pub fn eg(&self, value: impl Into<Value>) -> Self {
		self.example(value)
	}

	pub fn ex(&self, value: impl Into<Value>) -> Self {
		self.example(value)
	}

	// -- Checks --
	//
	// Checks that make no sense for the node's kind leave the node unchanged.

	fn map_kind(&self, check: &str, update: impl FnOnce(&mut NodeKind) -> bool) -> Self {
		let mut def = (*self.0).clone();
		if update(&mut def.kind) {
			SchemaNode(Arc::new(def))
		} else {
			tracing::debug!(check, kind = %self.kind(), "check ignored for node kind");
			self.clone()
		}
	}

	fn map_string(&self, check: &str, update: impl FnOnce(&mut StringChecks)) -> Self {
		self.map_kind(check, |kind| match kind {
			NodeKind::String(checks) => {
				update(checks);
				true
			}
			_ => false,
		})
	}

	fn map_lengths(
		&self,
		check: &str,
		update: impl FnOnce(&mut Option<usize>, &mut Option<usize>, &mut Option<usize>),
	) -> Self {
		self.map_kind(check, |kind| match kind {
			NodeKind::String(checks) => {
				update(
					&mut checks.min_length,
					&mut checks.max_length,
					&mut checks.exact_length,
				);
				true
			}
			NodeKind::Array { checks, .. } | NodeKind::Set { checks, .. } => {
				update(
					&mut checks.min_length,
					&mut checks.max_length,
					&mut checks.exact_length,
				);
				true
			}
			_ => false,
		})
	}

	fn map_number(&self, check: &str, update: impl FnOnce(&mut NumberChecks)) -> Self {
		self.map_kind(check, |kind| match kind {
			NodeKind::Number(checks) => {
				update(checks);
				true
			}
			_ => false,
		})
	}

	/// Minimum string length or element count.
	pub fn min_length(&self, length: usize) -> Self {
		self.map_lengths("min_length", |min, _, _| *min = Some(length))
	}

	/// Maximum string length or element count.
	pub fn max_length(&self, length: usize) -> Self {
		self.map_lengths("max_length", |_, max, _| *max = Some(length))
	}

	/// Exact string length or element count.
	pub fn length(&self, length: usize) -> Self {
		self.map_lengths("length", |_, _, exact| *exact = Some(length))
	}

	pub fn min_value(&self, value: f64) -> Self {
		self.map_number("min_value", |checks| checks.min_value = Some(value))
	}

	pub fn max_value(&self, value: f64) -> Self {
		self.map_number("max_value", |checks| checks.max_value = Some(value))
	}

	pub fn int(&self) -> Self {
		self.map_number("int", |checks| checks.int = true)
	}

	pub fn email(&self) -> Self {
		self.map_string("email", |checks| checks.email = true)
	}

	pub fn url(&self) -> Self {
		self.map_string("url", |checks| checks.url = true)
	}

	pub fn uuid(&self) -> Self {
		self.map_string("uuid", |checks| checks.uuid = true)
	}

	pub fn base64(&self) -> Self {
		self.map_string("base64", |checks| checks.base64 = true)
	}

	/// `YYYY-MM-DD` formatted string.
	pub fn iso_date(&self) -> Self {
		self.map_string("date", |checks| checks.date = true)
	}

	/// RFC 3339 formatted string.
	pub fn datetime(&self) -> Self {
		self.map_string("datetime", |checks| checks.datetime = true)
	}

	pub fn time(&self) -> Self {
		self.map_string("time", |checks| checks.time = true)
	}

	pub fn ip(&self) -> Self {
		self.map_string("ip", |checks| checks.ip = true)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_builders_leave_receiver_untouched() {
		let base = SchemaNode::string();
		let described = base.describe("A name").min_length(2);

		assert!(base.meta().description.is_none());
		assert!(matches!(
			base.node_kind(),
			NodeKind::String(checks) if checks.min_length.is_none()
		));
		assert_eq!(described.meta().description.as_deref(), Some("A name"));
	}

	#[rstest]
	fn test_unique_and_sparse_imply_index() {
		assert!(SchemaNode::string().unique().meta().is_index);
		assert!(SchemaNode::string().sparse().meta().is_index);
		assert!(!SchemaNode::string().sensitive().meta().is_index);
	}

	#[rstest]
	fn test_innermost_unwraps_every_layer() {
		let node = SchemaNode::number().default_value(3).nullable().optional();
		assert_eq!(node.kind(), SchemaKind::Optional);
		assert_eq!(node.innermost().kind(), SchemaKind::Number);
	}

	#[rstest]
	fn test_check_on_wrong_kind_is_ignored() {
		let node = SchemaNode::boolean();
		let checked = node.email();
		assert!(checked.ptr_eq(&node));
	}

	#[rstest]
	fn test_length_checks_apply_to_arrays() {
		let node = SchemaNode::array(SchemaNode::string()).min_length(1).max_length(3);
		match node.node_kind() {
			NodeKind::Array { checks, .. } => {
				assert_eq!(checks.min_length, Some(1));
				assert_eq!(checks.max_length, Some(3));
			}
			other => panic!("unexpected kind {other:?}"),
		}
	}

	#[rstest]
	fn test_shape_replaces_existing_key_in_place() {
		let shape = ObjectShape::new()
			.field("a", SchemaNode::string())
			.field("b", SchemaNode::number())
			.field("a", SchemaNode::boolean());

		assert_eq!(shape.keys().collect::<Vec<_>>(), vec!["a", "b"]);
		assert_eq!(shape.get("a").map(SchemaNode::kind), Some(SchemaKind::Boolean));
	}

	#[rstest]
	fn test_annotate_stores_extra_meta() {
		let node = SchemaNode::string().annotate("widget", json!("textarea"));
		assert_eq!(node.meta().extra.get("widget"), Some(&json!("textarea")));
	}

	#[rstest]
	#[case("kind")]
	#[case("baseType")]
	#[case("name")]
	#[case("isSensitive")]
	fn test_annotate_ignores_reserved_keys(#[case] key: &str) {
		let node = SchemaNode::string().annotate(key, json!("Number"));
		assert!(node.meta().extra.is_empty());

		let json = serde_json::to_value(node.introspect()).unwrap();
		assert_eq!(json, json!({ "kind": "String", "baseType": "String" }));
	}

	#[rstest]
	fn test_id_marks_identifier() {
		let node = SchemaNode::number().int().id();
		assert!(node.meta().is_id);
		assert!(!node.meta().is_index);
		assert!(node.optional().introspect().is_id);
	}
}
