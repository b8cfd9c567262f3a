//! Schema introspection
//!
//! Peels wrapping layers off a node, collects one metadata fragment per
//! layer and folds them inner to outer into a single [`Metadata`] record.
//! Composite nodes are expanded recursively at the innermost layer.

use crate::metadata::{LiteralType, Metadata, NestedMetadata, RawNodes};
use crate::node::{NodeKind, SchemaNode};
use indexmap::IndexMap;
use serde_json::Value;

/// Introspects `node`.
///
/// With `include_raw`, every resulting record (nested ones included) keeps
/// handles to its outermost and innermost live node.
///
/// Unknown or unsupported kinds never fail: they produce a record whose base
/// type is `Any`.
pub fn introspect(node: &SchemaNode, include_raw: bool) -> Metadata {
	let mut stack = Vec::new();
	let mut current = node;
	loop {
		stack.push(fragment(current, include_raw));
		match current.inner_type() {
			Some(inner) => current = inner,
			None => break,
		}
	}
	let innermost = current;

	let mut merged = Metadata::default();
	for layer in stack.into_iter().rev() {
		merged.overlay(layer);
	}

	merged.kind = innermost.kind();
	merged.base_type = merged
		.literal_type
		.and_then(LiteralType::narrowed_base_type)
		.unwrap_or_else(|| merged.kind.base_type());

	if include_raw {
		merged.raw = Some(RawNodes {
			outer: node.clone(),
			inner: innermost.clone(),
		});
	}
	merged
}

fn boxed(node: &SchemaNode, include_raw: bool) -> Box<Metadata> {
	Box::new(introspect(node, include_raw))
}

fn sequence(nodes: &[SchemaNode], include_raw: bool) -> Vec<Metadata> {
	nodes.iter().map(|node| introspect(node, include_raw)).collect()
}

/// Metadata contributed by a single layer, without looking at inner layers.
fn fragment(node: &SchemaNode, include_raw: bool) -> Metadata {
	let attached = node.meta();
	let mut meta = Metadata {
		name: attached.name.clone(),
		description: attached.description.clone(),
		example_value: attached.example_value.clone(),
		is_sensitive: attached.is_sensitive,
		is_id: attached.is_id,
		is_index: attached.is_index,
		is_unique: attached.is_unique,
		is_sparse: attached.is_sparse,
		extra: attached.extra.clone(),
		..Default::default()
	};

	match node.node_kind() {
		NodeKind::Optional(_) => meta.is_optional = true,
		NodeKind::Nullable(_) => meta.is_nullable = true,
		// A default makes the key optional for callers
		NodeKind::Default { value, .. } => {
			meta.is_optional = true;
			meta.default_value = Some(value.clone());
		}
		NodeKind::String(checks) => {
			meta.min_length = checks.min_length;
			meta.max_length = checks.max_length;
			meta.exact_length = checks.exact_length;
			meta.is_email = checks.email;
			meta.is_url = checks.url;
			meta.is_uuid = checks.uuid;
			meta.is_base64 = checks.base64;
			meta.is_date = checks.date;
			meta.is_datetime = checks.datetime;
			meta.is_time = checks.time;
			meta.is_ip = checks.ip;
			meta.is_id |= checks.uuid;
		}
		NodeKind::Number(checks) => {
			meta.min_value = checks.min_value;
			meta.max_value = checks.max_value;
			meta.is_int = checks.int;
		}
		NodeKind::Literal(value) => {
			meta.literal_type = Some(LiteralType::of(value));
			meta.literal_value = Some(value.clone());
		}
		NodeKind::Enum(options) => {
			meta.schema = Some(NestedMetadata::Entries(
				options
					.iter()
					.map(|option| (option.clone(), Value::String(option.clone())))
					.collect(),
			));
		}
		NodeKind::NativeEnum(entries) => {
			meta.schema = Some(NestedMetadata::Entries(entries.clone()));
		}
		NodeKind::Tuple(items) | NodeKind::Union(items) => {
			meta.schema = Some(NestedMetadata::Sequence(sequence(items, include_raw)));
		}
		NodeKind::Intersection { left, right } => {
			meta.schema = Some(NestedMetadata::Intersection {
				left: boxed(left, include_raw),
				right: boxed(right, include_raw),
			});
		}
		NodeKind::DiscriminatedUnion {
			discriminator,
			options,
		} => {
			meta.schema = Some(NestedMetadata::Discriminated {
				discriminator: discriminator.clone(),
				types: sequence(options, include_raw),
			});
		}
		NodeKind::Array { element, checks } | NodeKind::Set { element, checks } => {
			meta.min_length = checks.min_length;
			meta.max_length = checks.max_length;
			meta.exact_length = checks.exact_length;
			meta.schema = Some(NestedMetadata::Element(boxed(element, include_raw)));
		}
		NodeKind::Object(shape) => {
			let fields: IndexMap<String, Metadata> = shape
				.iter()
				.map(|(key, field)| (key.to_string(), introspect(field, include_raw)))
				.collect();
			meta.schema = Some(NestedMetadata::Fields(fields));
		}
		NodeKind::Record(value) | NodeKind::Promise(value) => {
			meta.schema = Some(NestedMetadata::Element(boxed(value, include_raw)));
		}
		NodeKind::Map { key, value } => {
			meta.schema = Some(NestedMetadata::KeyValue {
				key: boxed(key, include_raw),
				value: boxed(value, include_raw),
			});
		}
		NodeKind::Function { args, returns } => {
			meta.schema = Some(NestedMetadata::Signature {
				input: boxed(args, include_raw),
				output: boxed(returns, include_raw),
			});
		}
		// Lazy getters stay unresolved so recursive schemas terminate
		NodeKind::Lazy(_)
		| NodeKind::Effects { .. }
		| NodeKind::Boolean
		| NodeKind::Date
		| NodeKind::Null
		| NodeKind::Undefined
		| NodeKind::Any
		| NodeKind::Unknown
		| NodeKind::BigInt
		| NodeKind::Symbol
		| NodeKind::Void => {}
	}
	meta
}

impl SchemaNode {
	/// Introspects this node without retaining live nodes.
	pub fn introspect(&self) -> Metadata {
		introspect(self, false)
	}

	/// Introspects this node, optionally retaining live nodes in every record.
	pub fn introspect_with(&self, include_raw: bool) -> Metadata {
		introspect(self, include_raw)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::kind::{BaseType, SchemaKind};
	use crate::node::ObjectShape;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(SchemaNode::string(), BaseType::String)]
	#[case(SchemaNode::number(), BaseType::Number)]
	#[case(SchemaNode::boolean(), BaseType::Boolean)]
	#[case(SchemaNode::date(), BaseType::Date)]
	#[case(SchemaNode::bigint(), BaseType::Number)]
	#[case(SchemaNode::enumeration(["a", "b"]), BaseType::String)]
	#[case(SchemaNode::set(SchemaNode::string()), BaseType::Array)]
	#[case(SchemaNode::record(SchemaNode::number()), BaseType::Object)]
	#[case(SchemaNode::void(), BaseType::Undefined)]
	#[case(SchemaNode::union([SchemaNode::string(), SchemaNode::number()]), BaseType::Any)]
	#[case(SchemaNode::literal(json!(null)), BaseType::Any)]
	fn test_base_type_follows_innermost_kind(#[case] node: SchemaNode, #[case] expected: BaseType) {
		assert_eq!(node.introspect().base_type, expected);
		assert_eq!(node.optional().nullable().introspect().base_type, expected);
	}

	#[rstest]
	fn test_wrappers_fold_into_flags() {
		let meta = SchemaNode::number()
			.min_value(1.0)
			.default_value(3)
			.nullable()
			.describe("Count")
			.introspect();

		assert_eq!(meta.kind, SchemaKind::Number);
		assert!(meta.is_optional);
		assert!(meta.is_nullable);
		assert_eq!(meta.default_value, Some(json!(3)));
		assert_eq!(meta.min_value, Some(1.0));
		assert_eq!(meta.description.as_deref(), Some("Count"));
	}

	#[rstest]
	fn test_outer_description_overrides_inner() {
		let meta = SchemaNode::string()
			.describe("inner")
			.optional()
			.describe("outer")
			.introspect();
		assert_eq!(meta.description.as_deref(), Some("outer"));
	}

	#[rstest]
	fn test_uuid_implies_id() {
		let meta = SchemaNode::string().uuid().introspect();
		assert!(meta.is_uuid && meta.is_id);
	}

	#[rstest]
	fn test_literal_narrows_base_type() {
		let meta = SchemaNode::literal(42).introspect();
		assert_eq!(meta.kind, SchemaKind::Literal);
		assert_eq!(meta.base_type, BaseType::Number);
		assert_eq!(meta.literal_value, Some(json!(42)));
		assert_eq!(meta.literal_type, Some(LiteralType::Number));
	}

	#[rstest]
	fn test_object_fields_keep_declaration_order() {
		let node = SchemaNode::object(
			ObjectShape::new()
				.field("zeta", SchemaNode::string())
				.field("alpha", SchemaNode::number())
				.field("mid", SchemaNode::boolean()),
		);
		let meta = node.introspect();
		let keys: Vec<_> = meta.fields().unwrap().keys().cloned().collect();
		assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
	}

	#[rstest]
	fn test_composites_expand() {
		let meta = SchemaNode::intersection(SchemaNode::string(), SchemaNode::number()).introspect();
		assert!(matches!(
			meta.schema,
			Some(NestedMetadata::Intersection { ref left, ref right })
				if left.kind == SchemaKind::String && right.kind == SchemaKind::Number
		));

		let meta = SchemaNode::map(SchemaNode::string(), SchemaNode::boolean()).introspect();
		assert!(matches!(meta.schema, Some(NestedMetadata::KeyValue { .. })));

		let meta = SchemaNode::function([SchemaNode::string()], SchemaNode::void()).introspect();
		match meta.schema {
			Some(NestedMetadata::Signature { input, output }) => {
				assert_eq!(input.kind, SchemaKind::Tuple);
				assert_eq!(output.kind, SchemaKind::Void);
			}
			other => panic!("unexpected nested metadata {other:?}"),
		}
	}

	#[rstest]
	fn test_discriminated_union_expands_types() {
		let cat = SchemaNode::object(ObjectShape::new().field("type", SchemaNode::literal("cat")));
		let dog = SchemaNode::object(ObjectShape::new().field("type", SchemaNode::literal("dog")));
		let meta = SchemaNode::discriminated_union("type", [cat, dog]).introspect();
		match meta.schema {
			Some(NestedMetadata::Discriminated {
				discriminator,
				types,
			}) => {
				assert_eq!(discriminator, "type");
				assert_eq!(types.len(), 2);
			}
			other => panic!("unexpected nested metadata {other:?}"),
		}
	}

	#[rstest]
	fn test_raw_nodes_only_when_requested() {
		let inner = SchemaNode::object(ObjectShape::new().field("a", SchemaNode::string()));
		let outer = inner.optional();

		assert!(outer.introspect().raw.is_none());

		let meta = outer.introspect_with(true);
		assert!(meta.raw_outer().unwrap().ptr_eq(&outer));
		assert!(meta.raw_inner().unwrap().ptr_eq(&inner));
		assert!(meta.fields().unwrap()["a"].raw.is_some());
	}

	#[rstest]
	fn test_lazy_is_not_resolved() {
		let meta = SchemaNode::lazy(SchemaNode::string).introspect();
		assert_eq!(meta.kind, SchemaKind::Lazy);
		assert_eq!(meta.base_type, BaseType::Any);
		assert!(meta.schema.is_none());
	}

	proptest::proptest! {
		#[test]
		fn prop_wrappers_keep_inner_kind(
			layers in proptest::collection::vec(0u8..3, 0..6),
			min in 0usize..32,
		) {
			let node = layers.iter().fold(SchemaNode::string().min_length(min), |node, layer| match layer {
				0 => node.optional(),
				1 => node.nullable(),
				_ => node.default_value("x"),
			});
			let meta = node.introspect();

			proptest::prop_assert_eq!(meta.kind, SchemaKind::String);
			proptest::prop_assert_eq!(meta.base_type, BaseType::String);
			proptest::prop_assert_eq!(meta.min_length, Some(min));
			proptest::prop_assert_eq!(meta.is_optional, layers.iter().any(|layer| *layer != 1));
			proptest::prop_assert_eq!(meta.is_nullable, layers.contains(&1));
		}
	}
}
