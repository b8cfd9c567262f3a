//! Property-based tests for introspection, defaults and query synthesis.

#![cfg(feature = "graphql")]

use proptest::prelude::*;
use schemabridge::graphql::{START_DEPTH, build_query_document};
use schemabridge::prelude::*;
use schemabridge::BaseType;

/// Distinct field names, each flagged sensitive or not, in generation order.
fn fields_strategy() -> impl Strategy<Value = Vec<(String, bool)>> {
	prop::collection::vec(("[a-z]{1,8}", any::<bool>()), 1..8).prop_map(|fields| {
		let mut seen: Vec<(String, bool)> = Vec::new();
		for (name, sensitive) in fields {
			if !seen.iter().any(|(existing, _)| *existing == name) {
				seen.push((name, sensitive));
			}
		}
		seen
	})
}

fn string_field(sensitive: bool) -> SchemaNode {
	let node = SchemaNode::string();
	if sensitive { node.sensitive() } else { node }
}

/// A schema with the generated fields plus a `nested` object carrying the
/// same fields.
fn nested_schema(fields: &[(String, bool)]) -> Schema {
	let shape: ObjectShape = fields
		.iter()
		.map(|(name, sensitive)| (name.clone(), string_field(*sensitive)))
		.collect();
	let inner = Schema::new("Inner", shape.clone()).unwrap();
	Schema::new("Outer", shape.field("nested", inner)).unwrap()
}

fn complete_data(fields: &[(String, bool)], value: &str) -> Value {
	let flat: serde_json::Map<String, Value> = fields
		.iter()
		.map(|(name, _)| (name.clone(), json!(value)))
		.collect();
	let mut outer = flat.clone();
	outer.insert("nested".to_string(), Value::Object(flat));
	Value::Object(outer)
}

fn chain(levels: usize) -> ObjectShape {
	(0..levels).fold(
		ObjectShape::new().field("leaf", SchemaNode::string()),
		|inner, _| ObjectShape::new().field("next", SchemaNode::object(inner)),
	)
}

proptest! {
	/// Introspected fields keep declaration order.
	#[test]
	fn prop_field_order_is_declaration_order(fields in fields_strategy()) {
		let schema = nested_schema(&fields);
		let meta = schema.introspect();
		let keys: Vec<&str> = meta.fields().unwrap().keys().map(String::as_str).collect();

		let mut expected: Vec<&str> = fields.iter().map(|(name, _)| name.as_str()).collect();
		if !expected.contains(&"nested") {
			expected.push("nested");
		}
		prop_assert_eq!(keys, expected);
	}

	/// Literal base types follow the literal value.
	#[test]
	fn prop_literal_base_type(number in any::<i32>(), flag in any::<bool>(), text in "[a-z]{0,8}") {
		prop_assert_eq!(SchemaNode::literal(number).introspect().base_type, BaseType::Number);
		prop_assert_eq!(SchemaNode::literal(flag).introspect().base_type, BaseType::Boolean);
		prop_assert_eq!(SchemaNode::literal(text).introspect().base_type, BaseType::String);
	}

	/// Applying defaults to complete, valid data is idempotent.
	#[test]
	fn prop_apply_defaults_idempotent(fields in fields_strategy(), value in "[a-z0-9 ]{0,12}") {
		let schema = nested_schema(&fields);
		let data = complete_data(&fields, &value);
		let options = ApplyDefaultsOptions::new();

		let once = schema.apply_defaults(&data, options);
		let twice = schema.apply_defaults(&once, options);
		prop_assert_eq!(once, twice);
	}

	/// Sensitive fields never survive `strip_sensitive`, at any depth.
	#[test]
	fn prop_strip_sensitive(fields in fields_strategy(), empty in any::<bool>()) {
		let schema = nested_schema(&fields);
		let data = if empty { json!({}) } else { complete_data(&fields, "x") };
		let result = schema.apply_defaults(&data, ApplyDefaultsOptions::new().strip_sensitive(true));

		for (name, sensitive) in &fields {
			if *sensitive && name != "nested" {
				prop_assert!(result.get(name).is_none());
				if let Some(nested) = result.get("nested") {
					prop_assert!(nested.get(name).is_none());
				}
			}
		}
	}

	/// Undeclared keys never survive `strip_unknown`.
	#[test]
	fn prop_strip_unknown(fields in fields_strategy(), extra in "[A-Z]{1,8}") {
		let schema = nested_schema(&fields);
		let mut data = complete_data(&fields, "x");
		data[extra.as_str()] = json!(1);
		data["nested"][extra.as_str()] = json!(1);

		let result = schema.apply_defaults(&data, ApplyDefaultsOptions::new().strip_unknown(true));
		prop_assert!(result.get(&extra).is_none());
		prop_assert!(result["nested"].get(&extra).is_none());
	}

	/// Synthesized queries never select sensitive fields.
	#[test]
	fn prop_query_excludes_sensitive(fields in fields_strategy()) {
		let schema = nested_schema(&fields);
		let args = Schema::new("Args", ObjectShape::new()).unwrap();
		let query = render_query(&RenderQueryOptions::new("load", args, schema).log_warnings(false));

		for (name, sensitive) in &fields {
			if *sensitive && name != "nested" {
				prop_assert!(!query.lines().any(|line| line.trim() == name));
			}
		}
	}

	/// Nesting below the resolver field is bounded by the depth limit.
	#[test]
	fn prop_query_depth_bounded(levels in 0usize..12, max_field_depth in 2usize..8) {
		let output = Schema::new("Deep", chain(levels)).unwrap();
		let args = Schema::new("Args", ObjectShape::new()).unwrap();
		let options = RenderQueryOptions::new("deep", args, output)
			.max_field_depth(max_field_depth)
			.log_warnings(false);

		let document = build_query_document(&options);
		prop_assert!(document.root.nesting() <= max_field_depth.saturating_sub(START_DEPTH) + 1);
	}
}
