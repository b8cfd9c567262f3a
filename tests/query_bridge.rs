//! End-to-end tests for query synthesis and data bridges.

#![cfg(all(feature = "graphql", feature = "conf"))]

use rstest::*;
use schemabridge::prelude::*;
use schemabridge::{BridgeError, DataBridgeBuilder};
use std::fs;
use tempfile::TempDir;

#[fixture]
fn user() -> Schema {
	Schema::new(
		"User",
		ObjectShape::new()
			.field("id", SchemaNode::string().unique().index())
			.field("email", SchemaNode::string())
			.field("password", SchemaNode::string().sensitive()),
	)
	.expect("Failed to build User schema")
}

#[fixture]
fn no_args() -> Schema {
	Schema::new("GetUserArgs", ObjectShape::new()).expect("Failed to build args schema")
}

#[rstest]
fn test_get_user_query_without_args(user: Schema, no_args: Schema) {
	let query = render_query(&RenderQueryOptions::new("getUser", no_args, user));
	assert_eq!(query, "query getUser {\n  getUser {\n    id\n    email\n  }\n}");
}

#[rstest]
fn test_bridge_document_matches_printed_query(user: Schema) {
	let args = Schema::new("GetUserArgs", ObjectShape::new().field("id", SchemaNode::string()))
		.expect("Failed to build args schema");
	let bridge = DataBridge::builder()
		.resolver_name("getUser")
		.input_schema(args)
		.output_schema(user)
		.api_path("/api/user/[id]")
		.allowed_methods([AllowedMethod::Get, AllowedMethod::Graphql])
		.build()
		.expect("Failed to build data bridge");

	let printed = bridge.graphql_query(true, false);
	let document = bridge.graphql_query(false, false);

	assert!(matches!(document, BridgeQuery::Document(_)));
	assert_eq!(printed.as_str(), document.as_str());
	assert_eq!(
		document.as_str(),
		"query getUser($getUserArgs: GetUserArgs!) {\n  getUser(args: $getUserArgs) {\n    id\n    email\n  }\n}"
	);
}

#[rstest]
fn test_custom_mutation_is_detected(user: Schema, no_args: Schema) {
	let bridge = DataBridgeBuilder::new()
		.resolver_name("deleteUser")
		.input_schema(no_args)
		.output_schema(user)
		.graphql_query("mutation deleteUser { deleteUser { id } }")
		.build()
		.expect("Failed to build data bridge");

	assert!(bridge.is_mutation());
	assert_eq!(bridge.resolver_type(), OperationType::Mutation);
	let query = bridge.graphql_query(false, true);
	assert_eq!(query.as_str(), "mutation deleteUser { deleteUser { id } }");
}

#[rstest]
fn test_missing_schemas_fail_construction(user: Schema) {
	let err = DataBridge::builder()
		.resolver_name("getUser")
		.output_schema(user)
		.build()
		.unwrap_err();
	assert_eq!(err, BridgeError::MissingInputSchema);
}

#[rstest]
fn test_empty_response_fails_construction(no_args: Schema) {
	let empty = Schema::new("Empty", ObjectShape::new()).expect("Failed to build Empty schema");
	let err = DataBridge::builder()
		.resolver_name("ping")
		.input_schema(no_args)
		.output_schema(empty)
		.log_warnings(false)
		.build()
		.unwrap_err();
	assert!(matches!(err, BridgeError::InvalidDocument { .. }));
}

#[rstest]
fn test_settings_drive_query_depth(user: Schema, no_args: Schema) {
	let temp_dir = TempDir::new().expect("Failed to create temporary directory");
	let path = temp_dir.path().join("schemabridge.toml");
	fs::write(&path, "[query]\nmax_field_depth = 2\nlog_warnings = false\n")
		.expect("Failed to write settings file");

	let settings: BridgeSettings = schemabridge::conf::BridgeSettings::builder(&path)
		.build()
		.expect("Failed to build settings")
		.into_typed()
		.expect("Failed to deserialize settings");

	let post = Schema::new(
		"Post",
		ObjectShape::new()
			.field("title", SchemaNode::string())
			.field("author", user.node().clone()),
	)
	.expect("Failed to build Post schema");

	let bridge = settings
		.query
		.configure_bridge(DataBridge::builder())
		.resolver_name("getPost")
		.input_schema(no_args)
		.output_schema(post)
		.build()
		.expect("Failed to build data bridge");

	let printed = bridge.graphql_query(true, settings.query.log_warnings);
	assert_eq!(
		printed.as_str(),
		"query getPost {\n  getPost {\n    title\n    author\n  }\n}"
	);
}
