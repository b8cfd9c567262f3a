//! Data bridges between resolvers and their consumers
//!
//! A [`DataBridge`] pairs a resolver name with its args and response schemas
//! and hands out the GraphQL document used to call it: either the one given
//! at build time, or one synthesized from the response schema.

use crate::document::OperationType;
use crate::error::{BridgeError, BridgeResult};
use crate::render::{DEFAULT_MAX_FIELD_DEPTH, RenderQueryOptions, render_query};
use async_graphql::parser::parse_query;
use async_graphql::parser::types::{ExecutableDocument, OperationType as ParsedOperationType};
use schemabridge_core::SchemaNode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Transport methods a bridge may be called with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AllowedMethod {
	Get,
	Post,
	Put,
	Delete,
	Graphql,
}

/// A parsed GraphQL document together with its source text.
#[derive(Debug, Clone)]
pub struct ExecutableQuery {
	source: String,
	document: ExecutableDocument,
}

impl ExecutableQuery {
	/// Parses `source` as an executable GraphQL document.
	pub fn parse(source: impl Into<String>) -> BridgeResult<Self> {
		let source = source.into();
		match parse_query(&source) {
			Ok(document) => Ok(Self { source, document }),
			Err(error) => Err(BridgeError::InvalidDocument {
				document: source,
				message: error.to_string(),
			}),
		}
	}

	pub fn source(&self) -> &str {
		&self.source
	}

	pub fn document(&self) -> &ExecutableDocument {
		&self.document
	}

	/// Names and types of the operations in the document.
	pub fn operations(&self) -> impl Iterator<Item = (Option<&str>, ParsedOperationType)> {
		self.document
			.operations
			.iter()
			.map(|(name, operation)| (name.map(|name| name.as_str()), operation.node.ty))
	}
}

/// What [`DataBridge::graphql_query`] hands out.
#[derive(Debug, Clone)]
pub enum BridgeQuery {
	/// Freshly rendered document text.
	Printed(String),
	/// The parsed document, either caller supplied or synthesized at build time.
	Document(Arc<ExecutableQuery>),
}

impl BridgeQuery {
	/// Document text of either variant.
	pub fn as_str(&self) -> &str {
		match self {
			BridgeQuery::Printed(text) => text,
			BridgeQuery::Document(query) => query.source(),
		}
	}
}

/// Builder for [`DataBridge`].
///
/// # Examples
///
/// ```
/// use schemabridge_core::{ObjectShape, Schema, SchemaNode};
/// use schemabridge_graphql::{DataBridge, OperationType};
///
/// let args = Schema::new("UpdateUserArgs", ObjectShape::new().field("id", SchemaNode::string())).unwrap();
/// let user = Schema::new("User", ObjectShape::new().field("id", SchemaNode::string())).unwrap();
///
/// let bridge = DataBridge::builder()
///     .resolver_name("updateUser")
///     .input_schema(args)
///     .output_schema(user)
///     .is_mutation(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(bridge.resolver_type(), OperationType::Mutation);
/// assert_eq!(bridge.resolver_args_name(), "updateUserArgs");
/// ```
#[derive(Debug, Clone, Default)]
pub struct DataBridgeBuilder {
	resolver_name: Option<String>,
	resolver_type: Option<OperationType>,
	resolver_args_name: Option<String>,
	input_schema: Option<SchemaNode>,
	output_schema: Option<SchemaNode>,
	api_path: Option<String>,
	allowed_methods: Option<Vec<AllowedMethod>>,
	graphql_query: Option<String>,
	is_mutation: bool,
	max_field_depth: Option<usize>,
	log_warnings: Option<bool>,
}

impl DataBridgeBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn resolver_name(mut self, name: impl Into<String>) -> Self {
		self.resolver_name = Some(name.into());
		self
	}

	pub fn resolver_type(mut self, resolver_type: OperationType) -> Self {
		self.resolver_type = Some(resolver_type);
		self
	}

	pub fn resolver_args_name(mut self, name: impl Into<String>) -> Self {
		self.resolver_args_name = Some(name.into());
		self
	}

	pub fn input_schema(mut self, schema: impl Into<SchemaNode>) -> Self {
		self.input_schema = Some(schema.into());
		self
	}

	pub fn output_schema(mut self, schema: impl Into<SchemaNode>) -> Self {
		self.output_schema = Some(schema.into());
		self
	}

	pub fn api_path(mut self, path: impl Into<String>) -> Self {
		self.api_path = Some(path.into());
		self
	}

	pub fn allowed_methods(mut self, methods: impl IntoIterator<Item = AllowedMethod>) -> Self {
		self.allowed_methods = Some(methods.into_iter().collect());
		self
	}

	/// Hand-written document used instead of a synthesized one.
	pub fn graphql_query(mut self, query: impl Into<String>) -> Self {
		self.graphql_query = Some(query.into());
		self
	}

	pub fn is_mutation(mut self, is_mutation: bool) -> Self {
		self.is_mutation = is_mutation;
		self
	}

	pub fn max_field_depth(mut self, depth: usize) -> Self {
		self.max_field_depth = Some(depth);
		self
	}

	/// Warn about skipped fields while synthesizing the document. On by default.
	pub fn log_warnings(mut self, enabled: bool) -> Self {
		self.log_warnings = Some(enabled);
		self
	}

	/// Validates the configuration and builds the bridge.
	///
	/// # Errors
	///
	/// Returns an error if the resolver name or either schema is missing, or
	/// if the document does not parse. Without a hand-written document one is
	/// synthesized here, so a response schema with no selectable fields fails
	/// with [`BridgeError::InvalidDocument`].
	pub fn build(self) -> BridgeResult<DataBridge> {
		let resolver_name = self
			.resolver_name
			.filter(|name| !name.trim().is_empty())
			.ok_or(BridgeError::MissingResolverName)?;
		let input_schema = self.input_schema.ok_or(BridgeError::MissingInputSchema)?;
		let output_schema = self.output_schema.ok_or(BridgeError::MissingOutputSchema)?;

		let custom_query = self
			.graphql_query
			.map(ExecutableQuery::parse)
			.transpose()?
			.map(Arc::new);

		let contains_mutation = custom_query
			.as_ref()
			.is_some_and(|query| query.source().contains("mutation"));
		let is_mutation = self.is_mutation || contains_mutation;
		let resolver_type = self.resolver_type.unwrap_or(if is_mutation {
			OperationType::Mutation
		} else {
			OperationType::Query
		});

		let bridge = DataBridgeParts {
			resolver_args_name: self
				.resolver_args_name
				.unwrap_or_else(|| format!("{resolver_name}Args")),
			resolver_name,
			resolver_type,
			input_schema,
			output_schema,
			max_field_depth: self.max_field_depth.unwrap_or(DEFAULT_MAX_FIELD_DEPTH),
		};

		let (query, is_custom_query) = match custom_query {
			Some(query) => (query, true),
			None => {
				let options = bridge.render_options(self.log_warnings.unwrap_or(true));
				(Arc::new(ExecutableQuery::parse(render_query(&options))?), false)
			}
		};

		Ok(DataBridge {
			parts: bridge,
			api_path: self.api_path,
			allowed_methods: self.allowed_methods,
			is_mutation,
			query,
			is_custom_query,
		})
	}
}

/// What the renderer needs to know about a bridge's resolver.
#[derive(Debug, Clone)]
struct DataBridgeParts {
	resolver_name: String,
	resolver_type: OperationType,
	resolver_args_name: String,
	input_schema: SchemaNode,
	output_schema: SchemaNode,
	max_field_depth: usize,
}

impl DataBridgeParts {
	fn render_options(&self, log_warnings: bool) -> RenderQueryOptions {
		RenderQueryOptions::new(
			self.resolver_name.clone(),
			self.input_schema.clone(),
			self.output_schema.clone(),
		)
		.resolver_args_name(self.resolver_args_name.clone())
		.resolver_type(self.resolver_type)
		.max_field_depth(self.max_field_depth)
		.log_warnings(log_warnings)
	}
}

/// A resolver paired with its schemas and query document.
///
/// Immutable after construction. The document is parsed, or synthesized and
/// parsed, by [`DataBridgeBuilder::build`].
#[derive(Debug, Clone)]
pub struct DataBridge {
	parts: DataBridgeParts,
	api_path: Option<String>,
	allowed_methods: Option<Vec<AllowedMethod>>,
	is_mutation: bool,
	query: Arc<ExecutableQuery>,
	is_custom_query: bool,
}

impl DataBridge {
	pub fn builder() -> DataBridgeBuilder {
		DataBridgeBuilder::new()
	}

	pub fn resolver_name(&self) -> &str {
		&self.parts.resolver_name
	}

	pub fn resolver_type(&self) -> OperationType {
		self.parts.resolver_type
	}

	pub fn resolver_args_name(&self) -> &str {
		&self.parts.resolver_args_name
	}

	pub fn input_schema(&self) -> &SchemaNode {
		&self.parts.input_schema
	}

	pub fn output_schema(&self) -> &SchemaNode {
		&self.parts.output_schema
	}

	pub fn api_path(&self) -> Option<&str> {
		self.api_path.as_deref()
	}

	pub fn allowed_methods(&self) -> Option<&[AllowedMethod]> {
		self.allowed_methods.as_deref()
	}

	pub fn is_mutation(&self) -> bool {
		self.is_mutation
	}

	pub fn max_field_depth(&self) -> usize {
		self.parts.max_field_depth
	}

	/// Whether the document was supplied to the builder rather than synthesized.
	pub fn has_custom_query(&self) -> bool {
		self.is_custom_query
	}

	/// Renderer options for this bridge's resolver.
	pub fn render_options(&self, log_warnings: bool) -> RenderQueryOptions {
		self.parts.render_options(log_warnings)
	}

	/// The document used to call this bridge's resolver.
	///
	/// With `show_printed` a document is rendered fresh from the schemas and
	/// returned as text, warning about skipped fields if `log_warnings` is
	/// set. Otherwise the document parsed at build time is returned.
	pub fn graphql_query(&self, show_printed: bool, log_warnings: bool) -> BridgeQuery {
		if show_printed {
			return BridgeQuery::Printed(render_query(&self.render_options(log_warnings)));
		}
		BridgeQuery::Document(Arc::clone(&self.query))
	}
}
