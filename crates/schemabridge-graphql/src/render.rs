//! Query document synthesis
//!
//! Walks the introspected output schema of a resolver and selects every
//! field a client can safely ask for. Sensitive fields never appear in the
//! document, incompatible kinds are skipped, and nesting is cut off at a
//! configurable depth.

use crate::document::{OperationType, QueryDocument, Selection, VariableDefinition};
use crate::error::RenderError;
use crate::naming::{NamePrefix, normalize_schema_name};
use indexmap::IndexMap;
use schemabridge_core::{
	BaseType, Metadata, NestedMetadata, SchemaKind, SchemaNode, lowercase_first_char,
	uppercase_first_char,
};

/// Default depth at which object fields are flattened to leaves.
pub const DEFAULT_MAX_FIELD_DEPTH: usize = 5;

/// Depth of the resolver's own fields. The operation and the resolver field
/// account for the levels above.
pub const START_DEPTH: usize = 2;

/// Kinds that need a hand-written query.
const INCOMPATIBLE: [SchemaKind; 8] = [
	SchemaKind::Record,
	SchemaKind::Intersection,
	SchemaKind::DiscriminatedUnion,
	SchemaKind::Void,
	SchemaKind::Function,
	SchemaKind::Promise,
	SchemaKind::Lazy,
	SchemaKind::Effects,
];

/// Kinds that never carry a sub-selection.
const LEAF: [SchemaKind; 7] = [
	SchemaKind::String,
	SchemaKind::Number,
	SchemaKind::Boolean,
	SchemaKind::Date,
	SchemaKind::Literal,
	SchemaKind::Enum,
	SchemaKind::NativeEnum,
];

/// Inputs of [`render_query`].
#[derive(Debug, Clone)]
pub struct RenderQueryOptions {
	pub resolver_name: String,
	/// Name of the operation variable, before its first character is lowercased.
	pub resolver_args_name: String,
	pub resolver_type: OperationType,
	pub input_schema: SchemaNode,
	pub output_schema: SchemaNode,
	pub max_field_depth: usize,
	/// Warn about skipped incompatible fields.
	pub log_warnings: bool,
}

impl RenderQueryOptions {
	/// Options for a query resolver, with its args named `<resolver_name>Args`.
	pub fn new(
		resolver_name: impl Into<String>,
		input_schema: impl Into<SchemaNode>,
		output_schema: impl Into<SchemaNode>,
	) -> Self {
		let resolver_name = resolver_name.into();
		Self {
			resolver_args_name: format!("{resolver_name}Args"),
			resolver_name,
			resolver_type: OperationType::Query,
			input_schema: input_schema.into(),
			output_schema: output_schema.into(),
			max_field_depth: DEFAULT_MAX_FIELD_DEPTH,
			log_warnings: true,
		}
	}

	pub fn resolver_args_name(mut self, name: impl Into<String>) -> Self {
		self.resolver_args_name = name.into();
		self
	}

	pub fn resolver_type(mut self, resolver_type: OperationType) -> Self {
		self.resolver_type = resolver_type;
		self
	}

	pub fn max_field_depth(mut self, depth: usize) -> Self {
		self.max_field_depth = depth;
		self
	}

	pub fn log_warnings(mut self, enabled: bool) -> Self {
		self.log_warnings = enabled;
		self
	}
}

/// Builds the query document for a resolver.
pub fn build_query_document(options: &RenderQueryOptions) -> QueryDocument {
	let args_meta = options.input_schema.introspect();
	let has_args = args_meta.fields().is_some_and(|fields| !fields.is_empty());

	let variable = has_args.then(|| {
		let schema_name = args_meta
			.name
			.clone()
			.unwrap_or_else(|| uppercase_first_char(&options.resolver_args_name));
		VariableDefinition {
			name: lowercase_first_char(&options.resolver_args_name),
			type_name: normalize_schema_name(&schema_name, NamePrefix::Input),
			required: args_meta.is_required(),
		}
	});

	let response_meta = options.output_schema.introspect();
	let renderer = FieldRenderer {
		max_field_depth: options.max_field_depth,
		log_warnings: options.log_warnings,
	};
	let fields = renderer.render_fields(&response_meta, START_DEPTH, None);

	QueryDocument {
		operation: options.resolver_type,
		name: options.resolver_name.clone(),
		variable,
		root: Selection::block(options.resolver_name.clone(), fields),
	}
}

/// Renders the query document for a resolver as text.
///
/// # Examples
///
/// ```
/// use schemabridge_core::{ObjectShape, Schema, SchemaNode};
/// use schemabridge_graphql::{RenderQueryOptions, render_query};
///
/// let args = Schema::new("GetPostArgs", ObjectShape::new().field("id", SchemaNode::string())).unwrap();
/// let post = Schema::new(
///     "Post",
///     ObjectShape::new()
///         .field("title", SchemaNode::string())
///         .field("tags", SchemaNode::array(SchemaNode::string())),
/// )
/// .unwrap();
///
/// let query = render_query(&RenderQueryOptions::new("getPost", args, post));
/// assert_eq!(
///     query,
///     "query getPost($getPostArgs: GetPostArgs!) {\n  getPost(args: $getPostArgs) {\n    title\n    tags\n  }\n}"
/// );
/// ```
pub fn render_query(options: &RenderQueryOptions) -> String {
	build_query_document(options).to_string()
}

struct FieldRenderer {
	max_field_depth: usize,
	log_warnings: bool,
}

impl FieldRenderer {
	/// Selections for the fields of `meta`. Failures stay local to this branch.
	fn render_fields(&self, meta: &Metadata, depth: usize, field_name: Option<&str>) -> Vec<Selection> {
		self.contained(meta, depth, field_name).unwrap_or_default()
	}

	/// Logs a failed branch and returns `None` for it.
	fn contained(&self, meta: &Metadata, depth: usize, field_name: Option<&str>) -> Option<Vec<Selection>> {
		match self.selections(meta, depth) {
			Ok(selections) => Some(selections),
			Err(error) => {
				tracing::error!(
					field = field_name.unwrap_or("<root>"),
					%error,
					schema = %serde_json::to_string_pretty(meta).unwrap_or_default(),
					"error rendering fields"
				);
				None
			}
		}
	}

	fn selections(&self, meta: &Metadata, depth: usize) -> Result<Vec<Selection>, RenderError> {
		let fields = selectable_fields(meta)?;
		let mut selections = Vec::with_capacity(fields.len());

		for (key, field) in fields {
			if field.is_sensitive {
				continue;
			}

			if INCOMPATIBLE.contains(&field.kind) {
				if self.log_warnings {
					tracing::warn!(
						field = %key,
						kind = %field.kind,
						"skipping incompatible type in automatic graphql query build; \
						 pass a custom graphql query, or stick to string, number, boolean, date, \
						 array, object, literal, enum, native enum and simple union fields"
					);
				}
				continue;
			}

			if LEAF.contains(&field.kind) || !has_sub_fields(field) {
				selections.push(Selection::leaf(key.as_str()));
				continue;
			}

			if depth >= self.max_field_depth {
				tracing::warn!(
					field = %key,
					max_field_depth = self.max_field_depth,
					"max depth reached in automatic graphql query build, selecting field as a leaf; \
					 raise max_field_depth or pass a custom graphql query"
				);
				selections.push(Selection::leaf(key.as_str()));
				continue;
			}

			// A branch that failed or selects nothing would leave an empty block
			match self.contained(field, depth + 1, Some(key)) {
				Some(children) if !children.is_empty() => {
					selections.push(Selection::block(key.as_str(), children));
				}
				_ => tracing::debug!(field = %key, "dropping field without selectable sub-fields"),
			}
		}

		Ok(selections)
	}
}

/// Objects and arrays of object-likes have fields to select.
fn has_sub_fields(meta: &Metadata) -> bool {
	match meta.base_type {
		BaseType::Object => true,
		BaseType::Array => meta
			.element()
			.is_some_and(|element| element.base_type.is_object_like()),
		_ => false,
	}
}

/// Fields of an object, or of the objects inside an array.
fn selectable_fields(meta: &Metadata) -> Result<&IndexMap<String, Metadata>, RenderError> {
	match &meta.schema {
		Some(NestedMetadata::Fields(fields)) => Ok(fields),
		Some(NestedMetadata::Element(element)) => selectable_fields(element),
		_ => Err(RenderError::NoSelectableFields { kind: meta.kind }),
	}
}
