//! Build-time schema registry
//!
//! Schemas and the partial field sets other modules contribute to them are
//! registered explicitly. Iteration always follows registration order, so
//! generated artifacts are deterministic.

use crate::codegen::{SourceFlavor, render_schema_source};
use crate::error::{SchemaError, SchemaResult};
use crate::node::ObjectShape;
use crate::schema::Schema;
use indexmap::IndexMap;

/// Registered schemas and their partials.
///
/// # Examples
///
/// ```
/// use schemabridge_core::{ObjectShape, Schema, SchemaNode, SchemaRegistry};
///
/// let mut registry = SchemaRegistry::new();
/// registry
///     .register(Schema::new("User", ObjectShape::new().field("id", SchemaNode::string())).unwrap())
///     .unwrap();
/// registry.register_partial("User", ObjectShape::new().field("avatar", SchemaNode::string().url()));
///
/// let user = registry.expanded("User").unwrap();
/// assert_eq!(user.shape().keys().collect::<Vec<_>>(), vec!["id", "avatar"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
	schemas: IndexMap<String, Schema>,
	partials: IndexMap<String, Vec<ObjectShape>>,
}

impl SchemaRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a schema under its name.
	///
	/// # Errors
	///
	/// Returns [`SchemaError::DuplicateSchema`] if the name is taken.
	pub fn register(&mut self, schema: Schema) -> SchemaResult<()> {
		let name = schema.name().to_string();
		if self.schemas.contains_key(&name) {
			return Err(SchemaError::DuplicateSchema(name));
		}
		self.schemas.insert(name, schema);
		Ok(())
	}

	/// Adds fields to the schema called `schema_name`.
	///
	/// The schema does not have to be registered yet.
	pub fn register_partial(&mut self, schema_name: impl Into<String>, shape: ObjectShape) {
		self.partials.entry(schema_name.into()).or_default().push(shape);
	}

	pub fn get(&self, name: &str) -> Option<&Schema> {
		self.schemas.get(name)
	}

	/// The schema extended with all of its partials, under the same name.
	///
	/// # Errors
	///
	/// Returns [`SchemaError::UnknownSchema`] if no schema has that name.
	pub fn expanded(&self, name: &str) -> SchemaResult<Schema> {
		let schema = self
			.get(name)
			.ok_or_else(|| SchemaError::UnknownSchema(name.to_string()))?;
		let Some(partials) = self.partials.get(name) else {
			return Ok(schema.clone());
		};
		let extra = partials
			.iter()
			.fold(ObjectShape::new(), |acc, partial| acc.merged(partial));
		schema.extend_schema(name, extra)
	}

	/// Registered names, in registration order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.schemas.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.schemas.len()
	}

	pub fn is_empty(&self) -> bool {
		self.schemas.is_empty()
	}

	/// Names that received partials but were never registered themselves.
	pub fn orphan_partials(&self) -> Vec<&str> {
		self.partials
			.keys()
			.filter(|name| !self.schemas.contains_key(*name))
			.map(String::as_str)
			.collect()
	}

	/// Regenerated source of every registered schema, partials included.
	pub fn render_sources(&self, flavor: SourceFlavor) -> SchemaResult<IndexMap<String, String>> {
		for orphan in self.orphan_partials() {
			tracing::debug!(schema = orphan, "partials registered for an unknown schema");
		}
		self.names()
			.map(|name| {
				let schema = self.expanded(name)?;
				Ok((name.to_string(), render_schema_source(&schema.introspect(), flavor)))
			})
			.collect()
	}
}
