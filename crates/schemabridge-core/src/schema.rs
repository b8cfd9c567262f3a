//! Named object schemas
//!
//! A [`Schema`] is an object node carrying a mandatory name. The name is the
//! canonical identifier used in generated query documents and regenerated
//! source. Derived schemas are new values with their own name; the schema
//! they were derived from is never touched.

use crate::error::{SchemaError, SchemaResult};
use crate::node::{NodeKind, ObjectShape, SchemaNode};
use std::ops::Deref;

/// Named object schema.
///
/// # Examples
///
/// ```
/// use schemabridge_core::{ObjectShape, Schema, SchemaNode};
///
/// let user = Schema::new(
///     "User",
///     ObjectShape::new()
///         .field("id", SchemaNode::string().unique())
///         .field("email", SchemaNode::string().email())
///         .field("password", SchemaNode::string().sensitive()),
/// )
/// .unwrap();
///
/// let public = user.pick_schema("UserPublic", &["id", "email"]).unwrap();
/// assert_eq!(public.name(), "UserPublic");
/// assert_eq!(user.shape().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Schema {
	node: SchemaNode,
	shape: ObjectShape,
}

impl Schema {
	/// Creates a named object schema.
	///
	/// # Errors
	///
	/// Returns [`SchemaError::MissingName`] if `name` is empty.
	pub fn new(name: impl Into<String>, shape: ObjectShape) -> SchemaResult<Self> {
		let name = name.into();
		if name.trim().is_empty() {
			return Err(SchemaError::MissingName);
		}
		Ok(Self {
			node: SchemaNode::object(shape.clone()).name_schema(name),
			shape,
		})
	}

	/// Wraps an existing unwrapped, named object node.
	pub fn from_node(node: SchemaNode) -> SchemaResult<Self> {
		let NodeKind::Object(shape) = node.node_kind() else {
			return Err(SchemaError::NotAnObject { kind: node.kind() });
		};
		match node.meta().name.as_deref() {
			Some(name) if !name.trim().is_empty() => Ok(Self {
				shape: shape.clone(),
				node,
			}),
			_ => Err(SchemaError::MissingName),
		}
	}

	pub fn name(&self) -> &str {
		self.node.meta().name.as_deref().unwrap_or_default()
	}

	pub fn shape(&self) -> &ObjectShape {
		&self.shape
	}

	pub fn node(&self) -> &SchemaNode {
		&self.node
	}

	pub fn into_node(self) -> SchemaNode {
		self.node
	}

	fn derive(&self, name: String, shape: ObjectShape) -> SchemaResult<Self> {
		if name.trim().is_empty() {
			return Err(SchemaError::MissingName);
		}
		Ok(Self {
			node: self
				.node
				.with_kind(NodeKind::Object(shape.clone()))
				.name_schema(name),
			shape,
		})
	}

	fn check_mask(&self, mask: &[&str]) -> SchemaResult<()> {
		match mask.iter().find(|key| !self.shape().contains_key(key)) {
			Some(field) => Err(SchemaError::UnknownField {
				schema: self.name().to_string(),
				field: field.to_string(),
			}),
			None => Ok(()),
		}
	}

	/// Derives a schema with only the fields named in `mask`, in declaration order.
	///
	/// # Errors
	///
	/// [`SchemaError::MissingName`] for an empty `new_name`,
	/// [`SchemaError::UnknownField`] if `mask` names an undeclared field.
	pub fn pick_schema(&self, new_name: impl Into<String>, mask: &[&str]) -> SchemaResult<Self> {
		self.check_mask(mask)?;
		let shape = self.shape().clone().retain(|key| mask.contains(&key));
		self.derive(new_name.into(), shape)
	}

	/// Derives a schema without the fields named in `mask`.
	///
	/// # Errors
	///
	/// Same as [`pick_schema`](Self::pick_schema).
	pub fn omit_schema(&self, new_name: impl Into<String>, mask: &[&str]) -> SchemaResult<Self> {
		self.check_mask(mask)?;
		let shape = self.shape().clone().retain(|key| !mask.contains(&key));
		self.derive(new_name.into(), shape)
	}

	/// Derives a schema with extra fields. Redeclared fields keep their position.
	pub fn extend_schema(&self, new_name: impl Into<String>, extra: ObjectShape) -> SchemaResult<Self> {
		let shape = self.shape().clone().merged(&extra);
		self.derive(new_name.into(), shape)
	}
}

impl Deref for Schema {
	type Target = SchemaNode;

	fn deref(&self) -> &SchemaNode {
		&self.node
	}
}

impl AsRef<SchemaNode> for Schema {
	fn as_ref(&self) -> &SchemaNode {
		&self.node
	}
}

impl From<Schema> for SchemaNode {
	fn from(schema: Schema) -> Self {
		schema.node
	}
}

impl From<&Schema> for SchemaNode {
	fn from(schema: &Schema) -> Self {
		schema.node.clone()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::kind::SchemaKind;
	use rstest::{fixture, rstest};

	#[fixture]
	fn user() -> Schema {
		let schema = Schema::new(
			"User",
			ObjectShape::new()
				.field("id", SchemaNode::string().unique())
				.field("email", SchemaNode::string().email())
				.field("password", SchemaNode::string().sensitive()),
		)
		.unwrap();
		Schema::from_node(schema.describe("A user")).unwrap()
	}

	#[rstest]
	#[case("")]
	#[case("   ")]
	fn test_new_requires_name(#[case] name: &str) {
		assert_eq!(
			Schema::new(name, ObjectShape::new()).unwrap_err(),
			SchemaError::MissingName
		);
	}

	#[rstest]
	fn test_pick_keeps_declaration_order(user: Schema) {
		let picked = user.pick_schema("UserPublic", &["email", "id"]).unwrap();
		assert_eq!(picked.shape().keys().collect::<Vec<_>>(), vec!["id", "email"]);
		assert_eq!(picked.name(), "UserPublic");
		assert_eq!(picked.meta().description.as_deref(), Some("A user"));
	}

	#[rstest]
	fn test_omit_leaves_source_untouched(user: Schema) {
		let omitted = user.omit_schema("UserSafe", &["password"]).unwrap();
		assert_eq!(omitted.shape().keys().collect::<Vec<_>>(), vec!["id", "email"]);
		assert_eq!(user.shape().len(), 3);
		assert_eq!(user.name(), "User");
	}

	#[rstest]
	fn test_mask_with_unknown_field_fails(user: Schema) {
		let err = user.pick_schema("UserAge", &["age"]).unwrap_err();
		assert_eq!(
			err,
			SchemaError::UnknownField {
				schema: "User".into(),
				field: "age".into(),
			}
		);
	}

	#[rstest]
	fn test_extend_appends_and_replaces_in_place(user: Schema) {
		let extended = user
			.extend_schema(
				"UserWithAge",
				ObjectShape::new()
					.field("age", SchemaNode::number())
					.field("email", SchemaNode::string()),
			)
			.unwrap();

		assert_eq!(
			extended.shape().keys().collect::<Vec<_>>(),
			vec!["id", "email", "password", "age"]
		);
		assert!(!extended.shape().get("email").unwrap().introspect().is_email);
	}

	#[rstest]
	fn test_derived_schema_requires_new_name(user: Schema) {
		assert_eq!(
			user.extend_schema("", ObjectShape::new()).unwrap_err(),
			SchemaError::MissingName
		);
	}

	#[rstest]
	fn test_shape_tracks_node_fields(user: Schema) {
		let derived = user
			.omit_schema("UserSafe", &["password"])
			.unwrap()
			.extend_schema("UserWithAge", ObjectShape::new().field("age", SchemaNode::number()))
			.unwrap();
		let rewrapped = Schema::from_node(derived.node().clone()).unwrap();

		for schema in [&derived, &rewrapped] {
			let meta = schema.introspect();
			let node_fields: Vec<&str> = meta.fields().unwrap().keys().map(String::as_str).collect();
			assert_eq!(schema.shape().keys().collect::<Vec<_>>(), node_fields);
		}
		assert_eq!(rewrapped.shape().keys().collect::<Vec<_>>(), vec!["id", "email", "age"]);
	}

	#[rstest]
	fn test_from_node_rejects_wrapped_nodes(user: Schema) {
		let err = Schema::from_node(user.optional()).unwrap_err();
		assert_eq!(err, SchemaError::NotAnObject { kind: SchemaKind::Optional });
	}
}
