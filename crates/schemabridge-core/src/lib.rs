//! Schema introspection and data shaping for schemabridge
//!
//! This crate provides the schema side of the bridge:
//! - An immutable [`SchemaNode`] model with attached metadata (descriptions,
//!   examples, sensitivity and index flags)
//! - Named object schemas with pick/omit/extend derivation
//! - Introspection into flattened, serializable [`Metadata`] trees
//! - JSON value validation and defaults application
//! - Regeneration of schema source from metadata
//! - An explicit build-time schema registry

pub mod case;
pub mod codegen;
pub mod defaults;
pub mod docs;
pub mod error;
pub mod introspect;
pub mod kind;
pub mod metadata;
pub mod node;
pub mod options;
pub mod registry;
pub mod schema;
pub mod validate;

pub use case::{lowercase_first_char, uppercase_first_char};
pub use codegen::{
	Arg, BaseCall, FieldDefinition, Modifier, SchemaDefinition, SourceFlavor, render_schema_source,
};
pub use defaults::ApplyDefaultsOptions;
pub use docs::DocumentationProps;
pub use error::{IssueCode, SchemaError, SchemaResult, ValidationError, ValidationIssue};
pub use introspect::introspect;
pub use kind::{BaseType, SchemaKind};
pub use metadata::{LiteralType, Metadata, NestedMetadata, RESERVED_KEYS, RawNodes, is_reserved_key};
pub use node::{
	AttachedMeta, LazyGetter, LengthChecks, NodeKind, NumberChecks, ObjectShape, Refinement,
	SchemaNode, StringChecks,
};
pub use options::{InputOptions, input_options};
pub use registry::SchemaRegistry;
pub use schema::Schema;
pub use validate::SafeParse;
