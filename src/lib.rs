//! # schemabridge
//!
//! Schema introspection and data bridges for apps that share data schemas
//! between a resolver layer and its clients.
//!
//! Schemas are declared once as [`SchemaNode`] trees. From a schema,
//! schemabridge can:
//!
//! - Introspect it into a flat, serializable [`Metadata`] tree
//! - Derive new named schemas with pick, omit and extend
//! - Validate JSON values and merge them over defaults or examples
//! - Regenerate the schema's declaration source
//! - Synthesize the GraphQL query document for a resolver returning it
//!
//! ## Feature Flags
//!
//! - `graphql` - Query renderer and data bridge assembly
//! - `conf` - Layered settings (defaults < TOML file < environment)
//! - `full` (default) - All of the above
//!
//! ## Quick Example
//!
//! ```rust
//! use schemabridge::prelude::*;
//!
//! let user = Schema::new(
//!     "User",
//!     ObjectShape::new()
//!         .field("id", SchemaNode::string().uuid())
//!         .field("email", SchemaNode::string().email())
//!         .field("password", SchemaNode::string().sensitive()),
//! )
//! .unwrap();
//!
//! let public = user.omit_schema("UserPublic", &["password"]).unwrap();
//! assert_eq!(public.shape().keys().collect::<Vec<_>>(), ["id", "email"]);
//!
//! # #[cfg(feature = "graphql")]
//! # {
//! let args = Schema::new("GetUserArgs", ObjectShape::new().field("id", SchemaNode::string())).unwrap();
//! let query = render_query(&RenderQueryOptions::new("getUser", args, user));
//! assert!(query.starts_with("query getUser($getUserArgs: GetUserArgs!)"));
//! assert!(!query.contains("password"));
//! # }
//! ```

pub mod conf;
pub mod core;
pub mod graphql;

pub use schemabridge_core::{
	ApplyDefaultsOptions, BaseType, DocumentationProps, InputOptions, Metadata, NestedMetadata,
	ObjectShape, SafeParse, Schema, SchemaError, SchemaKind, SchemaNode, SchemaRegistry,
	SchemaResult, SourceFlavor, ValidationError, ValidationIssue, input_options, introspect,
	render_schema_source,
};

#[cfg(feature = "graphql")]
pub use schemabridge_graphql::{
	AllowedMethod, BridgeError, BridgeQuery, BridgeResult, DataBridge, DataBridgeBuilder,
	NamePrefix, OperationType, RenderQueryOptions, normalize_schema_name, render_query,
};

#[cfg(feature = "conf")]
pub use schemabridge_conf::{BridgeSettings, SettingsBuilder, SettingsError};

/// Commonly used types
pub mod prelude {
	pub use crate::{
		ApplyDefaultsOptions, Metadata, ObjectShape, Schema, SchemaError, SchemaKind, SchemaNode,
		SchemaRegistry, SourceFlavor, input_options,
	};

	#[cfg(feature = "graphql")]
	pub use crate::{
		AllowedMethod, BridgeQuery, DataBridge, OperationType, RenderQueryOptions, render_query,
	};

	#[cfg(feature = "conf")]
	pub use crate::BridgeSettings;

	pub use serde_json::{Value, json};
}
