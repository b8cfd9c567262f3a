//! GraphQL side of schemabridge
//!
//! Synthesizes query documents from introspected response schemas and
//! assembles [`DataBridge`]s that pair a resolver with its schemas.
//!
//! ## Example
//!
//! ```
//! use schemabridge_core::{ObjectShape, Schema, SchemaNode};
//! use schemabridge_graphql::{BridgeQuery, DataBridge};
//!
//! let args = Schema::new("GetUserArgs", ObjectShape::new().field("id", SchemaNode::string())).unwrap();
//! let user = Schema::new(
//!     "User",
//!     ObjectShape::new()
//!         .field("id", SchemaNode::string())
//!         .field("password", SchemaNode::string().sensitive()),
//! )
//! .unwrap();
//!
//! let bridge = DataBridge::builder()
//!     .resolver_name("getUser")
//!     .input_schema(args)
//!     .output_schema(user)
//!     .build()
//!     .unwrap();
//!
//! let query = bridge.graphql_query(false, true);
//! assert!(matches!(query, BridgeQuery::Document(_)));
//! assert!(!query.as_str().contains("password"));
//! ```

pub mod bridge;
pub mod document;
pub mod error;
pub mod naming;
pub mod render;

pub use bridge::{AllowedMethod, BridgeQuery, DataBridge, DataBridgeBuilder, ExecutableQuery};
pub use document::{OperationType, QueryDocument, Selection, VariableDefinition};
pub use error::{BridgeError, BridgeResult};
pub use naming::{INPUT_INDICATORS, NamePrefix, normalize_schema_name};
pub use render::{
	DEFAULT_MAX_FIELD_DEPTH, RenderQueryOptions, START_DEPTH, build_query_document, render_query,
};
