//! Schema model, introspection, validation, defaults and source regeneration.
//!
//! # Examples
//!
//! ```rust
//! use schemabridge::core::{ObjectShape, Schema, SchemaNode};
//!
//! let user = Schema::new("User", ObjectShape::new().field("id", SchemaNode::string())).unwrap();
//! assert_eq!(user.name(), "User");
//! ```

pub use schemabridge_core::*;
