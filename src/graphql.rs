//! Query document synthesis and data bridges.
//!
//! # Examples
//!
//! ```rust
//! # #[cfg(feature = "graphql")]
//! use schemabridge::graphql::{NamePrefix, normalize_schema_name};
//!
//! # #[cfg(feature = "graphql")]
//! assert_eq!(normalize_schema_name("User", NamePrefix::Input), "UserInput");
//! ```

#[cfg(feature = "graphql")]
pub use schemabridge_graphql::*;
