//! Node kind tags and their coarse serialization categories

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag identifying what a [`SchemaNode`](crate::SchemaNode) describes.
///
/// The first 27 variants are the kinds an unwrapped (innermost) node can
/// have. `Optional`, `Nullable` and `Default` only ever appear on wrapping
/// layers and are peeled off during introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SchemaKind {
	// Primitives
	String,
	Number,
	Boolean,
	Date,
	// Advanced & object-likes
	Enum,
	Array,
	Object,
	// Mostly supported
	Null,
	Undefined,
	Tuple,
	Union,
	Literal,
	NativeEnum,
	// Might work, not advised
	#[default]
	Any,
	Record,
	Unknown,
	BigInt,
	Symbol,
	Intersection,
	DiscriminatedUnion,
	Map,
	Set,
	// Unsupported in data schemas
	Void,
	Function,
	Promise,
	Lazy,
	Effects,
	// Wrapping layers
	Optional,
	Nullable,
	Default,
}

impl SchemaKind {
	/// Every kind an innermost node can have.
	pub const INNERMOST: [SchemaKind; 27] = [
		SchemaKind::String,
		SchemaKind::Number,
		SchemaKind::Boolean,
		SchemaKind::Date,
		SchemaKind::Enum,
		SchemaKind::Array,
		SchemaKind::Object,
		SchemaKind::Null,
		SchemaKind::Undefined,
		SchemaKind::Tuple,
		SchemaKind::Union,
		SchemaKind::Literal,
		SchemaKind::NativeEnum,
		SchemaKind::Any,
		SchemaKind::Record,
		SchemaKind::Unknown,
		SchemaKind::BigInt,
		SchemaKind::Symbol,
		SchemaKind::Intersection,
		SchemaKind::DiscriminatedUnion,
		SchemaKind::Map,
		SchemaKind::Set,
		SchemaKind::Void,
		SchemaKind::Function,
		SchemaKind::Promise,
		SchemaKind::Lazy,
		SchemaKind::Effects,
	];

	/// Returns the serialization category for this kind.
	///
	/// # Examples
	///
	/// ```
	/// use schemabridge_core::{BaseType, SchemaKind};
	///
	/// assert_eq!(SchemaKind::Enum.base_type(), BaseType::String);
	/// assert_eq!(SchemaKind::Set.base_type(), BaseType::Array);
	/// assert_eq!(SchemaKind::Union.base_type(), BaseType::Any);
	/// ```
	pub const fn base_type(self) -> BaseType {
		match self {
			SchemaKind::String | SchemaKind::Enum | SchemaKind::Symbol => BaseType::String,
			SchemaKind::Number | SchemaKind::BigInt => BaseType::Number,
			SchemaKind::Boolean => BaseType::Boolean,
			SchemaKind::Date => BaseType::Date,
			SchemaKind::Array | SchemaKind::Set => BaseType::Array,
			SchemaKind::Object | SchemaKind::Record => BaseType::Object,
			SchemaKind::Null => BaseType::Null,
			SchemaKind::Undefined | SchemaKind::Void => BaseType::Undefined,
			SchemaKind::Function => BaseType::Function,
			SchemaKind::Promise => BaseType::Promise,
			// Literals get narrowed from their value during introspection
			SchemaKind::Literal
			| SchemaKind::NativeEnum
			| SchemaKind::Tuple
			| SchemaKind::Union
			| SchemaKind::Any
			| SchemaKind::Unknown
			| SchemaKind::Intersection
			| SchemaKind::DiscriminatedUnion
			| SchemaKind::Map
			| SchemaKind::Lazy
			| SchemaKind::Effects
			| SchemaKind::Optional
			| SchemaKind::Nullable
			| SchemaKind::Default => BaseType::Any,
		}
	}

	/// Whether this kind wraps another node.
	pub const fn is_wrapper(self) -> bool {
		matches!(
			self,
			SchemaKind::Optional | SchemaKind::Nullable | SchemaKind::Default
		)
	}
}

impl fmt::Display for SchemaKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(self, f)
	}
}

/// Coarse serialization category of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BaseType {
	String,
	Number,
	Boolean,
	Date,
	Object,
	Array,
	#[default]
	Any,
	Null,
	Undefined,
	Function,
	Promise,
}

impl BaseType {
	/// Object and array values carry selectable sub-fields.
	pub const fn is_object_like(self) -> bool {
		matches!(self, BaseType::Object | BaseType::Array)
	}
}
