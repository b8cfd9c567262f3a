//! Data bridge error types.

use schemabridge_core::SchemaKind;
use thiserror::Error;

/// Result type for data bridge construction.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Data bridge construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum BridgeError {
	/// No resolver name was given.
	#[error("resolver name is required")]
	MissingResolverName,

	/// No input (args) schema was given.
	#[error("args schema is required")]
	MissingInputSchema,

	/// No output (response) schema was given.
	#[error("response schema is required")]
	MissingOutputSchema,

	/// A query document failed to parse.
	#[error("invalid graphql document: {message}")]
	InvalidDocument {
		/// The document text.
		document: String,
		/// Parser error message.
		message: String,
	},
}

/// Failure while rendering one branch of a query document.
///
/// Contained by the renderer: it is logged and the branch renders empty.
#[derive(Debug, Error)]
pub(crate) enum RenderError {
	#[error("{kind} node has no selectable fields")]
	NoSelectableFields { kind: SchemaKind },
}
