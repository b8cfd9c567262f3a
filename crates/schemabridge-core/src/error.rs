//! Schema and validation error types.

use crate::kind::SchemaKind;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type for schema construction.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Schema construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SchemaError {
	/// A named schema was built without a name.
	#[error("schema name is required")]
	MissingName,

	/// A pick/omit mask referenced a field the schema does not declare.
	#[error("schema '{schema}' has no field '{field}'")]
	UnknownField {
		/// Schema name.
		schema: String,
		/// Field missing from the schema.
		field: String,
	},

	/// An operation that needs an object node received something else.
	#[error("expected an object schema, found {kind}")]
	NotAnObject {
		/// Kind of the node that was passed.
		kind: SchemaKind,
	},

	/// A schema with this name is already registered.
	#[error("schema already registered: {0}")]
	DuplicateSchema(String),

	/// No schema with this name is registered.
	#[error("schema not registered: {0}")]
	UnknownSchema(String),
}

/// Machine readable category of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum IssueCode {
	InvalidType,
	Required,
	TooSmall,
	TooBig,
	InvalidString,
	InvalidLiteral,
	InvalidEnumValue,
	InvalidUnion,
	InvalidDate,
	Custom,
	/// The node kind cannot describe plain data
	Unsupported,
}

/// One problem found while validating a value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
	/// Keys and indices leading to the offending value.
	pub path: Vec<String>,
	pub code: IssueCode,
	pub message: String,
}

impl fmt::Display for ValidationIssue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.path.is_empty() {
			write!(f, "{}", self.message)
		} else {
			write!(f, "{}: {}", self.path.join("."), self.message)
		}
	}
}

/// Every issue found while validating one value.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
pub struct ValidationError {
	pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
	/// Issues whose path starts with `prefix`.
	pub fn issues_at<'a>(&'a self, prefix: &'a [&'a str]) -> impl Iterator<Item = &'a ValidationIssue> {
		self.issues.iter().filter(move |issue| {
			issue.path.len() >= prefix.len()
				&& issue.path.iter().zip(prefix).all(|(segment, wanted)| segment == wanted)
		})
	}
}

impl fmt::Display for ValidationError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "validation failed with {} issue(s)", self.issues.len())?;
		for issue in &self.issues {
			write!(f, "; {issue}")?;
		}
		Ok(())
	}
}
