//! Query document IR and printer
//!
//! Documents built by the renderer are plain values; their `Display`
//! implementation prints them with two spaces of indentation per level.

use serde::{Deserialize, Serialize};
use std::fmt;

const INDENT: &str = "  ";

/// GraphQL operation keyword.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
	#[default]
	Query,
	Mutation,
}

impl OperationType {
	pub fn as_str(self) -> &'static str {
		match self {
			OperationType::Query => "query",
			OperationType::Mutation => "mutation",
		}
	}
}

impl fmt::Display for OperationType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The single `$variable: Type` an operation declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDefinition {
	pub name: String,
	pub type_name: String,
	pub required: bool,
}

impl fmt::Display for VariableDefinition {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "${}: {}", self.name, self.type_name)?;
		if self.required {
			f.write_str("!")?;
		}
		Ok(())
	}
}

/// A selected field, with a sub-selection for object-like fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
	pub name: String,
	/// `None` for leaf fields.
	pub selection_set: Option<Vec<Selection>>,
}

impl Selection {
	pub fn leaf(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			selection_set: None,
		}
	}

	pub fn block(name: impl Into<String>, children: Vec<Selection>) -> Self {
		Self {
			name: name.into(),
			selection_set: Some(children),
		}
	}

	/// Number of nested selection blocks below this field.
	pub fn nesting(&self) -> usize {
		match &self.selection_set {
			None => 0,
			Some(children) => 1 + children.iter().map(Selection::nesting).max().unwrap_or(0),
		}
	}

	fn write(&self, f: &mut fmt::Formatter<'_>, depth: usize, arguments: &str) -> fmt::Result {
		let pad = INDENT.repeat(depth);
		write!(f, "{pad}{}{arguments}", self.name)?;
		if let Some(children) = &self.selection_set {
			f.write_str(" {")?;
			for child in children {
				f.write_str("\n")?;
				child.write(f, depth + 1, "")?;
			}
			write!(f, "\n{pad}}}")?;
		}
		Ok(())
	}
}

/// A single-operation document selecting one resolver field.
///
/// # Examples
///
/// ```
/// use schemabridge_graphql::{OperationType, QueryDocument, Selection, VariableDefinition};
///
/// let document = QueryDocument {
///     operation: OperationType::Query,
///     name: "getUser".into(),
///     variable: Some(VariableDefinition {
///         name: "getUserArgs".into(),
///         type_name: "GetUserArgs".into(),
///         required: true,
///     }),
///     root: Selection::block("getUser", vec![Selection::leaf("id")]),
/// };
///
/// assert_eq!(
///     document.to_string(),
///     "query getUser($getUserArgs: GetUserArgs!) {\n  getUser(args: $getUserArgs) {\n    id\n  }\n}"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDocument {
	pub operation: OperationType,
	pub name: String,
	/// Bound to the root field as its `args` argument.
	pub variable: Option<VariableDefinition>,
	pub root: Selection,
}

impl fmt::Display for QueryDocument {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {}", self.operation, self.name)?;
		let arguments = match &self.variable {
			Some(variable) => {
				write!(f, "({variable})")?;
				format!("(args: ${})", variable.name)
			}
			None => String::new(),
		};
		f.write_str(" {\n")?;
		self.root.write(f, 1, &arguments)?;
		f.write_str("\n}")
	}
}
