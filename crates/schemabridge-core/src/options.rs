//! Labelled enum options

use crate::node::SchemaNode;
use indexmap::IndexMap;
use std::ops::Deref;

/// An enum node built from `(key, label)` pairs.
///
/// The node validates option keys, while the labels stay available for UI
/// pickers.
///
/// # Examples
///
/// ```
/// use schemabridge_core::{input_options, SchemaKind};
///
/// let role = input_options([("admin", "Administrator"), ("member", "Member")]);
/// assert_eq!(role.kind(), SchemaKind::Enum);
/// assert_eq!(role.options(), vec!["admin", "member"]);
/// assert_eq!(role.label("admin"), Some("Administrator"));
/// ```
#[derive(Debug, Clone)]
pub struct InputOptions {
	node: SchemaNode,
	entries: IndexMap<String, String>,
}

/// Builds [`InputOptions`] from ordered `(key, label)` pairs.
pub fn input_options<I, K, L>(entries: I) -> InputOptions
where
	I: IntoIterator<Item = (K, L)>,
	K: Into<String>,
	L: Into<String>,
{
	let entries: IndexMap<String, String> = entries
		.into_iter()
		.map(|(key, label)| (key.into(), label.into()))
		.collect();
	InputOptions {
		node: SchemaNode::enumeration(entries.keys().cloned()),
		entries,
	}
}

impl InputOptions {
	pub fn node(&self) -> &SchemaNode {
		&self.node
	}

	/// Keys mapped to their labels, in declaration order.
	pub fn entries(&self) -> &IndexMap<String, String> {
		&self.entries
	}

	pub fn label(&self, key: &str) -> Option<&str> {
		self.entries.get(key).map(String::as_str)
	}

	pub fn options(&self) -> Vec<&str> {
		self.entries.keys().map(String::as_str).collect()
	}
}

impl Deref for InputOptions {
	type Target = SchemaNode;

	fn deref(&self) -> &SchemaNode {
		&self.node
	}
}

impl From<InputOptions> for SchemaNode {
	fn from(options: InputOptions) -> Self {
		options.node
	}
}
