//! Value validation
//!
//! Checks a JSON value against a [`SchemaNode`] and produces the parsed
//! output: undeclared object keys are dropped, defaults are filled in and
//! dates are coerced to a canonical RFC 3339 UTC string. Every issue is
//! collected along with its path instead of stopping at the first one.

mod formats;

use crate::error::{IssueCode, ValidationError, ValidationIssue};
use crate::kind::SchemaKind;
use crate::node::{LengthChecks, NodeKind, NumberChecks, SchemaNode, StringChecks};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde_json::{Map, Value};

/// Outcome of [`SchemaNode::safe_parse`].
#[derive(Debug, Clone, PartialEq)]
pub enum SafeParse {
	Success(Value),
	Failure(ValidationError),
}

impl SafeParse {
	pub fn is_success(&self) -> bool {
		matches!(self, SafeParse::Success(_))
	}

	pub fn data(&self) -> Option<&Value> {
		match self {
			SafeParse::Success(value) => Some(value),
			SafeParse::Failure(_) => None,
		}
	}

	pub fn error(&self) -> Option<&ValidationError> {
		match self {
			SafeParse::Success(_) => None,
			SafeParse::Failure(error) => Some(error),
		}
	}

	pub fn into_result(self) -> Result<Value, ValidationError> {
		match self {
			SafeParse::Success(value) => Ok(value),
			SafeParse::Failure(error) => Err(error),
		}
	}
}

impl SchemaNode {
	/// Validates `value` and returns the parsed output.
	///
	/// # Errors
	///
	/// Returns every issue found, each with the path of the offending value.
	///
	/// # Examples
	///
	/// ```
	/// use schemabridge_core::{ObjectShape, SchemaNode};
	/// use serde_json::json;
	///
	/// let node = SchemaNode::object(
	///     ObjectShape::new()
	///         .field("name", SchemaNode::string().min_length(2))
	///         .field("role", SchemaNode::string().default_value("member")),
	/// );
	///
	/// let parsed = node.parse(&json!({ "name": "Ada", "extra": true })).unwrap();
	/// assert_eq!(parsed, json!({ "name": "Ada", "role": "member" }));
	///
	/// let err = node.parse(&json!({ "name": "A" })).unwrap_err();
	/// assert_eq!(err.issues[0].path, vec!["name"]);
	/// ```
	pub fn parse(&self, value: &Value) -> Result<Value, ValidationError> {
		let mut walker = Walker::default();
		match walker.check(self, Some(value)) {
			Ok(parsed) => Ok(parsed.unwrap_or(Value::Null)),
			Err(Invalid) => Err(ValidationError {
				issues: walker.issues,
			}),
		}
	}

	/// Like [`parse`](Self::parse), without the `Result`.
	pub fn safe_parse(&self, value: &Value) -> SafeParse {
		match self.parse(value) {
			Ok(value) => SafeParse::Success(value),
			Err(error) => SafeParse::Failure(error),
		}
	}
}

/// Marker for a failed step; its issues are already recorded.
#[derive(Debug)]
struct Invalid;

/// `Ok(None)` means the value is absent and stays absent.
type Step = Result<Option<Value>, Invalid>;

#[derive(Default)]
struct Walker {
	path: Vec<String>,
	issues: Vec<ValidationIssue>,
}

fn type_name(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}

fn canonical_date(value: &Value) -> Option<String> {
	let parsed: DateTime<Utc> = match value {
		Value::String(text) => DateTime::parse_from_rfc3339(text)
			.map(|dt| dt.with_timezone(&Utc))
			.ok()
			.or_else(|| {
				NaiveDate::parse_from_str(text, "%Y-%m-%d")
					.ok()
					.and_then(|date| date.and_hms_opt(0, 0, 0))
					.map(|dt| dt.and_utc())
			})?,
		Value::Number(millis) => DateTime::from_timestamp_millis(millis.as_i64()?)?,
		_ => return None,
	};
	Some(parsed.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn literal_display(value: &Value) -> String {
	match value {
		Value::String(text) => format!("'{text}'"),
		other => other.to_string(),
	}
}

impl Walker {
	fn issue(&mut self, code: IssueCode, message: impl Into<String>) -> Invalid {
		self.issues.push(ValidationIssue {
			path: self.path.clone(),
			code,
			message: message.into(),
		});
		Invalid
	}

	fn invalid_type(&mut self, expected: &str, received: &Value) -> Invalid {
		let message = format!("Expected {expected}, received {}", type_name(received));
		self.issue(IssueCode::InvalidType, message)
	}

	fn nested<T>(&mut self, segment: impl ToString, run: impl FnOnce(&mut Self) -> T) -> T {
		self.path.push(segment.to_string());
		let result = run(self);
		self.path.pop();
		result
	}

	/// Runs `node` against `value` without keeping its issues.
	fn attempt(&self, node: &SchemaNode, value: Option<&Value>) -> Option<Option<Value>> {
		let mut probe = Walker {
			path: self.path.clone(),
			issues: Vec::new(),
		};
		probe.check(node, value).ok()
	}

	fn check(&mut self, node: &SchemaNode, value: Option<&Value>) -> Step {
		match node.node_kind() {
			NodeKind::Optional(inner) => match value {
				None => Ok(None),
				Some(_) => self.check(inner, value),
			},
			NodeKind::Nullable(inner) => match value {
				Some(Value::Null) => Ok(Some(Value::Null)),
				_ => self.check(inner, value),
			},
			NodeKind::Default { inner, value: fallback } => match value {
				None => self.check(inner, Some(fallback)),
				Some(_) => self.check(inner, value),
			},
			NodeKind::Undefined | NodeKind::Void => match value {
				None => Ok(None),
				Some(received) => Err(self.invalid_type("undefined", received)),
			},
			NodeKind::Any | NodeKind::Unknown => Ok(value.cloned()),
			NodeKind::Lazy(getter) => self.check(&getter.resolve(), value),
			NodeKind::Promise(inner) => self.check(inner, value),
			NodeKind::Effects { inner, refinement } => {
				let parsed = self.check(inner, value)?;
				match &parsed {
					Some(output) if !refinement.accepts(output) => {
						Err(self.issue(IssueCode::Custom, refinement.message.clone()))
					}
					_ => Ok(parsed),
				}
			}
			kind => match value {
				None => Err(self.issue(IssueCode::Required, "Required")),
				Some(present) => self.check_present(kind, present).map(Some),
			},
		}
	}

	fn check_present(&mut self, kind: &NodeKind, value: &Value) -> Result<Value, Invalid> {
		match kind {
			NodeKind::String(checks) => self.check_string(checks, value),
			NodeKind::Number(checks) => self.check_number(checks, value),
			NodeKind::Boolean => match value {
				Value::Bool(_) => Ok(value.clone()),
				_ => Err(self.invalid_type("boolean", value)),
			},
			NodeKind::Date => match canonical_date(value) {
				Some(date) => Ok(Value::String(date)),
				None => match value {
					Value::String(_) | Value::Number(_) => {
						Err(self.issue(IssueCode::InvalidDate, "Invalid date"))
					}
					_ => Err(self.invalid_type("date", value)),
				},
			},
			NodeKind::BigInt => match value {
				Value::Number(number) if number.is_i64() || number.is_u64() => Ok(value.clone()),
				_ => Err(self.invalid_type("bigint", value)),
			},
			NodeKind::Symbol => Err(self.issue(
				IssueCode::Unsupported,
				"Symbols cannot be represented as data",
			)),
			NodeKind::Function { .. } => Err(self.issue(
				IssueCode::Unsupported,
				"Functions cannot be represented as data",
			)),
			NodeKind::Null => match value {
				Value::Null => Ok(Value::Null),
				_ => Err(self.invalid_type("null", value)),
			},
			NodeKind::Literal(expected) => {
				if value == expected {
					Ok(value.clone())
				} else {
					let message = format!("Invalid literal value, expected {}", literal_display(expected));
					Err(self.issue(IssueCode::InvalidLiteral, message))
				}
			}
			NodeKind::Enum(options) => match value {
				Value::String(text) if options.iter().any(|option| option == text) => Ok(value.clone()),
				_ => {
					let expected = options
						.iter()
						.map(|option| format!("'{option}'"))
						.collect::<Vec<_>>()
						.join(" | ");
					let message = format!(
						"Invalid enum value. Expected {expected}, received {}",
						literal_display(value)
					);
					Err(self.issue(IssueCode::InvalidEnumValue, message))
				}
			},
			NodeKind::NativeEnum(entries) => {
				if entries.values().any(|entry| entry == value) {
					Ok(value.clone())
				} else {
					let message = format!("Invalid enum value, received {}", literal_display(value));
					Err(self.issue(IssueCode::InvalidEnumValue, message))
				}
			}
			NodeKind::Array { element, checks } => {
				let items = self.check_items(element, checks, value, "Array")?;
				Ok(Value::Array(items))
			}
			NodeKind::Set { element, checks } => {
				let mut items = self.check_items(element, checks, value, "Set")?;
				let mut seen = Vec::with_capacity(items.len());
				items.retain(|item| {
					if seen.contains(item) {
						false
					} else {
						seen.push(item.clone());
						true
					}
				});
				Ok(Value::Array(items))
			}
			NodeKind::Tuple(items) => self.check_tuple(items, value),
			NodeKind::Object(shape) => {
				let Value::Object(entries) = value else {
					return Err(self.invalid_type("object", value));
				};
				let mut output = Map::new();
				let mut failed = false;
				for (key, field) in shape.iter() {
					match self.nested(key, |walker| walker.check(field, entries.get(key))) {
						Ok(Some(parsed)) => {
							output.insert(key.to_string(), parsed);
						}
						Ok(None) => {}
						Err(Invalid) => failed = true,
					}
				}
				if failed { Err(Invalid) } else { Ok(Value::Object(output)) }
			}
			NodeKind::Record(values) => {
				let Value::Object(entries) = value else {
					return Err(self.invalid_type("object", value));
				};
				self.check_entries(None, values, entries)
			}
			NodeKind::Map { key, value: values } => {
				let Value::Object(entries) = value else {
					return Err(self.invalid_type("map", value));
				};
				self.check_entries(Some(key), values, entries)
			}
			NodeKind::Union(options) => {
				match options
					.iter()
					.find_map(|option| self.attempt(option, Some(value)))
				{
					Some(parsed) => Ok(parsed.unwrap_or(Value::Null)),
					None => Err(self.issue(IssueCode::InvalidUnion, "Invalid input")),
				}
			}
			NodeKind::DiscriminatedUnion {
				discriminator,
				options,
			} => self.check_discriminated(discriminator, options, value),
			NodeKind::Intersection { left, right } => {
				let left = self.check(left, Some(value));
				let right = self.check(right, Some(value));
				match (left?, right?) {
					(Some(Value::Object(mut merged)), Some(Value::Object(extra))) => {
						merged.extend(extra);
						Ok(Value::Object(merged))
					}
					(Some(left), Some(right)) if left == right => Ok(left),
					_ => Err(self.issue(
						IssueCode::Custom,
						"Intersection results could not be merged",
					)),
				}
			}
			// Wrappers and absent-tolerant kinds are handled in `check`
			NodeKind::Optional(_)
			| NodeKind::Nullable(_)
			| NodeKind::Default { .. }
			| NodeKind::Undefined
			| NodeKind::Void
			| NodeKind::Any
			| NodeKind::Unknown
			| NodeKind::Lazy(_)
			| NodeKind::Promise(_)
			| NodeKind::Effects { .. } => Ok(value.clone()),
		}
	}

	fn check_string(&mut self, checks: &StringChecks, value: &Value) -> Result<Value, Invalid> {
		let Value::String(text) = value else {
			return Err(self.invalid_type("string", value));
		};
		let before = self.issues.len();
		let length = text.chars().count();
		self.check_length(
			length,
			checks.min_length,
			checks.max_length,
			checks.exact_length,
			"String",
			"character(s)",
		);

		let formats: [(bool, fn(&str) -> bool, &str); 8] = [
			(checks.email, formats::is_email, "email"),
			(checks.url, formats::is_url, "url"),
			(checks.uuid, formats::is_uuid, "uuid"),
			(checks.base64, formats::is_base64, "base64"),
			(checks.date, formats::is_date, "date"),
			(checks.datetime, formats::is_datetime, "datetime"),
			(checks.time, formats::is_time, "time"),
			(checks.ip, formats::is_ip, "ip"),
		];
		for (enabled, accepts, label) in formats {
			if enabled && !accepts(text) {
				self.issue(IssueCode::InvalidString, format!("Invalid {label}"));
			}
		}

		if self.issues.len() > before { Err(Invalid) } else { Ok(value.clone()) }
	}

	fn check_length(
		&mut self,
		length: usize,
		min: Option<usize>,
		max: Option<usize>,
		exact: Option<usize>,
		subject: &str,
		unit: &str,
	) {
		if let Some(min) = min.filter(|min| length < *min) {
			self.issue(
				IssueCode::TooSmall,
				format!("{subject} must contain at least {min} {unit}"),
			);
		}
		if let Some(max) = max.filter(|max| length > *max) {
			self.issue(
				IssueCode::TooBig,
				format!("{subject} must contain at most {max} {unit}"),
			);
		}
		if let Some(exact) = exact.filter(|exact| length != *exact) {
			let code = if length < exact {
				IssueCode::TooSmall
			} else {
				IssueCode::TooBig
			};
			self.issue(code, format!("{subject} must contain exactly {exact} {unit}"));
		}
	}

	fn check_number(&mut self, checks: &NumberChecks, value: &Value) -> Result<Value, Invalid> {
		let Some(number) = value.as_f64() else {
			return Err(self.invalid_type("number", value));
		};
		let before = self.issues.len();
		if checks.int && number.fract() != 0.0 {
			self.issue(IssueCode::InvalidType, "Expected integer, received float");
		}
		if let Some(min) = checks.min_value.filter(|min| number < *min) {
			self.issue(
				IssueCode::TooSmall,
				format!("Number must be greater than or equal to {min}"),
			);
		}
		if let Some(max) = checks.max_value.filter(|max| number > *max) {
			self.issue(
				IssueCode::TooBig,
				format!("Number must be less than or equal to {max}"),
			);
		}
		if self.issues.len() > before { Err(Invalid) } else { Ok(value.clone()) }
	}

	fn check_items(
		&mut self,
		element: &SchemaNode,
		checks: &LengthChecks,
		value: &Value,
		subject: &str,
	) -> Result<Vec<Value>, Invalid> {
		let Value::Array(items) = value else {
			return Err(self.invalid_type("array", value));
		};
		let before = self.issues.len();
		self.check_length(
			items.len(),
			checks.min_length,
			checks.max_length,
			checks.exact_length,
			subject,
			"element(s)",
		);
		let mut output = Vec::with_capacity(items.len());
		for (index, item) in items.iter().enumerate() {
			if let Ok(parsed) = self.nested(index, |walker| walker.check(element, Some(item))) {
				output.push(parsed.unwrap_or(Value::Null));
			}
		}
		if self.issues.len() > before { Err(Invalid) } else { Ok(output) }
	}

	fn check_tuple(&mut self, nodes: &[SchemaNode], value: &Value) -> Result<Value, Invalid> {
		let Value::Array(items) = value else {
			return Err(self.invalid_type("array", value));
		};
		if items.len() > nodes.len() {
			let message = format!("Array must contain at most {} element(s)", nodes.len());
			return Err(self.issue(IssueCode::TooBig, message));
		}
		let required = nodes
			.iter()
			.rposition(|node| !matches!(node.kind(), SchemaKind::Optional | SchemaKind::Default))
			.map_or(0, |last| last + 1);
		if items.len() < required {
			let message = format!("Array must contain at least {required} element(s)");
			return Err(self.issue(IssueCode::TooSmall, message));
		}
		let mut output = Vec::with_capacity(nodes.len());
		let mut failed = false;
		for (index, node) in nodes.iter().enumerate() {
			match self.nested(index, |walker| walker.check(node, items.get(index))) {
				Ok(Some(parsed)) => output.push(parsed),
				Ok(None) => {}
				Err(Invalid) => failed = true,
			}
		}
		if failed { Err(Invalid) } else { Ok(Value::Array(output)) }
	}

	fn check_entries(
		&mut self,
		keys: Option<&SchemaNode>,
		values: &SchemaNode,
		entries: &Map<String, Value>,
	) -> Result<Value, Invalid> {
		let mut output = Map::new();
		let mut failed = false;
		for (key, entry) in entries {
			let key_ok = match keys {
				Some(node) => self
					.nested(key, |walker| walker.check(node, Some(&Value::String(key.clone()))))
					.is_ok(),
				None => true,
			};
			match self.nested(key, |walker| walker.check(values, Some(entry))) {
				Ok(Some(parsed)) if key_ok => {
					output.insert(key.clone(), parsed);
				}
				Ok(_) if key_ok => {}
				_ => failed = true,
			}
		}
		if failed { Err(Invalid) } else { Ok(Value::Object(output)) }
	}

	fn check_discriminated(
		&mut self,
		discriminator: &str,
		options: &[SchemaNode],
		value: &Value,
	) -> Result<Value, Invalid> {
		let Value::Object(entries) = value else {
			return Err(self.invalid_type("object", value));
		};
		let tag = entries.get(discriminator);
		let literal_of = |option: &SchemaNode| match option
			.shape()
			.and_then(|shape| shape.get(discriminator))
			.map(|field| field.innermost().node_kind())
		{
			Some(NodeKind::Literal(literal)) => Some(literal.clone()),
			_ => None,
		};

		let matched = options
			.iter()
			.find(|option| tag.is_some() && literal_of(*option).as_ref() == tag);
		match matched {
			Some(option) => Ok(self.check(option, Some(value))?.unwrap_or(Value::Null)),
			None => {
				let expected = options
					.iter()
					.filter_map(literal_of)
					.map(|literal| literal_display(&literal))
					.collect::<Vec<_>>()
					.join(" | ");
				let message = format!("Invalid discriminator value. Expected {expected}");
				Err(self.nested(discriminator, |walker| {
					walker.issue(IssueCode::InvalidUnion, message)
				}))
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::node::ObjectShape;
	use rstest::rstest;
	use serde_json::json;

	fn codes(error: &ValidationError) -> Vec<IssueCode> {
		error.issues.iter().map(|issue| issue.code).collect()
	}

	#[rstest]
	fn test_object_collects_every_issue() {
		let node = SchemaNode::object(
			ObjectShape::new()
				.field("email", SchemaNode::string().email())
				.field("age", SchemaNode::number().int().min_value(18.0))
				.field("name", SchemaNode::string()),
		);

		let err = node
			.parse(&json!({ "email": "nope", "age": 12.5 }))
			.unwrap_err();

		assert_eq!(
			codes(&err),
			vec![
				IssueCode::InvalidString,
				IssueCode::InvalidType,
				IssueCode::TooSmall,
				IssueCode::Required,
			]
		);
		assert_eq!(err.issues[3].path, vec!["name"]);
	}

	#[rstest]
	fn test_optional_nullable_and_default() {
		let node = SchemaNode::object(
			ObjectShape::new()
				.field("nick", SchemaNode::string().optional())
				.field("bio", SchemaNode::string().nullable())
				.field("role", SchemaNode::string().default_value("member")),
		);

		let parsed = node.parse(&json!({ "bio": null })).unwrap();
		assert_eq!(parsed, json!({ "bio": null, "role": "member" }));
	}

	#[rstest]
	#[case(json!("2024-05-01T12:30:00+02:00"), "2024-05-01T10:30:00.000Z")]
	#[case(json!("2024-05-01"), "2024-05-01T00:00:00.000Z")]
	#[case(json!(0), "1970-01-01T00:00:00.000Z")]
	fn test_date_is_canonicalized(#[case] input: Value, #[case] expected: &str) {
		assert_eq!(SchemaNode::date().parse(&input).unwrap(), json!(expected));
	}

	#[rstest]
	fn test_invalid_date() {
		let err = SchemaNode::date().parse(&json!("yesterday")).unwrap_err();
		assert_eq!(codes(&err), vec![IssueCode::InvalidDate]);
	}

	#[rstest]
	fn test_array_paths_include_index() {
		let node = SchemaNode::array(SchemaNode::number()).max_length(2);
		let err = node.parse(&json!([1, "two", 3])).unwrap_err();
		assert_eq!(codes(&err), vec![IssueCode::TooBig, IssueCode::InvalidType]);
		assert_eq!(err.issues[1].path, vec!["1"]);
	}

	#[rstest]
	fn test_union_takes_first_match() {
		let node = SchemaNode::union([SchemaNode::number(), SchemaNode::string()]);
		assert_eq!(node.parse(&json!("a")).unwrap(), json!("a"));
		let err = node.parse(&json!(true)).unwrap_err();
		assert_eq!(codes(&err), vec![IssueCode::InvalidUnion]);
	}

	#[rstest]
	fn test_discriminated_union_picks_option_by_tag() {
		let cat = SchemaNode::object(
			ObjectShape::new()
				.field("type", SchemaNode::literal("cat"))
				.field("lives", SchemaNode::number()),
		);
		let dog = SchemaNode::object(
			ObjectShape::new()
				.field("type", SchemaNode::literal("dog"))
				.field("good", SchemaNode::boolean()),
		);
		let node = SchemaNode::discriminated_union("type", [cat, dog]);

		assert_eq!(
			node.parse(&json!({ "type": "dog", "good": true, "x": 1 })).unwrap(),
			json!({ "type": "dog", "good": true })
		);
		let err = node.parse(&json!({ "type": "bird" })).unwrap_err();
		assert_eq!(err.issues[0].path, vec!["type"]);
		assert_eq!(
			err.issues[0].message,
			"Invalid discriminator value. Expected 'cat' | 'dog'"
		);
	}

	#[rstest]
	fn test_intersection_merges_objects() {
		let node = SchemaNode::intersection(
			SchemaNode::object(ObjectShape::new().field("a", SchemaNode::string())),
			SchemaNode::object(ObjectShape::new().field("b", SchemaNode::number())),
		);
		assert_eq!(
			node.parse(&json!({ "a": "x", "b": 1, "c": 2 })).unwrap(),
			json!({ "a": "x", "b": 1 })
		);
	}

	#[rstest]
	fn test_refine_runs_after_inner() {
		let node = SchemaNode::string().refine("Must be uppercase", |value| {
			value.as_str().is_some_and(|text| text == text.to_uppercase())
		});
		assert!(node.parse(&json!("OK")).is_ok());
		let err = node.parse(&json!("no")).unwrap_err();
		assert_eq!(err.issues[0].message, "Must be uppercase");
	}

	#[rstest]
	fn test_enum_and_literal_messages() {
		let err = SchemaNode::enumeration(["a", "b"]).parse(&json!("c")).unwrap_err();
		assert_eq!(
			err.issues[0].message,
			"Invalid enum value. Expected 'a' | 'b', received 'c'"
		);
		let err = SchemaNode::literal(1).parse(&json!(2)).unwrap_err();
		assert_eq!(codes(&err), vec![IssueCode::InvalidLiteral]);
	}

	#[rstest]
	fn test_tuple_length() {
		let node = SchemaNode::tuple([SchemaNode::string(), SchemaNode::number().optional()]);
		assert_eq!(node.parse(&json!(["a"])).unwrap(), json!(["a"]));
		assert!(node.parse(&json!([])).is_err());
		assert!(node.parse(&json!(["a", 1, 2])).is_err());
	}

	#[rstest]
	fn test_set_deduplicates() {
		let node = SchemaNode::set(SchemaNode::number());
		assert_eq!(node.parse(&json!([1, 2, 1])).unwrap(), json!([1, 2]));
	}

	#[rstest]
	fn test_function_is_unsupported() {
		let node = SchemaNode::function(Vec::new(), SchemaNode::void());
		let err = node.parse(&json!(null)).unwrap_err();
		assert_eq!(codes(&err), vec![IssueCode::Unsupported]);
	}

	#[rstest]
	fn test_lazy_resolves_recursive_schema() {
		fn category() -> SchemaNode {
			SchemaNode::object(
				ObjectShape::new()
					.field("name", SchemaNode::string())
					.field("children", SchemaNode::array(SchemaNode::lazy(category)).optional()),
			)
		}

		let value = json!({ "name": "root", "children": [{ "name": "leaf" }] });
		assert_eq!(category().parse(&value).unwrap(), value);
	}

	#[rstest]
	fn test_safe_parse_exposes_both_sides() {
		let ok = SchemaNode::string().safe_parse(&json!("x"));
		assert!(ok.is_success());
		assert_eq!(ok.data(), Some(&json!("x")));

		let failed = SchemaNode::string().safe_parse(&json!(1));
		assert!(failed.error().is_some());
		assert!(failed.into_result().is_err());
	}
}
