//! Operation and type naming

/// Substrings that mark a schema name as describing input.
pub const INPUT_INDICATORS: [&str; 3] = ["Input", "Args", "Arguments"];

/// Which side of an operation a schema name is normalized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamePrefix {
	Input,
	Type,
}

/// Makes input and output type names distinguishable.
///
/// Input names get an `Input` suffix unless they already signal input;
/// output names get a `Type` suffix only if they look like input.
///
/// # Examples
///
/// ```
/// use schemabridge_graphql::{NamePrefix, normalize_schema_name};
///
/// assert_eq!(normalize_schema_name("User", NamePrefix::Input), "UserInput");
/// assert_eq!(normalize_schema_name("GetUserArgs", NamePrefix::Input), "GetUserArgs");
/// assert_eq!(normalize_schema_name("GetUserArgs", NamePrefix::Type), "GetUserArgsType");
/// assert_eq!(normalize_schema_name("User", NamePrefix::Type), "User");
/// ```
pub fn normalize_schema_name(name: &str, prefix: NamePrefix) -> String {
	let signals_input = INPUT_INDICATORS.iter().any(|term| name.contains(term));
	match (prefix, signals_input) {
		(NamePrefix::Input, false) => format!("{name}Input"),
		(NamePrefix::Type, true) => format!("{name}Type"),
		_ => name.to_string(),
	}
}
