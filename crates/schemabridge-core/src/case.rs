//! Identifier case helpers

/// `getUser` -> `GetUser`
pub fn uppercase_first_char(value: &str) -> String {
	let mut chars = value.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// `GetUserArgs` -> `getUserArgs`
pub fn lowercase_first_char(value: &str) -> String {
	let mut chars = value.chars();
	match chars.next() {
		Some(first) => first.to_lowercase().chain(chars).collect(),
		None => String::new(),
	}
}
