//! String format checks

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, NaiveDate, NaiveTime};
use regex::Regex;
use std::net::IpAddr;
use std::sync::LazyLock;

// Local part, one or more dot separated labels and a TLD of at least two letters.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[A-Za-z0-9_'+\-]+(\.[A-Za-z0-9_'+\-]+)*@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
		.expect("EMAIL_REGEX: invalid regex pattern")
});

static UUID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
		.expect("UUID_REGEX: invalid regex pattern")
});

pub(crate) fn is_email(value: &str) -> bool {
	EMAIL_REGEX.is_match(value)
}

pub(crate) fn is_url(value: &str) -> bool {
	url::Url::parse(value).is_ok()
}

/// Hyphenated UUID of any version.
pub(crate) fn is_uuid(value: &str) -> bool {
	UUID_REGEX.is_match(value) && uuid::Uuid::try_parse(value).is_ok()
}

pub(crate) fn is_base64(value: &str) -> bool {
	STANDARD.decode(value).is_ok()
}

/// `YYYY-MM-DD`
pub(crate) fn is_date(value: &str) -> bool {
	NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

pub(crate) fn is_datetime(value: &str) -> bool {
	DateTime::parse_from_rfc3339(value).is_ok()
}

/// `HH:MM:SS` with optional fractional seconds.
pub(crate) fn is_time(value: &str) -> bool {
	NaiveTime::parse_from_str(value, "%H:%M:%S%.f").is_ok()
}

pub(crate) fn is_ip(value: &str) -> bool {
	value.parse::<IpAddr>().is_ok()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("user@example.com", true)]
	#[case("first.last+tag@mail.example.org", true)]
	#[case("user@localhost", false)]
	#[case("not an email", false)]
	fn test_email(#[case] input: &str, #[case] expected: bool) {
		assert_eq!(is_email(input), expected);
	}

	#[rstest]
	#[case("550e8400-e29b-41d4-a716-446655440000", true)]
	#[case("550e8400e29b41d4a716446655440000", false)]
	#[case("550e8400-e29b-41d4-a716", false)]
	fn test_uuid(#[case] input: &str, #[case] expected: bool) {
		assert_eq!(is_uuid(input), expected);
	}

	#[rstest]
	#[case("2024-02-29", true)]
	#[case("2023-02-29", false)]
	#[case("2024-1-5", false)]
	fn test_date(#[case] input: &str, #[case] expected: bool) {
		assert_eq!(is_date(input), expected);
	}

	#[rstest]
	#[case("14:30:00", true)]
	#[case("14:30:00.250", true)]
	#[case("25:00:00", false)]
	fn test_time(#[case] input: &str, #[case] expected: bool) {
		assert_eq!(is_time(input), expected);
	}

	#[rstest]
	#[case("192.168.0.1", true)]
	#[case("::1", true)]
	#[case("256.0.0.1", false)]
	fn test_ip(#[case] input: &str, #[case] expected: bool) {
		assert_eq!(is_ip(input), expected);
	}

	#[rstest]
	fn test_misc_formats() {
		assert!(is_url("https://example.com/path?q=1"));
		assert!(!is_url("example.com"));
		assert!(is_base64("aGVsbG8="));
		assert!(!is_base64("not base64!"));
		assert!(is_datetime("2024-05-01T10:00:00Z"));
		assert!(!is_datetime("2024-05-01"));
	}
}
