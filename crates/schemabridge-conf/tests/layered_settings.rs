//! Integration tests for layered settings loading.

use rstest::*;
use schemabridge_conf::{BridgeSettings, EnvSource, SettingsError, SETTINGS_FILE};
use schemabridge_core::SourceFlavor;
use std::fs;
use tempfile::TempDir;

#[fixture]
fn temp_dir() -> TempDir {
	TempDir::new().expect("Failed to create temporary directory")
}

#[rstest]
fn test_missing_file_yields_defaults(temp_dir: TempDir) {
	let settings: BridgeSettings = BridgeSettings::builder(temp_dir.path().join(SETTINGS_FILE))
		.build()
		.expect("Failed to build settings")
		.into_typed()
		.expect("Failed to deserialize settings");

	assert_eq!(settings, BridgeSettings::default());
}

#[rstest]
fn test_env_overrides_file_overrides_defaults(temp_dir: TempDir) {
	let path = temp_dir.path().join(SETTINGS_FILE);
	fs::write(
		&path,
		r#"
[query]
max_field_depth = 3
log_warnings = false

[defaults]
strip_sensitive = true

[codegen]
flavor = "plain"
"#,
	)
	.expect("Failed to write settings file");

	let settings: BridgeSettings = BridgeSettings::builder(&path)
		.add_source(
			EnvSource::new()
				.with_prefix("SCHEMABRIDGE_")
				.with_vars([("SCHEMABRIDGE_QUERY__MAX_FIELD_DEPTH", "8")]),
		)
		.build()
		.expect("Failed to build settings")
		.into_typed()
		.expect("Failed to deserialize settings");

	assert_eq!(settings.query.max_field_depth, 8);
	assert!(!settings.query.log_warnings);
	assert!(settings.defaults.strip_sensitive);
	assert!(!settings.defaults.strip_unknown);
	assert_eq!(settings.codegen.flavor, SourceFlavor::Plain);
	assert!(settings.apply_defaults_options().strip_sensitive);
}

#[rstest]
fn test_mistyped_value_is_a_parse_error(temp_dir: TempDir) {
	let path = temp_dir.path().join(SETTINGS_FILE);
	fs::write(&path, "[query]\nmax_field_depth = \"deep\"\n").expect("Failed to write settings file");

	let err = BridgeSettings::builder(&path)
		.build()
		.expect("Failed to build settings")
		.into_typed::<BridgeSettings>()
		.unwrap_err();
	assert!(matches!(err, SettingsError::Parse { .. }));
}

#[rstest]
fn test_broken_file_names_its_source(temp_dir: TempDir) {
	let path = temp_dir.path().join(SETTINGS_FILE);
	fs::write(&path, "[query").expect("Failed to write settings file");

	let err = BridgeSettings::builder(&path).build().unwrap_err();
	assert!(err.to_string().starts_with("Source error in TOML file:"));
}
