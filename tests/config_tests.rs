//! Integration tests for configuration loading

use medadmin::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(yaml.as_bytes()).expect("write");
    file
}

#[test]
fn test_load_from_file() {
    let file = write_config(
        r#"
api_base_url: "http://localhost:8000/api/v1"
screens:
  videos:
    search_columns: [filename, patient_username]
    default_sort: "create_time:desc"
"#,
    );

    let config = ConsoleConfig::from_yaml_file(file.path()).expect("load");
    let mut view = config.view::<Video>("videos").expect("valid screen");
    assert_eq!(
        view.config().searchable,
        vec![VideoColumn::Filename, VideoColumn::PatientUsername]
    );
    assert_eq!(
        view.sort_directive(),
        SortDirective::Descending(VideoColumn::CreateTime)
    );

    view.set_records(vec![]);
    assert!(view.is_empty());
}

#[test]
fn test_missing_file() {
    let err = ConsoleConfig::from_yaml_file("/nonexistent/medadmin.yaml").expect_err("missing");
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::FileNotFound { .. })
    ));
}

#[test]
fn test_parse_error_names_the_file() {
    let file = write_config("api_base_url: [unterminated");
    let err = ConsoleConfig::from_yaml_file(file.path()).expect_err("invalid yaml");
    match err.downcast_ref::<ConfigError>() {
        Some(ConfigError::ParseError { file: Some(path), .. }) => {
            assert_eq!(path, &file.path().display().to_string());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_bad_default_sort_is_a_view_error() {
    let config = ConsoleConfig::from_yaml_str(
        r#"
api_base_url: "https://admin.example.org/api/v1"
screens:
  analyses:
    default_sort: "progress:upwards"
"#,
    )
    .expect("parse");

    let err = config.view::<Analysis>("analyses").expect_err("bad direction");
    assert_eq!(err.error_code(), "INVALID_SORT_DIRECTION");
}

#[test]
fn test_merge_empty_yields_default() {
    let merged = ConsoleConfig::merge(vec![]);
    assert_eq!(merged, ConsoleConfig::default_config());
}

#[test]
fn test_merge_later_wins() {
    let base = ConsoleConfig::from_yaml_str(
        r#"
api_base_url: "http://localhost:8000/api/v1"
screens:
  patients:
    search_columns: [username]
"#,
    )
    .expect("parse");
    let site = ConsoleConfig::from_yaml_str(
        r#"
api_base_url: "https://admin.example.org/api/v1"
screens:
  patients:
    default_sort: "username"
"#,
    )
    .expect("parse");

    let merged = ConsoleConfig::merge(vec![base, site]);
    assert_eq!(merged.api_base_url, "https://admin.example.org/api/v1");

    let view = merged.view::<Patient>("patients").expect("valid");
    assert_eq!(view.config().searchable, vec![PatientColumn::Username]);
    assert_eq!(
        view.sort_directive(),
        SortDirective::Ascending(PatientColumn::Username)
    );
}
