//! Integration tests for loading layout configuration and input files.

use recap::render::{render_flow, FlowOptions, Geometry, MonospaceMeasurer};
use recap::{Error, Recap};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_flow_options_from_file() {
    let file = write_temp(
        r#"{
            "product_label": "Standup Notes",
            "timestamp_format": "%d.%m.%Y",
            "geometry": { "page_width": 612, "page_height": 792, "line_height": 16 }
        }"#,
    );

    let options = FlowOptions::from_json_file(file.path()).unwrap();
    assert_eq!(options.product_label, "Standup Notes");
    assert_eq!(options.geometry.page_width, 612.0);
    assert_eq!(options.geometry.line_height, 16.0);
    assert_eq!(options.geometry.margin_left, Geometry::a4().margin_left);

    let doc = Recap::new()
        .normalize_str(r#"{"created_at": "2024-02-29T08:00:00Z", "summary": ["One"]}"#)
        .document;
    let pages = render_flow(&doc, &MonospaceMeasurer::default(), &options).unwrap();
    let header = pages[0].texts_with_role(recap::TextRole::Header).next().unwrap();
    assert_eq!(header.text, "29.02.2024");
    let footer = pages[1].texts_with_role(recap::TextRole::Footer).next().unwrap();
    assert_eq!(footer.text, "Standup Notes");
    assert_eq!(pages[1].width, 612.0);
}

#[test]
fn test_geometry_from_file() {
    let file = write_temp(r#"{ "margin_left": 36, "margin_right": 36 }"#);
    let geometry = Geometry::from_json_file(file.path()).unwrap();
    assert!((geometry.content_width() - (595.28 - 72.0)).abs() < 1e-3);
}

#[test]
fn test_invalid_geometry_is_config_error() {
    let file = write_temp(r#"{ "geometry": { "margin_top": 2000 } }"#);
    let result = FlowOptions::from_json_file(file.path());
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_malformed_config_is_json_error() {
    let file = write_temp("{ not json");
    let result = FlowOptions::from_json_file(file.path());
    assert!(matches!(result, Err(Error::Json(_))));

    let file = write_temp(r#"{ "geometry": { "line_height": "tall" } }"#);
    let result = FlowOptions::from_json_file(file.path());
    assert!(matches!(result, Err(Error::Json(_))));
}

#[test]
fn test_missing_config_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = FlowOptions::from_json_file(dir.path().join("missing.json"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_normalize_file() {
    let file = write_temp(r#"{"title": "From disk", "created_at": "2024-01-01T00:00:00Z", "key_tasks": ["Read it"]}"#);
    let result = Recap::new().normalize_file(file.path()).unwrap();
    assert_eq!(result.document().title, "From disk");
    assert_eq!(result.render_slides().len(), 2);

    let doc = recap::normalize_file(file.path()).unwrap();
    assert_eq!(doc, result.document);
}
