//! Unit tests for JSON settings and option updates.

use draggable::limit::LimitSpec;
use draggable::options::DragSettings;
use draggable::{DragError, DragOptions, ElementId, Limit, OptionsUpdate};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_empty_object_is_defaults() {
    let options = DragOptions::from_json("{}").unwrap();
    let defaults = DragOptions::default();
    assert_eq!(options.settings(), defaults.settings());
    assert!(options.smooth_drag);
    assert!(options.set_position);
    assert!(options.use_gpu);
    assert!(!options.set_cursor);
}

#[test]
fn test_full_settings_parse() {
    let options = DragOptions::from_json(
        r#"{
            "grid": 16,
            "handle": 4,
            "limit": { "element": 1 },
            "threshold": 3.5,
            "set_cursor": true,
            "set_position": false,
            "smooth_drag": false,
            "use_gpu": false
        }"#,
    )
    .unwrap();
    assert_eq!(options.grid, 16.0);
    assert_eq!(options.handle, Some(ElementId(4)));
    assert_eq!(options.limit, Limit::within(ElementId(1)));
    assert_eq!(options.threshold, 3.5);
    assert!(options.set_cursor);
    assert!(!options.set_position);
    assert!(!options.smooth_drag);
    assert!(!options.use_gpu);
}

#[test]
fn test_axis_limit_forms() {
    let settings: DragSettings =
        serde_json::from_str(r#"{"limit": {"x": 50, "y": [0, 200]}}"#).unwrap();
    assert!(matches!(settings.limit, Some(LimitSpec::Axes { .. })));

    let options = DragOptions::from(settings);
    assert_eq!(
        options.limit,
        Limit::axes(
            draggable::AxisLimit::Fixed(50.0),
            draggable::AxisLimit::range(0.0, 200.0)
        )
    );
}

#[test]
fn test_unknown_setting_is_rejected() {
    let err = DragOptions::from_json(r#"{"gird": 10}"#).unwrap_err();
    assert!(matches!(err, DragError::Json(_)));
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"{{"grid": 25, "threshold": 4}}"#).unwrap();

    let options = DragOptions::load(file.path()).unwrap();
    assert_eq!(options.grid, 25.0);
    assert_eq!(options.threshold, 4.0);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = DragOptions::load(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, DragError::Io(_)));
}

#[test]
fn test_custom_limit_has_no_json_form() {
    let options = DragOptions::default().with_limit(Limit::custom(|c, _| c));
    assert_eq!(options.settings().limit, None);
}

#[test]
fn test_update_json_unknown_key() {
    let err = OptionsUpdate::from_json(r#"{"grid": 1, "onDrag": null}"#).unwrap_err();
    assert!(matches!(err, DragError::UnknownOption(ref key) if key == "onDrag"));
}
