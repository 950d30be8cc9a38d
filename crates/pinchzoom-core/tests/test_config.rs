use pinchzoom_core::config::{DoubleTapZoom, LoaderConfig, ViewerConfig, ZoomConfig};
use pinchzoom_core::consts::{DEFAULT_MAX_ZOOM_FACTOR, DEFAULT_TAP_RECT_SIZE};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn test_zoom_config_defaults() {
    let z = ZoomConfig::default();
    assert_eq!(z.min_scale, None);
    assert_eq!(z.max_scale, None);
    assert_eq!(z.max_zoom_factor, DEFAULT_MAX_ZOOM_FACTOR);
    assert_eq!(
        z.double_tap,
        DoubleTapZoom::TapRect {
            size: DEFAULT_TAP_RECT_SIZE
        }
    );
    assert_eq!(z.animation_ms, 300);
}

#[test]
fn test_loader_config_defaults() {
    let l = LoaderConfig::default();
    assert!(l.resource_dir.is_none());
    assert_eq!(l.resource_extensions.first().map(String::as_str), Some("png"));
    assert!(l.max_fetch_bytes > 0);
}

// ---------------------------------------------------------------------------
// DoubleTapZoom Display
// ---------------------------------------------------------------------------

#[test]
fn test_double_tap_display() {
    assert_eq!(format!("{}", DoubleTapZoom::MaxScale), "Max Scale");
    let s = format!("{}", DoubleTapZoom::TapRect { size: 100.0 });
    assert!(s.contains("100"), "got: {s}");
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

#[test]
fn test_toml_round_trip() {
    let config = ViewerConfig {
        zoom: ZoomConfig {
            min_scale: Some(0.5),
            max_scale: None,
            max_zoom_factor: 4.0,
            double_tap: DoubleTapZoom::MaxScale,
            animation_ms: 150,
        },
        loader: LoaderConfig {
            timeout_secs: 5,
            ..LoaderConfig::default()
        },
    };
    let text = toml::to_string_pretty(&config).unwrap();
    let parsed: ViewerConfig = toml::from_str(&text).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_partial_toml_uses_defaults() {
    let parsed: ViewerConfig = toml::from_str(
        r#"
        [zoom]
        max_zoom_factor = 5.0

        [zoom.double_tap]
        mode = "tap_rect"
        size = 64.0
        "#,
    )
    .unwrap();
    assert_eq!(parsed.zoom.max_zoom_factor, 5.0);
    assert_eq!(parsed.zoom.double_tap, DoubleTapZoom::TapRect { size: 64.0 });
    assert_eq!(parsed.zoom.animation_ms, 300);
    assert_eq!(parsed.loader, LoaderConfig::default());
}

#[test]
fn test_empty_toml_is_default() {
    let parsed: ViewerConfig = toml::from_str("").unwrap();
    assert_eq!(parsed, ViewerConfig::default());
}

#[test]
fn test_json_double_tap_tagging() {
    let json = serde_json::to_string(&DoubleTapZoom::MaxScale).unwrap();
    assert_eq!(json, r#"{"mode":"max_scale"}"#);
}
