use super::*;

#[test]
fn defaults_keep_historical_constants() {
    let opts = RendererOpts::default();
    assert_eq!(opts.sample_threshold, 500);
    assert_eq!(opts.max_frame_delta_ms, 100);
    assert_eq!(opts.void_texture_scale, 4.0);
    assert_eq!(opts.border_inset_px, 10);
    opts.validate().unwrap();
}

#[test]
fn partial_json_fills_defaults() {
    let opts = RendererOpts::from_json_str(r#"{"sample_threshold": 42, "zoom": {"max": 8.0}}"#)
        .unwrap();
    assert_eq!(opts.sample_threshold, 42);
    assert_eq!(opts.zoom.max, 8.0);
    assert_eq!(opts.zoom.step, ZoomOpts::default().step);
    assert_eq!(opts.pan, PanOpts::default());
}

#[test]
fn json_roundtrip_is_stable() {
    let opts = RendererOpts::default();
    let s = opts.to_json_string().unwrap();
    assert_eq!(RendererOpts::from_json_str(&s).unwrap(), opts);
}

#[test]
fn invalid_json_and_values_are_rejected() {
    assert!(matches!(
        RendererOpts::from_json_str("{"),
        Err(TilescopeError::Serde(_))
    ));
    assert!(matches!(
        RendererOpts::from_json_str(r#"{"zoom": {"min": 2.0, "max": 1.0}}"#),
        Err(TilescopeError::Validation(_))
    ));
    assert!(RendererOpts::from_json_str(r#"{"zoom": {"step": 1.0}}"#).is_err());
    assert!(RendererOpts::from_json_str(r#"{"void_texture_scale": 0.0}"#).is_err());
}

#[test]
fn overrides_apply_and_ignore_garbage() {
    let opts = RendererOpts::default().with_overrides_from(|key| match key {
        ENV_SAMPLE_THRESHOLD => Some(" 64 ".to_string()),
        ENV_MAX_FRAME_DELTA_MS => Some("soon".to_string()),
        _ => None,
    });
    assert_eq!(opts.sample_threshold, 64);
    assert_eq!(opts.max_frame_delta_ms, 100);
}

#[test]
fn from_path_reports_missing_file() {
    let err = RendererOpts::from_path("target/does/not/exist.json").unwrap_err();
    assert!(err.to_string().contains("read renderer options"));
}
