use super::*;

#[test]
fn frame_range_validates_bounds() {
    let r = FrameRange::new(2, 5).unwrap();
    assert_eq!((r.start(), r.end(), r.frame_count()), (2, 5, 4));
    assert_eq!(FrameRange::new(3, 3).unwrap().frame_count(), 1);
    assert!(matches!(
        FrameRange::new(5, 2),
        Err(SvgaError::Validation(_))
    ));
    assert!(matches!(
        FrameRange::new(-1, 2),
        Err(SvgaError::Validation(_))
    ));
}

#[test]
fn config_defaults() {
    let c = PlaybackConfig::default();
    assert_eq!(c.loops, 0);
    assert_eq!(c.fill_mode, FillMode::Forward);
    assert_eq!(c.range, None);
    assert!(!c.auto_play);
}

#[test]
fn config_parses_from_json() {
    let c = PlaybackConfig::from_json_str(
        r#"{"loops": 2, "fill_mode": "clear", "range": {"start": 1, "end": 4}, "auto_play": true}"#,
    )
    .unwrap();
    assert_eq!(c.loops, 2);
    assert_eq!(c.fill_mode, FillMode::Clear);
    assert_eq!(c.range, Some(FrameRange::new(1, 4).unwrap()));
    assert!(c.auto_play);

    let partial = PlaybackConfig::from_json_str(r#"{"fill_mode": "backward"}"#).unwrap();
    assert_eq!(partial.fill_mode, FillMode::Backward);
    assert_eq!(partial.loops, 0);
}

#[test]
fn config_rejects_inverted_range() {
    let err = PlaybackConfig::from_json_str(r#"{"range": {"start": 4, "end": 1}}"#).unwrap_err();
    assert!(matches!(err, SvgaError::Validation(_)));
}

#[test]
fn config_rejects_unknown_fill_mode() {
    assert!(PlaybackConfig::from_json_str(r#"{"fill_mode": "sideways"}"#).is_err());
}

#[test]
fn config_serializes_lowercase_fill_mode() {
    let c = PlaybackConfig {
        fill_mode: FillMode::Backward,
        ..PlaybackConfig::default()
    };
    let json = serde_json::to_string(&c).unwrap();
    assert!(json.contains("\"backward\""), "{json}");
}
