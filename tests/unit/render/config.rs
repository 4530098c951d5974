use super::*;

#[test]
fn defaults_enable_antialiasing_and_blur() {
    let cfg = RenderConfig::default();
    assert!(cfg.antialiasing);
    assert!(cfg.blur_background);
    assert_eq!(cfg.filter, Filter::Mks13);
    assert_eq!(cfg.threads, 0);
    assert_eq!(cfg.blur_sigma, 20.0);
    cfg.validate().unwrap();
}

#[test]
fn partial_json_keeps_remaining_defaults() {
    let cfg = RenderConfig::from_json_str(r#"{"filter":"linear","threads":2}"#).unwrap();
    assert_eq!(cfg.filter, Filter::Linear);
    assert_eq!(cfg.threads, 2);
    assert!(cfg.antialiasing);
    assert_eq!(cfg.blur_sigma, 20.0);
}

#[test]
fn unknown_fields_and_filters_are_rejected() {
    let err = RenderConfig::from_json_str(r#"{"sharpen":true}"#).unwrap_err();
    assert!(matches!(err, PixError::Validation(_)));
    assert!(RenderConfig::from_json_str(r#"{"filter":"lanczos"}"#).is_err());
}

#[test]
fn validate_rejects_bad_sigma() {
    for sigma in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let cfg = RenderConfig {
            blur_sigma: sigma,
            ..RenderConfig::default()
        };
        assert!(cfg.validate().is_err(), "{sigma}");
    }
}

#[test]
fn from_path_reads_file_and_reports_missing() {
    let dir = std::env::temp_dir().join(format!("pixrender-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("render.json");
    std::fs::write(&path, r#"{"antialiasing":false,"blur_sigma":4.5}"#).unwrap();

    let cfg = RenderConfig::from_path(&path).unwrap();
    assert!(!cfg.antialiasing);
    assert_eq!(cfg.blur_sigma, 4.5);

    let err = RenderConfig::from_path(dir.join("missing.json")).unwrap_err();
    assert!(err.to_string().contains("missing.json"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn config_round_trips_through_json() {
    let cfg = RenderConfig {
        filter: Filter::Cubic,
        blur_background: false,
        ..RenderConfig::default()
    };
    let text = serde_json::to_string(&cfg).unwrap();
    assert_eq!(RenderConfig::from_json_str(&text).unwrap(), cfg);
}
