use serde_json::json;

use super::*;

#[test]
fn defaults_match_the_published_figures() {
    let cfg = Config::default();
    assert_eq!(cfg.dpi, 100);
    assert_eq!(cfg.frame_delay_ms, 2000);
    assert_eq!(cfg.frame_order, FrameOrder::Index);
    assert_eq!(cfg.seed, 42);
    assert_eq!(cfg.px(4.0), 400);
    cfg.validate().unwrap();
}

#[test]
fn partial_json_fills_defaults() {
    let cfg: Config =
        serde_json::from_value(json!({"frame_order": "listing", "theme": "dark"})).unwrap();
    assert_eq!(cfg.frame_order, FrameOrder::Listing);
    assert_eq!(cfg.theme, Theme::Dark);
    assert_eq!(cfg.dpi, 100);
    assert_eq!(cfg.font_dir, None);
}

#[test]
fn font_dir_is_read_as_a_path() {
    let cfg: Config = serde_json::from_value(json!({"font_dir": "assets/fonts"})).unwrap();
    assert_eq!(cfg.font_dir, Some(PathBuf::from("assets/fonts")));
}

#[test]
fn unknown_fields_are_rejected() {
    let res: Result<Config, _> = serde_json::from_value(json!({"dpii": 72}));
    assert!(res.is_err());
}

#[test]
fn validate_rejects_zero_delay_and_bad_speed() {
    let cfg = Config {
        frame_delay_ms: 0,
        ..Config::default()
    };
    assert!(cfg.validate().is_err());

    let cfg = Config {
        gif_speed: 31,
        ..Config::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn load_reads_file_and_validates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cfg.json");
    std::fs::write(&path, r#"{"dpi": 50}"#).unwrap();
    let cfg = Config::load(&path).unwrap();
    assert_eq!(cfg.px(4.0), 200);

    std::fs::write(&path, r#"{"dpi": 0}"#).unwrap();
    assert!(Config::load(&path).is_err());

    assert!(Config::load(&dir.path().join("missing.json")).is_err());
}

#[test]
fn points_convert_to_pixels_at_dpi() {
    let cfg = Config::default();
    assert!((cfg.pt_to_px(72.0) - 100.0).abs() < 1e-4);
}
