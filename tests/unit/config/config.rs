use super::*;

#[test]
fn defaults_validate() {
    let cfg = SplashConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.duration_ms, 3500.0);
    assert_eq!(cfg.watchdog_ms(), 5500.0);
    assert_eq!(cfg.vocabulary.len(), 36);
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg = SplashConfig::from_json_str(
        r##"{ "duration_ms": 1000, "seed": 9, "wordmark": { "text": "HELLO", "color": "#ff0000" } }"##,
    )
    .unwrap();
    assert_eq!(cfg.duration_ms, 1000.0);
    assert_eq!(cfg.seed, Some(9));
    assert_eq!(cfg.wordmark.text, "HELLO");
    assert_eq!(cfg.wordmark.color, Rgba8::opaque(255, 0, 0));
    assert_eq!(cfg.wordmark.base_size, 60.0);
    assert_eq!(cfg.field, FieldParams::default());
}

#[test]
fn unknown_fields_are_rejected() {
    let err = SplashConfig::from_json_str(r#"{ "duraton_ms": 10 }"#).unwrap_err();
    assert!(matches!(err, SplashError::Serde(_)));
}

#[test]
fn invalid_values_are_rejected() {
    let cases: Vec<fn(&mut SplashConfig)> = vec![
        |c| c.duration_ms = 0.0,
        |c| c.duration_ms = f64::NAN,
        |c| c.grace_ms = -1.0,
        |c| c.vocabulary.clear(),
        |c| c.vocabulary.push("   ".to_owned()),
        |c| c.field.damping = 0.0,
        |c| c.field.size_decay = 1.5,
        |c| c.field.ring_margin = 10.0,
        |c| c.field.opacity_range = [0.5, 1.5],
        |c| c.field.speed_range = [0.3, 0.2],
        |c| c.field.glow_px = -1.0,
        |c| c.field.glow_px = f64::INFINITY,
        |c| c.wordmark.max_size = 10.0,
        |c| c.wordmark.anchor_fraction = 2.0,
        |c| c.wordmark.text = String::new(),
    ];
    for (i, mutate) in cases.into_iter().enumerate() {
        let mut cfg = SplashConfig::default();
        mutate(&mut cfg);
        let err = cfg.validate().unwrap_err();
        assert!(
            matches!(err, SplashError::Validation(_)),
            "case {i} gave {err}"
        );
    }
}

#[test]
fn from_path_reads_files() {
    let dir = std::env::temp_dir().join(format!("vortex_splash_cfg_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("splash.json");
    std::fs::write(&path, r#"{ "grace_ms": 250 }"#).unwrap();

    let cfg = SplashConfig::from_path(&path).unwrap();
    assert_eq!(cfg.grace_ms, 250.0);

    let missing = dir.join("missing.json");
    let err = SplashConfig::from_path(&missing).unwrap_err();
    let SplashError::Other(inner) = &err else {
        panic!("expected an i/o error, got {err}");
    };
    assert!(inner.to_string().contains("missing.json"));
    assert!(inner.root_cause().downcast_ref::<std::io::Error>().is_some());

    std::fs::remove_dir_all(&dir).ok();
}
