use super::*;

#[test]
fn empty_json_is_the_default_page() {
    let comp = Composition::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(comp, Composition::default());
    comp.validate().unwrap();
    assert_eq!(comp.spacing, 15.0);
    assert_eq!(comp.paragraphs.len(), 8);
    assert_eq!(comp.assets.icons, vec!["c.svg", "piano.svg"]);
    assert_eq!(comp.style().ink, Rgba8::rgb(17, 17, 17));
}

#[test]
fn json_roundtrip_preserves_fields() {
    let mut comp = Composition::default();
    comp.seed = Some(99);
    comp.viewport = Viewport {
        width: 640,
        height: 900,
    };
    comp.assets.font = Some("fonts/bold.ttf".into());
    let json = comp.to_json_pretty().unwrap();
    let back = Composition::from_reader(json.as_bytes()).unwrap();
    assert_eq!(back, comp);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = Composition::from_reader(r#"{"spacng": 3}"#.as_bytes()).unwrap_err();
    assert!(matches!(err, ConcertoError::Serde(_)));
}

#[test]
fn validation_catches_bad_values() {
    let mut comp = Composition::default();
    comp.spacing = 0.0;
    assert!(comp.validate().is_err());

    let mut comp = Composition::default();
    comp.margin = 500.0;
    assert!(comp.validate().is_err());

    let mut comp = Composition::default();
    comp.assets.painting = "../escape.png".into();
    assert!(comp.validate().is_err());

    let comp: Composition =
        serde_json::from_value(serde_json::json!({"paragraphs": [[[0.0, 1.5]]]})).unwrap();
    assert!(comp.validate().is_err());
}

#[test]
fn usable_width_subtracts_both_margins() {
    let comp = Composition::default();
    assert_eq!(comp.usable_width(), 900.0 - 80.0);
    assert_eq!(comp.style().width, 820.0);
}

#[test]
fn from_path_reports_missing_file() {
    let err = Composition::from_path("target/definitely/missing.json").unwrap_err();
    assert!(err.to_string().contains("open composition JSON"));
}
