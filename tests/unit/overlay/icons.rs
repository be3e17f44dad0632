use super::*;
use crate::assets::source::MemoryAssets;
use crate::foundation::error::ConcertoError;
use crate::foundation::rng::{Rng64, ScriptedRandom};

const NOTE: &[u8] = br#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10"><circle cx="5" cy="5" r="5"/></svg>"#;

fn note() -> Arc<PreparedSvg> {
    Arc::new(parse_svg(NOTE).unwrap())
}

#[test]
fn icon_is_centered_on_the_scripted_point() {
    let lines = vec![
        Line::new((0.0, 0.0), (100.0, 0.0)),
        Line::new((10.0, 50.0), (210.0, 50.0)),
    ];
    // second line, a quarter of the way along
    let mut rng = ScriptedRandom::new(vec![0.75, 0.25]);
    let icon = place_icon("c.svg", note(), &lines, Rgba8::rgb(17, 17, 17), &mut rng).unwrap();

    assert_eq!(rng.consumed(), 2);
    assert_eq!(icon.name, "c.svg");
    assert_eq!(icon.bounds.center(), Point::new(60.0, 50.0));
    assert_eq!((icon.bounds.width(), icon.bounds.height()), (20.0, 10.0));
    assert_eq!(icon.fill, Rgba8::rgb(17, 17, 17));
}

#[test]
fn random_points_stay_on_their_lines() {
    let lines = vec![
        Line::new((0.0, 0.0), (300.0, 0.0)),
        Line::new((40.0, 15.0), (90.0, 15.0)),
        Line::new((5.0, 30.0), (6.0, 30.0)),
    ];
    let mut rng = Rng64::new(11);
    for _ in 0..500 {
        let p = random_point_on_lines(&lines, &mut rng).unwrap();
        let on_some = lines
            .iter()
            .any(|l| p.y == l.p0.y && p.x >= l.p0.x - 1e-9 && p.x <= l.p1.x + 1e-9);
        assert!(on_some, "{p:?}");
    }
}

#[test]
fn no_lines_places_nothing() {
    let mut rng = Rng64::new(1);
    assert!(place_icon("c.svg", note(), &[], Rgba8::rgb(0, 0, 0), &mut rng).is_none());
}

#[test]
fn unreadable_icons_are_asset_errors() {
    let assets = MemoryAssets::new()
        .with("c.svg", NOTE.to_vec())
        .unwrap()
        .with("broken.svg", b"<svg".to_vec())
        .unwrap();
    assert_eq!(load_icon(&assets, "c.svg").unwrap().size(), (20.0, 10.0));
    assert!(matches!(
        load_icon(&assets, "broken.svg").unwrap_err(),
        ConcertoError::Asset(_)
    ));
    assert!(matches!(
        load_icon(&assets, "piano.svg").unwrap_err(),
        ConcertoError::Asset(_)
    ));
}
