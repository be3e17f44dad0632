use super::*;
use serde_json::json;

#[test]
fn default_table_shape() {
    let t = LayoutTable::default();
    let lens: Vec<usize> = t.paragraphs().iter().map(Vec::len).collect();
    assert_eq!(lens, vec![3, 2, 12, 19, 3, 5, 7, 4]);
    assert_eq!(t.row_count(), 55);
    assert_eq!(t.paragraphs()[0][0], LineSpan::new(0.4, 1.0));
    for p in &t.paragraphs()[1..] {
        assert_eq!(p[0].start, 0.1);
    }
    t.validate().unwrap();
}

#[test]
fn spans_serialize_as_pairs() {
    let t = LayoutTable::new(vec![vec![LineSpan::new(0.1, 0.9)], vec![]]);
    let v = serde_json::to_value(&t).unwrap();
    assert_eq!(v, json!([[[0.1, 0.9]], []]));
    let back: LayoutTable = serde_json::from_value(v).unwrap();
    assert_eq!(back, t);
    assert!(!back.is_empty());
}

#[test]
fn reversed_spans_are_valid_but_out_of_range_is_not() {
    LayoutTable::new(vec![vec![LineSpan::new(0.9, 0.1)]])
        .validate()
        .unwrap();
    let err = LayoutTable::new(vec![vec![LineSpan::new(-0.1, 0.5)]])
        .validate()
        .unwrap_err();
    assert!(err.to_string().contains("paragraph 0 row 0"));
    assert!(
        LayoutTable::new(vec![vec![LineSpan::new(0.0, f64::NAN)]])
            .validate()
            .is_err()
    );
}

#[test]
fn table_without_rows_is_invalid() {
    assert!(LayoutTable::new(vec![]).validate().is_err());
    assert!(LayoutTable::new(vec![vec![], vec![]]).validate().is_err());
}
