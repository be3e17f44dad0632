use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ConcertoError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(ConcertoError::asset("x").to_string().contains("asset error:"));
    assert!(
        ConcertoError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        ConcertoError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ConcertoError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
