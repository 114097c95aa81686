use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SpotlightError::invalid_step("x")
            .to_string()
            .contains("invalid step definition:")
    );
    assert!(
        SpotlightError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(SpotlightError::io("x").to_string().contains("io error:"));
    assert!(
        SpotlightError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SpotlightError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
