use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TilescopeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(TilescopeError::asset("x").to_string().contains("asset error:"));
    assert!(
        TilescopeError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        TilescopeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TilescopeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
