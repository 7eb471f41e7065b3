use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SplashError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        SplashError::surface("x")
            .to_string()
            .contains("surface error:")
    );
    assert!(SplashError::render("x").to_string().contains("render error:"));
    assert!(
        SplashError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("canvas detached");
    let err = SplashError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("canvas detached"));
}
