use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        GridError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(GridError::font("x").to_string().contains("font error:"));
    assert!(
        GridError::canvas("x")
            .to_string()
            .contains("canvas unavailable:")
    );
    assert!(GridError::encode("x").to_string().contains("encode error:"));
    assert!(
        GridError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn image_load_names_source_and_reason() {
    let err = GridError::image_load("covers/a.png", "no such file");
    let msg = err.to_string();
    assert!(msg.contains("covers/a.png"));
    assert!(msg.contains("no such file"));
    assert!(err.is_cell_local());
    assert!(!GridError::encode("x").is_cell_local());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = GridError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
