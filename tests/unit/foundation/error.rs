use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        RoadsError::invalid_bounds("x")
            .to_string()
            .contains("invalid bounds:")
    );
    assert!(
        RoadsError::empty_input("x")
            .to_string()
            .contains("empty input:")
    );
    assert!(
        RoadsError::canvas_size("x")
            .to_string()
            .contains("invalid canvas size:")
    );
    assert!(
        RoadsError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(RoadsError::encode("x").to_string().contains("encode error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = RoadsError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn io_errors_convert_into_other() {
    let err: RoadsError = std::io::Error::other("disk full").into();
    assert!(matches!(err, RoadsError::Other(_)));
    assert!(err.to_string().contains("disk full"));
}
