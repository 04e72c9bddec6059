use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ChalkError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(ChalkError::render("x").to_string().contains("render error:"));
    assert!(ChalkError::encode("x").to_string().contains("encode error:"));
    assert!(ChalkError::data("x").to_string().contains("data error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ChalkError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn context_errors_convert_with_question_mark() {
    use anyhow::Context as _;

    fn read_missing() -> ChalkResult<Vec<u8>> {
        let bytes = std::fs::read("/definitely/not/here.csv").context("read missing dataset")?;
        Ok(bytes)
    }

    let err = read_missing().unwrap_err();
    assert!(matches!(err, ChalkError::Other(_)));
    assert!(err.to_string().contains("read missing dataset"));
}
