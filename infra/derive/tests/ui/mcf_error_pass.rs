use mcf_derive::mcf_error;
use std::borrow::Cow;

#[mcf_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<String, DemoError> {
    std::fs::read_to_string("/definitely/not/here").context("reading demo file")
}

fn lift() -> Result<(), DemoError> {
    Err::<(), _>(std::io::Error::other("boom"))?;
    Ok(())
}

fn main() {
    let err = read().unwrap_err();
    assert!(err.to_string().contains("(reading demo file)"));
    assert!(matches!(lift(), Err(DemoError::Io { context: None, .. })));

    let internal: DemoError = "fallback".into();
    let annotated: Result<(), DemoError> = Err(internal);
    let err = annotated.context("while testing").unwrap_err();
    assert_eq!(err.to_string(), "Internal error (while testing): fallback");
}
