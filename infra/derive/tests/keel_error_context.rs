use keel_derive::keel_error;
use std::borrow::Cow;

#[keel_error]
pub enum ProbeError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Not found: {what}")]
    NotFound { what: String },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn failing_io() -> Result<(), std::io::Error> {
    Err(std::io::Error::other("disk gone"))
}

#[test]
fn question_mark_converts_source_errors() {
    fn run() -> Result<(), ProbeError> {
        failing_io()?;
        Ok(())
    }

    let err = run().unwrap_err();
    assert!(matches!(err, ProbeError::Io { context: None, .. }));
    assert_eq!(err.to_string(), "IO error: disk gone");
}

#[test]
fn context_is_attached_to_foreign_results() {
    let err = failing_io().context("Opening settings").unwrap_err();
    assert_eq!(err.context_message(), Some("Opening settings"));
    assert_eq!(err.to_string(), "IO error (Opening settings): disk gone");
}

#[test]
fn context_is_attached_to_own_results() {
    let res: Result<(), ProbeError> = Err(ProbeError::from("exploded"));
    let err = res.context("Booting").unwrap_err();
    assert_eq!(err.to_string(), "Internal error (Booting): exploded");
}

#[test]
fn variants_without_context_are_left_untouched() {
    let res: Result<(), ProbeError> = Err(ProbeError::NotFound { what: "item".to_owned() });
    let err = res.context("ignored").unwrap_err();
    assert_eq!(err.context_message(), None);
    assert_eq!(err.to_string(), "Not found: item");
}

#[test]
fn strings_convert_into_internal() {
    let err: ProbeError = String::from("dynamic").into();
    assert!(matches!(err, ProbeError::Internal { ref message, .. } if message == "dynamic"));
}
