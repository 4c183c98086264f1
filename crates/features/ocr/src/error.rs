use std::borrow::Cow;

/// A specialized [`OcrError`] enum of this crate.
#[keel_derive::keel_error]
pub enum OcrError {
    #[error("Unknown OCR provider: {name}")]
    UnknownProvider { name: String },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal OCR error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
