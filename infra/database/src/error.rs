use std::borrow::Cow;

/// A specialized [`DatabaseError`] enum of this crate.
#[keel_derive::keel_error]
pub enum DatabaseError {
    /// Validation errors.
    #[error("Validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The connector was used before `connect` or after `close`.
    #[error("{backend} connection not initialized{}", format_context(.context))]
    NotInitialized { backend: &'static str, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal database error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
