use std::borrow::Cow;

/// A specialized [`ItemsError`] enum of this crate.
#[keel_derive::keel_error]
pub enum ItemsError {
    #[error("Item not found{}: {id}", format_context(.context))]
    NotFound { id: u64, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal items error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl From<ItemsError> for keel_kernel::server::ApiError {
    fn from(err: ItemsError) -> Self {
        match err {
            ItemsError::NotFound { .. } => Self::not_found("Item not found"),
            ItemsError::Internal { message, context } => Self::Internal { message, context },
        }
    }
}
