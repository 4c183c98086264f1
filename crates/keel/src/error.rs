use keel_database::DatabaseError;
use keel_items::ItemsError;
use keel_ocr::OcrError;
use keel_storage::StorageError;
use std::borrow::Cow;

/// A specialized [`BootstrapError`] enum of this crate.
#[keel_derive::keel_error]
pub enum BootstrapError {
    #[error("Database bootstrap failed{}: {source}", format_context(.context))]
    Database { source: DatabaseError, context: Option<Cow<'static, str>> },

    #[error("Storage bootstrap failed{}: {source}", format_context(.context))]
    Storage { source: StorageError, context: Option<Cow<'static, str>> },

    #[error("OCR bootstrap failed{}: {source}", format_context(.context))]
    Ocr { source: OcrError, context: Option<Cow<'static, str>> },

    #[error("Items bootstrap failed{}: {source}", format_context(.context))]
    Items { source: ItemsError, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal bootstrap error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
