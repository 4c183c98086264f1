//! Items feature slice: a demo catalogue kept in memory for the process lifetime.

mod error;
mod handlers;
mod model;
mod store;

pub use crate::error::{ItemsError, ItemsErrorExt};
pub use crate::model::{CreateItem, Item, UpdateItem};
pub use crate::store::ItemStore;
use keel_kernel::domain::registry::InitializedSlice;
use keel_kernel::server::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Items feature state
#[keel_derive::keel_slice]
pub struct Items {
    pub store: ItemStore,
}

/// Initialize the items feature with an empty store.
///
/// # Errors
///
/// Infallible today; the signature matches the other slices.
pub fn init() -> Result<InitializedSlice, ItemsError> {
    let slice = Items::new(ItemsInner { store: ItemStore::new() });
    tracing::info!("Items slice initialized");
    Ok(InitializedSlice::new(slice))
}

/// CRUD routes, relative to the API prefix.
///
/// Handlers read the [`Items`] slice from [`ApiState`]; a state without it answers `500`.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::list_items, handlers::create_item))
        .routes(routes!(handlers::get_item, handlers::update_item, handlers::delete_item))
}
