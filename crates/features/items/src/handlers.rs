use crate::Items;
use crate::model::{CreateItem, Item, UpdateItem};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use keel_derive::api_handler;
use keel_kernel::server::{ApiError, ApiState, ErrorBody};

pub(crate) const ITEMS_TAG: &str = "Items";

#[api_handler(
    get,
    path = "/items",
    responses((status = OK, description = "All items ordered by id", body = Vec<Item>)),
    tag = ITEMS_TAG,
)]
pub(crate) async fn list_items(State(state): State<ApiState>) -> Result<Json<Vec<Item>>, ApiError> {
    let items = state.try_get_slice::<Items>()?;
    Ok(Json(items.store.list()))
}

#[api_handler(
    post,
    path = "/items",
    request_body = CreateItem,
    responses((status = CREATED, description = "Item created", body = Item)),
    tag = ITEMS_TAG,
)]
pub(crate) async fn create_item(
    State(state): State<ApiState>,
    Json(payload): Json<CreateItem>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let items = state.try_get_slice::<Items>()?;
    let item = items.store.create(payload);
    tracing::debug!(id = item.id, "Item created");
    Ok((StatusCode::CREATED, Json(item)))
}

#[api_handler(
    get,
    path = "/items/{id}",
    params(("id" = u64, Path, description = "Item id")),
    responses(
        (status = OK, description = "The item", body = Item),
        (status = NOT_FOUND, description = "Item not found", body = ErrorBody),
    ),
    tag = ITEMS_TAG,
)]
pub(crate) async fn get_item(
    State(state): State<ApiState>,
    Path(id): Path<u64>,
) -> Result<Json<Item>, ApiError> {
    let items = state.try_get_slice::<Items>()?;
    Ok(Json(items.store.get(id)?))
}

#[api_handler(
    put,
    path = "/items/{id}",
    params(("id" = u64, Path, description = "Item id")),
    request_body = UpdateItem,
    responses(
        (status = OK, description = "Item updated", body = Item),
        (status = NOT_FOUND, description = "Item not found", body = ErrorBody),
    ),
    tag = ITEMS_TAG,
)]
pub(crate) async fn update_item(
    State(state): State<ApiState>,
    Path(id): Path<u64>,
    Json(patch): Json<UpdateItem>,
) -> Result<Json<Item>, ApiError> {
    let items = state.try_get_slice::<Items>()?;
    Ok(Json(items.store.update(id, patch)?))
}

#[api_handler(
    delete,
    path = "/items/{id}",
    params(("id" = u64, Path, description = "Item id")),
    responses(
        (status = NO_CONTENT, description = "Item deleted"),
        (status = NOT_FOUND, description = "Item not found", body = ErrorBody),
    ),
    tag = ITEMS_TAG,
)]
pub(crate) async fn delete_item(
    State(state): State<ApiState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    let items = state.try_get_slice::<Items>()?;
    items.store.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
