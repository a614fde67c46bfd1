//! Axum route handlers for the inventory API.
//!
//! Every handler validates the request completely (path, body shape, field
//! values, path/body id agreement) before it touches the store.

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::errors::{json_body, AppError};
use crate::inventory::models::{Item, ItemDeletedResponse, ItemMutationResponse};
use crate::state::AppState;

fn item_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

fn item_body(body: Result<Json<Item>, JsonRejection>) -> Result<Item, AppError> {
    let item = json_body(body)?;
    item.validate().map_err(AppError::BadRequest)?;
    Ok(item)
}

/// GET /items
pub async fn handle_list_items(State(state): State<AppState>) -> Json<Vec<Item>> {
    Json(state.inventory.list())
}

/// GET /items/:id
pub async fn handle_get_item(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Item>, AppError> {
    let id = item_id(path)?;
    Ok(Json(state.inventory.get(id)?))
}

/// POST /items
///
/// Answers 201 with the stored item wrapped in a `{"message", "item"}` envelope
/// rather than the bare item; update uses the same envelope.
pub async fn handle_create_item(
    State(state): State<AppState>,
    body: Result<Json<Item>, JsonRejection>,
) -> Result<(StatusCode, Json<ItemMutationResponse>), AppError> {
    let item = item_body(body)?;
    let item = state.inventory.insert(item)?;
    Ok((
        StatusCode::CREATED,
        Json(ItemMutationResponse {
            message: "Item added successfully".to_string(),
            item,
        }),
    ))
}

/// PUT /items/:id
pub async fn handle_update_item(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<Item>, JsonRejection>,
) -> Result<Json<ItemMutationResponse>, AppError> {
    let id = item_id(path)?;
    let item = item_body(body)?;
    if item.id != id {
        return Err(AppError::BadRequest(format!(
            "Path id {id} does not match body id {}",
            item.id
        )));
    }

    let item = state.inventory.replace(id, item)?;
    Ok(Json(ItemMutationResponse {
        message: "Item updated".to_string(),
        item,
    }))
}

/// DELETE /items/:id
pub async fn handle_delete_item(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ItemDeletedResponse>, AppError> {
    let id = item_id(path)?;
    let removed = state.inventory.delete(id)?;
    Ok(Json(ItemDeletedResponse {
        message: "Item deleted".to_string(),
        id: removed.id,
    }))
}
