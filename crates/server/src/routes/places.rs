use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use common::types::Message;
use models::Place;
use serde::Deserialize;
use service::catalog::parse_place_id;
use tracing::debug;

use crate::errors::JsonApiError;
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
pub struct DescriptionQuery {
    pub description: Option<String>,
}

/// List every place in id order
pub async fn list_places(State(state): State<ServerState>) -> Json<Vec<Place>> {
    Json(state.catalog.list().await)
}

/// Fetch one place by positional id
pub async fn get_place(
    State(state): State<ServerState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Place>, JsonApiError> {
    let id = parse_place_id(&raw_id)?;
    Ok(Json(state.catalog.get(id).await?))
}

/// Create a place; the body must decode into a `Place` with a unique name
pub async fn create_place(
    State(state): State<ServerState>,
    payload: Result<Json<Place>, JsonRejection>,
) -> Result<Json<serde_json::Value>, JsonApiError> {
    let Json(place) = payload.map_err(|rejection| {
        debug!(reason = %rejection.body_text(), "create body rejected");
        JsonApiError::bad_request("request body is not a valid place")
    })?;
    let id = state.catalog.create(place).await?;
    Ok(Json(serde_json::json!({"message": "place created", "id": id})))
}

/// Replace the description of the place at `id` with the `description` query parameter
pub async fn update_place_description(
    State(state): State<ServerState>,
    Path(raw_id): Path<String>,
    Query(q): Query<DescriptionQuery>,
) -> Result<Json<Message>, JsonApiError> {
    let id = parse_place_id(&raw_id)?;
    let description = q.description.as_deref().unwrap_or_default();
    state.catalog.update_description(id, description).await?;
    Ok(Json(Message::new("description updated")))
}

/// Delete the place at `id`
pub async fn delete_place(
    State(state): State<ServerState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Message>, JsonApiError> {
    let id = parse_place_id(&raw_id)?;
    state.catalog.delete(id).await?;
    Ok(Json(Message::new("place deleted")))
}
