use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use holocron_api::ApiError;
use holocron_core::{Film, FilmDraft, FilmId};
use holocron_sync::{SyncOutcome, SyncRequest};
use serde::Serialize;
use serde_json::json;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse<'a> {
    status: &'a str,
    store: &'a str,
    syncing: bool,
}

pub async fn root() -> impl IntoResponse {
    let body = json!({
        "service": "Holocron",
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "commit": env!("GIT_COMMIT"),
    });
    (StatusCode::OK, Json(body))
}

pub async fn healthz(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            store: state.store.backend_name(),
            syncing: state.sync.is_syncing(),
        }),
    )
}

// ---- Sync ----

pub async fn sync_status(
    State(state): State<AppState>,
) -> Result<Json<Vec<SyncOutcome>>, ApiError> {
    Ok(Json(state.sync.sync_status().await?))
}

pub async fn sync_by_status(
    State(state): State<AppState>,
    Json(request): Json<SyncRequest>,
) -> Result<Json<Vec<Film>>, ApiError> {
    Ok(Json(state.sync.sync_by_status(&request).await?))
}

pub async fn force_sync(
    State(state): State<AppState>,
    Path(external_id): Path<String>,
) -> Result<Json<Film>, ApiError> {
    state
        .sync
        .force_update(&external_id)
        .await?
        .map(Json)
        .ok_or_else(|| {
            ApiError::not_found(format!(
                "Film with external id '{}' not found upstream",
                external_id.trim()
            ))
        })
}

// ---- Catalog CRUD ----

pub async fn list_films(State(state): State<AppState>) -> Result<Json<Vec<Film>>, ApiError> {
    Ok(Json(state.catalog.list().await?))
}

pub async fn get_film(
    State(state): State<AppState>,
    Path(id): Path<FilmId>,
) -> Result<Json<Film>, ApiError> {
    state
        .catalog
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| film_not_found(id))
}

pub async fn create_film(
    State(state): State<AppState>,
    Json(draft): Json<FilmDraft>,
) -> Result<impl IntoResponse, ApiError> {
    let film = state.catalog.create(draft).await?;
    Ok((StatusCode::CREATED, Json(film)))
}

pub async fn update_film(
    State(state): State<AppState>,
    Path(id): Path<FilmId>,
    Json(draft): Json<FilmDraft>,
) -> Result<Json<Film>, ApiError> {
    state
        .catalog
        .update(id, draft)
        .await?
        .map(Json)
        .ok_or_else(|| film_not_found(id))
}

pub async fn delete_film(
    State(state): State<AppState>,
    Path(id): Path<FilmId>,
) -> Result<StatusCode, ApiError> {
    if state.catalog.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(film_not_found(id))
    }
}

fn film_not_found(id: FilmId) -> ApiError {
    ApiError::not_found(format!("Film {id} not found"))
}
