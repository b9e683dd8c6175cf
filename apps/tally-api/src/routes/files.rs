//! File routes: list, create and read named documents.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::extractors::extract_json;
use crate::AppState;

/// Body of `POST /files`.
#[derive(Debug, Deserialize)]
pub struct CreateFile {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct FileContent {
    pub content: String,
}

/// `GET /files`
pub async fn list_files(State(state): State<Arc<AppState>>) -> Result<Json<Vec<String>>, ApiError> {
    let names = state.store.list().await?;
    debug!(count = names.len(), "Files listed");
    Ok(Json(names))
}

/// `POST /files`
pub async fn create_file(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateFile>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let file = extract_json(body)?;
    state.store.write(&file.name, &file.content).await?;
    info!(name = %file.name, "File created");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: format!("File '{}' created", file.name),
        }),
    ))
}

/// `GET /files/{name}`
pub async fn read_file(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<FileContent>, ApiError> {
    let content = state.store.read(&name).await?;
    debug!(%name, bytes = content.len(), "File read");
    Ok(Json(FileContent { content }))
}
