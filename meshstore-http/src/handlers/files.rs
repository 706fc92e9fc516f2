use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use meshstore::{FileName, MeshError, RetrievalOutcome};
use meshstore_peer::Resolution;
use std::sync::Arc;

use super::AppState;

/// GET /:file_name
/// Local lookup first; on a miss, one fan-out round across the neighbours.
/// A file fetched from a peer is handed to the cache writer after the
/// response is built, never awaited.
pub async fn get_file(
    State(state): State<Arc<AppState>>,
    Path(file_name): Path<String>,
) -> Result<Response, MeshError> {
    let file_name = FileName::parse(&file_name)?;

    if let RetrievalOutcome::Found(content) = state.store.read(&file_name).await? {
        tracing::debug!("[GET {}] served locally", file_name);
        return Ok(file_response(&file_name, content));
    }

    match state.fallback.resolve(&file_name).await {
        Resolution::Found { peer, content } => {
            tracing::info!("[GET {}] served from peer {}", file_name, peer);
            let response = file_response(&file_name, content.clone());
            state.cache.cache_in_background(file_name, content);
            Ok(response)
        }
        Resolution::AllMissed => Err(MeshError::NotFound(file_name.to_string())),
    }
}

/// GET /from_node/:file_name
/// Local-only lookup. Peers call this on each other, which keeps fallback
/// to a single hop.
pub async fn get_local(
    State(state): State<Arc<AppState>>,
    Path(file_name): Path<String>,
) -> Result<Response, MeshError> {
    let file_name = FileName::parse(&file_name)?;

    match state.store.read(&file_name).await? {
        RetrievalOutcome::Found(content) => Ok(file_response(&file_name, content)),
        _ => Err(MeshError::NotFound(file_name.to_string())),
    }
}

/// POST /:file_name
/// Reserved for uploads; accepted and ignored.
pub async fn post_file(Path(file_name): Path<String>) -> Result<StatusCode, MeshError> {
    let file_name = FileName::parse(&file_name)?;
    tracing::debug!("[POST {}] uploads are not supported, ignoring", file_name);
    Ok(StatusCode::OK)
}

fn file_response(file_name: &FileName, content: Bytes) -> Response {
    let disposition = format!(
        "attachment; filename=\"{}\"",
        file_name.as_str().replace('"', "\\\"")
    );

    (
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        content,
    )
        .into_response()
}
