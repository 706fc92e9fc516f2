use axum::{extract::State, Json};
use meshstore::NodeInfo;
use std::sync::Arc;

use super::AppState;

/// GET /info
pub async fn get_info(State(state): State<Arc<AppState>>) -> Json<NodeInfo> {
    Json(state.identity.info())
}
