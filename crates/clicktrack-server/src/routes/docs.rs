use std::sync::Arc;

use axum::{extract::State, response::IntoResponse};

use crate::{state::AppState, views};

/// `GET /api-docs`
pub async fn api_docs(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    views::docs::api_docs_page(&state.config.base_url)
}
