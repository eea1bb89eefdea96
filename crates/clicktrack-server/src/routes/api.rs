//! Read-only JSON endpoints mirroring the dashboard data.

use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use clicktrack_core::stats::OverallStats;

use crate::{error::AppError, routes::path_id, state::AppState};

/// `GET /api/campaigns`
#[tracing::instrument(skip(state))]
pub async fn list_campaigns(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let campaigns = state.store.list_campaign_summaries().await?;
    Ok(Json(json!({ "data": campaigns })))
}

/// `GET /api/campaign/{campaign_id}/stats`
#[tracing::instrument(skip(state, path))]
pub async fn campaign_stats(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let campaign_id = path_id(path, "campaign_id")?;
    if state.store.get_campaign(campaign_id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "Campaign with id {campaign_id} not found"
        )));
    }

    let overall = OverallStats::from(state.store.campaign_overall_stats(campaign_id).await?);
    let domains = state.store.campaign_domain_stats(campaign_id).await?;

    Ok(Json(json!({
        "data": {
            "overall": overall,
            "domains": domains,
        }
    })))
}
