use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct EmailsSentRequest {
    pub emails_sent: i64,
}

/// `PUT /api/campaign/{campaign_id}/domain/{domain}/emails-sent`
///
/// Sets (not increments) the number of emails a domain sent for a campaign.
/// Creates the counter row on first use.
#[tracing::instrument(skip(state, path, body))]
pub async fn set_emails_sent(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(i64, String)>, PathRejection>,
    body: Result<Json<EmailsSentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path((campaign_id, domain)) =
        path.map_err(|e| AppError::validation("campaign_id", e.body_text()))?;
    let Json(req) = body.map_err(|e| AppError::validation("emails_sent", e.body_text()))?;

    if domain.trim().is_empty() {
        return Err(AppError::validation("domain", "domain must not be empty"));
    }
    if req.emails_sent < 0 {
        return Err(AppError::validation(
            "emails_sent",
            "emails_sent must be a non-negative integer",
        ));
    }

    if !state.store.campaign_exists(campaign_id).await? {
        return Err(AppError::NotFound(format!(
            "Campaign with id {campaign_id} not found"
        )));
    }

    let row = state
        .store
        .set_emails_sent(campaign_id, &domain, req.emails_sent)
        .await?;
    tracing::info!(
        campaign_id,
        domain = %row.domain,
        emails_sent = row.emails_sent,
        "Emails sent updated"
    );

    Ok(Json(json!({
        "status": "ok",
        "campaign_id": row.campaign_id,
        "domain": row.domain,
        "emails_sent": row.emails_sent,
    })))
}
