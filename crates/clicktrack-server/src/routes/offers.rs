//! Offer pages and forms.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{FormRejection, PathRejection},
        Form, Path, State,
    },
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::info;

use clicktrack_core::model::{CreateOfferParams, Offer, UpdateOfferParams};

use crate::{
    error::AppError,
    routes::{form_error, path_id, redirect_after_post},
    state::AppState,
    views,
};

#[derive(Debug, Deserialize)]
pub struct OfferForm {
    pub name: String,
    pub url: String,
}

impl OfferForm {
    /// Trimmed `(name, url)`, both required.
    fn validate(self) -> Result<(String, String), AppError> {
        let name = self.name.trim();
        let url = self.url.trim();
        if name.is_empty() || url.is_empty() {
            return Err(AppError::BadRequest("Name and URL are required".to_string()));
        }
        Ok((name.to_string(), url.to_string()))
    }
}

async fn load_offer(state: &AppState, offer_id: i64) -> Result<Offer, AppError> {
    state
        .store
        .get_offer(offer_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Offer not found".to_string()))
}

/// `GET /offers`
#[tracing::instrument(skip(state))]
pub async fn list_offers(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let offers = state.store.list_offer_summaries().await?;
    Ok(views::offers::offers_page(&offers))
}

/// `GET /offer/create`
pub async fn create_form() -> impl IntoResponse {
    views::offers::create_page()
}

/// `POST /offers`
#[tracing::instrument(skip(state, headers, form))]
pub async fn create_offer(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    form: Result<Form<OfferForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(form) = form.map_err(form_error)?;
    let (name, url) = form.validate()?;

    let offer = state.store.create_offer(CreateOfferParams { name, url }).await?;
    info!(offer_id = offer.id, "Offer created");

    Ok(redirect_after_post(&headers, &format!("/offer/{}", offer.id)))
}

/// `GET /offer/{offer_id}`
#[tracing::instrument(skip(state, path))]
pub async fn offer_detail(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let offer_id = path_id(path, "offer_id")?;
    let offer = load_offer(&state, offer_id).await?;
    let overall = state.store.offer_overall_stats(offer_id).await?;
    let campaigns = state.store.offer_campaign_stats(offer_id).await?;
    Ok(views::offers::offer_page(&offer, &overall, &campaigns))
}

/// `GET /offer/{offer_id}/edit`
#[tracing::instrument(skip(state, path))]
pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let offer_id = path_id(path, "offer_id")?;
    let offer = load_offer(&state, offer_id).await?;
    Ok(views::offers::edit_page(&offer))
}

/// `POST /offer/{offer_id}/update`
///
/// Also rewrites the offer URL stored on every campaign of this offer.
#[tracing::instrument(skip(state, headers, path, form))]
pub async fn update_offer(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    path: Result<Path<i64>, PathRejection>,
    form: Result<Form<OfferForm>, FormRejection>,
) -> Result<Response, AppError> {
    let offer_id = path_id(path, "offer_id")?;
    let Form(form) = form.map_err(form_error)?;
    let (name, url) = form.validate()?;

    state
        .store
        .update_offer(offer_id, UpdateOfferParams { name, url })
        .await?
        .ok_or_else(|| AppError::NotFound("Offer not found".to_string()))?;

    Ok(redirect_after_post(&headers, &format!("/offer/{offer_id}")))
}
