//! Campaign dashboard pages, fragments and forms.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{FormRejection, PathRejection, QueryRejection},
        Form, Path, Query, State,
    },
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::info;

use clicktrack_core::model::{Campaign, CreateCampaignParams, OfferChange};
use clicktrack_core::stats::{JourneyFilter, OverallStats};

use crate::{
    error::AppError,
    routes::{form_error, non_blank, parse_offer_id, path_id, redirect_after_post},
    state::AppState,
    views,
};

#[derive(Debug, Deserialize)]
pub struct CreateCampaignForm {
    pub name: String,
    pub offer_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateOfferForm {
    pub offer_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UsersQuery {
    pub domain: Option<String>,
    pub email_search: Option<String>,
    pub offset: Option<i64>,
}

impl From<UsersQuery> for JourneyFilter {
    fn from(q: UsersQuery) -> Self {
        JourneyFilter {
            domain: non_blank(q.domain),
            email_search: non_blank(q.email_search),
            offset: q.offset.unwrap_or(0).max(0),
        }
    }
}

async fn load_campaign(state: &AppState, campaign_id: i64) -> Result<Campaign, AppError> {
    state
        .store
        .get_campaign(campaign_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Campaign not found".to_string()))
}

async fn render_stats(state: &AppState, campaign_id: i64) -> Result<String, AppError> {
    let overall = OverallStats::from(state.store.campaign_overall_stats(campaign_id).await?);
    let domains = state.store.campaign_domain_stats(campaign_id).await?;
    Ok(views::campaigns::stats_fragment(&overall, &domains).0)
}

async fn render_users(
    state: &AppState,
    campaign_id: i64,
    filter: &JourneyFilter,
) -> Result<String, AppError> {
    let page = state.store.campaign_journeys(campaign_id, filter).await?;
    Ok(views::campaigns::users_fragment(campaign_id, filter, &page).0)
}

/// `GET /`
#[tracing::instrument(skip(state))]
pub async fn home(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let summaries = state.store.list_campaign_summaries().await?;
    Ok(views::campaigns::home_page(&summaries))
}

/// `GET /campaigns-table`: fragment polled by the home page.
#[tracing::instrument(skip(state))]
pub async fn campaigns_table(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let summaries = state.store.list_campaign_summaries().await?;
    Ok(views::campaigns::campaigns_table(&summaries))
}

/// `GET /create`
#[tracing::instrument(skip(state))]
pub async fn create_form(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let offers = state.store.list_offers().await?;
    Ok(views::campaigns::create_page(&offers))
}

/// `POST /campaigns`
#[tracing::instrument(skip(state, headers, form))]
pub async fn create_campaign(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    form: Result<Form<CreateCampaignForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(form) = form.map_err(form_error)?;

    let name = form.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    let offer_id = parse_offer_id(form.offer_id)?;

    let campaign = state
        .store
        .create_campaign(CreateCampaignParams {
            name: name.to_string(),
            offer_id,
        })
        .await?
        .ok_or_else(|| AppError::NotFound("Offer not found".to_string()))?;
    info!(campaign_id = campaign.id, offer_id, "Campaign created");

    Ok(redirect_after_post(
        &headers,
        &format!("/campaign/{}", campaign.id),
    ))
}

/// `GET /campaign/{campaign_id}`: detail page with stats and users inlined.
#[tracing::instrument(skip(state, path))]
pub async fn campaign_detail(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let campaign_id = path_id(path, "campaign_id")?;
    let campaign = load_campaign(&state, campaign_id).await?;
    let offers = state.store.list_offers().await?;
    let stats = render_stats(&state, campaign_id).await?;
    let users = render_users(&state, campaign_id, &JourneyFilter::default()).await?;

    Ok(views::campaigns::campaign_page(
        &campaign,
        &offers,
        &state.config.base_url,
        &stats,
        &users,
    ))
}

/// `GET /campaign/{campaign_id}/stats`: overall + per-domain fragment.
#[tracing::instrument(skip(state, path))]
pub async fn campaign_stats(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let campaign_id = path_id(path, "campaign_id")?;
    load_campaign(&state, campaign_id).await?;
    Ok(axum::response::Html(render_stats(&state, campaign_id).await?))
}

/// `GET /campaign/{campaign_id}/users?domain&email_search&offset`
#[tracing::instrument(skip(state, path, query))]
pub async fn campaign_users(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    query: Result<Query<UsersQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let campaign_id = path_id(path, "campaign_id")?;
    let Query(query) = query.map_err(|e| AppError::validation("offset", e.body_text()))?;
    load_campaign(&state, campaign_id).await?;

    let filter = JourneyFilter::from(query);
    Ok(axum::response::Html(
        render_users(&state, campaign_id, &filter).await?,
    ))
}

/// `POST /campaign/{campaign_id}/update-offer`
#[tracing::instrument(skip(state, headers, path, form))]
pub async fn update_campaign_offer(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    path: Result<Path<i64>, PathRejection>,
    form: Result<Form<UpdateOfferForm>, FormRejection>,
) -> Result<Response, AppError> {
    let campaign_id = path_id(path, "campaign_id")?;
    let Form(form) = form.map_err(form_error)?;
    let offer_id = parse_offer_id(form.offer_id)?;

    match state.store.change_campaign_offer(campaign_id, offer_id).await? {
        OfferChange::Updated(campaign) => {
            info!(campaign_id, offer_id, url = %campaign.offer_url, "Campaign offer changed");
            Ok(redirect_after_post(
                &headers,
                &format!("/campaign/{campaign_id}"),
            ))
        }
        OfferChange::CampaignNotFound => Err(AppError::NotFound("Campaign not found".to_string())),
        OfferChange::OfferNotFound => Err(AppError::NotFound("Offer not found".to_string())),
    }
}
