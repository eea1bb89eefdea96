use std::sync::Arc;

use axum::{
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{routes, state::AppState};

/// CORS for the JSON API: any origin unless `CLICKTRACK_CORS_ORIGINS` lists some.
///
/// Tracking pings come from third-party landing pages, so the default stays
/// permissive.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    if allowed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(allowed)
    }
}

/// Construct the Axum [`Router`] with all routes and middleware attached.
///
/// Middleware is applied in outer-to-inner order (outermost runs first on
/// request, last on response):
///
/// 1. `TraceLayer`: structured request/response logging via `tracing`.
/// 2. `CorsLayer`: tracking pings and counter updates come from other sites.
pub fn build_app(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/health", get(routes::health::health))
        // JSON API
        .route("/api/event", get(routes::event::track_event))
        .route(
            "/api/campaign/{campaign_id}/domain/{domain}/emails-sent",
            put(routes::emails_sent::set_emails_sent),
        )
        .route("/api/campaigns", get(routes::api::list_campaigns))
        .route(
            "/api/campaign/{campaign_id}/stats",
            get(routes::api::campaign_stats),
        )
        // Campaign pages
        .route("/", get(routes::campaigns::home))
        .route("/campaigns-table", get(routes::campaigns::campaigns_table))
        .route("/create", get(routes::campaigns::create_form))
        .route("/campaigns", post(routes::campaigns::create_campaign))
        .route("/campaign/{campaign_id}", get(routes::campaigns::campaign_detail))
        .route(
            "/campaign/{campaign_id}/stats",
            get(routes::campaigns::campaign_stats),
        )
        .route(
            "/campaign/{campaign_id}/users",
            get(routes::campaigns::campaign_users),
        )
        .route(
            "/campaign/{campaign_id}/update-offer",
            post(routes::campaigns::update_campaign_offer),
        )
        // Offer pages
        .route("/offers", get(routes::offers::list_offers).post(routes::offers::create_offer))
        .route("/offer/create", get(routes::offers::create_form))
        .route("/offer/{offer_id}", get(routes::offers::offer_detail))
        .route("/offer/{offer_id}/edit", get(routes::offers::edit_form))
        .route("/offer/{offer_id}/update", post(routes::offers::update_offer))
        .route("/api-docs", get(routes::docs::api_docs))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
