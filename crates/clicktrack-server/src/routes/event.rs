use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, ConnectInfo, Query, State},
    http::{Extensions, HeaderMap},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use clicktrack_core::event::{collect_extra_params, EventType, NewEvent};

use crate::{error::AppError, state::AppState};

/// Last value of `key` in the query string.
fn last_param<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .rev()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Client address: first `X-Forwarded-For` hop, else the TCP peer.
pub(crate) fn client_ip(headers: &HeaderMap, extensions: &Extensions) -> Option<String> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());
    if let Some(ip) = forwarded {
        return Some(ip.to_string());
    }
    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
}

/// Validate the query string of an event ping into a [`NewEvent`].
///
/// Missing or ill-typed required parameters are reported before the event
/// type is checked, so `?cid=x&event=bogus` is a 422, not a 400.
pub(crate) fn parse_event_query(pairs: &[(String, String)]) -> Result<NewEvent, AppError> {
    let cid = last_param(pairs, "cid").ok_or_else(|| AppError::missing("cid"))?;
    let campaign_id = cid
        .trim()
        .parse::<i64>()
        .map_err(|_| AppError::validation("cid", format!("cid must be an integer, got {cid:?}")))?;
    let event = last_param(pairs, "event").ok_or_else(|| AppError::missing("event"))?;
    let email = last_param(pairs, "email").ok_or_else(|| AppError::missing("email"))?;
    let domain = last_param(pairs, "domain").ok_or_else(|| AppError::missing("domain"))?;

    let event_type: EventType = event.parse()?;

    Ok(NewEvent {
        campaign_id,
        event_type,
        email: email.to_string(),
        domain: domain.to_string(),
        ip: None,
        user_agent: None,
        extra_params: collect_extra_params(pairs),
    })
}

/// `GET /api/event`: record one tracking ping.
///
/// Required query parameters: `cid`, `event`, `email`, `domain`. Every other
/// parameter is stored in `extra_params`.
///
/// ## Response
/// `200 OK` with `{ "status": "ok", "event_id": N }`.
#[tracing::instrument(skip(state, headers, extensions, query))]
pub async fn track_event(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    extensions: Extensions,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(pairs) = query.map_err(|e| AppError::Validation {
        message: e.body_text(),
        field: None,
    })?;

    let mut event = parse_event_query(&pairs)?;

    if !state.is_known_campaign(event.campaign_id).await? {
        return Err(AppError::NotFound(format!(
            "Campaign with id {} not found",
            event.campaign_id
        )));
    }

    event.ip = client_ip(&headers, &extensions);
    event.user_agent = headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let event_id = state.store.insert_event(&event).await?;
    tracing::info!(
        event_id,
        campaign_id = event.campaign_id,
        event_type = %event.event_type,
        "Event recorded"
    );

    Ok(Json(json!({ "status": "ok", "event_id": event_id })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn missing_parameter_is_validation_error() {
        let err = parse_event_query(&pairs(&[("cid", "1"), ("event", "email_click")]))
            .expect_err("email missing");
        assert!(matches!(err, AppError::Validation { field: Some("email"), .. }));
    }

    #[test]
    fn malformed_cid_wins_over_bad_event_type() {
        let err = parse_event_query(&pairs(&[
            ("cid", "abc"),
            ("event", "bogus"),
            ("email", "a@b.c"),
            ("domain", "b.c"),
        ]))
        .expect_err("cid malformed");
        assert!(matches!(err, AppError::Validation { field: Some("cid"), .. }));
    }

    #[test]
    fn unknown_event_type_is_bad_request() {
        let err = parse_event_query(&pairs(&[
            ("cid", "1"),
            ("event", "open"),
            ("email", "a@b.c"),
            ("domain", "b.c"),
        ]))
        .expect_err("bad type");
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn forwarded_for_takes_first_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            "203.0.113.7, 10.0.0.1".parse().expect("header"),
        );
        assert_eq!(
            client_ip(&headers, &Extensions::new()).as_deref(),
            Some("203.0.113.7")
        );
    }

    #[test]
    fn peer_address_is_the_fallback() {
        let mut extensions = Extensions::new();
        extensions.insert(ConnectInfo(SocketAddr::from(([192, 168, 1, 10], 5555))));
        assert_eq!(
            client_ip(&HeaderMap::new(), &extensions).as_deref(),
            Some("192.168.1.10")
        );
        assert_eq!(client_ip(&HeaderMap::new(), &Extensions::new()), None);
    }
}
