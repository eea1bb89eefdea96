use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use clicktrack_core::config::Config;
use clicktrack_core::event::{EventType, NewEvent};
use clicktrack_core::model::{CreateCampaignParams, CreateOfferParams};
use clicktrack_duckdb::DuckDbBackend;
use clicktrack_server::app::build_app;
use clicktrack_server::state::AppState;

fn test_config() -> Config {
    Config {
        port: 0,
        data_dir: "/tmp/clicktrack-test".to_string(),
        base_url: "http://localhost:8000".to_string(),
        debug: false,
        duckdb_memory_limit: "1GB".to_string(),
        cors_origins: vec![],
    }
}

async fn setup() -> (Arc<DuckDbBackend>, axum::Router, i64) {
    let db = Arc::new(DuckDbBackend::open_in_memory().expect("in-memory DuckDB"));
    let offer = db
        .create_offer(CreateOfferParams {
            name: "PetCo".to_string(),
            url: "https://petco.com/cat-toys?aff=456".to_string(),
        })
        .await
        .expect("create offer");
    let campaign = db
        .create_campaign(CreateCampaignParams {
            name: "Cat Toys EU".to_string(),
            offer_id: offer.id,
        })
        .await
        .expect("create campaign")
        .expect("offer exists");
    let state = Arc::new(AppState::from_store(db.clone(), test_config()));
    (db, build_app(state), campaign.id)
}

async fn put_json(app: &axum::Router, uri: &str, body: Value) -> axum::http::Response<Body> {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request");
    app.clone().oneshot(request).await.expect("request")
}

async fn json_body(response: axum::http::Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("parse JSON")
}

async fn counter_rows(db: &DuckDbBackend, cid: i64, domain: &str) -> i64 {
    let conn = db.conn_for_test().await;
    conn.prepare("SELECT COUNT(*) FROM campaign_domain_emails WHERE campaign_id = ?1 AND domain = ?2")
        .expect("prepare")
        .query_row(clicktrack_duckdb::duckdb::params![cid, domain], |row| row.get(0))
        .expect("count")
}

#[tokio::test]
async fn test_put_creates_then_updates_one_row() {
    let (db, app, cid) = setup().await;
    let uri = format!("/api/campaign/{cid}/domain/example1.com/emails-sent");

    let response = put_json(&app, &uri, json!({ "emails_sent": 1000 })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["campaign_id"], cid);
    assert_eq!(body["domain"], "example1.com");
    assert_eq!(body["emails_sent"], 1000);
    assert_eq!(counter_rows(&db, cid, "example1.com").await, 1);

    let response = put_json(&app, &uri, json!({ "emails_sent": 1500 })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["emails_sent"], 1500);
    assert_eq!(counter_rows(&db, cid, "example1.com").await, 1);

    let stored = db
        .get_emails_sent(cid, "example1.com")
        .await
        .expect("get")
        .expect("row");
    assert_eq!(stored.emails_sent, 1500);
}

#[tokio::test]
async fn test_counter_shows_up_in_domain_stats() {
    let (_db, app, cid) = setup().await;

    let response = put_json(
        &app,
        &format!("/api/campaign/{cid}/domain/example3.com/emails-sent"),
        json!({ "emails_sent": 250 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let request = Request::builder()
        .uri(format!("/api/campaign/{cid}/stats"))
        .body(Body::empty())
        .expect("build request");
    let response = app.clone().oneshot(request).await.expect("request");
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    let domains = json["data"]["domains"].as_array().expect("domains");
    assert_eq!(domains.len(), 1);
    assert_eq!(domains[0]["domain"], "example3.com");
    assert_eq!(domains[0]["emails_sent"], 250);
    assert_eq!(domains[0]["email_clicks"], 0);
}

#[tokio::test]
async fn test_counter_and_events_share_the_raw_domain() {
    let (db, app, cid) = setup().await;
    db.insert_event(&NewEvent {
        campaign_id: cid,
        event_type: EventType::EmailClick,
        email: "john@example.com".to_string(),
        domain: " d.com".to_string(),
        ip: None,
        user_agent: None,
        extra_params: None,
    })
    .await
    .expect("insert event");

    let response = put_json(
        &app,
        &format!("/api/campaign/{cid}/domain/%20d.com/emails-sent"),
        json!({ "emails_sent": 5 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["domain"], " d.com");

    let domains = db.campaign_domain_stats(cid).await.expect("domain stats");
    assert_eq!(domains.len(), 1);
    assert_eq!(domains[0].domain, " d.com");
    assert_eq!(domains[0].emails_sent, 5);
    assert_eq!(domains[0].counts.email_clicks, 1);
}

#[tokio::test]
async fn test_blank_domain_is_422() {
    let (_db, app, cid) = setup().await;
    let response = put_json(
        &app,
        &format!("/api/campaign/{cid}/domain/%20%20/emails-sent"),
        json!({ "emails_sent": 5 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_body(response).await["error"]["field"], "domain");
}

#[tokio::test]
async fn test_unknown_campaign_is_404() {
    let (_db, app, _cid) = setup().await;
    let response = put_json(
        &app,
        "/api/campaign/999/domain/example1.com/emails-sent",
        json!({ "emails_sent": 10 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_negative_count_is_422() {
    let (db, app, cid) = setup().await;
    let response = put_json(
        &app,
        &format!("/api/campaign/{cid}/domain/example1.com/emails-sent"),
        json!({ "emails_sent": -5 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = json_body(response).await;
    assert_eq!(json["error"]["field"], "emails_sent");
    assert_eq!(counter_rows(&db, cid, "example1.com").await, 0);
}

#[tokio::test]
async fn test_malformed_bodies_are_422() {
    let (_db, app, cid) = setup().await;
    let uri = format!("/api/campaign/{cid}/domain/example1.com/emails-sent");

    for body in [json!({}), json!({ "emails_sent": "many" }), json!({ "emails_sent": 1.5 })] {
        let response = put_json(&app, &uri, body.clone()).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{body}");
    }

    let response = put_json(
        &app,
        "/api/campaign/abc/domain/example1.com/emails-sent",
        json!({ "emails_sent": 1 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
