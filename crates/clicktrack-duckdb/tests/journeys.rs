use clicktrack_core::model::{CreateCampaignParams, CreateOfferParams};
use clicktrack_core::stats::{JourneyFilter, JOURNEY_PAGE_SIZE};
use clicktrack_duckdb::DuckDbBackend;

async fn setup() -> (DuckDbBackend, i64) {
    let db = DuckDbBackend::open_in_memory().expect("db");
    let offer = db
        .create_offer(CreateOfferParams {
            name: "Wellgreen".to_string(),
            url: "https://wellgreen.com".to_string(),
        })
        .await
        .expect("offer");
    let campaign = db
        .create_campaign(CreateCampaignParams {
            name: "Dog Food US".to_string(),
            offer_id: offer.id,
        })
        .await
        .expect("campaign")
        .expect("offer exists");
    (db, campaign.id)
}

async fn insert_event(
    db: &DuckDbBackend,
    campaign_id: i64,
    event_type: &str,
    email: &str,
    domain: &str,
    created_at: &str,
) {
    let conn = db.conn_for_test().await;
    conn.execute(
        "INSERT INTO events (campaign_id, event_type, email, domain, created_at) VALUES (?1, ?2, ?3, ?4, CAST(?5 AS TIMESTAMP))",
        clicktrack_duckdb::duckdb::params![campaign_id, event_type, email, domain, created_at],
    )
    .expect("insert event");
}

#[tokio::test]
async fn journeys_flag_each_event_type_per_email_and_domain() {
    let (db, cid) = setup().await;

    insert_event(&db, cid, "email_click", "john@example.com", "example1.com", "2026-01-01 10:00:00").await;
    insert_event(&db, cid, "landing_click", "john@example.com", "example1.com", "2026-01-01 10:01:00").await;
    insert_event(&db, cid, "conversion", "john@example.com", "example1.com", "2026-01-01 10:02:00").await;
    insert_event(&db, cid, "email_click", "mary@example.com", "example2.com", "2026-01-02 09:00:00").await;
    insert_event(&db, cid, "unsubscribe", "mary@example.com", "example2.com", "2026-01-02 09:05:00").await;

    let page = db
        .campaign_journeys(cid, &JourneyFilter::default())
        .await
        .expect("journeys");

    assert_eq!(page.total_users, 2);
    assert_eq!(page.total_journeys, 2);
    assert_eq!(page.journeys.len(), 2);

    // Newest first event first.
    let mary = &page.journeys[0];
    assert_eq!(mary.email, "mary@example.com");
    assert!(mary.has_email_click);
    assert!(!mary.has_landing_click);
    assert!(!mary.has_conversion);
    assert!(mary.has_unsubscribe);
    assert!(mary.first_event.starts_with("2026-01-02 09:00:00"));

    let john = &page.journeys[1];
    assert!(john.has_email_click && john.has_landing_click && john.has_conversion);
    assert!(!john.has_unsubscribe);
}

#[tokio::test]
async fn journeys_filter_by_domain_and_email_search() {
    let (db, cid) = setup().await;

    insert_event(&db, cid, "email_click", "John.Smith@example.com", "example1.com", "2026-01-01 10:00:00").await;
    insert_event(&db, cid, "email_click", "johnny@example.com", "example2.com", "2026-01-01 11:00:00").await;
    insert_event(&db, cid, "email_click", "mary@example.com", "example1.com", "2026-01-01 12:00:00").await;

    let by_domain = db
        .campaign_journeys(
            cid,
            &JourneyFilter {
                domain: Some("example1.com".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("journeys");
    assert_eq!(by_domain.total_journeys, 2);
    assert!(by_domain.journeys.iter().all(|j| j.domain == "example1.com"));

    let by_email = db
        .campaign_journeys(
            cid,
            &JourneyFilter {
                email_search: Some("JOHN".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("journeys");
    assert_eq!(by_email.total_users, 2, "search is case-insensitive");

    let both = db
        .campaign_journeys(
            cid,
            &JourneyFilter {
                domain: Some("example1.com".to_string()),
                email_search: Some("john".to_string()),
                offset: 0,
            },
        )
        .await
        .expect("journeys");
    assert_eq!(both.journeys.len(), 1);
    assert_eq!(both.journeys[0].email, "John.Smith@example.com");
}

#[tokio::test]
async fn email_search_treats_wildcards_literally() {
    let (db, cid) = setup().await;
    insert_event(&db, cid, "email_click", "a_b@example.com", "example1.com", "2026-01-01 10:00:00").await;
    insert_event(&db, cid, "email_click", "axb@example.com", "example1.com", "2026-01-01 10:00:00").await;

    let page = db
        .campaign_journeys(
            cid,
            &JourneyFilter {
                email_search: Some("a_b".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("journeys");
    assert_eq!(page.journeys.len(), 1);
    assert_eq!(page.journeys[0].email, "a_b@example.com");
}

#[tokio::test]
async fn journeys_are_paginated() {
    let (db, cid) = setup().await;
    for i in 0..(JOURNEY_PAGE_SIZE + 5) {
        insert_event(
            &db,
            cid,
            "email_click",
            &format!("user{i:03}@example.com"),
            "example1.com",
            &format!("2026-01-01 10:{:02}:{:02}", i / 60, i % 60),
        )
        .await;
    }

    let first = db
        .campaign_journeys(cid, &JourneyFilter::default())
        .await
        .expect("first page");
    assert_eq!(first.journeys.len() as i64, JOURNEY_PAGE_SIZE);
    assert_eq!(first.total_journeys, JOURNEY_PAGE_SIZE + 5);
    assert!(first.has_next());
    assert!(!first.has_previous());

    let second = db
        .campaign_journeys(
            cid,
            &JourneyFilter {
                offset: first.next_offset(),
                ..Default::default()
            },
        )
        .await
        .expect("second page");
    assert_eq!(second.journeys.len(), 5);
    assert!(!second.has_next());
    // Oldest events land on the last page.
    assert_eq!(second.journeys[4].email, "user000@example.com");
}

#[tokio::test]
async fn same_email_on_two_domains_is_two_journeys_one_user() {
    let (db, cid) = setup().await;
    insert_event(&db, cid, "email_click", "a@x.com", "example1.com", "2026-01-01 10:00:00").await;
    insert_event(&db, cid, "email_click", "a@x.com", "example2.com", "2026-01-01 10:05:00").await;

    let page = db
        .campaign_journeys(cid, &JourneyFilter::default())
        .await
        .expect("journeys");
    assert_eq!(page.total_users, 1);
    assert_eq!(page.total_journeys, 2);
    assert_eq!(page.journeys.len(), 2);
}
