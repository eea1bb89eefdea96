/// DuckDB initialization SQL.
///
/// Executed once at database open time via `Connection::execute_batch`.
/// All statements use `IF NOT EXISTS` so they are safe to re-run on every
/// startup.
///
/// Always set an explicit memory limit; the DuckDB default (80% of system
/// RAM) is not acceptable for a server process.
///
/// No FOREIGN KEY constraints are declared. DuckDB checks them eagerly and
/// rejects updates to referenced rows, which would break the offer URL
/// cascade in `update_offer`. Referential checks (`events.campaign_id`,
/// `campaigns.offer_id`) are done by the backend before each write.
pub fn init_sql(memory_limit: &str) -> String {
    format!(
        r#"SET memory_limit = '{memory_limit}';
SET threads = 2;

CREATE SEQUENCE IF NOT EXISTS offers_id_seq START 1;
CREATE SEQUENCE IF NOT EXISTS campaigns_id_seq START 1;
CREATE SEQUENCE IF NOT EXISTS events_id_seq START 1;
CREATE SEQUENCE IF NOT EXISTS campaign_domain_emails_id_seq START 1;

-- ===========================================
-- OFFERS
-- ===========================================
CREATE TABLE IF NOT EXISTS offers (
    id              BIGINT PRIMARY KEY DEFAULT nextval('offers_id_seq'),
    name            VARCHAR(255) NOT NULL,
    url             VARCHAR NOT NULL,
    created_at      TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);

-- ===========================================
-- CAMPAIGNS
-- ===========================================
CREATE TABLE IF NOT EXISTS campaigns (
    id              BIGINT PRIMARY KEY DEFAULT nextval('campaigns_id_seq'),
    name            VARCHAR(255) NOT NULL,
    offer_url       VARCHAR NOT NULL,              -- snapshot of offers.url
    offer_id        BIGINT,                        -- nullable: legacy campaigns have none
    created_at      TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);
-- offer_id is not indexed: DuckDB rewrites indexed columns on UPDATE and
-- campaigns are re-pointed at other offers at runtime.

-- ===========================================
-- EVENTS
-- ===========================================
CREATE TABLE IF NOT EXISTS events (
    id              BIGINT PRIMARY KEY DEFAULT nextval('events_id_seq'),
    campaign_id     BIGINT NOT NULL,
    event_type      VARCHAR(50) NOT NULL,          -- email_click | landing_click | conversion | unsubscribe
    email           VARCHAR(255) NOT NULL,
    domain          VARCHAR(255) NOT NULL,
    ip              VARCHAR(45),
    user_agent      VARCHAR,
    extra_params    VARCHAR,                       -- JSON object of string values (nullable)
    created_at      TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);
CREATE INDEX IF NOT EXISTS idx_events_campaign   ON events(campaign_id);
CREATE INDEX IF NOT EXISTS idx_events_email      ON events(email);
CREATE INDEX IF NOT EXISTS idx_events_domain     ON events(domain);
CREATE INDEX IF NOT EXISTS idx_events_created_at ON events(created_at);

-- ===========================================
-- CAMPAIGN DOMAIN EMAILS (send counters)
-- ===========================================
CREATE TABLE IF NOT EXISTS campaign_domain_emails (
    id              BIGINT PRIMARY KEY DEFAULT nextval('campaign_domain_emails_id_seq'),
    campaign_id     BIGINT NOT NULL,
    domain          VARCHAR(255) NOT NULL,
    emails_sent     BIGINT NOT NULL DEFAULT 0,
    created_at      TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at      TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    UNIQUE (campaign_id, domain)
);
CREATE INDEX IF NOT EXISTS idx_campaign_domain_emails_campaign
    ON campaign_domain_emails(campaign_id);
CREATE INDEX IF NOT EXISTS idx_campaign_domain_emails_domain
    ON campaign_domain_emails(domain);
"#
    )
}
