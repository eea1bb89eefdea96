use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDateTime;
use duckdb::Connection;
use tokio::sync::Mutex;
use tracing::info;

use clicktrack_core::event::NewEvent;
use clicktrack_core::model::CampaignDomainEmails;

use crate::schema::init_sql;

/// A DuckDB backend for the click tracker.
///
/// DuckDB is single-writer, so the connection is wrapped in `Arc<Mutex<_>>`:
/// every operation locks it for its duration, and the struct can be shared
/// across Axum handlers.
///
/// Memory and thread limits are enforced by [`init_sql`] at open time.
pub struct DuckDbBackend {
    pub(crate) conn: Arc<Mutex<Connection>>,
}

impl DuckDbBackend {
    /// Open (or create) a DuckDB database file at `path`.
    ///
    /// `memory_limit` is a DuckDB size string such as `"1GB"` or `"512MB"`.
    pub fn open(path: &str, memory_limit: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(&init_sql(memory_limit))?;
        info!(
            "DuckDB opened at {} with memory_limit={}, threads=2",
            path, memory_limit
        );
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an **in-memory** DuckDB database.
    ///
    /// Intended for tests; data is discarded when the struct is dropped.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(&init_sql("1GB"))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Execute `SELECT 1` as a lightweight liveness check.
    pub async fn ping(&self) -> Result<()> {
        let conn = self.conn.lock().await;
        conn.execute_batch("SELECT 1")?;
        Ok(())
    }

    /// Acquire the DuckDB connection lock for direct queries.
    ///
    /// Intended for integration tests that need to seed or verify stored data.
    /// Production code should use the typed methods.
    pub async fn conn_for_test(&self) -> tokio::sync::MutexGuard<'_, Connection> {
        self.conn.lock().await
    }

    pub async fn campaign_exists(&self, campaign_id: i64) -> Result<bool> {
        let conn = self.conn.lock().await;
        let count: i64 = conn
            .prepare("SELECT COUNT(*) FROM campaigns WHERE id = ?1")?
            .query_row(duckdb::params![campaign_id], |row| row.get(0))?;
        Ok(count > 0)
    }

    /// Insert one event and return its id.
    ///
    /// The caller has already checked that the campaign exists.
    pub async fn insert_event(&self, event: &NewEvent) -> Result<i64> {
        self.insert_event_with_time(event, None).await
    }

    /// Insert one event with an explicit creation time (UTC).
    ///
    /// Used by the demo-data seeder to spread events over past days.
    pub async fn insert_event_at(&self, event: &NewEvent, created_at: NaiveDateTime) -> Result<i64> {
        self.insert_event_with_time(event, Some(created_at)).await
    }

    async fn insert_event_with_time(
        &self,
        event: &NewEvent,
        created_at: Option<NaiveDateTime>,
    ) -> Result<i64> {
        let extra_params = event.extra_params_json()?;
        let created_at = created_at.map(|t| t.format("%Y-%m-%d %H:%M:%S%.6f").to_string());
        let conn = self.conn.lock().await;

        let id: i64 = conn
            .prepare("SELECT nextval('events_id_seq')")?
            .query_row([], |row| row.get(0))?;

        conn.execute(
            r#"INSERT INTO events (
                id, campaign_id, event_type, email, domain, ip, user_agent, extra_params, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, COALESCE(CAST(?9 AS TIMESTAMP), CURRENT_TIMESTAMP))"#,
            duckdb::params![
                id,
                event.campaign_id,
                event.event_type.as_str(),
                event.email,
                event.domain,
                event.ip,
                event.user_agent,
                extra_params,
                created_at,
            ],
        )?;

        Ok(id)
    }

    /// Set the number of emails sent for a (campaign, domain) pair.
    ///
    /// Inserts the row on first use and overwrites `emails_sent` afterwards;
    /// the UNIQUE (campaign_id, domain) constraint keeps one row per pair.
    pub async fn set_emails_sent(
        &self,
        campaign_id: i64,
        domain: &str,
        emails_sent: i64,
    ) -> Result<CampaignDomainEmails> {
        let conn = self.conn.lock().await;
        conn.execute(
            r#"INSERT INTO campaign_domain_emails (campaign_id, domain, emails_sent, created_at, updated_at)
               VALUES (?1, ?2, ?3, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
               ON CONFLICT (campaign_id, domain) DO UPDATE SET
                   emails_sent = EXCLUDED.emails_sent,
                   updated_at = now()"#,
            duckdb::params![campaign_id, domain, emails_sent],
        )?;

        let row = select_domain_emails(&conn, campaign_id, domain)?
            .ok_or_else(|| anyhow::anyhow!("send counter missing after upsert"))?;
        Ok(row)
    }

    pub async fn get_emails_sent(
        &self,
        campaign_id: i64,
        domain: &str,
    ) -> Result<Option<CampaignDomainEmails>> {
        let conn = self.conn.lock().await;
        select_domain_emails(&conn, campaign_id, domain)
    }
}

fn select_domain_emails(
    conn: &Connection,
    campaign_id: i64,
    domain: &str,
) -> Result<Option<CampaignDomainEmails>> {
    let mut stmt = conn.prepare(
        "SELECT campaign_id, domain, emails_sent, CAST(created_at AS VARCHAR), CAST(updated_at AS VARCHAR) \
         FROM campaign_domain_emails WHERE campaign_id = ?1 AND domain = ?2",
    )?;
    let mut rows = stmt.query_map(duckdb::params![campaign_id, domain], |row| {
        Ok(CampaignDomainEmails {
            campaign_id: row.get(0)?,
            domain: row.get(1)?,
            emails_sent: row.get(2)?,
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
        })
    })?;
    Ok(rows.next().transpose()?)
}
