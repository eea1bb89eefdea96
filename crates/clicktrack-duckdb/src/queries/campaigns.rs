use anyhow::Result;

use clicktrack_core::stats::{CampaignSummary, DomainStats, EventCounts};

use crate::queries::{event_count_columns, event_counts_at};
use crate::DuckDbBackend;

pub async fn list_campaign_summaries_inner(db: &DuckDbBackend) -> Result<Vec<CampaignSummary>> {
    let conn = db.conn.lock().await;
    let mut stmt = conn.prepare(
        r#"
        SELECT
            c.id,
            c.name,
            CAST(c.created_at AS VARCHAR) AS created_at,
            COUNT(CASE WHEN e.event_type IN ('email_click', 'landing_click') THEN 1 END) AS clicks,
            COUNT(CASE WHEN e.event_type = 'conversion' THEN 1 END) AS conversions
        FROM campaigns c
        LEFT JOIN events e ON c.id = e.campaign_id
        GROUP BY c.id, c.name, c.created_at
        ORDER BY c.created_at DESC, c.id DESC
        "#,
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(CampaignSummary {
            id: row.get(0)?,
            name: row.get(1)?,
            created_at: row.get(2)?,
            clicks: row.get(3)?,
            conversions: row.get(4)?,
        })
    })?;

    let mut campaigns = Vec::new();
    for row in rows {
        campaigns.push(row?);
    }
    Ok(campaigns)
}

pub async fn campaign_overall_stats_inner(
    db: &DuckDbBackend,
    campaign_id: i64,
) -> Result<EventCounts> {
    let conn = db.conn.lock().await;
    let sql = format!(
        "SELECT {} FROM events WHERE campaign_id = ?1",
        event_count_columns("")
    );
    let counts = conn
        .prepare(&sql)?
        .query_row(duckdb::params![campaign_id], |row| event_counts_at(row, 0))?;
    Ok(counts)
}

/// Per-domain breakdown for one campaign.
///
/// The domain set is the union of domains seen in events and domains that
/// have a send counter, so a domain with sends but no clicks (or the reverse)
/// still gets a row. Each domain has at most one counter row, so the second
/// LEFT JOIN never multiplies event rows.
pub async fn campaign_domain_stats_inner(
    db: &DuckDbBackend,
    campaign_id: i64,
) -> Result<Vec<DomainStats>> {
    let conn = db.conn.lock().await;
    let sql = format!(
        r#"
        WITH all_domains AS (
            SELECT DISTINCT domain FROM events WHERE campaign_id = ?1
            UNION
            SELECT DISTINCT domain FROM campaign_domain_emails WHERE campaign_id = ?1
        )
        SELECT
            d.domain,
            {counts},
            COALESCE(MAX(cde.emails_sent), 0) AS emails_sent
        FROM all_domains d
        LEFT JOIN events e
            ON e.domain = d.domain AND e.campaign_id = ?1
        LEFT JOIN campaign_domain_emails cde
            ON cde.domain = d.domain AND cde.campaign_id = ?1
        GROUP BY d.domain
        ORDER BY email_clicks DESC, d.domain ASC
        "#,
        counts = event_count_columns("e.")
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(duckdb::params![campaign_id], |row| {
        let counts = event_counts_at(row, 1)?;
        Ok(DomainStats {
            domain: row.get(0)?,
            emails_sent: row.get(5)?,
            conversion_rate: counts.conversion_rate(),
            counts,
        })
    })?;

    let mut domains = Vec::new();
    for row in rows {
        domains.push(row?);
    }
    Ok(domains)
}

impl DuckDbBackend {
    pub async fn list_campaign_summaries(&self) -> Result<Vec<CampaignSummary>> {
        list_campaign_summaries_inner(self).await
    }

    pub async fn campaign_overall_stats(&self, campaign_id: i64) -> Result<EventCounts> {
        campaign_overall_stats_inner(self, campaign_id).await
    }

    pub async fn campaign_domain_stats(&self, campaign_id: i64) -> Result<Vec<DomainStats>> {
        campaign_domain_stats_inner(self, campaign_id).await
    }
}
