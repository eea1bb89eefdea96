use anyhow::Result;

use clicktrack_core::stats::{OfferCampaignStats, OfferOverallStats, OfferSummary};

use crate::queries::{event_count_columns, event_counts_at};
use crate::DuckDbBackend;

pub async fn list_offer_summaries_inner(db: &DuckDbBackend) -> Result<Vec<OfferSummary>> {
    let conn = db.conn.lock().await;
    let mut stmt = conn.prepare(
        r#"
        SELECT
            o.id,
            o.name,
            o.url,
            CAST(o.created_at AS VARCHAR) AS created_at,
            COUNT(DISTINCT c.id) AS campaigns_count,
            COUNT(e.id) AS total_events
        FROM offers o
        LEFT JOIN campaigns c ON o.id = c.offer_id
        LEFT JOIN events e ON c.id = e.campaign_id
        GROUP BY o.id, o.name, o.url, o.created_at
        ORDER BY o.created_at DESC, o.id DESC
        "#,
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(OfferSummary {
            id: row.get(0)?,
            name: row.get(1)?,
            url: row.get(2)?,
            created_at: row.get(3)?,
            campaigns_count: row.get(4)?,
            total_events: row.get(5)?,
        })
    })?;

    let mut offers = Vec::new();
    for row in rows {
        offers.push(row?);
    }
    Ok(offers)
}

/// Totals across every campaign of an offer.
pub async fn offer_overall_stats_inner(
    db: &DuckDbBackend,
    offer_id: i64,
) -> Result<OfferOverallStats> {
    let conn = db.conn.lock().await;
    let sql = format!(
        r#"
        SELECT
            COUNT(DISTINCT c.id) AS campaigns_count,
            {counts}
        FROM campaigns c
        LEFT JOIN events e ON c.id = e.campaign_id
        WHERE c.offer_id = ?1
        "#,
        counts = event_count_columns("e.")
    );
    let stats = conn
        .prepare(&sql)?
        .query_row(duckdb::params![offer_id], |row| {
            let counts = event_counts_at(row, 1)?;
            Ok(OfferOverallStats {
                campaigns_count: row.get(0)?,
                conversion_rate: counts.conversion_rate(),
                counts,
            })
        })?;
    Ok(stats)
}

pub async fn offer_campaign_stats_inner(
    db: &DuckDbBackend,
    offer_id: i64,
) -> Result<Vec<OfferCampaignStats>> {
    let conn = db.conn.lock().await;
    let sql = format!(
        r#"
        SELECT
            c.id,
            c.name,
            {counts}
        FROM campaigns c
        LEFT JOIN events e ON c.id = e.campaign_id
        WHERE c.offer_id = ?1
        GROUP BY c.id, c.name
        ORDER BY email_clicks DESC, c.id ASC
        "#,
        counts = event_count_columns("e.")
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(duckdb::params![offer_id], |row| {
        let counts = event_counts_at(row, 2)?;
        Ok(OfferCampaignStats {
            id: row.get(0)?,
            name: row.get(1)?,
            conversion_rate: counts.conversion_rate(),
            counts,
        })
    })?;

    let mut campaigns = Vec::new();
    for row in rows {
        campaigns.push(row?);
    }
    Ok(campaigns)
}

impl DuckDbBackend {
    pub async fn list_offer_summaries(&self) -> Result<Vec<OfferSummary>> {
        list_offer_summaries_inner(self).await
    }

    pub async fn offer_overall_stats(&self, offer_id: i64) -> Result<OfferOverallStats> {
        offer_overall_stats_inner(self, offer_id).await
    }

    pub async fn offer_campaign_stats(&self, offer_id: i64) -> Result<Vec<OfferCampaignStats>> {
        offer_campaign_stats_inner(self, offer_id).await
    }
}
