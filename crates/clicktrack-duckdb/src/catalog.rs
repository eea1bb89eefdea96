use anyhow::Result;
use duckdb::Connection;

use clicktrack_core::model::{
    Campaign, CreateCampaignParams, CreateOfferParams, Offer, OfferChange, UpdateOfferParams,
};

use crate::DuckDbBackend;

const OFFER_COLUMNS: &str = "id, name, url, CAST(created_at AS VARCHAR)";

const CAMPAIGN_SELECT: &str = "SELECT c.id, c.name, c.offer_url, c.offer_id, o.name, CAST(c.created_at AS VARCHAR) \
     FROM campaigns c LEFT JOIN offers o ON c.offer_id = o.id";

fn offer_from_row(row: &duckdb::Row<'_>) -> duckdb::Result<Offer> {
    Ok(Offer {
        id: row.get(0)?,
        name: row.get(1)?,
        url: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn campaign_from_row(row: &duckdb::Row<'_>) -> duckdb::Result<Campaign> {
    Ok(Campaign {
        id: row.get(0)?,
        name: row.get(1)?,
        offer_url: row.get(2)?,
        offer_id: row.get(3)?,
        offer_name: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn select_offer(conn: &Connection, id: i64) -> Result<Option<Offer>> {
    let mut stmt = conn.prepare(&format!("SELECT {OFFER_COLUMNS} FROM offers WHERE id = ?1"))?;
    let mut rows = stmt.query_map(duckdb::params![id], offer_from_row)?;
    Ok(rows.next().transpose()?)
}

fn select_campaign(conn: &Connection, id: i64) -> Result<Option<Campaign>> {
    let mut stmt = conn.prepare(&format!("{CAMPAIGN_SELECT} WHERE c.id = ?1"))?;
    let mut rows = stmt.query_map(duckdb::params![id], campaign_from_row)?;
    Ok(rows.next().transpose()?)
}

fn next_id(conn: &Connection, sequence: &str) -> Result<i64> {
    let id = conn
        .prepare(&format!("SELECT nextval('{sequence}')"))?
        .query_row([], |row| row.get(0))?;
    Ok(id)
}

impl DuckDbBackend {
    pub async fn create_offer(&self, params: CreateOfferParams) -> Result<Offer> {
        let conn = self.conn.lock().await;
        let id = next_id(&conn, "offers_id_seq")?;
        conn.execute(
            "INSERT INTO offers (id, name, url, created_at) VALUES (?1, ?2, ?3, CURRENT_TIMESTAMP)",
            duckdb::params![id, params.name, params.url],
        )?;
        select_offer(&conn, id)?.ok_or_else(|| anyhow::anyhow!("offer {id} missing after insert"))
    }

    pub async fn get_offer(&self, id: i64) -> Result<Option<Offer>> {
        let conn = self.conn.lock().await;
        select_offer(&conn, id)
    }

    pub async fn list_offers(&self) -> Result<Vec<Offer>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!(
            "SELECT {OFFER_COLUMNS} FROM offers ORDER BY name, id"
        ))?;
        let rows = stmt.query_map([], offer_from_row)?;
        let mut offers = Vec::new();
        for row in rows {
            offers.push(row?);
        }
        Ok(offers)
    }

    /// Rename an offer and change its URL.
    ///
    /// The new URL is copied into `offer_url` of every campaign attached to the
    /// offer. Both updates run in one transaction.
    pub async fn update_offer(&self, id: i64, params: UpdateOfferParams) -> Result<Option<Offer>> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;

        let exists: i64 = tx
            .prepare("SELECT COUNT(*) FROM offers WHERE id = ?1")?
            .query_row(duckdb::params![id], |row| row.get(0))?;
        if exists == 0 {
            return Ok(None);
        }

        tx.execute(
            "UPDATE offers SET name = ?1, url = ?2 WHERE id = ?3",
            duckdb::params![params.name, params.url, id],
        )?;
        let propagated = tx.execute(
            "UPDATE campaigns SET offer_url = ?1 WHERE offer_id = ?2",
            duckdb::params![params.url, id],
        )?;
        tx.commit()?;

        tracing::info!(offer_id = id, campaigns = propagated, "Offer updated");
        select_offer(&conn, id)
    }

    /// Create a campaign bound to an offer, snapshotting the offer URL.
    ///
    /// Returns `None` when the offer does not exist.
    pub async fn create_campaign(&self, params: CreateCampaignParams) -> Result<Option<Campaign>> {
        let conn = self.conn.lock().await;
        let Some(offer) = select_offer(&conn, params.offer_id)? else {
            return Ok(None);
        };

        let id = next_id(&conn, "campaigns_id_seq")?;
        conn.execute(
            "INSERT INTO campaigns (id, name, offer_id, offer_url, created_at) \
             VALUES (?1, ?2, ?3, ?4, CURRENT_TIMESTAMP)",
            duckdb::params![id, params.name, offer.id, offer.url],
        )?;
        select_campaign(&conn, id)
    }

    pub async fn get_campaign(&self, id: i64) -> Result<Option<Campaign>> {
        let conn = self.conn.lock().await;
        select_campaign(&conn, id)
    }

    /// Attach a campaign to another offer and snapshot that offer's URL.
    pub async fn change_campaign_offer(&self, campaign_id: i64, offer_id: i64) -> Result<OfferChange> {
        let conn = self.conn.lock().await;
        if select_campaign(&conn, campaign_id)?.is_none() {
            return Ok(OfferChange::CampaignNotFound);
        }
        let Some(offer) = select_offer(&conn, offer_id)? else {
            return Ok(OfferChange::OfferNotFound);
        };

        conn.execute(
            "UPDATE campaigns SET offer_id = ?1, offer_url = ?2 WHERE id = ?3",
            duckdb::params![offer.id, offer.url, campaign_id],
        )?;

        match select_campaign(&conn, campaign_id)? {
            Some(campaign) => Ok(OfferChange::Updated(campaign)),
            None => Ok(OfferChange::CampaignNotFound),
        }
    }
}
