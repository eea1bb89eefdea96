use anyhow::Result;

use clicktrack_core::stats::{JourneyFilter, JourneyPage, UserJourney, JOURNEY_PAGE_SIZE};

use crate::DuckDbBackend;

/// Append the optional journey filters to `filter_sql`.
///
/// The email search is a case-insensitive substring match done with
/// `position(...)` so `%` and `_` in the search term are matched literally.
fn append_journey_filters(
    filter: &JourneyFilter,
    filter_sql: &mut String,
    params: &mut Vec<Box<dyn duckdb::types::ToSql>>,
    param_idx: &mut usize,
) {
    if let Some(ref domain) = filter.domain {
        filter_sql.push_str(&format!(" AND domain = ?{}", *param_idx));
        params.push(Box::new(domain.clone()));
        *param_idx += 1;
    }
    if let Some(ref search) = filter.email_search {
        filter_sql.push_str(&format!(
            " AND position(lower(?{}) in lower(email)) > 0",
            *param_idx
        ));
        params.push(Box::new(search.clone()));
        *param_idx += 1;
    }
}

/// One page of user journeys for a campaign, newest first.
pub async fn campaign_journeys_inner(
    db: &DuckDbBackend,
    campaign_id: i64,
    filter: &JourneyFilter,
) -> Result<JourneyPage> {
    let conn = db.conn.lock().await;

    let mut filter_sql = String::new();
    let mut params: Vec<Box<dyn duckdb::types::ToSql>> = vec![Box::new(campaign_id)];
    let mut param_idx = 2;
    append_journey_filters(filter, &mut filter_sql, &mut params, &mut param_idx);

    let offset = filter.offset.max(0);

    let totals_sql = format!(
        r#"
        WITH filtered AS (
            SELECT email, domain FROM events WHERE campaign_id = ?1{filter_sql}
        )
        SELECT
            (SELECT COUNT(DISTINCT email) FROM filtered) AS total_users,
            (SELECT COUNT(*) FROM (SELECT DISTINCT email, domain FROM filtered)) AS total_journeys
        "#
    );
    let param_refs: Vec<&dyn duckdb::types::ToSql> = params.iter().map(|p| p.as_ref()).collect();
    let (total_users, total_journeys): (i64, i64) = conn
        .prepare(&totals_sql)?
        .query_row(param_refs.as_slice(), |row| Ok((row.get(0)?, row.get(1)?)))?;

    let limit_idx = param_idx;
    let offset_idx = param_idx + 1;
    let page_sql = format!(
        r#"
        SELECT
            email,
            domain,
            BOOL_OR(event_type = 'email_click') AS has_email_click,
            BOOL_OR(event_type = 'landing_click') AS has_landing_click,
            BOOL_OR(event_type = 'conversion') AS has_conversion,
            BOOL_OR(event_type = 'unsubscribe') AS has_unsubscribe,
            CAST(MIN(created_at) AS VARCHAR) AS first_event
        FROM events
        WHERE campaign_id = ?1{filter_sql}
        GROUP BY email, domain
        ORDER BY MIN(created_at) DESC, email ASC, domain ASC
        LIMIT ?{limit_idx} OFFSET ?{offset_idx}
        "#
    );
    params.push(Box::new(JOURNEY_PAGE_SIZE));
    params.push(Box::new(offset));
    let param_refs: Vec<&dyn duckdb::types::ToSql> = params.iter().map(|p| p.as_ref()).collect();

    let mut stmt = conn.prepare(&page_sql)?;
    let rows = stmt.query_map(param_refs.as_slice(), |row| {
        Ok(UserJourney {
            email: row.get(0)?,
            domain: row.get(1)?,
            has_email_click: row.get(2)?,
            has_landing_click: row.get(3)?,
            has_conversion: row.get(4)?,
            has_unsubscribe: row.get(5)?,
            first_event: row.get(6)?,
        })
    })?;

    let mut journeys = Vec::new();
    for row in rows {
        journeys.push(row?);
    }

    Ok(JourneyPage {
        journeys,
        total_users,
        total_journeys,
        offset,
        limit: JOURNEY_PAGE_SIZE,
    })
}

impl DuckDbBackend {
    pub async fn campaign_journeys(
        &self,
        campaign_id: i64,
        filter: &JourneyFilter,
    ) -> Result<JourneyPage> {
        campaign_journeys_inner(self, campaign_id, filter).await
    }
}
