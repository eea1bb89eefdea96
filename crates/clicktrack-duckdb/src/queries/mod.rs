pub mod campaigns;
pub mod journeys;
pub mod offers;

/// Shared `COUNT(CASE ...)` projection for the four event types.
///
/// `alias` is the events table alias including the trailing dot (`"e."`) or
/// empty for an unaliased table. Column order: email_clicks, landing_clicks,
/// conversions, unsubscribes.
pub(crate) fn event_count_columns(alias: &str) -> String {
    format!(
        "COUNT(CASE WHEN {alias}event_type = 'email_click' THEN 1 END) AS email_clicks, \
         COUNT(CASE WHEN {alias}event_type = 'landing_click' THEN 1 END) AS landing_clicks, \
         COUNT(CASE WHEN {alias}event_type = 'conversion' THEN 1 END) AS conversions, \
         COUNT(CASE WHEN {alias}event_type = 'unsubscribe' THEN 1 END) AS unsubscribes"
    )
}

/// Read four consecutive count columns starting at `start`.
pub(crate) fn event_counts_at(
    row: &duckdb::Row<'_>,
    start: usize,
) -> duckdb::Result<clicktrack_core::stats::EventCounts> {
    Ok(clicktrack_core::stats::EventCounts {
        email_clicks: row.get(start)?,
        landing_clicks: row.get(start + 1)?,
        conversions: row.get(start + 2)?,
        unsubscribes: row.get(start + 3)?,
    })
}
