use std::fmt::Write;

use axum::response::Html;

use clicktrack_core::event::EventType;
use clicktrack_core::model::{Campaign, Offer};
use clicktrack_core::stats::{CampaignSummary, DomainStats, JourneyFilter, JourneyPage, OverallStats};

use super::{escape, flag, format_rate, format_time, layout, metric};

pub fn home_page(summaries: &[CampaignSummary]) -> Html<String> {
    let body = format!(
        r#"<div class="card">
  <div style="display:flex;justify-content:space-between;align-items:center">
    <h2>Campaigns</h2>
    <a class="button" href="/create">New campaign</a>
  </div>
  <div id="campaigns-table" hx-get="/campaigns-table" hx-trigger="every 10s" hx-swap="innerHTML">
{table}
  </div>
</div>"#,
        table = campaigns_table(summaries).0
    );
    layout("Campaigns", &body)
}

/// The auto-refreshing table on the home page.
pub fn campaigns_table(summaries: &[CampaignSummary]) -> Html<String> {
    if summaries.is_empty() {
        return Html(
            r#"<p class="muted">No campaigns yet. <a href="/create">Create the first one.</a></p>"#
                .to_string(),
        );
    }

    let mut rows = String::new();
    for c in summaries {
        let _ = write!(
            rows,
            r#"<tr><td>{id}</td><td><a href="/campaign/{id}">{name}</a></td><td>{clicks}</td><td>{conversions}</td><td>{created}</td></tr>"#,
            id = c.id,
            name = escape(&c.name),
            clicks = c.clicks,
            conversions = c.conversions,
            created = escape(format_time(&c.created_at)),
        );
    }

    Html(format!(
        r#"<table>
<thead><tr><th>ID</th><th>Name</th><th>Clicks</th><th>Conversions</th><th>Created</th></tr></thead>
<tbody>{rows}</tbody>
</table>"#
    ))
}

fn offer_options(offers: &[Offer], selected: Option<i64>) -> String {
    let mut out = String::from(r#"<option value="">Select an offer</option>"#);
    for o in offers {
        let _ = write!(
            out,
            r#"<option value="{id}"{sel}>{name}</option>"#,
            id = o.id,
            sel = if selected == Some(o.id) { " selected" } else { "" },
            name = escape(&o.name),
        );
    }
    out
}

pub fn create_page(offers: &[Offer]) -> Html<String> {
    let form = if offers.is_empty() {
        r#"<p class="muted">Create an offer first: <a href="/offer/create">new offer</a>.</p>"#
            .to_string()
    } else {
        format!(
            r#"<form class="stack" method="post" action="/campaigns" hx-post="/campaigns">
  <label for="name">Name</label>
  <input id="name" name="name" required maxlength="255" size="50">
  <label for="offer_id">Offer</label>
  <select id="offer_id" name="offer_id" required>{options}</select>
  <p><button class="button" type="submit">Create</button></p>
</form>"#,
            options = offer_options(offers, None)
        )
    };
    layout(
        "New campaign",
        &format!(r#"<div class="card"><h2>New campaign</h2>{form}</div>"#),
    )
}

pub fn campaign_page(
    campaign: &Campaign,
    offers: &[Offer],
    base_url: &str,
    stats: &str,
    users: &str,
) -> Html<String> {
    let id = campaign.id;
    let offer = match (&campaign.offer_id, &campaign.offer_name) {
        (Some(offer_id), Some(name)) => {
            format!(r#"<a href="/offer/{offer_id}">{}</a>"#, escape(name))
        }
        _ => r#"<span class="muted">none</span>"#.to_string(),
    };

    let mut links = String::new();
    for event_type in EventType::ALL {
        let _ = write!(
            links,
            "<li><code>{}</code></li>",
            escape(&format!(
                "{base_url}/api/event?cid={id}&event={event_type}&email={{email}}&domain={{domain}}"
            ))
        );
    }

    let body = format!(
        r##"<div class="card">
  <h2>{name}</h2>
  <p>Offer: {offer} &middot; <a href="{url}" rel="noopener" target="_blank">{url}</a></p>
  <p class="muted">Created {created}</p>
  <form method="post" action="/campaign/{id}/update-offer" hx-post="/campaign/{id}/update-offer">
    <select name="offer_id">{options}</select>
    <button class="button" type="submit">Change offer</button>
  </form>
</div>
<div class="card">
  <h3>Tracking links</h3>
  <ul>{links}</ul>
  <p class="muted">Extra query parameters are stored with the event.</p>
</div>
<div class="card">
  <h3>Statistics</h3>
  <div id="stats" hx-get="/campaign/{id}/stats" hx-trigger="every 10s" hx-swap="innerHTML">
{stats}
  </div>
</div>
<div class="card">
  <h3>Users</h3>
  <form id="users-filter" hx-get="/campaign/{id}/users" hx-target="#users" hx-trigger="submit, input changed delay:400ms from:#email_search, change from:#domain">
    <input id="email_search" name="email_search" placeholder="Search email" type="search">
    <input id="domain" name="domain" placeholder="Domain">
    <button class="button" type="submit">Filter</button>
  </form>
  <div id="users">
{users}
  </div>
</div>"##,
        name = escape(&campaign.name),
        url = escape(&campaign.offer_url),
        created = escape(format_time(&campaign.created_at)),
        options = offer_options(offers, campaign.offer_id),
    );
    layout(&campaign.name, &body)
}

/// Overall metrics plus the per-domain table.
pub fn stats_fragment(overall: &OverallStats, domains: &[DomainStats]) -> Html<String> {
    let mut out = String::from(r#"<div class="grid">"#);
    metric(&mut out, "Email clicks", overall.counts.email_clicks);
    metric(&mut out, "Landing clicks", overall.counts.landing_clicks);
    metric(&mut out, "Conversions", overall.counts.conversions);
    metric(&mut out, "Unsubscribes", overall.counts.unsubscribes);
    metric(&mut out, "Conversion rate", format_rate(overall.conversion_rate));
    out.push_str("</div>");

    if domains.is_empty() {
        out.push_str(r#"<p class="muted">No events yet.</p>"#);
        return Html(out);
    }

    out.push_str(
        r#"<h4>By domain</h4><table><thead><tr><th>Domain</th><th>Emails sent</th><th>Email clicks</th><th>Landing clicks</th><th>Conversions</th><th>Unsubscribes</th><th>Conversion rate</th></tr></thead><tbody>"#,
    );
    for d in domains {
        let _ = write!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&d.domain),
            d.emails_sent,
            d.counts.email_clicks,
            d.counts.landing_clicks,
            d.counts.conversions,
            d.counts.unsubscribes,
            format_rate(d.conversion_rate),
        );
    }
    out.push_str("</tbody></table>");
    Html(out)
}

/// One page of user journeys with previous/next controls.
///
/// Pager buttons re-submit the filter form with an explicit offset so the
/// active filters carry over.
pub fn users_fragment(campaign_id: i64, filter: &JourneyFilter, page: &JourneyPage) -> Html<String> {
    let mut out = format!(
        r#"<p class="muted">{users} users &middot; {journeys} user/domain pairs</p>"#,
        users = page.total_users,
        journeys = page.total_journeys,
    );

    if page.journeys.is_empty() {
        out.push_str(r#"<p class="muted">No users match.</p>"#);
        if !page.has_previous() {
            return Html(out);
        }
    } else {
        out.push_str(
            r#"<table><thead><tr><th>Email</th><th>Domain</th><th>Email click</th><th>Landing click</th><th>Conversion</th><th>Unsubscribe</th><th>First event</th></tr></thead><tbody>"#,
        );
        for j in &page.journeys {
            let _ = write!(
                out,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(&j.email),
                escape(&j.domain),
                flag(j.has_email_click),
                flag(j.has_landing_click),
                flag(j.has_conversion),
                flag(j.has_unsubscribe),
                escape(format_time(&j.first_event)),
            );
        }
        out.push_str("</tbody></table>");
    }

    out.push_str(r#"<div class="pager">"#);
    if page.has_previous() {
        let _ = write!(
            out,
            r##"<button class="button" hx-get="/campaign/{campaign_id}/users" hx-include="#users-filter" hx-vals='{{"offset": {offset}}}' hx-target="#users">Previous</button>"##,
            offset = page.previous_offset(),
        );
    }
    if !page.journeys.is_empty() {
        let first = page.offset + 1;
        let last = (page.offset + page.journeys.len() as i64).min(page.total_journeys);
        let _ = write!(
            out,
            r#"<span class="muted">{first}&ndash;{last} of {total}</span>"#,
            total = page.total_journeys
        );
    }
    if page.has_next() {
        let _ = write!(
            out,
            r##"<button class="button" hx-get="/campaign/{campaign_id}/users" hx-include="#users-filter" hx-vals='{{"offset": {offset}}}' hx-target="#users">Next</button>"##,
            offset = page.next_offset(),
        );
    }
    out.push_str("</div>");

    if filter.domain.is_some() || filter.email_search.is_some() {
        out.push_str(r#"<p class="muted">Filtered view.</p>"#);
    }
    Html(out)
}
