use std::fmt::Write;

use axum::response::Html;

use clicktrack_core::model::Offer;
use clicktrack_core::stats::{OfferCampaignStats, OfferOverallStats, OfferSummary};

use super::{escape, format_rate, format_time, layout, metric};

pub fn offers_page(offers: &[OfferSummary]) -> Html<String> {
    let mut table = String::new();
    if offers.is_empty() {
        table.push_str(r#"<p class="muted">No offers yet.</p>"#);
    } else {
        table.push_str(
            r#"<table><thead><tr><th>ID</th><th>Name</th><th>URL</th><th>Campaigns</th><th>Events</th><th>Created</th></tr></thead><tbody>"#,
        );
        for o in offers {
            let _ = write!(
                table,
                r#"<tr><td>{id}</td><td><a href="/offer/{id}">{name}</a></td><td>{url}</td><td>{campaigns}</td><td>{events}</td><td>{created}</td></tr>"#,
                id = o.id,
                name = escape(&o.name),
                url = escape(&o.url),
                campaigns = o.campaigns_count,
                events = o.total_events,
                created = escape(format_time(&o.created_at)),
            );
        }
        table.push_str("</tbody></table>");
    }

    let body = format!(
        r#"<div class="card">
  <div style="display:flex;justify-content:space-between;align-items:center">
    <h2>Offers</h2>
    <a class="button" href="/offer/create">New offer</a>
  </div>
  {table}
</div>"#
    );
    layout("Offers", &body)
}

fn offer_form(action: &str, name: &str, url: &str, submit: &str) -> String {
    format!(
        r#"<form class="stack" method="post" action="{action}" hx-post="{action}">
  <label for="name">Name</label>
  <input id="name" name="name" required maxlength="255" size="50" value="{name}">
  <label for="url">URL</label>
  <input id="url" name="url" required size="80" value="{url}">
  <p><button class="button" type="submit">{submit}</button></p>
</form>"#,
        name = escape(name),
        url = escape(url),
    )
}

pub fn create_page() -> Html<String> {
    layout(
        "New offer",
        &format!(
            r#"<div class="card"><h2>New offer</h2>{}</div>"#,
            offer_form("/offers", "", "", "Create")
        ),
    )
}

pub fn edit_page(offer: &Offer) -> Html<String> {
    let form = offer_form(
        &format!("/offer/{}/update", offer.id),
        &offer.name,
        &offer.url,
        "Save",
    );
    layout(
        &format!("Edit {}", offer.name),
        &format!(
            r#"<div class="card"><h2>Edit offer</h2>{form}<p class="muted">Saving updates the URL of every campaign using this offer.</p></div>"#
        ),
    )
}

pub fn offer_page(
    offer: &Offer,
    overall: &OfferOverallStats,
    campaigns: &[OfferCampaignStats],
) -> Html<String> {
    let mut stats = String::from(r#"<div class="grid">"#);
    metric(&mut stats, "Campaigns", overall.campaigns_count);
    metric(&mut stats, "Email clicks", overall.counts.email_clicks);
    metric(&mut stats, "Landing clicks", overall.counts.landing_clicks);
    metric(&mut stats, "Conversions", overall.counts.conversions);
    metric(&mut stats, "Unsubscribes", overall.counts.unsubscribes);
    metric(&mut stats, "Conversion rate", format_rate(overall.conversion_rate));
    stats.push_str("</div>");

    let mut table = String::new();
    if campaigns.is_empty() {
        table.push_str(r#"<p class="muted">No campaigns use this offer.</p>"#);
    } else {
        table.push_str(
            r#"<table><thead><tr><th>Campaign</th><th>Email clicks</th><th>Landing clicks</th><th>Conversions</th><th>Unsubscribes</th><th>Conversion rate</th></tr></thead><tbody>"#,
        );
        for c in campaigns {
            let _ = write!(
                table,
                r#"<tr><td><a href="/campaign/{id}">{name}</a></td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
                c.counts.email_clicks,
                c.counts.landing_clicks,
                c.counts.conversions,
                c.counts.unsubscribes,
                format_rate(c.conversion_rate),
                id = c.id,
                name = escape(&c.name),
            );
        }
        table.push_str("</tbody></table>");
    }

    let body = format!(
        r#"<div class="card">
  <h2>{name}</h2>
  <p><a href="{url}" rel="noopener" target="_blank">{url}</a></p>
  <p class="muted">Created {created} &middot; <a href="/offer/{id}/edit">Edit</a></p>
  {stats}
</div>
<div class="card">
  <h3>Campaigns</h3>
  {table}
</div>"#,
        id = offer.id,
        name = escape(&offer.name),
        url = escape(&offer.url),
        created = escape(format_time(&offer.created_at)),
    );
    layout(&offer.name, &body)
}
