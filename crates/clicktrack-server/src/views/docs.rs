use axum::response::Html;

use super::{escape, layout};

/// Integration guide with copy-paste URLs for this deployment.
pub fn api_docs_page(base_url: &str) -> Html<String> {
    let base = escape(base_url);
    let body = format!(
        r#"<div class="card">
<h2>Event API</h2>
<p>Landing pages report user actions with a single GET request:</p>
<pre>{base}/api/event?cid=CAMPAIGN_ID&amp;event=EVENT_TYPE&amp;email=EMAIL&amp;domain=DOMAIN</pre>
<table>
<thead><tr><th>Parameter</th><th>Description</th></tr></thead>
<tbody>
<tr><td><code>cid</code></td><td>Campaign id (integer, required)</td></tr>
<tr><td><code>event</code></td><td><code>email_click</code>, <code>landing_click</code>, <code>conversion</code> or <code>unsubscribe</code></td></tr>
<tr><td><code>email</code></td><td>Recipient email address</td></tr>
<tr><td><code>domain</code></td><td>Sending domain the email went out from</td></tr>
<tr><td>anything else</td><td>Stored with the event as extra parameters</td></tr>
</tbody>
</table>
<h3>Examples</h3>
<pre>{base}/api/event?cid=1&amp;event=email_click&amp;email=john@example.com&amp;domain=example1.com
{base}/api/event?cid=1&amp;event=landing_click&amp;email=john@example.com&amp;domain=example1.com
{base}/api/event?cid=1&amp;event=conversion&amp;email=john@example.com&amp;domain=example1.com&amp;order_id=12345&amp;amount=99.99
{base}/api/event?cid=1&amp;event=unsubscribe&amp;email=john@example.com&amp;domain=example1.com</pre>
<p>Response: <code>{{"status": "ok", "event_id": 42}}</code></p>
<h3>Errors</h3>
<ul>
<li><code>400</code> unknown event type</li>
<li><code>404</code> unknown campaign</li>
<li><code>422</code> missing or malformed parameter</li>
</ul>
</div>
<div class="card">
<h2>Emails sent</h2>
<p>Report how many emails a domain sent for a campaign. The value replaces the previous one.</p>
<pre>curl -X PUT {base}/api/campaign/1/domain/example1.com/emails-sent \
  -H 'Content-Type: application/json' \
  -d '{{"emails_sent": 1000}}'</pre>
<p>Response: <code>{{"status": "ok", "campaign_id": 1, "domain": "example1.com", "emails_sent": 1000}}</code></p>
</div>
<div class="card">
<h2>Read API</h2>
<ul>
<li><code>GET {base}/api/campaigns</code> campaign list with clicks and conversions</li>
<li><code>GET {base}/api/campaign/1/stats</code> overall and per-domain statistics</li>
<li><code>GET {base}/health</code> liveness</li>
</ul>
</div>"#
    );
    layout("API", &body)
}
