//! Server-rendered HTML.
//!
//! Pages are built with `format!` and wrapped in [`layout`]. Fragments
//! (`/campaigns-table`, `/campaign/{id}/stats`, `/campaign/{id}/users`) are
//! returned bare so htmx can swap them into the page.

pub mod campaigns;
pub mod docs;
pub mod offers;

use std::fmt::Write;

use axum::response::Html;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #f5f6f8; color: #222; }
header { background: #1f2937; color: #fff; padding: 0.8rem 1.5rem; display: flex; gap: 1.5rem; align-items: center; }
header a { color: #e5e7eb; text-decoration: none; }
header a.brand { font-weight: 700; color: #fff; }
main { max-width: 1100px; margin: 1.5rem auto; padding: 0 1rem; }
.card { background: #fff; border-radius: 6px; padding: 1rem 1.25rem; margin-bottom: 1.25rem; box-shadow: 0 1px 2px rgba(0,0,0,.08); }
table { width: 100%; border-collapse: collapse; }
th, td { text-align: left; padding: 0.45rem 0.6rem; border-bottom: 1px solid #e5e7eb; }
th { font-size: 0.85rem; color: #555; }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(150px, 1fr)); gap: 0.8rem; }
.metric { background: #f9fafb; border-radius: 6px; padding: 0.7rem; }
.metric .value { font-size: 1.5rem; font-weight: 600; }
.metric .label { font-size: 0.8rem; color: #666; }
.yes { color: #15803d; font-weight: 600; }
.no { color: #bbb; }
.muted { color: #777; font-size: 0.85rem; }
.button { background: #2563eb; color: #fff; border: 0; border-radius: 4px; padding: 0.45rem 0.9rem; cursor: pointer; text-decoration: none; display: inline-block; }
input, select { padding: 0.4rem; border: 1px solid #ccc; border-radius: 4px; }
form.stack label { display: block; margin: 0.6rem 0 0.2rem; }
code, pre { background: #f3f4f6; padding: 0.1rem 0.3rem; border-radius: 3px; }
pre { padding: 0.7rem; overflow-x: auto; }
.pager { display: flex; gap: 0.5rem; align-items: center; margin-top: 0.8rem; }
"#;

/// Escape `&`, `<`, `>`, `"` and `'` for use in HTML text and attributes.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Conversion rate with two decimals, e.g. `12.50%`.
pub fn format_rate(rate: f64) -> String {
    format!("{rate:.2}%")
}

/// Trim a DuckDB timestamp string to minutes: `2026-01-01 10:00`.
pub fn format_time(ts: &str) -> &str {
    ts.get(..16).unwrap_or(ts)
}

fn flag(value: bool) -> &'static str {
    if value {
        r#"<span class="yes">&#10003;</span>"#
    } else {
        r#"<span class="no">&mdash;</span>"#
    }
}

/// A labelled number tile used by the stats blocks.
fn metric(out: &mut String, label: &str, value: impl std::fmt::Display) {
    let _ = write!(
        out,
        r#"<div class="metric"><div class="value">{value}</div><div class="label">{label}</div></div>"#
    );
}

/// Wrap `body` in the full page chrome.
pub fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} · Click Tracker</title>
<script src="https://unpkg.com/htmx.org@1.9.12"></script>
<style>{STYLE}</style>
</head>
<body>
<header>
  <a class="brand" href="/">Click Tracker</a>
  <a href="/">Campaigns</a>
  <a href="/offers">Offers</a>
  <a href="/api-docs">API</a>
</header>
<main>
{body}
</main>
</body>
</html>"#,
        title = escape(title),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_replaces_markup_characters() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn rate_has_two_decimals() {
        assert_eq!(format_rate(0.0), "0.00%");
        assert_eq!(format_rate(100.0 / 3.0), "33.33%");
    }

    #[test]
    fn time_is_cut_to_minutes() {
        assert_eq!(format_time("2026-01-01 10:05:33.123456"), "2026-01-01 10:05");
        assert_eq!(format_time("short"), "short");
    }

    #[test]
    fn layout_escapes_title() {
        let Html(page) = layout("<b>", "body");
        assert!(page.contains("<title>&lt;b&gt; · Click Tracker</title>"));
    }
}
