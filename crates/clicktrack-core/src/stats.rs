//! Aggregate rows shown on the dashboards.

use serde::Serialize;

/// Number of journeys returned per page by the users table.
pub const JOURNEY_PAGE_SIZE: i64 = 50;

/// `conversions / email_clicks * 100`, or `0.0` when there were no email clicks.
pub fn conversion_rate(conversions: i64, email_clicks: i64) -> f64 {
    if email_clicks <= 0 {
        return 0.0;
    }
    conversions as f64 / email_clicks as f64 * 100.0
}

/// Per-type event counts for some grouping (campaign, domain, offer).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EventCounts {
    pub email_clicks: i64,
    pub landing_clicks: i64,
    pub conversions: i64,
    pub unsubscribes: i64,
}

impl EventCounts {
    pub fn conversion_rate(&self) -> f64 {
        conversion_rate(self.conversions, self.email_clicks)
    }

    pub fn total(&self) -> i64 {
        self.email_clicks + self.landing_clicks + self.conversions + self.unsubscribes
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OverallStats {
    #[serde(flatten)]
    pub counts: EventCounts,
    pub conversion_rate: f64,
}

impl From<EventCounts> for OverallStats {
    fn from(counts: EventCounts) -> Self {
        Self {
            conversion_rate: counts.conversion_rate(),
            counts,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DomainStats {
    pub domain: String,
    #[serde(flatten)]
    pub counts: EventCounts,
    /// Value of the send counter for this domain, 0 when none was reported.
    pub emails_sent: i64,
    pub conversion_rate: f64,
}

/// One row of the home-page campaign table.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignSummary {
    pub id: i64,
    pub name: String,
    /// Email clicks plus landing clicks.
    pub clicks: i64,
    pub conversions: i64,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OfferSummary {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub created_at: String,
    pub campaigns_count: i64,
    pub total_events: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OfferOverallStats {
    pub campaigns_count: i64,
    #[serde(flatten)]
    pub counts: EventCounts,
    pub conversion_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OfferCampaignStats {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub counts: EventCounts,
    pub conversion_rate: f64,
}

/// Which event types one (email, domain) pair produced in a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserJourney {
    pub email: String,
    pub domain: String,
    pub has_email_click: bool,
    pub has_landing_click: bool,
    pub has_conversion: bool,
    pub has_unsubscribe: bool,
    pub first_event: String,
}

#[derive(Debug, Clone, Default)]
pub struct JourneyFilter {
    /// Exact sending-domain match.
    pub domain: Option<String>,
    /// Case-insensitive substring of the email address.
    pub email_search: Option<String>,
    pub offset: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct JourneyPage {
    pub journeys: Vec<UserJourney>,
    /// Distinct emails matching the filter.
    pub total_users: i64,
    /// Distinct (email, domain) pairs matching the filter; drives paging.
    pub total_journeys: i64,
    pub offset: i64,
    pub limit: i64,
}

impl JourneyPage {
    pub fn has_previous(&self) -> bool {
        self.offset > 0
    }

    pub fn has_next(&self) -> bool {
        self.offset + self.limit < self.total_journeys
    }

    pub fn previous_offset(&self) -> i64 {
        (self.offset - self.limit).max(0)
    }

    pub fn next_offset(&self) -> i64 {
        self.offset + self.limit
    }
}
