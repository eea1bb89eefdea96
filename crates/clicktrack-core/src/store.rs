//! Storage abstraction used by the HTTP layer.

use crate::event::NewEvent;
use crate::model::{
    Campaign, CampaignDomainEmails, CreateCampaignParams, CreateOfferParams, Offer, OfferChange,
    UpdateOfferParams,
};
use crate::stats::{
    CampaignSummary, DomainStats, EventCounts, JourneyFilter, JourneyPage, OfferCampaignStats,
    OfferOverallStats, OfferSummary,
};

#[async_trait::async_trait]
pub trait TrackerStore: Send + Sync + 'static {
    async fn ping(&self) -> anyhow::Result<()>;

    // Events and send counters.
    async fn campaign_exists(&self, campaign_id: i64) -> anyhow::Result<bool>;
    async fn insert_event(&self, event: &NewEvent) -> anyhow::Result<i64>;
    async fn set_emails_sent(
        &self,
        campaign_id: i64,
        domain: &str,
        emails_sent: i64,
    ) -> anyhow::Result<CampaignDomainEmails>;
    async fn get_emails_sent(
        &self,
        campaign_id: i64,
        domain: &str,
    ) -> anyhow::Result<Option<CampaignDomainEmails>>;

    // Offers.
    async fn create_offer(&self, params: CreateOfferParams) -> anyhow::Result<Offer>;
    async fn get_offer(&self, offer_id: i64) -> anyhow::Result<Option<Offer>>;
    /// All offers ordered by name, for selectors.
    async fn list_offers(&self) -> anyhow::Result<Vec<Offer>>;
    /// Returns `None` when the offer does not exist. Propagates the new URL to
    /// every campaign of the offer.
    async fn update_offer(
        &self,
        offer_id: i64,
        params: UpdateOfferParams,
    ) -> anyhow::Result<Option<Offer>>;

    // Campaigns.
    /// Returns `None` when the referenced offer does not exist.
    async fn create_campaign(&self, params: CreateCampaignParams)
        -> anyhow::Result<Option<Campaign>>;
    async fn get_campaign(&self, campaign_id: i64) -> anyhow::Result<Option<Campaign>>;
    async fn change_campaign_offer(
        &self,
        campaign_id: i64,
        offer_id: i64,
    ) -> anyhow::Result<OfferChange>;

    // Dashboards.
    async fn list_campaign_summaries(&self) -> anyhow::Result<Vec<CampaignSummary>>;
    async fn campaign_overall_stats(&self, campaign_id: i64) -> anyhow::Result<EventCounts>;
    async fn campaign_domain_stats(&self, campaign_id: i64) -> anyhow::Result<Vec<DomainStats>>;
    async fn campaign_journeys(
        &self,
        campaign_id: i64,
        filter: &JourneyFilter,
    ) -> anyhow::Result<JourneyPage>;
    async fn list_offer_summaries(&self) -> anyhow::Result<Vec<OfferSummary>>;
    async fn offer_overall_stats(&self, offer_id: i64) -> anyhow::Result<OfferOverallStats>;
    async fn offer_campaign_stats(&self, offer_id: i64)
        -> anyhow::Result<Vec<OfferCampaignStats>>;
}
