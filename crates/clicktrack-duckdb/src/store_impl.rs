use async_trait::async_trait;

use clicktrack_core::event::NewEvent;
use clicktrack_core::model::{
    Campaign, CampaignDomainEmails, CreateCampaignParams, CreateOfferParams, Offer, OfferChange,
    UpdateOfferParams,
};
use clicktrack_core::stats::{
    CampaignSummary, DomainStats, EventCounts, JourneyFilter, JourneyPage, OfferCampaignStats,
    OfferOverallStats, OfferSummary,
};
use clicktrack_core::store::TrackerStore;

use crate::DuckDbBackend;

#[async_trait]
impl TrackerStore for DuckDbBackend {
    async fn ping(&self) -> anyhow::Result<()> {
        DuckDbBackend::ping(self).await
    }

    async fn campaign_exists(&self, campaign_id: i64) -> anyhow::Result<bool> {
        DuckDbBackend::campaign_exists(self, campaign_id).await
    }

    async fn insert_event(&self, event: &NewEvent) -> anyhow::Result<i64> {
        DuckDbBackend::insert_event(self, event).await
    }

    async fn set_emails_sent(
        &self,
        campaign_id: i64,
        domain: &str,
        emails_sent: i64,
    ) -> anyhow::Result<CampaignDomainEmails> {
        DuckDbBackend::set_emails_sent(self, campaign_id, domain, emails_sent).await
    }

    async fn get_emails_sent(
        &self,
        campaign_id: i64,
        domain: &str,
    ) -> anyhow::Result<Option<CampaignDomainEmails>> {
        DuckDbBackend::get_emails_sent(self, campaign_id, domain).await
    }

    async fn create_offer(&self, params: CreateOfferParams) -> anyhow::Result<Offer> {
        DuckDbBackend::create_offer(self, params).await
    }

    async fn get_offer(&self, offer_id: i64) -> anyhow::Result<Option<Offer>> {
        DuckDbBackend::get_offer(self, offer_id).await
    }

    async fn list_offers(&self) -> anyhow::Result<Vec<Offer>> {
        DuckDbBackend::list_offers(self).await
    }

    async fn update_offer(
        &self,
        offer_id: i64,
        params: UpdateOfferParams,
    ) -> anyhow::Result<Option<Offer>> {
        DuckDbBackend::update_offer(self, offer_id, params).await
    }

    async fn create_campaign(
        &self,
        params: CreateCampaignParams,
    ) -> anyhow::Result<Option<Campaign>> {
        DuckDbBackend::create_campaign(self, params).await
    }

    async fn get_campaign(&self, campaign_id: i64) -> anyhow::Result<Option<Campaign>> {
        DuckDbBackend::get_campaign(self, campaign_id).await
    }

    async fn change_campaign_offer(
        &self,
        campaign_id: i64,
        offer_id: i64,
    ) -> anyhow::Result<OfferChange> {
        DuckDbBackend::change_campaign_offer(self, campaign_id, offer_id).await
    }

    async fn list_campaign_summaries(&self) -> anyhow::Result<Vec<CampaignSummary>> {
        crate::queries::campaigns::list_campaign_summaries_inner(self).await
    }

    async fn campaign_overall_stats(&self, campaign_id: i64) -> anyhow::Result<EventCounts> {
        crate::queries::campaigns::campaign_overall_stats_inner(self, campaign_id).await
    }

    async fn campaign_domain_stats(&self, campaign_id: i64) -> anyhow::Result<Vec<DomainStats>> {
        crate::queries::campaigns::campaign_domain_stats_inner(self, campaign_id).await
    }

    async fn campaign_journeys(
        &self,
        campaign_id: i64,
        filter: &JourneyFilter,
    ) -> anyhow::Result<JourneyPage> {
        crate::queries::journeys::campaign_journeys_inner(self, campaign_id, filter).await
    }

    async fn list_offer_summaries(&self) -> anyhow::Result<Vec<OfferSummary>> {
        crate::queries::offers::list_offer_summaries_inner(self).await
    }

    async fn offer_overall_stats(&self, offer_id: i64) -> anyhow::Result<OfferOverallStats> {
        crate::queries::offers::offer_overall_stats_inner(self, offer_id).await
    }

    async fn offer_campaign_stats(
        &self,
        offer_id: i64,
    ) -> anyhow::Result<Vec<OfferCampaignStats>> {
        crate::queries::offers::offer_campaign_stats_inner(self, offer_id).await
    }
}
