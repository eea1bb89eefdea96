use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Offer {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub created_at: String,
}

/// A campaign joined with the name of its offer (if any).
#[derive(Debug, Clone, Serialize)]
pub struct Campaign {
    pub id: i64,
    pub name: String,
    /// URL of the offer at the time it was attached to the campaign.
    pub offer_url: String,
    pub offer_id: Option<i64>,
    pub offer_name: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CampaignDomainEmails {
    pub campaign_id: i64,
    pub domain: String,
    pub emails_sent: i64,
    pub created_at: String,
    pub updated_at: String,
}

pub struct CreateOfferParams {
    pub name: String,
    pub url: String,
}

pub struct UpdateOfferParams {
    pub name: String,
    pub url: String,
}

pub struct CreateCampaignParams {
    pub name: String,
    pub offer_id: i64,
}

/// Outcome of re-pointing a campaign at another offer.
#[derive(Debug, Clone)]
pub enum OfferChange {
    Updated(Campaign),
    CampaignNotFound,
    OfferNotFound,
}
