//! Demo data for `clicktrack seed`.

use anyhow::Result;
use chrono::{Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use clicktrack_core::event::{EventType, NewEvent};
use clicktrack_core::model::{CreateCampaignParams, CreateOfferParams};
use clicktrack_duckdb::DuckDbBackend;

const OFFERS: [(&str, &str); 3] = [
    ("Wellgreen", "https://wellgreen.com/dog-food-offer?aff=123"),
    ("PetCo", "https://petco.com/cat-toys?aff=456"),
    ("HealthPlus", "https://healthplus.com/fish-oil?aff=789"),
];

const CAMPAIGNS: [&str; 3] = ["Dog Food US", "Cat Toys EU", "Fish Oil CA"];

const DOMAINS: [&str; 3] = ["example1.com", "example2.com", "example3.com"];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub offers: usize,
    pub campaigns: usize,
    pub events: usize,
}

/// Insert three offers, one campaign per offer, 30-40 users per campaign and
/// a send counter for every (campaign, domain).
///
/// Every user clicks the email; 80% also click the landing page, 30% of those
/// convert and 5% of all users unsubscribe. Events are spread over the last
/// seven days.
pub async fn seed_demo_data<R: Rng + Send>(db: &DuckDbBackend, rng: &mut R) -> Result<SeedSummary> {
    let emails: Vec<String> = (1..=100).map(|i| format!("user{i}@example.com")).collect();
    let mut summary = SeedSummary::default();

    for ((offer_name, url), campaign_name) in OFFERS.iter().zip(CAMPAIGNS) {
        let offer = db
            .create_offer(CreateOfferParams {
                name: offer_name.to_string(),
                url: url.to_string(),
            })
            .await?;
        summary.offers += 1;

        let campaign = db
            .create_campaign(CreateCampaignParams {
                name: format!("{campaign_name}, {offer_name}"),
                offer_id: offer.id,
            })
            .await?
            .ok_or_else(|| anyhow::anyhow!("offer {} vanished while seeding", offer.id))?;
        summary.campaigns += 1;

        let user_count = rng.gen_range(30..=40);
        let users: Vec<&String> = emails.choose_multiple(rng, user_count).collect();

        for email in users {
            let domain = DOMAINS.choose(rng).copied().unwrap_or(DOMAINS[0]);
            let mut types = vec![EventType::EmailClick];
            if rng.gen_bool(0.8) {
                types.push(EventType::LandingClick);
                if rng.gen_bool(0.3) {
                    types.push(EventType::Conversion);
                }
            }
            if rng.gen_bool(0.05) {
                types.push(EventType::Unsubscribe);
            }

            for event_type in types {
                let created_at = Utc::now().naive_utc()
                    - Duration::days(rng.gen_range(0..=7))
                    - Duration::seconds(rng.gen_range(0..86_400));
                let event = NewEvent {
                    campaign_id: campaign.id,
                    event_type,
                    email: email.clone(),
                    domain: domain.to_string(),
                    ip: Some(format!("192.168.1.{}", rng.gen_range(1..=255))),
                    user_agent: None,
                    extra_params: None,
                };
                db.insert_event_at(&event, created_at).await?;
                summary.events += 1;
            }
        }

        for domain in DOMAINS {
            db.set_emails_sent(campaign.id, domain, rng.gen_range(500..=2000))
                .await?;
        }

        info!(campaign_id = campaign.id, name = %campaign.name, "Seeded campaign");
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clicktrack_core::stats::EventCounts;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[tokio::test]
    async fn seeds_offers_campaigns_and_events() {
        let db = DuckDbBackend::open_in_memory().expect("db");
        let mut rng = StdRng::seed_from_u64(7);

        let summary = seed_demo_data(&db, &mut rng).await.expect("seed");
        assert_eq!(summary.offers, 3);
        assert_eq!(summary.campaigns, 3);

        let campaigns = db.list_campaign_summaries().await.expect("list");
        assert_eq!(campaigns.len(), 3);

        let mut total = 0;
        for c in &campaigns {
            let counts: EventCounts = db.campaign_overall_stats(c.id).await.expect("stats");
            assert!((30..=40).contains(&counts.email_clicks));
            assert!(counts.landing_clicks <= counts.email_clicks);
            assert!(counts.conversions <= counts.landing_clicks);
            total += counts.total();

            let domains = db.campaign_domain_stats(c.id).await.expect("domains");
            assert_eq!(domains.len(), 3);
            assert!(domains.iter().all(|d| d.emails_sent >= 500));
        }
        assert_eq!(total as usize, summary.events);
    }
}
