#![allow(dead_code)]

use time::{OffsetDateTime, macros::datetime};
use wx_core::{models::*, ports::Table};
use wx_sqlite::{Db, config::SqliteConfig};

pub fn id<T: From<uuid::Uuid>>() -> T {
    uuid::Uuid::new_v4().into()
}

/// A small campaign: one pallet with two products, one bin with one product,
/// a display, a carton and a single product, sold in two markets by one agent.
pub struct Fixture {
    pub db: Db,
    pub campaign: CampaignRecord,
    pub agent: AgentRecord,
    pub zell: MarketRecord,
    pub ardagger: MarketRecord,
    pub pallet: ContainerRecord,
    pub bin: ContainerRecord,
    pub chips: ContainerProductRecord,
    pub salsa: ContainerProductRecord,
    pub screws: ContainerProductRecord,
    pub display: StandaloneItemRecord,
    pub carton: StandaloneItemRecord,
    pub single: StandaloneItemRecord,
}

fn market(name: &str, agent: &AgentRecord, visits: i64) -> MarketRecord {
    MarketRecord {
        id: id(),
        internal_id: Some(format!("M-{name}")),
        name: name.to_owned(),
        chain: Some("Billa".to_owned()),
        address: Some("Hauptstraße 1".to_owned()),
        city: Some(name.to_owned()),
        postal_code: Some("3300".to_owned()),
        agent_id: Some(agent.id),
        agent_name: Some(agent.name.clone()),
        agent_email: Some(agent.email.clone()),
        frequency: Some(4),
        current_visits: Some(visits),
        last_visit_date: None,
        is_active: true,
        phone: None,
        email: None,
        channel: None,
        banner: None,
        subgroup: None,
        created_at: datetime!(2024-01-01 00:00 UTC),
    }
}

fn standalone(campaign: &CampaignRecord, name: &str, price: f64) -> StandaloneItemRecord {
    StandaloneItemRecord {
        id: id(),
        campaign_id: campaign.id,
        name: name.to_owned(),
        item_value: Some(price),
        position: 0,
    }
}

fn container(campaign: &CampaignRecord, name: &str) -> ContainerRecord {
    ContainerRecord {
        id: id(),
        campaign_id: campaign.id,
        name: name.to_owned(),
        size: Some("1/4".to_owned()),
        position: 0,
    }
}

fn product(container: &ContainerRecord, name: &str, price: f64, position: i64) -> ContainerProductRecord {
    ContainerProductRecord {
        id: id(),
        container_id: container.id,
        name: name.to_owned(),
        value_per_unit: Some(price),
        position,
    }
}

impl Fixture {
    pub async fn new() -> anyhow::Result<Self> {
        let db = Db::open(&SqliteConfig::default()).await?;

        let campaign = CampaignRecord {
            id: id(),
            name: "Herbstwelle".to_owned(),
            goal_type: Some("value".to_owned()),
        };
        let agent = AgentRecord {
            id: id(),
            name: "Anna Berger".to_owned(),
            email: "anna@example.com".to_owned(),
            phone: None,
            address: None,
            city: Some("Linz".to_owned()),
            postal_code: None,
            is_active: true,
            created_at: datetime!(2023-06-01 08:00 UTC),
            profile_picture_url: None,
        };
        let zell = market("Zell", &agent, 3);
        let ardagger = market("Ardagger", &agent, 5);

        let pallet = container(&campaign, "Pallet-A");
        let bin = container(&campaign, "Bin-A");
        let chips = product(&pallet, "Chips", 5.0, 0);
        let salsa = product(&pallet, "Salsa", 7.0, 1);
        let screws = product(&bin, "Screws", 2.0, 0);
        let display = standalone(&campaign, "Aufsteller", 10.0);
        let carton = standalone(&campaign, "Karton", 4.0);
        let single = standalone(&campaign, "Einzel", 1.5);

        db.insert(Table::Campaigns, std::slice::from_ref(&campaign)).await?;
        db.insert(Table::Agents, std::slice::from_ref(&agent)).await?;
        db.insert(Table::Markets, &[zell.clone(), ardagger.clone()]).await?;
        db.insert(
            Table::CampaignMarkets,
            &[&zell, &ardagger].map(|m| CampaignMarketRecord {
                campaign_id: campaign.id,
                market_id: m.id,
            }),
        )
        .await?;
        db.insert(Table::Pallets, std::slice::from_ref(&pallet)).await?;
        db.insert(Table::Bins, std::slice::from_ref(&bin)).await?;
        db.insert(Table::PalletProducts, &[salsa.clone(), chips.clone()]).await?;
        db.insert(Table::BinProducts, std::slice::from_ref(&screws)).await?;
        db.insert(Table::Displays, std::slice::from_ref(&display)).await?;
        db.insert(Table::Cartons, std::slice::from_ref(&carton)).await?;
        db.insert(Table::SingleProducts, std::slice::from_ref(&single)).await?;

        Ok(Self {
            db,
            campaign,
            agent,
            zell,
            ardagger,
            pallet,
            bin,
            chips,
            salsa,
            screws,
            display,
            carton,
            single,
        })
    }

    pub fn submission(
        &self,
        market: &MarketRecord,
        item_type: ItemType,
        item_id: ItemId,
        created_at: OffsetDateTime,
        quantity: u32,
        value_per_unit: Option<f64>,
    ) -> SubmissionRecord {
        SubmissionRecord {
            id: id(),
            created_at,
            item_type,
            item_id,
            market_id: market.id,
            agent_id: self.agent.id,
            campaign_id: self.campaign.id,
            quantity,
            value_per_unit,
            photo_url: Some("https://photos.example.com/a.jpg".to_owned()),
            delivery_photo_url: None,
        }
    }

    pub fn options(&self, columns: &[&str]) -> ExportOptions {
        ExportOptions {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        }
    }
}
