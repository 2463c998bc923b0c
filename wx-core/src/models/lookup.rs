use crate::models::{AgentId, CampaignId, MarketId};
use crate::ports::{Column, Record};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A campaign ("wave").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRecord {
    /// The campaign's id
    pub id: CampaignId,
    /// Display name
    pub name: String,
    /// Whether the campaign targets quantities or values
    #[serde(default)]
    pub goal_type: Option<String>,
}

impl Record for CampaignRecord {
    const COLUMNS: &'static [Column] = &[
        Column::text("id"),
        Column::text("name"),
        Column::text("goal_type"),
    ];
}

/// An area representative who enters submissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    /// The agent's id
    pub id: AgentId,
    /// Full name
    pub name: String,
    /// Login email
    pub email: String,
    /// Phone number
    #[serde(default)]
    pub phone: Option<String>,
    /// Street address
    #[serde(default)]
    pub address: Option<String>,
    /// City
    #[serde(default)]
    pub city: Option<String>,
    /// Postal code
    #[serde(default)]
    pub postal_code: Option<String>,
    /// Inactive agents are left out of the agent report
    pub is_active: bool,
    /// When the agent was added
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Avatar shown in the app
    #[serde(default)]
    pub profile_picture_url: Option<String>,
}

impl Record for AgentRecord {
    const COLUMNS: &'static [Column] = &[
        Column::text("id"),
        Column::text("name"),
        Column::text("email"),
        Column::text("phone"),
        Column::text("address"),
        Column::text("city"),
        Column::text("postal_code"),
        Column::boolean("is_active"),
        Column::timestamp("created_at"),
        Column::text("profile_picture_url"),
    ];
}

/// A retail market visited by agents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRecord {
    /// The market's id
    pub id: MarketId,
    /// The retailer's own market number
    #[serde(default)]
    pub internal_id: Option<String>,
    /// Display name
    pub name: String,
    /// Retail chain
    #[serde(default)]
    pub chain: Option<String>,
    /// Street address
    #[serde(default)]
    pub address: Option<String>,
    /// City
    #[serde(default)]
    pub city: Option<String>,
    /// Postal code
    #[serde(default)]
    pub postal_code: Option<String>,
    /// The agent currently responsible for the market
    #[serde(default)]
    pub agent_id: Option<AgentId>,
    /// Denormalized name of the responsible agent
    #[serde(default)]
    pub agent_name: Option<String>,
    /// Denormalized email of the responsible agent
    #[serde(default)]
    pub agent_email: Option<String>,
    /// Planned visits per year
    #[serde(default)]
    pub frequency: Option<i64>,
    /// Visits so far
    #[serde(default)]
    pub current_visits: Option<i64>,
    /// Date of the latest visit, as entered
    #[serde(default)]
    pub last_visit_date: Option<String>,
    /// Whether the market is still served
    pub is_active: bool,
    /// Phone number
    #[serde(default)]
    pub phone: Option<String>,
    /// Contact email
    #[serde(default)]
    pub email: Option<String>,
    /// Sales channel
    #[serde(default)]
    pub channel: Option<String>,
    /// Store banner within the chain
    #[serde(default)]
    pub banner: Option<String>,
    /// Chain subgroup
    #[serde(default)]
    pub subgroup: Option<String>,
    /// When the market was added
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Record for MarketRecord {
    const COLUMNS: &'static [Column] = &[
        Column::text("id"),
        Column::text("internal_id"),
        Column::text("name"),
        Column::text("chain"),
        Column::text("address"),
        Column::text("city"),
        Column::text("postal_code"),
        Column::text("agent_id"),
        Column::text("agent_name"),
        Column::text("agent_email"),
        Column::integer("frequency"),
        Column::integer("current_visits"),
        Column::text("last_visit_date"),
        Column::boolean("is_active"),
        Column::text("phone"),
        Column::text("email"),
        Column::text("channel"),
        Column::text("banner"),
        Column::text("subgroup"),
        Column::timestamp("created_at"),
    ];
}

/// Links a market to a campaign it participates in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignMarketRecord {
    /// The campaign
    pub campaign_id: CampaignId,
    /// A market taking part in it
    pub market_id: MarketId,
}

impl Record for CampaignMarketRecord {
    const COLUMNS: &'static [Column] =
        &[Column::text("campaign_id"), Column::text("market_id")];
}
