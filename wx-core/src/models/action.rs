use crate::models::{ActionId, MarketId};
use crate::ports::{Column, Record};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A change to which agent is responsible for a market.
///
/// The market fields are denormalized at the time of the action so the history
/// survives later edits to the market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The action's id
    pub id: ActionId,
    /// When the change was made
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// `assign`, `swap` or `remove`
    pub action_type: String,
    /// The market, if it still exists
    #[serde(default)]
    pub market_id: Option<MarketId>,
    /// Chain at the time of the action
    pub market_chain: String,
    /// Street address at the time of the action
    pub market_address: String,
    /// City at the time of the action
    #[serde(default)]
    pub market_city: Option<String>,
    /// Postal code at the time of the action
    #[serde(default)]
    pub market_postal_code: Option<String>,
    /// The agent the market was assigned to or removed from
    pub target_agent: String,
    /// The agent replaced by a swap
    #[serde(default)]
    pub previous_agent: Option<String>,
    /// Who made the change
    #[serde(default)]
    pub performed_by: Option<String>,
    /// Free-text remarks
    #[serde(default)]
    pub notes: Option<String>,
}

impl Record for ActionRecord {
    const COLUMNS: &'static [Column] = &[
        Column::text("id"),
        Column::timestamp("timestamp"),
        Column::text("action_type"),
        Column::text("market_id"),
        Column::text("market_chain"),
        Column::text("market_address"),
        Column::text("market_city"),
        Column::text("market_postal_code"),
        Column::text("target_agent"),
        Column::text("previous_agent"),
        Column::text("performed_by"),
        Column::text("notes"),
    ];
}
