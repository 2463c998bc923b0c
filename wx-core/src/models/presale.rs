use crate::models::{AgentId, EntryId, MarketId, PreSaleItemId, ProductId};
use crate::ports::{Column, Record};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A pre-sale entry recorded by an agent in a market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreSaleEntryRecord {
    /// The entry's id
    pub id: EntryId,
    /// When the entry was recorded
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// The recording agent
    pub agent_id: AgentId,
    /// The market it concerns
    pub market_id: MarketId,
    /// Why the entry was made
    pub reason: String,
    /// `completed` or anything else for pending
    pub status: String,
    /// Free-text remarks
    #[serde(default)]
    pub notes: Option<String>,
}

impl Record for PreSaleEntryRecord {
    const COLUMNS: &'static [Column] = &[
        Column::text("id"),
        Column::timestamp("created_at"),
        Column::text("agent_id"),
        Column::text("market_id"),
        Column::text("reason"),
        Column::text("status"),
        Column::text("notes"),
    ];
}

/// One product line of a pre-sale entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreSaleItemRecord {
    /// The line's id
    pub id: PreSaleItemId,
    /// The owning entry
    pub entry_id: EntryId,
    /// The product, resolved against the products table
    pub product_id: ProductId,
    /// Units replaced or taken out
    pub quantity: u32,
    /// `replace` or `take_out`
    pub item_type: String,
}

impl Record for PreSaleItemRecord {
    const COLUMNS: &'static [Column] = &[
        Column::text("id"),
        Column::text("entry_id"),
        Column::text("product_id"),
        Column::integer("quantity"),
        Column::text("item_type"),
    ];
}

/// A master-data product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// The product's id
    pub id: ProductId,
    /// Display name
    pub name: String,
}

impl Record for ProductRecord {
    const COLUMNS: &'static [Column] = &[Column::text("id"), Column::text("name")];
}
