use crate::models::{AgentId, CampaignId, ContainerKind, ItemId, MarketId, SubmissionId};
use crate::ports::{Column, Record};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The catalog a submission's `item_id` points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    /// A standalone display
    Display,
    /// A standalone carton
    Carton,
    /// A freestanding single product
    SingleProduct,
    /// A product delivered on a pallet
    PalletProduct,
    /// A product delivered in a bin
    BinProduct,
}

impl ItemType {
    /// Every catalog, in the order lookups are issued.
    pub const ALL: [ItemType; 5] = [
        ItemType::Display,
        ItemType::Carton,
        ItemType::SingleProduct,
        ItemType::PalletProduct,
        ItemType::BinProduct,
    ];

    /// The wire name of the item type.
    pub fn as_str(self) -> &'static str {
        match self {
            ItemType::Display => "display",
            ItemType::Carton => "carton",
            ItemType::SingleProduct => "single_product",
            ItemType::PalletProduct => "pallet_product",
            ItemType::BinProduct => "bin_product",
        }
    }

    /// The kind of container owning items of this type, if any.
    pub fn container_kind(self) -> Option<ContainerKind> {
        match self {
            ItemType::PalletProduct => Some(ContainerKind::Pallet),
            ItemType::BinProduct => Some(ContainerKind::Bin),
            ItemType::Display | ItemType::Carton | ItemType::SingleProduct => None,
        }
    }

    /// Whether items of this type live inside a pallet or bin.
    pub fn is_container_product(self) -> bool {
        self.container_kind().is_some()
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single quantity report by an agent for one catalog item in one market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    /// The submission's id
    pub id: SubmissionId,

    /// When the submission was entered
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,

    /// Which catalog `item_id` refers to
    pub item_type: ItemType,

    /// The catalog entry that was submitted
    pub item_id: ItemId,

    /// Where the item was placed
    pub market_id: MarketId,

    /// Who entered the submission
    pub agent_id: AgentId,

    /// The campaign the submission belongs to
    pub campaign_id: CampaignId,

    /// Number of units
    pub quantity: u32,

    /// A per-submission price override
    #[serde(default)]
    pub value_per_unit: Option<f64>,

    /// Photo of the placement
    #[serde(default)]
    pub photo_url: Option<String>,

    /// Photo of the delivery note
    #[serde(default)]
    pub delivery_photo_url: Option<String>,
}

impl Record for SubmissionRecord {
    const COLUMNS: &'static [Column] = &[
        Column::text("id"),
        Column::timestamp("created_at"),
        Column::text("item_type"),
        Column::text("item_id"),
        Column::text("market_id"),
        Column::text("agent_id"),
        Column::text("campaign_id"),
        Column::integer("quantity"),
        Column::real("value_per_unit"),
        Column::text("photo_url"),
        Column::text("delivery_photo_url"),
    ];
}
