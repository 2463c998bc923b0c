use crate::models::{ContainerId, ContainerKind, ItemId, ItemType, Map, MarketId};
use serde::{Deserialize, Serialize};

/// A pivot keyed `row -> market -> value`.
pub type Matrix<K, V> = Map<K, Map<MarketId, V>>;

/// A row of the single-wave matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveItem {
    /// The item's id
    pub id: ItemId,
    /// Display name
    pub name: String,
    /// The catalog the item came from
    pub item_type: ItemType,
    /// Catalog price used for valuation
    pub price_per_unit: f64,
    /// Owning pallet or bin, for container products
    pub parent_id: Option<ContainerId>,
    /// The owning container's name
    pub parent_name: Option<String>,
    /// Whether the owner is a pallet or a bin
    pub parent_kind: Option<ContainerKind>,
    /// Visual band; `-1` for items without one
    pub color_group: i32,
    /// Always false; containers are listed separately
    pub is_parent: bool,
}

/// A pallet or bin heading a band of container products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentItem {
    /// The container's id
    pub id: ContainerId,
    /// Display name
    pub name: String,
    /// Pallet or bin
    pub kind: ContainerKind,
    /// The band shared with its products
    pub color_group: i32,
}

/// A participating market, as a matrix column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRef {
    /// The market's id
    pub id: MarketId,
    /// Column heading
    pub name: String,
}

/// The item × market pivot of one campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleWaveResult {
    /// The campaign's name
    pub wave_name: String,
    /// The campaign's goal type
    pub goal_type: Option<String>,
    /// Matrix rows: container products, standalone items, then recovered orphans
    pub items: Vec<WaveItem>,
    /// Pallets, then bins
    pub parent_items: Vec<ParentItem>,
    /// Matrix columns, ordered by name
    pub markets: Vec<MarketRef>,
    /// Σ quantity per item and market
    pub quantity_matrix: Matrix<ItemId, u64>,
    /// Σ quantity × unit price per item and market
    pub value_matrix: Matrix<ItemId, f64>,
    /// Distinct drop-offs per container and market
    pub parent_occurrence_matrix: Matrix<ContainerId, u64>,
}
