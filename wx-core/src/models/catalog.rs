//! Catalog records for the five item catalogs and the two container tables.

use crate::models::{CampaignId, ContainerId, ItemId, ItemType};
use crate::ports::{Column, Record};
use serde::{Deserialize, Serialize};

/// The physical carrier a container product is delivered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    /// A pallet
    Pallet,
    /// A bin
    Bin,
}

impl ContainerKind {
    /// The item type of products carried by this kind of container.
    pub fn product_type(self) -> ItemType {
        match self {
            ContainerKind::Pallet => ItemType::PalletProduct,
            ContainerKind::Bin => ItemType::BinProduct,
        }
    }

    /// Label used when a product's container can no longer be found.
    pub fn unknown_label(self) -> &'static str {
        match self {
            ContainerKind::Pallet => "Unbekannte Palette",
            ContainerKind::Bin => "Unbekannte Schütte",
        }
    }
}

/// A display, carton or single product defined for a campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandaloneItemRecord {
    /// The item's id
    pub id: ItemId,
    /// The campaign defining the item
    pub campaign_id: CampaignId,
    /// Display name
    pub name: String,
    /// Catalog price per unit
    #[serde(default)]
    pub item_value: Option<f64>,
    /// Explicit ordering within the catalog
    #[serde(default)]
    pub position: i64,
}

impl Record for StandaloneItemRecord {
    const COLUMNS: &'static [Column] = &[
        Column::text("id"),
        Column::text("campaign_id"),
        Column::text("name"),
        Column::real("item_value"),
        Column::integer("position"),
    ];
}

/// A pallet or bin defined for a campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerRecord {
    /// The container's id
    pub id: ContainerId,
    /// The campaign defining the container
    pub campaign_id: CampaignId,
    /// Display name
    pub name: String,
    /// Free-form size description
    #[serde(default)]
    pub size: Option<String>,
    /// Explicit ordering within the catalog
    #[serde(default)]
    pub position: i64,
}

impl Record for ContainerRecord {
    const COLUMNS: &'static [Column] = &[
        Column::text("id"),
        Column::text("campaign_id"),
        Column::text("name"),
        Column::text("size"),
        Column::integer("position"),
    ];
}

/// A product carried inside a pallet or bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerProductRecord {
    /// The product's id
    pub id: ItemId,
    /// The owning pallet or bin
    pub container_id: ContainerId,
    /// Display name
    pub name: String,
    /// Catalog price per unit
    #[serde(default)]
    pub value_per_unit: Option<f64>,
    /// Explicit ordering within the container
    #[serde(default)]
    pub position: i64,
}

impl Record for ContainerProductRecord {
    const COLUMNS: &'static [Column] = &[
        Column::text("id"),
        Column::text("container_id"),
        Column::text("name"),
        Column::real("value_per_unit"),
        Column::integer("position"),
    ];
}

/// A pallet or bin together with its kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    /// The container's id
    pub id: ContainerId,
    /// Display name
    pub name: String,
    /// Pallet or bin
    pub kind: ContainerKind,
    /// Explicit ordering within the catalog
    pub position: i64,
}

impl Container {
    /// Attach a kind to a container row.
    pub fn new(kind: ContainerKind, record: ContainerRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            kind,
            position: record.position,
        }
    }
}

/// An entry from any of the five item catalogs.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemDefinition {
    /// From the display catalog
    Display(StandaloneItemRecord),
    /// From the carton catalog
    Carton(StandaloneItemRecord),
    /// From the single product catalog
    SingleProduct(StandaloneItemRecord),
    /// From the pallet product catalog
    PalletProduct(ContainerProductRecord),
    /// From the bin product catalog
    BinProduct(ContainerProductRecord),
}

impl ItemDefinition {
    /// Which catalog the definition came from.
    pub fn item_type(&self) -> ItemType {
        match self {
            ItemDefinition::Display(_) => ItemType::Display,
            ItemDefinition::Carton(_) => ItemType::Carton,
            ItemDefinition::SingleProduct(_) => ItemType::SingleProduct,
            ItemDefinition::PalletProduct(_) => ItemType::PalletProduct,
            ItemDefinition::BinProduct(_) => ItemType::BinProduct,
        }
    }

    /// The item's id.
    pub fn id(&self) -> ItemId {
        match self {
            ItemDefinition::Display(item)
            | ItemDefinition::Carton(item)
            | ItemDefinition::SingleProduct(item) => item.id,
            ItemDefinition::PalletProduct(item) | ItemDefinition::BinProduct(item) => item.id,
        }
    }

    /// The item's display name.
    pub fn name(&self) -> &str {
        match self {
            ItemDefinition::Display(item)
            | ItemDefinition::Carton(item)
            | ItemDefinition::SingleProduct(item) => &item.name,
            ItemDefinition::PalletProduct(item) | ItemDefinition::BinProduct(item) => &item.name,
        }
    }

    /// The catalog price, treating a missing price as zero.
    pub fn unit_price(&self) -> f64 {
        match self {
            ItemDefinition::Display(item)
            | ItemDefinition::Carton(item)
            | ItemDefinition::SingleProduct(item) => item.item_value.unwrap_or(0.0),
            ItemDefinition::PalletProduct(item) | ItemDefinition::BinProduct(item) => {
                item.value_per_unit.unwrap_or(0.0)
            }
        }
    }

    /// The owning container. Always present for container products, never for the rest.
    pub fn parent_container(&self) -> Option<(ContainerKind, ContainerId)> {
        match self {
            ItemDefinition::Display(_)
            | ItemDefinition::Carton(_)
            | ItemDefinition::SingleProduct(_) => None,
            ItemDefinition::PalletProduct(item) => Some((ContainerKind::Pallet, item.container_id)),
            ItemDefinition::BinProduct(item) => Some((ContainerKind::Bin, item.container_id)),
        }
    }
}
