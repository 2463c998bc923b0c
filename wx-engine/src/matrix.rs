//! The item × market matrices of a single campaign.

use crate::{
    catalog::{ItemCatalog, effective_unit_price},
    color::{ColorCategory, ColorGroups, NO_COLOR, assign_color_groups},
    group::GroupKey,
};
use rustc_hash::{FxHashMap, FxHashSet};
use wx_core::models::{
    ContainerId, ContainerKind, ItemId, ItemType, Matrix, ParentItem, SubmissionRecord, WaveItem,
};

/// The three pivots of a campaign.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Matrices {
    /// Σ quantity
    pub quantity: Matrix<ItemId, u64>,
    /// Σ quantity × unit price
    pub value: Matrix<ItemId, f64>,
    /// Distinct drop-offs per container
    pub parent_occurrence: Matrix<ContainerId, u64>,
}

/// Lays out the rows of a campaign's matrix and fills in the pivots.
pub struct MatrixBuilder<'a> {
    catalog: &'a ItemCatalog,
    colors: ColorGroups,
}

impl<'a> MatrixBuilder<'a> {
    /// Band the catalog in `order` and prepare to build.
    pub fn new(catalog: &'a ItemCatalog, order: &[ColorCategory]) -> Self {
        Self {
            catalog,
            colors: assign_color_groups(order, catalog),
        }
    }

    /// The bands assigned to the catalog.
    pub fn colors(&self) -> &ColorGroups {
        &self.colors
    }

    /// The matrix rows: pallet products under their pallets, bin products
    /// under their bins, then displays, cartons and single products.
    pub fn items(&self) -> Vec<WaveItem> {
        let mut items = Vec::new();
        for kind in [ContainerKind::Pallet, ContainerKind::Bin] {
            for container in self.catalog.containers(kind) {
                let color_group = self.colors.container(container.id);
                items.extend(self.catalog.products_of(kind, container.id).into_iter().map(
                    |product| WaveItem {
                        id: product.id,
                        name: product.name.clone(),
                        item_type: kind.product_type(),
                        price_per_unit: product.value_per_unit.unwrap_or(0.0),
                        parent_id: Some(container.id),
                        parent_name: Some(container.name.clone()),
                        parent_kind: Some(kind),
                        color_group,
                        is_parent: false,
                    },
                ));
            }
        }

        for item_type in [ItemType::Display, ItemType::Carton, ItemType::SingleProduct] {
            items.extend(
                self.catalog
                    .standalone_items(item_type)
                    .into_iter()
                    .map(|item| WaveItem {
                        id: item.id,
                        name: item.name.clone(),
                        item_type,
                        price_per_unit: item.item_value.unwrap_or(0.0),
                        parent_id: None,
                        parent_name: None,
                        parent_kind: None,
                        color_group: match item_type {
                            ItemType::SingleProduct => NO_COLOR,
                            _ => self.colors.item(item.id),
                        },
                        is_parent: false,
                    }),
            );
        }
        items
    }

    /// Pallets, then bins, each with its band.
    pub fn parent_items(&self) -> Vec<ParentItem> {
        [ContainerKind::Pallet, ContainerKind::Bin]
            .into_iter()
            .flat_map(|kind| self.catalog.containers(kind))
            .map(|container| ParentItem {
                id: container.id,
                name: container.name.clone(),
                kind: container.kind,
                color_group: self.colors.container(container.id),
            })
            .collect()
    }

    /// Fill the pivots from `submissions`.
    ///
    /// Standalone items are valued at their catalog price; container products
    /// at the submission's own price when positive, else the catalog price.
    /// Items missing from the catalog are priced from `recovered`.
    pub fn build(&self, submissions: &[SubmissionRecord], recovered: &[WaveItem]) -> Matrices {
        let recovered: FxHashMap<ItemId, f64> = recovered
            .iter()
            .map(|item| (item.id, item.price_per_unit))
            .collect();

        let mut matrices = Matrices::default();
        let mut drop_offs: FxHashSet<GroupKey> = FxHashSet::default();

        for submission in submissions {
            let catalog_price = self
                .catalog
                .resolve(submission.item_type, submission.item_id)
                .map(|item| item.unit_price)
                .or_else(|| recovered.get(&submission.item_id).copied())
                .unwrap_or(0.0);
            let unit_price = if submission.item_type.is_container_product() {
                effective_unit_price(submission.value_per_unit, catalog_price)
            } else {
                catalog_price
            };
            let quantity = u64::from(submission.quantity);

            *matrices
                .quantity
                .entry(submission.item_id)
                .or_default()
                .entry(submission.market_id)
                .or_default() += quantity;
            *matrices
                .value
                .entry(submission.item_id)
                .or_default()
                .entry(submission.market_id)
                .or_default() += quantity as f64 * unit_price;

            let Some(kind) = submission.item_type.container_kind() else {
                continue;
            };
            let Some(container_id) = self
                .catalog
                .parent_of(submission.item_type, submission.item_id)
            else {
                continue;
            };
            let key = GroupKey::new(
                submission.created_at,
                submission.market_id,
                kind,
                container_id,
            );
            if drop_offs.insert(key) {
                *matrices
                    .parent_occurrence
                    .entry(container_id)
                    .or_default()
                    .entry(submission.market_id)
                    .or_default() += 1;
            }
        }
        matrices
    }
}
