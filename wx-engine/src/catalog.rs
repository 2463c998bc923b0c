//! Resolution of `(item_type, item_id)` pairs across the five item catalogs.

use crate::{ExportError, PagedFetcher, join::distinct};
use tokio::try_join;
use tracing::{Level, event};
use wx_core::{
    models::{
        CampaignId, Container, ContainerId, ContainerKind, ContainerProductRecord, ContainerRecord,
        ItemDefinition, ItemId, ItemType, Map, StandaloneItemRecord, SubmissionRecord,
    },
    ports::{Order, Table, TableQuery, TableRepository},
};

/// The price a submission is valued at: its own override when positive,
/// otherwise the catalog price.
pub fn effective_unit_price(override_price: Option<f64>, catalog_price: f64) -> f64 {
    override_price
        .filter(|price| *price > 0.0)
        .unwrap_or(catalog_price)
}

/// The table backing each item catalog.
pub fn catalog_table(item_type: ItemType) -> Table {
    match item_type {
        ItemType::Display => Table::Displays,
        ItemType::Carton => Table::Cartons,
        ItemType::SingleProduct => Table::SingleProducts,
        ItemType::PalletProduct => Table::PalletProducts,
        ItemType::BinProduct => Table::BinProducts,
    }
}

/// The table backing each container kind.
pub fn container_table(kind: ContainerKind) -> Table {
    match kind {
        ContainerKind::Pallet => Table::Pallets,
        ContainerKind::Bin => Table::Bins,
    }
}

/// The owning container of a resolved container product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerRef<'a> {
    /// Pallet or bin
    pub kind: ContainerKind,
    /// The container's id
    pub id: ContainerId,
    /// The container's name, or a kind-specific placeholder if its row is gone
    pub name: &'a str,
}

/// What a report needs to know about a catalog item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedItem<'a> {
    /// The item's name
    pub name: &'a str,
    /// Catalog price, zero when unset
    pub unit_price: f64,
    /// Present exactly for container products
    pub container: Option<ContainerRef<'a>>,
}

/// An in-memory snapshot of the item catalogs and containers.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    displays: Map<ItemId, StandaloneItemRecord>,
    cartons: Map<ItemId, StandaloneItemRecord>,
    single_products: Map<ItemId, StandaloneItemRecord>,
    pallet_products: Map<ItemId, ContainerProductRecord>,
    bin_products: Map<ItemId, ContainerProductRecord>,
    pallets: Map<ContainerId, Container>,
    bins: Map<ContainerId, Container>,
}

impl ItemCatalog {
    /// Add an item definition to its catalog.
    pub fn insert(&mut self, definition: ItemDefinition) {
        match definition {
            ItemDefinition::Display(item) => {
                self.displays.insert(item.id, item);
            }
            ItemDefinition::Carton(item) => {
                self.cartons.insert(item.id, item);
            }
            ItemDefinition::SingleProduct(item) => {
                self.single_products.insert(item.id, item);
            }
            ItemDefinition::PalletProduct(item) => {
                self.pallet_products.insert(item.id, item);
            }
            ItemDefinition::BinProduct(item) => {
                self.bin_products.insert(item.id, item);
            }
        }
    }

    /// Add a pallet or bin.
    pub fn insert_container(&mut self, container: Container) {
        match container.kind {
            ContainerKind::Pallet => self.pallets.insert(container.id, container),
            ContainerKind::Bin => self.bins.insert(container.id, container),
        };
    }

    /// Resolve an item to its name, catalog price and container.
    ///
    /// Returns `None` when the item is not in its catalog.
    pub fn resolve(&self, item_type: ItemType, item_id: ItemId) -> Option<ResolvedItem<'_>> {
        match item_type {
            ItemType::Display => self.displays.get(&item_id).map(Self::standalone),
            ItemType::Carton => self.cartons.get(&item_id).map(Self::standalone),
            ItemType::SingleProduct => self.single_products.get(&item_id).map(Self::standalone),
            ItemType::PalletProduct => self
                .pallet_products
                .get(&item_id)
                .map(|product| self.container_product(ContainerKind::Pallet, product)),
            ItemType::BinProduct => self
                .bin_products
                .get(&item_id)
                .map(|product| self.container_product(ContainerKind::Bin, product)),
        }
    }

    fn standalone(item: &StandaloneItemRecord) -> ResolvedItem<'_> {
        ResolvedItem {
            name: &item.name,
            unit_price: item.item_value.unwrap_or(0.0),
            container: None,
        }
    }

    fn container_product<'a>(
        &'a self,
        kind: ContainerKind,
        product: &'a ContainerProductRecord,
    ) -> ResolvedItem<'a> {
        let name = self
            .container(kind, product.container_id)
            .map(|container| container.name.as_str())
            .unwrap_or(kind.unknown_label());
        ResolvedItem {
            name: &product.name,
            unit_price: product.value_per_unit.unwrap_or(0.0),
            container: Some(ContainerRef {
                kind,
                id: product.container_id,
                name,
            }),
        }
    }

    /// Whether any of the five catalogs knows `item_id`.
    pub fn contains(&self, item_id: &ItemId) -> bool {
        self.displays.contains_key(item_id)
            || self.cartons.contains_key(item_id)
            || self.single_products.contains_key(item_id)
            || self.pallet_products.contains_key(item_id)
            || self.bin_products.contains_key(item_id)
    }

    /// Look up a pallet or bin.
    pub fn container(&self, kind: ContainerKind, id: ContainerId) -> Option<&Container> {
        match kind {
            ContainerKind::Pallet => self.pallets.get(&id),
            ContainerKind::Bin => self.bins.get(&id),
        }
    }

    /// The pallets or bins, in catalog order.
    pub fn containers(&self, kind: ContainerKind) -> Vec<&Container> {
        let containers = match kind {
            ContainerKind::Pallet => &self.pallets,
            ContainerKind::Bin => &self.bins,
        };
        let mut containers: Vec<&Container> = containers.values().collect();
        containers.sort_by_key(|c| (c.position, c.id));
        containers
    }

    /// The products inside one container, in catalog order.
    pub fn products_of(
        &self,
        kind: ContainerKind,
        container_id: ContainerId,
    ) -> Vec<&ContainerProductRecord> {
        let products = match kind {
            ContainerKind::Pallet => &self.pallet_products,
            ContainerKind::Bin => &self.bin_products,
        };
        let mut products: Vec<&ContainerProductRecord> = products
            .values()
            .filter(|p| p.container_id == container_id)
            .collect();
        products.sort_by_key(|p| (p.position, p.id));
        products
    }

    /// The items of a standalone catalog, in catalog order. Empty for
    /// container product types.
    pub fn standalone_items(&self, item_type: ItemType) -> Vec<&StandaloneItemRecord> {
        let items = match item_type {
            ItemType::Display => &self.displays,
            ItemType::Carton => &self.cartons,
            ItemType::SingleProduct => &self.single_products,
            ItemType::PalletProduct | ItemType::BinProduct => return Vec::new(),
        };
        let mut items: Vec<&StandaloneItemRecord> = items.values().collect();
        items.sort_by_key(|i| (i.position, i.id));
        items
    }

    /// The owning container of a container product known to the catalog.
    pub fn parent_of(&self, item_type: ItemType, item_id: ItemId) -> Option<ContainerId> {
        match item_type {
            ItemType::PalletProduct => self.pallet_products.get(&item_id),
            ItemType::BinProduct => self.bin_products.get(&item_id),
            ItemType::Display | ItemType::Carton | ItemType::SingleProduct => None,
        }
        .map(|product| product.container_id)
    }

    /// Load the catalog entries referenced by `submissions`, plus their
    /// containers.
    ///
    /// The five catalogs are read concurrently, then the two container tables.
    pub async fn load_referenced<D: TableRepository>(
        fetcher: &PagedFetcher<'_, D>,
        submissions: &[SubmissionRecord],
    ) -> Result<Self, ExportError> {
        let ids_of = |item_type: ItemType| {
            distinct(
                submissions
                    .iter()
                    .filter(|s| s.item_type == item_type)
                    .map(|s| s.item_id),
            )
        };

        let (displays, cartons, single_products, pallet_products, bin_products) = try_join!(
            fetcher.fetch_where_in::<StandaloneItemRecord, _>(
                Table::Displays,
                "id",
                ids_of(ItemType::Display)
            ),
            fetcher.fetch_where_in::<StandaloneItemRecord, _>(
                Table::Cartons,
                "id",
                ids_of(ItemType::Carton)
            ),
            fetcher.fetch_where_in::<StandaloneItemRecord, _>(
                Table::SingleProducts,
                "id",
                ids_of(ItemType::SingleProduct)
            ),
            fetcher.fetch_where_in::<ContainerProductRecord, _>(
                Table::PalletProducts,
                "id",
                ids_of(ItemType::PalletProduct)
            ),
            fetcher.fetch_where_in::<ContainerProductRecord, _>(
                Table::BinProducts,
                "id",
                ids_of(ItemType::BinProduct)
            ),
        )?;

        event!(
            Level::DEBUG,
            displays = displays.len(),
            cartons = cartons.len(),
            single_products = single_products.len(),
            pallet_products = pallet_products.len(),
            bin_products = bin_products.len(),
            "resolved referenced items"
        );

        let pallet_ids = distinct(pallet_products.iter().map(|p| p.container_id));
        let bin_ids = distinct(bin_products.iter().map(|p| p.container_id));
        let (pallets, bins) = try_join!(
            fetcher.fetch_where_in::<ContainerRecord, _>(Table::Pallets, "id", pallet_ids),
            fetcher.fetch_where_in::<ContainerRecord, _>(Table::Bins, "id", bin_ids),
        )?;

        Ok(Self::assemble(
            displays,
            cartons,
            single_products,
            pallet_products,
            bin_products,
            pallets,
            bins,
        ))
    }

    /// Load the full catalog of one campaign, each table in catalog order.
    pub async fn load_campaign<D: TableRepository>(
        fetcher: &PagedFetcher<'_, D>,
        campaign_id: CampaignId,
    ) -> Result<Self, ExportError> {
        let of_campaign = |table: Table| {
            TableQuery::new(table)
                .eq("campaign_id", campaign_id)
                .order_by(Order::asc("position"))
        };

        let display_query = of_campaign(Table::Displays);
        let carton_query = of_campaign(Table::Cartons);
        let single_query = of_campaign(Table::SingleProducts);
        let pallet_query = of_campaign(Table::Pallets);
        let bin_query = of_campaign(Table::Bins);
        let (displays, cartons, single_products, pallets, bins) = try_join!(
            fetcher.fetch::<StandaloneItemRecord>(&display_query),
            fetcher.fetch::<StandaloneItemRecord>(&carton_query),
            fetcher.fetch::<StandaloneItemRecord>(&single_query),
            fetcher.fetch::<ContainerRecord>(&pallet_query),
            fetcher.fetch::<ContainerRecord>(&bin_query),
        )?;

        let products_of = |table: Table, containers: &[ContainerRecord]| {
            TableQuery::new(table)
                .within("container_id", containers.iter().map(|c| c.id))
                .order_by(Order::asc("position"))
        };
        let pallet_products_query = products_of(Table::PalletProducts, &pallets);
        let bin_products_query = products_of(Table::BinProducts, &bins);
        let (pallet_products, bin_products) = try_join!(
            async {
                if pallets.is_empty() {
                    Ok(Vec::new())
                } else {
                    fetcher.fetch::<ContainerProductRecord>(&pallet_products_query).await
                }
            },
            async {
                if bins.is_empty() {
                    Ok(Vec::new())
                } else {
                    fetcher.fetch::<ContainerProductRecord>(&bin_products_query).await
                }
            },
        )?;

        Ok(Self::assemble(
            displays,
            cartons,
            single_products,
            pallet_products,
            bin_products,
            pallets,
            bins,
        ))
    }

    fn assemble(
        displays: Vec<StandaloneItemRecord>,
        cartons: Vec<StandaloneItemRecord>,
        single_products: Vec<StandaloneItemRecord>,
        pallet_products: Vec<ContainerProductRecord>,
        bin_products: Vec<ContainerProductRecord>,
        pallets: Vec<ContainerRecord>,
        bins: Vec<ContainerRecord>,
    ) -> Self {
        let mut catalog = Self::default();
        displays
            .into_iter()
            .map(ItemDefinition::Display)
            .chain(cartons.into_iter().map(ItemDefinition::Carton))
            .chain(single_products.into_iter().map(ItemDefinition::SingleProduct))
            .chain(pallet_products.into_iter().map(ItemDefinition::PalletProduct))
            .chain(bin_products.into_iter().map(ItemDefinition::BinProduct))
            .for_each(|definition| catalog.insert(definition));
        pallets
            .into_iter()
            .map(|record| Container::new(ContainerKind::Pallet, record))
            .chain(
                bins.into_iter()
                    .map(|record| Container::new(ContainerKind::Bin, record)),
            )
            .for_each(|container| catalog.insert_container(container));
        catalog
    }
}
