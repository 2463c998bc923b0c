//! Recovery of submissions whose catalog item has since been removed from the
//! campaign.
//!
//! Catalog tables keep rows after they are unlinked from a campaign, so most
//! orphans can still be named and priced by reading the catalogs by id.

use crate::{ExportError, PagedFetcher, catalog::ItemCatalog, color::NO_COLOR};
use rustc_hash::{FxHashMap, FxHashSet};
use tokio::try_join;
use tracing::{Level, event};
use wx_core::{
    models::{
        ContainerProductRecord, ItemId, ItemType, StandaloneItemRecord, SubmissionRecord, WaveItem,
    },
    ports::{Table, TableRepository},
};

/// An item id referenced by submissions but missing from the live catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orphan {
    /// The missing item
    pub item_id: ItemId,
    /// The type recorded on the first submission referencing the item
    pub item_type: ItemType,
}

/// The name given to an orphan no catalog knows anymore.
pub fn placeholder_name(item_id: ItemId) -> String {
    format!("Gelöschtes Produkt ({})", item_id.short())
}

/// Distinct orphaned item ids in order of first reference.
pub fn find_orphans(submissions: &[SubmissionRecord], catalog: &ItemCatalog) -> Vec<Orphan> {
    let mut seen = FxHashSet::default();
    submissions
        .iter()
        .filter(|s| !catalog.contains(&s.item_id))
        .filter(|s| seen.insert(s.item_id))
        .map(|s| Orphan {
            item_id: s.item_id,
            item_type: s.item_type,
        })
        .collect()
}

/// Build a freestanding matrix row for every orphan.
///
/// All five catalogs are read by the orphaned ids concurrently. An id found in
/// several catalogs takes the last match in the order pallet products, bin
/// products, displays, cartons, single products. Ids found nowhere get a
/// placeholder name and a zero price.
pub async fn recover_orphans<D: TableRepository>(
    fetcher: &PagedFetcher<'_, D>,
    orphans: &[Orphan],
) -> Result<Vec<WaveItem>, ExportError> {
    if orphans.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<ItemId> = orphans.iter().map(|o| o.item_id).collect();
    let (pallet_products, bin_products, displays, cartons, single_products) = try_join!(
        fetcher.fetch_where_in::<ContainerProductRecord, _>(
            Table::PalletProducts,
            "id",
            ids.clone()
        ),
        fetcher.fetch_where_in::<ContainerProductRecord, _>(Table::BinProducts, "id", ids.clone()),
        fetcher.fetch_where_in::<StandaloneItemRecord, _>(Table::Displays, "id", ids.clone()),
        fetcher.fetch_where_in::<StandaloneItemRecord, _>(Table::Cartons, "id", ids.clone()),
        fetcher.fetch_where_in::<StandaloneItemRecord, _>(Table::SingleProducts, "id", ids),
    )?;

    let mut found: FxHashMap<ItemId, (ItemType, String, f64)> = FxHashMap::default();
    let container_products = [
        (ItemType::PalletProduct, pallet_products),
        (ItemType::BinProduct, bin_products),
    ];
    for (item_type, rows) in container_products {
        for row in rows {
            found.insert(
                row.id,
                (item_type, row.name, row.value_per_unit.unwrap_or(0.0)),
            );
        }
    }
    let standalone = [
        (ItemType::Display, displays),
        (ItemType::Carton, cartons),
        (ItemType::SingleProduct, single_products),
    ];
    for (item_type, rows) in standalone {
        for row in rows {
            found.insert(row.id, (item_type, row.name, row.item_value.unwrap_or(0.0)));
        }
    }

    let mut unrecoverable = 0;
    let mut recovered = Vec::with_capacity(orphans.len());
    for orphan in orphans {
        let (item_type, name, price_per_unit) = match found.remove(&orphan.item_id) {
            Some(entry) => entry,
            None => {
                unrecoverable += 1;
                (orphan.item_type, placeholder_name(orphan.item_id), 0.0)
            }
        };
        recovered.push(WaveItem {
            id: orphan.item_id,
            name,
            item_type,
            price_per_unit,
            parent_id: None,
            parent_name: None,
            parent_kind: None,
            color_group: NO_COLOR,
            is_parent: false,
        });
    }

    event!(
        Level::WARN,
        orphans = orphans.len(),
        unrecoverable,
        "recovered orphaned submissions"
    );
    Ok(recovered)
}
