use super::select_columns;
use crate::{
    ExportError, PagedFetcher,
    join::{Lookup, Relations, UNKNOWN, distinct},
};
use rustc_hash::FxHashMap;
use tokio::try_join;
use tracing::{Level, event, instrument};
use wx_core::{
    models::{
        Cell, EntryId, ExportOptions, ExportRow, PreSaleEntryRecord, PreSaleItemRecord,
        ProductId, ProductRecord,
    },
    ports::{Order, Table, TableQuery, TableRepository},
};

/// The columns of the pre-sale report, in default order.
pub const PRESALE_COLUMNS: &[&str] = &[
    "id",
    "created_at",
    "agent_name",
    "agent_email",
    "market_name",
    "market_chain",
    "market_address",
    "market_postal_code",
    "market_city",
    "reason",
    "status",
    "notes",
    "products_summary",
    "products_json",
];

/// `"Abgeschlossen"` for completed entries, `"Ausstehend"` otherwise.
pub fn presale_status_label(status: &str) -> &'static str {
    if status == "completed" {
        "Abgeschlossen"
    } else {
        "Ausstehend"
    }
}

fn item_type_label(item_type: &str) -> &'static str {
    if item_type == "replace" {
        "Ersatz"
    } else {
        "Entnahme"
    }
}

/// Pre-sale entries, newest first, each with its product lines summarized.
#[instrument(level = "debug", skip_all)]
pub async fn export_presale_entries<D: TableRepository>(
    fetcher: &PagedFetcher<'_, D>,
    options: &ExportOptions,
) -> Result<Vec<ExportRow>, ExportError> {
    let filters = &options.filters;
    let query = TableQuery::new(Table::PreSaleEntries)
        .during("created_at", filters.date_range.as_ref())
        .within_if_any("agent_id", filters.agent_ids.iter().copied())
        .order_by(Order::desc("created_at"))
        .order_by(Order::asc("id"));
    let entries: Vec<PreSaleEntryRecord> = fetcher.fetch(&query).await?;
    if entries.is_empty() {
        return Ok(Vec::new());
    }

    let (relations, items) = try_join!(
        Relations::load(
            fetcher,
            Vec::new(),
            distinct(entries.iter().map(|e| e.agent_id)),
            distinct(entries.iter().map(|e| e.market_id)),
        ),
        fetcher.fetch_where_in::<PreSaleItemRecord, _>(
            Table::PreSaleItems,
            "entry_id",
            entries.iter().map(|e| e.id).collect::<Vec<_>>(),
        ),
    )?;
    let products: Lookup<ProductId, ProductRecord> = Lookup::from_rows(
        fetcher
            .fetch_where_in(
                Table::Products,
                "id",
                distinct(items.iter().map(|i| i.product_id)),
            )
            .await?,
        |p: &ProductRecord| p.id,
    );
    event!(
        Level::DEBUG,
        entries = entries.len(),
        items = items.len(),
        products = products.len(),
        "loaded pre-sale entries"
    );

    let mut items_by_entry: FxHashMap<EntryId, Vec<PreSaleItemRecord>> = FxHashMap::default();
    for item in items {
        items_by_entry.entry(item.entry_id).or_default().push(item);
    }

    let rows = entries
        .into_iter()
        .map(|entry| {
            let items = items_by_entry.remove(&entry.id).unwrap_or_default();
            let product_name = |item: &PreSaleItemRecord| {
                products
                    .get(&item.product_id)
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| UNKNOWN.to_owned())
            };
            let summary = items
                .iter()
                .map(|item| {
                    format!(
                        "{} ({}× {})",
                        product_name(item),
                        item.quantity,
                        item_type_label(&item.item_type)
                    )
                })
                .collect::<Vec<_>>()
                .join(", ");
            let json = serde_json::Value::Array(
                items
                    .iter()
                    .map(|item| {
                        serde_json::json!({
                            "name": product_name(item),
                            "quantity": item.quantity,
                            "type": item.item_type,
                        })
                    })
                    .collect(),
            );

            let market = relations.market(&entry.market_id);
            ExportRow::default()
                .with("id", entry.id.to_string())
                .with("created_at", Cell::timestamp(entry.created_at))
                .with("agent_name", relations.agent_name(&entry.agent_id))
                .with("agent_email", relations.agent_email(&entry.agent_id))
                .with("market_name", market.name)
                .with("market_chain", market.chain)
                .with("market_address", market.address)
                .with("market_postal_code", market.postal_code)
                .with("market_city", market.city)
                .with("reason", entry.reason)
                .with("status", presale_status_label(&entry.status))
                .with("notes", entry.notes)
                .with("products_summary", summary)
                .with("products_json", json.to_string())
        })
        .collect();
    Ok(select_columns(rows, &options.columns))
}
