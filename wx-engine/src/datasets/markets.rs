use super::{active_label, select_columns};
use crate::{ExportError, PagedFetcher};
use tracing::instrument;
use wx_core::{
    models::{Cell, ExportOptions, ExportRow, MarketRecord},
    ports::{Order, Table, TableQuery, TableRepository},
};

/// The columns of the market report, in default order.
pub const MARKET_COLUMNS: &[&str] = &[
    "id",
    "internal_id",
    "name",
    "chain",
    "address",
    "city",
    "postal_code",
    "agent_name",
    "agent_email",
    "agent_id",
    "frequency",
    "current_visits",
    "last_visit_date",
    "is_active",
    "phone",
    "email",
    "channel",
    "banner",
    "subgroup",
    "created_at",
];

/// All markets, ordered by name.
#[instrument(level = "debug", skip_all)]
pub async fn export_markets<D: TableRepository>(
    fetcher: &PagedFetcher<'_, D>,
    options: &ExportOptions,
) -> Result<Vec<ExportRow>, ExportError> {
    let filters = &options.filters;
    let query = TableQuery::new(Table::Markets)
        .during("created_at", filters.date_range.as_ref())
        .within_if_any("agent_id", filters.agent_ids.iter().copied())
        .order_by(Order::asc("name"))
        .order_by(Order::asc("id"));
    let markets: Vec<MarketRecord> = fetcher.fetch(&query).await?;

    let rows = markets.into_iter().map(market_row).collect();
    Ok(select_columns(rows, &options.columns))
}

fn market_row(market: MarketRecord) -> ExportRow {
    ExportRow::default()
        .with("id", market.id.to_string())
        .with("internal_id", market.internal_id)
        .with("name", market.name)
        .with("chain", market.chain)
        .with("address", market.address)
        .with("city", market.city)
        .with("postal_code", market.postal_code)
        .with("agent_name", market.agent_name)
        .with("agent_email", market.agent_email)
        .with("agent_id", market.agent_id.map(|id| id.to_string()))
        .with("frequency", market.frequency.unwrap_or(0))
        .with("current_visits", market.current_visits.unwrap_or(0))
        .with("last_visit_date", market.last_visit_date)
        .with("is_active", active_label(market.is_active))
        .with("phone", market.phone)
        .with("email", market.email)
        .with("channel", market.channel)
        .with("banner", market.banner)
        .with("subgroup", market.subgroup)
        .with("created_at", Cell::timestamp(market.created_at))
}
