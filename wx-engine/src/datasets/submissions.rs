use crate::{
    ExportError, PagedFetcher,
    catalog::ItemCatalog,
    group::group_submissions,
    join::{Relations, distinct},
    rows::{RenderMode, RowAssembler},
};
use tokio::try_join;
use tracing::{Level, event, instrument};
use wx_core::{
    models::{ExportOptions, ExportRow, SubmissionRecord},
    ports::{Order, Table, TableQuery, TableRepository},
};

/// Submissions, newest first, with container drop-offs bundled.
#[instrument(level = "debug", skip_all)]
pub async fn export_submissions<D: TableRepository>(
    fetcher: &PagedFetcher<'_, D>,
    options: &ExportOptions,
) -> Result<Vec<ExportRow>, ExportError> {
    let filters = &options.filters;
    let query = TableQuery::new(Table::Submissions)
        .during("created_at", filters.date_range.as_ref())
        .within_if_any("agent_id", filters.agent_ids.iter().copied())
        .within_if_any("campaign_id", filters.campaign_ids.iter().copied())
        .order_by(Order::desc("created_at"))
        .order_by(Order::asc("id"));
    let submissions: Vec<SubmissionRecord> = fetcher.fetch(&query).await?;
    if submissions.is_empty() {
        return Ok(Vec::new());
    }

    let (relations, catalog) = try_join!(
        Relations::load(
            fetcher,
            distinct(submissions.iter().map(|s| s.campaign_id)),
            distinct(submissions.iter().map(|s| s.agent_id)),
            distinct(submissions.iter().map(|s| s.market_id)),
        ),
        ItemCatalog::load_referenced(fetcher, &submissions),
    )?;

    let unresolved = submissions
        .iter()
        .filter(|s| !catalog.contains(&s.item_id))
        .count();
    if unresolved > 0 {
        event!(Level::WARN, unresolved, "submissions reference unknown items");
    }

    let bundles = group_submissions(&submissions, &catalog);
    let mode = RenderMode::from_expand_flag(options.expand_container_products);
    let rows = RowAssembler::new(&relations, mode).assemble(&bundles);

    event!(
        Level::DEBUG,
        submissions = submissions.len(),
        bundles = bundles.len(),
        rows = rows.len(),
        "assembled submission rows"
    );
    Ok(super::select_columns(rows, &options.columns))
}
