use super::select_columns;
use crate::{ExportError, PagedFetcher};
use tracing::instrument;
use wx_core::{
    models::{ActionRecord, Cell, ExportOptions, ExportRow},
    ports::{Order, Table, TableQuery, TableRepository},
};

/// The columns of the action history report, in default order.
pub const ACTION_COLUMNS: &[&str] = &[
    "timestamp",
    "action_type",
    "market_id",
    "market_chain",
    "market_address",
    "market_city",
    "market_postal_code",
    "target_agent",
    "previous_agent",
    "performed_by",
    "notes",
];

/// The display label of an assignment action.
pub fn action_label(action_type: &str) -> &'static str {
    match action_type {
        "assign" => "Zuweisen",
        "swap" => "Tauschen",
        _ => "Entfernen",
    }
}

/// Market assignment history, newest first.
#[instrument(level = "debug", skip_all)]
pub async fn export_action_history<D: TableRepository>(
    fetcher: &PagedFetcher<'_, D>,
    options: &ExportOptions,
) -> Result<Vec<ExportRow>, ExportError> {
    let query = TableQuery::new(Table::ActionHistory)
        .during("timestamp", options.filters.date_range.as_ref())
        .order_by(Order::desc("timestamp"))
        .order_by(Order::asc("id"));
    let actions: Vec<ActionRecord> = fetcher.fetch(&query).await?;

    let rows = actions
        .into_iter()
        .map(|action| {
            ExportRow::default()
                .with("timestamp", Cell::timestamp(action.timestamp))
                .with("action_type", action_label(&action.action_type))
                .with("market_id", action.market_id.map(|id| id.to_string()))
                .with("market_chain", action.market_chain)
                .with("market_address", action.market_address)
                .with("market_city", action.market_city)
                .with("market_postal_code", action.market_postal_code)
                .with("target_agent", action.target_agent)
                .with("previous_agent", action.previous_agent)
                .with("performed_by", action.performed_by)
                .with("notes", action.notes)
        })
        .collect();
    Ok(select_columns(rows, &options.columns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("assign", "Zuweisen")]
    #[case("swap", "Tauschen")]
    #[case("remove", "Entfernen")]
    #[case("anything", "Entfernen")]
    fn action_types_are_labelled(#[case] action_type: &str, #[case] label: &str) {
        assert_eq!(action_label(action_type), label);
    }
}
