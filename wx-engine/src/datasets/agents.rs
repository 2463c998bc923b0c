use super::{active_label, select_columns};
use crate::{ExportError, PagedFetcher};
use rustc_hash::FxHashMap;
use tokio::try_join;
use tracing::{Level, event, instrument};
use wx_core::{
    models::{
        AgentId, AgentRecord, Cell, ExportOptions, ExportRow, ItemType, MarketRecord,
        SubmissionRecord,
    },
    ports::{Order, Table, TableQuery, TableRepository},
};

/// The columns of the agent report, in default order.
pub const AGENT_COLUMNS: &[&str] = &[
    "id",
    "name",
    "email",
    "phone",
    "address",
    "city",
    "postal_code",
    "is_active",
    "total_visits",
    "display_count",
    "carton_count",
    "pallet_value",
    "bin_value",
    "created_at",
    "profile_picture_url",
];

/// Per-agent activity totals.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AgentMetrics {
    /// Σ current visits over the agent's markets
    pub total_visits: i64,
    /// Σ quantity of display submissions
    pub display_count: i64,
    /// Σ quantity of carton submissions
    pub carton_count: i64,
    /// Σ quantity × submitted unit price of pallet product submissions
    pub pallet_value: f64,
    /// Σ quantity × submitted unit price of bin product submissions
    pub bin_value: f64,
}

impl AgentMetrics {
    fn count_submission(&mut self, submission: &SubmissionRecord) {
        let quantity = i64::from(submission.quantity);
        let value = f64::from(submission.quantity) * submission.value_per_unit.unwrap_or(0.0);
        match submission.item_type {
            ItemType::Display => self.display_count += quantity,
            ItemType::Carton => self.carton_count += quantity,
            ItemType::PalletProduct => self.pallet_value += value,
            ItemType::BinProduct => self.bin_value += value,
            ItemType::SingleProduct => {}
        }
    }
}

/// Fold markets and submissions into per-agent totals.
pub fn agent_metrics(
    markets: &[MarketRecord],
    submissions: &[SubmissionRecord],
) -> FxHashMap<AgentId, AgentMetrics> {
    let mut metrics: FxHashMap<AgentId, AgentMetrics> = FxHashMap::default();
    for market in markets {
        if let Some(agent_id) = market.agent_id {
            metrics.entry(agent_id).or_default().total_visits +=
                market.current_visits.unwrap_or(0);
        }
    }
    for submission in submissions {
        metrics
            .entry(submission.agent_id)
            .or_default()
            .count_submission(submission);
    }
    metrics
}

/// Active agents, ordered by name, with their activity totals.
#[instrument(level = "debug", skip_all)]
pub async fn export_agents<D: TableRepository>(
    fetcher: &PagedFetcher<'_, D>,
    options: &ExportOptions,
) -> Result<Vec<ExportRow>, ExportError> {
    let query = TableQuery::new(Table::Agents)
        .eq("is_active", true)
        .during("created_at", options.filters.date_range.as_ref())
        .order_by(Order::asc("name"))
        .order_by(Order::asc("id"));
    let agents: Vec<AgentRecord> = fetcher.fetch(&query).await?;
    if agents.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<AgentId> = agents.iter().map(|a| a.id).collect();
    let (markets, submissions) = try_join!(
        fetcher.fetch_where_in::<MarketRecord, _>(Table::Markets, "agent_id", ids.clone()),
        fetcher.fetch_where_in::<SubmissionRecord, _>(Table::Submissions, "agent_id", ids),
    )?;
    event!(
        Level::DEBUG,
        agents = agents.len(),
        markets = markets.len(),
        submissions = submissions.len(),
        "loaded agent activity"
    );

    let metrics = agent_metrics(&markets, &submissions);
    let rows = agents
        .into_iter()
        .map(|agent| {
            let m = metrics.get(&agent.id).copied().unwrap_or_default();
            ExportRow::default()
                .with("id", agent.id.to_string())
                .with("name", agent.name)
                .with("email", agent.email)
                .with("phone", agent.phone)
                .with("address", agent.address)
                .with("city", agent.city)
                .with("postal_code", agent.postal_code)
                .with("is_active", active_label(agent.is_active))
                .with("total_visits", m.total_visits)
                .with("display_count", m.display_count)
                .with("carton_count", m.carton_count)
                .with("pallet_value", m.pallet_value)
                .with("bin_value", m.bin_value)
                .with("created_at", Cell::timestamp(agent.created_at))
                .with("profile_picture_url", agent.profile_picture_url)
        })
        .collect();
    Ok(select_columns(rows, &options.columns))
}
