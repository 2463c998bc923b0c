//! Transformers turning one primary table, plus whatever it references, into
//! flat report rows.
//!
//! Every transformer returns an empty list when the primary read comes back
//! empty, and narrows its rows to the caller's columns last.

mod actions;
mod agents;
mod markets;
mod presale;
mod submissions;

pub use actions::{ACTION_COLUMNS, action_label, export_action_history};
pub use agents::{AGENT_COLUMNS, AgentMetrics, agent_metrics, export_agents};
pub use markets::{MARKET_COLUMNS, export_markets};
pub use presale::{PRESALE_COLUMNS, export_presale_entries, presale_status_label};
pub use submissions::export_submissions;

use wx_core::models::ExportRow;

/// Narrow every row to `columns`, in that order.
pub(crate) fn select_columns(rows: Vec<ExportRow>, columns: &[String]) -> Vec<ExportRow> {
    rows.into_iter()
        .map(|row| row.retain_columns(columns))
        .collect()
}

/// `"Aktiv"` or `"Inaktiv"`.
pub fn active_label(is_active: bool) -> &'static str {
    if is_active { "Aktiv" } else { "Inaktiv" }
}
