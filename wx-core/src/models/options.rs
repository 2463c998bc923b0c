use crate::models::{AgentId, CampaignId};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, Time};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// An inclusive range of calendar days, interpreted in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day included
    #[serde(with = "iso_date")]
    pub start: Date,
    /// Last day included
    #[serde(with = "iso_date")]
    pub end: Date,
}

impl DateRange {
    /// Midnight at the start of `start`.
    pub fn lower_bound(&self) -> OffsetDateTime {
        self.start.midnight().assume_utc()
    }

    /// The last millisecond of `end`, so that the whole day is included.
    pub fn upper_bound(&self) -> OffsetDateTime {
        self.end.with_time(END_OF_DAY).assume_utc()
    }
}

const END_OF_DAY: Time = time::macros::time!(23:59:59.999);

/// Narrowing applied to the primary read of a dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportFilters {
    /// Only rows created within this range
    #[serde(default)]
    pub date_range: Option<DateRange>,
    /// Only rows entered by these agents (empty means all)
    #[serde(default)]
    pub agent_ids: Vec<AgentId>,
    /// Only rows belonging to these campaigns (empty means all)
    #[serde(default)]
    pub campaign_ids: Vec<CampaignId>,
}

/// Caller configuration for a dataset export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// The columns to emit, in order
    pub columns: Vec<String>,
    /// Narrowing of the primary read
    #[serde(default)]
    pub filters: ExportFilters,
    /// Emit container groups as a parent row plus one row per member,
    /// instead of a single multi-line row
    #[serde(default)]
    pub expand_container_products: bool,
}
