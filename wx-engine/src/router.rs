//! Dispatch from a dataset identifier to its transformer.

use crate::{EngineConfig, ExportError, PagedFetcher, datasets, rows};
use tracing::instrument;
use wx_core::{
    models::{ExportOptions, ExportRow},
    ports::TableRepository,
};

/// The datasets that can be exported as flat rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    /// Campaign submissions with container drop-offs bundled
    Submissions,
    /// Markets with their assigned agent
    Markets,
    /// Pre-sale entries with their product lines
    PreSaleEntries,
    /// Market assignment history
    ActionHistory,
    /// Active agents with activity totals
    Agents,
}

impl Dataset {
    /// Every dataset, in listing order.
    pub const ALL: [Dataset; 5] = [
        Dataset::Submissions,
        Dataset::Markets,
        Dataset::PreSaleEntries,
        Dataset::ActionHistory,
        Dataset::Agents,
    ];

    /// The identifier callers use to select the dataset.
    pub fn as_str(self) -> &'static str {
        match self {
            Dataset::Submissions => "submissions",
            Dataset::Markets => "markets",
            Dataset::PreSaleEntries => "presale_entries",
            Dataset::ActionHistory => "action_history",
            Dataset::Agents => "agents",
        }
    }

    /// Every column the dataset can emit, in default order.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Dataset::Submissions => rows::SUBMISSION_COLUMNS,
            Dataset::Markets => datasets::MARKET_COLUMNS,
            Dataset::PreSaleEntries => datasets::PRESALE_COLUMNS,
            Dataset::ActionHistory => datasets::ACTION_COLUMNS,
            Dataset::Agents => datasets::AGENT_COLUMNS,
        }
    }

    /// Run the dataset's transformer.
    pub async fn transform<D: TableRepository>(
        self,
        fetcher: &PagedFetcher<'_, D>,
        options: &ExportOptions,
    ) -> Result<Vec<ExportRow>, ExportError> {
        match self {
            Dataset::Submissions => datasets::export_submissions(fetcher, options).await,
            Dataset::Markets => datasets::export_markets(fetcher, options).await,
            Dataset::PreSaleEntries => datasets::export_presale_entries(fetcher, options).await,
            Dataset::ActionHistory => datasets::export_action_history(fetcher, options).await,
            Dataset::Agents => datasets::export_agents(fetcher, options).await,
        }
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Dataset {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dataset::ALL
            .into_iter()
            .find(|dataset| dataset.as_str() == s)
            .ok_or_else(|| ExportError::UnknownDataset(s.to_owned()))
    }
}

/// Export `dataset_id` as flat rows.
///
/// Fails with [`ExportError::UnknownDataset`] before touching the data source
/// if the identifier is not recognized.
#[instrument(level = "debug", skip(db, config, options))]
pub async fn transform_dataset<D: TableRepository>(
    db: &D,
    config: &EngineConfig,
    dataset_id: &str,
    options: &ExportOptions,
) -> Result<Vec<ExportRow>, ExportError> {
    let dataset: Dataset = dataset_id.parse()?;
    let fetcher = PagedFetcher::new(db, config);
    dataset.transform(&fetcher, options).await
}
