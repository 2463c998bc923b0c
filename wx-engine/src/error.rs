use thiserror::Error;
use wx_core::models::CampaignId;

/// Everything that can abort an export. There is no partial-success mode: a
/// caller receives either a complete result or one of these.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The requested campaign does not exist
    #[error("campaign {0} not found")]
    NotFound(CampaignId),

    /// A read against the data source failed
    #[error("data source error: {0}")]
    DataSource(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The dataset identifier is not one we know how to export
    #[error("unknown dataset: {0}")]
    UnknownDataset(String),
}

impl ExportError {
    pub(crate) fn data_source<E: std::error::Error + Send + Sync + 'static>(error: E) -> Self {
        ExportError::DataSource(Box::new(error))
    }
}
