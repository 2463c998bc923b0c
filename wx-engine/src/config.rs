//! Engine tuning knobs.

use serde::{Deserialize, Serialize};
use wx_core::ports::MAX_PAGE_SIZE;

/// Configuration for the export engine.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Rows requested per paged read. Values above the data source's cap are
    /// clamped to it.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    MAX_PAGE_SIZE
}

impl EngineConfig {
    /// The page size actually used, between 1 and [`MAX_PAGE_SIZE`].
    pub fn effective_page_size(&self) -> usize {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}
