//! Id-keyed lookup maps for the small tables a report joins against.

use crate::{ExportError, PagedFetcher};
use rustc_hash::{FxHashMap, FxHashSet};
use std::hash::Hash;
use tokio::try_join;
use tracing::{Level, event};
use wx_core::{
    models::{AgentId, AgentRecord, CampaignId, CampaignRecord, MarketId, MarketRecord},
    ports::{Table, TableRepository},
};

/// Rendered in place of any name whose row could not be found.
pub const UNKNOWN: &str = "Unbekannt";

/// Rows of one table, keyed by id.
#[derive(Debug, Clone)]
pub struct Lookup<K, R>(FxHashMap<K, R>);

impl<K: Eq + Hash, R> Lookup<K, R> {
    /// Index `rows` by the key `key` extracts.
    pub fn from_rows(rows: Vec<R>, key: impl Fn(&R) -> K) -> Self {
        Self(rows.into_iter().map(|row| (key(&row), row)).collect())
    }

    /// The row with key `id`, if any.
    pub fn get(&self, id: &K) -> Option<&R> {
        self.0.get(id)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no rows were loaded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, R> Default for Lookup<K, R> {
    fn default() -> Self {
        Self(FxHashMap::default())
    }
}

/// The distinct values of `ids`, in first-seen order.
pub fn distinct<T: Eq + Hash + Copy>(ids: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut seen = FxHashSet::default();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

/// Campaign, agent and market rows referenced by a primary record set.
///
/// Ids without a matching row are tolerated; the accessors fall back to
/// [`UNKNOWN`] or an empty string.
#[derive(Debug, Clone, Default)]
pub struct Relations {
    /// Campaigns by id
    pub campaigns: Lookup<CampaignId, CampaignRecord>,
    /// Agents by id
    pub agents: Lookup<AgentId, AgentRecord>,
    /// Markets by id
    pub markets: Lookup<MarketId, MarketRecord>,
}

impl Relations {
    /// Load the referenced rows, one lookup per relation, all concurrently.
    ///
    /// A relation with no ids is skipped without a read.
    pub async fn load<D: TableRepository>(
        fetcher: &PagedFetcher<'_, D>,
        campaign_ids: Vec<CampaignId>,
        agent_ids: Vec<AgentId>,
        market_ids: Vec<MarketId>,
    ) -> Result<Self, ExportError> {
        let (campaigns, agents, markets) = try_join!(
            fetcher.fetch_where_in::<CampaignRecord, _>(Table::Campaigns, "id", campaign_ids),
            fetcher.fetch_where_in::<AgentRecord, _>(Table::Agents, "id", agent_ids),
            fetcher.fetch_where_in::<MarketRecord, _>(Table::Markets, "id", market_ids),
        )?;

        event!(
            Level::DEBUG,
            campaigns = campaigns.len(),
            agents = agents.len(),
            markets = markets.len(),
            "joined relations"
        );

        Ok(Self {
            campaigns: Lookup::from_rows(campaigns, |c| c.id),
            agents: Lookup::from_rows(agents, |a| a.id),
            markets: Lookup::from_rows(markets, |m| m.id),
        })
    }

    /// The campaign's name, or [`UNKNOWN`].
    pub fn campaign_name(&self, id: &CampaignId) -> &str {
        self.campaigns
            .get(id)
            .map(|c| c.name.as_str())
            .unwrap_or(UNKNOWN)
    }

    /// The agent's name, or [`UNKNOWN`].
    pub fn agent_name(&self, id: &AgentId) -> &str {
        self.agents
            .get(id)
            .map(|a| a.name.as_str())
            .unwrap_or(UNKNOWN)
    }

    /// The agent's email, or an empty string.
    pub fn agent_email(&self, id: &AgentId) -> &str {
        self.agents
            .get(id)
            .map(|a| a.email.as_str())
            .unwrap_or_default()
    }

    /// The market's display fields, with fallbacks for a missing row.
    pub fn market(&self, id: &MarketId) -> MarketLabels<'_> {
        match self.markets.get(id) {
            Some(market) => MarketLabels {
                name: &market.name,
                chain: market.chain.as_deref().unwrap_or_default(),
                address: market.address.as_deref().unwrap_or_default(),
                postal_code: market.postal_code.as_deref().unwrap_or_default(),
                city: market.city.as_deref().unwrap_or_default(),
            },
            None => MarketLabels {
                name: UNKNOWN,
                ..Default::default()
            },
        }
    }
}

/// The market fields that appear on report rows.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MarketLabels<'a> {
    /// Market name, or the unknown label
    pub name: &'a str,
    /// Retail chain
    pub chain: &'a str,
    /// Street address
    pub address: &'a str,
    /// Postal code
    pub postal_code: &'a str,
    /// City
    pub city: &'a str,
}
