#![allow(dead_code)]

use serde_json::Value as Json;
use std::{
    cmp::Ordering,
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering as AtomicOrdering},
};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use wx_core::ports::{Filter, Record, Repository, Table, TableQuery, TableRepository};

#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    #[error("table {0} is unavailable")]
    Unavailable(Table),
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
}

/// Tables held as JSON rows in insertion order, which doubles as the tiebreak
/// order for sorting.
#[derive(Default)]
pub struct MemoryRepository {
    tables: HashMap<Table, Vec<Json>>,
    unavailable: Option<Table>,
    reads: AtomicUsize,
}

impl MemoryRepository {
    pub fn insert<R: Record>(&mut self, table: Table, rows: impl IntoIterator<Item = R>) {
        let entries = self.tables.entry(table).or_default();
        for row in rows {
            entries.push(serde_json::to_value(&row).unwrap());
        }
    }

    pub fn fail_reads_of(&mut self, table: Table) {
        self.unavailable = Some(table);
    }

    pub fn reads(&self) -> usize {
        self.reads.load(AtomicOrdering::SeqCst)
    }

    fn read_now<R: Record>(
        &self,
        query: &TableQuery,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<R>, MemoryError> {
        self.reads.fetch_add(1, AtomicOrdering::SeqCst);
        if self.unavailable == Some(query.table) {
            return Err(MemoryError::Unavailable(query.table));
        }

        let mut rows: Vec<&Json> = self
            .tables
            .get(&query.table)
            .map(|rows| rows.iter().collect())
            .unwrap_or_default();
        rows.retain(|row| query.filters.iter().all(|filter| matches(row, filter)));
        rows.sort_by(|a, b| {
            query
                .order
                .iter()
                .map(|order| {
                    let ordering = compare(&a[order.column], &b[order.column]);
                    if order.ascending {
                        ordering
                    } else {
                        ordering.reverse()
                    }
                })
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        });

        rows.into_iter()
            .skip(offset)
            .take(limit)
            .map(|row| Ok(serde_json::from_value(row.clone())?))
            .collect()
    }
}

fn timestamp(value: &Json) -> Option<OffsetDateTime> {
    value
        .as_str()
        .and_then(|s| OffsetDateTime::parse(s, &Rfc3339).ok())
}

fn matches(row: &Json, filter: &Filter) -> bool {
    match filter {
        Filter::Eq(column, value) => row[*column] == serde_json::to_value(value).unwrap(),
        Filter::In(column, values) => values
            .iter()
            .any(|value| row[*column] == serde_json::to_value(value).unwrap()),
        Filter::Since(column, instant) => timestamp(&row[*column]).is_some_and(|t| t >= *instant),
        Filter::Until(column, instant) => timestamp(&row[*column]).is_some_and(|t| t <= *instant),
    }
}

fn compare(a: &Json, b: &Json) -> Ordering {
    if let (Some(a), Some(b)) = (timestamp(a), timestamp(b)) {
        return a.cmp(&b);
    }
    match (a, b) {
        (Json::Null, Json::Null) => Ordering::Equal,
        (Json::Null, _) => Ordering::Less,
        (_, Json::Null) => Ordering::Greater,
        (Json::Number(a), Json::Number(b)) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Json::String(a), Json::String(b)) => a.cmp(b),
        (Json::Bool(a), Json::Bool(b)) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

impl Repository for MemoryRepository {
    type Error = MemoryError;
}

impl TableRepository for MemoryRepository {
    fn read_range<R: Record>(
        &self,
        query: &TableQuery,
        offset: usize,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<R>, Self::Error>> + Send {
        std::future::ready(self.read_now(query, offset, limit))
    }
}

pub mod fixtures {
    use time::OffsetDateTime;
    use wx_core::models::*;

    pub fn id<T: From<uuid::Uuid>>() -> T {
        uuid::Uuid::new_v4().into()
    }

    pub fn campaign(name: &str) -> CampaignRecord {
        CampaignRecord {
            id: id(),
            name: name.to_owned(),
            goal_type: Some("value".to_owned()),
        }
    }

    pub fn market(name: &str) -> MarketRecord {
        serde_json::from_value(serde_json::json!({
            "id": id::<MarketId>(),
            "name": name,
            "chain": "Spar",
            "city": "Wien",
            "is_active": true,
            "created_at": "2024-01-01T00:00:00Z",
        }))
        .unwrap()
    }

    pub fn standalone(campaign_id: CampaignId, name: &str, price: f64, position: i64) -> StandaloneItemRecord {
        StandaloneItemRecord {
            id: id(),
            campaign_id,
            name: name.to_owned(),
            item_value: Some(price),
            position,
        }
    }

    pub fn container(campaign_id: CampaignId, name: &str, position: i64) -> ContainerRecord {
        ContainerRecord {
            id: id(),
            campaign_id,
            name: name.to_owned(),
            size: None,
            position,
        }
    }

    pub fn product(container: &ContainerRecord, name: &str, price: f64, position: i64) -> ContainerProductRecord {
        ContainerProductRecord {
            id: id(),
            container_id: container.id,
            name: name.to_owned(),
            value_per_unit: Some(price),
            position,
        }
    }

    pub struct Submit {
        pub campaign_id: CampaignId,
        pub agent_id: AgentId,
        pub market_id: MarketId,
    }

    impl Submit {
        pub fn item(
            &self,
            item_type: ItemType,
            item_id: ItemId,
            created_at: OffsetDateTime,
            quantity: u32,
        ) -> SubmissionRecord {
            SubmissionRecord {
                id: id(),
                created_at,
                item_type,
                item_id,
                market_id: self.market_id,
                agent_id: self.agent_id,
                campaign_id: self.campaign_id,
                quantity,
                value_per_unit: None,
                photo_url: None,
                delivery_photo_url: None,
            }
        }
    }
}
