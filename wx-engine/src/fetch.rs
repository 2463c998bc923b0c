use crate::{EngineConfig, ExportError};
use tracing::{Level, event};
use wx_core::ports::{Record, Table, TableQuery, TableRepository, Value};

/// Reads whole tables through a data source that caps every read.
///
/// Pages are requested strictly one after the other, each starting where the
/// previous one ended, until a page comes back short. Any failed read aborts
/// the whole fetch; nothing is retried.
pub struct PagedFetcher<'a, D> {
    db: &'a D,
    page_size: usize,
}

impl<'a, D: TableRepository> PagedFetcher<'a, D> {
    /// Create a fetcher over `db`.
    pub fn new(db: &'a D, config: &EngineConfig) -> Self {
        Self {
            db,
            page_size: config.effective_page_size(),
        }
    }

    /// The number of rows requested per read.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Read every row matching `query`, in query order.
    pub async fn fetch<R: Record>(&self, query: &TableQuery) -> Result<Vec<R>, ExportError> {
        let mut rows = Vec::new();
        let mut offset = 0;
        loop {
            let page: Vec<R> = self
                .db
                .read_range(query, offset, self.page_size)
                .await
                .map_err(ExportError::data_source)?;
            let received = page.len();
            rows.extend(page);
            if received < self.page_size {
                break;
            }
            offset += self.page_size;
        }

        event!(
            Level::DEBUG,
            table = query.table.name(),
            rows = rows.len(),
            "fetched table"
        );
        Ok(rows)
    }

    /// Read the rows of `table` whose `column` is one of `ids`.
    ///
    /// An empty id set short-circuits without touching the data source.
    pub async fn fetch_where_in<R, V>(
        &self,
        table: Table,
        column: &'static str,
        ids: impl IntoIterator<Item = V>,
    ) -> Result<Vec<R>, ExportError>
    where
        R: Record,
        V: Into<Value>,
    {
        let ids: Vec<Value> = ids.into_iter().map(Into::into).collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.fetch(&TableQuery::new(table).within(column, ids))
            .await
    }
}
