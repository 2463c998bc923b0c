use crate::ports::{Record, TableQuery};

/// The most rows a data source returns for a single read.
///
/// Reads asking for more are silently capped, which is why every bulk read in
/// the engine pages through a table instead of issuing one large query.
pub const MAX_PAGE_SIZE: usize = 1000;

/// Base trait for data sources, fixing the error type.
pub trait Repository: Sized + Send + Sync {
    /// The error returned by any failed read
    type Error: std::error::Error + Send + Sync + 'static;
}

/// Ranged reads over the tables of the reporting backend.
///
/// This is the only capability the engine needs: filtered, ordered,
/// offset+limit reads. Implementations must return rows in a stable order for
/// a given query so that consecutive ranges neither skip nor repeat rows.
pub trait TableRepository: Repository {
    /// Read at most `limit` rows starting at `offset`.
    ///
    /// Returning fewer than `limit` rows signals the end of the table.
    fn read_range<R: Record>(
        &self,
        query: &TableQuery,
        offset: usize,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<R>, Self::Error>> + Send;
}
