use crate::error::DbError;
use crate::model::ProductRow;
use async_trait::async_trait;
use core_types::{Product, WriteOutcome};

/// A generic trait for product persistence.
///
/// Handlers depend on this trait only, which lets the server run against MySQL
/// in production and against an in-memory table in tests and local runs.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All rows, in the backend's natural order.
    async fn list_all(&self) -> Result<Vec<ProductRow>, DbError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductRow>, DbError>;

    /// The first row whose name matches, ignoring case as MySQL's default
    /// collation does.
    async fn find_by_name(&self, name: &str) -> Result<Option<ProductRow>, DbError>;

    /// Persists a new row keyed by `product.id`.
    ///
    /// Returns `Conflict` instead of overwriting when the id is taken.
    async fn insert(&self, product: &Product) -> Result<WriteOutcome, DbError>;

    /// Replaces every non-key field of the row stored under `id`.
    async fn update(&self, id: i32, product: &Product) -> Result<WriteOutcome, DbError>;

    async fn delete(&self, id: i32) -> Result<WriteOutcome, DbError>;

    /// Deletes the first row whose name matches, with the same case rules as
    /// `find_by_name`.
    async fn delete_by_name(&self, name: &str) -> Result<WriteOutcome, DbError>;

    async fn count(&self) -> Result<u64, DbError>;

    /// Inserts all rows or none of them.
    async fn insert_batch(&self, rows: &[ProductRow]) -> Result<(), DbError>;
}
