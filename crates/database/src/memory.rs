use crate::error::DbError;
use crate::model::ProductRow;
use crate::store::ProductStore;
use async_trait::async_trait;
use core_types::{Product, WriteOutcome};
use tokio::sync::RwLock;

/// A `ProductStore` that keeps rows in process memory, in insertion order.
///
/// Used for local runs without a database server and throughout the test suite.
/// Holding the write lock for a whole operation plays the role of a session.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    rows: RwLock<Vec<ProductRow>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `rows`, bypassing duplicate checks.
    pub fn with_rows(rows: Vec<ProductRow>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }
}

/// Case-insensitive comparison, matching MySQL's default `_ci` collation.
fn same_name(stored: Option<&str>, wanted: &str) -> bool {
    stored.is_some_and(|s| s.to_lowercase() == wanted.to_lowercase())
}

#[async_trait]
impl ProductStore for InMemoryRepository {
    async fn list_all(&self) -> Result<Vec<ProductRow>, DbError> {
        Ok(self.rows.read().await.clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductRow>, DbError> {
        Ok(self.rows.read().await.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<ProductRow>, DbError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .find(|r| same_name(r.name.as_deref(), name))
            .cloned())
    }

    async fn insert(&self, product: &Product) -> Result<WriteOutcome, DbError> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|r| r.id == product.id) {
            return Ok(WriteOutcome::Conflict);
        }
        rows.push(ProductRow::from(product));
        Ok(WriteOutcome::Applied)
    }

    async fn update(&self, id: i32, product: &Product) -> Result<WriteOutcome, DbError> {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|r| r.id == id) {
            Some(row) => {
                *row = ProductRow::from_product(id, product);
                Ok(WriteOutcome::Applied)
            }
            None => Ok(WriteOutcome::NotFound),
        }
    }

    async fn delete(&self, id: i32) -> Result<WriteOutcome, DbError> {
        let mut rows = self.rows.write().await;
        match rows.iter().position(|r| r.id == id) {
            Some(index) => {
                rows.remove(index);
                Ok(WriteOutcome::Applied)
            }
            None => Ok(WriteOutcome::NotFound),
        }
    }

    async fn delete_by_name(&self, name: &str) -> Result<WriteOutcome, DbError> {
        let mut rows = self.rows.write().await;
        match rows.iter().position(|r| same_name(r.name.as_deref(), name)) {
            Some(index) => {
                rows.remove(index);
                Ok(WriteOutcome::Applied)
            }
            None => Ok(WriteOutcome::NotFound),
        }
    }

    async fn count(&self) -> Result<u64, DbError> {
        Ok(self.rows.read().await.len() as u64)
    }

    async fn insert_batch(&self, batch: &[ProductRow]) -> Result<(), DbError> {
        let mut rows = self.rows.write().await;
        // Validate the whole batch before touching the table so a failure leaves it unchanged.
        for (i, row) in batch.iter().enumerate() {
            let taken = rows.iter().any(|r| r.id == row.id)
                || batch[..i].iter().any(|r| r.id == row.id);
            if taken {
                return Err(DbError::DuplicateId(row.id));
            }
        }
        rows.extend_from_slice(batch);
        Ok(())
    }
}
