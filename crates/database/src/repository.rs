use crate::error::DbError;
use crate::model::ProductRow;
use crate::store::ProductStore;
use async_trait::async_trait;
use core_types::{Product, WriteOutcome};
use sqlx::mysql::{MySqlConnection, MySqlPool};

/// The `DbRepository` is the MySQL-backed `ProductStore`. It encapsulates all
/// SQL issued against the `product` table.
///
/// Every method acquires its own pooled connection and releases it when the
/// guard goes out of scope, whichever way the method returns.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: MySqlPool,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

async fn find_row(conn: &mut MySqlConnection, id: i32) -> Result<Option<ProductRow>, sqlx::Error> {
    sqlx::query_as::<_, ProductRow>(
        "SELECT id, name, description, price, quantity FROM product WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(conn)
    .await
}

async fn find_row_by_name(
    conn: &mut MySqlConnection,
    name: &str,
) -> Result<Option<ProductRow>, sqlx::Error> {
    sqlx::query_as::<_, ProductRow>(
        "SELECT id, name, description, price, quantity FROM product WHERE name = ? LIMIT 1",
    )
    .bind(name)
    .fetch_optional(conn)
    .await
}

async fn insert_row(conn: &mut MySqlConnection, row: &ProductRow) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO product (id, name, description, price, quantity) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(row.id)
    .bind(&row.name)
    .bind(&row.description)
    .bind(row.price)
    .bind(row.quantity)
    .execute(conn)
    .await?;
    Ok(())
}

async fn delete_row(conn: &mut MySqlConnection, id: i32) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM product WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(())
}

#[async_trait]
impl ProductStore for DbRepository {
    async fn list_all(&self) -> Result<Vec<ProductRow>, DbError> {
        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, description, price, quantity FROM product",
        )
        .fetch_all(&mut *conn)
        .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductRow>, DbError> {
        let mut conn = self.pool.acquire().await?;
        Ok(find_row(&mut conn, id).await?)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<ProductRow>, DbError> {
        let mut conn = self.pool.acquire().await?;
        Ok(find_row_by_name(&mut conn, name).await?)
    }

    async fn insert(&self, product: &Product) -> Result<WriteOutcome, DbError> {
        let mut conn = self.pool.acquire().await?;
        let row = ProductRow::from(product);
        match insert_row(&mut conn, &row).await {
            Ok(()) => Ok(WriteOutcome::Applied),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                tracing::debug!(id = row.id, "Insert rejected: duplicate primary key.");
                Ok(WriteOutcome::Conflict)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn update(&self, id: i32, product: &Product) -> Result<WriteOutcome, DbError> {
        let mut conn = self.pool.acquire().await?;
        if find_row(&mut conn, id).await?.is_none() {
            return Ok(WriteOutcome::NotFound);
        }

        let row = ProductRow::from_product(id, product);
        sqlx::query(
            "UPDATE product SET name = ?, description = ?, price = ?, quantity = ? WHERE id = ?",
        )
        .bind(&row.name)
        .bind(&row.description)
        .bind(row.price)
        .bind(row.quantity)
        .bind(row.id)
        .execute(&mut *conn)
        .await?;
        Ok(WriteOutcome::Applied)
    }

    async fn delete(&self, id: i32) -> Result<WriteOutcome, DbError> {
        let mut conn = self.pool.acquire().await?;
        if find_row(&mut conn, id).await?.is_none() {
            return Ok(WriteOutcome::NotFound);
        }
        delete_row(&mut conn, id).await?;
        Ok(WriteOutcome::Applied)
    }

    async fn delete_by_name(&self, name: &str) -> Result<WriteOutcome, DbError> {
        let mut conn = self.pool.acquire().await?;
        let Some(row) = find_row_by_name(&mut conn, name).await? else {
            return Ok(WriteOutcome::NotFound);
        };
        delete_row(&mut conn, row.id).await?;
        Ok(WriteOutcome::Applied)
    }

    async fn count(&self) -> Result<u64, DbError> {
        let mut conn = self.pool.acquire().await?;
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product")
            .fetch_one(&mut *conn)
            .await?;
        Ok(count.max(0) as u64)
    }

    async fn insert_batch(&self, rows: &[ProductRow]) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;
        for row in rows {
            if let Err(e) = insert_row(&mut tx, row).await {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!(error = %rollback_err, "Rollback of product batch failed.");
                }
                return Err(e.into());
            }
        }
        tx.commit().await?;
        Ok(())
    }
}
