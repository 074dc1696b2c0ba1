use crate::model::ProductRow;
use crate::store::ProductStore;

/// What the startup seeding routine did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The table already held rows and was left alone.
    Skipped { existing: u64 },
    Seeded { inserted: usize },
    /// A storage failure occurred; the batch was rolled back and logged.
    Failed,
}

/// The three catalog rows an empty table is filled with.
pub fn default_seed_rows() -> Vec<ProductRow> {
    vec![
        seed_row(1, "phone", "samsung", 54000.3, 15),
        seed_row(4, "Laptop", "samsung", 740000.0, 5),
        seed_row(3, "Charger", "Mobile Charger", 52.0, 32),
    ]
}

fn seed_row(id: i32, name: &str, description: &str, price: f64, quantity: i32) -> ProductRow {
    ProductRow {
        id,
        name: Some(name.to_string()),
        description: Some(description.to_string()),
        price: Some(price),
        quantity: Some(quantity),
    }
}

/// Seeds the default catalog if and only if the table is empty.
pub async fn seed_if_empty(store: &dyn ProductStore) -> SeedOutcome {
    seed_with(store, &default_seed_rows()).await
}

/// Inserts `rows` as one batch if the table is empty.
///
/// Never fails: storage errors are logged and reported as `SeedOutcome::Failed`
/// so that startup can continue.
pub async fn seed_with(store: &dyn ProductStore, rows: &[ProductRow]) -> SeedOutcome {
    let existing = match store.count().await {
        Ok(n) => n,
        Err(e) => {
            tracing::error!(error = %e, "Error initializing database: could not count products.");
            return SeedOutcome::Failed;
        }
    };

    if existing > 0 {
        tracing::info!(existing, "Database already has products. Skipping initialization.");
        return SeedOutcome::Skipped { existing };
    }

    tracing::info!(rows = rows.len(), "Initializing database with sample data...");
    match store.insert_batch(rows).await {
        Ok(()) => {
            tracing::info!("Database initialized successfully.");
            SeedOutcome::Seeded {
                inserted: rows.len(),
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Error initializing database; changes rolled back.");
            SeedOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryRepository;

    #[tokio::test]
    async fn seeds_an_empty_table() {
        let store = InMemoryRepository::new();
        let outcome = seed_if_empty(&store).await;
        assert_eq!(outcome, SeedOutcome::Seeded { inserted: 3 });

        let mut ids: Vec<i32> = store.list_all().await.unwrap().iter().map(|r| r.id).collect();
        ids.sort();
        assert_eq!(ids, vec![1, 3, 4]);

        let phone = store.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(phone.name.as_deref(), Some("phone"));
        assert_eq!(phone.price, Some(54000.3));
        assert_eq!(phone.quantity, Some(15));
    }

    #[tokio::test]
    async fn second_run_is_a_no_op() {
        let store = InMemoryRepository::new();
        seed_if_empty(&store).await;
        store.delete(4).await.unwrap();

        let outcome = seed_if_empty(&store).await;
        assert_eq!(outcome, SeedOutcome::Skipped { existing: 2 });
        assert_eq!(store.count().await.unwrap(), 2);
        assert!(store.find_by_id(4).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn non_empty_table_with_foreign_rows_is_left_alone() {
        let store = InMemoryRepository::with_rows(vec![seed_row(9, "Mouse", "wireless", 20.0, 100)]);
        assert_eq!(seed_if_empty(&store).await, SeedOutcome::Skipped { existing: 1 });
        assert!(store.find_by_id(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn storage_failure_is_swallowed_and_rolled_back() {
        let store = InMemoryRepository::new();
        let rows = vec![
            seed_row(1, "a", "a", 1.0, 1),
            seed_row(1, "b", "b", 2.0, 2),
        ];

        assert_eq!(seed_with(&store, &rows).await, SeedOutcome::Failed);
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
