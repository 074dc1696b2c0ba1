use core_types::Product;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents a row of the `product` table.
///
/// Only `id` is constrained by the schema; the other columns are nullable, so a
/// row written outside this service may carry `None` in any of them.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ProductRow {
    pub id: i32,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
}

impl ProductRow {
    /// Maps a validated wire product onto a row stored under `id`.
    ///
    /// The key is passed separately because updates keep the row's existing id
    /// regardless of the id in the request body.
    pub fn from_product(id: i32, product: &Product) -> Self {
        Self {
            id,
            name: Some(product.name.clone()),
            description: Some(product.description.clone()),
            price: Some(product.price),
            quantity: Some(product.quantity),
        }
    }
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self::from_product(product.id, product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_keeps_every_field() {
        let product = Product {
            id: 2,
            name: "Mouse".into(),
            description: "wireless".into(),
            price: 20.0,
            quantity: 100,
        };

        let row = ProductRow::from(&product);
        assert_eq!(row.id, 2);
        assert_eq!(row.name.as_deref(), Some("Mouse"));
        assert_eq!(row.description.as_deref(), Some("wireless"));
        assert_eq!(row.price, Some(20.0));
        assert_eq!(row.quantity, Some(100));
    }

    #[test]
    fn explicit_id_wins_over_payload_id() {
        let product = Product {
            id: 99,
            name: "Phone Pro".into(),
            description: "samsung".into(),
            price: 1.0,
            quantity: 1,
        };
        assert_eq!(ProductRow::from_product(1, &product).id, 1);
    }
}
