use serde::{Deserialize, Serialize};

/// The wire representation of a catalog item.
///
/// Every field is required. `id` is supplied by the caller and is never
/// generated by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i32,
}

/// The result of a single-row mutation.
///
/// Stores report "nothing to change" and "key already taken" as values rather
/// than errors so that handlers can branch on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The row was inserted, updated or deleted.
    Applied,
    /// No row with the requested key exists.
    NotFound,
    /// A row with the same primary key already exists.
    Conflict,
}
