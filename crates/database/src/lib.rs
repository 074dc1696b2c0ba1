//! # Storefront Database Crate
//!
//! This crate owns the persisted shape of a product and every query issued
//! against the `product` table.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** Handlers talk to the `ProductStore` trait, never to SQL. The
//!   MySQL-backed `DbRepository` and the `InMemoryRepository` both implement it.
//! - **Scoped sessions:** every store operation holds exactly one pooled
//!   connection and gives it back when the guard drops, on success and on error.
//! - **Tagged outcomes:** "no such row" and "id already taken" are reported as
//!   `WriteOutcome` values, not errors.
//!
//! ## Public API
//!
//! - `connect` / `ensure_schema`: build the pool and create the table if absent.
//! - `ProductRow`: the storage model, with an explicit mapping from `Product`.
//! - `seed_if_empty`: the startup routine that fills an empty table.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod memory;
pub mod model;
pub mod repository;
pub mod seed;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, ensure_schema};
pub use error::DbError;
pub use memory::InMemoryRepository;
pub use model::ProductRow;
pub use repository::DbRepository;
pub use seed::{SeedOutcome, default_seed_rows, seed_if_empty, seed_with};
pub use store::ProductStore;
