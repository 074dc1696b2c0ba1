pub mod error;
pub mod product;
pub mod validation;

// Re-export the core types to provide a clean public API.
pub use error::{FieldError, FieldErrorKind, ValidationError};
pub use product::{Product, WriteOutcome};
pub use validation::validate_product;
