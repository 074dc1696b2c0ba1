use crate::error::AppError;
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use core_types::{validate_product, Product};
use serde_json::Value;

/// A request body that passed the product schema validator.
///
/// The body is first parsed as untyped JSON so that every offending field can
/// be reported at once, instead of stopping at the first serde error.
#[derive(Debug, Clone)]
pub struct ValidatedProduct(pub Product);

#[async_trait]
impl<S> FromRequest<S> for ValidatedProduct
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<Value>::from_request(req, state).await?;
        let product = validate_product(&payload)?;
        Ok(Self(product))
    }
}
