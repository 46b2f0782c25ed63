//! Products service errors.

use thiserror::Error;

use crate::domain::products::records::ProductUuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductsServiceError {
    #[error("product {0} not found")]
    NotFound(ProductUuid),
}
