//! Carts service errors.

use thiserror::Error;

use crate::domain::{carts::records::CartUuid, products::records::ProductUuid};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartsServiceError {
    #[error("cart {0} not found")]
    NotFound(CartUuid),

    #[error("product {0} not found")]
    ProductNotFound(ProductUuid),

    #[error("invalid quantity {0}: must be a positive integer")]
    InvalidQuantity(i64),

    #[error("quantity of product {product} would exceed {max}", max = u32::MAX)]
    QuantityOverflow { product: ProductUuid },

    #[error("cart total is out of range")]
    TotalOverflow,
}
