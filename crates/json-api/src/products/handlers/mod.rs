//! Product Handlers

pub(crate) mod batch;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

use rust_decimal::Decimal;
use salvo::http::StatusError;

/// Reject prices below zero before they reach the store.
fn validate_price(price: Decimal) -> Result<Decimal, StatusError> {
    if price < Decimal::ZERO {
        return Err(StatusError::bad_request().brief("Price must not be negative"));
    }

    Ok(price)
}
