//! Errors

use salvo::http::StatusError;

use storefront_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound(_) => StatusError::not_found().brief("Cart not found"),
        CartsServiceError::ProductNotFound(_) => {
            StatusError::not_found().brief("Product not found")
        }
        CartsServiceError::InvalidQuantity(_) => {
            StatusError::bad_request().brief("Quantity must be a positive integer")
        }
        CartsServiceError::QuantityOverflow { .. } => {
            StatusError::bad_request().brief("Item quantity would exceed the maximum")
        }
        CartsServiceError::TotalOverflow => {
            StatusError::bad_request().brief("Cart total is out of range")
        }
    }
}
