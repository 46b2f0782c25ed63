//! Cart Data

use crate::domain::products::records::ProductUuid;

/// New Cart Item Data
///
/// `quantity` is kept signed so that non-positive requests reach the service
/// and are rejected there rather than wrapping at the edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub product_uuid: ProductUuid,
    pub quantity: i64,
}
