//! Cart Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{domain::products::records::ProductUuid, uuids::TypedUuid};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart Record
#[derive(Debug, Clone, PartialEq)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub items: Vec<CartItemRecord>,
    pub total: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartRecord {
    /// Sum of every line total, or `None` if it does not fit in a [`Decimal`].
    pub fn items_total(&self) -> Option<Decimal> {
        self.items
            .iter()
            .try_fold(Decimal::ZERO, |total, item| total.checked_add(item.line_total()?))
    }
}

/// Cart Item Record
///
/// `name` and `price` are copied from the product when the item is first
/// added and are not refreshed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemRecord {
    pub product_uuid: ProductUuid,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
}

impl CartItemRecord {
    /// `price * quantity`, or `None` on overflow.
    pub fn line_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}
