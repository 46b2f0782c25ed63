//! Carts Repository

use jiff::Timestamp;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;

use crate::domain::{
    carts::{
        errors::CartsServiceError,
        records::{CartItemRecord, CartRecord, CartUuid},
    },
    products::records::ProductRecord,
};

/// Cart rows keyed by identifier.
pub(crate) type CartsTable = FxHashMap<CartUuid, CartRecord>;

/// Row-level operations on a locked [`CartsTable`].
#[derive(Debug, Clone, Default)]
pub(crate) struct InMemoryCartsRepository;

impl InMemoryCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) fn get_cart(&self, table: &CartsTable, cart: CartUuid) -> Option<CartRecord> {
        table.get(&cart).cloned()
    }

    pub(crate) fn create_cart(&self, table: &mut CartsTable) -> CartRecord {
        let mut uuid = CartUuid::new();

        while table.contains_key(&uuid) {
            uuid = CartUuid::new();
        }

        let now = Timestamp::now();

        let record = CartRecord {
            uuid,
            items: Vec::new(),
            total: Decimal::ZERO,
            created_at: now,
            updated_at: now,
        };

        table.insert(uuid, record.clone());

        record
    }

    pub(crate) fn delete_cart(&self, table: &mut CartsTable, cart: CartUuid) -> u64 {
        u64::from(table.remove(&cart).is_some())
    }

    /// Add `quantity` of `product` to the cart and recompute its total.
    ///
    /// The first item with a matching product is incremented; otherwise a new
    /// item is appended. On error the stored cart is left untouched.
    pub(crate) fn add_item(
        &self,
        table: &mut CartsTable,
        cart: CartUuid,
        product: &ProductRecord,
        quantity: u32,
    ) -> Result<CartRecord, CartsServiceError> {
        let stored = table.get_mut(&cart).ok_or(CartsServiceError::NotFound(cart))?;

        let mut items = stored.items.clone();

        match items
            .iter_mut()
            .find(|item| item.product_uuid == product.uuid)
        {
            Some(item) => {
                item.quantity = item
                    .quantity
                    .checked_add(quantity)
                    .ok_or(CartsServiceError::QuantityOverflow {
                        product: product.uuid,
                    })?;
            }
            None => items.push(CartItemRecord {
                product_uuid: product.uuid,
                name: product.name.clone(),
                price: product.price,
                quantity,
            }),
        }

        let candidate = CartRecord {
            items,
            updated_at: Timestamp::now(),
            ..stored.clone()
        };

        let total = candidate
            .items_total()
            .ok_or(CartsServiceError::TotalOverflow)?;

        *stored = CartRecord { total, ..candidate };

        Ok(stored.clone())
    }
}
