//! Products Repository

use jiff::Timestamp;
use rustc_hash::FxHashMap;

use crate::domain::products::{
    data::{NewProduct, ProductUpdate},
    records::{ProductRecord, ProductUuid},
};

/// Product rows keyed by identifier.
pub(crate) type ProductsTable = FxHashMap<ProductUuid, ProductRecord>;

/// Row-level operations on a locked [`ProductsTable`].
///
/// Callers hold the table lock for the whole call; nothing here locks.
#[derive(Debug, Clone, Default)]
pub(crate) struct InMemoryProductsRepository;

impl InMemoryProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Unordered: follows the table's iteration order.
    pub(crate) fn list_products(&self, table: &ProductsTable) -> Vec<ProductRecord> {
        table.values().cloned().collect()
    }

    pub(crate) fn get_product(
        &self,
        table: &ProductsTable,
        product: ProductUuid,
    ) -> Option<ProductRecord> {
        table.get(&product).cloned()
    }

    pub(crate) fn create_product(
        &self,
        table: &mut ProductsTable,
        product: NewProduct,
    ) -> ProductRecord {
        let uuid = next_uuid(table);
        let now = Timestamp::now();

        let record = ProductRecord {
            uuid,
            name: product.name,
            description: product.description,
            price: product.price,
            created_at: now,
            updated_at: now,
        };

        table.insert(uuid, record.clone());

        record
    }

    pub(crate) fn update_product(
        &self,
        table: &mut ProductsTable,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Option<ProductRecord> {
        let record = table.get_mut(&product)?;

        record.name = update.name;
        record.description = update.description;
        record.price = update.price;
        record.updated_at = Timestamp::now();

        Some(record.clone())
    }

    pub(crate) fn delete_product(&self, table: &mut ProductsTable, product: ProductUuid) -> u64 {
        u64::from(table.remove(&product).is_some())
    }
}

/// Draw identifiers until one is not held by a live row.
fn next_uuid(table: &ProductsTable) -> ProductUuid {
    let mut uuid = ProductUuid::new();

    while table.contains_key(&uuid) {
        uuid = ProductUuid::new();
    }

    uuid
}
