//! Products service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::products::{
    data::{NewProduct, ProductUpdate},
    errors::ProductsServiceError,
    records::{ProductRecord, ProductUuid},
    repository::{InMemoryProductsRepository, ProductsTable},
};

/// Product store backed by a single mutex-guarded map.
///
/// Every operation, reads included, holds the exclusive lock for its whole
/// duration. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductsService {
    table: Arc<Mutex<ProductsTable>>,
    repository: InMemoryProductsRepository,
}

impl InMemoryProductsService {
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: Arc::new(Mutex::new(ProductsTable::default())),
            repository: InMemoryProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for InMemoryProductsService {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let table = self.table.lock().await;

        Ok(self.repository.list_products(&table))
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let table = self.table.lock().await;

        self.repository
            .get_product(&table, product)
            .ok_or(ProductsServiceError::NotFound(product))
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut table = self.table.lock().await;

        let created = self.repository.create_product(&mut table, product);

        debug!(product_uuid = %created.uuid, "created product");

        Ok(created)
    }

    async fn create_products(
        &self,
        products: Vec<NewProduct>,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut table = self.table.lock().await;

        let created: Vec<ProductRecord> = products
            .into_iter()
            .map(|product| self.repository.create_product(&mut table, product))
            .collect();

        debug!(count = created.len(), "created product batch");

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut table = self.table.lock().await;

        self.repository
            .update_product(&mut table, product, update)
            .ok_or(ProductsServiceError::NotFound(product))
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut table = self.table.lock().await;

        let rows_affected = self.repository.delete_product(&mut table, product);

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound(product));
        }

        debug!(product_uuid = %product, "deleted product");

        Ok(())
    }

    async fn count_products(&self) -> usize {
        self.table.lock().await.len()
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products, in no particular order.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product under a freshly assigned UUID.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates each product in input order, returning them in the same order.
    ///
    /// Not transactional: should a later product ever be rejected, the
    /// earlier ones stay inserted.
    async fn create_products(
        &self,
        products: Vec<NewProduct>,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Replaces the fields of the product with the given UUID, keeping the UUID.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Deletes a product with the given UUID.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;

    /// Number of products currently stored.
    async fn count_products(&self) -> usize;
}
