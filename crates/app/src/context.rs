//! App Context

use std::sync::Arc;

use crate::domain::{
    carts::{CartsService, InMemoryCartsService},
    products::{InMemoryProductsService, ProductsService},
    users::{InMemoryUsersService, UsersService},
};

/// Row counts of the stores at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSizes {
    pub products: usize,
    pub carts: usize,
}

/// Handles to every store, built once at start-up and shared by reference.
#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub users: Arc<dyn UsersService>,
}

impl AppContext {
    /// Build application context backed by in-memory stores.
    ///
    /// The carts store reads through the same products store that is exposed
    /// on the context.
    #[must_use]
    pub fn in_memory() -> Self {
        let products: Arc<dyn ProductsService> = Arc::new(InMemoryProductsService::new());

        Self {
            carts: Arc::new(InMemoryCartsService::new(products.clone())),
            users: Arc::new(InMemoryUsersService::new()),
            products,
        }
    }

    /// Count the stored products and carts.
    ///
    /// Each store is locked on its own, so the two counts may be taken
    /// either side of a concurrent write.
    pub async fn store_sizes(&self) -> StoreSizes {
        StoreSizes {
            products: self.products.count_products().await,
            carts: self.carts.count_carts().await,
        }
    }
}
