//! Carts service.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use async_trait::async_trait;
use mockall::automock;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::{
    carts::{
        data::NewCartItem,
        errors::CartsServiceError,
        records::{CartRecord, CartUuid},
        repository::{CartsTable, InMemoryCartsRepository},
    },
    products::{ProductsService, ProductsServiceError},
};

/// Cart store backed by its own mutex-guarded map.
///
/// Product details are resolved through the products service before the cart
/// lock is taken, so the two store locks are never held together.
#[derive(Clone)]
pub struct InMemoryCartsService {
    table: Arc<Mutex<CartsTable>>,
    products: Arc<dyn ProductsService>,
    repository: InMemoryCartsRepository,
}

impl Debug for InMemoryCartsService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("InMemoryCartsService")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl InMemoryCartsService {
    #[must_use]
    pub fn new(products: Arc<dyn ProductsService>) -> Self {
        Self {
            table: Arc::new(Mutex::new(CartsTable::default())),
            products,
            repository: InMemoryCartsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for InMemoryCartsService {
    async fn count_carts(&self) -> usize {
        self.table.lock().await.len()
    }

    async fn get_cart(&self, cart: CartUuid) -> Result<CartRecord, CartsServiceError> {
        let table = self.table.lock().await;

        self.repository
            .get_cart(&table, cart)
            .ok_or(CartsServiceError::NotFound(cart))
    }

    async fn create_cart(&self) -> Result<CartRecord, CartsServiceError> {
        let mut table = self.table.lock().await;

        let created = self.repository.create_cart(&mut table);

        debug!(cart_uuid = %created.uuid, "created cart");

        Ok(created)
    }

    async fn delete_cart(&self, cart: CartUuid) -> Result<(), CartsServiceError> {
        let mut table = self.table.lock().await;

        let rows_affected = self.repository.delete_cart(&mut table, cart);

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound(cart));
        }

        debug!(cart_uuid = %cart, "deleted cart");

        Ok(())
    }

    async fn add_item(
        &self,
        cart: CartUuid,
        item: NewCartItem,
    ) -> Result<CartRecord, CartsServiceError> {
        let quantity = u32::try_from(item.quantity)
            .ok()
            .filter(|quantity| *quantity > 0)
            .ok_or(CartsServiceError::InvalidQuantity(item.quantity))?;

        // Product lock is taken and released inside this call.
        let product = self
            .products
            .get_product(item.product_uuid)
            .await
            .map_err(|error| match error {
                ProductsServiceError::NotFound(product) => {
                    CartsServiceError::ProductNotFound(product)
                }
            })?;

        let mut table = self.table.lock().await;

        let updated = self
            .repository
            .add_item(&mut table, cart, &product, quantity)?;

        debug!(
            cart_uuid = %cart,
            product_uuid = %product.uuid,
            quantity,
            total = %updated.total,
            "added item to cart"
        );

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    async fn count_carts(&self) -> usize;

    /// Retrieve a single cart.
    async fn get_cart(&self, cart: CartUuid) -> Result<CartRecord, CartsServiceError>;

    /// Creates a new, empty cart.
    async fn create_cart(&self) -> Result<CartRecord, CartsServiceError>;

    /// Deletes a cart with the given UUID.
    async fn delete_cart(&self, cart: CartUuid) -> Result<(), CartsServiceError>;

    /// Add a quantity of a product to the given cart, returning the updated cart.
    async fn add_item(
        &self,
        cart: CartUuid,
        item: NewCartItem,
    ) -> Result<CartRecord, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use crate::domain::products::{
        InMemoryProductsService, MockProductsService,
        data::{NewProduct, ProductUpdate},
        records::{ProductRecord, ProductUuid},
    };

    use super::*;

    struct TestContext {
        products: Arc<InMemoryProductsService>,
        carts: InMemoryCartsService,
    }

    impl TestContext {
        fn new() -> Self {
            let products = Arc::new(InMemoryProductsService::new());

            Self {
                carts: InMemoryCartsService::new(products.clone()),
                products,
            }
        }

        async fn product(
            &self,
            name: &str,
            price: Decimal,
        ) -> Result<ProductRecord, ProductsServiceError> {
            self.products
                .create_product(NewProduct {
                    name: name.to_string(),
                    description: String::new(),
                    price,
                })
                .await
        }
    }

    #[tokio::test]
    async fn create_cart_returns_empty_cart() -> TestResult {
        let ctx = TestContext::new();

        let cart = ctx.carts.create_cart().await?;

        assert!(cart.items.is_empty());
        assert_eq!(cart.total, Decimal::ZERO);

        Ok(())
    }

    #[tokio::test]
    async fn create_cart_assigns_distinct_uuids() -> TestResult {
        let ctx = TestContext::new();

        let a = ctx.carts.create_cart().await?;
        let b = ctx.carts.create_cart().await?;

        assert_ne!(a.uuid, b.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn get_cart_returns_created_cart() -> TestResult {
        let ctx = TestContext::new();
        let created = ctx.carts.create_cart().await?;

        let cart = ctx.carts.get_cart(created.uuid).await?;

        assert_eq!(cart, created);

        Ok(())
    }

    #[tokio::test]
    async fn get_cart_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new();
        let uuid = CartUuid::new();

        let result = ctx.carts.get_cart(uuid).await;

        assert_eq!(result, Err(CartsServiceError::NotFound(uuid)));
    }

    #[tokio::test]
    async fn delete_cart_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new();
        let cart = ctx.carts.create_cart().await?;

        ctx.carts.delete_cart(cart.uuid).await?;

        let result = ctx.carts.get_cart(cart.uuid).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound(_))),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_cart_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new();

        let result = ctx.carts.delete_cart(CartUuid::new()).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound(_))),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn adding_new_product_appends_item_with_product_details() -> TestResult {
        let ctx = TestContext::new();
        let product = ctx.product("Widget", dec!(9.99)).await?;
        let cart = ctx.carts.create_cart().await?;

        let cart = ctx
            .carts
            .add_item(
                cart.uuid,
                NewCartItem {
                    product_uuid: product.uuid,
                    quantity: 2,
                },
            )
            .await?;

        let item = cart.items.first();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(item.map(|i| i.product_uuid), Some(product.uuid));
        assert_eq!(item.map(|i| i.name.as_str()), Some("Widget"));
        assert_eq!(item.map(|i| i.price), Some(dec!(9.99)));
        assert_eq!(item.map(|i| i.quantity), Some(2));
        assert_eq!(cart.total, dec!(19.98));

        Ok(())
    }

    #[tokio::test]
    async fn adding_same_product_twice_increments_quantity() -> TestResult {
        let ctx = TestContext::new();
        let product = ctx.product("Widget", dec!(9.99)).await?;
        let cart = ctx.carts.create_cart().await?;
        let item = NewCartItem {
            product_uuid: product.uuid,
            quantity: 2,
        };

        ctx.carts.add_item(cart.uuid, item.clone()).await?;

        let cart = ctx
            .carts
            .add_item(
                cart.uuid,
                NewCartItem {
                    quantity: 1,
                    ..item
                },
            )
            .await?;

        assert_eq!(cart.items.len(), 1, "item count should not change");
        assert_eq!(cart.items.first().map(|i| i.quantity), Some(3));
        assert_eq!(cart.total, dec!(29.97));

        Ok(())
    }

    #[tokio::test]
    async fn items_keep_insertion_order_and_total_matches_lines() -> TestResult {
        let ctx = TestContext::new();
        let widget = ctx.product("Widget", dec!(9.99)).await?;
        let gadget = ctx.product("Gadget", dec!(0.35)).await?;
        let gizmo = ctx.product("Gizmo", dec!(120)).await?;
        let cart = ctx.carts.create_cart().await?;

        for (product, quantity) in [(&gizmo, 1), (&widget, 3), (&gadget, 7), (&widget, 2)] {
            ctx.carts
                .add_item(
                    cart.uuid,
                    NewCartItem {
                        product_uuid: product.uuid,
                        quantity,
                    },
                )
                .await?;
        }

        let cart = ctx.carts.get_cart(cart.uuid).await?;

        let names: Vec<&str> = cart.items.iter().map(|i| i.name.as_str()).collect();
        let expected: Decimal = cart
            .items
            .iter()
            .map(|i| i.price * Decimal::from(i.quantity))
            .sum();

        assert_eq!(names, ["Gizmo", "Widget", "Gadget"]);
        assert_eq!(cart.total, expected);
        assert_eq!(cart.total, dec!(172.40));

        Ok(())
    }

    #[tokio::test]
    async fn item_keeps_price_captured_when_added() -> TestResult {
        let ctx = TestContext::new();
        let product = ctx.product("Widget", dec!(9.99)).await?;
        let cart = ctx.carts.create_cart().await?;
        let item = NewCartItem {
            product_uuid: product.uuid,
            quantity: 1,
        };

        ctx.carts.add_item(cart.uuid, item.clone()).await?;

        ctx.products
            .update_product(
                product.uuid,
                ProductUpdate {
                    name: "Widget v2".to_string(),
                    description: String::new(),
                    price: dec!(14.99),
                },
            )
            .await?;

        let cart = ctx.carts.add_item(cart.uuid, item).await?;

        assert_eq!(cart.items.first().map(|i| i.name.as_str()), Some("Widget"));
        assert_eq!(cart.items.first().map(|i| i.price), Some(dec!(9.99)));
        assert_eq!(cart.total, dec!(19.98));

        Ok(())
    }

    #[tokio::test]
    async fn non_positive_quantity_is_rejected_and_cart_unchanged() -> TestResult {
        let ctx = TestContext::new();
        let product = ctx.product("Widget", dec!(9.99)).await?;
        let cart = ctx.carts.create_cart().await?;

        for quantity in [0, -1, i64::MIN, i64::from(u32::MAX) + 1] {
            let result = ctx
                .carts
                .add_item(
                    cart.uuid,
                    NewCartItem {
                        product_uuid: product.uuid,
                        quantity,
                    },
                )
                .await;

            assert_eq!(result, Err(CartsServiceError::InvalidQuantity(quantity)));
        }

        assert_eq!(ctx.carts.get_cart(cart.uuid).await?, cart);

        Ok(())
    }

    #[tokio::test]
    async fn adding_unknown_product_returns_product_not_found() -> TestResult {
        let ctx = TestContext::new();
        let cart = ctx.carts.create_cart().await?;
        let product = ProductUuid::new();

        let result = ctx
            .carts
            .add_item(
                cart.uuid,
                NewCartItem {
                    product_uuid: product,
                    quantity: 1,
                },
            )
            .await;

        assert_eq!(result, Err(CartsServiceError::ProductNotFound(product)));

        Ok(())
    }

    #[tokio::test]
    async fn adding_to_unknown_cart_returns_not_found() -> TestResult {
        let ctx = TestContext::new();
        let product = ctx.product("Widget", dec!(9.99)).await?;
        let cart = CartUuid::new();

        let result = ctx
            .carts
            .add_item(
                cart,
                NewCartItem {
                    product_uuid: product.uuid,
                    quantity: 1,
                },
            )
            .await;

        assert_eq!(result, Err(CartsServiceError::NotFound(cart)));

        Ok(())
    }

    #[tokio::test]
    async fn invalid_quantity_is_checked_before_product_lookup() {
        let mut products = MockProductsService::new();

        products.expect_get_product().never();

        let carts = InMemoryCartsService::new(Arc::new(products));

        let result = carts
            .add_item(
                CartUuid::new(),
                NewCartItem {
                    product_uuid: ProductUuid::new(),
                    quantity: 0,
                },
            )
            .await;

        assert_eq!(result, Err(CartsServiceError::InvalidQuantity(0)));
    }

    #[tokio::test]
    async fn widget_checkout_scenario() -> TestResult {
        let ctx = TestContext::new();

        let widget = ctx.product("Widget", dec!(9.99)).await?;
        assert_eq!(widget.name, "Widget");
        assert_eq!(widget.price, dec!(9.99));

        let cart = ctx.carts.create_cart().await?;
        assert!(cart.items.is_empty());
        assert_eq!(cart.total, Decimal::ZERO);

        let item = NewCartItem {
            product_uuid: widget.uuid,
            quantity: 2,
        };

        let after_two = ctx.carts.add_item(cart.uuid, item.clone()).await?;
        assert_eq!(after_two.uuid, cart.uuid);
        assert_eq!(after_two.total, dec!(19.98));

        let after_three = ctx
            .carts
            .add_item(cart.uuid, NewCartItem { quantity: 1, ..item })
            .await?;
        assert_eq!(after_three.items.first().map(|i| i.quantity), Some(3));
        assert_eq!(after_three.total, dec!(29.97));

        ctx.carts.delete_cart(cart.uuid).await?;

        assert_eq!(
            ctx.carts.get_cart(cart.uuid).await,
            Err(CartsServiceError::NotFound(cart.uuid))
        );

        Ok(())
    }
}
