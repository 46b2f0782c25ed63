//! Get Cart Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::records::{CartItemRecord, CartRecord};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// A line in a cart.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartItemResponse {
    pub product_id: Uuid,

    /// Product name when the item was first added
    pub product_name: String,

    /// Unit price when the item was first added
    #[salvo(schema(value_type = f64))]
    pub price: Decimal,

    pub quantity: u32,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        CartItemResponse {
            product_id: item.product_uuid.into(),
            product_name: item.name,
            price: item.price,
            quantity: item.quantity,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    pub id: Uuid,

    /// Items in the order they were first added
    pub items: Vec<CartItemResponse>,

    /// Sum of price times quantity over every item
    #[salvo(schema(value_type = f64))]
    pub total: Decimal,
}

impl From<CartRecord> for CartResponse {
    fn from(cart: CartRecord) -> Self {
        CartResponse {
            id: cart.uuid.into(),
            items: cart.items.into_iter().map(Into::into).collect(),
            total: cart.total,
        }
    }
}

/// Get Cart Handler
#[endpoint(
    tags("carts"),
    summary = "Get Cart",
    responses(
        (status_code = StatusCode::OK, description = "Cart found"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed cart id"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let cart = state
        .app
        .carts
        .get_cart(cart.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use storefront_app::domain::{
        carts::{CartsServiceError, MockCartsService, records::CartUuid},
        products::records::ProductUuid,
    };

    use crate::test_helpers::{carts_service, make_cart};

    use super::*;

    fn make_service(repo: MockCartsService) -> Service {
        carts_service(repo, Router::with_path("cart/{cart}").get(handler))
    }

    #[tokio::test]
    async fn test_get_cart_uses_camel_case_item_fields() -> TestResult {
        let uuid = CartUuid::new();
        let product = ProductUuid::new();

        let mut cart = make_cart(uuid);

        cart.items.push(CartItemRecord {
            product_uuid: product,
            name: "Widget".to_string(),
            price: dec!(2.5),
            quantity: 3,
        });
        cart.total = dec!(7.5);

        let mut repo = MockCartsService::new();

        repo.expect_get_cart()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(move |_| Ok(cart));

        repo.expect_create_cart().never();
        repo.expect_add_item().never();
        repo.expect_delete_cart().never();

        let mut res = TestClient::get(format!("http://example.com/cart/{uuid}"))
            .send(&make_service(repo))
            .await;

        let body: Value = res.take_json().await?;
        let item = body
            .get("items")
            .and_then(Value::as_array)
            .and_then(|items| items.first())
            .cloned()
            .unwrap_or_default();

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.get("total"), Some(&json!(7.5)));
        assert_eq!(
            item.get("productId").and_then(Value::as_str),
            Some(product.to_string().as_str())
        );
        assert_eq!(item.get("productName").and_then(Value::as_str), Some("Widget"));
        assert_eq!(item.get("quantity").and_then(Value::as_u64), Some(3));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_cart_returns_404() -> TestResult {
        let uuid = CartUuid::new();

        let mut repo = MockCartsService::new();

        repo.expect_get_cart()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(move |_| Err(CartsServiceError::NotFound(uuid)));

        let res = TestClient::get(format!("http://example.com/cart/{uuid}"))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_cart_invalid_uuid_returns_400() -> TestResult {
        let res = TestClient::get("http://example.com/cart/not-a-uuid")
            .send(&make_service(MockCartsService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
