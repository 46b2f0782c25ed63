//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};

use storefront_app::{
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            records::{CartRecord, CartUuid},
        },
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
        users::MockUsersService,
    },
};

use crate::state::State;

pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        name: "Widget".to_string(),
        description: String::new(),
        price: Decimal::ONE_HUNDRED,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart(uuid: CartUuid) -> CartRecord {
    CartRecord {
        uuid,
        items: Vec::new(),
        total: Decimal::ZERO,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_create_products().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();
    products.expect_count_products().never();

    products
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_get_cart().never();
    carts.expect_create_cart().never();
    carts.expect_delete_cart().never();
    carts.expect_add_item().never();
    carts.expect_count_carts().never();

    carts
}

fn strict_users_mock() -> MockUsersService {
    let mut users = MockUsersService::new();

    users.expect_register().never();
    users.expect_login().never();

    users
}

fn make_state(
    products: MockProductsService,
    carts: MockCartsService,
    users: MockUsersService,
) -> Arc<State> {
    State::from_app_context(AppContext {
        products: Arc::new(products),
        carts: Arc::new(carts),
        users: Arc::new(users),
    })
}

fn service_with_state(state: Arc<State>, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route))
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    service_with_state(
        make_state(products, strict_carts_mock(), strict_users_mock()),
        route,
    )
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    service_with_state(
        make_state(strict_products_mock(), carts, strict_users_mock()),
        route,
    )
}

pub(crate) fn users_service(users: MockUsersService, route: Router) -> Service {
    service_with_state(
        make_state(strict_products_mock(), strict_carts_mock(), users),
        route,
    )
}
