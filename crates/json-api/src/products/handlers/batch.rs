//! Batch Create Products Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};
use tracing::info;

use storefront_app::domain::products::data::NewProduct;

use crate::{
    extensions::*,
    products::{create::CreateProductRequest, errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Batch Create Products Handler
///
/// Every product in the batch is validated before any is created. The
/// created products are returned in request order.
#[endpoint(
    tags("products"),
    summary = "Create Products",
    responses(
        (status_code = StatusCode::CREATED, description = "Products created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<Vec<CreateProductRequest>>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = json
        .into_inner()
        .into_iter()
        .map(NewProduct::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let created = state
        .app
        .products
        .create_products(products)
        .await
        .map_err(into_status_error)?;

    info!(count = created.len(), "created products");

    res.status_code(StatusCode::CREATED);

    Ok(Json(created.into_iter().map(Into::into).collect()))
}
