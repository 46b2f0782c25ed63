//! Storefront JSON API Healthcheck Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Products currently in the catalog
    pub products: usize,

    /// Open carts
    pub carts: usize,
}

/// Healthcheck handler
///
/// Reports the size of each in-memory store. Answering at all means both
/// store locks could be taken.
#[endpoint(
    tags("health"),
    summary = "Health check endpoint",
    responses(
        (status_code = StatusCode::OK, description = "Service is up"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let sizes = state.app.store_sizes().await;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        products: sizes.products,
        carts: sizes.carts,
    }))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use storefront_app::{context::AppContext, domain::products::data::NewProduct};

    use super::*;

    #[tokio::test]
    async fn test_healthcheck_reports_store_sizes() -> TestResult {
        let app = AppContext::in_memory();

        for name in ["Widget", "Gadget"] {
            app.products
                .create_product(NewProduct {
                    name: name.to_string(),
                    description: String::new(),
                    price: dec!(9.99),
                })
                .await?;
        }

        app.carts.create_cart().await?;

        let router = Router::new()
            .hoop(inject(State::from_app_context(app)))
            .push(Router::with_path("healthcheck").get(handler));

        let response: HealthResponse = TestClient::get("http://example.com/healthcheck")
            .send(&Service::new(router))
            .await
            .take_json()
            .await?;

        assert_eq!(response.status, "ok");
        assert_eq!(response.products, 2);
        assert_eq!(response.carts, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_healthcheck_without_state_returns_500() -> TestResult {
        let router = Router::new().push(Router::with_path("healthcheck").get(handler));

        let res = TestClient::get("http://example.com/healthcheck")
            .send(&Service::new(router))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
