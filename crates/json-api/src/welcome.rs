//! Welcome Handler

use salvo::prelude::*;

/// Plain-text greeting served at the root path.
#[handler]
pub(crate) async fn handler() -> &'static str {
    "Welcome to the storefront API"
}
