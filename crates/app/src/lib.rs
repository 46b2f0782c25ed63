//! Shared storefront domain services.

pub mod context;
pub mod domain;

mod uuids;

pub use uuids::TypedUuid;
