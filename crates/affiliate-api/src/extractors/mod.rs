//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, and pagination.

mod auth;
mod pagination;
mod path;
mod validated;

pub use auth::{AdminAuth, AffiliateAuth};
pub use pagination::{ListParams, Pagination};
pub use path::IdPath;
pub use validated::ValidatedJson;
