//! Service layer providing business-oriented CRUD operations on top of models.
//! - `query` normalizes raw query strings once at the boundary.
//! - `repository` is the generic, filter-driven CRUD + listing core.
//! - `todo` and `service_context` hold the resource rules.

pub mod errors;
pub mod query;
pub mod pagination;
pub mod repository;
pub mod todo;
pub mod service_context;
#[cfg(test)]
pub mod test_support;
