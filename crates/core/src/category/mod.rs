//! Category module
//!
//! This module contains category-related types and storage.

mod model;
mod store;

pub use model::Category;
pub use store::CategoryStore;
