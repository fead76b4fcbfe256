//! Task module
//!
//! This module contains task-related types and storage.

mod model;
mod store;

pub use model::Task;
pub use store::TaskStore;
