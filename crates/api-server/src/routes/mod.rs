//! Route handlers

pub mod category;
pub mod health;
pub mod task;
