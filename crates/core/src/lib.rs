//! Core library for the Todo backend
//!
//! This crate contains the domain logic, including:
//! - Category and Task models
//! - SQLite-backed stores
//! - Schema migrations

pub mod category;
pub mod db;
pub mod error;
pub mod task;

pub use db::Db;
pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
