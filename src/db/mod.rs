//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows, plus validated insert payloads
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: the store itself (connect, init, insert, list)

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{Customer, NewCustomer, NewOrder, NewProduct, Order, Product};
pub use schema::SQLITE_INIT;
pub use sqlite::{SqlitePool, StoreStorage};
