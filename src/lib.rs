pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod router;
pub mod service;
pub mod types;

pub use db::StoreStorage;
pub use error::{EstoreError, ValidationError};
pub use service::StoreOps;
