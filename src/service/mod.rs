pub mod store_ops;

pub use store_ops::StoreOps;
