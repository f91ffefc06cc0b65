use crate::db::models::{Customer, Order, Product};
use crate::db::sqlite::StoreStorage;
use crate::error::EstoreError;
use crate::types::drafts::{CustomerDraft, OrderDraft, ProductDraft};
use tracing::{info, warn};

/// The add/list operations behind every screen and API route.
///
/// Holds no state of its own besides the injected storage handle; errors
/// from storage are returned unchanged.
#[derive(Clone)]
pub struct StoreOps {
    storage: StoreStorage,
}

impl StoreOps {
    pub fn new(storage: StoreStorage) -> Self {
        Self { storage }
    }

    pub async fn add_product(&self, draft: ProductDraft) -> Result<Product, EstoreError> {
        let new = draft.validate().inspect_err(|e| {
            warn!(error = %e, "rejected product");
        })?;
        let product = self.storage.insert_product(new).await?;
        info!(id = product.id, name = %product.name, "product added");
        Ok(product)
    }

    pub async fn add_customer(&self, draft: CustomerDraft) -> Result<Customer, EstoreError> {
        let new = draft.validate().inspect_err(|e| {
            warn!(error = %e, "rejected customer");
        })?;
        let customer = self.storage.insert_customer(new).await?;
        info!(id = customer.id, name = %customer.name, "customer added");
        Ok(customer)
    }

    /// Records the order only. Product stock is never adjusted.
    pub async fn add_order(&self, draft: OrderDraft) -> Result<Order, EstoreError> {
        let new = draft.validate().inspect_err(|e| {
            warn!(error = %e, "rejected order");
        })?;
        let order = self.storage.insert_order(new).await?;
        info!(
            id = order.id,
            customer_id = order.customer_id,
            product_id = order.product_id,
            quantity = order.quantity,
            "order added"
        );
        Ok(order)
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, EstoreError> {
        self.storage.list_products().await
    }

    pub async fn list_customers(&self) -> Result<Vec<Customer>, EstoreError> {
        self.storage.list_customers().await
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, EstoreError> {
        self.storage.list_orders().await
    }
}
