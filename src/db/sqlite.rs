use crate::db::models::{Customer, NewCustomer, NewOrder, NewProduct, Order, Product};
use crate::db::schema::SQLITE_INIT;
use crate::error::EstoreError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

/// Owns every product, customer and order row. Cloning shares the pool.
#[derive(Clone)]
pub struct StoreStorage {
    pool: SqlitePool,
}

impl StoreStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) the database at `database_url` and ensure the schema.
    pub async fn connect(database_url: &str) -> Result<Self, EstoreError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        Ok(storage)
    }

    /// Private in-memory database. Pinned to a single connection that never
    /// expires, otherwise each new connection would see an empty database.
    pub async fn connect_in_memory() -> Result<Self, EstoreError> {
        let connect_opts = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(connect_opts)
            .await?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        Ok(storage)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL. Safe to repeat.
    pub async fn init_schema(&self) -> Result<(), EstoreError> {
        // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub async fn insert_product(&self, product: NewProduct) -> Result<Product, EstoreError> {
        let res = sqlx::query("INSERT INTO product (name, price, stock) VALUES (?, ?, ?)")
            .bind(&product.name)
            .bind(product.price)
            .bind(product.stock)
            .execute(&self.pool)
            .await?;
        let id = res.last_insert_rowid();
        debug!(id, "product row inserted");
        Ok(product.into_row(id))
    }

    /// Fails with `UniqueConstraintViolation` when the email is taken.
    pub async fn insert_customer(&self, customer: NewCustomer) -> Result<Customer, EstoreError> {
        let res = sqlx::query("INSERT INTO customer (name, email, phone) VALUES (?, ?, ?)")
            .bind(&customer.name)
            .bind(&customer.email)
            .bind(&customer.phone)
            .execute(&self.pool)
            .await
            .map_err(|e| classify_unique(e, "email", &customer.email))?;
        let id = res.last_insert_rowid();
        debug!(id, "customer row inserted");
        Ok(customer.into_row(id))
    }

    /// Both references are checked inside the insert transaction, so a
    /// dangling id is reported as `UnknownCustomer`/`UnknownProduct` and
    /// nothing is written.
    pub async fn insert_order(&self, order: NewOrder) -> Result<Order, EstoreError> {
        let mut tx = self.pool.begin().await?;

        let customer: Option<(i64,)> = sqlx::query_as("SELECT id FROM customer WHERE id = ?")
            .bind(order.customer_id)
            .fetch_optional(&mut *tx)
            .await?;
        if customer.is_none() {
            return Err(EstoreError::UnknownCustomer(order.customer_id));
        }

        let product: Option<(i64,)> = sqlx::query_as("SELECT id FROM product WHERE id = ?")
            .bind(order.product_id)
            .fetch_optional(&mut *tx)
            .await?;
        if product.is_none() {
            return Err(EstoreError::UnknownProduct(order.product_id));
        }

        let res = sqlx::query(
            r#"INSERT INTO "order" (customer_id, product_id, quantity) VALUES (?, ?, ?)"#,
        )
        .bind(order.customer_id)
        .bind(order.product_id)
        .bind(order.quantity)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        let id = res.last_insert_rowid();
        debug!(id, "order row inserted");
        Ok(order.into_row(id))
    }

    pub async fn get_product(&self, id: i64) -> Result<Option<Product>, EstoreError> {
        let row = sqlx::query_as::<_, Product>(
            "SELECT id, name, price, stock FROM product WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get_customer(&self, id: i64) -> Result<Option<Customer>, EstoreError> {
        let row = sqlx::query_as::<_, Customer>(
            "SELECT id, name, email, phone FROM customer WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, EstoreError> {
        let rows = sqlx::query_as::<_, Product>(
            "SELECT id, name, price, stock FROM product ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_customers(&self) -> Result<Vec<Customer>, EstoreError> {
        let rows = sqlx::query_as::<_, Customer>(
            "SELECT id, name, email, phone FROM customer ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, EstoreError> {
        let rows = sqlx::query_as::<_, Order>(
            r#"SELECT id, customer_id, product_id, quantity FROM "order" ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

fn classify_unique(err: sqlx::Error, field: &'static str, value: &str) -> EstoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            EstoreError::UniqueConstraintViolation {
                field,
                value: value.to_string(),
            }
        }
        _ => EstoreError::Persistence(err),
    }
}
