//! Unvalidated add-form input. Every field is optional because a form may
//! omit it; `validate` turns a draft into the matching insert payload.
//!
//! Numbers are checked as "present and in range", never by truthiness, so a
//! price or stock of zero is accepted.

use crate::db::models::{NewCustomer, NewOrder, NewProduct};
use crate::error::ValidationError;
use serde::{Deserialize, Deserializer, de};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductDraft {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub stock: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderDraft {
    #[serde(default, deserialize_with = "lenient_number")]
    pub customer_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub product_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub quantity: Option<i64>,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, price: f64, stock: i64) -> Self {
        Self {
            name: Some(name.into()),
            price: Some(price),
            stock: Some(stock),
        }
    }

    pub fn validate(self) -> Result<NewProduct, ValidationError> {
        let name = required_text(self.name, "name")?;
        let price = self
            .price
            .ok_or(ValidationError::MissingField { field: "price" })?;
        if !price.is_finite() || price < 0.0 {
            return Err(ValidationError::OutOfRange {
                field: "price",
                reason: "must be a non-negative number",
            });
        }
        let stock = self
            .stock
            .ok_or(ValidationError::MissingField { field: "stock" })?;
        if stock < 0 {
            return Err(ValidationError::OutOfRange {
                field: "stock",
                reason: "must not be negative",
            });
        }
        Ok(NewProduct { name, price, stock })
    }
}

impl CustomerDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            phone: Some(phone.into()),
        }
    }

    pub fn validate(self) -> Result<NewCustomer, ValidationError> {
        Ok(NewCustomer {
            name: required_text(self.name, "name")?,
            email: required_text(self.email, "email")?,
            phone: required_text(self.phone, "phone")?,
        })
    }
}

impl OrderDraft {
    pub fn new(customer_id: i64, product_id: i64, quantity: i64) -> Self {
        Self {
            customer_id: Some(customer_id),
            product_id: Some(product_id),
            quantity: Some(quantity),
        }
    }

    pub fn validate(self) -> Result<NewOrder, ValidationError> {
        Ok(NewOrder {
            customer_id: positive(self.customer_id, "customer_id")?,
            product_id: positive(self.product_id, "product_id")?,
            quantity: positive(self.quantity, "quantity")?,
        })
    }
}

/// Blank (whitespace-only) text counts as missing. Stored text is trimmed.
fn required_text(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    match value.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => Ok(s.to_string()),
        _ => Err(ValidationError::MissingField { field }),
    }
}

fn positive(value: Option<i64>, field: &'static str) -> Result<i64, ValidationError> {
    let v = value.ok_or(ValidationError::MissingField { field })?;
    if v < 1 {
        return Err(ValidationError::OutOfRange {
            field,
            reason: "must be at least 1",
        });
    }
    Ok(v)
}

/// JSON sends numbers, urlencoded forms send text (empty when the input was
/// left blank). Both land here; blank text means absent.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberField<T> {
    Number(T),
    Text(String),
}

fn lenient_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: fmt::Display,
{
    match Option::<NumberField<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberField::Number(n)) => Ok(Some(n)),
        Some(NumberField::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberField::Text(s)) => s.trim().parse().map(Some).map_err(de::Error::custom),
    }
}
