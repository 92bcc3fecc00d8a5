//! Local persistence for the shop's sales, purchases, products, salespersons
//! and settings.

pub mod products;
pub mod purchases;
pub mod sales;
pub mod salespersons;
pub mod search;
pub mod settings;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::engine::{DatedAmount, ProductSale};
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sale {
    pub id: String,
    pub date: NaiveDateTime,
    pub product_name: String,
    pub category: String,
    pub quantity: i64,
    pub amount: i64,
    pub salesperson_id: Option<String>,
    pub salesperson_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSale {
    pub date: NaiveDateTime,
    pub product_name: String,
    pub category: String,
    pub quantity: i64,
    pub amount: i64,
    pub salesperson_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Purchase {
    pub id: String,
    pub date: NaiveDateTime,
    pub product_name: String,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPurchase {
    pub date: NaiveDateTime,
    pub product_name: String,
    pub amount: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InStock => "in-stock",
            Self::LowStock => "low-stock",
            Self::OutOfStock => "out-of-stock",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockStatus {
    type Err = ClientError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "in-stock" => Ok(Self::InStock),
            "low-stock" => Ok(Self::LowStock),
            "out-of-stock" => Ok(Self::OutOfStock),
            other => Err(ClientError::invalid_argument(&format!(
                "Unknown stock status `{other}`. Use in-stock, low-stock, or out-of-stock."
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: i64,
    pub stock: StockStatus,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: i64,
    pub stock: StockStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<i64>,
    pub stock: Option<StockStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Salesperson {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSalesperson {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
}

/// Partial update. An empty `email` or `phone` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalespersonChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
}

impl DatedAmount for Sale {
    fn date(&self) -> NaiveDateTime {
        self.date
    }

    fn amount(&self) -> i64 {
        self.amount
    }
}

impl ProductSale for Sale {
    fn product_name(&self) -> &str {
        &self.product_name
    }

    fn category(&self) -> &str {
        &self.category
    }
}

impl DatedAmount for Purchase {
    fn date(&self) -> NaiveDateTime {
        self.date
    }

    fn amount(&self) -> i64 {
        self.amount
    }
}

pub(crate) fn require_non_negative(field_name: &str, value: i64) -> ClientResult<()> {
    if value < 0 {
        return Err(ClientError::invalid_argument(&format!(
            "`{field_name}` must be zero or greater (got {value})."
        )));
    }
    Ok(())
}

pub(crate) fn require_text(field_name: &str, value: &str) -> ClientResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ClientError::invalid_argument(&format!(
            "`{field_name}` must not be empty."
        )));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}

/// Maps a stored timestamp column, surfacing unreadable values as a
/// conversion failure so they reach `sqlite_failure`.
pub(crate) fn timestamp_column(
    row: &rusqlite::Row<'_>,
    index: usize,
) -> rusqlite::Result<NaiveDateTime> {
    let raw = row.get::<_, String>(index)?;
    crate::dates::parse_store_timestamp(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            index,
            rusqlite::types::Type::Text,
            format!("unreadable timestamp `{raw}`").into(),
        )
    })
}
