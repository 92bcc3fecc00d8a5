//! CSV export and import for sales and purchases.
//!
//! Files are UTF-8 with a byte order mark, comma separated, with Japanese
//! header names and `yyyy/MM/dd` dates.

pub mod export;
pub mod import;
pub(crate) mod input;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use crate::ClientError;

pub const UTF8_BOM: char = '\u{feff}';

pub const HEADER_DATE: &str = "日付";
pub const HEADER_PRODUCT: &str = "製品名";
pub const HEADER_CATEGORY: &str = "カテゴリ";
pub const HEADER_QUANTITY: &str = "数量";
pub const HEADER_AMOUNT: &str = "金額";
pub const HEADER_SALESPERSON: &str = "販売者";

pub const SALES_HEADERS: [&str; 6] = [
    HEADER_DATE,
    HEADER_PRODUCT,
    HEADER_CATEGORY,
    HEADER_QUANTITY,
    HEADER_AMOUNT,
    HEADER_SALESPERSON,
];
pub const SALES_REQUIRED_HEADERS: [&str; 5] = [
    HEADER_DATE,
    HEADER_PRODUCT,
    HEADER_CATEGORY,
    HEADER_QUANTITY,
    HEADER_AMOUNT,
];
pub const PURCHASE_HEADERS: [&str; 3] = [HEADER_DATE, HEADER_PRODUCT, HEADER_AMOUNT];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferKind {
    Sales,
    Purchases,
}

impl TransferKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Purchases => "purchases",
        }
    }

    /// `sales_2024_03.csv` style name for the given month.
    pub fn default_file_name(self, month: NaiveDate) -> String {
        format!("{}_{}.csv", self.as_str(), month.format("%Y_%m"))
    }
}

impl fmt::Display for TransferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransferKind {
    type Err = ClientError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "sales" => Ok(Self::Sales),
            "purchases" => Ok(Self::Purchases),
            other => Err(ClientError::invalid_argument(&format!(
                "Unknown record kind `{other}`. Use sales or purchases."
            ))),
        }
    }
}
