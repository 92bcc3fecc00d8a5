use std::path::Path;

use crate::ClientResult;
use crate::commands::common::{resolve_list_month, resolve_now};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{RemovedData, SaleListData};
use crate::dates::{format_month, parse_timestamp};
use crate::engine::total_amount;
use crate::records::search::{SearchQuery, retain_matching};
use crate::records::{NewSale, sales};
use crate::store::Store;

#[derive(Debug, Default)]
pub struct SaleAddOptions<'a> {
    pub date: Option<String>,
    pub product: String,
    pub category: String,
    pub quantity: i64,
    pub amount: i64,
    pub salesperson_id: Option<String>,
    pub now: Option<String>,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct SaleListOptions<'a> {
    pub month: Option<String>,
    pub all: bool,
    pub search: Option<String>,
    pub now: Option<String>,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct SaleRemoveOptions<'a> {
    pub id: String,
    pub home_override: Option<&'a Path>,
}

#[doc(hidden)]
pub fn add_with_options(options: SaleAddOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let date = match options.date.as_deref() {
        Some(value) => parse_timestamp(value, "date", "sale add")?,
        None => resolve_now(options.now.as_deref(), "sale add")?,
    };
    let store = Store::open(options.home_override)?;
    let connection = store.connect()?;
    let sale = sales::insert(
        &connection,
        store.db_path(),
        &NewSale {
            date,
            product_name: options.product,
            category: options.category,
            quantity: options.quantity,
            amount: options.amount,
            salesperson_id: options.salesperson_id,
        },
    )?;
    success("sale add", sale)
}

#[doc(hidden)]
pub fn list_with_options(options: SaleListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let command = "sale list";
    let month = resolve_list_month(
        options.month.as_deref(),
        options.all,
        options.now.as_deref(),
        command,
    )?;
    let query = SearchQuery::parse(options.search.as_deref());
    let store = Store::open(options.home_override)?;
    let connection = store.connect()?;
    let mut rows = match month {
        Some(value) => sales::list_for_month(&connection, store.db_path(), value)?,
        None => sales::list(&connection, store.db_path())?,
    };
    retain_matching(&mut rows, query.as_ref());

    success(
        command,
        SaleListData {
            month: month.map(format_month),
            search: query.map(|term| term.as_str().to_string()),
            count: rows.len(),
            total_amount: total_amount(&rows),
            sales: rows,
        },
    )
}

#[doc(hidden)]
pub fn remove_with_options(options: SaleRemoveOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let store = Store::open(options.home_override)?;
    let connection = store.connect()?;
    sales::delete(&connection, store.db_path(), options.id.trim())?;
    success(
        "sale remove",
        RemovedData {
            kind: "sale".to_string(),
            id: options.id.trim().to_string(),
        },
    )
}
