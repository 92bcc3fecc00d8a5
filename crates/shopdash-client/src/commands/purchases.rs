use std::path::Path;

use crate::ClientResult;
use crate::commands::common::{resolve_list_month, resolve_now};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{PurchaseListData, RemovedData};
use crate::dates::{format_month, parse_timestamp};
use crate::engine::total_amount;
use crate::records::search::{SearchQuery, retain_matching};
use crate::records::{NewPurchase, purchases};
use crate::store::Store;

#[derive(Debug, Default)]
pub struct PurchaseAddOptions<'a> {
    pub date: Option<String>,
    pub product: String,
    pub amount: i64,
    pub now: Option<String>,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct PurchaseListOptions<'a> {
    pub month: Option<String>,
    pub all: bool,
    pub search: Option<String>,
    pub now: Option<String>,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct PurchaseRemoveOptions<'a> {
    pub id: String,
    pub home_override: Option<&'a Path>,
}

#[doc(hidden)]
pub fn add_with_options(options: PurchaseAddOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let date = match options.date.as_deref() {
        Some(value) => parse_timestamp(value, "date", "purchase add")?,
        None => resolve_now(options.now.as_deref(), "purchase add")?,
    };
    let store = Store::open(options.home_override)?;
    let connection = store.connect()?;
    let purchase = purchases::insert(
        &connection,
        store.db_path(),
        &NewPurchase {
            date,
            product_name: options.product,
            amount: options.amount,
        },
    )?;
    success("purchase add", purchase)
}

#[doc(hidden)]
pub fn list_with_options(options: PurchaseListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let command = "purchase list";
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
        Some(value) => purchases::list_for_month(&connection, store.db_path(), value)?,
        None => purchases::list(&connection, store.db_path())?,
    };
    retain_matching(&mut rows, query.as_ref());

    success(
        command,
        PurchaseListData {
            month: month.map(format_month),
            search: query.map(|term| term.as_str().to_string()),
            count: rows.len(),
            total_amount: total_amount(&rows),
            purchases: rows,
        },
    )
}

#[doc(hidden)]
pub fn remove_with_options(options: PurchaseRemoveOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let store = Store::open(options.home_override)?;
    let connection = store.connect()?;
    purchases::delete(&connection, store.db_path(), options.id.trim())?;
    success(
        "purchase remove",
        RemovedData {
            kind: "purchase".to_string(),
            id: options.id.trim().to_string(),
        },
    )
}
