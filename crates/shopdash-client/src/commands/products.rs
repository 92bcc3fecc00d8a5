use std::path::Path;

use crate::ClientResult;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{ProductListData, RemovedData};
use crate::records::search::{SearchQuery, retain_matching};
use crate::records::{NewProduct, ProductChanges, StockStatus, products};
use crate::store::Store;

#[derive(Debug, Default)]
pub struct ProductAddOptions<'a> {
    pub name: String,
    pub category: String,
    pub price: i64,
    pub stock: Option<String>,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct ProductListOptions<'a> {
    pub search: Option<String>,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct ProductUpdateOptions<'a> {
    pub id: String,
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<i64>,
    pub stock: Option<String>,
    pub home_override: Option<&'a Path>,
}

#[doc(hidden)]
pub fn add_with_options(options: ProductAddOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let stock = match options.stock.as_deref() {
        Some(value) => value.parse::<StockStatus>()?,
        None => StockStatus::InStock,
    };
    let store = Store::open(options.home_override)?;
    let connection = store.connect()?;
    let product = products::insert(
        &connection,
        store.db_path(),
        &NewProduct {
            name: options.name,
            category: options.category,
            price: options.price,
            stock,
        },
    )?;
    success("product add", product)
}

#[doc(hidden)]
pub fn list_with_options(options: ProductListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let query = SearchQuery::parse(options.search.as_deref());
    let store = Store::open(options.home_override)?;
    let connection = store.connect()?;
    let mut rows = products::list(&connection, store.db_path())?;
    retain_matching(&mut rows, query.as_ref());
    success(
        "product list",
        ProductListData {
            search: query.map(|term| term.as_str().to_string()),
            count: rows.len(),
            products: rows,
        },
    )
}

#[doc(hidden)]
pub fn update_with_options(options: ProductUpdateOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let stock = match options.stock.as_deref() {
        Some(value) => Some(value.parse::<StockStatus>()?),
        None => None,
    };
    let store = Store::open(options.home_override)?;
    let connection = store.connect()?;
    let product = products::update(
        &connection,
        store.db_path(),
        options.id.trim(),
        &ProductChanges {
            name: options.name,
            category: options.category,
            price: options.price,
            stock,
        },
    )?;
    success("product update", product)
}

#[doc(hidden)]
pub fn remove_with_home_override(id: &str, home_override: Option<&Path>) -> ClientResult<SuccessEnvelope> {
    let store = Store::open(home_override)?;
    let connection = store.connect()?;
    products::delete(&connection, store.db_path(), id.trim())?;
    success(
        "product remove",
        RemovedData {
            kind: "product".to_string(),
            id: id.trim().to_string(),
        },
    )
}
