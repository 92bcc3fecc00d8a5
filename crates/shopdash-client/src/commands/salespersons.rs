use std::path::Path;

use crate::ClientResult;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{RemovedData, SalespersonListData};
use crate::records::search::{SearchQuery, retain_matching};
use crate::records::{NewSalesperson, SalespersonChanges, salespersons};
use crate::store::Store;

#[derive(Debug, Default)]
pub struct SalespersonAddOptions<'a> {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub inactive: bool,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct SalespersonListOptions<'a> {
    pub search: Option<String>,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct SalespersonUpdateOptions<'a> {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub active: Option<bool>,
    pub home_override: Option<&'a Path>,
}

#[doc(hidden)]
pub fn add_with_options(options: SalespersonAddOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let store = Store::open(options.home_override)?;
    let connection = store.connect()?;
    let salesperson = salespersons::insert(
        &connection,
        store.db_path(),
        &NewSalesperson {
            name: options.name,
            email: options.email,
            phone: options.phone,
            is_active: !options.inactive,
        },
    )?;
    success("salesperson add", salesperson)
}

#[doc(hidden)]
pub fn list_with_options(options: SalespersonListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let query = SearchQuery::parse(options.search.as_deref());
    let store = Store::open(options.home_override)?;
    let connection = store.connect()?;
    let mut rows = salespersons::list(&connection, store.db_path())?;
    retain_matching(&mut rows, query.as_ref());
    success(
        "salesperson list",
        SalespersonListData {
            search: query.map(|term| term.as_str().to_string()),
            count: rows.len(),
            salespersons: rows,
        },
    )
}

#[doc(hidden)]
pub fn update_with_options(options: SalespersonUpdateOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let store = Store::open(options.home_override)?;
    let connection = store.connect()?;
    let salesperson = salespersons::update(
        &connection,
        store.db_path(),
        options.id.trim(),
        &SalespersonChanges {
            name: options.name,
            email: options.email,
            phone: options.phone,
            is_active: options.active,
        },
    )?;
    success("salesperson update", salesperson)
}

#[doc(hidden)]
pub fn remove_with_home_override(id: &str, home_override: Option<&Path>) -> ClientResult<SuccessEnvelope> {
    let store = Store::open(home_override)?;
    let connection = store.connect()?;
    salespersons::delete(&connection, store.db_path(), id.trim())?;
    success(
        "salesperson remove",
        RemovedData {
            kind: "salesperson".to_string(),
            id: id.trim().to_string(),
        },
    )
}
