use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};
use ulid::Ulid;

use crate::dates::{audit_timestamp, format_month, format_store_timestamp};
use crate::records::{NewPurchase, Purchase, require_non_negative, require_text, timestamp_column};
use crate::store::InStore;
use crate::{ClientError, ClientResult};

const SELECT_PURCHASES: &str = "SELECT id, date, product_name, amount FROM purchases";

pub fn insert(
    connection: &Connection,
    db_path: &Path,
    purchase: &NewPurchase,
) -> ClientResult<Purchase> {
    let product_name = require_text("product", &purchase.product_name)?;
    require_non_negative("amount", purchase.amount)?;

    let id = format!("pur_{}", Ulid::new());
    connection
        .execute(
            "INSERT INTO purchases (id, date, product_name, amount, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                &id,
                format_store_timestamp(purchase.date),
                &product_name,
                purchase.amount,
                audit_timestamp()
            ],
        )
        .in_store(db_path)?;
    tracing::info!(%id, amount = purchase.amount, "recorded purchase");

    Ok(Purchase {
        id,
        date: purchase.date,
        product_name,
        amount: purchase.amount,
    })
}

pub fn list(connection: &Connection, db_path: &Path) -> ClientResult<Vec<Purchase>> {
    query_purchases(
        connection,
        db_path,
        &format!("{SELECT_PURCHASES} ORDER BY date DESC, id DESC"),
        params![],
    )
}

pub fn list_for_month(
    connection: &Connection,
    db_path: &Path,
    month: NaiveDate,
) -> ClientResult<Vec<Purchase>> {
    query_purchases(
        connection,
        db_path,
        &format!("{SELECT_PURCHASES} WHERE substr(date, 1, 7) = ?1 ORDER BY date DESC, id DESC"),
        params![format_month(month)],
    )
}

pub fn find(connection: &Connection, db_path: &Path, id: &str) -> ClientResult<Option<Purchase>> {
    connection
        .query_row(
            &format!("{SELECT_PURCHASES} WHERE id = ?1"),
            [id],
            purchase_from_row,
        )
        .optional()
        .in_store(db_path)
}

pub fn delete(connection: &Connection, db_path: &Path, id: &str) -> ClientResult<()> {
    let removed = connection
        .execute("DELETE FROM purchases WHERE id = ?1", [id])
        .in_store(db_path)?;
    if removed == 0 {
        return Err(ClientError::record_not_found("purchase", id));
    }
    tracing::info!(%id, "deleted purchase");
    Ok(())
}

fn query_purchases(
    connection: &Connection,
    db_path: &Path,
    sql: &str,
    parameters: &[&dyn rusqlite::ToSql],
) -> ClientResult<Vec<Purchase>> {
    let mut statement = connection
        .prepare(sql)
        .in_store(db_path)?;
    let rows_iter = statement
        .query_map(parameters, purchase_from_row)
        .in_store(db_path)?;

    let mut purchases = Vec::new();
    for row in rows_iter {
        purchases.push(row.in_store(db_path)?);
    }
    Ok(purchases)
}

fn purchase_from_row(row: &Row<'_>) -> rusqlite::Result<Purchase> {
    Ok(Purchase {
        id: row.get(0)?,
        date: timestamp_column(row, 1)?,
        product_name: row.get(2)?,
        amount: row.get(3)?,
    })
}
