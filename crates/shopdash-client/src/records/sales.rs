use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};
use ulid::Ulid;

use crate::dates::{audit_timestamp, format_month, format_store_timestamp};
use crate::records::{NewSale, Sale, require_non_negative, require_text, timestamp_column};
use crate::store::InStore;
use crate::{ClientError, ClientResult};

const SELECT_SALES: &str = "SELECT
        s.id,
        s.date,
        s.product_name,
        s.category,
        s.quantity,
        s.amount,
        s.salesperson_id,
        p.name
     FROM sales s
     LEFT JOIN salespersons p ON p.id = s.salesperson_id";

pub fn insert(connection: &Connection, db_path: &Path, sale: &NewSale) -> ClientResult<Sale> {
    let product_name = require_text("product", &sale.product_name)?;
    let category = require_text("category", &sale.category)?;
    require_non_negative("quantity", sale.quantity)?;
    require_non_negative("amount", sale.amount)?;

    if let Some(salesperson_id) = &sale.salesperson_id
        && !salesperson_exists(connection, db_path, salesperson_id)?
    {
        return Err(ClientError::record_not_found("salesperson", salesperson_id));
    }

    let id = format!("sale_{}", Ulid::new());
    connection
        .execute(
            "INSERT INTO sales (
                id,
                date,
                product_name,
                category,
                quantity,
                amount,
                salesperson_id,
                created_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                &id,
                format_store_timestamp(sale.date),
                &product_name,
                &category,
                sale.quantity,
                sale.amount,
                &sale.salesperson_id,
                audit_timestamp()
            ],
        )
        .in_store(db_path)?;
    tracing::info!(%id, amount = sale.amount, "recorded sale");

    find(connection, db_path, &id)?.ok_or_else(|| ClientError::record_not_found("sale", &id))
}

/// All sales, newest first.
pub fn list(connection: &Connection, db_path: &Path) -> ClientResult<Vec<Sale>> {
    query_sales(
        connection,
        db_path,
        &format!("{SELECT_SALES} ORDER BY s.date DESC, s.id DESC"),
        params![],
    )
}

pub fn list_for_month(
    connection: &Connection,
    db_path: &Path,
    month: NaiveDate,
) -> ClientResult<Vec<Sale>> {
    query_sales(
        connection,
        db_path,
        &format!("{SELECT_SALES} WHERE substr(s.date, 1, 7) = ?1 ORDER BY s.date DESC, s.id DESC"),
        params![format_month(month)],
    )
}

pub fn find(connection: &Connection, db_path: &Path, id: &str) -> ClientResult<Option<Sale>> {
    connection
        .query_row(&format!("{SELECT_SALES} WHERE s.id = ?1"), [id], sale_from_row)
        .optional()
        .in_store(db_path)
}

pub fn delete(connection: &Connection, db_path: &Path, id: &str) -> ClientResult<()> {
    let removed = connection
        .execute("DELETE FROM sales WHERE id = ?1", [id])
        .in_store(db_path)?;
    if removed == 0 {
        return Err(ClientError::record_not_found("sale", id));
    }
    tracing::info!(%id, "deleted sale");
    Ok(())
}

fn salesperson_exists(connection: &Connection, db_path: &Path, id: &str) -> ClientResult<bool> {
    let exists = connection
        .query_row("SELECT 1 FROM salespersons WHERE id = ?1", [id], |_row| Ok(true))
        .optional()
        .in_store(db_path)?
        .unwrap_or(false);
    Ok(exists)
}

fn query_sales(
    connection: &Connection,
    db_path: &Path,
    sql: &str,
    parameters: &[&dyn rusqlite::ToSql],
) -> ClientResult<Vec<Sale>> {
    let mut statement = connection
        .prepare(sql)
        .in_store(db_path)?;
    let rows_iter = statement
        .query_map(parameters, sale_from_row)
        .in_store(db_path)?;

    let mut sales = Vec::new();
    for row in rows_iter {
        sales.push(row.in_store(db_path)?);
    }
    Ok(sales)
}

fn sale_from_row(row: &Row<'_>) -> rusqlite::Result<Sale> {
    Ok(Sale {
        id: row.get(0)?,
        date: timestamp_column(row, 1)?,
        product_name: row.get(2)?,
        category: row.get(3)?,
        quantity: row.get(4)?,
        amount: row.get(5)?,
        salesperson_id: row.get(6)?,
        salesperson_name: row.get(7)?,
    })
}
