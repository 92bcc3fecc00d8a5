use std::path::Path;

use rusqlite::{Connection, OptionalExtension, Row, params};
use ulid::Ulid;

use crate::dates::audit_timestamp;
use crate::records::{NewProduct, Product, ProductChanges, require_non_negative, require_text};
use crate::store::InStore;
use crate::{ClientError, ClientResult};

const SELECT_PRODUCTS: &str =
    "SELECT id, name, category, price, stock, created_at, updated_at FROM products";

pub fn insert(connection: &Connection, db_path: &Path, product: &NewProduct) -> ClientResult<Product> {
    let name = require_text("name", &product.name)?;
    let category = require_text("category", &product.category)?;
    require_non_negative("price", product.price)?;

    let id = format!("prd_{}", Ulid::new());
    let timestamp = audit_timestamp();
    connection
        .execute(
            "INSERT INTO products (id, name, category, price, stock, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
            params![&id, &name, &category, product.price, product.stock.as_str(), &timestamp],
        )
        .in_store(db_path)?;
    tracing::info!(%id, %name, "added product");

    Ok(Product {
        id,
        name,
        category,
        price: product.price,
        stock: product.stock,
        created_at: timestamp.clone(),
        updated_at: timestamp,
    })
}

/// Products ordered by name.
pub fn list(connection: &Connection, db_path: &Path) -> ClientResult<Vec<Product>> {
    let mut statement = connection
        .prepare(&format!("{SELECT_PRODUCTS} ORDER BY name ASC, id ASC"))
        .in_store(db_path)?;
    let rows_iter = statement
        .query_map([], product_from_row)
        .in_store(db_path)?;

    let mut products = Vec::new();
    for row in rows_iter {
        products.push(row.in_store(db_path)?);
    }
    Ok(products)
}

pub fn find(connection: &Connection, db_path: &Path, id: &str) -> ClientResult<Option<Product>> {
    connection
        .query_row(&format!("{SELECT_PRODUCTS} WHERE id = ?1"), [id], product_from_row)
        .optional()
        .in_store(db_path)
}

pub fn update(
    connection: &Connection,
    db_path: &Path,
    id: &str,
    changes: &ProductChanges,
) -> ClientResult<Product> {
    let Some(current) = find(connection, db_path, id)? else {
        return Err(ClientError::record_not_found("product", id));
    };

    let name = match &changes.name {
        Some(value) => require_text("name", value)?,
        None => current.name,
    };
    let category = match &changes.category {
        Some(value) => require_text("category", value)?,
        None => current.category,
    };
    let price = changes.price.unwrap_or(current.price);
    require_non_negative("price", price)?;
    let stock = changes.stock.unwrap_or(current.stock);
    let timestamp = audit_timestamp();

    connection
        .execute(
            "UPDATE products
             SET name = ?2, category = ?3, price = ?4, stock = ?5, updated_at = ?6
             WHERE id = ?1",
            params![id, &name, &category, price, stock.as_str(), &timestamp],
        )
        .in_store(db_path)?;
    tracing::info!(%id, "updated product");

    Ok(Product {
        id: current.id,
        name,
        category,
        price,
        stock,
        created_at: current.created_at,
        updated_at: timestamp,
    })
}

pub fn delete(connection: &Connection, db_path: &Path, id: &str) -> ClientResult<()> {
    let removed = connection
        .execute("DELETE FROM products WHERE id = ?1", [id])
        .in_store(db_path)?;
    if removed == 0 {
        return Err(ClientError::record_not_found("product", id));
    }
    tracing::info!(%id, "deleted product");
    Ok(())
}

fn product_from_row(row: &Row<'_>) -> rusqlite::Result<Product> {
    let raw_stock = row.get::<_, String>(4)?;
    let stock = raw_stock.parse().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            rusqlite::types::Type::Text,
            format!("unknown stock status `{raw_stock}`").into(),
        )
    })?;
    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        price: row.get(3)?,
        stock,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}
