use std::path::Path;

use rusqlite::{Connection, OptionalExtension, Row, params};
use ulid::Ulid;

use crate::dates::audit_timestamp;
use crate::records::{
    NewSalesperson, Salesperson, SalespersonChanges, optional_text, require_text,
};
use crate::store::InStore;
use crate::{ClientError, ClientResult};

const SELECT_SALESPERSONS: &str =
    "SELECT id, name, email, phone, is_active, created_at, updated_at FROM salespersons";

pub fn insert(
    connection: &Connection,
    db_path: &Path,
    salesperson: &NewSalesperson,
) -> ClientResult<Salesperson> {
    let name = require_text("name", &salesperson.name)?;
    let email = optional_text(salesperson.email.as_deref());
    let phone = optional_text(salesperson.phone.as_deref());

    let id = format!("sp_{}", Ulid::new());
    let timestamp = audit_timestamp();
    connection
        .execute(
            "INSERT INTO salespersons (id, name, email, phone, is_active, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
            params![&id, &name, &email, &phone, salesperson.is_active, &timestamp],
        )
        .in_store(db_path)?;
    tracing::info!(%id, %name, "added salesperson");

    Ok(Salesperson {
        id,
        name,
        email,
        phone,
        is_active: salesperson.is_active,
        created_at: timestamp.clone(),
        updated_at: timestamp,
    })
}

/// Salespersons ordered by name.
pub fn list(connection: &Connection, db_path: &Path) -> ClientResult<Vec<Salesperson>> {
    let mut statement = connection
        .prepare(&format!("{SELECT_SALESPERSONS} ORDER BY name ASC, id ASC"))
        .in_store(db_path)?;
    let rows_iter = statement
        .query_map([], salesperson_from_row)
        .in_store(db_path)?;

    let mut salespersons = Vec::new();
    for row in rows_iter {
        salespersons.push(row.in_store(db_path)?);
    }
    Ok(salespersons)
}

pub fn find(
    connection: &Connection,
    db_path: &Path,
    id: &str,
) -> ClientResult<Option<Salesperson>> {
    connection
        .query_row(
            &format!("{SELECT_SALESPERSONS} WHERE id = ?1"),
            [id],
            salesperson_from_row,
        )
        .optional()
        .in_store(db_path)
}

/// First salesperson whose name matches exactly after trimming.
pub fn find_by_name(
    connection: &Connection,
    db_path: &Path,
    name: &str,
) -> ClientResult<Option<Salesperson>> {
    connection
        .query_row(
            &format!("{SELECT_SALESPERSONS} WHERE name = ?1 ORDER BY created_at ASC, id ASC LIMIT 1"),
            [name.trim()],
            salesperson_from_row,
        )
        .optional()
        .in_store(db_path)
}

pub fn update(
    connection: &Connection,
    db_path: &Path,
    id: &str,
    changes: &SalespersonChanges,
) -> ClientResult<Salesperson> {
    let Some(current) = find(connection, db_path, id)? else {
        return Err(ClientError::record_not_found("salesperson", id));
    };

    let name = match &changes.name {
        Some(value) => require_text("name", value)?,
        None => current.name,
    };
    let email = match &changes.email {
        Some(value) => optional_text(Some(value)),
        None => current.email,
    };
    let phone = match &changes.phone {
        Some(value) => optional_text(Some(value)),
        None => current.phone,
    };
    let is_active = changes.is_active.unwrap_or(current.is_active);
    let timestamp = audit_timestamp();

    connection
        .execute(
            "UPDATE salespersons
             SET name = ?2, email = ?3, phone = ?4, is_active = ?5, updated_at = ?6
             WHERE id = ?1",
            params![id, &name, &email, &phone, is_active, &timestamp],
        )
        .in_store(db_path)?;
    tracing::info!(%id, "updated salesperson");

    Ok(Salesperson {
        id: current.id,
        name,
        email,
        phone,
        is_active,
        created_at: current.created_at,
        updated_at: timestamp,
    })
}

/// Removes the salesperson; their sales keep existing without an owner.
pub fn delete(connection: &Connection, db_path: &Path, id: &str) -> ClientResult<()> {
    let removed = connection
        .execute("DELETE FROM salespersons WHERE id = ?1", [id])
        .in_store(db_path)?;
    if removed == 0 {
        return Err(ClientError::record_not_found("salesperson", id));
    }
    tracing::info!(%id, "deleted salesperson");
    Ok(())
}

fn salesperson_from_row(row: &Row<'_>) -> rusqlite::Result<Salesperson> {
    Ok(Salesperson {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        is_active: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}
