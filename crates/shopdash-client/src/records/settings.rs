use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};

use crate::dates::audit_timestamp;
use crate::engine::SalesTargets;
use crate::records::require_non_negative;
use crate::store::InStore;
use crate::{ClientError, ClientResult};

pub const SALES_TARGETS_KEY: &str = "sales_targets";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TargetChanges {
    pub daily: Option<i64>,
    pub weekly: Option<i64>,
    pub monthly: Option<i64>,
    pub yearly: Option<i64>,
}

impl TargetChanges {
    pub fn is_empty(&self) -> bool {
        self.daily.is_none() && self.weekly.is_none() && self.monthly.is_none() && self.yearly.is_none()
    }

    fn apply(&self, current: SalesTargets) -> SalesTargets {
        SalesTargets {
            daily: self.daily.unwrap_or(current.daily),
            weekly: self.weekly.unwrap_or(current.weekly),
            monthly: self.monthly.unwrap_or(current.monthly),
            yearly: self.yearly.unwrap_or(current.yearly),
        }
    }
}

/// Stored targets, writing the defaults first when none exist yet.
pub fn load_sales_targets(connection: &Connection, db_path: &Path) -> ClientResult<SalesTargets> {
    let stored = connection
        .query_row(
            "SELECT value FROM settings WHERE key = ?1 LIMIT 1",
            [SALES_TARGETS_KEY],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .in_store(db_path)?;

    match stored {
        Some(raw) => serde_json::from_str::<SalesTargets>(&raw)
            .map_err(|_| ClientError::store_corrupt(db_path)),
        None => {
            let defaults = SalesTargets::default();
            write_sales_targets(connection, db_path, &defaults)?;
            tracing::debug!("seeded default sales targets");
            Ok(defaults)
        }
    }
}

pub fn update_sales_targets(
    connection: &Connection,
    db_path: &Path,
    changes: &TargetChanges,
) -> ClientResult<SalesTargets> {
    for (field_name, value) in [
        ("daily", changes.daily),
        ("weekly", changes.weekly),
        ("monthly", changes.monthly),
        ("yearly", changes.yearly),
    ] {
        if let Some(amount) = value {
            require_non_negative(field_name, amount)?;
        }
    }

    let current = load_sales_targets(connection, db_path)?;
    let merged = changes.apply(current);
    write_sales_targets(connection, db_path, &merged)?;
    tracing::info!(
        daily = merged.daily,
        weekly = merged.weekly,
        monthly = merged.monthly,
        yearly = merged.yearly,
        "updated sales targets"
    );
    Ok(merged)
}

fn write_sales_targets(
    connection: &Connection,
    db_path: &Path,
    targets: &SalesTargets,
) -> ClientResult<()> {
    let value = serde_json::to_string(targets)
        .map_err(|error| ClientError::internal_serialization(&error.to_string()))?;
    connection
        .execute(
            "INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![SALES_TARGETS_KEY, value, audit_timestamp()],
        )
        .in_store(db_path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::TargetChanges;
    use crate::engine::SalesTargets;

    #[test]
    fn partial_changes_keep_untouched_targets() {
        let changes = TargetChanges {
            weekly: Some(200_000),
            ..TargetChanges::default()
        };
        let merged = changes.apply(SalesTargets::default());
        assert_eq!(merged.daily, 30_000);
        assert_eq!(merged.weekly, 200_000);
        assert_eq!(merged.yearly, 8_400_000);
        assert!(!changes.is_empty());
        assert!(TargetChanges::default().is_empty());
    }
}
