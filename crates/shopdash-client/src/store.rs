//! The on-disk shop store: where it lives, how it is opened, and how SQLite
//! failures surface as client errors.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{Connection, ffi::ErrorCode};

use crate::migrations::{SCHEMA_VERSION, SHOP_INDEXES, SHOP_TABLES, run_pending};
use crate::{ClientError, ClientResult};

pub const HOME_ENV_VAR: &str = "SHOPDASH_HOME";

const DEFAULT_HOME_DIR: &str = ".shopdash";
const DB_FILE_NAME: &str = "shop.db";
const BUSY_TIMEOUT: Duration = Duration::from_millis(250);

/// A migrated shop database. Every command opens one and then connects as
/// many times as it needs.
#[derive(Debug, Clone)]
pub struct Store {
    home: PathBuf,
    db_path: PathBuf,
}

impl Store {
    /// Opens the store under `home_override`, `$SHOPDASH_HOME`, or
    /// `~/.shopdash`, creating and migrating it on first use.
    pub fn open(home_override: Option<&Path>) -> ClientResult<Self> {
        let home = locate_home(home_override)?;
        create_private_dir(&home)?;

        let store = Self {
            db_path: home.join(DB_FILE_NAME),
            home,
        };
        let mut connection = store.connect()?;
        run_pending(&mut connection)
            .map_err(|error| migration_failure(&store.db_path, &error))?;
        store.check_schema(&connection)?;

        tracing::debug!(db_path = %store.db_path.display(), "shop store ready");
        Ok(store)
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// A fresh connection with foreign keys enforced, so removing a
    /// salesperson detaches their sales.
    pub fn connect(&self) -> ClientResult<Connection> {
        let connection = Connection::open(&self.db_path).in_store(&self.db_path)?;
        connection.busy_timeout(BUSY_TIMEOUT).in_store(&self.db_path)?;
        connection
            .pragma_update(None, "foreign_keys", "ON")
            .in_store(&self.db_path)?;
        Ok(connection)
    }

    /// A dropped index only slows queries down and is rebuilt; a missing
    /// table or an unknown schema version means the file is not ours.
    fn check_schema(&self, connection: &Connection) -> ClientResult<()> {
        let version = connection
            .query_row("PRAGMA user_version", [], |row| row.get::<_, i64>(0))
            .in_store(&self.db_path)?;
        if version != SCHEMA_VERSION {
            return Err(ClientError::store_corrupt(&self.db_path));
        }

        let tables = self.object_names(connection, "table")?;
        if let Some(missing) = SHOP_TABLES.iter().find(|table| !tables.contains(**table)) {
            tracing::warn!(table = *missing, "shop table missing");
            return Err(ClientError::store_corrupt(&self.db_path));
        }

        let indexes = self.object_names(connection, "index")?;
        for index in SHOP_INDEXES.iter().filter(|index| !indexes.contains(index.name)) {
            connection.execute_batch(index.sql).in_store(&self.db_path)?;
            tracing::info!(index = index.name, "rebuilt missing index");
        }

        Ok(())
    }

    fn object_names(&self, connection: &Connection, kind: &str) -> ClientResult<HashSet<String>> {
        let mut statement = connection
            .prepare("SELECT name FROM sqlite_master WHERE type = ?1")
            .in_store(&self.db_path)?;
        let names = statement
            .query_map([kind], |row| row.get::<_, String>(0))
            .in_store(&self.db_path)?;
        names
            .collect::<rusqlite::Result<HashSet<String>>>()
            .in_store(&self.db_path)
    }
}

/// Attaches the store path to a SQLite failure.
pub(crate) trait InStore<T> {
    fn in_store(self, db_path: &Path) -> ClientResult<T>;
}

impl<T> InStore<T> for rusqlite::Result<T> {
    fn in_store(self, db_path: &Path) -> ClientResult<T> {
        self.map_err(|error| sqlite_failure(db_path, &error))
    }
}

pub fn sqlite_failure(path: &Path, error: &rusqlite::Error) -> ClientError {
    match error.sqlite_error_code() {
        Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) => {
            ClientError::store_locked(path)
        }
        Some(ErrorCode::NotADatabase) => ClientError::store_corrupt(path),
        Some(ErrorCode::CannotOpen | ErrorCode::ReadOnly) => {
            ClientError::store_init_permission_denied(path, &error.to_string())
        }
        _ => ClientError::store_init_failed(path, &error.to_string()),
    }
}

pub fn io_failure(path: &Path, error: &std::io::Error) -> ClientError {
    match error.kind() {
        std::io::ErrorKind::PermissionDenied => {
            ClientError::store_init_permission_denied(path, &error.to_string())
        }
        _ => ClientError::store_init_failed(path, &error.to_string()),
    }
}

fn migration_failure(db_path: &Path, error: &rusqlite_migration::Error) -> ClientError {
    if let rusqlite_migration::Error::RusqliteError { err, .. } = error {
        let mapped = sqlite_failure(db_path, err);
        if mapped.code != "store_init_failed" {
            return mapped;
        }
    }
    ClientError::migration_failed(db_path, &error.to_string())
}

fn locate_home(home_override: Option<&Path>) -> ClientResult<PathBuf> {
    let home = match home_override {
        Some(path) => path.to_path_buf(),
        None => match std::env::var_os(HOME_ENV_VAR) {
            Some(value) => PathBuf::from(value),
            None => home::home_dir()
                .map(|dir| dir.join(DEFAULT_HOME_DIR))
                .ok_or_else(|| {
                    ClientError::store_init_failed(
                        Path::new("."),
                        "Could not resolve a home directory for the shop store.",
                    )
                })?,
        },
    };

    if home.is_absolute() {
        return Ok(home);
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(&home))
        .map_err(|error| io_failure(&home, &error))
}

fn create_private_dir(path: &Path) -> ClientResult<()> {
    fs::create_dir_all(path).map_err(|error| io_failure(path, &error))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        // Sales data stays readable by the owner only; failure is not fatal.
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o700));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{io_failure, locate_home};

    #[test]
    fn relative_homes_resolve_against_the_working_directory() {
        let resolved = locate_home(Some(Path::new("shop-home")));
        assert!(resolved.is_ok());
        if let Ok(path) = resolved {
            assert!(path.is_absolute());
            assert!(path.ends_with("shop-home"));
        }
    }

    #[test]
    fn other_io_errors_are_init_failures() {
        let error = std::io::Error::other("disk full");
        let mapped = io_failure(Path::new("/tmp/shop-home"), &error);
        assert_eq!(mapped.code, "store_init_failed");
    }
}
