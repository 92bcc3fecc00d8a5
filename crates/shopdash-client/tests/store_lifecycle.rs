use std::fs;

use rusqlite::Connection;
use shopdash_client::store::{Store, io_failure};
use tempfile::tempdir;

fn object_exists(connection: &Connection, object_type: &str, object_name: &str) -> bool {
    connection
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = ?1 AND name = ?2",
            [object_type, object_name],
            |_row| Ok(true),
        )
        .unwrap_or(false)
}

fn user_version(connection: &Connection) -> Option<i64> {
    connection
        .query_row("PRAGMA user_version", [], |row| row.get::<_, i64>(0))
        .ok()
}

#[test]
fn open_creates_shop_db_at_home_override() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("shop-home");

        let opened = Store::open(Some(&home));
        assert!(opened.is_ok());
        if let Ok(store) = opened {
            assert!(store.db_path().ends_with("shop.db"));
            assert_eq!(store.home(), home.as_path());
            assert!(home.join("shop.db").exists());
        }
    }
}

#[test]
fn reopening_keeps_the_schema_at_version_one() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("shop-home");

        let first = Store::open(Some(&home));
        assert!(first.is_ok());
        let second = Store::open(Some(&home));
        assert!(second.is_ok());

        if let (Ok(first_store), Ok(second_store)) = (first, second) {
            assert_eq!(first_store.db_path(), second_store.db_path());
            let connection = second_store.connect();
            assert!(connection.is_ok());
            if let Ok(conn) = connection {
                assert_eq!(user_version(&conn), Some(1));
            }
        }
    }
}

#[test]
fn open_creates_every_table_and_index() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let opened = Store::open(Some(&temp_dir.path().join("shop-home")));
        assert!(opened.is_ok());
        if let Ok(store) = opened {
            let connection = store.connect();
            assert!(connection.is_ok());
            if let Ok(conn) = connection {
                for table in ["salespersons", "products", "sales", "purchases", "settings"] {
                    assert!(object_exists(&conn, "table", table), "missing table {table}");
                }
                for index in ["idx_sales_date", "idx_sales_salesperson_id", "idx_purchases_date"] {
                    assert!(object_exists(&conn, "index", index), "missing index {index}");
                }
            }
        }
    }
}

#[test]
fn connections_enforce_foreign_keys() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let opened = Store::open(Some(&temp_dir.path().join("shop-home")));
        assert!(opened.is_ok());
        if let Ok(store) = opened {
            let connection = store.connect();
            assert!(connection.is_ok());
            if let Ok(conn) = connection {
                let enabled = conn.query_row("PRAGMA foreign_keys", [], |row| row.get::<_, i64>(0));
                assert_eq!(enabled.ok(), Some(1));
            }
        }
    }
}

#[test]
fn dropped_sales_index_is_rebuilt_on_open() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("shop-home");
        let first = Store::open(Some(&home));
        assert!(first.is_ok());
        if let Ok(store) = first {
            let connection = Connection::open(store.db_path());
            assert!(connection.is_ok());
            if let Ok(conn) = connection {
                assert!(conn.execute_batch("DROP INDEX idx_sales_date;").is_ok());
            }
        }

        let reopened = Store::open(Some(&home));
        assert!(reopened.is_ok());
        if let Ok(store) = reopened {
            let connection = store.connect();
            assert!(connection.is_ok());
            if let Ok(conn) = connection {
                assert!(object_exists(&conn, "index", "idx_sales_date"));
            }
        }
    }
}

#[test]
fn missing_sales_table_is_reported_as_corrupt() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("shop-home");
        let first = Store::open(Some(&home));
        assert!(first.is_ok());
        if let Ok(store) = first {
            let connection = Connection::open(store.db_path());
            assert!(connection.is_ok());
            if let Ok(conn) = connection {
                assert!(conn.execute_batch("DROP TABLE sales;").is_ok());
            }
        }

        let result = Store::open(Some(&home));
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "store_corrupt");
        }
    }
}

#[test]
fn non_database_file_is_reported_as_corrupt() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("shop-home");
        assert!(fs::create_dir_all(&home).is_ok());
        assert!(fs::write(home.join("shop.db"), vec![b'x'; 4096]).is_ok());

        let result = Store::open(Some(&home));
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "store_corrupt");
        }
    }
}

#[test]
fn permission_errors_map_to_permission_denied_code() {
    let error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let mapped = io_failure(std::path::Path::new("/tmp/shop-home"), &error);
    assert_eq!(mapped.code, "store_init_permission_denied");
    assert!(mapped.recovery_steps[0].contains("SHOPDASH_HOME"));
}
