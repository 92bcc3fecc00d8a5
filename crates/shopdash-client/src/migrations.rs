use rusqlite::Connection;
use rusqlite_migration::{M, Migrations};

const BOOTSTRAP_SQL: &str = include_str!("migrations/0001_bootstrap.sql");

/// `PRAGMA user_version` once every migration has run.
pub const SCHEMA_VERSION: i64 = 1;

pub const SHOP_TABLES: [&str; 5] = ["salespersons", "products", "sales", "purchases", "settings"];

pub struct ShopIndex {
    pub name: &'static str,
    pub sql: &'static str,
}

/// Indexes are not part of a migration; the store creates whichever are
/// missing each time it opens.
pub const SHOP_INDEXES: [ShopIndex; 3] = [
    ShopIndex {
        name: "idx_sales_date",
        sql: "CREATE INDEX IF NOT EXISTS idx_sales_date ON sales (date DESC)",
    },
    ShopIndex {
        name: "idx_sales_salesperson_id",
        sql: "CREATE INDEX IF NOT EXISTS idx_sales_salesperson_id ON sales (salesperson_id)",
    },
    ShopIndex {
        name: "idx_purchases_date",
        sql: "CREATE INDEX IF NOT EXISTS idx_purchases_date ON purchases (date DESC)",
    },
];

pub fn run_pending(conn: &mut Connection) -> rusqlite_migration::Result<()> {
    Migrations::new(vec![M::up(BOOTSTRAP_SQL)]).to_latest(conn)
}
