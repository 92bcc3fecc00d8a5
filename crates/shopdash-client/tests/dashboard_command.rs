use std::path::Path;

use serde_json::Value;
use shopdash_client::commands::dashboard::{self, DashboardOptions};
use shopdash_client::commands::purchases::{self, PurchaseAddOptions};
use shopdash_client::commands::sales::{self, SaleAddOptions};
use shopdash_client::commands::targets;
use shopdash_client::records::settings::TargetChanges;
use tempfile::tempdir;

const NOW: &str = "2024-03-15T12:00";

fn add_sale(home: &Path, date: &str, product: &str, amount: i64) {
    let result = sales::add_with_options(SaleAddOptions {
        date: Some(date.to_string()),
        product: product.to_string(),
        category: "CBD".to_string(),
        quantity: 1,
        amount,
        home_override: Some(home),
        ..SaleAddOptions::default()
    });
    assert!(result.is_ok());
}

fn add_purchase(home: &Path, date: &str, amount: i64) {
    let result = purchases::add_with_options(PurchaseAddOptions {
        date: Some(date.to_string()),
        product: "Hemp extract".to_string(),
        amount,
        home_override: Some(home),
        ..PurchaseAddOptions::default()
    });
    assert!(result.is_ok());
}

fn seed(home: &Path) {
    add_sale(home, "2024-03-15T09:00", "Oil", 1_000);
    add_sale(home, "2024-03-14T23:59", "Balm", 500);
    add_sale(home, "2024-03-10T15:00", "Balm", 2_000);
    add_sale(home, "2024-02-20T15:00", "Gummy", 700);
    add_purchase(home, "2024-03-15T08:00", 400);
}

fn dashboard_data(home: &Path, tab: &str) -> Option<Value> {
    let result = dashboard::run_with_options(DashboardOptions {
        tab: Some(tab.to_string()),
        month: Some("2024-03".to_string()),
        now: Some(NOW.to_string()),
        week_start: None,
        home_override: Some(home),
    });
    assert!(result.is_ok());
    result.ok().map(|envelope| envelope.data)
}

fn number_at(data: &Value, pointer: &str) -> Option<f64> {
    data.pointer(pointer).and_then(Value::as_f64)
}

#[test]
fn daily_tab_reports_today_with_previous_day_comparison() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("shop-home");
        seed(&home);

        let data = dashboard_data(&home, "daily");
        assert!(data.is_some());
        if let Some(value) = data {
            assert_eq!(number_at(&value, "/sales/summary/total_amount"), Some(1_000.0));
            assert_eq!(number_at(&value, "/sales/summary/sales_count"), Some(1.0));
            assert_eq!(number_at(&value, "/sales/summary/comparison_rate"), Some(100.0));
            assert_eq!(
                value.pointer("/sales/top_product/name").and_then(Value::as_str),
                Some("Oil")
            );
            assert_eq!(number_at(&value, "/profit/profit"), Some(600.0));
            assert_eq!(number_at(&value, "/profit/profit_rate"), Some(60.0));
            assert_eq!(
                value.pointer("/window/start").and_then(Value::as_str),
                Some("2024-03-15")
            );
        }
    }
}

#[test]
fn overview_tab_is_the_monthly_view() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("shop-home");
        seed(&home);

        let data = dashboard_data(&home, "overview");
        assert!(data.is_some());
        if let Some(value) = data {
            assert_eq!(value.get("period").and_then(Value::as_str), Some("monthly"));
            assert_eq!(number_at(&value, "/sales/summary/total_amount"), Some(3_500.0));
            assert_eq!(number_at(&value, "/sales/summary/target_amount"), Some(700_000.0));
            assert_eq!(number_at(&value, "/sales/summary/comparison_rate"), Some(400.0));
            assert_eq!(
                value.pointer("/sales/top_product/name").and_then(Value::as_str),
                Some("Balm")
            );
            let recent = value.get("recent_sales").and_then(Value::as_array).map(Vec::len);
            assert_eq!(recent, Some(4));
        }
    }
}

#[test]
fn empty_store_has_no_sales_or_profit_sections() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("shop-home");

        let data = dashboard_data(&home, "monthly");
        assert!(data.is_some());
        if let Some(value) = data {
            assert_eq!(value.get("sales"), Some(&Value::Null));
            assert_eq!(value.get("profit"), Some(&Value::Null));
        }

        add_sale(&home, "2024-03-01T10:00", "Oil", 100);
        let with_sales = dashboard_data(&home, "monthly");
        assert!(with_sales.is_some());
        if let Some(value) = with_sales {
            assert!(value.get("sales").is_some_and(Value::is_object));
            assert_eq!(value.get("profit"), Some(&Value::Null));
        }
    }
}

#[test]
fn zero_target_yields_null_achievement_rate() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("shop-home");
        seed(&home);
        let updated = targets::set_with_home_override(
            TargetChanges {
                daily: Some(0),
                ..TargetChanges::default()
            },
            Some(&home),
        );
        assert!(updated.is_ok());

        let data = dashboard_data(&home, "daily");
        assert!(data.is_some());
        if let Some(value) = data {
            assert_eq!(
                value.pointer("/sales/summary/achievement_rate"),
                Some(&Value::Null)
            );
        }
    }
}

#[test]
fn unknown_tab_is_an_invalid_argument() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("shop-home");
        let result = dashboard::run_with_options(DashboardOptions {
            tab: Some("quarterly".to_string()),
            now: Some(NOW.to_string()),
            home_override: Some(&home),
            ..DashboardOptions::default()
        });
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "invalid_argument");
        }
    }
}
