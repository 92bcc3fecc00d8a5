use std::io;

use serde_json::Value;
use shopdash_client::engine::charts::{LABEL_MAX_CHARS, truncate_label};

use super::format::{
    Align, Column, array_field, format_yen, i64_field, render_table, str_field, yen_field,
};

const BAR_WIDTH: i64 = 30;

pub fn render_daily(data: &Value) -> io::Result<String> {
    let points = array_field(data, "points");
    let peak = points
        .iter()
        .map(|point| i64_field(point, "total"))
        .max()
        .unwrap_or(0);

    let mut lines = vec![format!(
        "Daily sales for {} (total {})",
        str_field(data, "reference_month"),
        yen_field(data, "total_amount")
    )];
    let columns = [
        Column {
            name: "Day",
            align: Align::Right,
        },
        Column {
            name: "Amount",
            align: Align::Right,
        },
        Column {
            name: "",
            align: Align::Left,
        },
    ];
    let rows = points
        .iter()
        .map(|point| {
            let total = i64_field(point, "total");
            vec![
                str_field(point, "label").to_string(),
                format_yen(total),
                bar(total, peak),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(render_table(&columns, &rows));
    Ok(lines.join("\n"))
}

pub fn render_categories(data: &Value) -> io::Result<String> {
    let shares = array_field(data, "shares");
    let scope = match data.get("reference_month").and_then(Value::as_str) {
        Some(month) => format!("for {month}"),
        None => "across all months".to_string(),
    };
    let mut lines = vec![format!(
        "Sales by category {scope} (total {})",
        yen_field(data, "total_amount")
    )];
    if shares.is_empty() {
        lines.push("  No sales recorded.".to_string());
        return Ok(lines.join("\n"));
    }

    let columns = [
        Column {
            name: "Category",
            align: Align::Left,
        },
        Column {
            name: "Amount",
            align: Align::Right,
        },
        Column {
            name: "Share",
            align: Align::Right,
        },
    ];
    let rows = shares
        .iter()
        .map(|share| {
            vec![
                truncate_label(str_field(share, "category"), LABEL_MAX_CHARS),
                yen_field(share, "total"),
                format!("{}%", i64_field(share, "percentage")),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(render_table(&columns, &rows));
    Ok(lines.join("\n"))
}

pub fn render_comparison(data: &Value) -> io::Result<String> {
    let current_year = i64_field(data, "current_year").to_string();
    let previous_year = i64_field(data, "previous_year").to_string();
    let mut lines = vec![format!(
        "Sales {current_year} vs {previous_year} ({} view)",
        str_field(data, "view")
    )];

    let columns = [
        Column {
            name: "Month",
            align: Align::Right,
        },
        Column {
            name: previous_year.as_str(),
            align: Align::Right,
        },
        Column {
            name: current_year.as_str(),
            align: Align::Right,
        },
    ];
    let rows = array_field(data, "months")
        .iter()
        .map(|month| {
            vec![
                format!("{}月", i64_field(month, "month")),
                yen_field(month, "previous_total"),
                yen_field(month, "current_total"),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(render_table(&columns, &rows));
    Ok(lines.join("\n"))
}

fn bar(total: i64, peak: i64) -> String {
    if peak <= 0 || total <= 0 {
        return String::new();
    }
    let cells = (total * BAR_WIDTH + peak - 1) / peak;
    "#".repeat(usize::try_from(cells).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{bar, render_categories, render_comparison, render_daily};

    #[test]
    fn bars_scale_to_the_busiest_day() {
        assert_eq!(bar(0, 100), "");
        assert_eq!(bar(100, 100).len(), 30);
        assert_eq!(bar(50, 100).len(), 15);
        assert_eq!(bar(1, 100).len(), 1);
    }

    #[test]
    fn daily_chart_lists_every_point() {
        let data = json!({
            "reference_month": "2024-02",
            "total_amount": 1500,
            "points": [
                { "date": "2024-02-01", "label": "2/1", "total": 1000 },
                { "date": "2024-02-02", "label": "2/2", "total": 0 },
                { "date": "2024-02-03", "label": "2/3", "total": 500 }
            ]
        });

        let rendered = render_daily(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Daily sales for 2024-02 (total ¥1,500)"));
            assert!(text.contains("2/2"));
            assert!(text.contains(&"#".repeat(30)));
            assert_eq!(text.lines().count(), 5);
        }
    }

    #[test]
    fn category_labels_are_truncated() {
        let data = json!({
            "reference_month": "2024-03",
            "total_amount": 1000,
            "shares": [
                { "category": "Premium full spectrum oils", "total": 750, "percentage": 75 },
                { "category": "Balm", "total": 250, "percentage": 25 }
            ]
        });

        let rendered = render_categories(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("Premium full sp..."));
            assert!(!text.contains("Premium full spectrum"));
            assert!(text.contains("75%"));
            assert!(text.starts_with("Sales by category for 2024-03"));
        }
    }

    #[test]
    fn categories_across_every_month_say_so() {
        let data = json!({
            "reference_month": null,
            "total_amount": 0,
            "shares": []
        });

        let rendered = render_categories(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Sales by category across all months (total ¥0)"));
            assert!(text.contains("No sales recorded."));
        }
    }

    #[test]
    fn comparison_uses_years_as_column_headers() {
        let data = json!({
            "view": "monthly",
            "current_year": 2024,
            "previous_year": 2023,
            "months": [
                { "month": 1, "current_year": 2024, "current_total": 900, "previous_total": 300 }
            ]
        });

        let rendered = render_comparison(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("Sales 2024 vs 2023 (monthly view)"));
            assert!(text.contains("2023"));
            assert!(text.contains("1月"));
            assert!(text.contains("¥900"));
        }
    }
}
