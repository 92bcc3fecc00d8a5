use std::io;

use serde_json::Value;

use super::format::{array_field, i64_field, key_value_rows, str_field};

const MAX_LISTED_ISSUES: usize = 10;

pub fn render_export(data: &Value) -> io::Result<String> {
    let mut lines = vec![format!(
        "Exported {} for {}",
        str_field(data, "kind"),
        str_field(data, "month")
    )];
    lines.extend(key_value_rows(
        &[
            ("File:", str_field(data, "path").to_string()),
            ("Rows:", i64_field(data, "row_count").to_string()),
        ],
        2,
    ));
    Ok(lines.join("\n"))
}

pub fn render_import(data: &Value) -> io::Result<String> {
    let source = match data.get("source_ref").and_then(Value::as_str) {
        Some(path) => path.to_string(),
        None => str_field(data, "source_kind").to_string(),
    };
    let mut lines = vec![format!(
        "Imported {} for {}",
        str_field(data, "kind"),
        str_field(data, "month")
    )];
    lines.extend(key_value_rows(
        &[
            ("Source:", source),
            ("Rows read:", i64_field(data, "rows_read").to_string()),
            ("Added:", i64_field(data, "added_count").to_string()),
            ("Skipped (other months):", i64_field(data, "skipped_count").to_string()),
            ("Errors:", i64_field(data, "error_count").to_string()),
        ],
        2,
    ));

    let issues = array_field(data, "issues");
    if !issues.is_empty() {
        lines.push(String::new());
        lines.push("Rows with errors:".to_string());
        for issue in issues.iter().take(MAX_LISTED_ISSUES) {
            lines.push(format!(
                "  row {}: {}",
                i64_field(issue, "row"),
                str_field(issue, "reason")
            ));
        }
        if issues.len() > MAX_LISTED_ISSUES {
            lines.push(format!(
                "  ... and {} more (use --json for the full list)",
                issues.len() - MAX_LISTED_ISSUES
            ));
        }
    }

    Ok(lines.join("\n"))
}
