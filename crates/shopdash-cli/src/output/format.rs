use serde_json::Value;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

const INDENT: usize = 2;
const COLUMN_GAP: usize = 2;

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    if entries.is_empty() {
        return Vec::new();
    }

    let label_width = entries
        .iter()
        .map(|(label, _)| display_width(label))
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| format!("{padding}{}  {value}", pad(label, label_width, Align::Left)))
        .collect()
}

/// Renders a header row plus one line per row, padding by display width so
/// full-width product names stay aligned.
pub fn render_table(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let mut widths = columns
        .iter()
        .map(|column| display_width(column.name))
        .collect::<Vec<usize>>();
    for row in rows {
        for (index, value) in row.iter().enumerate() {
            if let Some(slot) = widths.get_mut(index) {
                *slot = (*slot).max(display_width(value));
            }
        }
    }

    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();
    let mut output = vec![format_row(columns, &header, &widths)];
    for row in rows {
        output.push(format_row(columns, row, &widths));
    }
    output
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let pieces = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let width = widths.get(index).copied().unwrap_or(0);
            let value = cells.get(index).map(String::as_str).unwrap_or("");
            pad(value, width, column.align)
        })
        .collect::<Vec<String>>();

    let line = format!("{}{}", " ".repeat(INDENT), pieces.join(&" ".repeat(COLUMN_GAP)));
    line.trim_end().to_string()
}

fn pad(value: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(display_width(value)));
    match align {
        Align::Left => format!("{value}{fill}"),
        Align::Right => format!("{fill}{value}"),
    }
}

/// Terminal column count, treating East Asian wide characters as two cells.
pub fn display_width(value: &str) -> usize {
    value.chars().map(char_width).sum()
}

fn char_width(ch: char) -> usize {
    match ch as u32 {
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3041..=0x33FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xA000..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6 => 2,
        _ => 1,
    }
}

/// `¥1,234,567`, with a leading minus for losses.
pub fn format_yen(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-¥{grouped}")
    } else {
        format!("¥{grouped}")
    }
}

/// One-decimal percentage; `null` (an unreachable target) prints as `n/a`.
pub fn format_rate(value: &Value) -> String {
    match value.as_f64() {
        Some(rate) if rate.is_finite() => format!("{rate:.1}%"),
        _ => "n/a".to_string(),
    }
}

pub fn signed_rate(value: &Value) -> String {
    match value.as_f64() {
        Some(rate) if rate.is_finite() && rate > 0.0 => format!("+{rate:.1}%"),
        Some(rate) if rate.is_finite() => format!("{rate:.1}%"),
        _ => "n/a".to_string(),
    }
}

pub fn yen_field(value: &Value, key: &str) -> String {
    format_yen(i64_field(value, key))
}

pub fn i64_field(value: &Value, key: &str) -> i64 {
    value.get(key).and_then(Value::as_i64).unwrap_or(0)
}

pub fn str_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("")
}

pub fn array_field<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Store timestamps come back as `YYYY-MM-DDTHH:MM:SS`; tables show minutes.
pub fn short_timestamp(value: &str) -> String {
    value.get(..16).unwrap_or(value).replace('T', " ")
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::{
        Align, Column, display_width, format_rate, format_yen, key_value_rows, render_table,
        short_timestamp, signed_rate,
    };

    #[test]
    fn key_value_rows_align_labels() {
        let rows = key_value_rows(
            &[
                ("Rows read:", "100".to_string()),
                ("Errors:", "0".to_string()),
            ],
            2,
        );

        assert_eq!(rows[0], "  Rows read:  100");
        assert_eq!(rows[1], "  Errors:     0");
    }

    #[test]
    fn yen_amounts_group_thousands() {
        assert_eq!(format_yen(0), "¥0");
        assert_eq!(format_yen(999), "¥999");
        assert_eq!(format_yen(1_000), "¥1,000");
        assert_eq!(format_yen(8_400_000), "¥8,400,000");
        assert_eq!(format_yen(-12_500), "-¥12,500");
    }

    #[test]
    fn rates_fall_back_to_na_for_null() {
        assert_eq!(format_rate(&json!(60.0)), "60.0%");
        assert_eq!(format_rate(&Value::Null), "n/a");
        assert_eq!(signed_rate(&json!(12.345)), "+12.3%");
        assert_eq!(signed_rate(&json!(-50)), "-50.0%");
        assert_eq!(signed_rate(&Value::Null), "n/a");
    }

    #[test]
    fn wide_characters_count_double() {
        assert_eq!(display_width("Oil"), 3);
        assert_eq!(display_width("不明"), 4);
        assert_eq!(display_width("CBDオイル"), 9);
    }

    #[test]
    fn table_aligns_wide_cells() {
        let columns = [
            Column {
                name: "Product",
                align: Align::Left,
            },
            Column {
                name: "Amount",
                align: Align::Right,
            },
        ];
        let rows = vec![
            vec!["オイル".to_string(), "¥4,800".to_string()],
            vec!["Balm".to_string(), "¥500".to_string()],
        ];

        let rendered = render_table(&columns, &rows);
        assert_eq!(rendered.len(), 3);
        assert_eq!(rendered[0], "  Product  Amount");
        assert_eq!(rendered[1], "  オイル   ¥4,800");
        assert_eq!(rendered[2], "  Balm       ¥500");
    }

    #[test]
    fn short_timestamp_drops_seconds() {
        assert_eq!(short_timestamp("2024-03-15T12:30:00"), "2024-03-15 12:30");
        assert_eq!(short_timestamp("2024-03"), "2024-03");
    }
}
