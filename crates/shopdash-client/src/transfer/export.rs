use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::dates::format_csv_date;
use crate::records::{Purchase, Sale};
use crate::transfer::{PURCHASE_HEADERS, SALES_HEADERS, UTF8_BOM};
use crate::{ClientError, ClientResult};

pub const UNKNOWN_SALESPERSON: &str = "不明";

pub fn sales_csv(sales: &[Sale]) -> ClientResult<String> {
    let rows = sales.iter().map(|sale| {
        vec![
            format_csv_date(sale.date),
            sale.product_name.clone(),
            sale.category.clone(),
            sale.quantity.to_string(),
            sale.amount.to_string(),
            sale.salesperson_name
                .clone()
                .unwrap_or_else(|| UNKNOWN_SALESPERSON.to_string()),
        ]
    });
    render(&SALES_HEADERS, rows)
}

pub fn purchases_csv(purchases: &[Purchase]) -> ClientResult<String> {
    let rows = purchases.iter().map(|purchase| {
        vec![
            format_csv_date(purchase.date),
            purchase.product_name.clone(),
            purchase.amount.to_string(),
        ]
    });
    render(&PURCHASE_HEADERS, rows)
}

fn render<I>(headers: &[&str], rows: I) -> ClientResult<String>
where
    I: Iterator<Item = Vec<String>>,
{
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(headers).map_err(csv_error)?;
    for row in rows {
        writer.write_record(&row).map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| ClientError::internal_serialization(&error.to_string()))?;
    let body = String::from_utf8(bytes)
        .map_err(|error| ClientError::internal_serialization(&error.to_string()))?;

    let mut output = String::with_capacity(body.len() + UTF8_BOM.len_utf8());
    output.push(UTF8_BOM);
    output.push_str(&body);
    Ok(output)
}

fn csv_error(error: csv::Error) -> ClientError {
    ClientError::internal_serialization(&error.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{purchases_csv, sales_csv};
    use crate::records::{Purchase, Sale};

    fn sale(salesperson_name: Option<&str>) -> Sale {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5)
            .and_then(|day| day.and_hms_opt(14, 30, 0))
            .unwrap_or_default();
        Sale {
            id: "sale_1".to_string(),
            date,
            product_name: "CBD Oil, 10%".to_string(),
            category: "CBD".to_string(),
            quantity: 2,
            amount: 8_000,
            salesperson_id: None,
            salesperson_name: salesperson_name.map(str::to_string),
        }
    }

    #[test]
    fn sales_export_quotes_every_cell_behind_a_bom() {
        let rendered = sales_csv(&[sale(Some("佐藤")), sale(None)]);
        assert!(rendered.is_ok());
        if let Ok(body) = rendered {
            assert!(body.starts_with('\u{feff}'));
            let lines = body.trim_start_matches('\u{feff}').lines().collect::<Vec<&str>>();
            assert_eq!(lines[0], "\"日付\",\"製品名\",\"カテゴリ\",\"数量\",\"金額\",\"販売者\"");
            assert_eq!(
                lines[1],
                "\"2024/03/05\",\"CBD Oil, 10%\",\"CBD\",\"2\",\"8000\",\"佐藤\""
            );
            assert!(lines[2].ends_with("\"不明\""));
            assert!(!body.contains('\r'));
        }
    }

    #[test]
    fn purchases_export_has_three_columns() {
        let purchase = Purchase {
            id: "pur_1".to_string(),
            date: sale(None).date,
            product_name: "Hemp extract".to_string(),
            amount: 12_000,
        };
        let rendered = purchases_csv(&[purchase]);
        assert!(rendered.is_ok());
        if let Ok(body) = rendered {
            assert!(body.contains("\"日付\",\"製品名\",\"金額\"\n"));
            assert!(body.contains("\"2024/03/05\",\"Hemp extract\",\"12000\"\n"));
        }
    }
}
