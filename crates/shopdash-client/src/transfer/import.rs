use std::collections::HashMap;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, TransactionBehavior};
use serde::Serialize;

use crate::dates::{format_month, parse_csv_date};
use crate::engine::calendar::same_month;
use crate::records::{NewPurchase, NewSale, purchases, sales, salespersons};
use crate::store::InStore;
use crate::transfer::{
    HEADER_AMOUNT, HEADER_CATEGORY, HEADER_DATE, HEADER_PRODUCT, HEADER_QUANTITY,
    HEADER_SALESPERSON, PURCHASE_HEADERS, SALES_REQUIRED_HEADERS, UTF8_BOM,
};
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportIssue {
    /// Line in the CSV file; the header is line 1.
    pub row: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportOutcome {
    pub rows_read: usize,
    pub added_count: usize,
    pub skipped_count: usize,
    pub error_count: usize,
    pub issues: Vec<ImportIssue>,
}

#[derive(Debug, Clone)]
struct CsvTable {
    index_by_name: HashMap<String, usize>,
    rows: Vec<Result<csv::StringRecord, String>>,
}

impl CsvTable {
    fn value<'a>(&self, record: &'a csv::StringRecord, header: &str) -> Option<&'a str> {
        let index = self.index_by_name.get(header)?;
        record.get(*index).map(str::trim)
    }
}

enum RowVerdict<T> {
    Keep(T),
    OutsideMonth,
    Invalid(String),
}

/// Imports the sales rows dated in `month`. Runs in a single transaction that
/// is only committed when at least one row was added.
pub fn import_sales(
    connection: &mut Connection,
    db_path: &Path,
    content: &str,
    month: NaiveDate,
) -> ClientResult<ImportOutcome> {
    let table = read_table(content, &SALES_REQUIRED_HEADERS)?;
    let transaction = connection
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .in_store(db_path)?;

    let mut outcome = ImportOutcome::default();
    let mut salesperson_ids: HashMap<String, Option<String>> = HashMap::new();
    for (index, row) in table.rows.iter().enumerate() {
        outcome.rows_read += 1;
        let verdict = match row {
            Ok(record) => sale_from_record(&table, record, month),
            Err(reason) => RowVerdict::Invalid(reason.clone()),
        };
        match verdict {
            RowVerdict::Keep((mut new_sale, salesperson_name)) => {
                if let Some(name) = salesperson_name {
                    new_sale.salesperson_id =
                        resolve_salesperson(&transaction, db_path, &mut salesperson_ids, &name)?;
                }
                sales::insert(&transaction, db_path, &new_sale)?;
                outcome.added_count += 1;
            }
            RowVerdict::OutsideMonth => outcome.skipped_count += 1,
            RowVerdict::Invalid(reason) => outcome.record_issue(index, reason),
        }
    }

    finish(transaction, db_path, month, outcome)
}

/// Imports the purchase rows dated in `month`, with the same transaction
/// rules as [`import_sales`].
pub fn import_purchases(
    connection: &mut Connection,
    db_path: &Path,
    content: &str,
    month: NaiveDate,
) -> ClientResult<ImportOutcome> {
    let table = read_table(content, &PURCHASE_HEADERS)?;
    let transaction = connection
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .in_store(db_path)?;

    let mut outcome = ImportOutcome::default();
    for (index, row) in table.rows.iter().enumerate() {
        outcome.rows_read += 1;
        let verdict = match row {
            Ok(record) => purchase_from_record(&table, record, month),
            Err(reason) => RowVerdict::Invalid(reason.clone()),
        };
        match verdict {
            RowVerdict::Keep(new_purchase) => {
                purchases::insert(&transaction, db_path, &new_purchase)?;
                outcome.added_count += 1;
            }
            RowVerdict::OutsideMonth => outcome.skipped_count += 1,
            RowVerdict::Invalid(reason) => outcome.record_issue(index, reason),
        }
    }

    finish(transaction, db_path, month, outcome)
}

impl ImportOutcome {
    fn record_issue(&mut self, index: usize, reason: String) {
        self.error_count += 1;
        self.issues.push(ImportIssue {
            row: index + 2,
            reason,
        });
    }
}

fn finish(
    transaction: rusqlite::Transaction<'_>,
    db_path: &Path,
    month: NaiveDate,
    outcome: ImportOutcome,
) -> ClientResult<ImportOutcome> {
    if outcome.added_count == 0 {
        transaction
            .rollback()
            .in_store(db_path)?;
        return Err(ClientError::import_no_rows(
            &format_month(month),
            outcome.error_count,
        ));
    }

    transaction
        .commit()
        .in_store(db_path)?;
    tracing::info!(
        added = outcome.added_count,
        skipped = outcome.skipped_count,
        errors = outcome.error_count,
        "import committed"
    );
    Ok(outcome)
}

fn read_table(content: &str, required_headers: &[&str]) -> ClientResult<CsvTable> {
    let body = content.strip_prefix(UTF8_BOM).unwrap_or(content);
    if body.trim().is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            "Import source is empty.",
            Some("import"),
        ));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| {
            ClientError::invalid_argument_for_command(
                "CSV header row is missing or unreadable.",
                Some("import"),
            )
        })?
        .iter()
        .map(|value| value.trim().to_string())
        .collect::<Vec<String>>();

    let missing = required_headers
        .iter()
        .any(|required| !headers.iter().any(|header| header == required));
    if missing {
        return Err(ClientError::import_schema_mismatch(
            required_headers.iter().map(|value| value.to_string()).collect(),
            headers,
        ));
    }

    let index_by_name = headers
        .iter()
        .enumerate()
        .map(|(index, name)| (name.to_string(), index))
        .collect::<HashMap<String, usize>>();

    let rows = reader
        .records()
        .map(|row| row.map_err(|error| format!("unreadable CSV row: {error}")))
        .collect();

    Ok(CsvTable {
        index_by_name,
        rows,
    })
}

fn sale_from_record(
    table: &CsvTable,
    record: &csv::StringRecord,
    month: NaiveDate,
) -> RowVerdict<(NewSale, Option<String>)> {
    let date = match row_date(table, record, month) {
        RowVerdict::Keep(date) => date,
        RowVerdict::OutsideMonth => return RowVerdict::OutsideMonth,
        RowVerdict::Invalid(reason) => return RowVerdict::Invalid(reason),
    };
    let product_name = match required_text(table, record, HEADER_PRODUCT) {
        Ok(value) => value,
        Err(reason) => return RowVerdict::Invalid(reason),
    };
    let category = match required_text(table, record, HEADER_CATEGORY) {
        Ok(value) => value,
        Err(reason) => return RowVerdict::Invalid(reason),
    };
    let quantity = match whole_number(table, record, HEADER_QUANTITY) {
        Ok(value) => value,
        Err(reason) => return RowVerdict::Invalid(reason),
    };
    let amount = match whole_number(table, record, HEADER_AMOUNT) {
        Ok(value) => value,
        Err(reason) => return RowVerdict::Invalid(reason),
    };
    let salesperson_name = table
        .value(record, HEADER_SALESPERSON)
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    RowVerdict::Keep((
        NewSale {
            date,
            product_name,
            category,
            quantity,
            amount,
            salesperson_id: None,
        },
        salesperson_name,
    ))
}

fn purchase_from_record(
    table: &CsvTable,
    record: &csv::StringRecord,
    month: NaiveDate,
) -> RowVerdict<NewPurchase> {
    let date = match row_date(table, record, month) {
        RowVerdict::Keep(date) => date,
        RowVerdict::OutsideMonth => return RowVerdict::OutsideMonth,
        RowVerdict::Invalid(reason) => return RowVerdict::Invalid(reason),
    };
    let product_name = match required_text(table, record, HEADER_PRODUCT) {
        Ok(value) => value,
        Err(reason) => return RowVerdict::Invalid(reason),
    };
    let amount = match whole_number(table, record, HEADER_AMOUNT) {
        Ok(value) => value,
        Err(reason) => return RowVerdict::Invalid(reason),
    };

    RowVerdict::Keep(NewPurchase {
        date,
        product_name,
        amount,
    })
}

fn row_date(
    table: &CsvTable,
    record: &csv::StringRecord,
    month: NaiveDate,
) -> RowVerdict<NaiveDateTime> {
    let raw = table.value(record, HEADER_DATE).unwrap_or_default();
    let Some(date) = parse_csv_date(raw) else {
        return RowVerdict::Invalid(format!("{HEADER_DATE} `{raw}` is not a yyyy/MM/dd date"));
    };
    if !same_month(date.date(), month) {
        return RowVerdict::OutsideMonth;
    }
    RowVerdict::Keep(date)
}

fn required_text(table: &CsvTable, record: &csv::StringRecord, header: &str) -> Result<String, String> {
    match table.value(record, header) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(format!("{header} is empty")),
    }
}

fn whole_number(table: &CsvTable, record: &csv::StringRecord, header: &str) -> Result<i64, String> {
    let raw = table.value(record, header).unwrap_or_default();
    match raw.replace(',', "").parse::<i64>() {
        Ok(value) if value >= 0 => Ok(value),
        _ => Err(format!("{header} `{raw}` is not a non-negative whole number")),
    }
}

fn resolve_salesperson(
    connection: &Connection,
    db_path: &Path,
    cache: &mut HashMap<String, Option<String>>,
    name: &str,
) -> ClientResult<Option<String>> {
    if let Some(cached) = cache.get(name) {
        return Ok(cached.clone());
    }
    let resolved = salespersons::find_by_name(connection, db_path, name)?.map(|person| person.id);
    cache.insert(name.to_string(), resolved.clone());
    Ok(resolved)
}
