use std::fs;
use std::path::{Path, PathBuf};

use crate::commands::common::{resolve_month, resolve_now};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{ExportData, ImportData};
use crate::dates::format_month;
use crate::records::{purchases, sales};
use crate::store::Store;
use crate::transfer::{TransferKind, export as csv_export, import as csv_import, input};
use crate::{ClientError, ClientResult};

#[derive(Debug, Default)]
pub struct ExportOptions<'a> {
    pub kind: String,
    pub month: Option<String>,
    pub out: Option<PathBuf>,
    pub now: Option<String>,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct ImportOptions<'a> {
    pub kind: String,
    pub path: String,
    pub month: Option<String>,
    pub now: Option<String>,
    pub home_override: Option<&'a Path>,
    pub stdin_override: Option<String>,
}

#[doc(hidden)]
pub fn export_with_options(options: ExportOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let kind = options.kind.parse::<TransferKind>()?;
    let now = resolve_now(options.now.as_deref(), "export")?;
    let month = resolve_month(options.month.as_deref(), now, "export")?;
    let month_label = format_month(month);

    let store = Store::open(options.home_override)?;
    let connection = store.connect()?;
    let (row_count, body) = match kind {
        TransferKind::Sales => {
            let rows = sales::list_for_month(&connection, store.db_path(), month)?;
            (rows.len(), csv_export::sales_csv(&rows)?)
        }
        TransferKind::Purchases => {
            let rows = purchases::list_for_month(&connection, store.db_path(), month)?;
            (rows.len(), csv_export::purchases_csv(&rows)?)
        }
    };
    if row_count == 0 {
        return Err(ClientError::export_empty(kind.as_str(), &month_label));
    }

    let path = options
        .out
        .unwrap_or_else(|| PathBuf::from(kind.default_file_name(month)));
    fs::write(&path, body).map_err(|error| {
        ClientError::invalid_argument_with_recovery(
            &format!("Could not write `{}`: {error}", path.display()),
            vec!["Pass a writable location with `--out <path>`.".to_string()],
        )
    })?;
    tracing::info!(kind = kind.as_str(), month = %month_label, row_count, "exported csv");

    success(
        "export",
        ExportData {
            kind,
            month: month_label,
            path: path.display().to_string(),
            row_count,
        },
    )
}

#[doc(hidden)]
pub fn import_with_options(options: ImportOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let kind = options.kind.parse::<TransferKind>()?;
    let now = resolve_now(options.now.as_deref(), "import")?;
    let month = resolve_month(options.month.as_deref(), now, "import")?;
    let source = input::resolve_source(&options.path, options.stdin_override)?;

    let store = Store::open(options.home_override)?;
    let mut connection = store.connect()?;
    let outcome = match kind {
        TransferKind::Sales => {
            csv_import::import_sales(&mut connection, store.db_path(), &source.content, month)?
        }
        TransferKind::Purchases => {
            csv_import::import_purchases(&mut connection, store.db_path(), &source.content, month)?
        }
    };

    success(
        "import",
        ImportData {
            kind,
            month: format_month(month),
            source_kind: source.source_kind.as_str().to_string(),
            source_ref: source.source_ref,
            rows_read: outcome.rows_read,
            added_count: outcome.added_count,
            skipped_count: outcome.skipped_count,
            error_count: outcome.error_count,
            issues: outcome.issues,
        },
    )
}
