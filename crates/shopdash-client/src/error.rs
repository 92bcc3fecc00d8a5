use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `shopdash {cmd} --help` for usage."),
            None => "Run `shopdash --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn record_not_found(kind: &str, id: &str) -> Self {
        Self::new(
            "record_not_found",
            &format!("No {kind} with id `{id}` exists."),
            vec![format!("Run `shopdash {kind} list` to find a valid id.")],
        )
        .with_data(json!({
            "kind": kind,
            "id": id,
        }))
    }

    pub fn export_empty(kind: &str, month: &str) -> Self {
        Self::new(
            "export_empty",
            &format!("There are no {kind} recorded for {month}."),
            vec![
                "Pick a month that has records with `--month YYYY-MM`.".to_string(),
                format!("Run `shopdash {} list --month {month}` to check.", singular(kind)),
            ],
        )
        .with_data(json!({
            "kind": kind,
            "month": month,
        }))
    }

    pub fn import_schema_mismatch(required_headers: Vec<String>, actual_headers: Vec<String>) -> Self {
        let missing_headers = required_headers
            .iter()
            .filter(|required| !actual_headers.iter().any(|actual| actual == *required))
            .cloned()
            .collect::<Vec<String>>();
        Self::new(
            "import_schema_mismatch",
            "CSV headers are missing required columns.",
            vec![
                "Include every required header in the first row.".to_string(),
                "Export a month with `shopdash export` to see the expected layout.".to_string(),
            ],
        )
        .with_data(json!({
            "required_headers": required_headers,
            "missing_headers": missing_headers,
            "actual_headers": actual_headers,
        }))
    }

    pub fn import_no_rows(month: &str, error_count: usize) -> Self {
        Self::new(
            "import_no_rows",
            &format!("No rows dated in {month} could be imported."),
            vec![
                "Check that the 日付 column uses yyyy/MM/dd dates in the selected month.".to_string(),
                "Check that amounts and quantities are whole non-negative numbers.".to_string(),
            ],
        )
        .with_data(json!({
            "month": month,
            "error_count": error_count,
        }))
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization", message, Vec::new())
    }

    pub fn store_init_permission_denied(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_init_permission_denied",
            &format!("Cannot initialize the shop store at `{location}`: {detail}"),
            vec![format!(
                "Grant write access to `{location}` or set `SHOPDASH_HOME` to a writable directory."
            )],
        )
    }

    pub fn store_locked(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_locked",
            &format!("Shop database is locked at `{location}`."),
            vec![format!(
                "Close other processes using `{location}` so the lock is released."
            )],
        )
    }

    pub fn store_corrupt(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_corrupt",
            &format!("Shop database appears corrupt at `{location}`."),
            vec![format!(
                "Replace `{location}` with a valid shop database or restore from backup."
            )],
        )
    }

    pub fn migration_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "migration_failed",
            &format!("Shop database migration failed at `{location}`: {detail}"),
            vec!["Resolve conflicting schema objects referenced in the error details.".to_string()],
        )
    }

    pub fn store_init_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_init_failed",
            &format!("Shop store operation failed at `{location}`: {detail}"),
            Vec::new(),
        )
    }

    /// Whether the failure came from the caller rather than the store.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self.code.as_str(),
            "invalid_argument"
                | "record_not_found"
                | "export_empty"
                | "import_schema_mismatch"
                | "import_no_rows"
        )
    }
}

fn singular(kind: &str) -> &str {
    kind.strip_suffix('s').unwrap_or(kind)
}

pub type ClientResult<T> = Result<T, ClientError>;
