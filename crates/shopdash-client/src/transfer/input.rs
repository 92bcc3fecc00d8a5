use std::fs;
use std::io::{IsTerminal, Read};

use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) enum SourceKind {
    File,
    Stdin,
}

impl SourceKind {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Stdin => "stdin",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ResolvedSource {
    pub(crate) source_kind: SourceKind,
    pub(crate) source_ref: Option<String>,
    pub(crate) content: String,
}

/// Reads the CSV body from a file path, or from stdin when the path is `-`.
pub(crate) fn resolve_source(
    path: &str,
    stdin_override: Option<String>,
) -> ClientResult<ResolvedSource> {
    if path == "-" {
        let Some(stdin_value) = read_stdin(stdin_override)? else {
            return Err(ClientError::invalid_argument_for_command(
                "Path `-` means stdin input, but stdin was empty. Pipe CSV input or pass a file path.",
                Some("import"),
            ));
        };
        return Ok(ResolvedSource {
            source_kind: SourceKind::Stdin,
            source_ref: None,
            content: stdin_value,
        });
    }

    let content = fs::read_to_string(path).map_err(|error| {
        ClientError::invalid_argument_with_recovery(
            &format!("Could not read import file `{path}`: {error}"),
            vec![
                "Verify the path exists and is a UTF-8 CSV file.".to_string(),
                "Rerun shopdash import <sales|purchases> <path> --month YYYY-MM.".to_string(),
            ],
        )
    })?;

    Ok(ResolvedSource {
        source_kind: SourceKind::File,
        source_ref: Some(path.to_string()),
        content,
    })
}

fn read_stdin(stdin_override: Option<String>) -> ClientResult<Option<String>> {
    if let Some(value) = stdin_override {
        return Ok(non_blank(value));
    }

    if std::io::stdin().is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|error| {
            ClientError::invalid_argument_with_recovery(
                &format!("Could not read stdin: {error}"),
                vec!["Retry with an explicit file path argument.".to_string()],
            )
        })?;

    Ok(non_blank(buffer))
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        return None;
    }
    Some(value)
}
