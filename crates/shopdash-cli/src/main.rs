mod cli;
mod dispatch;
mod logging;
mod output;
mod stdout_io;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use shopdash_client::ClientError;
use stdout_io::write_stdout_text;

const ROOT_HELP: &str = "shopdash - sales and profit dashboard for a small shop

Usage:
  shopdash <command>

Start here:
  shopdash dashboard
  shopdash sale add --help
  shopdash import --help
";

const TOP_LEVEL_HELP: &str = "shopdash - sales and profit dashboard for a small shop

USAGE: shopdash <command> [--json] [--now <TIMESTAMP>]

Look at the numbers:
  shopdash dashboard                                      Monthly sales, profit, top product, recent sales
  shopdash dashboard --tab daily|weekly|monthly|yearly    Same figures for another period
  shopdash chart daily --month 2024-03                    Sales per day of a month
  shopdash chart categories [--all]                       Sales share per category
  shopdash chart comparison --view yearly                 This year against last year

Record activity:
  shopdash sale add --product <name> --category <c> --amount <yen>
  shopdash purchase add --product <name> --amount <yen>
  shopdash sale list --month 2024-03                      Newest first
  shopdash sale list --all --search oil                   Every month, matching text
  shopdash sale remove <sale-id>

Catalogue and staff:
  shopdash product add|list|update|remove
  shopdash salesperson add|list|update|remove

Targets:
  shopdash target show
  shopdash target set --monthly 700000

Move data in and out:
  shopdash export sales --month 2024-03                   Writes sales_2024_03.csv
  shopdash import purchases <path|-> --month 2024-03

Data lives in ~/.shopdash unless SHOPDASH_HOME is set.
Set SHOPDASH_LOG=info (or debug) to see log output on stderr.
Run `shopdash <command> --help` for command usage.
";

fn main() -> ExitCode {
    logging::init_tracing();
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_text(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }
    let parsed = cli::Cli::try_parse();
    let cli = match parsed {
        Ok(value) => value,
        Err(err) => {
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                let text = if is_top_level_help_request(&raw_args) {
                    TOP_LEVEL_HELP.to_string()
                } else {
                    err.to_string()
                };
                if write_stdout_text(&text).is_err() {
                    return Err(ExitCode::from(2));
                }
                return Ok(ExitCode::SUCCESS);
            }
            let command_hint = if matches!(
                err.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::InvalidValue
                    | ErrorKind::ValueValidation
                    | ErrorKind::WrongNumberOfValues
                    | ErrorKind::UnknownArgument
                    | ErrorKind::InvalidSubcommand
                    | ErrorKind::ArgumentConflict
            ) {
                command_path_from_args(&raw_args)
            } else {
                None
            };
            let clean_message = strip_clap_boilerplate(&err.to_string());
            let parse_error =
                ClientError::invalid_argument_for_command(&clean_message, command_hint.as_deref());
            let mode = infer_requested_output_mode(&raw_args);
            if output::print_failure(&parse_error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            return Err(ExitCode::from(1));
        }
    };
    let mode = output::mode_for_cli(&cli);

    match dispatch::dispatch(&cli) {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            tracing::debug!(code = %error.code, "command failed");
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Drops clap's trailing usage and "For more information" lines.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed.trim_end().to_string()
}

/// Builds a subcommand path like "sale add" from raw args for help hints.
fn command_path_from_args(raw_args: &[String]) -> Option<String> {
    let mut words = Vec::new();
    let mut skip_next = false;
    for value in raw_args.iter().skip(1) {
        if skip_next {
            skip_next = false;
            continue;
        }
        if value == "--now" {
            skip_next = true;
            continue;
        }
        if !value.starts_with('-') {
            words.push(value.as_str());
        }
    }

    let hint = match words.as_slice() {
        ["dashboard", ..] => Some("dashboard"),
        ["chart", "daily", ..] => Some("chart daily"),
        ["chart", "categories", ..] => Some("chart categories"),
        ["chart", "comparison", ..] => Some("chart comparison"),
        ["chart", ..] => Some("chart"),
        [group @ ("sale" | "purchase"), action @ ("add" | "list" | "remove"), ..] => {
            return Some(format!("{group} {action}"));
        }
        [group @ ("product" | "salesperson"), action @ ("add" | "list" | "update" | "remove"), ..] => {
            return Some(format!("{group} {action}"));
        }
        [group @ ("sale" | "purchase" | "product" | "salesperson"), ..] => {
            return Some((*group).to_string());
        }
        ["target", "show", ..] => Some("target show"),
        ["target", "set", ..] => Some("target set"),
        ["target", ..] => Some("target"),
        ["export", ..] => Some("export"),
        ["import", ..] => Some("import"),
        _ => None,
    };
    hint.map(std::string::ToString::to_string)
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if error.is_user_error() {
        ExitCode::from(1)
    } else {
        ExitCode::from(2)
    }
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}
