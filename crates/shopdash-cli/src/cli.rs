use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

pub fn parse_year_month(value: &str) -> Result<String, String> {
    let bytes = value.as_bytes();
    if bytes.len() != 7 || bytes[4] != b'-' {
        return Err("month must use YYYY-MM format".to_string());
    }
    if NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d").is_err() {
        return Err("month must use valid calendar values".to_string());
    }
    Ok(value.to_string())
}

pub fn parse_amount(value: &str) -> Result<i64, String> {
    let parsed = value
        .replace(',', "")
        .parse::<i64>()
        .map_err(|_| "amount must be a whole number of yen".to_string())?;
    if parsed < 0 {
        return Err("amount must be zero or greater".to_string());
    }
    Ok(parsed)
}

pub const IMPORT_AFTER_HELP: &str = "\
CSV layout:
  UTF-8 (a leading byte order mark is fine), comma separated, one header row.
  Dates use yyyy/MM/dd. Amounts and quantities are whole numbers.

  sales:      日付,製品名,カテゴリ,数量,金額[,販売者]
  purchases:  日付,製品名,金額

  Only rows dated in --month are added; other rows are skipped.
  Rows with unreadable dates or numbers are counted as errors.
  販売者 is matched to an existing salesperson by name.
  Use `-` as the path to read stdin.
";

#[derive(Debug, Parser)]
#[command(
    name = "shopdash",
    version,
    about = "sales and profit dashboard for a small CBD shop",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Print the result as JSON
    #[arg(long, global = true)]
    pub json: bool,
    /// Treat this moment as the current time (YYYY-MM-DD or YYYY-MM-DDTHH:MM)
    #[arg(long, global = true, value_name = "TIMESTAMP")]
    pub now: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Period sales, profit, top product, and recent sales
    Dashboard {
        /// Dashboard tab; overview shows the monthly figures
        #[arg(long, value_parser = ["overview", "daily", "weekly", "monthly", "yearly"])]
        tab: Option<String>,
        /// Reference month (YYYY-MM); defaults to the current month
        #[arg(long, value_parser = parse_year_month)]
        month: Option<String>,
        /// First day of the week for the weekly tab
        #[arg(long, value_parser = ["sunday", "monday"])]
        week_start: Option<String>,
    },
    /// Chart series for the dashboard and reports
    #[command(arg_required_else_help = true)]
    Chart {
        #[command(subcommand)]
        command: ChartCommand,
    },
    /// Record, list, and remove sales
    #[command(arg_required_else_help = true)]
    Sale {
        #[command(subcommand)]
        command: SaleCommand,
    },
    /// Record, list, and remove purchases
    #[command(arg_required_else_help = true)]
    Purchase {
        #[command(subcommand)]
        command: PurchaseCommand,
    },
    /// Manage the product catalogue
    #[command(arg_required_else_help = true)]
    Product {
        #[command(subcommand)]
        command: ProductCommand,
    },
    /// Manage salespersons
    #[command(arg_required_else_help = true)]
    Salesperson {
        #[command(subcommand)]
        command: SalespersonCommand,
    },
    /// Show or change the sales targets per period
    #[command(arg_required_else_help = true)]
    Target {
        #[command(subcommand)]
        command: TargetCommand,
    },
    /// Export one month of sales or purchases as CSV
    Export {
        #[arg(value_parser = ["sales", "purchases"])]
        kind: String,
        /// Month to export (YYYY-MM)
        #[arg(long, value_parser = parse_year_month)]
        month: Option<String>,
        /// Output file; defaults to <kind>_YYYY_MM.csv in the current directory
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Import one month of sales or purchases from CSV
    #[command(after_help = IMPORT_AFTER_HELP)]
    Import {
        #[arg(value_parser = ["sales", "purchases"])]
        kind: String,
        /// CSV file path, or `-` for stdin
        path: String,
        /// Month whose rows are imported (YYYY-MM)
        #[arg(long, value_parser = parse_year_month)]
        month: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ChartCommand {
    /// Daily sales for every day of a month
    Daily(MonthArgs),
    /// Sales share per product category for a month, or every sale with --all
    Categories(CategoryArgs),
    /// This year against last year, month by month
    Comparison {
        /// monthly compares the last 3 months, yearly the last 12
        #[arg(long, value_parser = ["monthly", "yearly"])]
        view: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct MonthArgs {
    /// Month (YYYY-MM); defaults to the current month
    #[arg(long, value_parser = parse_year_month)]
    pub month: Option<String>,
}

#[derive(Debug, Args)]
pub struct CategoryArgs {
    /// Month (YYYY-MM); defaults to the current month
    #[arg(long, value_parser = parse_year_month, conflicts_with = "all")]
    pub month: Option<String>,
    /// Include every recorded sale
    #[arg(long)]
    pub all: bool,
}

#[derive(Debug, Args)]
pub struct RecordListArgs {
    /// Month (YYYY-MM); defaults to the current month
    #[arg(long, value_parser = parse_year_month, conflicts_with = "all")]
    pub month: Option<String>,
    /// List every month
    #[arg(long)]
    pub all: bool,
    #[command(flatten)]
    pub search: SearchArgs,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Only rows containing this text, ignoring case
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum SaleCommand {
    /// Record a sale
    Add {
        /// Product name
        #[arg(long)]
        product: String,
        /// Product category
        #[arg(long)]
        category: String,
        /// Sale amount in yen
        #[arg(long, value_parser = parse_amount)]
        amount: i64,
        #[arg(long, default_value_t = 1)]
        quantity: i64,
        /// Sale timestamp; defaults to now
        #[arg(long)]
        date: Option<String>,
        /// Salesperson id (sp_...)
        #[arg(long)]
        salesperson: Option<String>,
    },
    /// List sales, newest first; matches product, category, or salesperson
    List(RecordListArgs),
    /// Remove a sale by id
    Remove { id: String },
}

#[derive(Debug, Subcommand)]
pub enum PurchaseCommand {
    /// Record a purchase
    Add {
        #[arg(long)]
        product: String,
        /// Purchase amount in yen
        #[arg(long, value_parser = parse_amount)]
        amount: i64,
        /// Purchase timestamp; defaults to now
        #[arg(long)]
        date: Option<String>,
    },
    /// List purchases, newest first; matches product
    List(RecordListArgs),
    /// Remove a purchase by id
    Remove { id: String },
}

#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    /// Add a product
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: String,
        /// Price in yen
        #[arg(long, value_parser = parse_amount)]
        price: i64,
        #[arg(long, value_parser = ["in-stock", "low-stock", "out-of-stock"])]
        stock: Option<String>,
    },
    /// List products; matches name or category
    List(SearchArgs),
    /// Change fields of a product
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, value_parser = parse_amount)]
        price: Option<i64>,
        #[arg(long, value_parser = ["in-stock", "low-stock", "out-of-stock"])]
        stock: Option<String>,
    },
    /// Remove a product by id
    Remove { id: String },
}

#[derive(Debug, Subcommand)]
pub enum SalespersonCommand {
    /// Add a salesperson
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// Register as inactive
        #[arg(long)]
        inactive: bool,
    },
    /// List salespersons; matches name, email, or phone
    List(SearchArgs),
    /// Change fields of a salesperson; pass an empty value to clear email or phone
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long, conflicts_with = "inactive")]
        active: bool,
        #[arg(long)]
        inactive: bool,
    },
    /// Remove a salesperson; their sales are kept
    Remove { id: String },
}

#[derive(Debug, Subcommand)]
pub enum TargetCommand {
    /// Show the current sales targets
    Show,
    /// Change one or more sales targets
    Set {
        #[arg(long, value_parser = parse_amount)]
        daily: Option<i64>,
        #[arg(long, value_parser = parse_amount)]
        weekly: Option<i64>,
        #[arg(long, value_parser = parse_amount)]
        monthly: Option<i64>,
        #[arg(long, value_parser = parse_amount)]
        yearly: Option<i64>,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
