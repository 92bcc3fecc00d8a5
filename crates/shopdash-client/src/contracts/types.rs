use chrono::NaiveDateTime;
use serde::Serialize;

use crate::engine::charts::{CategoryShare, DailyPoint, MonthComparison};
use crate::engine::{Period, PeriodWindow, ProfitSummary, SalesReport, SalesTargets, WeekStart};
use crate::records::{Product, Purchase, Sale, Salesperson};
use crate::transfer::TransferKind;
use crate::transfer::import::ImportIssue;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub tab: String,
    pub period: Period,
    pub reference_month: String,
    pub now: NaiveDateTime,
    pub week_start: WeekStart,
    pub window: Option<PeriodWindow>,
    /// `None` when the store holds no sales at all.
    pub sales: Option<SalesReport>,
    /// `None` when the store holds no sales or no purchases.
    pub profit: Option<ProfitSummary>,
    pub recent_sales: Vec<Sale>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyChartData {
    pub reference_month: String,
    pub total_amount: i64,
    pub points: Vec<DailyPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryChartData {
    /// `None` when the chart covers every sale.
    pub reference_month: Option<String>,
    pub total_amount: i64,
    pub shares: Vec<CategoryShare>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonChartData {
    pub view: String,
    pub current_year: i32,
    pub previous_year: i32,
    pub months: Vec<MonthComparison>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SaleListData {
    pub month: Option<String>,
    pub search: Option<String>,
    pub count: usize,
    pub total_amount: i64,
    pub sales: Vec<Sale>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PurchaseListData {
    pub month: Option<String>,
    pub search: Option<String>,
    pub count: usize,
    pub total_amount: i64,
    pub purchases: Vec<Purchase>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductListData {
    pub search: Option<String>,
    pub count: usize,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SalespersonListData {
    pub search: Option<String>,
    pub count: usize,
    pub salespersons: Vec<Salesperson>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RemovedData {
    pub kind: String,
    pub id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TargetsData {
    pub targets: SalesTargets,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportData {
    pub kind: TransferKind,
    pub month: String,
    pub path: String,
    pub row_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportData {
    pub kind: TransferKind,
    pub month: String,
    pub source_kind: String,
    pub source_ref: Option<String>,
    pub rows_read: usize,
    pub added_count: usize,
    pub skipped_count: usize,
    pub error_count: usize,
    pub issues: Vec<ImportIssue>,
}
