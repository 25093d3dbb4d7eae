//! # Period KPI Summary
//!
//! Flat headline figures for a window of shift reports, with optional
//! growth against a previous window.
//!
//! This feeds the dashboard's KPI cards, which consume shift rows
//! directly: sums here are intentionally NOT deduplicated the way the
//! rollup pipeline's expense path is. The rollup stays the only
//! expense-authoritative view; these cards trade that precision for a
//! cheap at-a-glance read over exactly what was submitted.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::ShiftReport;

// =============================================================================
// KPI Summary
// =============================================================================

/// Headline figures for one report window.
///
/// All rates are zero-guarded percentages; growth fields stay 0 when no
/// usable previous window exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    pub total_sales: Money,
    pub total_expenses: Money,
    pub gross_profit: Money,
    pub operating_profit: Money,
    pub profit_margin: f64,
    pub report_count: u32,
    pub average_daily_sales: f64,

    /// Sales change vs. the previous window, percent.
    pub sales_growth: f64,
    /// Operating-profit change vs. the previous window, percent.
    pub profit_growth: f64,

    pub purchase_total: Money,
    pub labor_total: Money,
    pub purchase_rate: f64,
    pub labor_rate: f64,
    /// Purchase + labor, the prime cost.
    pub prime_cost: Money,
    pub prime_cost_rate: f64,

    pub total_customers: i64,
    /// Sales per customer, rounded to whole yen; zero without customer
    /// data.
    pub average_ticket: Money,
}

// =============================================================================
// Summarization
// =============================================================================

/// Summarizes one window of shift reports.
///
/// An empty window yields the all-zero summary rather than an error.
pub fn summarize(reports: &[ShiftReport], previous: Option<&[ShiftReport]>) -> KpiSummary {
    if reports.is_empty() {
        return KpiSummary::default();
    }

    let mut sales = Money::zero();
    let mut expenses = Money::zero();
    let mut purchase = Money::zero();
    let mut labor = Money::zero();
    let mut customers: i64 = 0;

    for report in reports {
        sales += report.sales;
        expenses += report.purchase + report.labor_cost + report.expenses.total();
        purchase += report.purchase;
        labor += report.labor_cost;
        customers += report.customers.unwrap_or(0);
    }

    let gross_profit = sales - purchase;
    let operating_profit = sales - expenses;
    let prime_cost = purchase + labor;
    let report_count = reports.len() as u32;

    let average_ticket = if customers > 0 {
        // Round half up, matching how the dashboards display per-head
        // figures.
        Money::from_yen((sales.yen() + customers / 2).div_euclid(customers))
    } else {
        Money::zero()
    };

    let (sales_growth, profit_growth) = match previous.filter(|window| !window.is_empty()) {
        Some(window) => growth_vs(window, sales, operating_profit),
        None => (0.0, 0.0),
    };

    KpiSummary {
        total_sales: sales,
        total_expenses: expenses,
        gross_profit,
        operating_profit,
        profit_margin: operating_profit.percent_of(sales),
        report_count,
        average_daily_sales: sales.yen() as f64 / report_count as f64,
        sales_growth,
        profit_growth,
        purchase_total: purchase,
        labor_total: labor,
        purchase_rate: purchase.percent_of(sales),
        labor_rate: labor.percent_of(sales),
        prime_cost,
        prime_cost_rate: prime_cost.percent_of(sales),
        total_customers: customers,
        average_ticket,
    }
}

/// Growth percentages against a previous window. A previous window with
/// zero sales (or non-positive profit) contributes 0 growth, never a
/// division by zero.
fn growth_vs(previous: &[ShiftReport], sales: Money, operating_profit: Money) -> (f64, f64) {
    let mut prev_sales = Money::zero();
    let mut prev_profit = Money::zero();
    for report in previous {
        let expenses = report.purchase + report.labor_cost + report.expenses.total();
        prev_sales += report.sales;
        prev_profit += report.sales - expenses;
    }

    let sales_growth = (sales - prev_sales).percent_of(prev_sales);
    let profit_growth = (operating_profit - prev_profit).percent_of(prev_profit);
    (sales_growth, profit_growth)
}

// =============================================================================
// Unit Tests
// =============================================================================
