//! # Metrics Calculator
//!
//! Pure per-row derivation of profit figures and target achievement
//! from a bucket's resolved sales and expenses.
//!
//! ```text
//! expenses        = purchase + laborCost + otherExpenses
//! grossProfit     = sales - purchase
//! operatingProfit = sales - expenses
//! profitMargin    = operatingProfit / sales * 100   (0 when sales = 0)
//! achievementRate = sales / targetSales * 100       (only with a target)
//! isAchieved      = sales >= targetSales            (ties achieve)
//! ```
//!
//! No side effects and no lookups: target resolution happens in the
//! orchestrator, this module only derives.

use crate::bucket::{PeriodBucket, PeriodKey};
use crate::money::Money;
use crate::resolve::ResolvedExpenses;
use crate::types::ProcessedRow;

// =============================================================================
// Row Construction
// =============================================================================

/// Builds the final output row for one bucket.
///
/// A target of zero means "no target set" and produces `None` for all
/// three target fields, matching how the target-management collaborator
/// represents absent targets.
pub fn build_row(
    period_key: PeriodKey,
    bucket: &PeriodBucket,
    resolved: &ResolvedExpenses,
    target_sales: Option<Money>,
) -> ProcessedRow {
    let expenses = resolved.purchase + resolved.labor_cost + resolved.other_expenses;
    let gross_profit = bucket.sales - resolved.purchase;
    let operating_profit = bucket.sales - expenses;
    let profit_margin = operating_profit.percent_of(bucket.sales);

    let target = target_sales.filter(|t| t.is_positive());
    let achievement_rate = target.map(|t| bucket.sales.percent_of(t));
    let is_achieved = target.map(|t| bucket.sales >= t);

    ProcessedRow {
        period: period_key.label(),
        raw_period_key: period_key.raw(),
        store_id: bucket.store_id.clone(),
        store_name: bucket.store_name.clone(),
        sales: bucket.sales,
        lunch_sales: bucket.lunch_sales,
        dinner_sales: bucket.dinner_sales,
        purchase: resolved.purchase,
        labor_cost: resolved.labor_cost,
        other_expenses: resolved.other_expenses,
        expenses,
        gross_profit,
        operating_profit,
        profit_margin,
        report_count: bucket.report_count,
        expense_data_source: resolved.source,
        target_sales: target,
        achievement_rate,
        is_achieved,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
