//! # Daily Deduplicator
//!
//! Collapses same-day, same-store shift rows into one set of per-day
//! expense figures.
//!
//! Expenses are physically recorded once per store-day, but the entry
//! sometimes ends up attached to both the lunch and the dinner shift
//! row. Summing those rows would double the expense, so each expense
//! group is reduced with `max` instead. Sales are never touched here —
//! they are genuinely per-shift and additive.
//!
//! The resolver consumes this pre-reduced view and never sums raw
//! records for expense fields directly; the distinct
//! [`DailyExpenseFigures`] type keeps the two aggregation paths apart.

use std::collections::HashMap;

use crate::money::Money;
use crate::types::{ShiftReport, StoreDay};

// =============================================================================
// Daily Expense Figures
// =============================================================================

/// Max-reduced expense figures for one store-day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DailyExpenseFigures {
    pub purchase: Money,
    pub labor_cost: Money,
    /// Sum of the eight other-expense sub-categories, reduced per day.
    pub other_expenses: Money,
}

/// Per-day expense view, keyed by (date, storeId).
pub type DailyExpenseMap = HashMap<StoreDay, DailyExpenseFigures>;

// =============================================================================
// Deduplication
// =============================================================================

/// Builds the per-day expense view from raw shift rows.
///
/// Every (date, storeId) touched by a report gets an entry, even when
/// all its rows carry zero expenses — "explicitly zero" days must stay
/// visible to the resolver's priority chain. Non-zero values update the
/// entry to the max of what has been seen; each expense group is
/// reduced independently.
pub fn dedupe_daily(reports: &[ShiftReport]) -> DailyExpenseMap {
    let mut daily: DailyExpenseMap = HashMap::new();

    for report in reports {
        let entry = daily
            .entry(StoreDay::new(report.date, report.store_id.clone()))
            .or_default();

        if report.purchase.is_positive() {
            entry.purchase = entry.purchase.max(report.purchase);
        }
        if report.labor_cost.is_positive() {
            entry.labor_cost = entry.labor_cost.max(report.labor_cost);
        }
        let other = report.expenses.total();
        if other.is_positive() {
            entry.other_expenses = entry.other_expenses.max(other);
        }
    }

    daily
}

// =============================================================================
// Unit Tests
// =============================================================================
