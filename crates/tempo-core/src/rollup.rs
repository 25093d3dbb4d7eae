//! # Rollup Orchestrator
//!
//! Sequences the full pipeline and emits the final row set.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  raw shift rows                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. Dedup      per-day expense view (max-reduced)        dedup.rs       │
//! │  2. Bucket     (period key, store group) → bucket        bucket.rs      │
//! │  3. Resolve    authoritative expenses + source tag       resolve.rs     │
//! │  4. Calculate  profit figures, targets                   metrics.rs     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<ProcessedRow>, ordered by (period key, store group)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Strictly batch: resolution needs the complete day-set, so no phase
//! starts before the previous one finished. The whole pipeline is a
//! pure function of its inputs — re-running it with the same records
//! and maps yields bit-for-bit identical output, which is what lets
//! callers memoize by hashing inputs instead of holding engine state.

use std::collections::HashMap;

use crate::bucket::bucket_reports;
use crate::dedup::dedupe_daily;
use crate::metrics::build_row;
use crate::money::Money;
use crate::resolve::resolve_expenses;
use crate::types::{
    ConfirmedMonthlyExpense, ExpenseBaseline, MonthlyKey, Period, ProcessedRow, ShiftReport,
};

// =============================================================================
// Options
// =============================================================================

/// Caller-selected shape of a rollup run.
#[derive(Debug, Clone, Copy)]
pub struct RollupOptions {
    pub period: Period,
    /// One row per store per period when true; combined rows otherwise.
    pub group_by_store: bool,
}

// =============================================================================
// Pipeline Entry
// =============================================================================

/// Runs the full rollup over one window of shift reports.
///
/// `targets` maps raw period keys (a date, a week-start date, or
/// `YYYY-MM`) to target sales; buckets without a positive target get no
/// achievement fields.
pub fn run_rollup(
    reports: &[ShiftReport],
    baselines: &HashMap<MonthlyKey, ExpenseBaseline>,
    confirmed: &HashMap<MonthlyKey, ConfirmedMonthlyExpense>,
    targets: &HashMap<String, Money>,
    options: RollupOptions,
) -> Vec<ProcessedRow> {
    let daily = dedupe_daily(reports);
    tracing::debug!(
        reports = reports.len(),
        store_days = daily.len(),
        "deduplicated daily expenses"
    );

    let buckets = bucket_reports(reports, options.period, options.group_by_store, confirmed);
    tracing::debug!(
        buckets = buckets.len(),
        period = %options.period,
        group_by_store = options.group_by_store,
        "bucketed shift reports"
    );

    let rows: Vec<ProcessedRow> = buckets
        .iter()
        .map(|(key, bucket)| {
            let resolved = resolve_expenses(key.period_key, bucket, &daily, baselines, confirmed);
            let target = targets.get(&key.period_key.raw()).copied();
            build_row(key.period_key, bucket, &resolved, target)
        })
        .collect();

    tracing::debug!(rows = rows.len(), "rollup complete");
    rows
}

// =============================================================================
// Unit Tests
// =============================================================================
