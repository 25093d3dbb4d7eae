//! # Expense Resolver
//!
//! Decides, per bucket, which of three competing expense sources is
//! authoritative and tags the choice.
//!
//! ## Priority Chain (monthly buckets)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. confirmed   human-confirmed monthly figures      → "confirmed"     │
//! │  2. tentative   day-set-summed daily entries (≠ 0)   → "tentative"     │
//! │  3. estimated   baseline monthly estimate            → "estimated"     │
//! │  4. nothing     all zeros                            → "estimated"     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Daily and weekly buckets work differently: actual daily entries win,
//! and only a value that is exactly zero gets substituted with a
//! prorated daily rate from the bucket month's confirmed-or-baseline
//! source. Substitution is per category group — a bucket can carry real
//! daily labor next to prorated other-expenses.
//!
//! Purchase is never estimated: food cost is entered daily, so every
//! branch sums the deduplicated actual purchase over the day-set.

use std::collections::HashMap;

use crate::bucket::{PeriodBucket, PeriodKey};
use crate::dedup::DailyExpenseMap;
use crate::money::Money;
use crate::types::{
    ConfirmedMonthlyExpense, ExpenseBaseline, ExpenseDataSource, MonthlyKey, YearMonth,
};

// =============================================================================
// Resolved Expenses
// =============================================================================

/// Expense figures chosen for one bucket, with their provenance tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedExpenses {
    pub purchase: Money,
    pub labor_cost: Money,
    pub other_expenses: Money,
    pub source: ExpenseDataSource,
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolves expenses for one bucket.
///
/// Combined multi-store buckets resolve each member store independently
/// and sum the results; the tag reflects the best tier any member store
/// reached (a single confirmed store marks the whole row confirmed).
pub fn resolve_expenses(
    period_key: PeriodKey,
    bucket: &PeriodBucket,
    daily: &DailyExpenseMap,
    baselines: &HashMap<MonthlyKey, ExpenseBaseline>,
    confirmed: &HashMap<MonthlyKey, ConfirmedMonthlyExpense>,
) -> ResolvedExpenses {
    let month = period_key.month_of();
    let mut purchase = Money::zero();
    let mut labor = Money::zero();
    let mut other = Money::zero();

    match period_key {
        PeriodKey::Month(_) => {
            let mut source = ExpenseDataSource::Estimated;

            for store_id in &bucket.store_ids {
                let actual = store_day_sums(bucket, daily, store_id);
                purchase += actual.purchase;

                let key = MonthlyKey::new(store_id.clone(), month);
                if let Some(record) = confirmed.get(&key) {
                    labor += record.labor_total();
                    other += record.categories.total();
                    source = promote(source, ExpenseDataSource::Confirmed);
                } else if actual.labor.is_positive() || actual.other.is_positive() {
                    labor += actual.labor;
                    other += actual.other;
                    source = promote(source, ExpenseDataSource::Tentative);
                } else if let Some(baseline) = baselines.get(&key) {
                    // Full-month baseline, used verbatim — never prorated
                    // in the monthly branch.
                    labor += baseline.labor_total();
                    other += baseline.categories.total();
                }
            }

            ResolvedExpenses {
                purchase,
                labor_cost: labor,
                other_expenses: other,
                source,
            }
        }
        PeriodKey::Day(_) | PeriodKey::Week(_) => {
            for store_id in &bucket.store_ids {
                let actual = store_day_sums(bucket, daily, store_id);
                purchase += actual.purchase;

                let key = MonthlyKey::new(store_id.clone(), month);
                // Confirmed monthly figures beat baseline as the
                // proration source, mirroring the monthly chain.
                let monthly_totals = confirmed
                    .get(&key)
                    .map(|c| (c.labor_total(), c.categories.total()))
                    .or_else(|| baselines.get(&key).map(|b| (b.labor_total(), b.categories.total())));
                let open_days = open_days_for(&key, baselines, month);

                if actual.labor.is_positive() {
                    labor += actual.labor;
                } else if let Some((monthly_labor, _)) = monthly_totals {
                    labor += monthly_labor.prorate_per_day(open_days) * actual.day_count;
                }

                if actual.other.is_positive() {
                    other += actual.other;
                } else if let Some((_, monthly_other)) = monthly_totals {
                    other += monthly_other.prorate_per_day(open_days) * actual.day_count;
                }
            }

            // The bucketer already recorded whether this bucket's month
            // carries a confirmed record; otherwise any non-zero labor
            // or other-expense figure labels the row tentative.
            let source = if bucket.has_confirmed {
                ExpenseDataSource::Confirmed
            } else if labor.is_positive() || other.is_positive() {
                ExpenseDataSource::Tentative
            } else {
                ExpenseDataSource::Estimated
            };

            ResolvedExpenses {
                purchase,
                labor_cost: labor,
                other_expenses: other,
                source,
            }
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

struct StoreDaySums {
    purchase: Money,
    labor: Money,
    other: Money,
    day_count: i64,
}

/// Sums the deduplicated per-day figures over one store's days in the
/// bucket's day-set.
fn store_day_sums(bucket: &PeriodBucket, daily: &DailyExpenseMap, store_id: &str) -> StoreDaySums {
    let mut sums = StoreDaySums {
        purchase: Money::zero(),
        labor: Money::zero(),
        other: Money::zero(),
        day_count: 0,
    };
    for day in bucket.day_set.iter().filter(|d| d.store_id == store_id) {
        sums.day_count += 1;
        if let Some(figures) = daily.get(day) {
            sums.purchase += figures.purchase;
            sums.labor += figures.labor_cost;
            sums.other += figures.other_expenses;
        }
    }
    sums
}

/// Open days for proration: the baseline's figure when known, else the
/// calendar length of the month.
fn open_days_for(
    key: &MonthlyKey,
    baselines: &HashMap<MonthlyKey, ExpenseBaseline>,
    month: YearMonth,
) -> i64 {
    baselines
        .get(key)
        .map(|b| b.open_days)
        .filter(|days| *days > 0)
        .unwrap_or_else(|| month.days_in_month()) as i64
}

fn promote(current: ExpenseDataSource, candidate: ExpenseDataSource) -> ExpenseDataSource {
    const fn rank(source: ExpenseDataSource) -> u8 {
        match source {
            ExpenseDataSource::Confirmed => 2,
            ExpenseDataSource::Tentative => 1,
            ExpenseDataSource::Estimated => 0,
        }
    }
    if rank(candidate) > rank(current) {
        candidate
    } else {
        current
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucket::bucket_reports;
    use crate::dedup::dedupe_daily;
    use crate::types::{ExpenseCategories, OperationType, Period, ShiftReport};
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn report(d: &str, store: &str, sales: i64, purchase: i64, labor: i64) -> ShiftReport {
        ShiftReport {
            id: format!("{d}-{store}"),
            date: date(d),
            store_id: store.to_string(),
            store_name: format!("Store {store}"),
            operation_type: OperationType::Unspecified,
            sales: Money::from_yen(sales),
            purchase: Money::from_yen(purchase),
            labor_cost: Money::from_yen(labor),
            expenses: ExpenseCategories::default(),
            customers: None,
        }
    }

    fn baseline(store: &str, month: &str, labor: i64, utilities: i64, open_days: u32) -> ExpenseBaseline {
        ExpenseBaseline {
            store_id: store.to_string(),
            month: month.parse().unwrap(),
            labor_cost_employee: Money::from_yen(labor),
            labor_cost_part_time: Money::zero(),
            categories: ExpenseCategories {
                utilities: Money::from_yen(utilities),
                ..ExpenseCategories::default()
            },
            open_days,
        }
    }

    fn confirmed_record(store: &str, month: &str, labor: i64, utilities: i64) -> ConfirmedMonthlyExpense {
        ConfirmedMonthlyExpense {
            store_id: store.to_string(),
            month: month.parse().unwrap(),
            labor_cost_employee: Money::from_yen(labor),
            labor_cost_part_time: Money::zero(),
            categories: ExpenseCategories {
                utilities: Money::from_yen(utilities),
                ..ExpenseCategories::default()
            },
        }
    }

    fn resolve_first(
        reports: &[ShiftReport],
        period: Period,
        baselines: &HashMap<MonthlyKey, ExpenseBaseline>,
        confirmed: &HashMap<MonthlyKey, ConfirmedMonthlyExpense>,
    ) -> ResolvedExpenses {
        let daily = dedupe_daily(reports);
        let buckets = bucket_reports(reports, period, true, confirmed);
        let (key, bucket) = buckets.iter().next().unwrap();
        resolve_expenses(key.period_key, bucket, &daily, baselines, confirmed)
    }

    #[test]
    fn monthly_confirmed_beats_daily_sums() {
        let reports = vec![report("2025-01-16", "a", 850_000, 272_000, 212_500)];
        let mut confirmed = HashMap::new();
        confirmed.insert(
            "a__2025-01".parse().unwrap(),
            confirmed_record("a", "2025-01", 950_000, 120_000),
        );

        let resolved = resolve_first(&reports, Period::Monthly, &HashMap::new(), &confirmed);
        assert_eq!(resolved.labor_cost.yen(), 950_000);
        assert_eq!(resolved.other_expenses.yen(), 120_000);
        assert_eq!(resolved.source, ExpenseDataSource::Confirmed);
        // Purchase stays the day-set-summed actual even under confirmed.
        assert_eq!(resolved.purchase.yen(), 272_000);
    }

    #[test]
    fn monthly_daily_sums_beat_baseline() {
        let reports = vec![
            report("2025-01-16", "a", 850_000, 272_000, 212_500),
            report("2025-01-17", "a", 400_000, 130_000, 98_000),
        ];
        let mut baselines = HashMap::new();
        baselines.insert(
            "a__2025-01".parse().unwrap(),
            baseline("a", "2025-01", 900_000, 60_000, 30),
        );

        let resolved = resolve_first(&reports, Period::Monthly, &baselines, &HashMap::new());
        assert_eq!(resolved.labor_cost.yen(), 310_500);
        assert_eq!(resolved.source, ExpenseDataSource::Tentative);
    }

    #[test]
    fn monthly_baseline_used_verbatim_when_no_daily_data() {
        let reports = vec![report("2025-01-16", "a", 850_000, 0, 0)];
        let mut baselines = HashMap::new();
        baselines.insert(
            "a__2025-01".parse().unwrap(),
            baseline("a", "2025-01", 900_000, 60_000, 30),
        );

        let resolved = resolve_first(&reports, Period::Monthly, &baselines, &HashMap::new());
        assert_eq!(resolved.labor_cost.yen(), 900_000);
        assert_eq!(resolved.other_expenses.yen(), 60_000);
        assert_eq!(resolved.source, ExpenseDataSource::Estimated);
    }

    #[test]
    fn monthly_no_data_at_all_is_zero_estimated() {
        let reports = vec![report("2025-01-16", "a", 850_000, 0, 0)];
        let resolved = resolve_first(&reports, Period::Monthly, &HashMap::new(), &HashMap::new());
        assert_eq!(resolved.labor_cost, Money::zero());
        assert_eq!(resolved.other_expenses, Money::zero());
        assert_eq!(resolved.source, ExpenseDataSource::Estimated);
    }

    #[test]
    fn daily_actual_entries_win_over_proration() {
        let reports = vec![report("2025-01-16", "a", 850_000, 272_000, 212_500)];
        let mut baselines = HashMap::new();
        baselines.insert(
            "a__2025-01".parse().unwrap(),
            baseline("a", "2025-01", 900_000, 60_000, 30),
        );

        let resolved = resolve_first(&reports, Period::Daily, &baselines, &HashMap::new());
        assert_eq!(resolved.labor_cost.yen(), 212_500);
        assert_eq!(resolved.source, ExpenseDataSource::Tentative);
    }

    #[test]
    fn daily_zero_labor_gets_prorated_baseline() {
        // 900,000 over 30 open days = 30,000 per day.
        let reports = vec![report("2025-01-16", "a", 850_000, 100_000, 0)];
        let mut baselines = HashMap::new();
        baselines.insert(
            "a__2025-01".parse().unwrap(),
            baseline("a", "2025-01", 900_000, 0, 30),
        );

        let resolved = resolve_first(&reports, Period::Daily, &baselines, &HashMap::new());
        assert_eq!(resolved.labor_cost.yen(), 30_000);
        // Labor came from the baseline but the row still reads tentative:
        // non-zero expense figures without a confirmed record do.
        assert_eq!(resolved.source, ExpenseDataSource::Tentative);
    }

    #[test]
    fn substitution_is_per_category_group() {
        // Real daily labor, zero daily other-expenses: only the latter
        // gets prorated.
        let reports = vec![report("2025-01-16", "a", 850_000, 0, 212_500)];
        let mut baselines = HashMap::new();
        baselines.insert(
            "a__2025-01".parse().unwrap(),
            baseline("a", "2025-01", 900_000, 60_000, 30),
        );

        let resolved = resolve_first(&reports, Period::Daily, &baselines, &HashMap::new());
        assert_eq!(resolved.labor_cost.yen(), 212_500);
        assert_eq!(resolved.other_expenses.yen(), 2_000);
    }

    #[test]
    fn proration_prefers_confirmed_over_baseline() {
        let reports = vec![report("2025-01-16", "a", 850_000, 0, 0)];
        let mut baselines = HashMap::new();
        baselines.insert(
            "a__2025-01".parse().unwrap(),
            baseline("a", "2025-01", 900_000, 0, 30),
        );
        let mut confirmed = HashMap::new();
        confirmed.insert(
            "a__2025-01".parse().unwrap(),
            confirmed_record("a", "2025-01", 600_000, 0),
        );

        let resolved = resolve_first(&reports, Period::Daily, &baselines, &confirmed);
        // 600,000 / 30 baseline open days = 20,000.
        assert_eq!(resolved.labor_cost.yen(), 20_000);
        assert_eq!(resolved.source, ExpenseDataSource::Confirmed);
    }

    #[test]
    fn proration_falls_back_to_calendar_days_without_baseline() {
        let reports = vec![report("2025-01-16", "a", 850_000, 0, 0)];
        let mut confirmed = HashMap::new();
        confirmed.insert(
            "a__2025-01".parse().unwrap(),
            confirmed_record("a", "2025-01", 620_000, 0),
        );

        let resolved = resolve_first(&reports, Period::Daily, &HashMap::new(), &confirmed);
        // January has 31 days: 620,000 / 31 = 20,000.
        assert_eq!(resolved.labor_cost.yen(), 20_000);
    }

    #[test]
    fn weekly_substitution_scales_by_days_in_bucket() {
        // Three days in one ISO week, no daily labor entered.
        let reports = vec![
            report("2025-01-13", "a", 100_000, 0, 0),
            report("2025-01-14", "a", 100_000, 0, 0),
            report("2025-01-15", "a", 100_000, 0, 0),
        ];
        let mut baselines = HashMap::new();
        baselines.insert(
            "a__2025-01".parse().unwrap(),
            baseline("a", "2025-01", 900_000, 0, 30),
        );

        let resolved = resolve_first(&reports, Period::Weekly, &baselines, &HashMap::new());
        assert_eq!(resolved.labor_cost.yen(), 90_000);
    }

    #[test]
    fn combined_bucket_sums_per_store_resolution() {
        // Store a has confirmed figures, store b only daily entries.
        let reports = vec![
            report("2025-01-16", "a", 500_000, 100_000, 0),
            report("2025-01-16", "b", 300_000, 80_000, 90_000),
        ];
        let mut confirmed = HashMap::new();
        confirmed.insert(
            "a__2025-01".parse().unwrap(),
            confirmed_record("a", "2025-01", 950_000, 0),
        );

        let daily = dedupe_daily(&reports);
        let buckets = bucket_reports(&reports, Period::Monthly, false, &confirmed);
        let (key, bucket) = buckets.iter().next().unwrap();
        let resolved = resolve_expenses(key.period_key, bucket, &daily, &HashMap::new(), &confirmed);

        assert_eq!(resolved.purchase.yen(), 180_000);
        assert_eq!(resolved.labor_cost.yen(), 950_000 + 90_000);
        // One confirmed member store marks the whole row confirmed.
        assert_eq!(resolved.source, ExpenseDataSource::Confirmed);
    }
}
