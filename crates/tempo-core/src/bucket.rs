//! # Period Bucketer
//!
//! Assigns each raw shift row to a (period key, store grouping) bucket
//! and accumulates the sales side of the rollup.
//!
//! ## Key Derivation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  daily    periodKey = the report date                                   │
//! │  weekly   periodKey = the Monday on/before the date (ISO week start)    │
//! │  monthly  periodKey = YYYY-MM of the date                               │
//! │                                                                         │
//! │  storeGroupingKey = storeId        when grouping by store               │
//! │                   = "all stores"   otherwise                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Buckets accumulate sales (with lunch/dinner sub-totals) and the set
//! of distinct store-days they span. Expense fields are deliberately
//! NOT accumulated here — the resolver sums them from the deduplicated
//! per-day view over each bucket's day-set, which is what prevents the
//! lunch/dinner double-count from re-entering through grouping.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{Datelike, Duration, NaiveDate};

use crate::money::Money;
use crate::types::{
    ConfirmedMonthlyExpense, MonthlyKey, OperationType, Period, ShiftReport, StoreDay, YearMonth,
};
use crate::ALL_STORES_LABEL;

// =============================================================================
// Period Key
// =============================================================================

/// Canonical key of one aggregation bucket on the time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PeriodKey {
    /// One calendar date.
    Day(NaiveDate),
    /// The Monday starting an ISO week.
    Week(NaiveDate),
    /// One calendar month.
    Month(YearMonth),
}

impl PeriodKey {
    /// Derives the key for a date under the given period.
    pub fn for_date(date: NaiveDate, period: Period) -> PeriodKey {
        match period {
            Period::Daily => PeriodKey::Day(date),
            Period::Weekly => PeriodKey::Week(week_start(date)),
            Period::Monthly => PeriodKey::Month(YearMonth::from_date(date)),
        }
    }

    /// Raw wire form: `YYYY-MM-DD` for days and week starts, `YYYY-MM`
    /// for months. This is what target maps are keyed by and what
    /// deep links into the expense confirmation flow carry.
    pub fn raw(&self) -> String {
        match self {
            PeriodKey::Day(date) | PeriodKey::Week(date) => date.format("%Y-%m-%d").to_string(),
            PeriodKey::Month(ym) => ym.to_string(),
        }
    }

    /// Human-readable label for table display.
    pub fn label(&self) -> String {
        match self {
            PeriodKey::Day(date) => date.format("%Y-%m-%d").to_string(),
            PeriodKey::Week(monday) => format!("Week of {}", monday.format("%Y-%m-%d")),
            PeriodKey::Month(ym) => match ym.first_day() {
                Some(first) => first.format("%B %Y").to_string(),
                None => ym.to_string(),
            },
        }
    }

    /// The calendar month this bucket is attributed to. Weeks that
    /// straddle a month boundary belong to their Monday's month.
    pub fn month_of(&self) -> YearMonth {
        match self {
            PeriodKey::Day(date) | PeriodKey::Week(date) => YearMonth::from_date(*date),
            PeriodKey::Month(ym) => *ym,
        }
    }
}

/// The Monday on or before `date`.
///
/// `num_days_from_monday` is the `(getDay() + 6) % 7` of the chrono
/// world: Monday = 0 .. Sunday = 6.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

// =============================================================================
// Store Grouping
// =============================================================================

/// The store axis of a bucket key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StoreGroup {
    /// One bucket per store.
    Store(String),
    /// All stores combined into one bucket per period.
    All,
}

// =============================================================================
// Bucket Key and Bucket
// =============================================================================

/// Full identity of one aggregation bucket.
///
/// `BTreeMap<BucketKey, _>` accumulation gives the pipeline its
/// deterministic output order for free.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BucketKey {
    pub period_key: PeriodKey,
    pub store_group: StoreGroup,
}

/// One aggregation bucket, sales side only.
#[derive(Debug, Clone, Default)]
pub struct PeriodBucket {
    /// Store id when the bucket covers a single store.
    pub store_id: Option<String>,
    /// Display name: the store's own name, or the all-stores label.
    pub store_name: String,

    pub sales: Money,
    pub lunch_sales: Money,
    pub dinner_sales: Money,

    /// Distinct (date, storeId) pairs touched — the resolver sums
    /// deduplicated expenses over exactly this set.
    pub day_set: BTreeSet<StoreDay>,
    /// Distinct stores feeding this bucket.
    pub store_ids: BTreeSet<String>,

    /// Whether any confirmed monthly expense record exists for a member
    /// store in this bucket's month. Seeds the resolver's priority
    /// chain and the final data-source tag.
    pub has_confirmed: bool,

    /// Raw shift rows that fed this bucket.
    pub report_count: u32,
}

// =============================================================================
// Bucketing
// =============================================================================

/// Groups raw shift rows into period buckets.
///
/// Store-name resolution: when grouping by store each bucket
/// carries its own store's name; otherwise, if every record in the
/// whole input shares one store, that store's name; otherwise the
/// all-stores label.
pub fn bucket_reports(
    reports: &[ShiftReport],
    period: Period,
    group_by_store: bool,
    confirmed: &HashMap<MonthlyKey, ConfirmedMonthlyExpense>,
) -> BTreeMap<BucketKey, PeriodBucket> {
    // Single-store inputs keep their store identity even when grouping
    // is off.
    let uniform_store: Option<(&str, &str)> = reports.split_first().and_then(|(first, rest)| {
        rest.iter()
            .all(|r| r.store_id == first.store_id)
            .then(|| (first.store_id.as_str(), first.store_name.as_str()))
    });

    let mut buckets: BTreeMap<BucketKey, PeriodBucket> = BTreeMap::new();

    for report in reports {
        let period_key = PeriodKey::for_date(report.date, period);
        let store_group = if group_by_store {
            StoreGroup::Store(report.store_id.clone())
        } else {
            StoreGroup::All
        };
        let key = BucketKey {
            period_key,
            store_group,
        };

        let bucket = buckets.entry(key).or_insert_with(|| {
            let (store_id, store_name) = if group_by_store {
                (Some(report.store_id.clone()), report.store_name.clone())
            } else {
                match uniform_store {
                    Some((id, name)) => (Some(id.to_string()), name.to_string()),
                    None => (None, ALL_STORES_LABEL.to_string()),
                }
            };
            PeriodBucket {
                store_id,
                store_name,
                ..PeriodBucket::default()
            }
        });

        bucket.sales += report.sales;
        match report.operation_type {
            OperationType::Lunch => bucket.lunch_sales += report.sales,
            OperationType::Dinner => bucket.dinner_sales += report.sales,
            OperationType::Unspecified => {}
        }

        bucket
            .day_set
            .insert(StoreDay::new(report.date, report.store_id.clone()));
        bucket.store_ids.insert(report.store_id.clone());
        bucket.report_count += 1;

        if !bucket.has_confirmed {
            let month_key = MonthlyKey::new(report.store_id.clone(), period_key.month_of());
            bucket.has_confirmed = confirmed.contains_key(&month_key);
        }
    }

    buckets
}

// =============================================================================
// Unit Tests
// =============================================================================
