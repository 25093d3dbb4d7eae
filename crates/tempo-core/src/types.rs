//! # Domain Types
//!
//! Core domain types for the Tempo Report rollup engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌──────────────────────┐ │
//! │  │  ShiftReport    │   │ ExpenseBaseline  │   │ ConfirmedMonthly-    │ │
//! │  │  ─────────────  │   │  ─────────────   │   │ Expense              │ │
//! │  │  date, storeId  │   │  storeId, month  │   │  ─────────────       │ │
//! │  │  operationType  │   │  open_days       │   │  storeId, month      │ │
//! │  │  sales, expense │   │  reference costs │   │  human-entered costs │ │
//! │  └─────────────────┘   └──────────────────┘   └──────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌──────────────────────┐ │
//! │  │   YearMonth     │   │   MonthlyKey     │   │   ProcessedRow       │ │
//! │  │  "2025-01"      │   │ "s1__2025-01"    │   │  one P&L output row  │ │
//! │  └─────────────────┘   └──────────────────┘   └──────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Conventions
//! - `ShiftReport` and `ProcessedRow` face the TypeScript frontend and use
//!   camelCase field names.
//! - `ExpenseBaseline` / `ConfirmedMonthlyExpense` mirror datastore rows and
//!   keep snake_case.
//! - `YearMonth` and `MonthlyKey` serialize as their canonical string forms
//!   (`YYYY-MM`, `storeId__YYYY-MM`).

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;
use crate::money::Money;

// =============================================================================
// Period Selection
// =============================================================================

/// The aggregation period for a rollup run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// One bucket per calendar date.
    Daily,
    /// One bucket per ISO week (Monday start).
    Weekly,
    /// One bucket per calendar month.
    Monthly,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Daily => write!(f, "daily"),
            Period::Weekly => write!(f, "weekly"),
            Period::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for Period {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Period::Daily),
            "weekly" => Ok(Period::Weekly),
            "monthly" => Ok(Period::Monthly),
            other => Err(CoreError::InvalidPeriod(other.to_string())),
        }
    }
}

// =============================================================================
// Operation Type
// =============================================================================

/// Which service a shift report covers.
///
/// Expense fields are physically entered once per store-day but may be
/// attached to either (or redundantly, both) of that day's shift rows;
/// sales are genuinely per-shift and additive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    /// Lunch service.
    Lunch,
    /// Dinner service.
    Dinner,
    /// Report not attributed to a specific service.
    Unspecified,
}

impl Default for OperationType {
    fn default() -> Self {
        OperationType::Unspecified
    }
}

// =============================================================================
// Expense Categories
// =============================================================================

/// The eight "other expense" sub-categories shared by report rows,
/// baselines and confirmed monthly figures.
///
/// Keeping these grouped in one type means sales and expenses can never
/// be aggregated through the same code path by accident: expense figures
/// always travel as a category block, sales as a bare amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExpenseCategories {
    #[serde(default)]
    pub utilities: Money,
    #[serde(default)]
    pub rent: Money,
    #[serde(default)]
    pub consumables: Money,
    #[serde(default)]
    pub promotion: Money,
    #[serde(default)]
    pub cleaning: Money,
    #[serde(default)]
    pub misc: Money,
    #[serde(default)]
    pub communication: Money,
    #[serde(default)]
    pub others: Money,
}

impl ExpenseCategories {
    /// Sum of all eight sub-categories.
    pub fn total(&self) -> Money {
        self.utilities
            + self.rent
            + self.consumables
            + self.promotion
            + self.cleaning
            + self.misc
            + self.communication
            + self.others
    }
}

// =============================================================================
// Shift Report (raw input record)
// =============================================================================

/// One shift's submitted report row.
///
/// Read-only to the engine; created by the report submission flow (or a
/// demo-data source producing the identical shape) and never mutated
/// here. Missing numeric fields deserialize to zero rather than failing.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShiftReport {
    /// Upstream record identifier (opaque to the engine).
    pub id: String,

    /// Calendar date, store-local.
    #[ts(as = "String")]
    pub date: NaiveDate,

    /// Store this report belongs to.
    pub store_id: String,

    /// Display name of the store at submission time.
    pub store_name: String,

    /// Lunch, dinner, or unattributed.
    #[serde(default)]
    pub operation_type: OperationType,

    /// Sales for this shift. Additive across a day's shifts.
    #[serde(default)]
    pub sales: Money,

    /// Food purchase cost. Entered once per store-day.
    #[serde(default)]
    pub purchase: Money,

    /// Labor cost. Entered once per store-day.
    #[serde(default)]
    pub labor_cost: Money,

    /// The eight other-expense sub-categories. Entered once per store-day.
    #[serde(flatten)]
    pub expenses: ExpenseCategories,

    /// Customer count, when recorded.
    #[serde(default)]
    pub customers: Option<i64>,
}

// =============================================================================
// Year-Month
// =============================================================================

/// A calendar month, canonical wire form `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a year-month, validating `month` is 1..=12.
    pub fn new(year: i32, month: u32) -> Result<Self, CoreError> {
        if (1..=12).contains(&month) {
            Ok(YearMonth { year, month })
        } else {
            Err(CoreError::InvalidYearMonth(format!("{year}-{month:02}")))
        }
    }

    /// The month a date falls in.
    pub fn from_date(date: NaiveDate) -> Self {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Calendar year.
    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Calendar month, 1..=12.
    #[inline]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Number of calendar days in the month.
    pub fn days_in_month(&self) -> u32 {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|first_of_next| first_of_next.pred_opt())
            .map(|last_day| last_day.day())
            .unwrap_or(30)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidYearMonth(s.to_string());
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        YearMonth::new(year, month).map_err(|_| invalid())
    }
}

impl Serialize for YearMonth {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Monthly Lookup Key
// =============================================================================

/// Composite key for the baseline and confirmed-expense maps.
///
/// Wire form is `storeId + "__" + yearMonth` as supplied by the
/// collaborators that pre-build those maps.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthlyKey {
    pub store_id: String,
    pub month: YearMonth,
}

impl MonthlyKey {
    pub fn new(store_id: impl Into<String>, month: YearMonth) -> Self {
        MonthlyKey {
            store_id: store_id.into(),
            month,
        }
    }
}

impl fmt::Display for MonthlyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}__{}", self.store_id, self.month)
    }
}

impl FromStr for MonthlyKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Store ids may themselves contain "__"; the month is always the
        // final segment.
        let (store_id, month) = s
            .rsplit_once("__")
            .ok_or_else(|| CoreError::InvalidMonthlyKey(s.to_string()))?;
        if store_id.is_empty() {
            return Err(CoreError::InvalidMonthlyKey(s.to_string()));
        }
        let month: YearMonth = month
            .parse()
            .map_err(|_| CoreError::InvalidMonthlyKey(s.to_string()))?;
        Ok(MonthlyKey::new(store_id, month))
    }
}

impl Serialize for MonthlyKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthlyKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Monthly Expense Sources
// =============================================================================

/// Reference estimate of a store's monthly expenses.
///
/// Last-resort fallback when neither confirmed nor daily-entered figures
/// exist. `open_days` drives proration of monthly totals to daily rates.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExpenseBaseline {
    pub store_id: String,
    #[ts(as = "String")]
    pub month: YearMonth,
    #[serde(default)]
    pub labor_cost_employee: Money,
    #[serde(default)]
    pub labor_cost_part_time: Money,
    #[serde(flatten)]
    pub categories: ExpenseCategories,
    /// Days the store operated that month; 0 means unknown.
    #[serde(default)]
    pub open_days: u32,
}

impl ExpenseBaseline {
    /// Combined employee and part-time labor for the month.
    pub fn labor_total(&self) -> Money {
        self.labor_cost_employee + self.labor_cost_part_time
    }
}

/// Human-confirmed monthly expense figures.
///
/// Strictly preferred over both baseline estimates and summed daily
/// entries when present.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConfirmedMonthlyExpense {
    pub store_id: String,
    #[ts(as = "String")]
    pub month: YearMonth,
    #[serde(default)]
    pub labor_cost_employee: Money,
    #[serde(default)]
    pub labor_cost_part_time: Money,
    #[serde(flatten)]
    pub categories: ExpenseCategories,
}

impl ConfirmedMonthlyExpense {
    /// Combined employee and part-time labor for the month.
    pub fn labor_total(&self) -> Money {
        self.labor_cost_employee + self.labor_cost_part_time
    }
}

// =============================================================================
// Store-Day Key
// =============================================================================

/// Identity of one store's calendar day — the unit expenses are entered
/// at, regardless of how many shift rows exist that day.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StoreDay {
    pub date: NaiveDate,
    pub store_id: String,
}

impl StoreDay {
    pub fn new(date: NaiveDate, store_id: impl Into<String>) -> Self {
        StoreDay {
            date,
            store_id: store_id.into(),
        }
    }
}

// =============================================================================
// Expense Data Source Tag
// =============================================================================

/// Provenance of the expense figures shown for a bucket.
///
/// Surfaced to the user as a UI affordance ("confirm your expenses") —
/// this is the engine's only data-quality channel; nothing in the
/// pipeline ever throws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseDataSource {
    /// Human-confirmed monthly figures were used.
    Confirmed,
    /// Daily-entered figures were used, not yet confirmed.
    Tentative,
    /// Baseline estimates were used, or no data exists at all.
    Estimated,
}

impl fmt::Display for ExpenseDataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpenseDataSource::Confirmed => write!(f, "confirmed"),
            ExpenseDataSource::Tentative => write!(f, "tentative"),
            ExpenseDataSource::Estimated => write!(f, "estimated"),
        }
    }
}

// =============================================================================
// Processed Row (output)
// =============================================================================

/// One period-level profit-and-loss row, ready for tabular display,
/// CSV serialization or charting.
///
/// `raw_period_key`, `store_id` and `expense_data_source` give callers
/// enough to deep-link into the expense confirmation flow without the
/// engine knowing about routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedRow {
    /// Human-readable period label.
    pub period: String,

    /// Canonical period key: date, week-start date, or `YYYY-MM`.
    pub raw_period_key: String,

    /// Store id when the row covers a single store; None for a combined
    /// multi-store row.
    pub store_id: Option<String>,

    /// Store display name, or the all-stores label.
    pub store_name: String,

    pub sales: Money,
    pub lunch_sales: Money,
    pub dinner_sales: Money,

    pub purchase: Money,
    pub labor_cost: Money,
    pub other_expenses: Money,
    pub expenses: Money,

    pub gross_profit: Money,
    pub operating_profit: Money,
    /// Operating profit as a percentage of sales; 0 when sales are 0.
    pub profit_margin: f64,

    /// Number of raw shift rows that fed this bucket.
    pub report_count: u32,

    pub expense_data_source: ExpenseDataSource,

    pub target_sales: Option<Money>,
    pub achievement_rate: Option<f64>,
    pub is_achieved: Option<bool>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_period_parse_roundtrip() {
        for p in [Period::Daily, Period::Weekly, Period::Monthly] {
            assert_eq!(p.to_string().parse::<Period>().unwrap(), p);
        }
        assert!("hourly".parse::<Period>().is_err());
    }

    #[test]
    fn test_expense_categories_total() {
        let categories = ExpenseCategories {
            utilities: Money::from_yen(10_000),
            rent: Money::from_yen(200_000),
            consumables: Money::from_yen(5_000),
            promotion: Money::from_yen(3_000),
            cleaning: Money::from_yen(2_000),
            misc: Money::from_yen(1_000),
            communication: Money::from_yen(4_000),
            others: Money::from_yen(500),
        };
        assert_eq!(categories.total().yen(), 225_500);
        assert_eq!(ExpenseCategories::default().total(), Money::zero());
    }

    #[test]
    fn test_year_month_parse_and_display() {
        let ym: YearMonth = "2025-01".parse().unwrap();
        assert_eq!(ym.year(), 2025);
        assert_eq!(ym.month(), 1);
        assert_eq!(ym.to_string(), "2025-01");

        assert!("2025-13".parse::<YearMonth>().is_err());
        assert!("2025/01".parse::<YearMonth>().is_err());
        assert!("25-01".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_year_month_days_in_month() {
        let jan: YearMonth = "2025-01".parse().unwrap();
        assert_eq!(jan.days_in_month(), 31);
        let feb: YearMonth = "2025-02".parse().unwrap();
        assert_eq!(feb.days_in_month(), 28);
        let leap_feb: YearMonth = "2024-02".parse().unwrap();
        assert_eq!(leap_feb.days_in_month(), 29);
        let dec: YearMonth = "2024-12".parse().unwrap();
        assert_eq!(dec.days_in_month(), 31);
    }

    #[test]
    fn test_year_month_from_date() {
        let ym = YearMonth::from_date(date("2025-01-16"));
        assert_eq!(ym.to_string(), "2025-01");
    }

    #[test]
    fn test_monthly_key_wire_roundtrip() {
        let key = MonthlyKey::new("store-1", "2025-01".parse().unwrap());
        assert_eq!(key.to_string(), "store-1__2025-01");
        assert_eq!("store-1__2025-01".parse::<MonthlyKey>().unwrap(), key);

        // Store ids containing "__" keep everything before the final
        // separator.
        let odd = "a__b__2025-03".parse::<MonthlyKey>().unwrap();
        assert_eq!(odd.store_id, "a__b");
        assert_eq!(odd.month.to_string(), "2025-03");

        assert!("store-1".parse::<MonthlyKey>().is_err());
        assert!("__2025-01".parse::<MonthlyKey>().is_err());
        assert!("store-1__2025-99".parse::<MonthlyKey>().is_err());
    }

    #[test]
    fn test_shift_report_missing_fields_default_to_zero() {
        let json = r#"{
            "id": "r1",
            "date": "2025-01-16",
            "storeId": "store-1",
            "storeName": "Ebisu",
            "operationType": "lunch",
            "sales": 350000
        }"#;
        let report: ShiftReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.sales.yen(), 350_000);
        assert_eq!(report.purchase, Money::zero());
        assert_eq!(report.labor_cost, Money::zero());
        assert_eq!(report.expenses.total(), Money::zero());
        assert_eq!(report.customers, None);
    }

    #[test]
    fn test_baseline_labor_total() {
        let baseline = ExpenseBaseline {
            store_id: "store-1".to_string(),
            month: "2025-01".parse().unwrap(),
            labor_cost_employee: Money::from_yen(500_000),
            labor_cost_part_time: Money::from_yen(400_000),
            categories: ExpenseCategories::default(),
            open_days: 30,
        };
        assert_eq!(baseline.labor_total().yen(), 900_000);
    }

    #[test]
    fn test_expense_data_source_serialized_lowercase() {
        assert_eq!(
            serde_json::to_string(&ExpenseDataSource::Tentative).unwrap(),
            "\"tentative\""
        );
        assert_eq!(ExpenseDataSource::Confirmed.to_string(), "confirmed");
    }
}
