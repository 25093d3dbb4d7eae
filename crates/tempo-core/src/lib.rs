//! # tempo-core: Pure Rollup Engine for Tempo Report
//!
//! This crate is the **heart** of Tempo Report. It turns raw per-shift
//! report rows into period-level profit-and-loss rows as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Tempo Report Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (React)                             │   │
//! │  │    Report Forms ──► Dashboards ──► P&L Tables ──► Charts       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON (ts-rs generated bindings)        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tempo-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   shift rows ──► dedup ──► bucket ──► resolve ──► metrics      │   │
//! │  │                                                      │          │   │
//! │  │                                    ProcessedRow[] ◄──┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              Datastore / demo-data source (callers)             │   │
//! │  │        report rows, baseline & confirmed maps, targets          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ShiftReport, baselines, keys, output rows)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`dedup`] - Per-day expense deduplication (max-reduction)
//! - [`bucket`] - Daily/weekly/monthly bucketing with store grouping
//! - [`resolve`] - Expense source resolution (confirmed > daily > baseline)
//! - [`metrics`] - Profit figures and target achievement
//! - [`rollup`] - The pipeline orchestrator, [`rollup::run_rollup`]
//! - [`kpi`] - Flat KPI summary over a report window
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in whole yen (i64) to avoid float errors
//! 4. **No Hidden State**: Nothing is memoized inside; callers cache by hashing inputs
//!
//! ## Example Usage
//!
//! ```rust
//! use std::collections::HashMap;
//! use tempo_core::rollup::{run_rollup, RollupOptions};
//! use tempo_core::types::Period;
//!
//! let rows = run_rollup(
//!     &[],              // shift reports for the selected window
//!     &HashMap::new(),  // baseline map, keyed storeId__YYYY-MM
//!     &HashMap::new(),  // confirmed monthly expenses, same keys
//!     &HashMap::new(),  // target sales by raw period key
//!     RollupOptions { period: Period::Daily, group_by_store: true },
//! );
//! assert!(rows.is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bucket;
pub mod dedup;
pub mod error;
pub mod kpi;
pub mod metrics;
pub mod money;
pub mod resolve;
pub mod rollup;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tempo_core::Money` instead of
// `use tempo_core::money::Money`

pub use error::{CoreError, CoreResult};
pub use kpi::{summarize, KpiSummary};
pub use money::Money;
pub use rollup::{run_rollup, RollupOptions};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Display label for a bucket that combines every store.
///
/// ## Why a constant?
/// The bucketer, the frontend and CSV exports all need to agree on this
/// literal; callers match on it to decide whether a row can deep-link
/// into a single store's expense confirmation flow.
pub const ALL_STORES_LABEL: &str = "全店舗合計";
