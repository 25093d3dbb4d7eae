//! # Error Types
//!
//! Domain-specific error types for tempo-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tempo-core errors (this file)                                          │
//! │  └── CoreError        - Parsing failures at the input seams             │
//! │                                                                         │
//! │  The rollup pipeline itself is infallible: malformed numeric data       │
//! │  degrades to zero and data-quality conditions are expressed through     │
//! │  the ExpenseDataSource tag, never through errors.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending input in error messages
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors produced while parsing engine inputs.
///
/// These only occur at the seams where untrusted text enters the engine
/// (query parameters, composite map keys). Once inputs are typed, the
/// pipeline cannot fail.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A year-month string was not in `YYYY-MM` form.
    #[error("invalid year-month '{0}', expected YYYY-MM")]
    InvalidYearMonth(String),

    /// A composite monthly lookup key was not in `storeId__YYYY-MM` form.
    #[error("invalid monthly key '{0}', expected storeId__YYYY-MM")]
    InvalidMonthlyKey(String),

    /// A period selector was not one of daily / weekly / monthly.
    #[error("invalid period '{0}', expected daily, weekly or monthly")]
    InvalidPeriod(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
