//! Fixed critical-value tables and coarse p-value approximations.
//!
//! Nothing here evaluates a distribution function. Critical values are read from a
//! standard t-table using the nearest tabulated degrees of freedom, and p-values are
//! step functions over |statistic|. Both are meant for display in a teaching context,
//! not as exact inference.

use crate::testing::Tails;
use log::{trace, warn};

/// Returned when neither the requested alpha nor the 0.025 column exists in a row.
pub const LAST_RESORT_CRITICAL: f64 = 2.0;

/// Used for `df > 100` when alpha is not one of the tabulated normal levels.
pub const DEFAULT_Z_CRITICAL: f64 = 1.96;

/// Above this many degrees of freedom the t-distribution is treated as normal.
pub const NORMAL_APPROXIMATION_DF: u32 = 100;

const FALLBACK_ALPHA: f64 = 0.025;

/// One-tailed z critical values keyed by alpha.
pub static Z_TABLE: [(f64, f64); 3] = [(0.05, 1.645), (0.025, 1.96), (0.005, 2.576)];

/// Two-tailed z critical values keyed by the overall significance level.
pub static Z_TWO_TAILED_TABLE: [(f64, f64); 3] = [(0.01, 2.576), (0.05, 1.96), (0.10, 1.645)];

/// A row of the t-table: one-tailed critical values for a reference df.
#[derive(Debug, Clone, Copy)]
pub struct TTableRow {
    pub df: u32,
    pub entries: &'static [(f64, f64)],
}

impl TTableRow {
    /// Critical value for `alpha`, if this row tabulates it.
    pub fn value(&self, alpha: f64) -> Option<f64> {
        lookup_alpha(self.entries, alpha)
    }
}

const fn row(df: u32, entries: &'static [(f64, f64)]) -> TTableRow {
    TTableRow { df, entries }
}

/// Reference rows in ascending df order. The order matters for tie-breaking.
pub static T_TABLE: [TTableRow; 19] = [
    row(1, &[(0.05, 6.314), (0.025, 12.706), (0.005, 63.657)]),
    row(2, &[(0.05, 2.920), (0.025, 4.303), (0.005, 9.925)]),
    row(3, &[(0.05, 2.353), (0.025, 3.182), (0.005, 5.841)]),
    row(4, &[(0.05, 2.132), (0.025, 2.776), (0.005, 4.604)]),
    row(5, &[(0.05, 2.015), (0.025, 2.571), (0.005, 4.032)]),
    row(6, &[(0.05, 1.943), (0.025, 2.447), (0.005, 3.707)]),
    row(7, &[(0.05, 1.895), (0.025, 2.365), (0.005, 3.499)]),
    row(8, &[(0.05, 1.860), (0.025, 2.306), (0.005, 3.355)]),
    row(9, &[(0.05, 1.833), (0.025, 2.262), (0.005, 3.250)]),
    row(10, &[(0.05, 1.812), (0.025, 2.228), (0.005, 3.169)]),
    row(15, &[(0.05, 1.753), (0.025, 2.131), (0.005, 2.947)]),
    row(20, &[(0.05, 1.725), (0.025, 2.086), (0.005, 2.845)]),
    row(25, &[(0.05, 1.708), (0.025, 2.060), (0.005, 2.787)]),
    row(30, &[(0.05, 1.697), (0.025, 2.042), (0.005, 2.750)]),
    row(40, &[(0.05, 1.684), (0.025, 2.021), (0.005, 2.704)]),
    row(50, &[(0.05, 1.676), (0.025, 2.009), (0.005, 2.678)]),
    row(60, &[(0.05, 1.671), (0.025, 2.000), (0.005, 2.660)]),
    row(80, &[(0.05, 1.664), (0.025, 1.990), (0.005, 2.639)]),
    row(100, &[(0.05, 1.660), (0.025, 1.984), (0.005, 2.626)]),
];

/// Alpha levels are compared at three-decimal resolution, so values produced by
/// arithmetic such as `1.0 - 0.95` still hit their column.
#[inline]
fn alpha_key(alpha: f64) -> i64 {
    (alpha * 1000.0).round() as i64
}

fn lookup_alpha(entries: &[(f64, f64)], alpha: f64) -> Option<f64> {
    let key = alpha_key(alpha);
    entries
        .iter()
        .find(|(a, _)| alpha_key(*a) == key)
        .map(|&(_, value)| value)
}

/// Reference row closest to `df`. Ties go to the row scanned first, i.e. the lower df.
pub fn nearest_row(df: u32) -> &'static TTableRow {
    // `min_by_key` keeps the first of equally minimal elements.
    T_TABLE
        .iter()
        .min_by_key(|row| row.df.abs_diff(df))
        .unwrap_or(&T_TABLE[0])
}

/// Approximate critical value of the t-distribution.
///
/// `Tails::Two` halves `alpha` before the lookup. For `df > 100` the normal table is
/// used instead. Otherwise the nearest tabulated df row is consulted (nearest neighbour,
/// no interpolation); an unknown alpha falls back to the 0.025 column and finally to
/// [`LAST_RESORT_CRITICAL`].
///
/// No bounds checking is done on `df`; `df = 0` reads the df=1 row.
pub fn critical_value(df: u32, alpha: f64, tails: Tails) -> f64 {
    let alpha = match tails {
        Tails::Two => alpha / 2.0,
        Tails::One => alpha,
    };

    if df > NORMAL_APPROXIMATION_DF {
        return lookup_alpha(&Z_TABLE, alpha).unwrap_or_else(|| {
            warn!(
                "No normal critical value tabulated for alpha={}, using {}",
                alpha, DEFAULT_Z_CRITICAL
            );
            DEFAULT_Z_CRITICAL
        });
    }

    let row = nearest_row(df);
    trace!("df={} resolved to t-table row df={}", df, row.df);
    row_critical(row, alpha)
}

fn row_critical(row: &TTableRow, alpha: f64) -> f64 {
    row.value(alpha)
        .or_else(|| {
            warn!(
                "No t critical value tabulated for alpha={} (df row {}), falling back to alpha={}",
                alpha, row.df, FALLBACK_ALPHA
            );
            row.value(FALLBACK_ALPHA)
        })
        .unwrap_or(LAST_RESORT_CRITICAL)
}

/// Largest distance at which a z-test alpha still counts as one of the table keys.
const Z_ALPHA_TOLERANCE: f64 = 1e-9;

/// Two-tailed z critical value for the significance levels a z-test accepts.
///
/// Unlike the t-table columns, the alpha must match a key exactly (up to float noise):
/// 0.0104 is not 0.01.
pub fn z_critical(alpha: f64) -> Option<f64> {
    Z_TWO_TAILED_TABLE
        .iter()
        .find(|&&(key, _)| (key - alpha).abs() < Z_ALPHA_TOLERANCE)
        .map(|&(_, value)| value)
}

/// Descending |t| thresholds paired with the p-value they imply.
type Buckets = [(f64, f64); 4];

const SMALL_DF_BUCKETS: Buckets = [(4.0, 0.001), (3.0, 0.01), (2.5, 0.05), (2.0, 0.10)];
const MEDIUM_DF_BUCKETS: Buckets = [(3.5, 0.001), (2.7, 0.01), (2.1, 0.05), (1.8, 0.10)];
const LARGE_DF_BUCKETS: Buckets = [(3.3, 0.001), (2.6, 0.01), (2.0, 0.05), (1.65, 0.10)];

/// Returned when |t| is below every threshold of its bucket.
pub const P_VALUE_CEILING: f64 = 0.20;

const NORMAL_BUCKETS: [(f64, f64); 5] = [
    (3.5, 0.0005),
    (2.8, 0.005),
    (2.3, 0.02),
    (1.96, 0.05),
    (1.645, 0.10),
];

/// Returned when |z| is below every normal threshold.
pub const NORMAL_P_VALUE_CEILING: f64 = 0.30;

fn step(buckets: &[(f64, f64)], magnitude: f64, ceiling: f64) -> f64 {
    buckets
        .iter()
        .find(|&&(threshold, _)| magnitude > threshold)
        .map_or(ceiling, |&(_, p)| p)
}

/// Coarse two-tailed p-value for a t statistic.
///
/// This is a step function, not a CDF: |t| is bucketed against thresholds chosen by df
/// (`df < 5`, `5 <= df < 15`, `df >= 15`), giving one of 0.001, 0.01, 0.05, 0.10 or
/// [`P_VALUE_CEILING`].
pub fn approximate_p_value(statistic: f64, df: u32) -> f64 {
    let buckets = match df {
        0..5 => &SMALL_DF_BUCKETS,
        5..15 => &MEDIUM_DF_BUCKETS,
        _ => &LARGE_DF_BUCKETS,
    };
    step(buckets, statistic.abs(), P_VALUE_CEILING)
}

/// Coarse two-tailed p-value for a z statistic. Independent of the t buckets.
pub fn approximate_normal_p_value(statistic: f64) -> f64 {
    step(&NORMAL_BUCKETS, statistic.abs(), NORMAL_P_VALUE_CEILING)
}
