use crate::error::{Result, StatError};
use crate::testing::CorrelationResult;
use crate::testing::utils::{ensure_sample_size, mean, parse_series, sum_of_squares};
use log::debug;
use num_traits::Float;
use serde::{Deserialize, Serialize};

/// Paired observations for a Pearson correlation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationInput {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl CorrelationInput {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        CorrelationInput { x, y }
    }

    /// Build an input from comma-separated text. Entries that are not numbers are dropped
    /// before any length checks run.
    pub fn from_text(x: &str, y: &str) -> Self {
        CorrelationInput {
            x: parse_series(x),
            y: parse_series(y),
        }
    }
}

/// Pearson product-moment correlation of the two sequences.
///
/// Non-finite entries are filtered out of each sequence first. The remaining sequences
/// must be non-empty, of equal length and hold at least two points.
///
/// # Errors
///
/// [`StatError::EmptySeries`], [`StatError::LengthMismatch`],
/// [`StatError::SampleSizeTooSmall`] and, when either sequence has no spread at all,
/// [`StatError::NoVariance`].
pub fn correlation(input: &CorrelationInput) -> Result<CorrelationResult> {
    let x = finite_values(&input.x);
    let y = finite_values(&input.y);

    if x.is_empty() || y.is_empty() {
        return Err(StatError::EmptySeries);
    }
    if x.len() != y.len() {
        return Err(StatError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    ensure_sample_size(x.len(), 2)?;

    let (x_mean, y_mean, r) = pearson(&x, &y)?;
    let result = CorrelationResult::new(x, y, x_mean, y_mean, r);

    debug!(
        "correlation: n={}, r={:.4}, strength={}, direction={}",
        result.n, r, result.strength, result.direction
    );
    Ok(result)
}

fn finite_values<T>(values: &[T]) -> Vec<T>
where
    T: Float,
{
    values.iter().copied().filter(|v| v.is_finite()).collect()
}

/// Returns `(x_mean, y_mean, r)` for equal-length, non-empty slices.
fn pearson<T>(x: &[T], y: &[T]) -> Result<(T, T, T)>
where
    T: Float,
{
    let x_mean = mean(x);
    let y_mean = mean(y);

    let numerator = x
        .iter()
        .zip(y.iter())
        .fold(T::zero(), |acc, (&xi, &yi)| acc + (xi - x_mean) * (yi - y_mean));
    let denominator = (sum_of_squares(x, x_mean) * sum_of_squares(y, y_mean)).sqrt();

    if denominator == T::zero() {
        return Err(StatError::NoVariance);
    }

    Ok((x_mean, y_mean, numerator / denominator))
}
