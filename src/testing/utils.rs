use crate::error::{Result, StatError};
use num_traits::Float;

/// Parse a single numeric form field.
pub fn parse_field(name: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| StatError::invalid_number(name))
}

/// Parse a count such as a sample size.
///
/// Fractional input is truncated toward zero and negative counts saturate to 0, leaving
/// the calculator's sample-size rule to reject them.
pub fn parse_count(name: &str, raw: &str) -> Result<u32> {
    let value = parse_field(name, raw)?;
    Ok(value.trunc().max(0.0) as u32)
}

/// Parse a comma-separated list, silently dropping entries that are not finite numbers.
pub fn parse_series(raw: &str) -> Vec<f64> {
    raw.split(',')
        .filter_map(|item| item.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .collect()
}

/// Every named value must be a finite number.
pub fn ensure_finite(fields: &[(&str, f64)]) -> Result<()> {
    match fields.iter().find(|(_, value)| !value.is_finite()) {
        Some((name, _)) => Err(StatError::invalid_number(name)),
        None => Ok(()),
    }
}

pub fn ensure_sample_size(actual: usize, minimum: u32) -> Result<()> {
    if actual < minimum as usize {
        return Err(StatError::SampleSizeTooSmall { minimum, actual });
    }
    Ok(())
}

pub fn ensure_positive_deviation(name: &str, value: f64) -> Result<()> {
    if value <= 0.0 {
        return Err(StatError::non_positive_deviation(name));
    }
    Ok(())
}

/// Arithmetic mean. Callers guarantee `values` is non-empty.
pub fn mean<T>(values: &[T]) -> T
where
    T: Float,
{
    let (sum, count) = values
        .iter()
        .fold((T::zero(), T::zero()), |(sum, count), &v| {
            (sum + v, count + T::one())
        });
    sum / count
}

/// Sum of squared deviations from `center`.
pub fn sum_of_squares<T>(values: &[T], center: T) -> T
where
    T: Float,
{
    values.iter().fold(T::zero(), |acc, &v| {
        let diff = v - center;
        acc + diff * diff
    })
}

/// Standard error of a mean, `sd / sqrt(n)`.
#[inline]
pub fn standard_error(sd: f64, n: u32) -> f64 {
    sd / f64::from(n).sqrt()
}
