//! One-sample tests of a mean against a hypothesised population mean.
//!
//! Both tests share the same shape: a standard error from a deviation and the sample size,
//! a standardised statistic, a two-tailed critical value and a bucketed p-value. They differ
//! in where the critical value comes from (the t-table or the fixed normal levels) and in
//! which p-value buckets apply.

use crate::error::{Result, StatError};
use crate::testing::lookup::{
    approximate_normal_p_value, approximate_p_value, critical_value, z_critical,
};
use crate::testing::utils::{
    ensure_finite, ensure_positive_deviation, ensure_sample_size, parse_count, parse_field,
    standard_error,
};
use crate::testing::{HypothesisTestResult, MeanComparison, Tails};
use log::debug;
use serde::{Deserialize, Serialize};

/// Input for a one-sample t-test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TTestInput {
    pub sample_mean: f64,
    pub population_mean: f64,
    /// Sample standard deviation, must be positive
    pub sample_sd: f64,
    /// At least 2
    pub sample_size: u32,
    pub alpha: f64,
}

impl TTestInput {
    /// Build an input from raw form text.
    pub fn from_fields(
        sample_mean: &str,
        population_mean: &str,
        sample_sd: &str,
        sample_size: &str,
        alpha: &str,
    ) -> Result<Self> {
        Ok(TTestInput {
            sample_mean: parse_field("sample mean", sample_mean)?,
            population_mean: parse_field("population mean", population_mean)?,
            sample_sd: parse_field("sample standard deviation", sample_sd)?,
            sample_size: parse_count("sample size", sample_size)?,
            alpha: parse_field("significance level", alpha)?,
        })
    }
}

/// Input for a one-sample z-test with a known population deviation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZTestInput {
    pub sample_mean: f64,
    pub population_mean: f64,
    /// Known population standard deviation, must be positive
    pub population_sd: f64,
    /// At least 1
    pub sample_size: u32,
    /// One of 0.01, 0.05 or 0.10
    pub alpha: f64,
}

impl ZTestInput {
    /// Build an input from raw form text.
    pub fn from_fields(
        sample_mean: &str,
        population_mean: &str,
        population_sd: &str,
        sample_size: &str,
        alpha: &str,
    ) -> Result<Self> {
        Ok(ZTestInput {
            sample_mean: parse_field("sample mean", sample_mean)?,
            population_mean: parse_field("population mean", population_mean)?,
            population_sd: parse_field("population standard deviation", population_sd)?,
            sample_size: parse_count("sample size", sample_size)?,
            alpha: parse_field("significance level", alpha)?,
        })
    }
}

/// Perform a two-tailed one-sample t-test.
///
/// The standard error is `sd / sqrt(n)`, the statistic `(sample_mean - population_mean) / se`
/// and `df = n - 1`. The critical value comes from [`critical_value`] with alpha split across
/// both tails, and the p-value from [`approximate_p_value`].
///
/// # Errors
///
/// Validation runs before any arithmetic and reports the first failure:
/// [`StatError::InvalidNumber`], then [`StatError::SampleSizeTooSmall`] for `n < 2`, then
/// [`StatError::NonPositiveDeviation`].
pub fn t_test(input: &TTestInput) -> Result<HypothesisTestResult> {
    ensure_finite(&[
        ("sample mean", input.sample_mean),
        ("population mean", input.population_mean),
        ("sample standard deviation", input.sample_sd),
        ("significance level", input.alpha),
    ])?;
    ensure_sample_size(input.sample_size as usize, 2)?;
    ensure_positive_deviation("sample standard deviation", input.sample_sd)?;

    let se = standard_error(input.sample_sd, input.sample_size);
    let t_stat = (input.sample_mean - input.population_mean) / se;
    let df = input.sample_size - 1;

    let t_critical = critical_value(df, input.alpha, Tails::Two);
    let p_value = approximate_p_value(t_stat, df);

    let comparison = MeanComparison {
        sample_mean: input.sample_mean,
        population_mean: input.population_mean,
        sample_size: input.sample_size,
        alpha: input.alpha,
    };
    let result = HypothesisTestResult::new(&comparison, t_stat, se, t_critical, p_value)
        .with_degrees_of_freedom(df);

    debug!(
        "t-test: t={:.4}, df={}, critical={:.3}, p~{}, decision={}",
        t_stat, df, t_critical, p_value, result.decision
    );
    Ok(result)
}

/// Perform a two-tailed one-sample z-test.
///
/// Uses the known population deviation for the standard error, a fixed normal critical
/// value for the chosen alpha and the normal p-value buckets.
///
/// # Errors
///
/// [`StatError::InvalidNumber`], then [`StatError::SampleSizeTooSmall`] for `n < 1`, then
/// [`StatError::NonPositiveDeviation`], then [`StatError::UnsupportedLevel`] when alpha is
/// not one of 0.01, 0.05 or 0.10.
pub fn z_test(input: &ZTestInput) -> Result<HypothesisTestResult> {
    ensure_finite(&[
        ("sample mean", input.sample_mean),
        ("population mean", input.population_mean),
        ("population standard deviation", input.population_sd),
        ("significance level", input.alpha),
    ])?;
    ensure_sample_size(input.sample_size as usize, 1)?;
    ensure_positive_deviation("population standard deviation", input.population_sd)?;
    let z_crit = z_critical(input.alpha).ok_or(StatError::UnsupportedLevel {
        value: input.alpha,
    })?;

    let se = standard_error(input.population_sd, input.sample_size);
    let z_stat = (input.sample_mean - input.population_mean) / se;
    let p_value = approximate_normal_p_value(z_stat);

    let comparison = MeanComparison {
        sample_mean: input.sample_mean,
        population_mean: input.population_mean,
        sample_size: input.sample_size,
        alpha: input.alpha,
    };
    let result = HypothesisTestResult::new(&comparison, z_stat, se, z_crit, p_value);

    debug!(
        "z-test: z={:.4}, critical={:.3}, p~{}, decision={}",
        z_stat, z_crit, p_value, result.decision
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Decision;
    use approx::assert_abs_diff_eq;

    fn textbook_t() -> TTestInput {
        TTestInput {
            sample_mean: 105.0,
            population_mean: 100.0,
            sample_sd: 15.0,
            sample_size: 25,
            alpha: 0.05,
        }
    }

    fn textbook_z() -> ZTestInput {
        ZTestInput {
            sample_mean: 102.0,
            population_mean: 100.0,
            population_sd: 15.0,
            sample_size: 36,
            alpha: 0.05,
        }
    }

    #[test]
    fn t_test_textbook_example() {
        let result = t_test(&textbook_t()).unwrap();

        assert_abs_diff_eq!(result.standard_error, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(result.statistic, 1.6667, epsilon = 1e-4);
        assert_eq!(result.degrees_of_freedom, Some(24));
        // df 24 reads the df 25 row, alpha halved to 0.025
        assert_eq!(result.critical_value, 2.060);
        assert_abs_diff_eq!(result.p_value, 0.10);
        assert_eq!(result.decision, Decision::FailToReject);
    }

    #[test]
    fn t_test_rejects_large_difference() {
        let input = TTestInput {
            sample_mean: 112.0,
            ..textbook_t()
        };
        let result = t_test(&input).unwrap();
        assert_abs_diff_eq!(result.statistic, 4.0, epsilon = 1e-12);
        assert_eq!(result.decision, Decision::Reject);
        assert_abs_diff_eq!(result.p_value, 0.001);
        assert!(result.interpretation.contains("there is sufficient evidence"));
    }

    #[test]
    fn t_test_negative_statistic_uses_magnitude() {
        let input = TTestInput {
            sample_mean: 88.0,
            ..textbook_t()
        };
        let result = t_test(&input).unwrap();
        assert!(result.statistic < 0.0);
        assert_eq!(result.decision, Decision::Reject);
    }

    #[test]
    fn t_test_validation_order() {
        let bad = TTestInput {
            sample_mean: f64::NAN,
            sample_size: 1,
            sample_sd: 0.0,
            ..textbook_t()
        };
        assert!(matches!(t_test(&bad), Err(StatError::InvalidNumber { .. })));

        let small = TTestInput {
            sample_size: 1,
            sample_sd: 0.0,
            ..textbook_t()
        };
        assert_eq!(
            t_test(&small),
            Err(StatError::SampleSizeTooSmall {
                minimum: 2,
                actual: 1
            })
        );

        let flat = TTestInput {
            sample_sd: 0.0,
            ..textbook_t()
        };
        assert!(matches!(
            t_test(&flat),
            Err(StatError::NonPositiveDeviation { .. })
        ));
    }

    #[test]
    fn z_test_textbook_example() {
        let result = z_test(&textbook_z()).unwrap();

        assert_abs_diff_eq!(result.standard_error, 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(result.statistic, 0.8, epsilon = 1e-12);
        assert_eq!(result.critical_value, 1.96);
        assert_eq!(result.degrees_of_freedom, None);
        assert_abs_diff_eq!(result.p_value, 0.30);
        assert_eq!(result.decision, Decision::FailToReject);
    }

    #[test]
    fn z_test_alpha_levels() {
        let input = ZTestInput {
            sample_mean: 106.0,
            ..textbook_z()
        };
        // z = 2.4
        assert_eq!(z_test(&input).unwrap().decision, Decision::Reject);
        let strict = ZTestInput { alpha: 0.01, ..input };
        assert_eq!(z_test(&strict).unwrap().decision, Decision::FailToReject);
        let loose = ZTestInput { alpha: 0.10, ..input };
        assert_eq!(z_test(&loose).unwrap().critical_value, 1.645);
    }

    #[test]
    fn z_test_accepts_single_observation() {
        let input = ZTestInput {
            sample_size: 1,
            ..textbook_z()
        };
        let result = z_test(&input).unwrap();
        assert_abs_diff_eq!(result.standard_error, 15.0);
    }

    #[test]
    fn z_test_validation() {
        let empty = ZTestInput {
            sample_size: 0,
            ..textbook_z()
        };
        assert_eq!(
            z_test(&empty),
            Err(StatError::SampleSizeTooSmall {
                minimum: 1,
                actual: 0
            })
        );

        let flat = ZTestInput {
            population_sd: 0.0,
            ..textbook_z()
        };
        assert!(matches!(
            z_test(&flat),
            Err(StatError::NonPositiveDeviation { .. })
        ));

        let odd = ZTestInput {
            alpha: 0.02,
            ..textbook_z()
        };
        assert_eq!(
            z_test(&odd),
            Err(StatError::UnsupportedLevel { value: 0.02 })
        );
    }

    #[test]
    fn z_test_alpha_near_a_table_key_is_unsupported() {
        let near = ZTestInput {
            alpha: 0.0104,
            ..textbook_z()
        };
        assert_eq!(
            z_test(&near),
            Err(StatError::UnsupportedLevel { value: 0.0104 })
        );
    }

    #[test]
    fn repeated_calls_are_identical() {
        assert_eq!(t_test(&textbook_t()), t_test(&textbook_t()));
        assert_eq!(z_test(&textbook_z()), z_test(&textbook_z()));
    }

    #[test]
    fn from_fields_parses_form_text() {
        let input = TTestInput::from_fields("105", "100", "15", "25", "0.05").unwrap();
        assert_eq!(input, textbook_t());

        let err = ZTestInput::from_fields("102", "", "15", "36", "0.05").unwrap_err();
        assert_eq!(
            err,
            StatError::InvalidNumber {
                field: "population mean".to_string()
            }
        );
    }
}
