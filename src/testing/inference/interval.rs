use crate::error::Result;
use crate::testing::lookup::critical_value;
use crate::testing::utils::{
    ensure_finite, ensure_positive_deviation, ensure_sample_size, parse_count, parse_field,
    standard_error,
};
use crate::testing::{ConfidenceLevel, CriticalSource, IntervalResult, Tails};
use log::debug;
use serde::{Deserialize, Serialize};

/// Samples at least this large use the normal critical value.
pub const LARGE_SAMPLE_SIZE: u32 = 30;

/// Input for a confidence interval around a sample mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntervalInput {
    pub mean: f64,
    pub sd: f64,
    pub sample_size: u32,
    pub level: ConfidenceLevel,
}

impl IntervalInput {
    /// Build an input from raw form text. `level` is the percentage, e.g. `"95"`.
    pub fn from_fields(mean: &str, sd: &str, sample_size: &str, level: &str) -> Result<Self> {
        let mean = parse_field("mean", mean)?;
        let sd = parse_field("standard deviation", sd)?;
        let sample_size = parse_count("sample size", sample_size)?;
        let level = ConfidenceLevel::try_from(parse_count("confidence level", level)?)?;
        Ok(IntervalInput {
            mean,
            sd,
            sample_size,
            level,
        })
    }
}

/// Compute a two-sided confidence interval for the population mean.
///
/// For `n >= 30` the level's normal critical value is used. Smaller samples switch to the
/// heavier-tailed t-table with `df = n - 1` and `alpha = 1 - level / 100`.
pub fn confidence_interval(input: &IntervalInput) -> Result<IntervalResult> {
    ensure_finite(&[("mean", input.mean), ("standard deviation", input.sd)])?;
    ensure_sample_size(input.sample_size as usize, 2)?;
    ensure_positive_deviation("standard deviation", input.sd)?;

    let se = standard_error(input.sd, input.sample_size);
    let (critical, source) = if input.sample_size >= LARGE_SAMPLE_SIZE {
        (input.level.z_critical(), CriticalSource::Z)
    } else {
        let df = input.sample_size - 1;
        (
            critical_value(df, input.level.alpha(), Tails::Two),
            CriticalSource::T,
        )
    };

    let result = IntervalResult::new(
        input.mean,
        se,
        critical,
        source,
        input.level,
        input.sample_size,
    );
    debug!(
        "{}% interval: [{:.4}, {:.4}] ({} critical {:.3})",
        input.level.percent(),
        result.lower,
        result.upper,
        source,
        critical
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatError;
    use approx::assert_abs_diff_eq;

    fn large_sample() -> IntervalInput {
        IntervalInput {
            mean: 50.0,
            sd: 10.0,
            sample_size: 36,
            level: ConfidenceLevel::NinetyFive,
        }
    }

    #[test]
    fn large_sample_uses_z() {
        let result = confidence_interval(&large_sample()).unwrap();

        assert_abs_diff_eq!(result.standard_error, 1.6667, epsilon = 1e-4);
        assert_eq!(result.critical_value, 1.96);
        assert_eq!(result.critical_source, CriticalSource::Z);
        assert_abs_diff_eq!(result.margin_of_error, 3.2667, epsilon = 1e-4);
        assert_abs_diff_eq!(result.lower, 46.733, epsilon = 1e-3);
        assert_abs_diff_eq!(result.upper, 53.267, epsilon = 1e-3);
        assert!(result.contains(50.0));
        assert_eq!(
            result.interpretation,
            "We are 95% confident that the true population mean μ lies between 46.73 and 53.27."
        );
    }

    #[test]
    fn small_sample_uses_t_table() {
        let input = IntervalInput {
            sample_size: 10,
            ..large_sample()
        };
        let result = confidence_interval(&input).unwrap();
        assert_eq!(result.critical_source, CriticalSource::T);
        assert_eq!(result.critical_value, 2.262);

        let ninety = IntervalInput {
            level: ConfidenceLevel::Ninety,
            ..input
        };
        assert_eq!(confidence_interval(&ninety).unwrap().critical_value, 1.833);

        let ninety_nine = IntervalInput {
            level: ConfidenceLevel::NinetyNine,
            ..input
        };
        assert_eq!(confidence_interval(&ninety_nine).unwrap().critical_value, 3.250);
    }

    #[test]
    fn threshold_at_thirty() {
        let at = IntervalInput {
            sample_size: 30,
            ..large_sample()
        };
        assert_eq!(confidence_interval(&at).unwrap().critical_source, CriticalSource::Z);
        let below = IntervalInput {
            sample_size: 29,
            ..large_sample()
        };
        let result = confidence_interval(&below).unwrap();
        assert_eq!(result.critical_source, CriticalSource::T);
        // df 28 reads the df 30 row
        assert_eq!(result.critical_value, 2.042);
    }

    #[test]
    fn wider_level_gives_wider_interval() {
        let ninety = confidence_interval(&IntervalInput {
            level: ConfidenceLevel::Ninety,
            ..large_sample()
        })
        .unwrap();
        let ninety_nine = confidence_interval(&IntervalInput {
            level: ConfidenceLevel::NinetyNine,
            ..large_sample()
        })
        .unwrap();
        assert!(ninety_nine.width() > ninety.width());
    }

    #[test]
    fn validation_mirrors_t_test() {
        let nan = IntervalInput {
            mean: f64::NAN,
            ..large_sample()
        };
        assert!(matches!(
            confidence_interval(&nan),
            Err(StatError::InvalidNumber { .. })
        ));
        let single = IntervalInput {
            sample_size: 1,
            ..large_sample()
        };
        assert!(matches!(
            confidence_interval(&single),
            Err(StatError::SampleSizeTooSmall { minimum: 2, .. })
        ));
        let flat = IntervalInput {
            sd: 0.0,
            ..large_sample()
        };
        assert!(matches!(
            confidence_interval(&flat),
            Err(StatError::NonPositiveDeviation { .. })
        ));
    }

    #[test]
    fn from_fields_rejects_unknown_level() {
        assert_eq!(
            IntervalInput::from_fields("50", "10", "36", "95").unwrap(),
            large_sample()
        );
        assert_eq!(
            IntervalInput::from_fields("50", "10", "36", "80"),
            Err(StatError::UnsupportedLevel { value: 80.0 })
        );
    }
}
