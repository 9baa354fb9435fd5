use crate::error::StatError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod inference;
pub mod lookup;

pub mod utils;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tails {
    One,
    Two, // alpha is split across both tails
}

/// Outcome of comparing a statistic against its critical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Reject,
    FailToReject,
}

impl Decision {
    /// Reject the null hypothesis iff `|statistic| > critical`.
    pub fn from_statistic(statistic: f64, critical: f64) -> Self {
        if statistic.abs() > critical {
            Decision::Reject
        } else {
            Decision::FailToReject
        }
    }

    pub fn is_reject(self) -> bool {
        matches!(self, Decision::Reject)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Reject => f.write_str("Reject"),
            Decision::FailToReject => f.write_str("Fail to reject"),
        }
    }
}

/// Confidence levels offered by the interval calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    Ninety,
    NinetyFive,
    NinetyNine,
}

impl ConfidenceLevel {
    pub fn percent(self) -> u32 {
        match self {
            ConfidenceLevel::Ninety => 90,
            ConfidenceLevel::NinetyFive => 95,
            ConfidenceLevel::NinetyNine => 99,
        }
    }

    /// Two-tailed significance level, `1 - percent / 100`.
    pub fn alpha(self) -> f64 {
        1.0 - f64::from(self.percent()) / 100.0
    }

    /// Normal critical value used for large samples.
    pub fn z_critical(self) -> f64 {
        match self {
            ConfidenceLevel::Ninety => 1.645,
            ConfidenceLevel::NinetyFive => 1.96,
            ConfidenceLevel::NinetyNine => 2.576,
        }
    }
}

impl TryFrom<u32> for ConfidenceLevel {
    type Error = StatError;

    fn try_from(percent: u32) -> Result<Self, Self::Error> {
        match percent {
            90 => Ok(ConfidenceLevel::Ninety),
            95 => Ok(ConfidenceLevel::NinetyFive),
            99 => Ok(ConfidenceLevel::NinetyNine),
            other => Err(StatError::UnsupportedLevel {
                value: f64::from(other),
            }),
        }
    }
}

/// Which distribution a confidence interval's critical value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CriticalSource {
    T,
    Z,
}

impl fmt::Display for CriticalSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CriticalSource::T => f.write_str("t-value"),
            CriticalSource::Z => f.write_str("z-value"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strength {
    VeryStrong,
    Strong,
    Moderate,
    Weak,
    VeryWeak,
}

impl Strength {
    /// Bucket `|r|` at 0.9, 0.7, 0.5 and 0.3.
    pub fn from_coefficient(r: f64) -> Self {
        let abs_r = r.abs();
        if abs_r >= 0.9 {
            Strength::VeryStrong
        } else if abs_r >= 0.7 {
            Strength::Strong
        } else if abs_r >= 0.5 {
            Strength::Moderate
        } else if abs_r >= 0.3 {
            Strength::Weak
        } else {
            Strength::VeryWeak
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Strength::VeryStrong => "Very Strong",
            Strength::Strong => "Strong",
            Strength::Moderate => "Moderate",
            Strength::Weak => "Weak",
            Strength::VeryWeak => "Very Weak",
        }
    }

    /// Weak and very weak correlations are reported as "little to no" relationship.
    pub fn is_negligible(self) -> bool {
        matches!(self, Strength::Weak | Strength::VeryWeak)
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    pub fn from_coefficient(r: f64) -> Self {
        if r >= 0.0 {
            Direction::Positive
        } else {
            Direction::Negative
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Positive => "Positive",
            Direction::Negative => "Negative",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a one-sample test compares: a sample mean against a hypothesised population mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeanComparison {
    pub sample_mean: f64,
    pub population_mean: f64,
    pub sample_size: u32,
    /// Significance level the test is run at
    pub alpha: f64,
}

/// Result of a one-sample t-test or z-test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypothesisTestResult {
    /// The test statistic (t or z)
    pub statistic: f64,
    /// Standard error of the mean
    pub standard_error: f64,
    /// Degrees of freedom (t-test only)
    pub degrees_of_freedom: Option<u32>,
    /// Two-tailed critical value the statistic is compared against
    pub critical_value: f64,
    /// Bucketed p-value, not an exact tail probability
    pub p_value: f64,
    pub decision: Decision,
    /// Significance level the test was run at
    pub alpha: f64,
    pub sample_mean: f64,
    pub population_mean: f64,
    pub sample_size: u32,
    /// Sentence describing the decision in plain language
    pub interpretation: String,
}

impl HypothesisTestResult {
    /// Create a result for a comparison of `sample_mean` against `population_mean`.
    ///
    /// The decision and interpretation are derived from the statistic and critical value.
    pub fn new(
        comparison: &MeanComparison,
        statistic: f64,
        standard_error: f64,
        critical_value: f64,
        p_value: f64,
    ) -> Self {
        let decision = Decision::from_statistic(statistic, critical_value);
        HypothesisTestResult {
            statistic,
            standard_error,
            degrees_of_freedom: None,
            critical_value,
            p_value,
            decision,
            alpha: comparison.alpha,
            sample_mean: comparison.sample_mean,
            population_mean: comparison.population_mean,
            sample_size: comparison.sample_size,
            interpretation: interpret_mean_comparison(decision, comparison),
        }
    }

    /// Add degrees of freedom to the result
    pub fn with_degrees_of_freedom(mut self, df: u32) -> Self {
        self.degrees_of_freedom = Some(df);
        self
    }

    /// Whether the approximate p-value falls below the given threshold
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

fn interpret_mean_comparison(decision: Decision, comparison: &MeanComparison) -> String {
    let evidence = match decision {
        Decision::Reject => "sufficient",
        Decision::FailToReject => "insufficient",
    };
    format!(
        "At the {}% significance level, there is {} evidence to conclude that the sample mean ({}) \
         is significantly different from the population mean ({}).",
        comparison.alpha * 100.0,
        evidence,
        comparison.sample_mean,
        comparison.population_mean
    )
}

/// Result of a confidence interval for a mean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalResult {
    pub mean: f64,
    pub standard_error: f64,
    pub critical_value: f64,
    pub critical_source: CriticalSource,
    pub margin_of_error: f64,
    pub lower: f64,
    pub upper: f64,
    pub level: ConfidenceLevel,
    pub sample_size: u32,
    pub interpretation: String,
}

impl IntervalResult {
    pub fn new(
        mean: f64,
        standard_error: f64,
        critical_value: f64,
        critical_source: CriticalSource,
        level: ConfidenceLevel,
        sample_size: u32,
    ) -> Self {
        let margin_of_error = critical_value * standard_error;
        let lower = mean - margin_of_error;
        let upper = mean + margin_of_error;
        IntervalResult {
            mean,
            standard_error,
            critical_value,
            critical_source,
            margin_of_error,
            lower,
            upper,
            level,
            sample_size,
            interpretation: format!(
                "We are {}% confident that the true population mean μ lies between {:.2} and {:.2}.",
                level.percent(),
                lower,
                upper
            ),
        }
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Result of a Pearson correlation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    /// Number of paired observations after filtering
    pub n: usize,
    /// X values that entered the computation, non-finite entries removed
    pub x: Vec<f64>,
    /// Y values that entered the computation, non-finite entries removed
    pub y: Vec<f64>,
    pub x_mean: f64,
    pub y_mean: f64,
    /// Pearson coefficient in [-1, 1]
    pub r: f64,
    /// Coefficient of determination
    pub r_squared: f64,
    pub strength: Strength,
    pub direction: Direction,
    pub interpretation: String,
}

impl CorrelationResult {
    /// `x` and `y` are the filtered, equal-length sequences the coefficient was computed from.
    pub fn new(x: Vec<f64>, y: Vec<f64>, x_mean: f64, y_mean: f64, r: f64) -> Self {
        let r_squared = r * r;
        let strength = Strength::from_coefficient(r);
        let direction = Direction::from_coefficient(r);
        let interpretation = if strength.is_negligible() {
            "This indicates little to no linear relationship between the variables. \
             Other types of relationships (non-linear) might exist."
                .to_string()
        } else {
            format!(
                "This indicates a {} {} linear relationship between X and Y. Approximately {:.1}% \
                 of the variance in Y can be explained by X through a linear model.",
                strength.label().to_lowercase(),
                direction.label().to_lowercase(),
                r_squared * 100.0
            )
        };
        CorrelationResult {
            n: x.len(),
            x,
            y,
            x_mean,
            y_mean,
            r,
            r_squared,
            strength,
            direction,
            interpretation,
        }
    }

    /// Share of the variance in Y explained by X, as a percentage.
    pub fn variance_explained(&self) -> f64 {
        self.r_squared * 100.0
    }
}
