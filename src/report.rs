//! Plain-text rendering of calculator results.
//!
//! Renderers only format fields the calculators already computed; nothing here touches the
//! statistics. Output layout follows the result panels of the calculators: a block of
//! numeric fields followed by the decision or headline value and its interpretation.

use crate::testing::inference::Outcome;
use crate::testing::{CorrelationResult, HypothesisTestResult, IntervalResult};
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Formatting options for rendered reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// Decimal places for statistics, standard errors and bounds
    pub decimals: usize,
    /// p-values below this are shown as "< floor"
    pub p_value_floor: f64,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            decimals: 4,
            p_value_floor: 0.001,
        }
    }
}

impl ReportOptions {
    /// Load options from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Failed to parse report options")
    }
}

pub fn format_p_value(p_value: f64, options: &ReportOptions) -> String {
    if p_value < options.p_value_floor {
        format!("< {}", options.p_value_floor)
    } else {
        format!("{:.3}", p_value)
    }
}

fn fixed(value: f64, options: &ReportOptions) -> String {
    format!("{:.*}", options.decimals, value)
}

/// Render a t-test or z-test result. The statistic is labelled `t` when degrees of freedom
/// are present and `z` otherwise.
pub fn render_test(result: &HypothesisTestResult, options: &ReportOptions) -> String {
    let (title, symbol) = match result.degrees_of_freedom {
        Some(_) => ("T-Test Results", "t"),
        None => ("Z-Test Results", "z"),
    };

    let mut lines = vec![
        title.to_string(),
        format!("Test Statistic ({}): {}", symbol, fixed(result.statistic, options)),
    ];
    if let Some(df) = result.degrees_of_freedom {
        lines.push(format!("Degrees of Freedom: {}", df));
    }
    lines.push(format!(
        "Standard Error: {}",
        fixed(result.standard_error, options)
    ));
    lines.push(format!(
        "Critical Value (±): {}",
        fixed(result.critical_value, options)
    ));
    lines.push(format!(
        "Approximate p-value: {}",
        format_p_value(result.p_value, options)
    ));
    if result.degrees_of_freedom.is_none() {
        lines.push(format!("Sample Size: n = {}", result.sample_size));
    }
    lines.push(format!("Decision: {} H₀", result.decision));
    lines.push(format!("Interpretation: {}", result.interpretation));
    lines.join("\n")
}

pub fn render_interval(result: &IntervalResult, options: &ReportOptions) -> String {
    [
        "Confidence Interval Results".to_string(),
        format!("Sample Mean (x̄): {}", fixed(result.mean, options)),
        format!("Standard Error: {}", fixed(result.standard_error, options)),
        format!(
            "Critical Value: {} ({})",
            fixed(result.critical_value, options),
            result.critical_source
        ),
        format!("Margin of Error: ±{}", fixed(result.margin_of_error, options)),
        format!("Sample Size: n = {}", result.sample_size),
        format!("{}% Confidence Interval", result.level.percent()),
        format!(
            "[{}, {}]",
            fixed(result.lower, options),
            fixed(result.upper, options)
        ),
        format!("Interpretation: {}", result.interpretation),
    ]
    .join("\n")
}

/// Render a correlation result. The filtered values the coefficient was computed from are
/// listed at two decimals.
pub fn render_correlation(result: &CorrelationResult, options: &ReportOptions) -> String {
    let list = |values: &[f64]| {
        values
            .iter()
            .map(|v| format!("{:.2}", v))
            .collect::<Vec<_>>()
            .join(", ")
    };

    [
        "Correlation Analysis Results".to_string(),
        format!("Number of Data Points: n = {}", result.n),
        format!("Mean of X: {}", fixed(result.x_mean, options)),
        format!("Mean of Y: {}", fixed(result.y_mean, options)),
        format!("X Values: [{}]", list(&result.x)),
        format!("Y Values: [{}]", list(&result.y)),
        format!("Correlation Coefficient (r): {}", fixed(result.r, options)),
        format!(
            "R² (Coefficient of Determination): {} ({:.2}% of variance explained)",
            fixed(result.r_squared, options),
            result.variance_explained()
        ),
        format!("Strength: {}", result.strength),
        format!("Direction: {}", result.direction),
        format!("Interpretation: {}", result.interpretation),
    ]
    .join("\n")
}

/// Render any outcome.
pub fn render_outcome(outcome: &Outcome, options: &ReportOptions) -> String {
    match outcome {
        Outcome::TTest(result) | Outcome::ZTest(result) => render_test(result, options),
        Outcome::ConfidenceInterval(result) => render_interval(result, options),
        Outcome::Correlation(result) => render_correlation(result, options),
    }
}
